use crate::command::{CommandDispatcher, CommandTree, TreeError};
use crate::event::Event;
use crate::menu::build_menu;
use crate::report::Reporter;
use crate::session::Session;

/// The consumer side of the event queue: a session plus the dispatcher that
/// drives it.
pub struct Viewer {
    dispatcher: CommandDispatcher<Session>,
    session: Session,
}

impl Viewer {
    pub fn new(session: Session, reporter: Reporter) -> Result<Self, TreeError> {
        Ok(Self::with_tree(build_menu()?, session, reporter))
    }

    pub fn with_tree(tree: CommandTree<Session>, session: Session, reporter: Reporter) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(tree, reporter),
            session,
        }
    }

    /// Process one event to completion. Never re-entered.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key { code, shift } => {
                self.dispatcher.handle_key(code, shift, &mut self.session);
            }
            Event::Tick(id) => self.session.engine_mut().on_tick(id),
            Event::Redraw => {}
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn dispatcher(&self) -> &CommandDispatcher<Session> {
        &self.dispatcher
    }

    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }
}
