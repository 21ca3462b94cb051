use common::{Event, ItemId, MenuView, Report, Viewer};
use ratatui::Frame;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::render::RenderMode;
use crate::views;

/// Latest text the core published for each panel.
#[derive(Debug, Default, Clone)]
pub struct Panels {
    pub status: String,
    pub play_info: String,
    pub menu: Option<MenuView>,
}

impl Panels {
    pub fn apply(&mut self, report: Report) {
        match report {
            Report::Status(text) => self.status = text,
            Report::PlayInfo(text) => self.play_info = text,
            Report::Menu(view) => self.menu = Some(view),
        }
    }
}

pub struct App {
    viewer: Viewer,
    reports: UnboundedReceiver<Report>,
    panels: Panels,
    render_mode: RenderMode,
}

impl App {
    pub fn new(viewer: Viewer, reports: UnboundedReceiver<Report>, render_mode: RenderMode) -> Self {
        let mut app = Self {
            viewer,
            reports,
            panels: Panels::default(),
            render_mode,
        };
        app.panels.play_info = app.viewer.session().engine().play_info();
        app.drain_reports();
        app
    }

    pub fn load_item(&mut self, id: ItemId) {
        self.viewer.session_mut().load_item(&id.to_string());
    }

    pub fn handle_event(&mut self, event: Event) {
        self.viewer.handle_event(event);
    }

    /// Pull everything the core published since the last frame.
    pub fn drain_reports(&mut self) {
        while let Ok(report) = self.reports.try_recv() {
            self.panels.apply(report);
        }
    }

    pub fn is_running(&self) -> bool {
        self.viewer.is_running()
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn render(&self, frame: &mut Frame) {
        views::viewer::render(self, frame);
    }
}
