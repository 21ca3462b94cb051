use crate::command::CommandKind;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One line of the active menu listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: char,
    pub name: String,
    pub help: Option<String>,
    pub kind: CommandKind,
}

/// What the command panel should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub entries: Vec<MenuEntry>,
    /// Typed value, present only while an input prompt is active.
    pub input: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Status(String),
    PlayInfo(String),
    Menu(MenuView),
}

/// Publishing half of the report channel. Sends are fire-and-forget; a
/// dropped receiver just means nobody is listening any more.
#[derive(Debug, Clone)]
pub struct Reporter {
    tx: UnboundedSender<Report>,
}

impl Reporter {
    pub fn channel() -> (Self, UnboundedReceiver<Report>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn status(&self, text: impl Into<String>) {
        let text = text.into();
        log::info!("status: {}", text);
        self.publish(Report::Status(text));
    }

    pub fn play_info(&self, text: impl Into<String>) {
        self.publish(Report::PlayInfo(text.into()));
    }

    pub fn menu(&self, view: MenuView) {
        self.publish(Report::Menu(view));
    }

    fn publish(&self, report: Report) {
        let _ = self.tx.send(report);
    }
}
