use anyhow::{Context, Result};
use common::{Event, KeyCode};
use crossterm::event::{self, Event as TermEvent, KeyCode as TermKeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::thread::{self, JoinHandle};
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

/// Translate a crossterm key press into a core key event. Releases and
/// repeats are dropped, as are chords with Ctrl or Alt.
pub fn translate_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let code = if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        KeyCode::Other
    } else {
        match key.code {
            TermKeyCode::Char(c) => KeyCode::Char(c),
            TermKeyCode::Enter => KeyCode::Enter,
            TermKeyCode::Esc => KeyCode::Esc,
            TermKeyCode::Backspace => KeyCode::Backspace,
            TermKeyCode::Tab | TermKeyCode::BackTab => KeyCode::Tab,
            _ => KeyCode::Other,
        }
    };

    Some(Event::Key { code, shift })
}

/// Read terminal input on a dedicated thread and feed it into the event
/// queue. The thread ends when the queue is closed or input fails.
pub fn spawn_input_thread(events: UnboundedSender<Event>) -> Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || loop {
            let event = match event::read() {
                Ok(TermEvent::Key(key)) => translate_key(key),
                Ok(TermEvent::Resize(..)) => Some(Event::Redraw),
                Ok(_) => None,
                Err(err) => {
                    error!("Failed to read terminal input: {:?}", err);
                    break;
                }
            };

            if let Some(event) = event {
                if events.send(event).is_err() {
                    break;
                }
            }
        })
        .context("Failed to spawn input thread")
}
