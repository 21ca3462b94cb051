use crate::keys::KeyCode;
use crate::playback::TimerId;

/// Everything the single consumer loop reacts to. Keys come from the input
/// device, ticks from the playback timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Key { code: KeyCode, shift: bool },
    Tick(TimerId),
    /// Nothing changed in the core, the screen just needs repainting.
    Redraw,
}
