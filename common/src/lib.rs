mod command;
mod event;
mod frames;
mod keys;
mod menu;
mod playback;
mod report;
mod session;
mod viewer;

pub use command::*;
pub use event::*;
pub use frames::*;
pub use keys::*;
pub use menu::*;
pub use playback::*;
pub use report::*;
pub use session::*;
pub use viewer::*;
