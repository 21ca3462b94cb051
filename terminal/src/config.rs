use clap::Parser;
use common::{EndOfStream, ItemId, PlaybackPolicy, StepBounds};
use std::path::PathBuf;

use crate::render::RenderMode;

/// Command line and environment configuration. A `.env` file in the working
/// directory is read before parsing.
#[derive(Debug, Clone, Parser)]
#[command(name = "sakuview", version, about = "Frame-by-frame viewer driven by single-key commands")]
pub struct Config {
    /// Item to load on startup
    pub item: Option<u64>,

    /// Directory holding `<id>/frames/*`, `<id>.gif` and saved frames
    #[arg(long, env = "SAKUVIEW_ASSET_PATH", default_value = "./asset")]
    pub asset_path: PathBuf,

    /// Frames larger than this are scaled down on load
    #[arg(long, env = "SAKUVIEW_MAX_WIDTH", default_value_t = 1024)]
    pub max_width: u32,

    #[arg(long, env = "SAKUVIEW_MAX_HEIGHT", default_value_t = 576)]
    pub max_height: u32,

    /// Loop back to the first frame instead of stopping at the end
    #[arg(long = "loop", env = "SAKUVIEW_LOOP")]
    pub loop_playback: bool,

    /// Single steps wrap around at either end instead of holding
    #[arg(long, env = "SAKUVIEW_WRAP_STEPS")]
    pub wrap_steps: bool,

    /// Draw frames with ASCII shading instead of colored half blocks
    #[arg(long, env = "SAKUVIEW_ASCII")]
    pub ascii: bool,

    #[arg(long, env = "SAKUVIEW_LOG_FILE", default_value = "sakuview.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn policy(&self) -> PlaybackPolicy {
        PlaybackPolicy {
            end_of_stream: if self.loop_playback {
                EndOfStream::Loop
            } else {
                EndOfStream::Stop
            },
            step_bounds: if self.wrap_steps {
                StepBounds::Wrap
            } else {
                StepBounds::Clamp
            },
        }
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.ascii {
            RenderMode::Ascii
        } else {
            RenderMode::HalfBlock
        }
    }

    pub fn initial_item(&self) -> Option<ItemId> {
        self.item.map(ItemId)
    }
}
