use crate::frames::{FrameSink, ItemId, LoadError, Loader, SaveOutcome};
use crate::playback::{EndOfStream, PlaybackEngine, StepBounds};
use crate::report::Reporter;
use std::sync::Arc;

/// Everything command handlers may touch. Owned by the event loop and handed
/// to the dispatcher by `&mut` for each key.
pub struct Session {
    engine: PlaybackEngine,
    loader: Box<dyn Loader>,
    sink: Box<dyn FrameSink>,
    reporter: Reporter,
    running: bool,
}

impl Session {
    pub fn new(
        engine: PlaybackEngine,
        loader: Box<dyn Loader>,
        sink: Box<dyn FrameSink>,
        reporter: Reporter,
    ) -> Self {
        Self {
            engine,
            loader,
            sink,
            reporter,
            running: true,
        }
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PlaybackEngine {
        &mut self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Look up `input` as an item id and bind it. On failure the current
    /// binding is left alone.
    pub fn load_item(&mut self, input: &str) {
        let id: ItemId = match input.parse() {
            Ok(id) => id,
            Err(_) => {
                self.reporter.status(format!("Invalid item id '{}'", input));
                return;
            }
        };

        match self.loader.lookup(id) {
            Ok(source) => {
                let frames = source.len();
                self.engine.load(Arc::new(source));
                if self.engine.source().is_some() {
                    self.reporter
                        .status(format!("Loaded item {} ({} frames)", id, frames));
                } else {
                    self.reporter.status(format!("Item {} has no frames", id));
                }
            }
            Err(LoadError::NotFound(id)) => {
                self.reporter.status(format!("Item {} not found", id));
            }
            Err(err) => {
                log::warn!("loading item {} failed: {:?}", id, err);
                self.reporter.status(format!("Failed to load item {}: {}", id, err));
            }
        }
    }

    pub fn goto_frame(&mut self, input: &str) {
        if self.engine.source().is_none() {
            return;
        }
        match input.trim().parse::<usize>() {
            Ok(index) => self.engine.seek(index),
            Err(_) => self.reporter.status(format!("Invalid frame '{}'", input)),
        }
    }

    /// Pause, write the current frame unless it was saved before, then step
    /// to the next frame.
    pub fn save_frame(&mut self) {
        let Some(source) = self.engine.source() else {
            return;
        };
        let item = source.item_id();

        self.engine.pause();
        let Some(index) = self.engine.current_index() else {
            return;
        };
        let Some(frame) = self.engine.current_frame() else {
            return;
        };

        match self.sink.save_frame(item, index, frame) {
            Ok(SaveOutcome::Saved(path)) => {
                self.reporter.status(format!("Saved {}", path.display()));
            }
            Ok(SaveOutcome::Skipped(path)) => {
                log::debug!("{} already exists, not overwriting", path.display());
            }
            Err(err) => {
                log::warn!("saving frame {} of item {} failed: {:?}", index, item, err);
                self.reporter.status(format!("Save failed: {}", err));
            }
        }

        self.engine.next_frame();
    }

    pub fn toggle_loop(&mut self) {
        let mut policy = self.engine.policy();
        policy.end_of_stream = match policy.end_of_stream {
            EndOfStream::Stop => EndOfStream::Loop,
            EndOfStream::Loop => EndOfStream::Stop,
        };
        self.engine.set_policy(policy);
    }

    pub fn toggle_wrap(&mut self) {
        let mut policy = self.engine.policy();
        policy.step_bounds = match policy.step_bounds {
            StepBounds::Clamp => StepBounds::Wrap,
            StepBounds::Wrap => StepBounds::Clamp,
        };
        self.engine.set_policy(policy);
    }

    pub fn exit(&mut self) {
        self.engine.stop();
        self.running = false;
    }
}
