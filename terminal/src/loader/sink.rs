use anyhow::{Context, Result};
use common::{Frame, FrameSink, ItemId, SaveOutcome};
use image::ImageFormat;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes frames as `<root>/<id>/<index>.jpg`.
pub struct JpegSink {
    root: PathBuf,
}

impl JpegSink {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn path_for(&self, item: ItemId, index: usize) -> PathBuf {
        self.root.join(item.to_string()).join(format!("{}.jpg", index))
    }
}

impl FrameSink for JpegSink {
    fn save_frame(&self, item: ItemId, index: usize, frame: &Frame) -> Result<SaveOutcome> {
        let path = self.path_for(item, index);
        if path.exists() {
            return Ok(SaveOutcome::Skipped(path));
        }

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        }
        frame
            .save_with_format(&path, ImageFormat::Jpeg)
            .with_context(|| format!("Failed to write frame: {:?}", path))?;

        info!("saved frame {} of item {} to {:?}", index, item, path);
        Ok(SaveOutcome::Saved(path))
    }
}
