use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub type Frame = image::RgbImage;

/// Numeric identifier of a loadable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ItemId)
    }
}

/// Free-form key/value description of an item, shown as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub entries: Vec<(String, String)>,
}

impl ItemMetadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Flatten a JSON object into display entries. Nested values are kept as
    /// compact JSON, arrays of strings are joined with spaces.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let entries = object
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Array(items) if items.iter().all(|v| v.is_string()) => items
                        .iter()
                        .filter_map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(" "),
                    other => other.to_string(),
                };
                (key.clone(), text)
            })
            .collect();

        Self { entries }
    }
}

/// Decoded frames of one item, in display order.
#[derive(Debug, Clone)]
pub struct FrameSource {
    item_id: ItemId,
    frames: Vec<Frame>,
    metadata: ItemMetadata,
}

impl FrameSource {
    pub fn new(item_id: ItemId, frames: Vec<Frame>, metadata: ItemMetadata) -> Self {
        Self {
            item_id,
            frames,
            metadata,
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn metadata(&self) -> &ItemMetadata {
        &self.metadata
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("item {0} not found")]
    NotFound(ItemId),
    #[error("item {0} has no frames")]
    Empty(ItemId),
    #[error("failed to decode {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid metadata in {path:?}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Resolves an identifier to its frames.
pub trait Loader {
    fn lookup(&self, id: ItemId) -> Result<FrameSource, LoadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// The destination already existed and was left untouched.
    Skipped(PathBuf),
}

/// Writes single frames somewhere persistent. Never overwrites.
pub trait FrameSink {
    fn save_frame(&self, item: ItemId, index: usize, frame: &Frame) -> anyhow::Result<SaveOutcome>;
}
