use common::{Frame, FrameSource, ItemId, ItemMetadata, LoadError, Loader};
use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, DynamicImage};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Loads items from an asset directory:
///
/// ```text
/// <root>/<id>/frames/0.png, 1.png, ...   one image per frame
/// <root>/<id>.gif                        or an animated gif
/// <root>/<id>/info.json                  optional metadata object
/// ```
pub struct AssetLoader {
    root: PathBuf,
    max_width: u32,
    max_height: u32,
}

impl AssetLoader {
    pub fn new(root: PathBuf, max_width: u32, max_height: u32) -> Self {
        Self {
            root,
            max_width,
            max_height,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Frame files of a directory, numeric stems first in numeric order,
    /// everything else after them by name.
    pub fn list_frame_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
        let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|source| LoadError::Io {
                    path: dir.to_path_buf(),
                    source,
                })?
                .path();
            let is_frame = path
                .extension()
                .and_then(OsStr::to_str)
                .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_frame {
                files.push(path);
            }
        }

        files.sort_by_key(|path| {
            let stem = path.file_stem().and_then(OsStr::to_str).unwrap_or_default();
            let number = stem.parse::<u64>().ok();
            (number.is_none(), number, stem.to_string())
        });
        Ok(files)
    }

    fn load_frame_dir(&self, dir: &Path) -> Result<Vec<Frame>, LoadError> {
        let files = Self::list_frame_files(dir)?;
        debug!("decoding {} frame files from {:?}", files.len(), dir);

        files
            .iter()
            .map(|path| {
                image::open(path)
                    .map(|image| self.fit(image))
                    .map_err(|source| LoadError::Decode {
                        path: path.clone(),
                        source,
                    })
            })
            .collect()
    }

    fn load_gif(&self, path: &Path) -> Result<Vec<Frame>, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decode_error = |source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        };

        let decoder = GifDecoder::new(BufReader::new(file)).map_err(decode_error)?;
        let frames = decoder.into_frames().collect_frames().map_err(decode_error)?;
        debug!("decoded {} gif frames from {:?}", frames.len(), path);

        Ok(frames
            .into_iter()
            .map(|frame| self.fit(DynamicImage::ImageRgba8(frame.into_buffer())))
            .collect())
    }

    fn load_metadata(&self, dir: &Path) -> Result<ItemMetadata, LoadError> {
        let path = dir.join("info.json");
        if !path.is_file() {
            return Ok(ItemMetadata::default());
        }

        let text = fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|source| LoadError::Metadata { path, source })?;
        Ok(ItemMetadata::from_json(&value))
    }

    /// Scale down to fit the configured bounds, keeping the aspect ratio.
    fn fit(&self, image: DynamicImage) -> Frame {
        if image.width() > self.max_width || image.height() > self.max_height {
            image
                .resize(self.max_width, self.max_height, FilterType::Triangle)
                .to_rgb8()
        } else {
            image.to_rgb8()
        }
    }
}

impl Loader for AssetLoader {
    fn lookup(&self, id: ItemId) -> Result<FrameSource, LoadError> {
        let item_dir = self.root.join(id.to_string());
        let frame_dir = item_dir.join("frames");
        let gif = self.root.join(format!("{}.gif", id));

        let frames = if frame_dir.is_dir() {
            self.load_frame_dir(&frame_dir)?
        } else if gif.is_file() {
            self.load_gif(&gif)?
        } else {
            return Err(LoadError::NotFound(id));
        };

        if frames.is_empty() {
            return Err(LoadError::Empty(id));
        }

        let metadata = self.load_metadata(&item_dir)?;
        info!("loaded item {} with {} frames", id, frames.len());
        Ok(FrameSource::new(id, frames, metadata))
    }
}
