pub mod assets;
pub mod sink;

pub use assets::AssetLoader;
pub use sink::JpegSink;
