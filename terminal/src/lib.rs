pub mod app;
pub mod config;
pub mod input;
pub mod loader;
pub mod logging;
pub mod render;
pub mod timer;
pub mod views;
