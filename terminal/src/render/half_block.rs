use super::traits::PixelRenderer;
use super::types::Cell;
use image::Rgb;
use ratatui::style::Color;

/// Truecolor upper-half blocks: foreground is the top pixel, background the
/// bottom one.
pub struct HalfBlockRenderer;

impl PixelRenderer for HalfBlockRenderer {
    fn render_pair(&self, top: Rgb<u8>, bottom: Option<Rgb<u8>>) -> Cell {
        let bg = bottom.map(rgb).unwrap_or(Color::Reset);
        Cell::new('▀', rgb(top), bg)
    }
}

fn rgb(pixel: Rgb<u8>) -> Color {
    let [r, g, b] = pixel.0;
    Color::Rgb(r, g, b)
}
