use super::traits::PixelRenderer;
use super::types::Cell;
use image::Rgb;
use ratatui::style::Color;

const RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Luminance shading for terminals without truecolor.
pub struct AsciiRenderer;

impl PixelRenderer for AsciiRenderer {
    fn render_pair(&self, top: Rgb<u8>, bottom: Option<Rgb<u8>>) -> Cell {
        let luma = match bottom {
            Some(bottom) => (luminance(top) + luminance(bottom)) / 2,
            None => luminance(top),
        };
        let index = luma as usize * (RAMP.len() - 1) / 255;
        Cell::new(RAMP[index], Color::Gray, Color::Reset)
    }
}

fn luminance(pixel: Rgb<u8>) -> u32 {
    let [r, g, b] = pixel.0;
    (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000
}
