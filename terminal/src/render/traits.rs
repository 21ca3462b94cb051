use super::types::Cell;
use image::Rgb;

/// Turns two vertically stacked pixels into one terminal cell.
pub trait PixelRenderer {
    /// `bottom` is `None` on the last row of an odd-height frame.
    fn render_pair(&self, top: Rgb<u8>, bottom: Option<Rgb<u8>>) -> Cell;
}
