use super::traits::PixelRenderer;
use super::types::CellGrid;
use common::Frame;

/// Scales a frame into a cell area, two pixel rows per cell, keeping the
/// aspect ratio. Sampling is nearest neighbour.
pub struct FrameView<R: PixelRenderer> {
    renderer: R,
}

impl<R: PixelRenderer> FrameView<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn render(&self, frame: &Frame, columns: u16, rows: u16) -> CellGrid {
        let (frame_w, frame_h) = frame.dimensions();
        if frame_w == 0 || frame_h == 0 || columns == 0 || rows == 0 {
            return CellGrid::new(0, 0);
        }

        // Target size in pixels: one pixel per column, two per row
        let max_w = columns as f32;
        let max_h = rows as f32 * 2.0;
        let scale = (max_w / frame_w as f32).min(max_h / frame_h as f32);
        let target_w = ((frame_w as f32 * scale) as u32).max(1);
        let target_h = ((frame_h as f32 * scale) as u32).max(1);

        let grid_h = target_h.div_ceil(2);
        let mut grid = CellGrid::new(target_w as usize, grid_h as usize);

        let sample = |x: u32, y: u32| {
            let sx = (x as u64 * frame_w as u64 / target_w as u64) as u32;
            let sy = (y as u64 * frame_h as u64 / target_h as u64) as u32;
            *frame.get_pixel(sx.min(frame_w - 1), sy.min(frame_h - 1))
        };

        for row in 0..grid_h {
            for x in 0..target_w {
                let top = sample(x, row * 2);
                let bottom = (row * 2 + 1 < target_h).then(|| sample(x, row * 2 + 1));
                grid.set(x as usize, row as usize, self.renderer.render_pair(top, bottom));
            }
        }

        grid
    }
}
