pub mod ascii;
pub mod frame_view;
pub mod half_block;
pub mod traits;
pub mod types;

use ascii::AsciiRenderer;
use common::Frame;
use frame_view::FrameView;
use half_block::HalfBlockRenderer;
use types::CellGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    HalfBlock,
    Ascii,
}

impl RenderMode {
    pub fn render(self, frame: &Frame, columns: u16, rows: u16) -> CellGrid {
        match self {
            RenderMode::HalfBlock => FrameView::new(HalfBlockRenderer).render(frame, columns, rows),
            RenderMode::Ascii => FrameView::new(AsciiRenderer).render(frame, columns, rows),
        }
    }
}
