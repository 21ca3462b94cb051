use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg }
    }

    pub fn blank() -> Self {
        Self::new(' ', Color::Reset, Color::Reset)
    }

    fn style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

/// Fixed-size grid of styled terminal cells.
pub struct CellGrid {
    grid: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl CellGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: vec![vec![Cell::blank(); width]; height],
            width,
            height,
        }
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(row) = self.grid.get_mut(y) {
            if let Some(slot) = row.get_mut(x) {
                *slot = cell;
            }
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.grid.get(y)?.get(x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// One line per row; neighbouring cells with the same colors share a span.
    pub fn into_styled_lines(self) -> Vec<Line<'static>> {
        self.grid
            .into_iter()
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_style: Option<Style> = None;

                for cell in row {
                    let style = cell.style();
                    if run_style != Some(style) {
                        if let Some(prev) = run_style {
                            spans.push(Span::styled(std::mem::take(&mut run), prev));
                        }
                        run_style = Some(style);
                    }
                    run.push(cell.ch);
                }
                if let Some(style) = run_style {
                    spans.push(Span::styled(run, style));
                }
                Line::from(spans)
            })
            .collect()
    }
}
