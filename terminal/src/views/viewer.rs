use super::panels;
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutMode {
    SingleColumn, // Tall/narrow screens
    TwoColumn,    // Wide screens
}

impl LayoutMode {
    pub fn from_dimensions(width: u16, height: u16) -> Self {
        const MIN_WIDTH_FOR_TWO_COLUMN: u16 = 120;
        const ASPECT_RATIO_THRESHOLD: f32 = 2.5;

        let aspect_ratio = width as f32 / height.max(1) as f32;
        if width >= MIN_WIDTH_FOR_TWO_COLUMN && aspect_ratio >= ASPECT_RATIO_THRESHOLD {
            LayoutMode::TwoColumn
        } else {
            LayoutMode::SingleColumn
        }
    }
}

const TIMELINE_HEIGHT: u16 = 3;
const PANEL_HEIGHT: u16 = 10;
const STATUS_HEIGHT: u16 = 1;

pub fn render(app: &App, frame: &mut Frame) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STATUS_HEIGHT)])
        .split(frame.area());

    match LayoutMode::from_dimensions(frame.area().width, frame.area().height) {
        LayoutMode::SingleColumn => render_single_column(app, frame, outer[0]),
        LayoutMode::TwoColumn => render_two_column(app, frame, outer[0]),
    }

    frame.render_widget(panels::status(&app.panels().status), outer[1]);
}

fn render_single_column(app: &App, frame: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),                  // Frame
            Constraint::Length(TIMELINE_HEIGHT), // Timeline
            Constraint::Length(PANEL_HEIGHT),    // Commands / info / playing
        ])
        .split(area);

    render_frame(app, frame, chunks[0]);
    frame.render_widget(timeline(app), chunks[1]);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(40),
            Constraint::Percentage(25),
        ])
        .split(chunks[2]);

    frame.render_widget(panels::commands(app.panels().menu.as_ref()), row[0]);
    frame.render_widget(metadata(app), row[1]);
    frame.render_widget(panels::play_info(&app.panels().play_info), row[2]);
}

fn render_two_column(app: &App, frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(TIMELINE_HEIGHT)])
        .split(columns[0]);
    render_frame(app, frame, left[0]);
    frame.render_widget(timeline(app), left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(PANEL_HEIGHT),
            Constraint::Length(8),
            Constraint::Min(4),
        ])
        .split(columns[1]);
    frame.render_widget(panels::commands(app.panels().menu.as_ref()), right[0]);
    frame.render_widget(panels::play_info(&app.panels().play_info), right[1]);
    frame.render_widget(metadata(app), right[2]);
}

fn render_frame(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().title("Frame").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(image) = app.viewer().session().engine().current_frame() else {
        return;
    };

    let grid = app.render_mode().render(image, inner.width, inner.height);
    let (width, height) = (grid.width() as u16, grid.height() as u16);

    // Center inside the block
    let x_offset = inner.width.saturating_sub(width) / 2;
    let y_offset = inner.height.saturating_sub(height) / 2;
    let target = Rect {
        x: inner.x + x_offset,
        y: inner.y + y_offset,
        width: width.min(inner.width),
        height: height.min(inner.height),
    };

    frame.render_widget(Paragraph::new(grid.into_styled_lines()), target);
}

fn timeline(app: &App) -> Gauge<'static> {
    let engine = app.viewer().session().engine();
    let count = engine.frame_count();
    let (ratio, label) = match engine.current_index() {
        Some(index) => {
            let ratio = if count > 1 {
                index as f64 / (count - 1) as f64
            } else {
                1.0
            };
            (ratio, format!("{} / {}", index, count))
        }
        None => (0.0, "-".to_string()),
    };

    Gauge::default()
        .block(Block::default().title("Timeline").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label)
}

fn metadata(app: &App) -> Paragraph<'static> {
    let source = app.viewer().session().engine().source();
    panels::metadata(source.map(|s| s.metadata()))
}
