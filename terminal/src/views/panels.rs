use common::{CommandKind, ItemMetadata, Key, MenuView};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn commands(menu: Option<&MenuView>) -> Paragraph<'static> {
    let Some(menu) = menu else {
        return Paragraph::new("").block(Block::default().title("Commands").borders(Borders::ALL));
    };

    let mut lines = Vec::new();
    if let Some(input) = &menu.input {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}_", input),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            "enter: confirm",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for entry in &menu.entries {
        let mut name = entry.name.clone();
        if entry.kind != CommandKind::Action {
            name.push_str(" ...");
        }
        let mut spans = vec![
            Span::styled(
                format!("{:>5} ", Key::Char(entry.key)),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(name),
        ];
        if let Some(help) = &entry.help {
            spans.push(Span::styled(
                format!("  {}", help),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));
    }

    Paragraph::new(lines).block(
        Block::default()
            .title(menu.title.clone())
            .borders(Borders::ALL),
    )
}

pub fn metadata(metadata: Option<&ItemMetadata>) -> Paragraph<'static> {
    let lines: Vec<Line> = match metadata {
        Some(metadata) if !metadata.entries.is_empty() => metadata
            .entries
            .iter()
            .map(|(key, value)| {
                Line::from(vec![
                    Span::styled(format!("{}: ", key), Style::default().fg(Color::Yellow)),
                    Span::raw(value.clone()),
                ])
            })
            .collect(),
        Some(_) => vec![Line::from("No metadata")],
        None => vec![Line::from("Press i to load an item")],
    };

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Info").borders(Borders::ALL))
}

pub fn play_info(text: &str) -> Paragraph<'static> {
    let lines: Vec<Line> = text.lines().map(|l| Line::from(l.to_string())).collect();
    Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(Block::default().title("Playing").borders(Borders::ALL))
}

pub fn status(text: &str) -> Paragraph<'static> {
    Paragraph::new(format!(" {}", text)).style(Style::default().fg(Color::Gray).bg(Color::Black))
}
