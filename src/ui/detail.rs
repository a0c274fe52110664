use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let detail = match &app.detail {
        Some(d) => d,
        None => return,
    };

    // Layout: card(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    let on_display = if detail.gallery_name.is_empty() {
        "Not currently on display".to_string()
    } else if detail.gallery_short.is_empty() {
        detail.gallery_name.clone()
    } else {
        format!("{}, {}", detail.gallery_name, detail.gallery_short)
    };

    let acquired = detail
        .acquired_at
        .map(|d| d.format("%B %e, %Y").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                &detail.title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Artist: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&detail.artist, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" Genre: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&detail.genre, Style::default().fg(Color::Cyan)),
            Span::raw("   "),
            Span::styled("Medium: ", Style::default().fg(Color::DarkGray)),
            Span::styled(&detail.medium, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" On display: ", Style::default().fg(Color::DarkGray)),
            Span::styled(on_display, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled(" Acquired: ", Style::default().fg(Color::DarkGray)),
            Span::styled(acquired, Style::default().fg(Color::White)),
        ]),
    ];
    if let Some(url) = &detail.thumbnail_url {
        lines.push(Line::from(vec![
            Span::styled(" Image: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                url.as_str(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }

    let card = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Artwork art{} ", detail.id)),
    );
    frame.render_widget(card, chunks[0]);

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " v",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Visit gallery  "),
        Span::styled(
            "Esc",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Back  "),
        Span::styled(
            "q",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit"),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[1]);
}
