use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Global",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    ?         ", Style::default().fg(Color::Yellow)),
            Span::raw("Toggle this help"),
        ]),
        Line::from(vec![
            Span::styled("    q         ", Style::default().fg(Color::Yellow)),
            Span::raw("Quit application"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Gallery View",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    ←↑↓→ hjkl ", Style::default().fg(Color::Yellow)),
            Span::raw("Move between tiles"),
        ]),
        Line::from(vec![
            Span::styled("    Enter     ", Style::default().fg(Color::Yellow)),
            Span::raw("Open artwork detail"),
        ]),
        Line::from(vec![
            Span::styled("    f         ", Style::default().fg(Color::Yellow)),
            Span::raw("Browse a genre (type its name)"),
        ]),
        Line::from(vec![
            Span::styled("    p         ", Style::default().fg(Color::Yellow)),
            Span::raw("Your profile recommendations"),
        ]),
        Line::from(vec![
            Span::styled("    PgUp/PgDn ", Style::default().fg(Color::Yellow)),
            Span::raw("Jump a page of tiles"),
        ]),
        Line::from(vec![
            Span::styled("    Esc       ", Style::default().fg(Color::Yellow)),
            Span::raw("Back to the previous screen (genre views)"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Detail View",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    v         ", Style::default().fg(Color::Yellow)),
            Span::raw("Visit the gallery this artwork hangs in"),
        ]),
        Line::from(vec![
            Span::styled("    Esc       ", Style::default().fg(Color::Yellow)),
            Span::raw("Back to the grid"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "  Badges",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![
            Span::styled("    ★         ", Style::default().fg(Color::LightRed)),
            Span::raw("Matches your profile (profile view)"),
        ]),
        Line::from(vec![
            Span::styled("    Room n    ", Style::default().fg(Color::Yellow)),
            Span::raw("Where the artwork hangs (gallery/genre views)"),
        ]),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help — Keybindings ")
            .title_bottom(
                Line::from(" Press ? or Esc to close ")
                    .style(Style::default().fg(Color::DarkGray)),
            ),
    );

    frame.render_widget(help, area);
}

/// Create a centered rectangle using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
