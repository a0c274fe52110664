use crate::app::{App, InputMode, TILE_HEIGHT, TILE_WIDTH};
use crate::overlay::OverlayVariant;
use crate::screen::GalleryTile;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let vs = app.controller.view_state();

    // Layout: header(4) + genre input(3) + grid(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(TILE_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    // ── Header ──
    let title_line = match &vs.title {
        Some(title) if vs.has_error => Line::from(Span::styled(
            format!(" {title}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Some(title) => Line::from(Span::styled(
            format!(" {title}"),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        // Loading: the title slot stays empty.
        None => Line::from(""),
    };
    let back_hint = if vs.can_go_back {
        Span::styled(" ‹ Esc back ", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw("")
    };
    let count_line = Line::from(vec![
        back_hint,
        Span::styled(
            format!(" {} artworks", vs.tiles.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let header = Paragraph::new(vec![title_line, count_line]).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::from(Span::styled(
                " Gallery Explorer ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ))),
    );
    frame.render_widget(header, chunks[0]);

    // ── Genre input bar ──
    let input_style = match app.input_mode {
        InputMode::Editing => Style::default().fg(Color::Yellow),
        InputMode::Normal => Style::default().fg(Color::DarkGray),
    };
    let input_label = if app.input_mode == InputMode::Editing {
        " Genre (Enter to browse, Esc to cancel): "
    } else {
        " Genre (f): "
    };
    let input_bar = Paragraph::new(format!("{}{}", input_label, app.genre_input))
        .style(input_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_style)
                .title(" Browse by genre "),
        );
    frame.render_widget(input_bar, chunks[1]);

    if app.input_mode == InputMode::Editing {
        let cursor_x = chunks[1].x + input_label.len() as u16 + app.genre_input.len() as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y + 1));
    }

    // ── Tile grid ──
    let grid_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Artwork ");
    let grid_inner = grid_block.inner(chunks[2]);
    frame.render_widget(grid_block, chunks[2]);

    if vs.is_loading {
        frame.render_widget(centered_notice("Loading artwork..."), grid_inner);
    } else if vs.tiles.is_empty() {
        let notice = if vs.has_error {
            "Could not load this collection"
        } else {
            "Nothing on display here"
        };
        frame.render_widget(centered_notice(notice), grid_inner);
    } else {
        render_grid(app, &vs.tiles, frame, grid_inner);
    }

    // ── Status bar ──
    let status_line = Line::from(vec![
        Span::styled(
            " ←↑↓→",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Navigate  "),
        Span::styled(
            "Enter",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Detail  "),
        Span::styled(
            "f",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Genre  "),
        Span::styled(
            "p",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Profile  "),
        Span::styled(
            "?",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Help  "),
        Span::styled(
            "q",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[3]);
}

fn render_grid(app: &App, tiles: &[GalleryTile], frame: &mut Frame, area: Rect) {
    let cols = app.grid_cols.max(1);
    let first = app.row_offset * cols;

    for (slot, tile) in tiles.iter().enumerate().skip(first) {
        let row = slot / cols - app.row_offset;
        let col = slot % cols;
        let y = area.y + row as u16 * TILE_HEIGHT;
        if y + TILE_HEIGHT > area.y + area.height {
            break;
        }
        let x = area.x + col as u16 * TILE_WIDTH;
        if x + TILE_WIDTH > area.x + area.width {
            continue;
        }
        let rect = Rect::new(x, y, TILE_WIDTH, TILE_HEIGHT);
        render_tile(tile, slot == app.selected, frame, rect);
    }
}

fn render_tile(tile: &GalleryTile, selected: bool, frame: &mut Frame, area: Rect) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let inner_width = (area.width.saturating_sub(2)) as usize;
    let image_line = match &tile.thumbnail_url {
        Some(url) => Line::from(vec![
            Span::styled("▦ ", Style::default().fg(Color::Green)),
            Span::styled(
                truncate_str(url, inner_width.saturating_sub(2)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        None => Line::from(Span::styled(
            "▢ no image",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let overlay_line = match &tile.overlay {
        OverlayVariant::ProfileMatch => Line::from(Span::styled(
            "★ matches your profile",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )),
        OverlayVariant::Location(short) => Line::from(Span::styled(
            format!(" {short} "),
            Style::default().bg(Color::DarkGray).fg(Color::White),
        )),
        OverlayVariant::None => Line::from(""),
    };

    let body = vec![
        Line::from(Span::styled(
            truncate_str(&tile.title, inner_width),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        image_line,
        overlay_line,
    ];

    let widget = Paragraph::new(body).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(Line::from(Span::styled(
                format!(" {} ", tile.key),
                Style::default().fg(Color::DarkGray),
            ))),
    );
    frame.render_widget(widget, area);
}

fn centered_notice(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
}

/// Truncate a string to `max_width` display columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        width += w;
        result.push(ch);
    }
    result.push('…');
    result
}
