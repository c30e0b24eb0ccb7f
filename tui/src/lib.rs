//! TUI rendering for Tally using ratatui.

mod input;
mod theme;

pub use input::{dispatch, handle_events, map_key};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use tally_core::App;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Score readout
            Constraint::Length(3), // Controls
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title(frame, chunks[0], &palette);
    draw_score(frame, app, chunks[1], &palette, &glyphs);
    draw_controls(frame, app, chunks[2], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[3], &palette);
}

fn draw_title(frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = Line::from(vec![
        Span::styled(
            "Tally",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" - score keeper", Style::default().fg(palette.text_muted)),
    ]);
    let paragraph = Paragraph::new(title).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .style(Style::default().bg(palette.bg_panel)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_score(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let board = app.board();
    let celebrating = board.is_celebrating();

    let mut lines: Vec<Line> = Vec::new();
    let content_height: u16 = if celebrating { 3 } else { 1 };
    let inner_height = area.height.saturating_sub(2);
    for _ in 0..inner_height.saturating_sub(content_height) / 2 {
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        board.display(),
        styles::score(palette, celebrating),
    )));
    if celebrating {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{glyph} MAXIMUM SCORE {glyph}",
                glyph = glyphs.celebration
            ),
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Score ")
            .title_style(Style::default().fg(palette.text_muted))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_controls(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let decrement_enabled = app.board().decrement_enabled();
    let separator = Span::styled(
        format!("  {}  ", glyphs.bullet),
        Style::default().fg(palette.bg_border),
    );

    let line = Line::from(vec![
        Span::styled("+", styles::key_hint(palette)),
        Span::styled(" add", Style::default().fg(palette.text_primary)),
        separator.clone(),
        Span::styled("-", styles::key_hint(palette)),
        Span::styled(" steal", styles::control(palette, decrement_enabled)),
        separator.clone(),
        Span::styled("r", styles::key_hint(palette)),
        Span::styled(" reset", Style::default().fg(palette.text_primary)),
        separator,
        Span::styled("q", styles::key_hint(palette)),
        Span::styled(" quit", Style::default().fg(palette.text_primary)),
    ]);

    let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.bg_border))
            .style(Style::default().bg(palette.bg_panel)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let line = match app.status() {
        Some(status) => Line::from(Span::styled(
            status.to_owned(),
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "score is saved automatically",
            Style::default().fg(palette.text_muted),
        )),
    };
    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
