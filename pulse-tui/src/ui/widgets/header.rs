use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// Top bar: product mark on the left, view name in the middle, the signed-in
/// user on the right.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    theme: &dyn Theme,
    view_name: &str,
    username: Option<&str>,
) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(24),
        ])
        .split(inner);

    let mark = Paragraph::new(Line::from(vec![
        Span::styled(
            "● ",
            Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "PulseAI",
            Style::default()
                .fg(theme.foreground())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(mark, chunks[0]);

    let view = Paragraph::new(Span::styled(
        view_name,
        Style::default().fg(theme.accent_secondary()),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(view, chunks[1]);

    let user = Paragraph::new(Span::styled(
        username.unwrap_or(""),
        Style::default().fg(theme.foreground_dim()),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(user, chunks[2]);
}
