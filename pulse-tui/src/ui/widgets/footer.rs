use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

/// Bottom key-hint bar. `hints` pairs a key with its action label.
pub fn render_footer(frame: &mut Frame, area: Rect, theme: &dyn Theme, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.background())
                .bg(theme.foreground_dim())
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {label}"),
            Style::default().fg(theme.foreground_dim()),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
