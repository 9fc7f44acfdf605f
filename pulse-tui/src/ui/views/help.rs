use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::views::centered_rect;

pub struct HelpView;

const BINDINGS: &[(&str, &str)] = &[
    ("Enter", "Send the composed message"),
    ("↑ / ↓", "Move between chats in the sidebar"),
    ("Ctrl+N", "Start a new chat"),
    ("Ctrl+F", "Search across all chats"),
    ("Ctrl+D", "Delete the selected chat"),
    ("Ctrl+P", "Pin or unpin the selected chat"),
    ("Ctrl+E", "Archive or unarchive the selected chat"),
    ("Ctrl+B", "Open the analytics dashboard"),
    ("Ctrl+T", "Cycle color theme"),
    ("Ctrl+L", "Sign out"),
    ("F1", "Show this help"),
    ("Ctrl+C", "Quit"),
];

impl HelpView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let card = centered_rect(area, 58, (BINDINGS.len() + 4) as u16);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let mut lines = vec![Line::from("")];
        for (key, action) in BINDINGS {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {key:<8}"),
                    Style::default()
                        .fg(theme.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(theme.foreground())),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
