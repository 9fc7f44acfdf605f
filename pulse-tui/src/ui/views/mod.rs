mod chat;
mod dashboard;
mod help;
mod login;
mod signup;

pub use chat::ChatView;
pub use dashboard::DashboardView;
pub use help::HelpView;
pub use login::LoginView;
pub use signup::SignupView;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::data::InputField;
use crate::theme::Theme;

/// Renders one labelled form field; the focused field gets the accent
/// border and a block cursor.
pub(crate) fn render_input(
    frame: &mut Frame,
    area: Rect,
    theme: &dyn Theme,
    label: &str,
    field: &InputField,
    focused: bool,
) {
    let border_color = if focused {
        theme.accent()
    } else {
        theme.border()
    };

    let mut spans = vec![Span::styled(
        field.display(),
        Style::default().fg(theme.foreground()),
    )];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(theme.accent()).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(format!(" {label} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(input, area);
}

/// Centers a fixed-size box inside `area`.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
