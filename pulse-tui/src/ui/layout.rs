use ratatui::{
    layout::{Constraint, Direction, Layout, Margin},
    style::Style,
    widgets::Block,
    Frame,
};

use crate::app::{App, View};
use crate::ui::views::{ChatView, DashboardView, HelpView, LoginView, SignupView};
use crate::ui::widgets::{render_footer, render_header, render_toasts};

pub fn render(frame: &mut Frame, app: &App) {
    let theme = app.current_theme();
    let size = frame.area();

    frame.render_widget(
        Block::default().style(
            Style::default()
                .bg(theme.background())
                .fg(theme.foreground()),
        ),
        size,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(size);

    let username = app.session.current_user().map(|u| u.username.as_str());
    render_header(frame, chunks[0], theme, app.view.name(), username);

    let content_area = chunks[1].inner(Margin::new(1, 0));
    match app.view {
        View::Login => LoginView::render(frame, content_area, app),
        View::Signup => SignupView::render(frame, content_area, app),
        View::Chat => ChatView::render(frame, content_area, app),
        View::Dashboard => DashboardView::render(frame, content_area, app),
        View::Help => HelpView::render(frame, content_area, app),
    }

    render_footer(frame, chunks[2], theme, footer_hints(app));

    if let Some(ref dialog) = app.dialog.dialog {
        dialog.render(frame, size, theme);
    }

    render_toasts(frame, size, &app.toasts, theme);
}

fn footer_hints(app: &App) -> &'static [(&'static str, &'static str)] {
    match app.view {
        View::Login => &[
            ("Tab", "next field"),
            ("Enter", "sign in"),
            ("^N", "create account"),
            ("^C", "quit"),
        ],
        View::Signup => &[
            ("Tab", "next field"),
            ("Enter", "sign up"),
            ("Esc", "back"),
            ("^C", "quit"),
        ],
        View::Chat => {
            if app.search.active {
                &[
                    ("↑↓", "results"),
                    ("Enter", "open"),
                    ("Esc", "close search"),
                ]
            } else {
                &[
                    ("Enter", "send"),
                    ("↑↓", "chats"),
                    ("^N", "new"),
                    ("^F", "search"),
                    ("^D", "delete"),
                    ("^P", "pin"),
                    ("^E", "archive"),
                    ("^B", "dashboard"),
                    ("F1", "help"),
                ]
            }
        }
        View::Dashboard => &[
            ("r", "refresh"),
            ("Esc", "chat"),
            ("^T", "theme"),
            ("F1", "help"),
        ],
        View::Help => &[("any key", "back")],
    }
}
