use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::views::{centered_rect, render_input};
use crate::ui::widgets::Spinner;

pub struct LoginView;

impl LoginView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let card = centered_rect(area, 48, 14);

        let block = Block::default()
            .title(" Sign in to PulseAI ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(card);
        frame.render_widget(block, card);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        render_input(
            frame,
            chunks[1],
            theme,
            "Email",
            &app.login.email,
            app.login.focus == 0,
        );
        render_input(
            frame,
            chunks[2],
            theme,
            "Password",
            &app.login.password,
            app.login.focus == 1,
        );

        if app.login.busy {
            let busy = Paragraph::new(Line::from(vec![
                Span::styled(
                    Spinner::frame(app.animation_tick),
                    Style::default().fg(theme.accent()),
                ),
                Span::styled(" Signing in...", Style::default().fg(theme.foreground_dim())),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(busy, chunks[3]);
        } else if let Some(ref error) = app.login.error {
            let error = Paragraph::new(Span::styled(
                error.clone(),
                Style::default().fg(theme.error()).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(error, chunks[3]);
        }

        let hint = Paragraph::new(Span::styled(
            "No account yet? Press Ctrl+N to create one",
            Style::default().fg(theme.foreground_dim()),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[4]);
    }
}
