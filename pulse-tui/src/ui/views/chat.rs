use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use pulse_core::{MatchKind, Message, MessageBody};

use crate::app::App;
use crate::data::LoadingState;
use crate::theme::Theme;
use crate::ui::views::centered_rect;
use crate::ui::widgets::Spinner;

pub struct ChatView;

impl ChatView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(30), Constraint::Min(40)])
            .split(area);

        Self::render_sidebar(frame, chunks[0], app);
        Self::render_conversation(frame, chunks[1], app);

        if app.search.active {
            Self::render_search_overlay(frame, area, app);
        }
    }

    fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let title = match app.chats_loading {
            LoadingState::Loading => format!(" Chats {} ", Spinner::frame(app.animation_tick)),
            _ => format!(" Chats ({}) ", app.chats.len()),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = app
            .visible_chats()
            .iter()
            .enumerate()
            .map(|(index, chat)| {
                let selected = index == app.selected;
                let active = app.active_chat == Some(chat.id);

                let marker = if chat.pinned {
                    "⚲ "
                } else if chat.is_archived {
                    "🗃 "
                } else {
                    "  "
                };

                let mut style = if chat.is_archived {
                    Style::default().fg(theme.foreground_dim())
                } else {
                    Style::default().fg(theme.foreground())
                };
                if active {
                    style = style.fg(theme.accent()).add_modifier(Modifier::BOLD);
                }
                if selected {
                    style = style.bg(theme.selection());
                }

                let width = inner.width.saturating_sub(4) as usize;
                let title: String = chat.display_title().chars().take(width).collect();

                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(theme.accent_secondary())),
                    Span::styled(title, style),
                ]))
            })
            .collect();

        if items.is_empty() {
            let empty = Paragraph::new("No chats yet.\nPress Ctrl+N to start one.")
                .style(Style::default().fg(theme.foreground_dim()))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(empty, inner);
        } else {
            frame.render_widget(List::new(items), inner);
        }
    }

    fn render_conversation(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        Self::render_transcript(frame, chunks[0], app);
        Self::render_composer(frame, chunks[1], app, theme);
    }

    fn render_transcript(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if app.active_chat.is_none() {
            let empty = Paragraph::new("Select a chat or press Ctrl+N to start a new one")
                .style(Style::default().fg(theme.foreground_dim()))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        if app.messages_loading == LoadingState::Loading {
            let loading = Paragraph::new(Line::from(vec![
                Span::styled(
                    Spinner::frame(app.animation_tick),
                    Style::default().fg(theme.accent()),
                ),
                Span::styled(" Loading messages...", Style::default().fg(theme.foreground_dim())),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(loading, inner);
            return;
        }

        let highlight_id = app.highlight.map(|(id, _)| id);
        let mut lines: Vec<Line> = Vec::new();
        for message in &app.messages {
            lines.extend(Self::message_lines(message, theme, highlight_id == Some(message.id)));
            lines.push(Line::from(""));
        }

        if app.typing_chat == app.active_chat && app.typing_chat.is_some() {
            lines.push(Line::from(vec![
                Span::styled(
                    Spinner::frame(app.animation_tick),
                    Style::default().fg(theme.accent_secondary()),
                ),
                Span::styled(
                    " PulseAI is thinking...",
                    Style::default()
                        .fg(theme.foreground_dim())
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        // Pin the view to the newest content
        let height = inner.height as usize;
        let scroll = lines.len().saturating_sub(height);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn message_lines(message: &Message, theme: &dyn Theme, highlighted: bool) -> Vec<Line<'static>> {
        let base = if highlighted {
            Style::default().bg(theme.selection())
        } else {
            Style::default()
        };

        let (name, name_color) = if message.is_user() {
            ("You", theme.accent())
        } else {
            ("PulseAI", theme.accent_secondary())
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(
                name,
                base.fg(name_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", message.created_at.format("%H:%M")),
                base.fg(theme.foreground_dim()),
            ),
        ])];

        match &message.body {
            MessageBody::Text(text) => {
                for raw in text.lines() {
                    lines.push(Line::from(Span::styled(
                        raw.to_string(),
                        base.fg(theme.foreground()),
                    )));
                }
            }
            MessageBody::Analysis(payload) => {
                if let Some(summary) = &payload.summary {
                    lines.push(Line::from(Span::styled(
                        summary.clone(),
                        base.fg(theme.foreground()),
                    )));
                }
                if let Some(sentiment) = &payload.sentiment {
                    let color = match sentiment.label.as_str() {
                        "POSITIVE" => theme.success(),
                        "NEGATIVE" => theme.error(),
                        _ => theme.warning(),
                    };
                    lines.push(Line::from(vec![
                        Span::styled("sentiment ", base.fg(theme.foreground_dim())),
                        Span::styled(
                            format!("{} ({:.0}%)", sentiment.label, sentiment.confidence * 100.0),
                            base.fg(color),
                        ),
                    ]));
                }
                if !payload.topics.is_empty() {
                    lines.push(Line::from(vec![
                        Span::styled("topics ", base.fg(theme.foreground_dim())),
                        Span::styled(payload.topics.join(", "), base.fg(theme.info())),
                    ]));
                }
                if let Some(feedback) = &payload.feedback {
                    lines.push(Line::from(vec![
                        Span::styled("feedback ", base.fg(theme.foreground_dim())),
                        Span::styled(feedback.clone(), base.fg(theme.foreground())),
                    ]));
                }
                if payload.risk_flagged() {
                    lines.push(Line::from(Span::styled(
                        "⚠ flagged as high risk",
                        base.fg(theme.error()).add_modifier(Modifier::BOLD),
                    )));
                }
            }
        }

        lines
    }

    fn render_composer(frame: &mut Frame, area: Rect, app: &App, theme: &dyn Theme) {
        let border_color = if app.composer.busy {
            theme.foreground_dim()
        } else {
            theme.accent()
        };

        let title = if app.composer.busy {
            " Waiting for reply... "
        } else {
            " Message (Enter to send) "
        };

        let input = Paragraph::new(Line::from(vec![
            Span::styled(
                app.composer.input.value.clone(),
                Style::default().fg(theme.foreground()),
            ),
            Span::styled("█", Style::default().fg(border_color)),
        ]))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(input, area);
    }

    fn render_search_overlay(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();
        let overlay = centered_rect(area, 64, 18);
        frame.render_widget(Clear, overlay);

        let pending = if app.search.pending_fetches > 0 {
            format!(" {} ", Spinner::frame(app.animation_tick))
        } else {
            String::new()
        };
        let block = Block::default()
            .title(format!(" Search all chats{pending}"))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent()))
            .style(Style::default().bg(theme.surface()));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(3)])
            .split(inner);

        let query = Paragraph::new(Line::from(vec![
            Span::styled("/ ", Style::default().fg(theme.accent())),
            Span::styled(
                app.search.query.clone(),
                Style::default().fg(theme.foreground()),
            ),
            Span::styled("█", Style::default().fg(theme.accent())),
        ]));
        frame.render_widget(query, chunks[0]);

        if app.search.results.is_empty() {
            let hint = if app.search.query.trim().is_empty() {
                "Type to search chat titles and messages"
            } else if app.search.pending_fetches > 0 {
                "Searching..."
            } else {
                "No matches"
            };
            let empty = Paragraph::new(hint)
                .style(Style::default().fg(theme.foreground_dim()))
                .alignment(Alignment::Center);
            frame.render_widget(empty, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = app
            .search
            .results
            .iter()
            .enumerate()
            .map(|(index, hit)| {
                let selected = index == app.search.selected;
                let style = if selected {
                    Style::default()
                        .fg(theme.accent())
                        .bg(theme.selection())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground())
                };

                let kind = match hit.kind {
                    MatchKind::Title => "title",
                    MatchKind::Message => "message",
                };
                let snippet = hit
                    .message
                    .as_ref()
                    .map(|m| m.body.preview().to_string())
                    .unwrap_or_default();

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<20} ", hit.chat_title), style),
                    Span::styled(
                        format!("[{kind}] "),
                        Style::default().fg(theme.accent_secondary()),
                    ),
                    Span::styled(snippet, Style::default().fg(theme.foreground_dim())),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), chunks[1]);
    }
}
