use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::LoadingState;
use crate::theme::Theme;
use crate::ui::widgets::Spinner;

pub struct DashboardView;

impl DashboardView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = app.current_theme();

        if app.dashboard_loading == LoadingState::Loading {
            let loading = Paragraph::new(Line::from(vec![
                Span::styled(
                    Spinner::frame(app.animation_tick),
                    Style::default().fg(theme.accent()),
                ),
                Span::styled(
                    " Loading dashboard...",
                    Style::default().fg(theme.foreground_dim()),
                ),
            ]))
            .alignment(Alignment::Center);
            frame.render_widget(loading, area);
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(8),
            ])
            .split(area);

        Self::render_stat_cards(frame, rows[0], app, theme);
        Self::render_trend_chart(frame, rows[1], app, theme);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[2]);
        Self::render_risk_distribution(frame, bottom[0], app, theme);
        Self::render_topics(frame, bottom[1], app, theme);
    }

    fn render_stat_cards(frame: &mut Frame, area: Rect, app: &App, theme: &dyn Theme) {
        let stats = &app.dashboard.stats;
        let cards: [(&str, String, ratatui::style::Color); 4] = [
            ("Total Analyses", stats.total_analyses.to_string(), theme.accent()),
            (
                "Avg Sentiment",
                format!("{:.1}%", stats.avg_sentiment),
                theme.success(),
            ),
            ("Risk Alerts", stats.risk_alerts.to_string(), theme.error()),
            ("Topics", stats.topics_analyzed.to_string(), theme.info()),
        ];

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(area);

        for (chunk, (label, value, color)) in chunks.iter().zip(cards) {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border()));
            let inner = block.inner(*chunk);
            frame.render_widget(block, *chunk);

            let lines = vec![
                Line::from(Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    label,
                    Style::default().fg(theme.foreground_dim()),
                )),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                inner,
            );
        }
    }

    fn render_trend_chart(frame: &mut Frame, area: Rect, app: &App, theme: &dyn Theme) {
        let trends = &app.dashboard.trends;

        let block = Block::default()
            .title(" Sentiment Trend ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()));

        if trends.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let empty = Paragraph::new("No analyses yet")
                .style(Style::default().fg(theme.foreground_dim()))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let points: Vec<(f64, f64)> = trends
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.score))
            .collect();

        let max_x = (points.len().saturating_sub(1)).max(1) as f64;
        let x_labels: Vec<Span> = trends
            .iter()
            .map(|p| Span::styled(p.label.clone(), Style::default().fg(theme.foreground_dim())))
            .collect();

        let dataset = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(ratatui::widgets::GraphType::Line)
            .style(Style::default().fg(theme.accent()))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .bounds([0.0, max_x])
                    .labels(x_labels)
                    .style(Style::default().fg(theme.border())),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, 100.0])
                    .labels(vec![
                        Span::styled("0", Style::default().fg(theme.foreground_dim())),
                        Span::styled("50", Style::default().fg(theme.foreground_dim())),
                        Span::styled("100", Style::default().fg(theme.foreground_dim())),
                    ])
                    .style(Style::default().fg(theme.border())),
            );
        frame.render_widget(chart, area);
    }

    fn render_risk_distribution(frame: &mut Frame, area: Rect, app: &App, theme: &dyn Theme) {
        let risk = &app.dashboard.risk;
        let total = risk.total().max(1) as f64;

        let block = Block::default()
            .title(" Risk Distribution ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2); 3])
            .split(inner);

        let rows = [
            ("Low", risk.low, theme.success()),
            ("Medium", risk.medium, theme.warning()),
            ("High", risk.high, theme.error()),
        ];
        for (chunk, (label, count, color)) in chunks.iter().zip(rows) {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(color).bg(theme.surface()))
                .ratio((count as f64 / total).clamp(0.0, 1.0))
                .label(format!("{label}: {count}"));
            frame.render_widget(gauge, *chunk);
        }
    }

    fn render_topics(frame: &mut Frame, area: Rect, app: &App, theme: &dyn Theme) {
        let block = Block::default()
            .title(" Top Topics ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border()));

        let bars: Vec<Bar> = app
            .dashboard
            .topics
            .iter()
            .take(8)
            .map(|t| {
                Bar::default()
                    .label(Line::from(t.topic.clone()))
                    .value(t.count)
                    .style(Style::default().fg(theme.accent_secondary()))
            })
            .collect();

        if bars.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let empty = Paragraph::new("No topics yet")
                .style(Style::default().fg(theme.foreground_dim()))
                .alignment(Alignment::Center);
            frame.render_widget(empty, inner);
            return;
        }

        let chart = BarChart::default()
            .block(block)
            .bar_width(7)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }
}
