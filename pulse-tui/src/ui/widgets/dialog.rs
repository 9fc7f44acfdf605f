use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Confirm,
    Cancel,
}

impl DialogButton {
    pub fn other(&self) -> Self {
        match self {
            DialogButton::Confirm => DialogButton::Cancel,
            DialogButton::Cancel => DialogButton::Confirm,
        }
    }
}

/// Modal yes/no prompt. Destructive dialogs start on Cancel so a reflexive
/// Enter never deletes anything.
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    selected_button: DialogButton,
    confirm_label: String,
    is_destructive: bool,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            selected_button: DialogButton::Cancel,
            confirm_label: "Confirm".to_string(),
            is_destructive: false,
        }
    }

    pub fn danger(title: impl Into<String>, message: impl Into<String>) -> Self {
        let mut dialog = Self::new(title, message);
        dialog.is_destructive = true;
        dialog
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn toggle(&mut self) {
        self.selected_button = self.selected_button.other();
    }

    pub fn selected(&self) -> DialogButton {
        self.selected_button
    }

    pub fn is_confirm_selected(&self) -> bool {
        self.selected_button == DialogButton::Confirm
    }

    fn area(&self, screen: Rect) -> Rect {
        let width = 50u16.min(screen.width.saturating_sub(4));
        let height = 8u16.min(screen.height.saturating_sub(4));
        Rect::new(
            (screen.width.saturating_sub(width)) / 2,
            (screen.height.saturating_sub(height)) / 2,
            width,
            height,
        )
    }

    pub fn render(&self, frame: &mut Frame, screen: Rect, theme: &dyn Theme) {
        let area = self.area(screen);
        frame.render_widget(Clear, area);

        let border_color = if self.is_destructive {
            theme.error()
        } else {
            theme.accent()
        };

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(theme.surface()));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        let message = Paragraph::new(self.message.clone())
            .style(Style::default().fg(theme.foreground()))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let buttons = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let selected_style = |destructive: bool| {
            let bg = if destructive { theme.error() } else { theme.accent() };
            Style::default()
                .fg(theme.background())
                .bg(bg)
                .add_modifier(Modifier::BOLD)
        };

        let cancel_style = if self.selected_button == DialogButton::Cancel {
            selected_style(false)
        } else {
            Style::default().fg(theme.foreground_dim())
        };
        let confirm_style = if self.selected_button == DialogButton::Confirm {
            selected_style(self.is_destructive)
        } else if self.is_destructive {
            Style::default().fg(theme.error())
        } else {
            Style::default().fg(theme.accent())
        };

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(" Cancel ", cancel_style)))
                .alignment(Alignment::Center),
            buttons[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!(" {} ", self.confirm_label),
                confirm_style,
            )))
            .alignment(Alignment::Center),
            buttons[1],
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Default)]
pub struct DialogState {
    pub dialog: Option<ConfirmDialog>,
    result: DialogResult,
}

impl Default for DialogResult {
    fn default() -> Self {
        DialogResult::Pending
    }
}

impl DialogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, dialog: ConfirmDialog) {
        self.dialog = Some(dialog);
        self.result = DialogResult::Pending;
    }

    pub fn is_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn toggle_selection(&mut self) {
        if let Some(ref mut dialog) = self.dialog {
            dialog.toggle();
        }
    }

    pub fn cancel(&mut self) {
        if self.dialog.take().is_some() {
            self.result = DialogResult::Cancelled;
        }
    }

    /// Resolves the dialog with whichever button is selected.
    pub fn execute_selected(&mut self) {
        if let Some(dialog) = self.dialog.take() {
            self.result = match dialog.selected() {
                DialogButton::Confirm => DialogResult::Confirmed,
                DialogButton::Cancel => DialogResult::Cancelled,
            };
        }
    }

    pub fn take_result(&mut self) -> DialogResult {
        std::mem::replace(&mut self.result, DialogResult::Pending)
    }
}
