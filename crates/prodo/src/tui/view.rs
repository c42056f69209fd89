use std::time::{Duration, Instant};

use prodo_app::{EditSession, TaskStore};
use prodo_core::{Task, TaskId};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
};

use super::app::App;
use super::constants::UI_MESSAGE_TTL_SECS;
use super::form::TaskForm;

/// Overlay drawn on top of the main layout.
pub(super) enum Overlay {
    /// Browsing the task list.
    None,
    /// Add/edit form popup.
    Form(TaskForm),
    /// Delete confirmation popup.
    ConfirmDelete {
        /// Task to delete on confirmation.
        task: TaskId,
        /// Title shown in the prompt.
        title: String,
    },
    /// Search text entry popup.
    Search {
        /// Text typed so far.
        input: String,
    },
}

pub(super) struct Ui<S: TaskStore> {
    pub(super) app: App<S>,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
    pub(super) overlay: Overlay,
    /// Edit-mode state; at most one task is being edited.
    pub(super) edit_session: EditSession,
}

impl<S: TaskStore> Ui<S> {
    pub(super) const MAIN_MIN_HEIGHT: u16 = 5;
    pub(super) const DASHBOARD_HEIGHT: u16 = 5;
    pub(super) const INSTRUCTIONS_HEIGHT: u16 = 3;
    pub(super) const FILTER_HEIGHT: u16 = 3;
    pub(super) const STATUS_MESSAGE_MIN_HEIGHT: u16 = 3;
    pub(super) const STATUS_FOOTER_MIN_HEIGHT: u16 =
        Self::INSTRUCTIONS_HEIGHT + Self::FILTER_HEIGHT + Self::STATUS_MESSAGE_MIN_HEIGHT;

    pub(super) const fn new(app: App<S>) -> Self {
        Self {
            app,
            message: None,
            should_quit: false,
            overlay: Overlay::None,
            edit_session: EditSession::new(),
        }
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.app.selected_task()
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let size = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::DASHBOARD_HEIGHT),
                Constraint::Min(Self::MAIN_MIN_HEIGHT),
                Constraint::Length(Self::STATUS_FOOTER_MIN_HEIGHT),
            ])
            .split(size);

        self.draw_dashboard(f, chunks[0]);
        self.draw_main(f, chunks[1]);
        self.draw_status(f, chunks[2]);

        // Draw overlays on top if active
        match &self.overlay {
            Overlay::Form(form) => self.draw_form_popup(f, form),
            Overlay::ConfirmDelete { title, .. } => self.draw_confirm_popup(f, title),
            Overlay::Search { input } => self.draw_search_popup(f, input),
            Overlay::None => {}
        }
    }

    fn draw_main(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        self.draw_task_list(f, columns[0]);
        self.draw_task_details(f, columns[1]);
    }

    /// Reload from the store; failures become a status message and leave
    /// the prior view intact.
    pub(super) fn refresh(&mut self) {
        if let Err(err) = self.app.refresh() {
            self.error(format!("タスクの再読み込みに失敗しました: {err}"));
        }
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    pub(super) level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
