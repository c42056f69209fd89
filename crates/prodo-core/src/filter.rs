use crate::state::{Priority, Status};
use crate::text_matcher::TextMatcher;
use crate::Task;

/// Client-side filter applied to the full task list on every view.
///
/// Each component is optional; `None` means "All". Components compose with
/// logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Normalized search text, matched against title or description.
    pub text: Option<String>,
    /// Exact priority to match.
    pub priority: Option<Priority>,
    /// Exact status to match.
    pub status: Option<Status>,
}

impl TaskFilter {
    /// Filter with every component cleared.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            text: None,
            priority: None,
            status: None,
        }
    }

    /// Set the search text; whitespace-only inputs clear the component.
    #[must_use]
    pub fn with_text(mut self, text: Option<String>) -> Self {
        self.text = text.and_then(|raw| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        });
        self
    }

    /// Whether no component is active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.priority.is_none() && self.status.is_none()
    }

    /// Whether the task passes every active component.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        match self.text.as_deref().and_then(TextMatcher::new) {
            Some(matcher) => matcher.matches(task),
            None => true,
        }
    }
}
