//! Domain types & validation logic for prodo tasks.

/// Task filtering.
pub mod filter;
/// Identifier types.
pub mod id;
/// Dashboard counters.
pub mod metrics;
/// Field enumerations.
pub mod state;
/// Text search.
pub mod text_matcher;

pub use filter::TaskFilter;
pub use id::TaskId;
pub use metrics::DashboardMetrics;
pub use state::{ParsePriorityError, ParseStatusError, Priority, Status};
pub use text_matcher::TextMatcher;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::{Date, OffsetDateTime};

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// A single to-do item as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Human-readable title.
    pub title: String,
    /// Optional free-form details.
    pub description: Option<String>,
    /// Urgency bucket.
    pub priority: Priority,
    /// Calendar date the task is due.
    #[serde(with = "calendar_date")]
    pub due_date: Date,
    /// Completion status.
    pub status: Status,
    /// Creation timestamp in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Task {
    /// Whether the due date has passed relative to `today`.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        self.due_date < today
    }
}

/// Validated create/edit input for the textual task fields.
///
/// Every create and detail-update path goes through a draft so the
/// title/description invariants hold regardless of the calling surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: Option<String>,
}

/// Error returned when create/edit input fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// Title was empty or whitespace-only.
    #[error("title must not be empty")]
    EmptyTitle,
}

impl TaskDraft {
    /// Validate raw user input. Trims the title and normalizes a blank
    /// description to `None`.
    ///
    /// # Errors
    /// Returns [`DraftError::EmptyTitle`] when the trimmed title is empty.
    pub fn new(title: &str, description: Option<&str>) -> Result<Self, DraftError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        let description = description.and_then(|raw| {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        });
        Ok(Self {
            title: title.to_owned(),
            description,
        })
    }

    /// The validated, trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The normalized description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
