use prodo_core::{Priority, Status, TaskFilter};
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Error type returned while constructing task filters from user-facing inputs.
#[derive(Debug, Error)]
pub enum FilterBuildError {
    /// Priority token was not "all" or a known priority.
    #[error("invalid priority token: {token}")]
    InvalidPriority {
        /// Offending input.
        token: String,
    },
    /// Status token was not "all" or a known status.
    #[error("invalid status token: {token}")]
    InvalidStatus {
        /// Offending input.
        token: String,
    },
}

/// Result alias for filter construction helpers.
pub type FilterBuildResult<T> = Result<T, FilterBuildError>;

const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Convert a user-facing priority token into a filter component.
/// "All" (any case) and blank inputs clear the component.
///
/// # Errors
/// Returns an error when the token is neither "all" nor a known priority.
pub fn parse_priority_token(token: &str) -> FilterBuildResult<Option<Priority>> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| FilterBuildError::InvalidPriority {
            token: token.to_owned(),
        })
}

/// Convert a user-facing status token into a filter component.
/// "All" (any case) and blank inputs clear the component.
///
/// # Errors
/// Returns an error when the token is neither "all" nor a known status.
pub fn parse_status_token(token: &str) -> FilterBuildResult<Option<Status>> {
    let trimmed = token.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| FilterBuildError::InvalidStatus {
            token: token.to_owned(),
        })
}

/// Build a [`TaskFilter`] from user-facing inputs.
///
/// # Errors
/// Returns an error when a priority or status token cannot be mapped.
pub fn build_filter(
    text: Option<String>,
    priority: Option<&str>,
    status: Option<&str>,
) -> FilterBuildResult<TaskFilter> {
    let priority = match priority {
        Some(token) => parse_priority_token(token)?,
        None => None,
    };
    let status = match status {
        Some(token) => parse_status_token(token)?,
        None => None,
    };
    Ok(TaskFilter {
        text: None,
        priority,
        status,
    }
    .with_text(text))
}

/// Parse a user-supplied `YYYY-MM-DD` due date.
///
/// # Errors
/// Returns an error if the string does not conform to the calendar format.
pub fn parse_due_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s.trim(), DUE_DATE_FORMAT)
}

impl FilterBuildError {
    /// Convert the error into a message that is friendly for end-users.
    #[must_use]
    pub fn describe_user_facing(&self) -> String {
        match self {
            Self::InvalidPriority { token } => {
                format!("優先度の指定が不正です: {token} (High/Medium/Low/All)")
            }
            Self::InvalidStatus { token } => {
                format!("ステータスの指定が不正です: {token} (Pending/Completed/All)")
            }
        }
    }
}
