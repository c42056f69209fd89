use crate::Task;

/// Case-insensitive substring matcher for task fields.
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Normalize a query string into a matcher. Returns `None` for blank inputs.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            needle: trimmed.to_lowercase(),
        })
    }

    /// Determine whether the title or description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title)
            || task
                .description
                .as_deref()
                .is_some_and(|description| self.matches_field(description))
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Priority, Status, TaskId};
    use time::macros::{date, datetime};

    fn task(title: &str, description: Option<&str>) -> Task {
        Task {
            id: TaskId(1),
            title: title.to_owned(),
            description: description.map(str::to_owned),
            priority: Priority::Low,
            due_date: date!(2099 - 01 - 01),
            status: Status::Pending,
            created_at: datetime!(2025-06-01 09:00:00 UTC),
        }
    }

    #[test]
    fn matcher_skips_blank_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new("   ").is_none());
        assert!(TextMatcher::new("\n").is_none());
    }

    #[test]
    fn matcher_finds_text_in_title_or_description() {
        let t = task("Buy milk", Some("from the corner shop"));

        let matcher = TextMatcher::new("milk")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&t));

        let matcher = TextMatcher::new("corner")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&t));

        let matcher = TextMatcher::new("garage")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!matcher.matches(&t));
    }

    #[test]
    fn matcher_ignores_missing_descriptions() {
        let t = task("Buy milk", None);
        let matcher = TextMatcher::new("corner")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(!matcher.matches(&t));
    }

    #[test]
    fn matcher_respects_case_insensitive_search() {
        let t = task("Improve CLI", None);

        let matcher = TextMatcher::new("cli")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&t));

        let matcher = TextMatcher::new("CLI")
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"));
        assert!(matcher.matches(&t));
    }
}
