use crate::state::Status;
use crate::Task;

/// Aggregate counters for the dashboard header.
///
/// Always measured over the unfiltered full list, never the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardMetrics {
    /// Number of tasks in the store.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of pending tasks.
    pub pending: usize,
}

impl DashboardMetrics {
    /// Count totals over the given task list.
    #[must_use]
    pub fn measure(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.status == Status::Completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }

    /// Completion rate in percent; `0.0` when there are no tasks.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Priority, TaskId};
    use time::macros::{date, datetime};

    fn task(id: i64, status: Status) -> Task {
        Task {
            id: TaskId(id),
            title: format!("task {id}"),
            description: None,
            priority: Priority::Medium,
            due_date: date!(2099 - 01 - 01),
            status,
            created_at: datetime!(2025-06-01 09:00:00 UTC),
        }
    }

    #[test]
    fn empty_list_yields_zero_rate() {
        let metrics = DashboardMetrics::measure(&[]);
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.completed, 0);
        assert_eq!(metrics.pending, 0);
        assert!((metrics.completion_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_of_two_completed_is_fifty_percent() {
        let tasks = vec![task(1, Status::Completed), task(2, Status::Pending)];
        let metrics = DashboardMetrics::measure(&tasks);
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.completed, 1);
        assert_eq!(metrics.pending, 1);
        assert!((metrics.completion_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_track_the_status_column_only() {
        let tasks = vec![
            task(1, Status::Pending),
            task(2, Status::Pending),
            task(3, Status::Completed),
        ];
        let metrics = DashboardMetrics::measure(&tasks);
        assert_eq!(metrics.pending, 2);
        assert_eq!(metrics.completed, 1);
    }
}
