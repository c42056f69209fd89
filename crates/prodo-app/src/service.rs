//! Shared task mutation/read service used by CLI and TUI surfaces.

use anyhow::{Error, Result};
use prodo_core::{DashboardMetrics, Priority, Status, Task, TaskDraft, TaskFilter, TaskId};
use prodo_store_sqlite::SqliteStore;
use time::Date;

/// Minimal storage abstraction required by [`TaskService`].
pub trait TaskStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error>;

    /// Insert a new task with status Pending, returning its id.
    ///
    /// # Errors
    /// Returns a store-specific error when persisting the task fails.
    fn add(&self, draft: &TaskDraft, priority: Priority, due_date: Date)
    -> Result<TaskId, Self::Error>;

    /// Read the full table ordered by due date ascending.
    ///
    /// # Errors
    /// Returns a store-specific error when the read fails.
    fn list_all(&self) -> Result<Vec<Task>, Self::Error>;

    /// Read a single task by id.
    ///
    /// # Errors
    /// Returns a store-specific error when the read fails.
    fn get(&self, id: TaskId) -> Result<Option<Task>, Self::Error>;

    /// Overwrite the status of the given task.
    ///
    /// # Errors
    /// Returns a store-specific error when no such task exists or the write
    /// fails.
    fn update_status(&self, id: TaskId, status: Status) -> Result<(), Self::Error>;

    /// Overwrite every editable field, leaving status/id/created_at alone.
    ///
    /// # Errors
    /// Returns a store-specific error when no such task exists or the write
    /// fails.
    fn update_details(
        &self,
        id: TaskId,
        draft: &TaskDraft,
        priority: Priority,
        due_date: Date,
    ) -> Result<(), Self::Error>;

    /// Remove the task permanently.
    ///
    /// # Errors
    /// Returns a store-specific error when no such task exists or the write
    /// fails.
    fn delete(&self, id: TaskId) -> Result<(), Self::Error>;
}

impl TaskStore for SqliteStore {
    type Error = prodo_store_sqlite::SqliteStoreError;

    fn add(&self, draft: &TaskDraft, priority: Priority, due_date: Date) -> Result<TaskId, Self::Error> {
        Self::add(self, draft, priority, due_date)
    }

    fn list_all(&self) -> Result<Vec<Task>, Self::Error> {
        Self::list_all(self)
    }

    fn get(&self, id: TaskId) -> Result<Option<Task>, Self::Error> {
        Self::get(self, id)
    }

    fn update_status(&self, id: TaskId, status: Status) -> Result<(), Self::Error> {
        Self::update_status(self, id, status)
    }

    fn update_details(
        &self,
        id: TaskId,
        draft: &TaskDraft,
        priority: Priority,
        due_date: Date,
    ) -> Result<(), Self::Error> {
        Self::update_details(self, id, draft, priority, due_date)
    }

    fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
        Self::delete(self, id)
    }
}

/// Raw create input; the service validates it into a draft.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Title as typed by the user.
    pub title: String,
    /// Description as typed by the user.
    pub description: Option<String>,
    /// Urgency bucket.
    pub priority: Priority,
    /// Due date.
    pub due_date: Date,
}

/// Raw edit input; overwrites every editable field of one task.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    /// Title as typed by the user.
    pub title: String,
    /// Description as typed by the user.
    pub description: Option<String>,
    /// Urgency bucket.
    pub priority: Priority,
    /// Due date.
    pub due_date: Date,
}

/// Service façade that encapsulates all task reads and mutations.
///
/// Every mutation is followed by the caller re-reading the full list; the
/// service never caches.
pub struct TaskService<S> {
    store: S,
}

impl<S> TaskService<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: TaskStore> TaskService<S> {
    /// Validate and insert a new task.
    ///
    /// # Errors
    /// Returns an error when the title is blank or the store write fails.
    pub fn add_task(&self, input: NewTask) -> Result<TaskId> {
        let draft = TaskDraft::new(&input.title, input.description.as_deref())?;
        self.store
            .add(&draft, input.priority, input.due_date)
            .map_err(Into::into)
    }

    /// Read the full ordered task list.
    ///
    /// # Errors
    /// Returns an error when the store read fails.
    pub fn list_tasks(&self) -> Result<Vec<Task>> {
        self.store.list_all().map_err(Into::into)
    }

    /// Read the full list, then apply the filter client-side.
    ///
    /// # Errors
    /// Returns an error when the store read fails.
    pub fn filtered(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let tasks = self.list_tasks()?;
        if filter.is_empty() {
            return Ok(tasks);
        }
        Ok(tasks.into_iter().filter(|task| filter.matches(task)).collect())
    }

    /// Dashboard counters over the unfiltered list.
    ///
    /// # Errors
    /// Returns an error when the store read fails.
    pub fn metrics(&self) -> Result<DashboardMetrics> {
        Ok(DashboardMetrics::measure(&self.list_tasks()?))
    }

    /// Read a single task by id.
    ///
    /// # Errors
    /// Returns an error when the store read fails.
    pub fn get(&self, id: TaskId) -> Result<Option<Task>> {
        self.store.get(id).map_err(Into::into)
    }

    /// Overwrite the status of one task.
    ///
    /// # Errors
    /// Returns an error when the task is absent or the write fails.
    pub fn set_status(&self, id: TaskId, status: Status) -> Result<()> {
        self.store.update_status(id, status).map_err(Into::into)
    }

    /// Validate and apply a full detail edit.
    ///
    /// # Errors
    /// Returns an error when the title is blank, the task is absent, or the
    /// write fails.
    pub fn update_details(&self, id: TaskId, input: TaskEdit) -> Result<()> {
        let draft = TaskDraft::new(&input.title, input.description.as_deref())?;
        self.store
            .update_details(id, &draft, input.priority, input.due_date)
            .map_err(Into::into)
    }

    /// Remove one task permanently.
    ///
    /// # Errors
    /// Returns an error when the task is absent or the write fails.
    pub fn delete(&self, id: TaskId) -> Result<()> {
        self.store.delete(id).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use thiserror::Error;
    use time::OffsetDateTime;
    use time::macros::date;

    #[derive(Debug, Error)]
    enum MockError {
        #[error("task not found: {0}")]
        NotFound(TaskId),
    }

    /// In-memory store mimicking the SQLite ordering contract.
    #[derive(Default)]
    struct MockStore {
        tasks: RefCell<Vec<Task>>,
        next_id: RefCell<i64>,
    }

    impl MockStore {
        fn sorted(&self) -> Vec<Task> {
            let mut tasks = self.tasks.borrow().clone();
            tasks.sort_by_key(|t| (t.due_date, t.id));
            tasks
        }
    }

    impl TaskStore for MockStore {
        type Error = MockError;

        fn add(
            &self,
            draft: &TaskDraft,
            priority: Priority,
            due_date: Date,
        ) -> Result<TaskId, Self::Error> {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            let id = TaskId(*next);
            self.tasks.borrow_mut().push(Task {
                id,
                title: draft.title().to_owned(),
                description: draft.description().map(str::to_owned),
                priority,
                due_date,
                status: Status::Pending,
                created_at: OffsetDateTime::UNIX_EPOCH,
            });
            Ok(id)
        }

        fn list_all(&self) -> Result<Vec<Task>, Self::Error> {
            Ok(self.sorted())
        }

        fn get(&self, id: TaskId) -> Result<Option<Task>, Self::Error> {
            Ok(self.tasks.borrow().iter().find(|t| t.id == id).cloned())
        }

        fn update_status(&self, id: TaskId, status: Status) -> Result<(), Self::Error> {
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks.iter_mut().find(|t| t.id == id).ok_or(MockError::NotFound(id))?;
            task.status = status;
            Ok(())
        }

        fn update_details(
            &self,
            id: TaskId,
            draft: &TaskDraft,
            priority: Priority,
            due_date: Date,
        ) -> Result<(), Self::Error> {
            let mut tasks = self.tasks.borrow_mut();
            let task = tasks.iter_mut().find(|t| t.id == id).ok_or(MockError::NotFound(id))?;
            task.title = draft.title().to_owned();
            task.description = draft.description().map(str::to_owned);
            task.priority = priority;
            task.due_date = due_date;
            Ok(())
        }

        fn delete(&self, id: TaskId) -> Result<(), Self::Error> {
            let mut tasks = self.tasks.borrow_mut();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(MockError::NotFound(id));
            }
            Ok(())
        }
    }

    fn service() -> TaskService<MockStore> {
        TaskService::new(MockStore::default())
    }

    fn new_task(title: &str, priority: Priority) -> NewTask {
        NewTask {
            title: title.to_owned(),
            description: None,
            priority,
            due_date: date!(2099 - 01 - 01),
        }
    }

    #[test]
    fn add_task_rejects_blank_titles_before_touching_the_store() {
        let service = service();
        let result = service.add_task(new_task("   ", Priority::Low));
        assert!(result.is_err());
        let listed = service.list_tasks().unwrap_or_else(|err| panic!("list: {err}"));
        assert!(listed.is_empty());
    }

    #[test]
    fn filtered_composes_components_over_the_full_read() {
        let service = service();
        for (title, priority) in [
            ("Ship release", Priority::High),
            ("Write notes", Priority::Medium),
            ("Clean desk", Priority::Low),
        ] {
            service
                .add_task(new_task(title, priority))
                .unwrap_or_else(|err| panic!("add: {err}"));
        }

        let filter = TaskFilter {
            priority: Some(Priority::High),
            ..TaskFilter::all()
        };
        let high = service.filtered(&filter).unwrap_or_else(|err| panic!("filtered: {err}"));
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].title, "Ship release");

        let filter = filter.with_text(Some("notes".to_owned()));
        let none = service.filtered(&filter).unwrap_or_else(|err| panic!("filtered: {err}"));
        assert!(none.is_empty());
    }

    #[test]
    fn metrics_use_the_unfiltered_list() {
        let service = service();
        let first = service
            .add_task(new_task("one", Priority::Low))
            .unwrap_or_else(|err| panic!("add: {err}"));
        service
            .add_task(new_task("two", Priority::Low))
            .unwrap_or_else(|err| panic!("add: {err}"));
        service
            .set_status(first, Status::Completed)
            .unwrap_or_else(|err| panic!("set_status: {err}"));

        let metrics = service.metrics().unwrap_or_else(|err| panic!("metrics: {err}"));
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.completed, 1);
        assert!((metrics.completion_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_details_validates_the_new_title() {
        let service = service();
        let id = service
            .add_task(new_task("Buy milk", Priority::Low))
            .unwrap_or_else(|err| panic!("add: {err}"));

        let result = service.update_details(
            id,
            TaskEdit {
                title: "  ".to_owned(),
                description: None,
                priority: Priority::High,
                due_date: date!(2099 - 02 - 02),
            },
        );
        assert!(result.is_err());

        let unchanged = service
            .get(id)
            .unwrap_or_else(|err| panic!("get: {err}"))
            .map_or_else(|| panic!("task must exist"), |t| t);
        assert_eq!(unchanged.title, "Buy milk");
    }
}
