use anyhow::Result;
use prodo_app::{TaskService, TaskStore};
use prodo_core::{DashboardMetrics, Task, TaskFilter, TaskId};

/// Application state shared between the TUI event loop and rendering.
///
/// `tasks` is always the full store read; `visible` indexes the subset that
/// passes the current filter. Every mutation path calls [`App::refresh`],
/// so the view is recomputed from a fresh full-table read each time.
pub(super) struct App<S: TaskStore> {
    service: TaskService<S>,
    /// Full task list straight from the store, due-date order.
    pub(super) tasks: Vec<Task>,
    /// Indices into `tasks` passing the filter.
    visible: Vec<usize>,
    /// Current selection (index into `visible`).
    pub(super) selected: usize,
    filter: TaskFilter,
    metrics: DashboardMetrics,
}

impl<S: TaskStore> App<S> {
    /// Create an application instance and eagerly load tasks.
    pub(super) fn new(service: TaskService<S>) -> Result<Self> {
        let mut app = Self {
            service,
            tasks: Vec::new(),
            visible: Vec::new(),
            selected: 0,
            filter: TaskFilter::all(),
            metrics: DashboardMetrics::default(),
        };
        app.refresh()?;
        Ok(app)
    }

    pub(super) const fn service(&self) -> &TaskService<S> {
        &self.service
    }

    pub(super) const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub(super) const fn metrics(&self) -> DashboardMetrics {
        self.metrics
    }

    /// Reload tasks from the store, recompute metrics, and keep the
    /// selection on the same task where possible.
    pub(super) fn refresh(&mut self) -> Result<()> {
        let keep_id = self.selected_task_id();
        self.tasks = self.service.list_tasks()?;
        self.metrics = DashboardMetrics::measure(&self.tasks);
        self.rebuild_visibility(keep_id);
        Ok(())
    }

    pub(super) fn set_filter(&mut self, filter: TaskFilter) {
        if self.filter == filter {
            return;
        }
        let keep_id = self.selected_task_id();
        self.filter = filter;
        self.rebuild_visibility(keep_id);
    }

    fn rebuild_visibility(&mut self, keep_id: Option<TaskId>) {
        let filter = &self.filter;
        self.visible = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| filter.matches(task))
            .map(|(index, _)| index)
            .collect();
        self.selected = keep_id
            .and_then(|id| {
                self.visible
                    .iter()
                    .position(|&index| self.tasks[index].id == id)
            })
            .unwrap_or_else(|| self.selected.min(self.visible.len().saturating_sub(1)));
    }

    pub(super) const fn has_visible_tasks(&self) -> bool {
        !self.visible.is_empty()
    }

    pub(super) fn visible_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        self.visible.iter().filter_map(|&index| self.tasks.get(index))
    }

    pub(super) fn selected_task(&self) -> Option<&Task> {
        self.visible
            .get(self.selected)
            .and_then(|&index| self.tasks.get(index))
    }

    pub(super) fn selected_task_id(&self) -> Option<TaskId> {
        self.selected_task().map(|task| task.id)
    }

    pub(super) const fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub(super) fn select_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }
}
