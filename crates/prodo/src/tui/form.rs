use prodo_app::parse_due_date;
use prodo_core::{Priority, Task, TaskId};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormFocus {
    Title,
    Description,
    DueDate,
    Priority,
}

/// Whether the form creates a task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormMode {
    Create,
    Edit(TaskId),
}

/// In-app form state for the add/edit popup.
///
/// The cursor always sits at the end of each field; backspace removes the
/// last grapheme so multi-byte input degrades gracefully.
pub(super) struct TaskForm {
    pub(super) mode: FormMode,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) due_date: String,
    pub(super) priority: Priority,
    pub(super) focus: FormFocus,
}

/// Validated form output, ready for the service.
pub(super) struct FormOutput {
    pub(super) title: String,
    pub(super) description: Option<String>,
    pub(super) priority: Priority,
    pub(super) due_date: Date,
}

impl TaskForm {
    /// Empty form for a new task; the due date prefills to today, matching
    /// the original add form.
    pub(super) fn create(today: Date) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            due_date: today.to_string(),
            priority: Priority::Medium,
            focus: FormFocus::Title,
        }
    }

    /// Form prefilled from an existing task.
    pub(super) fn edit(task: &Task) -> Self {
        Self {
            mode: FormMode::Edit(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.to_string(),
            priority: task.priority,
            focus: FormFocus::Title,
        }
    }

    pub(super) const fn popup_title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "新規タスク",
            FormMode::Edit(_) => "タスク編集",
        }
    }

    pub(super) const fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormFocus::Title => FormFocus::Description,
            FormFocus::Description => FormFocus::DueDate,
            FormFocus::DueDate => FormFocus::Priority,
            FormFocus::Priority => FormFocus::Title,
        };
    }

    pub(super) const fn focus_prev(&mut self) {
        self.focus = match self.focus {
            FormFocus::Title => FormFocus::Priority,
            FormFocus::Description => FormFocus::Title,
            FormFocus::DueDate => FormFocus::Description,
            FormFocus::Priority => FormFocus::DueDate,
        };
    }

    /// Append a character to the focused text field. The priority field
    /// takes no free text; it is cycled with the arrow keys.
    pub(super) fn insert_char(&mut self, c: char) {
        if let Some(field) = self.active_field_mut() {
            field.push(c);
        }
    }

    /// Remove the last grapheme of the focused text field.
    pub(super) fn backspace(&mut self) {
        if let Some(field) = self.active_field_mut() {
            pop_grapheme(field);
        }
    }

    pub(super) const fn cycle_priority(&mut self, forward: bool) {
        self.priority = if forward {
            match self.priority {
                Priority::High => Priority::Medium,
                Priority::Medium => Priority::Low,
                Priority::Low => Priority::High,
            }
        } else {
            match self.priority {
                Priority::High => Priority::Low,
                Priority::Medium => Priority::High,
                Priority::Low => Priority::Medium,
            }
        };
    }

    /// Check the form fields, returning either service-ready values or a
    /// user-facing message.
    pub(super) fn validate(&self) -> Result<FormOutput, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("タイトルを入力してください".to_owned());
        }
        let Ok(due_date) = parse_due_date(&self.due_date) else {
            return Err("期限の形式が不正です (YYYY-MM-DD)".to_owned());
        };
        let description = {
            let trimmed = self.description.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        };
        Ok(FormOutput {
            title: title.to_owned(),
            description,
            priority: self.priority,
            due_date,
        })
    }

    fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormFocus::Title => Some(&mut self.title),
            FormFocus::Description => Some(&mut self.description),
            FormFocus::DueDate => Some(&mut self.due_date),
            FormFocus::Priority => None,
        }
    }
}

/// Remove the last grapheme cluster from a string.
pub(super) fn pop_grapheme(value: &mut String) {
    if let Some((offset, _)) = value.grapheme_indices(true).last() {
        value.truncate(offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodo_core::Status;
    use time::OffsetDateTime;
    use time::macros::date;

    fn sample_task() -> Task {
        Task {
            id: TaskId(3),
            title: "Buy milk".to_owned(),
            description: Some("two bottles".to_owned()),
            priority: Priority::Low,
            due_date: date!(2099 - 01 - 01),
            status: Status::Pending,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn create_form_prefills_today_and_medium_priority() {
        let form = TaskForm::create(date!(2025 - 06 - 01));
        assert_eq!(form.due_date, "2025-06-01");
        assert_eq!(form.priority, Priority::Medium);
        assert_eq!(form.focus, FormFocus::Title);
        assert!(matches!(form.mode, FormMode::Create));
    }

    #[test]
    fn edit_form_prefills_current_values() {
        let form = TaskForm::edit(&sample_task());
        assert_eq!(form.title, "Buy milk");
        assert_eq!(form.description, "two bottles");
        assert_eq!(form.due_date, "2099-01-01");
        assert_eq!(form.priority, Priority::Low);
        assert!(matches!(form.mode, FormMode::Edit(TaskId(3))));
    }

    #[test]
    fn focus_cycles_through_every_field() {
        let mut form = TaskForm::create(date!(2025 - 06 - 01));
        let mut seen = vec![form.focus];
        for _ in 0..3 {
            form.focus_next();
            seen.push(form.focus);
        }
        assert_eq!(
            seen,
            vec![
                FormFocus::Title,
                FormFocus::Description,
                FormFocus::DueDate,
                FormFocus::Priority
            ]
        );
        form.focus_next();
        assert_eq!(form.focus, FormFocus::Title);
        form.focus_prev();
        assert_eq!(form.focus, FormFocus::Priority);
    }

    #[test]
    fn backspace_removes_whole_graphemes() {
        let mut form = TaskForm::create(date!(2025 - 06 - 01));
        form.insert_char('a');
        form.insert_char('é');
        form.backspace();
        assert_eq!(form.title, "a");

        let mut value = "日本語".to_owned();
        pop_grapheme(&mut value);
        assert_eq!(value, "日本");
    }

    #[test]
    fn priority_field_ignores_free_text() {
        let mut form = TaskForm::create(date!(2025 - 06 - 01));
        form.focus = FormFocus::Priority;
        form.insert_char('x');
        assert_eq!(form.title, "");
        form.cycle_priority(true);
        assert_eq!(form.priority, Priority::Low);
        form.cycle_priority(false);
        assert_eq!(form.priority, Priority::Medium);
    }

    #[test]
    fn validate_rejects_blank_title_and_bad_dates() {
        let mut form = TaskForm::create(date!(2025 - 06 - 01));
        assert!(form.validate().is_err());

        form.title = "Water plants".to_owned();
        form.due_date = "someday".to_owned();
        assert!(form.validate().is_err());

        form.due_date = "2099-01-01".to_owned();
        let output = form.validate().unwrap_or_else(|err| panic!("validate: {err}"));
        assert_eq!(output.title, "Water plants");
        assert_eq!(output.description, None);
        assert_eq!(output.due_date, date!(2099 - 01 - 01));
    }
}
