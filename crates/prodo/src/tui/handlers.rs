use std::mem;

use crossterm::event::{KeyCode, KeyEvent};
use prodo_app::{NewTask, TaskEdit, TaskStore};
use prodo_core::{Priority, Status, TaskFilter};
use time::OffsetDateTime;

use super::form::{FormFocus, FormMode, TaskForm, pop_grapheme};
use super::view::{Overlay, Ui};

/// Route one key event based on the active overlay.
pub(super) fn handle_key<S: TaskStore>(ui: &mut Ui<S>, key: KeyEvent) {
    match &ui.overlay {
        Overlay::None => handle_list_key(ui, key),
        Overlay::Form(_) => handle_form_key(ui, key),
        Overlay::ConfirmDelete { .. } => handle_confirm_key(ui, key),
        Overlay::Search { .. } => handle_search_key(ui, key),
    }
}

fn handle_list_key<S: TaskStore>(ui: &mut Ui<S>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => ui.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => ui.app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => ui.app.select_next(),
        KeyCode::Char('a') => {
            let today = OffsetDateTime::now_utc().date();
            ui.overlay = Overlay::Form(TaskForm::create(today));
        }
        KeyCode::Char('e') => {
            if let Some(task) = ui.app.selected_task() {
                let form = TaskForm::edit(task);
                let id = task.id;
                ui.edit_session.begin(id);
                ui.overlay = Overlay::Form(form);
            }
        }
        KeyCode::Char(' ') => toggle_selected(ui),
        KeyCode::Char('d') => {
            if let Some(task) = ui.app.selected_task() {
                ui.overlay = Overlay::ConfirmDelete {
                    task: task.id,
                    title: task.title.clone(),
                };
            }
        }
        KeyCode::Char('/') => {
            let input = ui.app.filter().text.clone().unwrap_or_default();
            ui.overlay = Overlay::Search { input };
        }
        KeyCode::Char('p') => cycle_priority_filter(ui),
        KeyCode::Char('s') => cycle_status_filter(ui),
        KeyCode::Char('c') => {
            ui.app.set_filter(TaskFilter::all());
            ui.info("フィルタをクリアしました");
        }
        KeyCode::Char('r') => ui.refresh(),
        _ => {}
    }
}

fn toggle_selected<S: TaskStore>(ui: &mut Ui<S>) {
    let Some(task) = ui.app.selected_task() else {
        return;
    };
    let id = task.id;
    let next = task.status.toggled();
    match ui.app.service().set_status(id, next) {
        Ok(()) => {
            ui.refresh();
            ui.info(match next {
                Status::Completed => "タスクを完了しました",
                Status::Pending => "タスクを未完了に戻しました",
            });
        }
        Err(err) => ui.error(format!("ステータスの更新に失敗しました: {err}")),
    }
}

fn cycle_priority_filter<S: TaskStore>(ui: &mut Ui<S>) {
    let mut filter = ui.app.filter().clone();
    filter.priority = match filter.priority {
        None => Some(Priority::High),
        Some(Priority::High) => Some(Priority::Medium),
        Some(Priority::Medium) => Some(Priority::Low),
        Some(Priority::Low) => None,
    };
    let label = filter.priority.map_or("All", Priority::as_str);
    ui.app.set_filter(filter);
    ui.info(format!("優先度フィルタ: {label}"));
}

fn cycle_status_filter<S: TaskStore>(ui: &mut Ui<S>) {
    let mut filter = ui.app.filter().clone();
    filter.status = match filter.status {
        None => Some(Status::Pending),
        Some(Status::Pending) => Some(Status::Completed),
        Some(Status::Completed) => None,
    };
    let label = filter.status.map_or("All", Status::as_str);
    ui.app.set_filter(filter);
    ui.info(format!("ステータスフィルタ: {label}"));
}

fn handle_form_key<S: TaskStore>(ui: &mut Ui<S>, key: KeyEvent) {
    let Overlay::Form(mut form) = mem::replace(&mut ui.overlay, Overlay::None) else {
        return;
    };
    match key.code {
        KeyCode::Esc => match form.mode {
            FormMode::Create => ui.info("タスク作成をキャンセルしました"),
            FormMode::Edit(_) => {
                ui.edit_session.cancel();
                ui.info("タスク編集をキャンセルしました");
            }
        },
        KeyCode::Enter => submit_form(ui, form),
        KeyCode::Tab => {
            form.focus_next();
            ui.overlay = Overlay::Form(form);
        }
        KeyCode::BackTab => {
            form.focus_prev();
            ui.overlay = Overlay::Form(form);
        }
        KeyCode::Left if form.focus == FormFocus::Priority => {
            form.cycle_priority(false);
            ui.overlay = Overlay::Form(form);
        }
        KeyCode::Right if form.focus == FormFocus::Priority => {
            form.cycle_priority(true);
            ui.overlay = Overlay::Form(form);
        }
        KeyCode::Backspace => {
            form.backspace();
            ui.overlay = Overlay::Form(form);
        }
        KeyCode::Char(c) => {
            form.insert_char(c);
            ui.overlay = Overlay::Form(form);
        }
        _ => ui.overlay = Overlay::Form(form),
    }
}

fn submit_form<S: TaskStore>(ui: &mut Ui<S>, form: TaskForm) {
    let output = match form.validate() {
        Ok(output) => output,
        Err(msg) => {
            // Keep the form open so the prior input is preserved.
            ui.error(msg);
            ui.overlay = Overlay::Form(form);
            return;
        }
    };

    match form.mode {
        FormMode::Create => {
            let result = ui.app.service().add_task(NewTask {
                title: output.title,
                description: output.description,
                priority: output.priority,
                due_date: output.due_date,
            });
            match result {
                Ok(id) => {
                    ui.refresh();
                    ui.info(format!("タスクを作成しました: {id}"));
                }
                Err(err) => {
                    ui.error(format!("タスクの作成に失敗しました: {err}"));
                    ui.overlay = Overlay::Form(form);
                }
            }
        }
        FormMode::Edit(id) => {
            let result = ui.app.service().update_details(
                id,
                TaskEdit {
                    title: output.title,
                    description: output.description,
                    priority: output.priority,
                    due_date: output.due_date,
                },
            );
            match result {
                Ok(()) => {
                    ui.edit_session.finish();
                    ui.refresh();
                    ui.info("タスクを更新しました");
                }
                Err(err) => {
                    ui.error(format!("タスクの更新に失敗しました: {err}"));
                    ui.overlay = Overlay::Form(form);
                }
            }
        }
    }
}

fn handle_confirm_key<S: TaskStore>(ui: &mut Ui<S>, key: KeyEvent) {
    let Overlay::ConfirmDelete { task, title } = mem::replace(&mut ui.overlay, Overlay::None) else {
        return;
    };
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => match ui.app.service().delete(task) {
            Ok(()) => {
                ui.refresh();
                ui.info(format!("タスクを削除しました: {title}"));
            }
            Err(err) => ui.error(format!("タスクの削除に失敗しました: {err}")),
        },
        KeyCode::Char('n') | KeyCode::Esc => {}
        _ => ui.overlay = Overlay::ConfirmDelete { task, title },
    }
}

fn handle_search_key<S: TaskStore>(ui: &mut Ui<S>, key: KeyEvent) {
    let Overlay::Search { mut input } = mem::replace(&mut ui.overlay, Overlay::None) else {
        return;
    };
    match key.code {
        KeyCode::Esc => {}
        KeyCode::Enter => {
            let filter = ui.app.filter().clone().with_text(Some(input));
            ui.app.set_filter(filter);
        }
        KeyCode::Backspace => {
            pop_grapheme(&mut input);
            ui.overlay = Overlay::Search { input };
        }
        KeyCode::Char(c) => {
            input.push(c);
            ui.overlay = Overlay::Search { input };
        }
        _ => ui.overlay = Overlay::Search { input },
    }
}
