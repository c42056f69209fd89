use std::fs;

use anyhow::{Context, Result, anyhow};
use prodo_app::{NewTask, TaskEdit, TaskService, TaskStore, build_filter, export_csv, parse_due_date};
use prodo_core::{Priority, Status, Task, TaskId};

use crate::{Command, LsFormat};

/// Execute one non-interactive command against the service.
pub fn run<S: TaskStore>(command: Command, service: &TaskService<S>) -> Result<()> {
    match command {
        Command::Add {
            title,
            description,
            priority,
            due,
        } => {
            let priority: Priority = priority.parse()?;
            let due_date = parse_due_date(&due).with_context(|| format!("invalid due date: {due}"))?;
            let id = service.add_task(NewTask {
                title,
                description,
                priority,
                due_date,
            })?;
            println!("created task: {id}");
        }

        Command::Ls {
            search,
            priority,
            status,
            format,
        } => {
            let filter = build_filter(search, Some(&priority), Some(&status))?;
            let filter_empty = filter.is_empty();
            let tasks = service.filtered(&filter)?;

            if tasks.is_empty() {
                if filter_empty {
                    println!("No tasks found");
                } else {
                    println!("No tasks matched the provided filters");
                }
                return Ok(());
            }

            match format {
                LsFormat::Table => render_task_table(&tasks),
                LsFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
            }
        }

        Command::Done { id } => {
            service.set_status(TaskId(id), Status::Completed)?;
            println!("completed task: {id}");
        }

        Command::Reopen { id } => {
            service.set_status(TaskId(id), Status::Pending)?;
            println!("reopened task: {id}");
        }

        Command::Edit {
            id,
            title,
            description,
            priority,
            due,
        } => {
            let id = TaskId(id);
            let current = service
                .get(id)?
                .ok_or_else(|| anyhow!("task not found: {id}"))?;
            let edit = merge_edit(current, title, description, priority, due)?;
            service.update_details(id, edit)?;
            println!("updated task: {id}");
        }

        Command::Rm { id } => {
            service.delete(TaskId(id))?;
            println!("deleted task: {id}");
        }

        Command::Stats => {
            let metrics = service.metrics()?;
            println!("total:     {}", metrics.total);
            println!("completed: {}", metrics.completed);
            println!("pending:   {}", metrics.pending);
            println!("rate:      {:.2}%", metrics.completion_rate());
        }

        Command::Export { output } => {
            let tasks = service.list_tasks()?;
            let csv = export_csv(&tasks)?;
            match output {
                Some(path) => {
                    fs::write(&path, csv)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("exported {} tasks to {}", tasks.len(), path.display());
                }
                None => print!("{csv}"),
            }
        }

        Command::Tui => unreachable!("Tui command routed to the TUI runner"),
    }

    Ok(())
}

/// Combine the current row with the provided flags into a full-field edit.
fn merge_edit(
    current: Task,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due: Option<String>,
) -> Result<TaskEdit> {
    let priority = match priority {
        Some(token) => token.parse()?,
        None => current.priority,
    };
    let due_date = match due {
        Some(token) => parse_due_date(&token).with_context(|| format!("invalid due date: {token}"))?,
        None => current.due_date,
    };
    Ok(TaskEdit {
        title: title.unwrap_or(current.title),
        // An explicit --description "" clears the field; omitting the flag
        // keeps the stored value.
        description: description.or(current.description),
        priority,
        due_date,
    })
}

fn render_task_table(tasks: &[Task]) {
    println!("ID | Status | Priority | Due | Title | Description");
    println!("-- | ------ | -------- | --- | ----- | -----------");

    for task in tasks {
        println!(
            "{} | {} | {} | {} | {} | {}",
            task.id,
            task.status.as_str(),
            task.priority.as_str(),
            task.due_date,
            task.title,
            task.description.as_deref().unwrap_or("-")
        );
    }
}
