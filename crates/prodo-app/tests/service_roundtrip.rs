//! End-to-end service flow against a real in-memory SQLite store.

use prodo_app::{NewTask, TaskEdit, TaskService, build_filter, export_csv};
use prodo_core::{Priority, Status, TaskId};
use prodo_store_sqlite::SqliteStore;
use time::macros::date;

fn service() -> TaskService<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap_or_else(|err| panic!("store must open: {err}"));
    TaskService::new(store)
}

#[test]
fn add_complete_and_reopen_roundtrip() {
    let service = service();

    let id = service
        .add_task(NewTask {
            title: "Buy milk".to_owned(),
            description: Some(String::new()),
            priority: Priority::Low,
            due_date: date!(2099 - 01 - 01),
        })
        .unwrap_or_else(|err| panic!("add_task: {err}"));
    assert_eq!(id, TaskId(1));

    let tasks = service.list_tasks().unwrap_or_else(|err| panic!("list_tasks: {err}"));
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Buy milk");
    assert_eq!(tasks[0].description, None);
    assert_eq!(tasks[0].status, Status::Pending);

    service
        .set_status(id, Status::Completed)
        .unwrap_or_else(|err| panic!("set_status: {err}"));
    let tasks = service.list_tasks().unwrap_or_else(|err| panic!("list_tasks: {err}"));
    assert_eq!(tasks[0].status, Status::Completed);

    // Un-checking a completed task drops it straight back to Pending.
    service
        .set_status(id, tasks[0].status.toggled())
        .unwrap_or_else(|err| panic!("set_status: {err}"));
    let tasks = service.list_tasks().unwrap_or_else(|err| panic!("list_tasks: {err}"));
    assert_eq!(tasks[0].status, Status::Pending);
}

#[test]
fn edit_session_flow_updates_details_once() {
    let service = service();
    let id = service
        .add_task(NewTask {
            title: "Draft report".to_owned(),
            description: None,
            priority: Priority::Medium,
            due_date: date!(2099 - 03 - 01),
        })
        .unwrap_or_else(|err| panic!("add_task: {err}"));

    let mut session = prodo_app::EditSession::new();
    session.begin(id);

    let Some(target) = session.finish() else {
        panic!("session must hold the edit target");
    };
    service
        .update_details(
            target,
            TaskEdit {
                title: "Draft quarterly report".to_owned(),
                description: Some("include revenue table".to_owned()),
                priority: Priority::High,
                due_date: date!(2099 - 02 - 15),
            },
        )
        .unwrap_or_else(|err| panic!("update_details: {err}"));
    assert_eq!(session.editing(), None);

    let task = service
        .get(id)
        .unwrap_or_else(|err| panic!("get: {err}"))
        .map_or_else(|| panic!("task must exist"), |t| t);
    assert_eq!(task.title, "Draft quarterly report");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.status, Status::Pending);
}

#[test]
fn filters_and_export_read_the_same_full_list() {
    let service = service();
    for (title, priority, due) in [
        ("Pay rent", Priority::High, date!(2099 - 01 - 05)),
        ("Buy milk, eggs", Priority::Low, date!(2099 - 01 - 02)),
        ("Plan trip", Priority::Medium, date!(2099 - 01 - 10)),
    ] {
        service
            .add_task(NewTask {
                title: title.to_owned(),
                description: None,
                priority,
                due_date: due,
            })
            .unwrap_or_else(|err| panic!("add_task: {err}"));
    }

    let filter = build_filter(Some("rent".to_owned()), Some("high"), Some("all"))
        .unwrap_or_else(|err| panic!("build_filter: {err}"));
    let matched = service.filtered(&filter).unwrap_or_else(|err| panic!("filtered: {err}"));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].title, "Pay rent");

    let all = service.list_tasks().unwrap_or_else(|err| panic!("list_tasks: {err}"));
    let csv = export_csv(&all).unwrap_or_else(|err| panic!("export_csv: {err}"));
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "ID,Title,Description,Priority,Due Date,Status,Created At");
    // Export follows store order: due date ascending.
    assert!(lines[1].contains("\"Buy milk, eggs\""));
    assert!(lines[2].contains("Pay rent"));
    assert!(lines[3].contains("Plan trip"));
}

#[test]
fn delete_removes_the_task_from_all_reads() {
    let service = service();
    let id = service
        .add_task(NewTask {
            title: "Temp".to_owned(),
            description: None,
            priority: Priority::Low,
            due_date: date!(2099 - 01 - 01),
        })
        .unwrap_or_else(|err| panic!("add_task: {err}"));

    service.delete(id).unwrap_or_else(|err| panic!("delete: {err}"));
    assert!(
        service
            .list_tasks()
            .unwrap_or_else(|err| panic!("list_tasks: {err}"))
            .is_empty()
    );
    assert!(service.delete(id).is_err());
}
