//! SQLite-backed task store for prodo.
//!
//! One table, one row per task. Every operation is a single statement and
//! immediately durable; there is deliberately no cache in front of the
//! table, so callers re-read after each mutation.

/// Error types.
pub mod error;

pub use error::SqliteStoreError;

use std::path::Path;

use prodo_core::{Priority, Status, Task, TaskDraft, TaskId};
use rusqlite::{Connection, OptionalExtension, params};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::debug;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    priority TEXT NOT NULL,
    due_date TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, due_date, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ALL: &str = "SELECT id, title, description, priority, due_date, status, created_at
    FROM tasks ORDER BY due_date ASC, id ASC";
const SELECT_ONE: &str = "SELECT id, title, description, priority, due_date, status, created_at
    FROM tasks WHERE id = ?1";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?1 WHERE id = ?2";
const UPDATE_DETAILS: &str = "UPDATE tasks
    SET title = ?1, description = ?2, priority = ?3, due_date = ?4 WHERE id = ?5";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, SqliteStoreError>;

/// Store owning the single `tasks` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// `tasks` table exists.
    ///
    /// # Errors
    /// Returns an error when the file cannot be opened or the schema cannot
    /// be created. Callers treat this as fatal: nothing works without a
    /// store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::with_connection(conn)
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    /// Returns an error when SQLite cannot allocate the database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute(SCHEMA, [])?;
        Ok(Self { conn })
    }

    /// Insert a new task with status Pending and a store-assigned creation
    /// timestamp, returning its id.
    ///
    /// # Errors
    /// Returns an error when the insert fails.
    pub fn add(&self, draft: &TaskDraft, priority: Priority, due_date: Date) -> StoreResult<TaskId> {
        let created_at = format_timestamp(OffsetDateTime::now_utc())?;
        self.conn.execute(
            INSERT_TASK,
            params![
                draft.title(),
                draft.description(),
                priority.as_str(),
                format_date(due_date)?,
                Status::Pending.as_str(),
                created_at,
            ],
        )?;
        let id = TaskId(self.conn.last_insert_rowid());
        debug!(%id, "inserted task");
        Ok(id)
    }

    /// Read the full table, ordered by due date ascending (ties broken by
    /// id).
    ///
    /// # Errors
    /// Returns an error when the read fails or a row fails to decode.
    pub fn list_all(&self) -> StoreResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let rows = stmt.query_map([], read_row)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(decode_row(row?)?);
        }
        Ok(tasks)
    }

    /// Read a single task by id.
    ///
    /// # Errors
    /// Returns an error when the read fails or the row fails to decode.
    pub fn get(&self, id: TaskId) -> StoreResult<Option<Task>> {
        let row = self
            .conn
            .query_row(SELECT_ONE, params![id.0], read_row)
            .optional()?;
        row.map(decode_row).transpose()
    }

    /// Overwrite the status of the given task.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::TaskNotFound`] when no row matched.
    pub fn update_status(&self, id: TaskId, status: Status) -> StoreResult<()> {
        let affected = self.conn.execute(UPDATE_STATUS, params![status.as_str(), id.0])?;
        if affected == 0 {
            return Err(SqliteStoreError::TaskNotFound(id));
        }
        debug!(%id, status = status.as_str(), "updated task status");
        Ok(())
    }

    /// Overwrite every editable field of the given task. Status, id, and
    /// creation timestamp are untouched.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::TaskNotFound`] when no row matched.
    pub fn update_details(
        &self,
        id: TaskId,
        draft: &TaskDraft,
        priority: Priority,
        due_date: Date,
    ) -> StoreResult<()> {
        let affected = self.conn.execute(
            UPDATE_DETAILS,
            params![
                draft.title(),
                draft.description(),
                priority.as_str(),
                format_date(due_date)?,
                id.0,
            ],
        )?;
        if affected == 0 {
            return Err(SqliteStoreError::TaskNotFound(id));
        }
        debug!(%id, "updated task details");
        Ok(())
    }

    /// Remove the task permanently.
    ///
    /// # Errors
    /// Returns [`SqliteStoreError::TaskNotFound`] when no row matched.
    pub fn delete(&self, id: TaskId) -> StoreResult<()> {
        let affected = self.conn.execute(DELETE_TASK, params![id.0])?;
        if affected == 0 {
            return Err(SqliteStoreError::TaskNotFound(id));
        }
        debug!(%id, "deleted task");
        Ok(())
    }
}

/// Raw column values of a task row, decoded in a second step so parse
/// failures surface as store errors instead of SQLite conversion errors.
struct RawTaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    priority: String,
    due_date: String,
    status: String,
    created_at: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawTaskRow> {
    Ok(RawTaskRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        due_date: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn decode_row(raw: RawTaskRow) -> StoreResult<Task> {
    let priority: Priority = raw
        .priority
        .parse()
        .map_err(|_| SqliteStoreError::InvalidField {
            field: "priority",
            value: raw.priority.clone(),
        })?;
    let status: Status = raw
        .status
        .parse()
        .map_err(|_| SqliteStoreError::InvalidField {
            field: "status",
            value: raw.status.clone(),
        })?;
    let due_date = Date::parse(&raw.due_date, DATE_FORMAT)
        .map_err(|_| SqliteStoreError::InvalidDate(raw.due_date.clone()))?;
    let created_at = OffsetDateTime::parse(&raw.created_at, &Rfc3339)
        .map_err(|_| SqliteStoreError::InvalidTimestamp(raw.created_at.clone()))?;

    Ok(Task {
        id: TaskId(raw.id),
        title: raw.title,
        description: raw.description,
        priority,
        due_date,
        status,
        created_at,
    })
}

fn format_date(date: Date) -> StoreResult<String> {
    date.format(DATE_FORMAT)
        .map_err(|err| SqliteStoreError::Other(err.to_string()))
}

fn format_timestamp(ts: OffsetDateTime) -> StoreResult<String> {
    ts.format(&Rfc3339)
        .map_err(|err| SqliteStoreError::Other(err.to_string()))
}
