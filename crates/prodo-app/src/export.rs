//! CSV export of the task table.

use anyhow::{Context, Result};
use prodo_core::Task;
use time::format_description::well_known::Rfc3339;

/// Header row matching the column labels of the original table dump.
const CSV_HEADER: &str = "ID,Title,Description,Priority,Due Date,Status,Created At";

/// Serialize the full task list as CSV text, header row first.
///
/// # Errors
/// Returns an error when a creation timestamp fails to format.
pub fn export_csv(tasks: &[Task]) -> Result<String> {
    let mut out = String::with_capacity(64 * (tasks.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');
    for task in tasks {
        let created_at = task
            .created_at
            .format(&Rfc3339)
            .context("failed to format creation timestamp")?;
        let row = format!(
            "{},{},{},{},{},{},{}\n",
            task.id,
            csv_escape(&task.title),
            csv_escape(task.description.as_deref().unwrap_or_default()),
            task.priority.as_str(),
            task.due_date,
            task.status.as_str(),
            csv_escape(&created_at),
        );
        out.push_str(&row);
    }
    Ok(out)
}

/// Minimal CSV field escaping (wraps in quotes if needed).
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
