//! Application layer logic for prodo.
//!
//! This crate provides the service façade, edit-session state, filter
//! construction, CSV export, and configuration shared by the CLI and TUI.

pub mod config;
pub mod export;
pub mod filter_util;
pub mod service;
pub mod session;

// Re-exports for convenience
pub use config::ProdoConfig;
pub use export::export_csv;
pub use filter_util::{FilterBuildError, build_filter, parse_due_date};
pub use service::{NewTask, TaskEdit, TaskService, TaskStore};
pub use session::EditSession;
