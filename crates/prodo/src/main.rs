//! CLI entry point for prodo.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use prodo_app::config::CONFIG_FILE;
use prodo_app::{ProdoConfig, TaskService};
use prodo_store_sqlite::SqliteStore;

mod commands;
mod tui;

/// Form-driven task tracking over a single SQLite table.
#[derive(Parser, Debug)]
#[command(
    name = "prodo",
    version,
    about = "prodo: single-user task tracking backed by one SQLite table"
)]
struct Cli {
    /// Path to the database file (overrides configuration).
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new task.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "medium")]
        priority: String,
        #[arg(long, value_name = "YYYY-MM-DD")]
        due: String,
    },

    /// List tasks, optionally filtered.
    Ls {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "all")]
        priority: String,
        #[arg(long, default_value = "all")]
        status: String,
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },

    /// Mark a task as completed.
    Done {
        id: i64,
    },

    /// Revert a completed task to pending.
    Reopen {
        id: i64,
    },

    /// Overwrite a task's editable fields; omitted flags keep current values.
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, value_name = "YYYY-MM-DD")]
        due: Option<String>,
    },

    /// Delete a task permanently.
    Rm {
        id: i64,
    },

    /// Show dashboard counters.
    Stats,

    /// Export every task as CSV.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Launch interactive terminal UI.
    Tui,
}

/// Output format for `ls`.
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum LsFormat {
    /// Pipe-separated table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

fn main() -> Result<()> {
    let Cli { db, cmd } = Cli::parse();

    install_tracing();
    execute_command(db, cmd)
}

fn execute_command(db: Option<PathBuf>, command: Command) -> Result<()> {
    let database = resolve_database_path(db)?;
    let store = SqliteStore::open(&database)
        .with_context(|| format!("failed to open task store at {}", database.display()))?;
    let service = TaskService::new(store);

    match command {
        Command::Tui => tui::run(service),
        other => commands::run(other, &service),
    }
}

fn resolve_database_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("failed to resolve working directory")?;
    let mut candidates = vec![cwd.join(CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("prodo").join("config.toml"));
    }
    let config = ProdoConfig::discover(&candidates)?;
    Ok(config.database_path(&cwd))
}

fn install_tracing() {
    // EnvFilterに RUST_LOG を渡せる。デフォルトは INFO。
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
