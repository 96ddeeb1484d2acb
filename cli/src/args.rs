use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use todo_core::{Priority, StatusFilter, TodoForm, TodoId};

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Manage todos stored on a remote todo service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Collection URL of the backend, e.g. http://localhost:8080/api/todos
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Alternate config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the filtered, sorted list
    List(ListArgs),

    /// Create a todo
    Add(FormArgs),

    /// Edit an existing todo; omitted fields keep their current value
    Edit {
        id: TodoId,
        #[command(flatten)]
        form: FormArgs,
    },

    /// Flip a todo between active and completed
    Toggle { id: TodoId },

    /// Delete a todo after confirmation
    Delete {
        id: TodoId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Fetch a single todo from the backend
    Show { id: TodoId },

    /// Run one of the backend's own queries
    Remote {
        #[command(subcommand)]
        query: RemoteQuery,
    },

    /// Show or change the display theme
    Theme { mode: Option<ThemeMode> },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub priority: Option<Priority>,

    /// Case-insensitive title substring
    #[arg(long)]
    pub search: Option<String>,
}

/// Form input; every field is optional so `edit` can patch the seeded draft.
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub priority: Option<Priority>,

    #[arg(long)]
    pub category: Option<String>,

    /// YYYY-MM-DD; pass an empty string to clear
    #[arg(long)]
    pub due: Option<String>,
}

impl FormArgs {
    /// Overwrites the draft fields that were given on the command line.
    pub fn apply_to(&self, form: &mut TodoForm) {
        if let Some(title) = &self.title {
            form.title = title.clone();
        }
        if let Some(description) = &self.description {
            form.description = description.clone();
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(category) = &self.category {
            form.category = category.clone();
        }
        if let Some(due) = &self.due {
            form.due_date = due.clone();
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum RemoteQuery {
    Search { term: String },
    Category { name: String },
    Priority { priority: Priority },
    Overdue,
    Categories,
    Completed,
    Incomplete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ThemeMode {
    Dark,
    Light,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
