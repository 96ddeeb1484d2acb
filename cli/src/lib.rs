//! Terminal front end for the todo service.
//!
//! Each invocation mounts a fresh [`todo_core::Controller`], loads the list
//! from the backend, performs one user action and renders the result.

mod args;
mod commands;
pub mod config;
pub mod logging;
pub mod prefs;
pub mod transport;
pub mod ui;

pub use args::{Cli, Command, FormArgs, ListArgs, LogLevel, RemoteQuery, ThemeMode};
pub use commands::{execute, run};
