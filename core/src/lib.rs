//! Client core for the todo service.
//!
//! # Overview
//! Everything a todo front end needs short of drawing pixels: the data
//! model, a request builder/response parser for every backend endpoint, a
//! remote service over a host-supplied transport, the form draft and its
//! validation, the derived list view, and the controller that owns the
//! in-memory state.
//!
//! # Design
//! - `TodoClient` is stateless, holds only `base_url`, and never touches the
//!   network; each operation is a `build_*` / `parse_*` pair.
//! - I/O happens behind the [`Transport`] trait, implemented by the host.
//! - `Controller` replaces modal alerts with [`ControllerError`] values so
//!   every user action can be tested without a UI.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod prefs;
pub mod service;
pub mod types;
pub mod view;

pub use client::{TodoClient, DEFAULT_BASE_URL};
pub use controller::{local_today, Controller, ControllerError, DeleteOutcome};
pub use error::ApiError;
pub use form::{FormError, TodoForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use prefs::{MemoryPreferences, PreferenceStore};
pub use service::TodoService;
pub use types::{Priority, Todo, TodoFields, TodoId};
pub use view::{Counts, StatusFilter, ViewFilter};
