//! Application controller: the authoritative in-memory state.
//!
//! # Design
//! The controller owns the loaded list, the edit target, the filter
//! selections and the display preference. Every mutation goes to the backend
//! first; the local list only changes once the backend has answered, and the
//! answer replaces the local copy by id. Failures are logged and returned as
//! [`ControllerError`], whose `Display` is the message shown to the user, so
//! the state can be exercised without any UI attached.

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::form::{FormError, TodoForm};
use crate::http::Transport;
use crate::prefs::PreferenceStore;
use crate::service::TodoService;
use crate::types::{Priority, Todo, TodoFields, TodoId};
use crate::view::{self, Counts, StatusFilter, ViewFilter};

/// Failure of a user action, worded for display.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Failed to load todos. Make sure the backend is running on {base_url}")]
    Load {
        base_url: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to save todo")]
    Save(#[source] ApiError),

    #[error("Failed to update todo")]
    Update(#[source] ApiError),

    #[error("Failed to delete todo")]
    Delete(#[source] ApiError),

    #[error(transparent)]
    Validation(#[from] FormError),

    #[error("No todo with id {0}")]
    UnknownTodo(TodoId),
}

impl ControllerError {
    /// The backend error behind this failure, if any.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            ControllerError::Load { source, .. } => Some(source),
            ControllerError::Save(e) | ControllerError::Update(e) | ControllerError::Delete(e) => {
                Some(e)
            }
            ControllerError::Validation(_) | ControllerError::UnknownTodo(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct Controller<T, P> {
    service: TodoService<T>,
    prefs: P,
    todos: Vec<Todo>,
    editing: Option<Todo>,
    filter: ViewFilter,
    loading: bool,
    categories: Vec<String>,
    dark_mode: bool,
}

impl<T: Transport, P: PreferenceStore> Controller<T, P> {
    /// Reads the stored display preference; dark mode is the default.
    pub fn new(service: TodoService<T>, prefs: P) -> Self {
        let dark_mode = prefs.load_dark_mode().unwrap_or(true);
        Self {
            service,
            prefs,
            todos: Vec::new(),
            editing: None,
            filter: ViewFilter::default(),
            loading: false,
            categories: Vec::new(),
            dark_mode,
        }
    }

    pub fn service(&self) -> &TodoService<T> {
        &self.service
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn editing(&self) -> Option<&Todo> {
        self.editing.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Fetches every todo, then the category list.
    pub fn load(&mut self) -> Result<(), ControllerError> {
        self.loading = true;
        let result = self.service.list_all();
        self.loading = false;

        match result {
            Ok(todos) => {
                info!(count = todos.len(), "loaded todos");
                self.todos = todos;
            }
            Err(source) => {
                error!(error = %source, "error loading todos");
                return Err(ControllerError::Load {
                    base_url: self.service.client().base_url().to_string(),
                    source,
                });
            }
        }
        self.refresh_categories();
        Ok(())
    }

    /// Creates a todo, or updates the one being edited. The edited todo's
    /// completion state always wins over `fields.completed`; completion only
    /// changes through [`Controller::toggle`].
    pub fn save(&mut self, mut fields: TodoFields) -> Result<&Todo, ControllerError> {
        let target = self.editing.as_ref().map(|t| (t.id, t.completed));
        let saved = match target {
            Some((id, completed)) => {
                fields.completed = completed;
                let updated = self.service.update(id, &fields).map_err(|e| {
                    error!(id, error = %e, "error saving todo");
                    ControllerError::Save(e)
                })?;
                debug!(id, "updated todo");
                self.editing = None;
                self.replace(updated)
            }
            None => {
                fields.completed = false;
                let created = self.service.create(&fields).map_err(|e| {
                    error!(error = %e, "error saving todo");
                    ControllerError::Save(e)
                })?;
                debug!(id = created.id, "created todo");
                self.todos.push(created);
                self.todos.len() - 1
            }
        };
        self.refresh_categories();
        Ok(&self.todos[saved])
    }

    /// Validates the form locally and saves it. Nothing reaches the backend
    /// when validation fails.
    pub fn submit_form(&mut self, form: &mut TodoForm) -> Result<&Todo, ControllerError> {
        let fields = form.submit().inspect_err(|e| {
            warn!(error = %e, "form rejected");
        })?;
        self.save(fields)
    }

    pub fn toggle(&mut self, id: TodoId) -> Result<&Todo, ControllerError> {
        let updated = self.service.toggle_completed(id).map_err(|e| {
            error!(id, error = %e, "error toggling todo");
            ControllerError::Update(e)
        })?;
        let index = self.replace(updated);
        Ok(&self.todos[index])
    }

    /// Deletes `id` once `confirm` approves it.
    pub fn delete(
        &mut self,
        id: TodoId,
        confirm: impl FnOnce(&Todo) -> bool,
    ) -> Result<DeleteOutcome, ControllerError> {
        let todo = self.get(id).ok_or(ControllerError::UnknownTodo(id))?;
        if !confirm(todo) {
            debug!(id, "delete cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.service.delete(id).map_err(|e| {
            error!(id, error = %e, "error deleting todo");
            ControllerError::Delete(e)
        })?;
        self.todos.retain(|t| t.id != id);
        if self.editing.as_ref().is_some_and(|t| t.id == id) {
            self.editing = None;
        }
        self.refresh_categories();
        Ok(DeleteOutcome::Deleted)
    }

    /// Marks `id` as the edit target and returns a form seeded from it.
    pub fn begin_edit(&mut self, id: TodoId) -> Result<TodoForm, ControllerError> {
        let todo = self.get(id).cloned().ok_or(ControllerError::UnknownTodo(id))?;
        let form = TodoForm::seeded(&todo);
        self.editing = Some(todo);
        Ok(form)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn set_filter(&mut self, filter: ViewFilter) {
        self.filter = filter;
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.status = status;
    }

    pub fn set_category_filter(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    pub fn set_priority_filter(&mut self, priority: Option<Priority>) {
        self.filter.priority = priority;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
    }

    /// The filtered, sorted view of the loaded list.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        view::visible(&self.todos, &self.filter)
    }

    pub fn counts(&self, today: NaiveDate) -> Counts {
        Counts::of(&self.todos, today)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
        if let Err(e) = self.prefs.save_dark_mode(enabled) {
            warn!(error = %e, "could not persist dark mode preference");
        }
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.set_dark_mode(!self.dark_mode);
        self.dark_mode
    }

    fn refresh_categories(&mut self) {
        match self.service.list_categories() {
            Ok(categories) => self.categories = categories,
            Err(e) => error!(error = %e, "error loading categories"),
        }
    }

    /// Swaps in the backend's copy of a todo; returns its index.
    fn replace(&mut self, todo: Todo) -> usize {
        match self.todos.iter().position(|t| t.id == todo.id) {
            Some(index) => {
                self.todos[index] = todo;
                index
            }
            None => {
                self.todos.push(todo);
                self.todos.len() - 1
            }
        }
    }
}

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use assert_matches::assert_matches;
    use chrono::NaiveDateTime;

    use super::*;
    use crate::client::TodoClient;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::prefs::MemoryPreferences;

    const BASE: &str = "http://backend.test/api/todos";

    /// In-process stand-in for the REST backend.
    #[derive(Default)]
    struct FakeBackend {
        todos: RefCell<Vec<Todo>>,
        next_id: Cell<TodoId>,
        down: Cell<bool>,
        reject_writes: Cell<bool>,
        requests: RefCell<Vec<HttpRequest>>,
    }

    impl FakeBackend {
        fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        fn seed(&self, fields: TodoFields) -> TodoId {
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            self.todos.borrow_mut().push(materialize(id, fields));
            id
        }
    }

    fn materialize(id: TodoId, f: TodoFields) -> Todo {
        let created_at: NaiveDateTime = "2025-01-01T09:00:00".parse().unwrap();
        Todo {
            id,
            title: f.title,
            description: f.description,
            completed: f.completed,
            priority: f.priority,
            category: f.category,
            due_date: f.due_date,
            created_at: created_at + chrono::Duration::minutes(id),
        }
    }

    fn parse_id(id: &str) -> Option<TodoId> {
        id.parse().ok()
    }

    fn json<B: serde::Serialize>(status: u16, body: &B) -> HttpResponse {
        HttpResponse::new(status, serde_json::to_string(body).unwrap())
    }

    impl Transport for FakeBackend {
        fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.borrow_mut().push(req.clone());
            if self.down.get() {
                return Err(ApiError::Transport("connection refused".into()));
            }
            if self.reject_writes.get() && req.method != HttpMethod::Get {
                return Ok(HttpResponse::new(500, "boom"));
            }

            let path = req.path.strip_prefix(BASE).unwrap_or(&req.path);
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            let mut todos = self.todos.borrow_mut();

            let response = match (req.method, segments.as_slice()) {
                (HttpMethod::Get, []) => json(200, &*todos),
                (HttpMethod::Get, ["categories"]) => {
                    let mut cats: Vec<String> =
                        todos.iter().filter_map(|t| t.category.clone()).collect();
                    cats.sort();
                    cats.dedup();
                    json(200, &cats)
                }
                (HttpMethod::Post, []) => {
                    let fields: TodoFields =
                        serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                    let id = self.next_id.get() + 1;
                    self.next_id.set(id);
                    let todo = materialize(id, fields);
                    todos.push(todo.clone());
                    json(201, &todo)
                }
                (HttpMethod::Put, [id]) => {
                    let fields: TodoFields =
                        serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                    match todos.iter_mut().find(|t| Some(t.id) == parse_id(id)) {
                        Some(t) => {
                            *t = Todo {
                                created_at: t.created_at,
                                ..materialize(t.id, fields)
                            };
                            json(200, &*t)
                        }
                        None => HttpResponse::new(404, ""),
                    }
                }
                (HttpMethod::Patch, [id, "toggle"]) => {
                    match todos.iter_mut().find(|t| Some(t.id) == parse_id(id)) {
                        Some(t) => {
                            t.completed = !t.completed;
                            json(200, &*t)
                        }
                        None => HttpResponse::new(404, ""),
                    }
                }
                (HttpMethod::Delete, [id]) => {
                    let before = todos.len();
                    todos.retain(|t| Some(t.id) != parse_id(id));
                    if todos.len() < before {
                        HttpResponse::new(204, "")
                    } else {
                        HttpResponse::new(404, "")
                    }
                }
                _ => HttpResponse::new(404, ""),
            };
            Ok(response)
        }
    }

    fn controller(backend: &FakeBackend) -> Controller<&FakeBackend, MemoryPreferences> {
        Controller::new(
            TodoService::new(TodoClient::new(BASE), backend),
            MemoryPreferences::default(),
        )
    }

    fn visible_ids<T: Transport, P: PreferenceStore>(c: &Controller<T, P>) -> Vec<TodoId> {
        c.visible_todos().iter().map(|t| t.id).collect()
    }

    #[test]
    fn create_toggle_delete_moves_through_views() {
        let backend = FakeBackend::default();
        let mut c = controller(&backend);
        c.load().unwrap();

        let mut form = TodoForm::new();
        form.title = "Buy milk".into();
        form.priority = Priority::High;
        form.category = "Errands".into();
        let id = c.submit_form(&mut form).unwrap().id;
        assert_eq!(c.categories(), ["Errands".to_string()]);

        c.set_status_filter(StatusFilter::All);
        assert_eq!(visible_ids(&c), vec![id]);
        c.set_status_filter(StatusFilter::Active);
        assert_eq!(visible_ids(&c), vec![id]);
        c.set_status_filter(StatusFilter::Completed);
        assert!(visible_ids(&c).is_empty());

        assert!(c.toggle(id).unwrap().completed);
        assert_eq!(visible_ids(&c), vec![id]);
        c.set_status_filter(StatusFilter::Active);
        assert!(visible_ids(&c).is_empty());

        let outcome = c.delete(id, |_| true).unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        for status in [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed] {
            c.set_status_filter(status);
            assert!(visible_ids(&c).is_empty());
        }
        assert!(c.categories().is_empty());
    }

    #[test]
    fn empty_title_never_reaches_backend() {
        let backend = FakeBackend::default();
        backend.seed(TodoFields::new("Existing"));
        let mut c = controller(&backend);
        c.load().unwrap();
        let before = backend.request_count();

        let mut form = TodoForm::new();
        form.title = "   ".into();
        let err = c.submit_form(&mut form).unwrap_err();

        assert_matches!(err, ControllerError::Validation(FormError::EmptyTitle));
        assert_eq!(err.to_string(), "Please enter a title");
        assert_eq!(backend.request_count(), before);
        assert_eq!(c.todos().len(), 1);
    }

    #[test]
    fn failed_load_leaves_empty_list_and_reports_backend() {
        let backend = FakeBackend::default();
        backend.down.set(true);
        let mut c = controller(&backend);

        let err = c.load().unwrap_err();
        assert!(!c.is_loading());
        assert!(c.todos().is_empty());
        assert_matches!(err.api_error(), Some(ApiError::Transport(_)));
        assert_eq!(
            err.to_string(),
            format!("Failed to load todos. Make sure the backend is running on {BASE}")
        );
    }

    #[test]
    fn load_fetches_todos_then_categories() {
        let backend = FakeBackend::default();
        let mut fields = TodoFields::new("a");
        fields.category = Some("Work".into());
        backend.seed(fields);
        let mut c = controller(&backend);
        c.load().unwrap();

        let paths: Vec<String> = backend.requests.borrow().iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, vec![BASE.to_string(), format!("{BASE}/categories")]);
        assert_eq!(c.categories(), ["Work".to_string()]);
    }

    #[test]
    fn update_keeps_completion_and_clears_edit_target() {
        let backend = FakeBackend::default();
        let mut done = TodoFields::new("Done already");
        done.completed = true;
        let id = backend.seed(done);
        let mut c = controller(&backend);
        c.load().unwrap();

        let mut form = c.begin_edit(id).unwrap();
        assert_eq!(c.editing().map(|t| t.id), Some(id));
        form.title = "Renamed".into();
        let mut fields = form.submit().unwrap();
        fields.completed = false;

        let saved = c.save(fields).unwrap();
        assert_eq!(saved.title, "Renamed");
        assert!(saved.completed);
        assert!(c.editing().is_none());
        assert_eq!(c.todos().len(), 1);
    }

    #[test]
    fn failed_save_leaves_state_untouched() {
        let backend = FakeBackend::default();
        let id = backend.seed(TodoFields::new("Keep"));
        let mut c = controller(&backend);
        c.load().unwrap();
        c.begin_edit(id).unwrap();
        backend.reject_writes.set(true);

        let err = c.save(TodoFields::new("Changed")).unwrap_err();
        assert_matches!(err, ControllerError::Save(ApiError::HttpError { status: 500, .. }));
        assert_eq!(c.get(id).unwrap().title, "Keep");
        assert_eq!(c.editing().map(|t| t.id), Some(id));
    }

    #[test]
    fn failed_toggle_reports_update() {
        let backend = FakeBackend::default();
        let id = backend.seed(TodoFields::new("x"));
        let mut c = controller(&backend);
        c.load().unwrap();
        backend.reject_writes.set(true);

        let err = c.toggle(id).unwrap_err();
        assert_eq!(err.to_string(), "Failed to update todo");
        assert!(!c.get(id).unwrap().completed);
    }

    #[test]
    fn declined_delete_sends_nothing() {
        let backend = FakeBackend::default();
        let id = backend.seed(TodoFields::new("x"));
        let mut c = controller(&backend);
        c.load().unwrap();
        let before = backend.request_count();

        let mut asked = None;
        let outcome = c
            .delete(id, |todo| {
                asked = Some(todo.title.clone());
                false
            })
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(asked.as_deref(), Some("x"));
        assert_eq!(backend.request_count(), before);
        assert_eq!(c.todos().len(), 1);
    }

    #[test]
    fn failed_delete_keeps_entry() {
        let backend = FakeBackend::default();
        let id = backend.seed(TodoFields::new("x"));
        let mut c = controller(&backend);
        c.load().unwrap();
        backend.reject_writes.set(true);

        let err = c.delete(id, |_| true).unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete todo");
        assert!(c.get(id).is_some());
    }

    #[test]
    fn unknown_ids_are_rejected_locally() {
        let backend = FakeBackend::default();
        let mut c = controller(&backend);
        assert_matches!(c.begin_edit(99), Err(ControllerError::UnknownTodo(99)));
        assert_matches!(c.delete(99, |_| true), Err(ControllerError::UnknownTodo(99)));
        assert_eq!(backend.request_count(), 0);
    }

    #[test]
    fn cancel_edit_clears_target() {
        let backend = FakeBackend::default();
        let id = backend.seed(TodoFields::new("x"));
        let mut c = controller(&backend);
        c.load().unwrap();
        c.begin_edit(id).unwrap();
        c.cancel_edit();
        assert!(c.editing().is_none());
    }

    #[test]
    fn dark_mode_defaults_on_and_persists_changes() {
        let backend = FakeBackend::default();
        let mut c = controller(&backend);
        assert!(c.dark_mode());
        assert!(!c.toggle_dark_mode());
        assert_eq!(c.prefs.load_dark_mode(), Some(false));
        assert_eq!(c.prefs.writes, 1);

        let stored = Controller::new(
            TodoService::new(TodoClient::new(BASE), &backend),
            MemoryPreferences::with_dark_mode(false),
        );
        assert!(!stored.dark_mode());
    }

    #[test]
    fn counts_use_given_day() {
        let backend = FakeBackend::default();
        let mut late = TodoFields::new("late");
        late.due_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        backend.seed(late);
        let mut c = controller(&backend);
        c.load().unwrap();
        let counts = c.counts(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(counts.overdue, 1);
        assert_eq!(counts.active, 1);
    }
}
