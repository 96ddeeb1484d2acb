//! Remote todo service: one method per backend operation.
//!
//! Each method builds a request with [`TodoClient`], hands it to the
//! transport exactly once and parses the response. Nothing is retried,
//! cached or coalesced between calls.

use tracing::debug;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Priority, Todo, TodoFields, TodoId};

#[derive(Debug, Clone)]
pub struct TodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_all(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_all())?;
        self.client.parse_todo_list(response)
    }

    pub fn get_by_id(&self, id: TodoId) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_get_by_id(id))?;
        self.client.parse_get_by_id(response)
    }

    pub fn create(&self, fields: &TodoFields) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_create(fields)?)?;
        self.client.parse_create(response)
    }

    pub fn update(&self, id: TodoId, fields: &TodoFields) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_update(id, fields)?)?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, id: TodoId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete(id))?;
        self.client.parse_delete(response)
    }

    pub fn toggle_completed(&self, id: TodoId) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_toggle_completed(id))?;
        self.client.parse_toggle_completed(response)
    }

    pub fn search(&self, term: &str) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_search(term))?;
        self.client.parse_todo_list(response)
    }

    pub fn list_by_category(&self, category: &str) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_by_category(category))?;
        self.client.parse_todo_list(response)
    }

    pub fn list_by_priority(&self, priority: Priority) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_by_priority(priority))?;
        self.client.parse_todo_list(response)
    }

    pub fn list_overdue(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_overdue())?;
        self.client.parse_todo_list(response)
    }

    pub fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        let response = self.send(self.client.build_list_categories())?;
        self.client.parse_list_categories(response)
    }

    pub fn list_completed(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_completed())?;
        self.client.parse_todo_list(response)
    }

    pub fn list_incomplete(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(self.client.build_list_incomplete())?;
        self.client.parse_todo_list(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
