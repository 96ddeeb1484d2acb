//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each backend operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (or [`crate::TodoService`]) executes the actual
//! HTTP round-trip, keeping the core deterministic and free of I/O.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Priority, Todo, TodoFields, TodoId};

/// Collection endpoint of a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/todos";

/// Synchronous, stateless client for the todo API.
///
/// `base_url` is the collection URL itself (for example
/// `http://localhost:8080/api/todos`); every path is derived from it.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- build ---

    pub fn build_list_all(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.base_url.clone())
    }

    pub fn build_get_by_id(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/{id}", self.base_url))
    }

    pub fn build_create(&self, fields: &TodoFields) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, self.base_url.clone(), fields)
    }

    pub fn build_update(&self, id: TodoId, fields: &TodoFields) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, format!("{}/{id}", self.base_url), fields)
    }

    pub fn build_delete(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{}/{id}", self.base_url))
    }

    pub fn build_toggle_completed(&self, id: TodoId) -> HttpRequest {
        self.request(HttpMethod::Patch, format!("{}/{id}/toggle", self.base_url))
    }

    pub fn build_search(&self, term: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            format!("{}/search?q={}", self.base_url, encode_component(term)),
        )
    }

    pub fn build_list_by_category(&self, category: &str) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            format!("{}/category/{}", self.base_url, encode_component(category)),
        )
    }

    pub fn build_list_by_priority(&self, priority: Priority) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/priority/{priority}", self.base_url))
    }

    pub fn build_list_overdue(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/overdue", self.base_url))
    }

    pub fn build_list_categories(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/categories", self.base_url))
    }

    pub fn build_list_completed(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/completed", self.base_url))
    }

    pub fn build_list_incomplete(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/incomplete", self.base_url))
    }

    // --- parse ---

    /// Parses any response whose body is an array of todos (list, search,
    /// category, priority, overdue, completed, incomplete).
    pub fn parse_todo_list(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, &[200])
    }

    pub fn parse_get_by_id(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, &[200])
    }

    /// The backend answers 201; 200 is accepted for proxies that
    /// normalize creation responses.
    pub fn parse_create(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, &[201, 200])
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, &[200])
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[204, 200])
    }

    pub fn parse_toggle_completed(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, &[200])
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<String>, ApiError> {
        parse_json(response, &[200])
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: &[u16]) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
