//! In-memory stand-in for the todo REST backend.
//!
//! Serves the same routes, status codes and JSON shapes as the real service
//! under `/api/todos`, so the client can be exercised end to end without it.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const BASE_PATH: &str = "/api/todos";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// Body of POST and PUT. PUT replaces every field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    pub category: Option<String>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Default)]
pub struct Store {
    todos: BTreeMap<i64, Todo>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(BASE_PATH, get(list_todos).post(create_todo))
        .route(
            &format!("{BASE_PATH}/{{id}}"),
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route(&format!("{BASE_PATH}/{{id}}/toggle"), patch(toggle_todo))
        .route(&format!("{BASE_PATH}/search"), get(search_todos))
        .route(&format!("{BASE_PATH}/category/{{category}}"), get(todos_by_category))
        .route(&format!("{BASE_PATH}/priority/{{priority}}"), get(todos_by_priority))
        .route(&format!("{BASE_PATH}/overdue"), get(overdue_todos))
        .route(&format!("{BASE_PATH}/categories"), get(list_categories))
        .route(&format!("{BASE_PATH}/completed"), get(completed_todos))
        .route(&format!("{BASE_PATH}/incomplete"), get(incomplete_todos))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn select(db: &Db, keep: impl Fn(&Todo) -> bool) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().filter(|t| keep(t)).cloned().collect())
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    select(&db, |_| true).await
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    if input.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let todo = Todo {
        id: store.next_id,
        title: input.title,
        description: input.description,
        completed: input.completed,
        priority: input.priority,
        category: input.category,
        due_date: input.due_date,
        created_at: Local::now().naive_local(),
    };
    store.todos.insert(todo.id, todo.clone());
    info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    if input.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.title = input.title;
    todo.description = input.description;
    todo.completed = input.completed;
    todo.priority = input.priority;
    todo.category = input.category;
    todo.due_date = input.due_date;
    Ok(Json(todo.clone()))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| {
            info!(id, "deleted todo");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn toggle_todo(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.completed = !todo.completed;
    Ok(Json(todo.clone()))
}

async fn search_todos(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Todo>> {
    let needle = params.q.to_lowercase();
    select(&db, |t| t.title.to_lowercase().contains(&needle)).await
}

async fn todos_by_category(
    State(db): State<Db>,
    Path(category): Path<String>,
) -> Json<Vec<Todo>> {
    select(&db, |t| t.category.as_deref() == Some(category.as_str())).await
}

async fn todos_by_priority(
    State(db): State<Db>,
    Path(priority): Path<Priority>,
) -> Json<Vec<Todo>> {
    select(&db, |t| t.priority == priority).await
}

async fn overdue_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let today = Local::now().date_naive();
    select(&db, |t| !t.completed && t.due_date.is_some_and(|d| d < today)).await
}

async fn completed_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    select(&db, |t| t.completed).await
}

async fn incomplete_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    select(&db, |t| !t.completed).await
}

/// Distinct, non-empty categories in ascending order.
async fn list_categories(State(db): State<Db>) -> Json<Vec<String>> {
    let store = db.read().await;
    let mut categories: Vec<String> = store
        .todos
        .values()
        .filter_map(|t| t.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    Json(categories)
}
