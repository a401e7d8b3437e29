//! In-memory stand-in for the todos REST API.
//!
//! Serves `GET /todos[?userId=N]`, `POST /todos`, `PATCH /todos/{id}` and
//! `DELETE /todos/{id}`. Ids are assigned from a counter starting at 1 and the
//! collection is listed in id order.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub type TodoId = u64;
pub type UserId = u64;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: String,
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Fields absent from the body are left untouched. An `id` in the body is
/// accepted but never re-keys the record.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub id: Option<TodoId>,
    pub user_id: Option<UserId>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerQuery {
    pub user_id: Option<UserId>,
}

/// `next_id` is `None` once `u64::MAX` has been handed out.
#[derive(Debug)]
pub struct Store {
    next_id: Option<TodoId>,
    todos: BTreeMap<TodoId, Todo>,
}

impl Default for Store {
    fn default() -> Self {
        Self { next_id: Some(1), todos: BTreeMap::new() }
    }
}

impl Store {
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        let todos: BTreeMap<TodoId, Todo> = todos.into_iter().map(|t| (t.id, t)).collect();
        let next_id = match todos.keys().next_back() {
            Some(last) => last.checked_add(1),
            None => Some(1),
        };
        Self { next_id, todos }
    }

    fn assign_id(&mut self) -> Option<TodoId> {
        let id = self.next_id?.max(1);
        self.next_id = id.checked_add(1);
        Some(id)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router preloaded with `todos`; new ids continue after the highest one.
pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_todos(todos)));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

/// Serve a store preloaded with `todos`.
pub async fn run_with(listener: TcpListener, todos: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(todos)).await
}

async fn list_todos(State(db): State<Db>, Query(query): Query<OwnerQuery>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    let todos = store
        .todos
        .values()
        .filter(|todo| query.user_id.is_none_or(|owner| todo.user_id == owner))
        .cloned()
        .collect();
    Json(todos)
}

/// Answers 507 once the id space is used up.
async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), StatusCode> {
    let mut store = db.write().await;
    let Some(id) = store.assign_id() else {
        tracing::warn!("todo ids exhausted");
        return Err(StatusCode::INSUFFICIENT_STORAGE);
    };
    let todo = Todo {
        id,
        user_id: input.user_id,
        title: input.title,
        completed: input.completed,
    };
    store.todos.insert(todo.id, todo.clone());
    tracing::info!(id = todo.id, user_id = todo.user_id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
    Json(input): Json<TodoPatch>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(user_id) = input.user_id {
        todo.user_id = user_id;
    }
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    tracing::info!(id, "todo updated");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store.todos.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: TodoId, user_id: UserId) -> Todo {
        Todo {
            id,
            user_id,
            title: format!("todo {id}"),
            completed: false,
        }
    }

    #[test]
    fn todo_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(todo(1, 1606)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["userId"], 1606);
        assert_eq!(json["title"], "todo 1");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn new_todo_defaults_completed_to_false() {
        let input: NewTodo = serde_json::from_str(r#"{"userId":1606,"title":"No flag"}"#).unwrap();
        assert_eq!(input.title, "No flag");
        assert!(!input.completed);
    }

    #[test]
    fn new_todo_rejects_missing_title() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"userId":1606}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_fields_all_optional() {
        let input: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(input.id.is_none());
        assert!(input.user_id.is_none());
        assert!(input.title.is_none());
        assert!(input.completed.is_none());
    }

    #[test]
    fn ids_start_at_one() {
        let mut store = Store::default();
        assert_eq!(store.assign_id(), Some(1));
        assert_eq!(store.assign_id(), Some(2));
    }

    #[test]
    fn seeded_store_continues_after_highest_id() {
        let mut store = Store::with_todos([todo(3, 1), todo(10, 1)]);
        assert_eq!(store.assign_id(), Some(11));
    }

    #[test]
    fn last_id_is_handed_out_once() {
        let mut store = Store::with_todos([todo(u64::MAX - 1, 1)]);
        assert_eq!(store.assign_id(), Some(u64::MAX));
        assert_eq!(store.assign_id(), None);
        assert_eq!(store.assign_id(), None);
    }

    #[test]
    fn store_seeded_at_max_id_has_no_ids_left() {
        let mut store = Store::with_todos([todo(u64::MAX, 1)]);
        assert_eq!(store.assign_id(), None);
        assert_eq!(store.todos.len(), 1);
    }
}
