//! Stateless HTTP request builder and response parser for the todos API.
//!
//! # Design
//! `TodoClient` holds only a `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! this side deterministic and free of I/O.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::routes;
use crate::types::{NewTodo, Todo, TodoId, TodoPatch, UserId};

/// Synchronous, stateless client for the todos API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    config: ClientConfig,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn owner(&self) -> UserId {
        self.config.owner()
    }

    pub fn build_get_todos(&self) -> HttpRequest {
        let url = self.config.url(&routes::owned_todos(self.config.owner()));
        HttpRequest::empty(HttpMethod::Get, url)
    }

    pub fn build_post_todo(&self, todo: &NewTodo) -> Result<HttpRequest, ApiError> {
        HttpRequest::json(HttpMethod::Post, self.config.url(routes::TODOS), todo)
    }

    pub fn build_delete_todo(&self, id: TodoId) -> HttpRequest {
        HttpRequest::empty(HttpMethod::Delete, self.config.url(&routes::todo(id)))
    }

    pub fn build_patch_todo(&self, patch: &TodoPatch, id: TodoId) -> Result<HttpRequest, ApiError> {
        HttpRequest::json(HttpMethod::Patch, self.config.url(&routes::todo(id)), patch)
    }

    pub fn parse_get_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        response.json()
    }

    pub fn parse_post_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        response.json()
    }

    /// The acknowledgment body is not typed, so only the status is checked.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        response.error_for_status().map(|_| ())
    }

    pub fn parse_patch_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_todos_is_scoped_to_owner() {
        let req = client().build_get_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/todos?userId=1606");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_todos_uses_configured_owner() {
        let client = TodoClient::with_config(ClientConfig::new("http://api").with_owner(12));
        assert_eq!(client.build_get_todos().url, "http://api/todos?userId=12");
    }

    #[test]
    fn build_post_todo_produces_correct_request() {
        let req = client().build_post_todo(&NewTodo::new(1606, "Buy milk")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["userId"], 1606);
        assert_eq!(body["completed"], false);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_patch_todo_sends_only_given_fields() {
        let req = client().build_patch_todo(&TodoPatch::title("Updated"), 42).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.url, "http://localhost:3000/todos/42");
        assert_eq!(req.body.as_deref(), Some(r#"{"title":"Updated"}"#));
    }

    #[test]
    fn build_patch_todo_allows_empty_patch() {
        let req = client().build_patch_todo(&TodoPatch::default(), 3).unwrap();
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn build_delete_todo_has_no_body() {
        let req = client().build_delete_todo(42);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/todos/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_get_todos_success() {
        let body = r#"[{"id":1,"userId":1606,"title":"x","completed":false}]"#;
        let todos = client().parse_get_todos(response(200, body)).unwrap();
        assert_eq!(
            todos,
            vec![Todo {
                id: 1,
                user_id: Some(1606),
                title: Some("x".to_string()),
                completed: Some(false),
                ..Todo::default()
            }]
        );
    }

    #[test]
    fn parse_get_todos_keeps_server_order() {
        let body = r#"[
            {"id":9,"userId":1606,"title":"b","completed":true},
            {"id":2,"userId":1606,"title":"a","completed":false}
        ]"#;
        let todos = client().parse_get_todos(response(200, body)).unwrap();
        let ids: Vec<TodoId> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 2]);
    }

    #[test]
    fn parse_get_todos_bad_json() {
        let err = client().parse_get_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_post_todo_success() {
        let body = r#"{"id":42,"userId":1606,"title":"y","completed":false}"#;
        let todo = client().parse_post_todo(response(201, body)).unwrap();
        assert_eq!(todo.id, 42);
        assert_eq!(todo.title.as_deref(), Some("y"));
    }

    #[test]
    fn parse_post_todo_wrong_status() {
        let err = client().parse_post_todo(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_patch_todo_success() {
        let body = r#"{"id":42,"userId":1606,"title":"y","completed":true}"#;
        let todo = client().parse_patch_todo(response(200, body)).unwrap();
        assert_eq!(todo.completed, Some(true));
    }

    #[test]
    fn parse_patch_todo_keeps_unknown_fields() {
        let body =
            r#"{"id":42,"userId":1606,"title":"y","completed":true,"createdAt":"2024-05-01"}"#;
        let todo = client().parse_patch_todo(response(200, body)).unwrap();
        assert_eq!(todo.extra["createdAt"], "2024-05-01");

        let echoed = serde_json::to_value(&todo).unwrap();
        let wire: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(echoed, wire);
    }

    #[test]
    fn parse_patch_todo_accepts_partial_body() {
        let body = r#"{"id":42,"completed":true}"#;
        let todo = client().parse_patch_todo(response(200, body)).unwrap();
        assert_eq!(todo.id, 42);
        assert_eq!(todo.completed, Some(true));
        assert!(todo.user_id.is_none());
        assert!(todo.title.is_none());
    }

    #[test]
    fn build_post_todo_forwards_extra_fields() {
        let mut input = NewTodo::new(1606, "y");
        input.extra.insert("priority", serde_json::json!(2));
        let req = client().build_post_todo(&input).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"userId": 1606, "title": "y", "completed": false, "priority": 2})
        );
    }

    #[test]
    fn parse_delete_todo_ignores_body() {
        assert!(client().parse_delete_todo(response(204, "")).is_ok());
        assert!(client().parse_delete_todo(response(200, "1")).is_ok());
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let err = client().parse_delete_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }
}
