//! Paths of the `todos` collection, relative to the API base URL.

use crate::types::{TodoId, UserId};

/// The collection itself, used for creation.
pub const TODOS: &str = "/todos";

/// The collection scoped to one owner.
pub fn owned_todos(owner: UserId) -> String {
    format!("{TODOS}?userId={owner}")
}

/// A single todo addressed by id.
pub fn todo(id: TodoId) -> String {
    format!("{TODOS}/{id}")
}
