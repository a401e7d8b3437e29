//! Domain DTOs for the todos resource.
//!
//! # Design
//! Keys are camelCase on the wire (`userId`). Only `id` is interpreted by the
//! client; every other field is forwarded as given. Fields beyond the known
//! ones travel in `extra`, so whatever the server returns reaches the caller
//! and whatever the caller sets reaches the server.
//!
//! `NewTodo` has no `id` field, and its `extra` bag drops an `id` key both
//! when built and when serialized, so a creation body can never carry one.
//! `TodoPatch` skips every absent field, which keeps a PATCH body exactly
//! what the caller set.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Server-assigned identity of a todo.
pub type TodoId = u64;

/// Owner identifier used to scope list queries.
pub type UserId = u64;

/// Fields the client does not model, keyed as on the wire.
pub type Extra = Map<String, Value>;

/// A todo as the server returned it. Fields the server omitted stay `None`
/// and are not re-serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Request payload for creating a todo. The server assigns the `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: CreationFields,
}

impl NewTodo {
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            completed: false,
            extra: CreationFields::default(),
        }
    }
}

/// Partial update payload. Only the fields that are `Some`, plus `extra`,
/// are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.user_id.is_none()
            && self.title.is_none()
            && self.completed.is_none()
            && self.extra.is_empty()
    }
}

/// Extra fields of a `NewTodo`. Never holds an `id` key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationFields(Extra);

impl CreationFields {
    /// Add a field. An `id` key is refused and `false` is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if key == "id" {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for CreationFields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut fields = Self::default();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl Serialize for CreationFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().filter(|(key, _)| key.as_str() != "id"))
    }
}

impl<'de> Deserialize<'de> for CreationFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Extra::deserialize(deserializer)?.into_iter().collect())
    }
}
