//! Typed client for a REST `todos` collection.
//!
//! # Overview
//! [`TodosApi`] exposes the four operations the UI needs (`get_todos`,
//! `post_todo`, `delete_todo`, `patch_todo`) on top of any [`Transport`].
//! [`TodoClient`] offers the same requests in host-does-IO form: it builds
//! [`HttpRequest`] values and parses [`HttpResponse`] values, leaving the
//! round-trip to the caller (the FFI crate relies on this).
//!
//! # Design
//! - Every list query is scoped to one owner, [`OWNER_ID`] unless a
//!   [`ClientConfig`] says otherwise.
//! - Neither client holds mutable state; concurrent calls are independent.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod net;
pub mod routes;
pub mod transport;
pub mod types;

pub use api::TodosApi;
pub use client::TodoClient;
pub use config::{ClientConfig, OWNER_ID};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use net::ReqwestExchange;
pub use transport::{Exchange, HttpTransport, Transport};
pub use types::{CreationFields, Extra, NewTodo, Todo, TodoId, TodoPatch, UserId};
