//! The todos resource accessor.
//!
//! Four operations, each a single request through the transport. Nothing is
//! cached, retried, validated or translated: a failure from the transport is
//! returned to the caller as the same value.

use tracing::instrument;

use crate::config::{ClientConfig, OWNER_ID};
use crate::net::ReqwestExchange;
use crate::routes;
use crate::transport::{HttpTransport, Transport};
use crate::types::{NewTodo, Todo, TodoId, TodoPatch, UserId};

/// Typed access to the `todos` collection of one owner.
#[derive(Debug, Clone)]
pub struct TodosApi<T> {
    transport: T,
    owner: UserId,
}

impl TodosApi<HttpTransport<ReqwestExchange>> {
    /// Accessor over HTTP sharing `client`'s connection pool and settings.
    pub fn over_http(config: &ClientConfig, client: reqwest::Client) -> Self {
        let transport = HttpTransport::new(config.base_url(), ReqwestExchange::with_client(client));
        Self::with_owner(transport, config.owner())
    }
}

impl<T: Transport> TodosApi<T> {
    /// Accessor scoped to [`OWNER_ID`].
    pub fn new(transport: T) -> Self {
        Self::with_owner(transport, OWNER_ID)
    }

    pub fn with_owner(transport: T, owner: UserId) -> Self {
        Self { transport, owner }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `GET /todos?userId=<owner>`. Order is whatever the server returned.
    #[instrument(level = "debug", skip(self), fields(owner = self.owner))]
    pub async fn get_todos(&self) -> Result<Vec<Todo>, T::Error> {
        self.transport.get(&routes::owned_todos(self.owner)).await
    }

    /// `POST /todos`. The returned todo carries the server-assigned id.
    #[instrument(level = "debug", skip_all)]
    pub async fn post_todo(&self, todo: &NewTodo) -> Result<Todo, T::Error> {
        self.transport.post(routes::TODOS, todo).await
    }

    /// `DELETE /todos/<id>`.
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), T::Error> {
        self.transport.delete(&routes::todo(id)).await
    }

    /// `PATCH /todos/<id>` with exactly the fields set in `patch`.
    #[instrument(level = "debug", skip(self, patch))]
    pub async fn patch_todo(&self, patch: &TodoPatch, id: TodoId) -> Result<Todo, T::Error> {
        self.transport.patch(&routes::todo(id), patch).await
    }
}
