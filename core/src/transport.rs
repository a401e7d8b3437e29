//! The transport seam the accessor is written against.
//!
//! # Design
//! `Transport` is verb-scoped: the accessor hands it a fully formed path
//! (query string included) and, for `post`/`patch`, a body. Whatever error
//! type the transport chooses is what the accessor's callers see.
//!
//! `HttpTransport` is the stock implementation. It turns each call into a
//! plain-data `HttpRequest`, lets an `Exchange` move the bytes, and decodes
//! the `HttpResponse`, so the same request/response types serve both the
//! async accessor and the synchronous `TodoClient`.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Four-verb HTTP client the accessor delegates to.
pub trait Transport: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get<R>(&self, path: &str) -> impl Future<Output = Result<R, Self::Error>> + Send
    where
        R: DeserializeOwned;

    fn post<B, R>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<R, Self::Error>> + Send
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned;

    fn patch<B, R>(
        &self,
        path: &str,
        body: &B,
    ) -> impl Future<Output = Result<R, Self::Error>> + Send
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned;

    /// Resolves to `()`: the acknowledgment body carries no typed payload.
    fn delete(&self, path: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Executes one HTTP round-trip.
pub trait Exchange: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}

/// `Transport` built from a base URL and an `Exchange`.
#[derive(Debug, Clone)]
pub struct HttpTransport<X> {
    base_url: String,
    exchange: X,
}

impl<X: Exchange> HttpTransport<X> {
    pub fn new(base_url: &str, exchange: X) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            exchange,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn round_trip(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError<X::Error>> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.exchange.execute(request).await.map_err(TransportError::Network)?;
        if !response.is_success() {
            tracing::debug!(status = response.status, "request rejected");
        }
        Ok(response.error_for_status()?)
    }
}

impl<X: Exchange> Transport for HttpTransport<X> {
    type Error = TransportError<X::Error>;

    async fn get<R>(&self, path: &str) -> Result<R, Self::Error>
    where
        R: DeserializeOwned,
    {
        let request = HttpRequest::empty(HttpMethod::Get, self.url(path));
        Ok(self.round_trip(request).await?.json()?)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Self::Error>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::json(HttpMethod::Post, self.url(path), body)?;
        Ok(self.round_trip(request).await?.json()?)
    }

    async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, Self::Error>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let request = HttpRequest::json(HttpMethod::Patch, self.url(path), body)?;
        Ok(self.round_trip(request).await?.json()?)
    }

    async fn delete(&self, path: &str) -> Result<(), Self::Error> {
        let request = HttpRequest::empty(HttpMethod::Delete, self.url(path));
        self.round_trip(request).await.map(|_| ())
    }
}
