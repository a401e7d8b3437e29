//! Error types for the todos client.
//!
//! # Design
//! `ApiError` covers everything that can go wrong while encoding a request
//! or decoding a response. `NotFound` gets a dedicated variant because callers
//! frequently distinguish "the todo does not exist" from "the server returned
//! an unexpected status." `TransportError` adds the I/O failure of whatever
//! `Exchange` actually moved the bytes.
//!
//! The accessor in [`crate::api`] never constructs or maps these; it returns
//! whatever error its transport produced.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `HttpTransport`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Rejection produced by `HttpTransport`.
#[derive(Debug, Error)]
pub enum TransportError<E> {
    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(#[source] E),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl<E> TransportError<E> {
    /// HTTP status of the rejection, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Api(ApiError::NotFound) => Some(404),
            TransportError::Api(ApiError::HttpError { status, .. }) => Some(*status),
            _ => None,
        }
    }
}
