//! Error type shared by every operation in the crate.
//!
//! # Design
//! Transport failures keep the original error as their source so callers can
//! downcast to the concrete client error. HTTP failures only carry the status
//! line; the response body is dropped before the error is raised.

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`Client`](crate::Client) operations and the building
/// blocks they are made of.
#[derive(Debug, Error)]
pub enum RoiError {
    /// The endpoint is not an absolute URI or has no host.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The endpoint scheme is neither `http` nor `https`.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// No response was received (DNS failure, refused or reset connection).
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),

    /// The server answered with a status of 400 or above.
    #[error("[{status}] - {status_message}")]
    Http { status: u16, status_message: String },

    /// The call chain saw more redirects than the configured budget.
    #[error("Maximum redirects reached.")]
    RedirectExhausted { max: u32 },

    /// A 3xx response without a `Location` header.
    #[error("redirect response {status} has no Location header")]
    MissingLocation { status: u16 },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local file access or body streaming failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
