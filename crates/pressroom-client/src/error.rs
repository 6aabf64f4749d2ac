//! Error types for the Pressroom client.

use pressroom_common::error::{Resource, ValidationError};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was missing. Raised before any request is sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The resource does not exist: either nothing to look up, or the backend
    /// answered 404 to a lookup.
    #[error("{resource} is not found.")]
    NotFound { resource: Resource },

    /// The operation needs a session token and none is available. Raised
    /// before any request is sent.
    #[error("{resource} is not signed in.")]
    Unauthorized { resource: Resource },

    /// The backend rejected the request and explained why. `payload` is the
    /// body's `error` field, untouched.
    #[error("API error {status}: {payload}")]
    Server { status: u16, payload: Value },

    /// An error from the underlying HTTP client, including non-2xx responses
    /// without an `error` body.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success body did not have the expected shape.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Field name of a failed precondition.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            Self::Validation(v) => v.field(),
            _ => None,
        }
    }

    /// Lookups report a 404 as the resource being absent. Every other failure
    /// keeps its own shape.
    pub(crate) fn not_found_on_404(self, resource: Resource) -> Self {
        if self.status() == Some(404) {
            Self::NotFound { resource }
        } else {
            self
        }
    }
}
