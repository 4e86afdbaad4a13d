//! Error types for the habit API client.
//!
//! # Design
//! Every non-success HTTP status lands in `HttpError` with the raw status
//! code and body for debugging. The front end treats all of them the same
//! way ("failed to fetch"), so there are no per-status variants; callers that
//! care can still match on the code.

use std::fmt;

/// Errors returned by `HabitClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned a status outside 200..300.
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpError { status, body } => {
                write!(f, "HTTP {status}: {body}")
            }
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
