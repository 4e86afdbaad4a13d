//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; whoever owns the socket implements [`Transport`]
//! and executes the round-trip. This separation keeps the client and binder
//! deterministic and easy to test against scripted responses.
//!
//! All fields use owned types (`String`, `Vec`) so values can be stored,
//! cloned, and replayed freely.

use std::fmt;

/// HTTP method for a request. The habit API only uses these two verbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `HabitClient::build_*` methods. The transport is responsible for
/// executing this request against the network and returning the corresponding
/// `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `HabitClient::parse_*` methods for status checking and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes `HttpRequest` values against a real or scripted backend.
///
/// The binder drives all network traffic through this trait, so tests can
/// substitute a queue of canned responses and production hosts can plug in
/// any blocking HTTP library.
pub trait Transport {
    fn execute(&mut self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// A failure of the round-trip itself: connection refused, timeout, protocol
/// error. Status-level failures are not transport errors; they come back as a
/// normal `HttpResponse` for the client to interpret.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}
