//! Synchronous client core for a habit-tracking service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and owns the page's
//! view-model so the visible state is always a deterministic render of the
//! last fetched snapshot.
//!
//! # Design
//! - `HabitClient` is stateless; it holds only `base_url` and `username`.
//! - Each API operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `Binder` drives the round-trips through the `Transport` trait and
//!   rewrites the `ViewModel` wholesale from each successful response.
//! - Failures are normalized once, at the fetch boundary: logged, surfaced
//!   as a single blocking alert, and returned as a typed `ActionError`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod binder;
pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod view;

pub use binder::{ActionError, Binder, ClickTarget};
pub use client::{HabitClient, DEFAULT_BASE_URL, DEFAULT_USERNAME};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
pub use types::{Ack, Habit, LastReward, NewHabit, NewReport, RewardInfo, StatsSummary};
pub use view::{SelectOption, ViewModel};
