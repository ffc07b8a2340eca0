//! Transport-decoupled client for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, so any executor — a blocking HTTP agent, an
//! async client, an in-process test harness — can host the same logic.
//!
//! # Design
//! - `TodoClient` is stateless — it holds only `base_url` — and is
//!   constructed explicitly by the caller; there is no process-wide client.
//! - Each CRUD operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the server crates; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, TodoPage, UpdateTodo};
