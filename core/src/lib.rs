//! Synchronous API client for the NanManager city/player service.
//!
//! # Overview
//! Typed bindings for the player, server, town, token, IP and monitoring
//! endpoints. Each call builds an `HttpRequest`, hands it to a `Transport`
//! for the single network round-trip, and classifies the `HttpResponse`
//! through the envelope decoder into a typed value or a `ClientError`.
//!
//! # Design
//! - `NanManagerClient` is stateless: base URL, fixed headers and a shared
//!   transport, all set at construction. Clones are cheap and thread-safe.
//! - I/O sits behind the `Transport` trait. `UreqTransport` is the default;
//!   tests substitute canned responses.
//! - `envelope::decode` is a pure function of status and body, so error
//!   classification is testable without a server.
//! - Partial updates use `Patch<T>` so that "absent" and "null" stay
//!   distinct on the wire.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod services;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::NanManagerClient;
pub use config::{ClientConfig, USER_AGENT, VERSION};
pub use error::{ClientError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, QueryParams};
pub use transport::{Transport, UreqTransport};
pub use types::{BanMode, Pagination, Patch, ServerType, ThreatLevel};
