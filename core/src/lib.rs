//! Typed request pipeline for an identity-management REST API.
//!
//! # Overview
//! Endpoint wrappers such as [`Tickets`] are thin: they validate their
//! arguments, merge fixed fields into the caller's body, and describe the
//! request through a [`RequestBuilder`]. The builder produces an immutable
//! [`RequestSpec`] which [`HttpClient`] turns into an [`HttpRequest`], sends
//! through a [`Transport`], and classifies into a [`Response`] or an
//! [`Error`].
//!
//! # Design
//! - Input and builder errors are raised before any I/O happens.
//! - Transport failures (`Error::Network`) and non-2xx answers
//!   (`Error::Api`) are separate so callers can pick a recovery policy.
//! - No caching, retries, rate limiting or pagination are done here.
//! - `HttpClient` is stateless apart from its shared transport and can be
//!   used from many threads at once.

pub mod builder;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod management;
pub mod merge;
pub mod options;
pub mod tickets;
pub mod transport;
pub mod types;
pub mod validate;

#[cfg(test)]
mod testing;

pub use builder::{to_body, Body, BuilderState, RequestBuilder, RequestSpec};
pub use client::{HttpClient, Response};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use management::ManagementClient;
pub use merge::merge;
pub use options::{Checkpoint, Pagination, RequestOptions};
pub use tickets::Tickets;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{EmailVerificationTicket, PasswordChangeTicket, Ticket, TicketIdentity};
