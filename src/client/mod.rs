//! HTTP client subsystem.
//!
//! # Data Flow
//! ```text
//! HttpClientBuilder (timeout, user agent, filters)
//!     → [initialization hooks may append filters]
//!     → build() → BalancedClient
//!
//! BalancedClient::execute(request)
//!     → filter.rs: each ExchangeFilter rewrites the request, in order
//!     → reqwest sends the final request
//! ```
//!
//! # Design Decisions
//! - Filter registration is additive; nothing replaces or removes a filter
//! - Filters are shared (`Arc`) so one instance can serve many clients
//! - A filter error aborts the request before anything is sent

pub mod builder;
pub mod filter;
pub mod request_id;

pub use builder::{BalancedClient, ClientBuilder, ClientError, HttpClientBuilder};
pub use filter::{ExchangeFilter, FilterError};
pub use request_id::{RequestIdFilter, X_REQUEST_ID};
