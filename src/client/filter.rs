//! Request filters.

use std::fmt;

use reqwest::header::InvalidHeaderValue;
use reqwest::Request;
use thiserror::Error;

/// Errors raised by exchange filters.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The deferred load balancer filter could not resolve its delegate.
    #[error("load balancer delegate filter is not available")]
    DelegateUnavailable,

    /// The request URL carries no host to use as a service id.
    #[error("request URL '{0}' has no host to use as service id")]
    MissingServiceId(String),

    /// No instance is registered for the service.
    #[error("no available instance for service '{0}'")]
    NoInstance(String),

    /// The chosen instance could not be applied to the request URL.
    #[error("failed to rewrite request URL: {0}")]
    Rewrite(String),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// A unit of request interception applied before a request is sent.
pub trait ExchangeFilter: Send + Sync + fmt::Debug {
    /// Short name used in logs and reports.
    fn name(&self) -> &str;

    /// Transform the outgoing request.
    fn apply(&self, request: Request) -> Result<Request, FilterError>;
}
