//! Decoration errors.

use thiserror::Error;

/// Errors raised while decorating a client builder.
#[derive(Debug, Error)]
pub enum DecorateError {
    /// The builder is marked for load balancing but the filter it needs
    /// cannot be resolved.
    #[error("{dependency} not found: client builder '{component}' is marked load-balanced")]
    MissingDependency {
        dependency: &'static str,
        component: String,
    },
}
