//! Client-builder decoration.
//!
//! # Data Flow
//! ```text
//! ComponentContext::initialize(name, component)
//!     → decorator.rs (ClientBuilderDecorator as InitializationHook)
//!         - not a client builder        → returned unchanged
//!         - builder, no LoadBalanced    → returned unchanged
//!         - builder, LoadBalanced       → provider resolves filter
//!               - available  → builder.filter(filter), returned
//!               - absent     → error.rs (MissingDependency), init aborts
//! ```
//!
//! # Design Decisions
//! - Fail fast: a marked builder without its filter never reaches a consumer
//! - Decoration is not idempotent; the context runs it once per component

pub mod decorator;
pub mod error;

pub use decorator::ClientBuilderDecorator;
pub use error::DecorateError;
