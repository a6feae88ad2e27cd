//! Load-balanced HTTP client decoration.
//!
//! Named client builders are initialized through a [`ComponentContext`].
//! Builders marked `LoadBalanced` get a deferring load-balancer filter
//! attached before they reach their consumer; a marked builder whose filter
//! cannot be resolved aborts initialization.
//!
//! [`ComponentContext`]: context::ComponentContext

pub mod client;
pub mod config;
pub mod context;
pub mod decoration;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;

pub use config::AppConfig;
pub use decoration::{ClientBuilderDecorator, DecorateError};
pub use lifecycle::{start, Application};
