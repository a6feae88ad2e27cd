//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Request to http://<service-id>/path
//!     → filter.rs (DeferringLoadBalancerExchangeFilter resolves delegate)
//!     → filter.rs (LoadBalancerExchangeFilter takes host as service id)
//!     → registry.rs (instances for the service)
//!     → round_robin.rs (rotate through instances)
//!     → instance.rs (scheme/host/port applied to the request URL)
//! ```
//!
//! # Design Decisions
//! - Chooser is per service
//! - Service table is static, built from configuration

use std::sync::Arc;

pub mod filter;
pub mod instance;
pub mod registry;
pub mod round_robin;

pub use filter::{DeferringLoadBalancerExchangeFilter, LoadBalancerExchangeFilter};
pub use instance::ServiceInstance;
pub use registry::ServiceRegistry;
pub use round_robin::RoundRobin;

/// Selection strategy over the instances of one service.
pub trait ServiceInstanceChooser: Send + Sync {
    /// Pick an instance, or `None` when none is usable.
    fn choose(&self, instances: &[Arc<ServiceInstance>]) -> Option<Arc<ServiceInstance>>;
}
