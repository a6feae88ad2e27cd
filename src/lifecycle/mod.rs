//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build service registry → Register decoration hook
//!         → Publish load-balancer filter → Initialize clients
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Hooks are registered before the first client is initialized
//! - The filter is published through a provider, so its absence is
//!   detected per client rather than assumed

pub mod startup;

pub use startup::{start, Application, ClientReport, StartupError};
