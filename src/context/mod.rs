//! Managed-component context.
//!
//! # Data Flow
//! ```text
//! consumer hands a named component to the context
//!     → registry.rs (ComponentContext::initialize)
//!     → every InitializationHook runs once, in registration order
//!         - hooks may consult marker.rs (name → markers)
//!         - hooks may resolve lazy values through provider.rs
//!     → component returned to its consumer (possibly mutated)
//! ```
//!
//! # Design Decisions
//! - Markers are registered explicitly by name instead of being scanned
//! - Capabilities are discovered through `Component`, not by downcasting
//! - A hook failure aborts initialization of that one component

pub mod component;
pub mod marker;
pub mod provider;
pub mod registry;

pub use component::Component;
pub use marker::{Marker, MarkerRegistry, MarkerSource};
pub use provider::{DeferredProvider, ObjectProvider};
pub use registry::{ComponentContext, ContextError, HookError, InitializationHook};
