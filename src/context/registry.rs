//! Component initialization host.
//!
//! # Responsibilities
//! - Hold the shared marker table
//! - Run initialization hooks exactly once per component handed in
//! - Abort initialization of a component on the first hook failure

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::context::component::Component;
use crate::context::marker::{Marker, MarkerRegistry};

/// Error returned by an initialization hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// A callback that runs while a component is initialized, before the
/// component is handed to its consumer.
pub trait InitializationHook: Send + Sync {
    /// Inspect or mutate `component`, then return it.
    fn before_initialization(
        &self,
        component: Box<dyn Component>,
        name: &str,
    ) -> Result<Box<dyn Component>, HookError>;
}

/// Errors raised while initializing components.
#[derive(Debug, Error)]
pub enum ContextError {
    /// A hook rejected the component.
    #[error("failed to initialize component '{name}': {source}")]
    Initialization {
        name: String,
        #[source]
        source: HookError,
    },
}

/// Registry of markers and initialization hooks.
#[derive(Default)]
pub struct ComponentContext {
    markers: Arc<MarkerRegistry>,
    hooks: RwLock<Vec<Arc<dyn InitializationHook>>>,
}

impl ComponentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared marker table, for hooks that look markers up by name.
    pub fn markers(&self) -> Arc<MarkerRegistry> {
        self.markers.clone()
    }

    /// Tag the component called `name`.
    pub fn mark(&self, name: impl Into<String>, marker: Marker) {
        self.markers.mark(name, marker);
    }

    /// Register a hook. Hooks run in registration order.
    pub fn add_hook(&self, hook: Arc<dyn InitializationHook>) {
        let mut hooks = self.hooks.write().unwrap_or_else(|e| e.into_inner());
        hooks.push(hook);
    }

    /// Run every hook once over `component` and hand it back.
    pub fn initialize(
        &self,
        name: &str,
        component: Box<dyn Component>,
    ) -> Result<Box<dyn Component>, ContextError> {
        // Snapshot so hooks never run under the lock.
        let hooks: Vec<Arc<dyn InitializationHook>> = self
            .hooks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        let mut component = component;
        for hook in hooks {
            component = hook
                .before_initialization(component, name)
                .map_err(|source| ContextError::Initialization {
                    name: name.to_string(),
                    source,
                })?;
        }

        tracing::debug!(component = %name, "Component initialized");
        Ok(component)
    }
}
