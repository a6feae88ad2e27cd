//! Lazy value providers.
//!
//! A provider answers "give me the value if it exists yet" without blocking
//! and without side effects. Consumers decide what absence means.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Non-blocking lookup of a shared value that may not exist yet.
pub trait ObjectProvider<T>: Send + Sync {
    /// Return the value if it is currently available.
    fn get_if_available(&self) -> Option<Arc<T>>;
}

/// A provider that starts empty and is populated later.
///
/// Reads are lock-free; `set` atomically publishes a new value.
#[derive(Debug)]
pub struct DeferredProvider<T> {
    slot: ArcSwapOption<T>,
}

impl<T> DeferredProvider<T> {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    /// Create a provider that already holds `value`.
    pub fn with_value(value: Arc<T>) -> Self {
        Self {
            slot: ArcSwapOption::new(Some(value)),
        }
    }

    /// Publish `value`, replacing any previous one.
    pub fn set(&self, value: Arc<T>) {
        self.slot.store(Some(value));
    }

    /// Remove the current value.
    pub fn clear(&self) {
        self.slot.store(None);
    }

    pub fn is_available(&self) -> bool {
        self.slot.load().is_some()
    }
}

impl<T> Default for DeferredProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Sync> ObjectProvider<T> for DeferredProvider<T> {
    fn get_if_available(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }
}
