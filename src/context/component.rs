//! Capability surface of managed components.

use crate::client::ClientBuilder;

/// An object whose initialization is managed by a [`ComponentContext`].
///
/// Any type can be managed. Types that are HTTP client builders opt into
/// decoration by overriding [`Component::as_client_builder`].
///
/// [`ComponentContext`]: crate::context::ComponentContext
pub trait Component: Send + Sync {
    /// Expose the client-builder capability, if this component has it.
    fn as_client_builder(&mut self) -> Option<&mut dyn ClientBuilder> {
        None
    }
}
