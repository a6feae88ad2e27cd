//! Per-name markers.
//!
//! # Responsibilities
//! - Record which named components carry which markers
//! - Answer marker lookups from initialization hooks
//!
//! # Design Decisions
//! - Lookups are read-only and safe to run from many threads (dashmap)
//! - A name may carry several markers; adding one twice is a no-op

use std::collections::HashSet;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A declarative tag attached to a named component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Marker {
    /// Requests sent by this client go through the load balancer.
    LoadBalanced,
}

/// Read-only marker lookup by component name.
pub trait MarkerSource: Send + Sync {
    /// Return the marker if `name` carries it.
    fn find_marker(&self, name: &str, marker: Marker) -> Option<Marker>;
}

/// Concurrent name → markers table.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    inner: DashMap<String, HashSet<Marker>>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `marker` to the component called `name`.
    pub fn mark(&self, name: impl Into<String>, marker: Marker) {
        self.inner.entry(name.into()).or_default().insert(marker);
    }
}

impl MarkerSource for MarkerRegistry {
    fn find_marker(&self, name: &str, marker: Marker) -> Option<Marker> {
        self.inner
            .get(name)
            .filter(|markers| markers.contains(&marker))
            .map(|_| marker)
    }
}
