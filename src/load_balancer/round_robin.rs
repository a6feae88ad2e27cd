//! Round-robin instance selection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::load_balancer::{instance::ServiceInstance, ServiceInstanceChooser};

/// Round-robin selector.
/// Stores an internal counter to rotate through instances.
#[derive(Debug)]
pub struct RoundRobin {
    counter: AtomicUsize,
}

impl RoundRobin {
    /// Start at a random position so restarted processes don't all hit the
    /// first instance together.
    pub fn new() -> Self {
        Self::starting_at(fastrand::usize(..1000))
    }

    pub fn starting_at(position: usize) -> Self {
        Self {
            counter: AtomicUsize::new(position),
        }
    }
}

impl Default for RoundRobin {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceInstanceChooser for RoundRobin {
    fn choose(&self, instances: &[Arc<ServiceInstance>]) -> Option<Arc<ServiceInstance>> {
        if instances.is_empty() {
            return None;
        }

        let position = self.counter.fetch_add(1, Ordering::Relaxed);
        Some(instances[position % instances.len()].clone())
    }
}
