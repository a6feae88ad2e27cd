//! Attach the load-balancing filter to marked client builders.

use std::sync::Arc;

use crate::context::{
    Component, HookError, InitializationHook, Marker, MarkerSource, ObjectProvider,
};
use crate::decoration::error::DecorateError;
use crate::load_balancer::DeferringLoadBalancerExchangeFilter;
use crate::observability::metrics;

const FILTER_DEPENDENCY: &str = "DeferringLoadBalancerExchangeFilter";

/// Decorates `LoadBalanced` client builders with the deferring
/// load-balancer filter.
///
/// Holds no mutable state; one instance can decorate from many threads.
pub struct ClientBuilderDecorator {
    filter_provider: Arc<dyn ObjectProvider<DeferringLoadBalancerExchangeFilter>>,
    markers: Arc<dyn MarkerSource>,
}

impl ClientBuilderDecorator {
    pub fn new(
        filter_provider: Arc<dyn ObjectProvider<DeferringLoadBalancerExchangeFilter>>,
        markers: Arc<dyn MarkerSource>,
    ) -> Self {
        Self {
            filter_provider,
            markers,
        }
    }

    /// Decorate `candidate` if it is a client builder marked
    /// `LoadBalanced` under `name`. Always hands back the same component.
    ///
    /// Calling this twice on one builder registers the filter twice.
    pub fn decorate(
        &self,
        mut candidate: Box<dyn Component>,
        name: &str,
    ) -> Result<Box<dyn Component>, DecorateError> {
        let Some(builder) = candidate.as_client_builder() else {
            metrics::record_decoration("skipped");
            return Ok(candidate);
        };

        if self.markers.find_marker(name, Marker::LoadBalanced).is_none() {
            tracing::trace!(component = %name, "Client builder not marked load-balanced");
            metrics::record_decoration("unmarked");
            return Ok(candidate);
        }

        let Some(filter) = self.filter_provider.get_if_available() else {
            tracing::error!(
                component = %name,
                dependency = FILTER_DEPENDENCY,
                "Load-balanced client builder cannot be decorated"
            );
            metrics::record_decoration("missing_dependency");
            return Err(DecorateError::MissingDependency {
                dependency: FILTER_DEPENDENCY,
                component: name.to_string(),
            });
        };

        builder.filter(filter);
        tracing::debug!(component = %name, "Load balancer filter attached");
        metrics::record_decoration("decorated");
        Ok(candidate)
    }
}

impl InitializationHook for ClientBuilderDecorator {
    fn before_initialization(
        &self,
        component: Box<dyn Component>,
        name: &str,
    ) -> Result<Box<dyn Component>, HookError> {
        Ok(self.decorate(component, name)?)
    }
}
