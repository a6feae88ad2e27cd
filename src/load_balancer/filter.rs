//! Load-balancing exchange filters.
//!
//! # Responsibilities
//! - Resolve the service id from the request host
//! - Rewrite the request to a chosen instance (scheme, host, port)
//! - Defer resolution of the rewriting filter until the first request

use std::fmt;
use std::sync::{Arc, OnceLock};

use reqwest::Request;
use url::Url;

use crate::client::{ExchangeFilter, FilterError};
use crate::context::ObjectProvider;
use crate::load_balancer::{instance::ServiceInstance, registry::ServiceRegistry};
use crate::observability::metrics;

/// Rewrites `http://<service-id>/path` to an instance of that service.
#[derive(Debug)]
pub struct LoadBalancerExchangeFilter {
    registry: Arc<ServiceRegistry>,
}

/// Metric label for requests to services missing from the registry.
const UNKNOWN_SERVICE: &str = "unknown";

impl LoadBalancerExchangeFilter {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Metric label for `service_id`; arbitrary hosts collapse to one value.
    fn service_label<'a>(&self, service_id: &'a str) -> &'a str {
        if self.registry.contains(service_id) {
            service_id
        } else {
            UNKNOWN_SERVICE
        }
    }
}

impl ExchangeFilter for LoadBalancerExchangeFilter {
    fn name(&self) -> &str {
        "load-balancer"
    }

    fn apply(&self, mut request: Request) -> Result<Request, FilterError> {
        let service_id = match request.url().host_str() {
            Some(host) => host.to_string(),
            None => return Err(FilterError::MissingServiceId(request.url().to_string())),
        };

        let Some(instance) = self.registry.choose(&service_id) else {
            tracing::warn!(service = %service_id, "No instance available for load-balanced request");
            metrics::record_balanced_request(self.service_label(&service_id), "no_instance");
            return Err(FilterError::NoInstance(service_id));
        };

        reconstruct_url(request.url_mut(), &instance)?;
        metrics::record_balanced_request(&service_id, "routed");
        tracing::debug!(
            service = %service_id,
            instance = %instance.instance_id,
            url = %request.url(),
            "Request routed to instance"
        );
        Ok(request)
    }
}

/// Point `url` at `instance`, keeping path, query and fragment.
pub fn reconstruct_url(url: &mut Url, instance: &ServiceInstance) -> Result<(), FilterError> {
    url.set_scheme(instance.url.scheme()).map_err(|_| {
        FilterError::Rewrite(format!("cannot switch '{url}' to scheme '{}'", instance.url.scheme()))
    })?;
    url.set_host(instance.host())
        .map_err(|e| FilterError::Rewrite(e.to_string()))?;
    url.set_port(instance.url.port())
        .map_err(|_| FilterError::Rewrite(format!("cannot set port on '{url}'")))?;
    Ok(())
}

/// Filter attached to load-balanced client builders.
///
/// The rewriting delegate is looked up on the first request rather than when
/// the builder is decorated, so clients can be initialized before the
/// service registry is ready. Once resolved, the delegate is kept.
pub struct DeferringLoadBalancerExchangeFilter {
    delegate_provider: Arc<dyn ObjectProvider<LoadBalancerExchangeFilter>>,
    delegate: OnceLock<Arc<LoadBalancerExchangeFilter>>,
}

impl DeferringLoadBalancerExchangeFilter {
    pub fn new(delegate_provider: Arc<dyn ObjectProvider<LoadBalancerExchangeFilter>>) -> Self {
        Self {
            delegate_provider,
            delegate: OnceLock::new(),
        }
    }

    fn resolve(&self) -> Result<&Arc<LoadBalancerExchangeFilter>, FilterError> {
        if let Some(delegate) = self.delegate.get() {
            return Ok(delegate);
        }
        let delegate = self
            .delegate_provider
            .get_if_available()
            .ok_or(FilterError::DelegateUnavailable)?;
        Ok(self.delegate.get_or_init(|| delegate))
    }
}

impl fmt::Debug for DeferringLoadBalancerExchangeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferringLoadBalancerExchangeFilter")
            .field("resolved", &self.delegate.get().is_some())
            .finish()
    }
}

impl ExchangeFilter for DeferringLoadBalancerExchangeFilter {
    fn name(&self) -> &str {
        "deferring-load-balancer"
    }

    fn apply(&self, request: Request) -> Result<Request, FilterError> {
        self.resolve()?.apply(request)
    }
}
