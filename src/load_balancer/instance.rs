//! Service instance abstraction.

use url::Url;

/// A single instance of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    /// Logical service this instance belongs to.
    pub service_id: String,
    /// Unique id within the service (`<service>-<index>`).
    pub instance_id: String,
    /// Base URL; scheme, host and port are applied to outgoing requests.
    pub url: Url,
}

impl ServiceInstance {
    pub fn new(service_id: impl Into<String>, instance_id: impl Into<String>, url: Url) -> Self {
        Self {
            service_id: service_id.into(),
            instance_id: instance_id.into(),
            url,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}
