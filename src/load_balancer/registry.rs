//! Static service registry.
//!
//! # Responsibilities
//! - Hold the instances of each service, keyed by service id
//! - Apply the chooser to pick an instance per request
//!
//! # Design Decisions
//! - Service ids are ASCII case-insensitive: request hosts arrive
//!   lowercased, so ids are stored and looked up lowercased

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::config::ServiceConfig;
use crate::load_balancer::{instance::ServiceInstance, round_robin::RoundRobin, ServiceInstanceChooser};

struct ServiceGroup {
    instances: Vec<Arc<ServiceInstance>>,
    chooser: Box<dyn ServiceInstanceChooser>,
}

/// Service id → instances, each service with its own chooser.
#[derive(Default)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceGroup>,
}

impl ServiceRegistry {
    /// Build a registry from configuration. Instances whose URL does not
    /// parse are skipped with a warning.
    pub fn new(configs: &[ServiceConfig]) -> Self {
        let mut registry = Self::default();

        for config in configs {
            let urls = config.instances.iter().filter_map(|raw| match Url::parse(raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(service = %config.name, url = %raw, error = %e, "Invalid instance URL");
                    None
                }
            });
            registry.register(&config.name, urls);
        }

        registry
    }

    /// Add a service with round-robin selection over `urls`.
    pub fn register(&mut self, service_id: &str, urls: impl IntoIterator<Item = Url>) {
        self.register_with(service_id, urls, Box::new(RoundRobin::new()));
    }

    /// Add a service with an explicit chooser. Replaces an existing entry.
    pub fn register_with(
        &mut self,
        service_id: &str,
        urls: impl IntoIterator<Item = Url>,
        chooser: Box<dyn ServiceInstanceChooser>,
    ) {
        let service_id = normalize(service_id);
        let instances: Vec<Arc<ServiceInstance>> = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| Arc::new(ServiceInstance::new(&service_id, format!("{service_id}-{i}"), url)))
            .collect();

        tracing::debug!(service = %service_id, instances = instances.len(), "Service registered");
        self.services
            .insert(service_id, ServiceGroup { instances, chooser });
    }

    /// Select an instance of `service_id`.
    pub fn choose(&self, service_id: &str) -> Option<Arc<ServiceInstance>> {
        let Some(group) = self.services.get(&normalize(service_id)) else {
            tracing::debug!(service = %service_id, "Service not found in registry");
            return None;
        };

        let chosen = group.chooser.choose(&group.instances);
        if chosen.is_none() {
            tracing::debug!(service = %service_id, "Service has no instances");
        }
        chosen
    }

    /// Whether `service_id` is registered, with or without instances.
    pub fn contains(&self, service_id: &str) -> bool {
        self.services.contains_key(&normalize(service_id))
    }

    /// All instances of `service_id` (empty when unknown).
    pub fn instances(&self, service_id: &str) -> Vec<Arc<ServiceInstance>> {
        self.services
            .get(&normalize(service_id))
            .map(|group| group.instances.clone())
            .unwrap_or_default()
    }

    /// Registered service ids, sorted.
    pub fn service_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.services.keys().cloned().collect();
        ids.sort();
        ids
    }
}

fn normalize(service_id: &str) -> String {
    service_id.to_ascii_lowercase()
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.services.iter().map(|(id, group)| (id, &group.instances)))
            .finish()
    }
}
