//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the service registry from configuration
//! - Register the client-builder decorator with the component context
//! - Publish the deferring load-balancer filter (when enabled)
//! - Initialize and build every configured client

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::client::{BalancedClient, ClientError, HttpClientBuilder, RequestIdFilter};
use crate::config::{AppConfig, ClientConfig};
use crate::context::{ComponentContext, ContextError, DeferredProvider, Marker};
use crate::decoration::ClientBuilderDecorator;
use crate::load_balancer::{
    DeferringLoadBalancerExchangeFilter, LoadBalancerExchangeFilter, ServiceRegistry,
};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("component '{0}' is not a client builder")]
    NotAClientBuilder(String),

    #[error("failed to build client '{name}': {source}")]
    Build {
        name: String,
        #[source]
        source: ClientError,
    },
}

/// Summary of an initialized client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClientReport {
    pub name: String,
    pub load_balanced: bool,
    pub filters: Vec<String>,
}

/// Everything produced by a successful startup.
#[derive(Debug)]
pub struct Application {
    clients: HashMap<String, BalancedClient>,
    reports: Vec<ClientReport>,
}

impl Application {
    pub fn client(&self, name: &str) -> Option<&BalancedClient> {
        self.clients.get(name)
    }

    /// Client summaries, in configuration order.
    pub fn report(&self) -> &[ClientReport] {
        &self.reports
    }
}

/// Wire services and clients from `config`.
pub fn start(config: &AppConfig) -> Result<Application, StartupError> {
    let services = Arc::new(ServiceRegistry::new(&config.services));
    tracing::info!(services = ?services.service_ids(), "Service registry ready");

    let context = ComponentContext::new();
    for client in config.clients.iter().filter(|c| c.load_balanced) {
        context.mark(client.name.clone(), Marker::LoadBalanced);
    }

    let filter_provider = Arc::new(DeferredProvider::<DeferringLoadBalancerExchangeFilter>::new());
    context.add_hook(Arc::new(ClientBuilderDecorator::new(
        filter_provider.clone(),
        context.markers(),
    )));

    if config.load_balancer.enabled {
        let delegate = Arc::new(DeferredProvider::with_value(Arc::new(
            LoadBalancerExchangeFilter::new(services.clone()),
        )));
        filter_provider.set(Arc::new(DeferringLoadBalancerExchangeFilter::new(delegate)));
    } else {
        tracing::warn!("Load balancer disabled; load-balanced clients will fail to initialize");
    }

    let mut clients = HashMap::new();
    let mut reports = Vec::with_capacity(config.clients.len());
    for client_config in &config.clients {
        let client = initialize_client(&context, client_config)?;
        reports.push(ClientReport {
            name: client_config.name.clone(),
            load_balanced: client_config.load_balanced,
            filters: client.filter_names(),
        });
        clients.insert(client_config.name.clone(), client);
    }

    tracing::info!(clients = clients.len(), "Clients initialized");
    Ok(Application {
        clients,
        reports,
    })
}

fn initialize_client(
    context: &ComponentContext,
    config: &ClientConfig,
) -> Result<BalancedClient, StartupError> {
    let mut builder =
        HttpClientBuilder::new(&config.name).timeout(Duration::from_secs(config.timeout_secs));
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }
    if config.request_id {
        builder = builder.with_filter(Arc::new(RequestIdFilter::new()));
    }

    let mut component = context.initialize(&config.name, Box::new(builder))?;
    let builder = component
        .as_client_builder()
        .ok_or_else(|| StartupError::NotAClientBuilder(config.name.clone()))?;

    builder.build().map_err(|source| StartupError::Build {
        name: config.name.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::decoration::DecorateError;
    use std::error::Error as _;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.services.push(ServiceConfig {
            name: "user-service".into(),
            instances: vec!["http://127.0.0.1:3001".into()],
        });
        let mut lb = ClientConfig::new("userClient");
        lb.load_balanced = true;
        config.clients.push(lb);
        config.clients.push(ClientConfig::new("plainClient"));
        config
    }

    #[test]
    fn test_start_decorates_marked_clients_only() {
        let app = start(&config()).unwrap();

        assert_eq!(
            app.report(),
            &[
                ClientReport {
                    name: "userClient".into(),
                    load_balanced: true,
                    filters: vec!["request-id".into(), "deferring-load-balancer".into()],
                },
                ClientReport {
                    name: "plainClient".into(),
                    load_balanced: false,
                    filters: vec!["request-id".into()],
                },
            ]
        );
        assert!(app.client("userClient").is_some());
        assert!(app.client("missing").is_none());
    }

    #[test]
    fn test_disabled_load_balancer_fails_fast() {
        let mut config = config();
        config.load_balancer.enabled = false;

        let err = start(&config).unwrap_err();

        let StartupError::Context(ContextError::Initialization { name, source }) = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(name, "userClient");
        assert!(matches!(
            source.downcast_ref::<DecorateError>(),
            Some(DecorateError::MissingDependency { .. })
        ));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_disabled_load_balancer_without_marked_clients() {
        let mut config = config();
        config.load_balancer.enabled = false;
        config.clients.retain(|c| !c.load_balanced);

        let app = start(&config).unwrap();
        assert_eq!(app.report().len(), 1);
    }
}
