//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// Load balancer settings.
    pub load_balancer: LoadBalancerConfig,

    /// Services and their instances.
    pub services: Vec<ServiceConfig>,

    /// Client builders to initialize.
    pub clients: Vec<ClientConfig>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level (overridden by RUST_LOG).
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Prometheus endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Load balancer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoadBalancerConfig {
    /// Provide the load-balancing filter. When false, any client marked
    /// `load_balanced` fails to initialize.
    pub enabled: bool,
}

impl Default for LoadBalancerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A logical service and its instances.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service id; used as the host of load-balanced request URLs.
    pub name: String,

    /// Instance base URLs (e.g., "http://127.0.0.1:3001").
    #[serde(default)]
    pub instances: Vec<String>,
}

/// A named HTTP client builder.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Unique client name.
    pub name: String,

    /// Attach the load-balancing filter to this client.
    #[serde(default)]
    pub load_balanced: bool,

    /// Total request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent by this client.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Stamp outgoing requests with `x-request-id`.
    #[serde(default = "default_request_id")]
    pub request_id: bool,
}

impl ClientConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            load_balanced: false,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            request_id: default_request_id(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_request_id() -> bool {
    true
}
