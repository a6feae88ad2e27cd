//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Unique, non-empty client and service names (service names ignore case)
//! - Instance URLs parse and use http/https
//! - Validate value ranges (timeouts > 0, metrics address)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    #[error("service '{service}' has invalid instance URL '{url}': {reason}")]
    InvalidInstanceUrl {
        service: String,
        url: String,
        reason: String,
    },

    #[error("client '{0}' must have timeout_secs > 0")]
    ZeroTimeout(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check `config` and return every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Service ids are matched against lowercased URL hosts.
    check_names("service", true, config.services.iter().map(|s| s.name.as_str()), &mut errors);
    check_names("client", false, config.clients.iter().map(|c| c.name.as_str()), &mut errors);

    for service in &config.services {
        for raw in &service.instances {
            let reason = match Url::parse(raw) {
                Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                    Some(format!("unsupported scheme '{}'", url.scheme()))
                }
                Ok(url) if url.host_str().is_none() => Some("missing host".to_string()),
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };
            if let Some(reason) = reason {
                errors.push(ValidationError::InvalidInstanceUrl {
                    service: service.name.clone(),
                    url: raw.clone(),
                    reason,
                });
            }
        }
    }

    for client in &config.clients {
        if client.timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout(client.name.clone()));
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_names<'a>(
    kind: &'static str,
    ignore_case: bool,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in names {
        let key = if ignore_case {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        };
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { kind });
        } else if !seen.insert(key) {
            errors.push(ValidationError::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
}
