//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows > 0, addresses parse)
//! - Detect duplicate principals and credentials
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: DrinksConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::{DrinksConfig, WindowConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    Zero { field: String },
    #[error("principal #{index} has an empty {field}")]
    EmptyPrincipalField { index: usize, field: &'static str },
    #[error("duplicate principal {field} '{value}'")]
    Duplicate { field: &'static str, value: String },
}

pub fn validate_config(config: &DrinksConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "timeouts.request_secs".into(),
        });
    }

    if config.rate_limit.sweep_interval_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "rate_limit.sweep_interval_secs".into(),
        });
    }

    let windows = [
        ("search", &config.rate_limit.search),
        ("api", &config.rate_limit.api),
        ("write", &config.rate_limit.write),
        ("auth", &config.rate_limit.auth),
    ];
    for (name, window) in windows {
        check_window(name, window, &mut errors);
    }

    let mut ids = HashSet::new();
    let mut usernames = HashSet::new();
    let mut keys = HashSet::new();
    for (index, principal) in config.principals.iter().enumerate() {
        let fields = [
            ("id", &principal.id, &mut ids),
            ("username", &principal.username, &mut usernames),
            ("api_key", &principal.api_key, &mut keys),
        ];
        for (field, value, seen) in fields {
            if value.trim().is_empty() {
                errors.push(ValidationError::EmptyPrincipalField { index, field });
            } else if !seen.insert(value.as_str()) {
                errors.push(ValidationError::Duplicate {
                    field,
                    value: value.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_window(name: &str, window: &WindowConfig, errors: &mut Vec<ValidationError>) {
    if window.window_ms == 0 {
        errors.push(ValidationError::Zero {
            field: format!("rate_limit.{name}.window_ms"),
        });
    }
    if window.max_requests == 0 {
        errors.push(ValidationError::Zero {
            field: format!("rate_limit.{name}.max_requests"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&DrinksConfig::default()), Ok(()));
    }

    #[test]
    fn test_duplicate_api_keys() {
        let mut config = DrinksConfig::default();
        config.principals[1].api_key = config.principals[0].api_key.clone();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Duplicate {
                field: "api_key",
                value: "admin-api-key-123456".into(),
            }]
        );
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = DrinksConfig::default();
        config.rate_limit.sweep_interval_secs = 0;
        config.rate_limit.auth.max_requests = 0;
        config.principals[2].username = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::EmptyPrincipalField {
            index: 2,
            field: "username",
        }));
    }
}
