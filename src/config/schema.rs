//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::security::principal::Role;

/// Root configuration for the drinks API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DrinksConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request hardening settings.
    pub security: SecurityConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Known principals and their credentials.
    pub principals: Vec<PrincipalConfig>,
}

impl Default for DrinksConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            security: SecurityConfig::default(),
            rate_limit: RateLimitConfig::default(),
            observability: ObservabilityConfig::default(),
            principals: default_principals(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Add `x-content-type-options: nosniff` to every response.
    pub security_headers: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
            security_headers: true,
        }
    }
}

/// Rate limiting configuration.
///
/// Each window is an independent limiter with its own key table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting. When disabled every limiter admits all requests.
    pub enabled: bool,

    /// How often expired entries are swept, in seconds.
    pub sweep_interval_secs: u64,

    /// Search endpoints (lenient).
    pub search: WindowConfig,

    /// General API endpoints (moderate).
    pub api: WindowConfig,

    /// Write operations (strict).
    pub write: WindowConfig,

    /// Authentication endpoints (very strict).
    pub auth: WindowConfig,
}

const FIFTEEN_MINUTES_MS: u64 = 15 * 60 * 1000;

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sweep_interval_secs: 60,
            search: WindowConfig::new(
                FIFTEEN_MINUTES_MS,
                100,
                "Too many search requests. Please wait before searching again.",
            ),
            api: WindowConfig::new(
                FIFTEEN_MINUTES_MS,
                50,
                "Too many API requests. Please wait before making more requests.",
            ),
            write: WindowConfig::new(
                FIFTEEN_MINUTES_MS,
                10,
                "Too many write operations. Please wait before creating/updating more resources.",
            ),
            auth: WindowConfig::new(
                FIFTEEN_MINUTES_MS,
                5,
                "Too many authentication attempts. Please wait before trying again.",
            ),
        }
    }
}

/// A single fixed-window limiter.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    /// Window length in milliseconds.
    pub window_ms: u64,

    /// Maximum requests per key per window.
    pub max_requests: u32,

    /// Message returned with a 429.
    #[serde(default = "default_limit_message")]
    pub message: String,
}

impl WindowConfig {
    pub fn new(window_ms: u64, max_requests: u32, message: &str) -> Self {
        Self {
            window_ms,
            max_requests,
            message: message.to_string(),
        }
    }
}

fn default_limit_message() -> String {
    "Too many requests, please try again later".to_string()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
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

/// A known principal and its API key.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrincipalConfig {
    /// Principal id; also the payload of a `mock-jwt-<id>` token.
    pub id: String,

    pub username: String,

    pub role: Role,

    #[serde(default)]
    pub permissions: Vec<String>,

    /// Bearer value for the API-key scheme.
    pub api_key: String,
}

fn default_principals() -> Vec<PrincipalConfig> {
    let principal = |id: &str, username: &str, role, permissions: &[&str], api_key: &str| {
        PrincipalConfig {
            id: id.to_string(),
            username: username.to_string(),
            role,
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            api_key: api_key.to_string(),
        }
    };

    // WARNING: well-known development keys. Override them in any shared deployment.
    vec![
        principal(
            "user_1",
            "admin",
            Role::Admin,
            &["read", "write", "delete", "manage"],
            "admin-api-key-123456",
        ),
        principal(
            "user_2",
            "bartender",
            Role::Moderator,
            &["read", "write"],
            "bartender-api-key-789012",
        ),
        principal(
            "user_3",
            "customer",
            Role::User,
            &["read"],
            "customer-api-key-345678",
        ),
    ]
}
