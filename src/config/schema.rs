//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the site.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::MatchKind;

/// Root configuration for the site router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Route table, in match priority order.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin site settings.
    pub admin: AdminConfig,

    /// Health responder settings.
    pub health: HealthConfig,

    /// Request limits and response hardening.
    pub security: SecurityConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: RouteConfig::default_table(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
            admin: AdminConfig::default(),
            health: HealthConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl ListenerConfig {
    /// Replace the port of `bind_address`, keeping its host.
    pub fn set_port(&mut self, port: u16) {
        let host = self
            .bind_address
            .rsplit_once(':')
            .map_or(self.bind_address.as_str(), |(host, _)| host);
        self.bind_address = format!("{}:{}", host, port);
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Sub-application a route delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteTarget {
    /// The administrative site.
    Admin,
    /// The health responder.
    Health,
}

/// A single route table entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Path pattern, e.g. `/admin/` or `/`.
    pub pattern: String,

    /// Prefix (delegate everything below) or exact match.
    #[serde(default, rename = "match")]
    pub kind: MatchKind,

    /// Sub-application that answers matching requests.
    pub target: RouteTarget,
}

impl RouteConfig {
    pub fn new(name: &str, pattern: &str, kind: MatchKind, target: RouteTarget) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            kind,
            target,
        }
    }

    /// Admin site at `/admin/`, then the health app catching everything else.
    pub fn default_table() -> Vec<RouteConfig> {
        vec![
            RouteConfig::new("admin", "/admin/", MatchKind::Prefix, RouteTarget::Admin),
            RouteConfig::new("health", "/", MatchKind::Prefix, RouteTarget::Health),
        ]
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// How long in-flight requests may drain after shutdown is signalled.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Placeholder shipped as the default admin key.
pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Admin site configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Register admin routes. When disabled they fall through to later routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Accept the shipped placeholder key. Local development only.
    pub allow_placeholder_key: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // Rejected by validation unless allow_placeholder_key is set.
            api_key: PLACEHOLDER_API_KEY.to_string(),
            allow_placeholder_key: false,
        }
    }
}

/// Health responder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Static body returned to plain-text probes.
    pub body: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            body: "OK".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Origins allowed to make credentialed cross-origin requests.
    /// Empty disables CORS.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
            cors_allowed_origins: Vec::new(),
        }
    }
}
