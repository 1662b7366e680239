//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, value ranges and route patterns
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SiteConfig → Result<(), Vec<ValidationError>>
//! - Duplicate patterns are left to `RouteTable::register`, which owns that rule

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::{RouteTarget, SiteConfig, PLACEHOLDER_API_KEY};
use crate::routing::RoutePattern;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address `{0}` is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("route #{index} has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name `{0}` is used more than once")]
    DuplicateRouteName(String),

    #[error("route `{name}`: {reason}")]
    InvalidRoute { name: String, reason: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("admin.api_key must not be empty while an admin route is enabled")]
    MissingApiKey,

    #[error("admin.api_key is the shipped placeholder (see admin.allow_placeholder_key)")]
    PlaceholderApiKey,

    #[error("security.cors_allowed_origins entry `{0}` is not an explicit origin")]
    InvalidCorsOrigin(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &SiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName(route.name.clone()));
        }

        if let Err(e) = RoutePattern::parse(&route.pattern, route.kind) {
            errors.push(ValidationError::InvalidRoute {
                name: route.name.clone(),
                reason: e.to_string(),
            });
        }
    }

    let admin_routed = config.admin.enabled
        && config.routes.iter().any(|r| r.target == RouteTarget::Admin);
    if admin_routed {
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::MissingApiKey);
        } else if config.admin.api_key == PLACEHOLDER_API_KEY {
            if config.admin.allow_placeholder_key {
                tracing::warn!("Using the placeholder admin.api_key");
            } else {
                errors.push(ValidationError::PlaceholderApiKey);
            }
        }
    }

    for origin in &config.security.cors_allowed_origins {
        let explicit = origin != "*"
            && HeaderValue::from_str(origin).is_ok()
            && Url::parse(origin).is_ok_and(|url| url.has_host());
        if !explicit {
            errors.push(ValidationError::InvalidCorsOrigin(origin.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
