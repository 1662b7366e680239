//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn validated configuration into the frozen route table
//! - Map every startup failure onto one fatal error type
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Routes are registered in config order, so config order is match priority

use std::sync::Arc;

use thiserror::Error;

use crate::admin::AdminSite;
use crate::config::{ConfigError, RouteTarget, SiteConfig};
use crate::health::{self, HealthHandler};
use crate::routing::{MatchKind, RoutePattern, RouteTable, RoutingError};

/// Errors that abort process initialization.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("routing error: {0}")]
    Routing(#[from] RoutingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS setup failed: {0}")]
    Tls(std::io::Error),

    #[error("metrics exporter failed: {0}")]
    Metrics(String),
}

/// Build the site route table from configuration.
pub fn build_route_table(config: &SiteConfig) -> Result<RouteTable, RoutingError> {
    let mut table = RouteTable::new();

    for route in &config.routes {
        match (route.target, route.kind) {
            (RouteTarget::Admin, _) if !config.admin.enabled => {
                tracing::info!(route = %route.name, "Admin site disabled, route skipped");
            }
            (RouteTarget::Admin, kind) => {
                let site = AdminSite::new(&config.admin, config.routes.clone());
                table.register(
                    route.name.as_str(),
                    RoutePattern::parse(&route.pattern, kind)?,
                    Arc::new(site),
                )?;
            }
            (RouteTarget::Health, MatchKind::Prefix) => {
                table.include(&route.pattern, health::routes(&route.name, &config.health)?)?;
            }
            (RouteTarget::Health, MatchKind::Exact) => {
                table.exact(
                    route.name.as_str(),
                    &route.pattern,
                    HealthHandler::from_config(&config.health),
                )?;
            }
        }
    }

    if table.is_empty() {
        tracing::warn!("Route table is empty, every request will be answered with 404");
    }

    tracing::info!(routes = table.len(), "Route table built");
    Ok(table)
}
