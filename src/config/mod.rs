//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → CLI/env overrides (bind address, PORT, admin key)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → startup builds the route table from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{check_config, load_config, parse_config, read_config, ConfigError};
pub use schema::{
    AdminConfig, HealthConfig, ListenerConfig, LogFormat, ObservabilityConfig, RouteConfig,
    RouteTarget, SecurityConfig, SiteConfig, TimeoutConfig, TlsConfig,
};
pub use validation::{validate_config, ValidationError};
