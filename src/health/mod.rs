//! Health application.
//!
//! # Data Flow
//! ```text
//! Site route table
//!     → include("/", health::routes(..))
//!     → handler.rs (fixed 200 response)
//!     → state.rs (HealthStatus, computed per request)
//! ```
//!
//! # Design Decisions
//! - Stateless, no I/O: usable as an orchestrator liveness probe
//! - Mounted at the root prefix, so it answers every path not claimed earlier

pub mod handler;
pub mod state;

pub use handler::HealthHandler;
pub use state::HealthStatus;

use crate::config::HealthConfig;
use crate::routing::{RouteTable, RoutingError};

/// The health app's own route table: a single root catch-all.
pub fn routes(name: &str, config: &HealthConfig) -> Result<RouteTable, RoutingError> {
    let mut table = RouteTable::new();
    table.mount(name, "/", HealthHandler::from_config(config))?;
    Ok(table)
}
