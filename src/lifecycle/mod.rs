//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build route table → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listeners
//! - Shutdown has a grace period: forced exit after deadline (TLS listener)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{wait_for_shutdown, Shutdown};
pub use startup::{build_route_table, StartupError};
