//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (segment-wise pattern match)
//!     → handler.rs (invoke the matched sub-application)
//!     → Return: handler response or explicit NotFound
//!
//! Route Compilation (at startup):
//!     RouteConfig[] / sub-tables
//!     → Parse patterns
//!     → Reject duplicates
//!     → Freeze as immutable RouteTable behind Arc
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same path always resolves to the same route
//! - First match wins (registration order)

pub mod handler;
pub mod matcher;
pub mod router;

use thiserror::Error;

pub use handler::{handler_fn, BoxedHandler, FnHandler, Handler, RouteContext};
pub use matcher::{MatchKind, PathMatch, PathParams, RoutePattern};
pub use router::{HandlerResult, Route, RouteMatch, RouteTable};

/// Errors raised while building a route table. All of them are fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Two routes claim the same pattern.
    #[error("route `{route}` pattern `{pattern}` duplicates route `{existing}`")]
    DuplicatePattern {
        route: String,
        pattern: String,
        existing: String,
    },

    /// Pattern could not be parsed.
    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}
