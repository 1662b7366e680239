//! Site router library: an ordered, first-match-wins route table with a
//! mounted admin site and a root health responder.

pub mod admin;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::SiteConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HandlerResult, RouteTable, RoutingError};
