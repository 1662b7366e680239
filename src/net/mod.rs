//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Bound TCP listener
//!     → tls.rs (optional rustls handshake via axum-server)
//!     → Hand off to HTTP layer
//! ```

pub mod tls;
