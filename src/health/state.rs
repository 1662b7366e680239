//! Health status value.
//!
//! # States
//! - Ok: the process is running and able to answer requests
//!
//! # Design Decisions
//! - Computed fresh per request, never stored
//! - No dependency checks: a probe must not wait on databases or peers

use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

impl HealthStatus {
    /// Status of this process right now.
    pub fn current() -> Self {
        HealthStatus::Ok
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            HealthStatus::Ok => StatusCode::OK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Ok => "ok",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
