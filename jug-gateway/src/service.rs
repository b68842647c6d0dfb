//! The solver behind the HTTP routes.
//!
//! Handlers only see the [`RiddleService`] trait, so tests can swap in a
//! scripted implementation.

use std::num::NonZeroU64;

use chrono::{DateTime, Utc};
use jug_core::Trace;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Validated input of one riddle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RiddleRequest {
    /// Capacity of the x jug.
    pub x: NonZeroU64,
    /// Capacity of the y jug.
    pub y: NonZeroU64,
    /// Amount to measure.
    pub z: NonZeroU64,
}

/// Body of `GET /api/v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub started_at: DateTime<Utc>,
}

/// Operations exposed over HTTP.
///
/// Implementations must be `Send + Sync`; one instance serves every request.
/// [`RiddleService::riddle`] may block and is always called from the
/// blocking thread pool.
pub trait RiddleService: Send + Sync {
    /// Report liveness.
    fn health(&self) -> HealthReport;

    /// Solve one riddle.
    ///
    /// # Errors
    /// Returns [`GatewayError::Solve`] when the riddle has no solution.
    fn riddle(&self, request: RiddleRequest) -> Result<Trace, GatewayError>;
}

/// Production service backed by [`jug_core::solve`].
#[derive(Debug, Clone)]
pub struct SolverService {
    started_at: DateTime<Utc>,
}

impl SolverService {
    /// Create a service whose health report counts from now.
    #[must_use]
    pub fn new() -> Self {
        Self::started_at(Utc::now())
    }

    /// Create a service with an explicit start time.
    #[must_use]
    pub fn started_at(started_at: DateTime<Utc>) -> Self {
        Self { started_at }
    }
}

impl Default for SolverService {
    fn default() -> Self {
        Self::new()
    }
}

impl RiddleService for SolverService {
    fn health(&self) -> HealthReport {
        HealthReport {
            status: "ok".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            started_at: self.started_at,
        }
    }

    fn riddle(&self, request: RiddleRequest) -> Result<Trace, GatewayError> {
        Ok(jug_core::solve(request.x, request.y, request.z)?)
    }
}
