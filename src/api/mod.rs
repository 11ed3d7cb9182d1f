//! Monitoring API access.
//!
//! The dashboard reads three endpoints of the testbed's HTTP API. The
//! [`MetricsApi`] trait is the seam between the poller and the network, with
//! [`ApiClient`] as the reqwest-backed implementation.

mod client;
mod error;
mod payload;

pub use client::ApiClient;
pub use error::FetchError;
pub use payload::{
    CircuitConstruction, CircuitInfo, ComparisonPayload, HandshakeStats, NodeInfo,
    PerformancePayload, ScenarioResult, StatusPayload,
};

use std::fmt::Debug;

use async_trait::async_trait;

/// Default API root when none is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

pub const STATUS_PATH: &str = "status";
pub const PERFORMANCE_PATH: &str = "performance";
pub const COMPARISON_PATH: &str = "sagin/comparison";

/// Source of the three payloads fetched on every cycle.
///
/// Each method is one independent request; implementations must not let a
/// failure in one affect the others.
#[async_trait]
pub trait MetricsApi: Send + Sync + Debug {
    /// Node and circuit state.
    async fn status(&self) -> Result<StatusPayload, FetchError>;

    /// Handshake and circuit construction benchmarks.
    async fn performance(&self) -> Result<PerformancePayload, FetchError>;

    /// Per-scenario circuit construction times.
    async fn comparison(&self) -> Result<ComparisonPayload, FetchError>;

    /// Human-readable description, shown in the status bar.
    fn description(&self) -> &str;
}
