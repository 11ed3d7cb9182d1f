//! Dashboard data: what the poller's payloads turn into on screen.
//!
//! ## Submodules
//!
//! - [`chart`]: The comparison bar series ([`ComparisonChart`], [`Scenario`])
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "5s", "1500ms")
//! - [`logs`]: Bounded event log ([`LogSink`], [`LogEntry`], [`Severity`])
//! - [`updater`]: Payload-to-view mapping applied after every cycle
//!
//! ## Data Flow
//!
//! ```text
//! CycleOutcome (three Results)
//!        │
//!        ▼
//! updater::apply_outcome()
//!        │
//!        ├──▶ apply_status / apply_performance ──▶ DashboardView setters
//!        ├──▶ apply_comparison ──▶ ComparisonChart::replace()
//!        └──▶ liveness + LogSink::add_log()
//! ```

pub mod chart;
pub mod duration;
pub mod logs;
pub mod updater;

pub use chart::{ComparisonChart, Scenario};
pub use logs::{LogEntry, LogSink, Severity, MAX_LOG_ENTRIES};
