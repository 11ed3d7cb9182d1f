// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # sagin-monitor
//!
//! A terminal dashboard for a post-quantum Tor testbed running over
//! space-air-ground integrated network (SAGIN) links.
//!
//! The dashboard polls the testbed's HTTP API every few seconds and shows
//! node liveness, circuit progress, handshake and circuit construction
//! metrics, a per-scenario comparison chart and a bounded event log.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐  │
//! │  │ poller  │───▶│   data   │───▶│  view   │───▶│    ui    │  │
//! │  │ (tokio) │    │ (updater)│    │ (state) │    │(ratatui) │  │
//! │  └────┬────┘    └──────────┘    └────▲────┘    └──────────┘  │
//! │       │                              │                       │
//! │       ▼                              │                       │
//! │  ┌─────────┐                    ┌────┴────┐                  │
//! │  │   api   │◀── ApiClient       │   sim   │ animation, demo  │
//! │  └─────────┘                    └─────────┘                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`api`]**: Payload types, the [`MetricsApi`] trait and the reqwest-backed [`ApiClient`]
//! - **[`poller`]**: Fixed-interval cycles of three concurrent requests ([`Poller`])
//! - **[`data`]**: Payload-to-view mapping, the comparison chart and the bounded log
//! - **[`view`]**: The [`DashboardView`] write interface and its [`DashboardState`]
//! - **[`sim`]**: Cosmetic circuit-building animation and demo mode
//! - **[`app`]** / **[`ui`]**: Application lifecycle and terminal rendering
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the default API at http://localhost:8080/api
//! sagin-monitor
//!
//! # Watch a remote testbed every 2 seconds
//! sagin-monitor --api http://192.168.5.110:8080/api --interval 2s
//!
//! # Run one cycle and dump the resulting dashboard state
//! sagin-monitor --export state.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sagin_monitor::{poller, updater, ApiClient, DashboardState};
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::new("http://localhost:8080/api", Duration::from_secs(4)).unwrap();
//! let outcome = poller::run_cycle(&client).await;
//!
//! let mut state = DashboardState::new();
//! updater::apply_outcome(&mut state, &outcome);
//! println!("live: {}", state.live);
//! # });
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod data;
pub mod events;
pub mod poller;
pub mod sim;
pub mod timer;
pub mod ui;
pub mod view;

// Re-export main types for convenience
pub use api::{
    ApiClient, ComparisonPayload, FetchError, MetricsApi, PerformancePayload, StatusPayload,
};
pub use app::App;
pub use config::Settings;
pub use data::{updater, ComparisonChart, LogEntry, LogSink, Scenario, Severity};
pub use poller::{CycleOutcome, Poller};
pub use sim::{CircuitAnimation, DemoMode};
pub use view::{DashboardState, DashboardView, Hop, HopState, Metric, NodeSlot};
