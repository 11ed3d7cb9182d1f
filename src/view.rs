//! The display surface written by the updater and the simulators.
//!
//! [`DashboardView`] is the narrow interface every writer goes through.
//! [`DashboardState`] is the in-memory implementation the terminal renderer
//! reads each frame and the export writes to JSON.

use serde::Serialize;

use crate::data::{ComparisonChart, LogSink, Severity};

/// Node slots shown in the nodes panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeSlot {
    Directory,
    Client,
}

impl NodeSlot {
    pub const ALL: [NodeSlot; 2] = [NodeSlot::Directory, NodeSlot::Client];

    /// Node name as used in the status payload.
    pub fn key(&self) -> &'static str {
        match self {
            NodeSlot::Directory => "directory",
            NodeSlot::Client => "client",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeSlot::Directory => "Directory Authority",
            NodeSlot::Client => "Client",
        }
    }

    fn index(&self) -> usize {
        match self {
            NodeSlot::Directory => 0,
            NodeSlot::Client => 1,
        }
    }
}

/// Text metrics shown in the metrics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Average post-quantum handshake time.
    Handshake,
    /// Average circuit construction time.
    CircuitLatency,
    /// Circuit construction success rate.
    SuccessRate,
    /// Active network scenario.
    NetworkType,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Handshake,
        Metric::CircuitLatency,
        Metric::SuccessRate,
        Metric::NetworkType,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Handshake => "Handshake",
            Metric::CircuitLatency => "Circuit Latency",
            Metric::SuccessRate => "Success Rate",
            Metric::NetworkType => "Network",
        }
    }
}

/// Relay stage of the circuit-build animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hop {
    Client,
    Guard,
    Middle,
    Exit,
}

impl Hop {
    /// Stages in build order.
    pub const ALL: [Hop; 4] = [Hop::Client, Hop::Guard, Hop::Middle, Hop::Exit];

    pub fn name(&self) -> &'static str {
        match self {
            Hop::Client => "client",
            Hop::Guard => "guard",
            Hop::Middle => "middle",
            Hop::Exit => "exit",
        }
    }

    fn index(&self) -> usize {
        match self {
            Hop::Client => 0,
            Hop::Guard => 1,
            Hop::Middle => 2,
            Hop::Exit => 3,
        }
    }
}

/// Visual state of a hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HopState {
    #[default]
    Pending,
    Building,
    Active,
}

/// Write-only interface to the dashboard surface.
///
/// Writers never read back through this trait, so the poller's updates and
/// the cosmetic simulators stay independent of each other.
pub trait DashboardView {
    /// Mark a node as running or not.
    fn set_node_active(&mut self, slot: NodeSlot, active: bool);

    /// Circuit progress bar, in percent.
    fn set_progress(&mut self, percent: f64);

    /// Replace the text of a metric.
    fn set_metric(&mut self, metric: Metric, text: String);

    /// Set the state of one hop of the circuit diagram.
    fn set_hop_state(&mut self, hop: Hop, state: HopState);

    /// Replace the comparison chart dataset.
    fn set_chart(&mut self, values: [f64; 4]);

    /// Liveness indicator.
    fn set_live(&mut self, live: bool);

    /// Append a line to the log panel.
    fn append_log(&mut self, severity: Severity, message: String);
}

/// Placeholder shown before a metric has been populated.
pub const EMPTY_METRIC: &str = "--";

/// Everything the dashboard displays.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardState {
    nodes: [bool; 2],
    pub progress: f64,
    hops: [HopState; 4],
    pub handshake: String,
    pub circuit_latency: String,
    pub success_rate: String,
    pub network: String,
    pub chart: ComparisonChart,
    pub live: bool,
    pub logs: LogSink,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            nodes: [false; 2],
            progress: 0.0,
            hops: [HopState::Pending; 4],
            handshake: EMPTY_METRIC.to_string(),
            circuit_latency: EMPTY_METRIC.to_string(),
            success_rate: EMPTY_METRIC.to_string(),
            network: EMPTY_METRIC.to_string(),
            chart: ComparisonChart::new(),
            live: false,
            logs: LogSink::new(),
        }
    }

    pub fn node_active(&self, slot: NodeSlot) -> bool {
        self.nodes[slot.index()]
    }

    pub fn hop_state(&self, hop: Hop) -> HopState {
        self.hops[hop.index()]
    }

    pub fn metric(&self, metric: Metric) -> &str {
        match metric {
            Metric::Handshake => &self.handshake,
            Metric::CircuitLatency => &self.circuit_latency,
            Metric::SuccessRate => &self.success_rate,
            Metric::NetworkType => &self.network,
        }
    }

    /// Serialize the current state as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DashboardView for DashboardState {
    fn set_node_active(&mut self, slot: NodeSlot, active: bool) {
        self.nodes[slot.index()] = active;
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress = percent.clamp(0.0, 100.0);
    }

    fn set_metric(&mut self, metric: Metric, text: String) {
        match metric {
            Metric::Handshake => self.handshake = text,
            Metric::CircuitLatency => self.circuit_latency = text,
            Metric::SuccessRate => self.success_rate = text,
            Metric::NetworkType => self.network = text,
        }
    }

    fn set_hop_state(&mut self, hop: Hop, state: HopState) {
        self.hops[hop.index()] = state;
    }

    fn set_chart(&mut self, values: [f64; 4]) {
        self.chart.replace(values);
    }

    fn set_live(&mut self, live: bool) {
        self.live = live;
    }

    fn append_log(&mut self, severity: Severity, message: String) {
        self.logs.add_log(severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = DashboardState::new();
        assert!(!state.live);
        assert!(NodeSlot::ALL.iter().all(|s| !state.node_active(*s)));
        assert!(Hop::ALL.iter().all(|h| state.hop_state(*h) == HopState::Pending));
        assert!(Metric::ALL.iter().all(|m| state.metric(*m) == EMPTY_METRIC));
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut state = DashboardState::new();
        state.set_progress(150.0);
        assert_eq!(state.progress, 100.0);
        state.set_progress(-3.0);
        assert_eq!(state.progress, 0.0);
    }

    #[test]
    fn test_json_export_shape() {
        let mut state = DashboardState::new();
        state.set_node_active(NodeSlot::Client, true);
        state.set_hop_state(Hop::Guard, HopState::Building);
        state.append_log(Severity::Success, "ok".to_string());

        let value: serde_json::Value = serde_json::from_str(&state.to_json().unwrap()).unwrap();
        assert_eq!(value["nodes"], serde_json::json!([false, true]));
        assert_eq!(value["hops"][1], "building");
        assert_eq!(value["chart"]["values"][3], 2.1);
        assert_eq!(value["logs"]["entries"][0]["severity"], "success");
    }
}
