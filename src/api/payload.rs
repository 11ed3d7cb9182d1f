//! Response bodies of the monitoring API.
//!
//! Every field is optional: the dashboard applies whatever is present and
//! silently skips the rest. Fields the dashboard does not display are kept
//! so exports carry the full response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    /// Process state per node, keyed by node name (`directory`, `client`, ...).
    pub nodes: Option<BTreeMap<String, NodeInfo>>,
    pub circuit: Option<CircuitInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// State of a single testbed process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    /// `"running"`, `"stopped"` or `"unknown"`.
    pub status: Option<String>,
    pub pid: Option<u32>,
}

/// Current circuit as reported by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitInfo {
    pub status: Option<String>,
    pub hops: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<f64>,
}

/// Body of `GET /performance`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformancePayload {
    pub handshake: Option<HandshakeStats>,
    pub circuit_construction: Option<CircuitConstruction>,
    /// Active network scenario key, e.g. `"leo"`.
    pub current_config: Option<String>,
}

/// Full post-quantum handshake benchmark.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandshakeStats {
    pub avg_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std_us: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<u64>,
}

/// Circuit construction statistics for the active scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConstruction {
    pub avg_ms: Option<f64>,
    /// Fraction of successful builds in `[0, 1]`.
    pub success_rate: Option<f64>,
}

/// Body of `GET /sagin/comparison`, keyed by scenario (`baseline`, `leo`, `meo`, `geo`).
pub type ComparisonPayload = BTreeMap<String, ScenarioResult>;

/// Aggregated experiment result for one scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioResult {
    /// Mean circuit construction time in seconds.
    pub latency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_status() {
        let json = r#"{
            "timestamp": "2025-01-01T12:00:00",
            "network_type": "LEO",
            "nodes": {
                "directory": {"status": "running", "pid": 4242},
                "client": {"status": "stopped", "pid": null},
                "guard": {"status": "unknown", "pid": null, "error": "pgrep missing"}
            },
            "circuit": {"status": "established", "hops": 3, "latency_ms": 52}
        }"#;

        let status: StatusPayload = serde_json::from_str(json).unwrap();
        let nodes = status.nodes.unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes["directory"].pid, Some(4242));
        assert_eq!(nodes["client"].status.as_deref(), Some("stopped"));

        let circuit = status.circuit.unwrap();
        assert_eq!(circuit.hops, Some(3));
        assert_eq!(circuit.latency_ms, Some(52.0));
    }

    #[test]
    fn test_deserialize_empty_objects() {
        let status: StatusPayload = serde_json::from_str("{}").unwrap();
        assert!(status.nodes.is_none());
        assert!(status.circuit.is_none());

        // The API returns an empty handshake object when benchmarks are missing
        let perf: PerformancePayload =
            serde_json::from_str(r#"{"handshake": {}, "current_config": "leo"}"#).unwrap();
        assert_eq!(perf.handshake, Some(HandshakeStats::default()));
        assert!(perf.circuit_construction.is_none());
        assert_eq!(perf.current_config.as_deref(), Some("leo"));
    }

    #[test]
    fn test_deserialize_comparison() {
        let json = r#"{
            "baseline": {"latency": 0.15, "success_rate": 1.0},
            "geo": {"latency": 2.1}
        }"#;

        let comparison: ComparisonPayload = serde_json::from_str(json).unwrap();
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison["geo"].latency, Some(2.1));
        assert!(comparison["geo"].success_rate.is_none());
    }

    #[test]
    fn test_null_fields_are_absent() {
        let status: StatusPayload =
            serde_json::from_str(r#"{"nodes": null, "circuit": null}"#).unwrap();
        assert_eq!(status, StatusPayload::default());
    }
}
