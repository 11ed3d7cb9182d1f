//! Maps API payloads onto dashboard view mutations.
//!
//! Each function applies whatever is present and skips what is absent; a
//! missing sub-object never prevents the remaining updates from running.

use tracing::{debug, warn};

use crate::api::{ComparisonPayload, PerformancePayload, StatusPayload};
use crate::data::{ComparisonChart, Severity};
use crate::poller::CycleOutcome;
use crate::view::{DashboardView, Metric, NodeSlot};

/// Node status meaning the process is up.
pub const NODE_RUNNING: &str = "running";
/// Circuit status meaning all hops are built.
pub const CIRCUIT_ESTABLISHED: &str = "established";

/// Format a handshake time, e.g. `45.27` -> `"45.3μs"`. Ties round up.
pub fn format_handshake(avg_us: f64) -> String {
    format!("{:.1}μs", (avg_us * 10.0).round() / 10.0)
}

/// Format a latency in whole milliseconds, e.g. `352.4` -> `"352ms"`.
pub fn format_latency_ms(avg_ms: f64) -> String {
    format!("{}ms", avg_ms.round() as i64)
}

/// Format a `[0, 1]` fraction as a whole percentage, e.g. `0.976` -> `"98%"`.
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", (fraction * 100.0).round() as i64)
}

/// Apply node and circuit state.
pub fn apply_status<V: DashboardView + ?Sized>(view: &mut V, status: &StatusPayload) {
    for slot in NodeSlot::ALL {
        let running = status
            .nodes
            .as_ref()
            .and_then(|nodes| nodes.get(slot.key()))
            .and_then(|node| node.status.as_deref())
            == Some(NODE_RUNNING);
        view.set_node_active(slot, running);
    }

    if let Some(ref circuit) = status.circuit {
        let established = circuit.status.as_deref() == Some(CIRCUIT_ESTABLISHED);
        view.set_progress(if established { 100.0 } else { 50.0 });

        if established {
            let message = match circuit.hops {
                Some(hops) => format!("Circuit established with {} hops", hops),
                None => "Circuit established".to_string(),
            };
            view.append_log(Severity::Success, message);
        }
    }
}

/// Apply handshake, circuit construction and network label independently.
pub fn apply_performance<V: DashboardView + ?Sized>(view: &mut V, perf: &PerformancePayload) {
    if let Some(avg_us) = perf.handshake.as_ref().and_then(|h| h.avg_us) {
        view.set_metric(Metric::Handshake, format_handshake(avg_us));
    }

    if let Some(ref construction) = perf.circuit_construction {
        if let Some(avg_ms) = construction.avg_ms {
            view.set_metric(Metric::CircuitLatency, format_latency_ms(avg_ms));
        }
        if let Some(rate) = construction.success_rate {
            view.set_metric(Metric::SuccessRate, format_percent(rate));
        }
    }

    if let Some(ref config) = perf.current_config {
        let label = config.to_uppercase();
        view.set_metric(Metric::NetworkType, label.clone());
        view.append_log(Severity::Info, format!("Current network: {}", label));
    }
}

/// Replace the comparison chart dataset.
pub fn apply_comparison<V: DashboardView + ?Sized>(view: &mut V, comparison: &ComparisonPayload) {
    view.set_chart(ComparisonChart::values_from(comparison));
    view.append_log(Severity::Info, "Performance data updated".to_string());
}

/// Apply one poll cycle.
///
/// Successful payloads are applied even when a sibling request failed. Any
/// failure produces exactly one error entry for the cycle and clears the
/// liveness indicator; a clean cycle sets it.
pub fn apply_outcome<V: DashboardView + ?Sized>(view: &mut V, outcome: &CycleOutcome) {
    if let Ok(ref status) = outcome.status {
        apply_status(view, status);
    }
    if let Ok(ref perf) = outcome.performance {
        apply_performance(view, perf);
    }
    if let Ok(ref comparison) = outcome.comparison {
        apply_comparison(view, comparison);
    }

    match outcome.first_error() {
        Some(err) => {
            warn!(error = %err, failures = outcome.failure_count(), "poll cycle failed");
            view.set_live(false);
            view.append_log(Severity::Error, format!("API connection error: {}", err));
        }
        None => {
            debug!("poll cycle completed");
            view.set_live(true);
        }
    }
}
