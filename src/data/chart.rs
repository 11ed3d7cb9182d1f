//! State behind the SAGIN comparison bar chart.

use serde::Serialize;

use crate::api::ComparisonPayload;

/// Network scenario shown as one bar of the comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Terrestrial links only.
    Baseline,
    /// Low earth orbit satellite hop.
    Leo,
    /// Medium earth orbit satellite hop.
    Meo,
    /// Geostationary satellite hop.
    Geo,
}

impl Scenario {
    /// All scenarios in chart order.
    pub const ALL: [Scenario; 4] = [Scenario::Baseline, Scenario::Leo, Scenario::Meo, Scenario::Geo];

    /// Key used in API payloads.
    pub fn key(&self) -> &'static str {
        match self {
            Scenario::Baseline => "baseline",
            Scenario::Leo => "leo",
            Scenario::Meo => "meo",
            Scenario::Geo => "geo",
        }
    }

    /// Axis label.
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Baseline => "Baseline",
            Scenario::Leo => "LEO",
            Scenario::Meo => "MEO",
            Scenario::Geo => "GEO",
        }
    }

    /// Circuit construction time (seconds) used when the API omits a scenario.
    pub fn fallback_latency(&self) -> f64 {
        match self {
            Scenario::Baseline => 0.15,
            Scenario::Leo => 0.35,
            Scenario::Meo => 0.75,
            Scenario::Geo => 2.10,
        }
    }
}

/// One bar series with a fixed bucket per [`Scenario`].
///
/// The series is only ever replaced as a whole. `revision` increments on each
/// replacement so the renderer can tell a fresh dataset from a stale one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonChart {
    values: [f64; 4],
    #[serde(skip)]
    revision: u64,
}

impl Default for ComparisonChart {
    fn default() -> Self {
        Self {
            values: Scenario::ALL.map(|s| s.fallback_latency()),
            revision: 0,
        }
    }
}

impl ComparisonChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dataset for a payload, substituting fallbacks for absent entries.
    ///
    /// A latency of `0` counts as absent: the API reports `0` when a scenario
    /// has no measurements yet.
    pub fn values_from(payload: &ComparisonPayload) -> [f64; 4] {
        Scenario::ALL.map(|scenario| {
            payload
                .get(scenario.key())
                .and_then(|result| result.latency)
                .filter(|latency| *latency != 0.0)
                .unwrap_or_else(|| scenario.fallback_latency())
        })
    }

    /// Overwrite the whole series.
    pub fn replace(&mut self, values: [f64; 4]) {
        self.values = values;
        self.revision += 1;
    }

    pub fn values(&self) -> &[f64; 4] {
        &self.values
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Label/value pairs in chart order.
    pub fn bars(&self) -> impl Iterator<Item = (Scenario, f64)> + '_ {
        Scenario::ALL.into_iter().zip(self.values.iter().copied())
    }
}
