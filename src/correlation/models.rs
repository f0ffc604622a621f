use crate::models::{RadiationSample, SeismicEvent};
use serde::{Deserialize, Serialize};

/// Alert thresholds, passed into the engine at call time
///
/// An explicit value rather than process-wide state so tests and callers can
/// override per evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum magnitude for a seismic event to be considered
    #[serde(default = "default_min_magnitude")]
    pub min_magnitude: f64,

    /// Maximum depth (km) for an event to count as ground-level
    #[serde(default = "default_max_depth_km")]
    pub max_depth_km: f64,

    /// Radiation reading (CPM) that must be exceeded to alert
    #[serde(default = "default_radiation_threshold_cpm")]
    pub radiation_threshold_cpm: f64,

    /// Radius (km) of the radiation sample search around the epicenter
    #[serde(default = "default_search_radius_km")]
    pub search_radius_km: f64,

    /// Trailing window (minutes) of seismic events to fetch; consumed by the
    /// seismic feed adapter, carried here so the whole tuning surface lives
    /// in one place
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_magnitude: default_min_magnitude(),
            max_depth_km: default_max_depth_km(),
            radiation_threshold_cpm: default_radiation_threshold_cpm(),
            search_radius_km: default_search_radius_km(),
            lookback_minutes: default_lookback_minutes(),
        }
    }
}

fn default_min_magnitude() -> f64 {
    1.0
}

fn default_max_depth_km() -> f64 {
    2.0
}

fn default_radiation_threshold_cpm() -> f64 {
    125.0
}

fn default_search_radius_km() -> f64 {
    20.0
}

fn default_lookback_minutes() -> f64 {
    15.0
}

/// Outcome of one evaluation cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Alert,
    NoAlert,
}

/// Why the engine decided the way it did
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum Reason {
    /// No seismic event was available for this cycle
    NoSeismicActivity,

    /// The event carried no numeric magnitude
    MagnitudeUnknown,

    /// Magnitude below the configured minimum
    MagnitudeBelowThreshold { magnitude: f64, min_magnitude: f64 },

    /// The event carried no numeric depth; an unknown depth never passes
    /// the ground-level check
    DepthUnknown,

    /// Depth beyond the configured maximum
    DepthExceedsThreshold { depth_km: f64, max_depth_km: f64 },

    /// No radiation sample within the search radius, or the lookup failed
    NoRadiationSample,

    /// Radiation at or below the threshold (the comparison is strictly
    /// greater-than)
    RadiationWithinThreshold { value: f64, threshold_cpm: f64 },

    /// Radiation strictly above the threshold
    RadiationExceedsThreshold { value: f64, threshold_cpm: f64 },
}

/// The inputs that produced a decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Evidence {
    /// Nothing qualified far enough to gather evidence
    None,

    /// Live-feed evaluation; the sample is present only when the lookup
    /// was reached and returned one
    Live {
        event: SeismicEvent,
        sample: Option<RadiationSample>,
    },

    /// Operator-supplied simulation inputs
    Simulated {
        latitude: f64,
        longitude: f64,
        radiation_cpm: f64,
    },
}

/// A pure function of its inputs; nothing is retained across cycles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub kind: DecisionKind,
    pub evidence: Evidence,
    pub reasons: Vec<Reason>,
}

impl Decision {
    pub fn is_alert(&self) -> bool {
        self.kind == DecisionKind::Alert
    }

    pub(crate) fn no_alert(evidence: Evidence, reason: Reason) -> Self {
        Self {
            kind: DecisionKind::NoAlert,
            evidence,
            reasons: vec![reason],
        }
    }

    pub(crate) fn alert(evidence: Evidence, reason: Reason) -> Self {
        Self {
            kind: DecisionKind::Alert,
            evidence,
            reasons: vec![reason],
        }
    }
}

/// Operator-supplied inputs for a simulated evaluation
///
/// All three fields are required together; a partial triple falls through to
/// live mode at the CLI boundary and never reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedReading {
    pub latitude: f64,
    pub longitude: f64,
    pub radiation_cpm: f64,
}
