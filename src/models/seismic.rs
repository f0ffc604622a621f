use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single seismic event as reported by the upstream feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeismicEvent {
    /// Event magnitude; the feed may omit it entirely
    pub magnitude: Option<f64>,

    /// Depth below the surface in kilometers (smaller = shallower); the
    /// feed may omit it entirely
    pub depth_km: Option<f64>,

    /// Epicenter latitude (WGS84 degrees)
    pub latitude: f64,

    /// Epicenter longitude (WGS84 degrees)
    pub longitude: f64,

    /// When the event occurred
    pub occurred_at: DateTime<Utc>,
}

impl SeismicEvent {
    /// Create a new seismic event from feed fields, converting the source's
    /// epoch-milliseconds timestamp to an absolute instant
    pub fn new(
        magnitude: Option<f64>,
        depth_km: Option<f64>,
        latitude: f64,
        longitude: f64,
        occurred_at_ms: i64,
    ) -> Self {
        let occurred_at = Utc
            .timestamp_millis_opt(occurred_at_ms)
            .single()
            .unwrap_or_else(Utc::now);

        Self {
            magnitude,
            depth_km,
            latitude,
            longitude,
            occurred_at,
        }
    }
}
