use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single ambient radiation measurement
///
/// The unit string is carried for reporting but never converted; the
/// decision rule compares the raw value against a CPM-denominated threshold
/// and assumes the feed's unit matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadiationSample {
    /// Measured intensity, non-negative
    pub value: f64,

    /// Unit label as reported by the feed (descriptive only)
    pub unit: String,

    /// When the sample was captured
    pub captured_at: DateTime<Utc>,
}

impl RadiationSample {
    pub fn new(value: f64, unit: impl Into<String>, captured_at: DateTime<Utc>) -> Self {
        Self {
            value,
            unit: unit.into(),
            captured_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_is_carried_verbatim() {
        let sample = RadiationSample::new(42.0, "cpm", Utc::now());
        assert_eq!(sample.unit, "cpm");
        assert_eq!(sample.value, 42.0);
    }
}
