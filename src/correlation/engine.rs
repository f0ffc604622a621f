use crate::correlation::models::{
    Decision, Evidence, Reason, SimulatedReading, Thresholds,
};
use crate::error::Result;
use crate::models::{RadiationSample, SeismicEvent};
use async_trait::async_trait;

/// Capability to fetch the "nearest" radiation sample around a coordinate
///
/// "Nearest" is the feed's convention: the minimum-value sample within the
/// search radius, not the geographically closest station. Implementations
/// return `Ok(None)` when nothing is within radius; the engine treats a
/// failed lookup the same as no sample.
#[async_trait]
pub trait RadiationLookup: Send + Sync {
    async fn nearest(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Option<RadiationSample>>;
}

/// Evaluate one seismic event against the radiation feed
///
/// The checks run in a fixed order and the first failing one decides:
/// absent event, unknown magnitude, magnitude gate, unknown depth, depth
/// gate, radiation lookup, radiation gate. An unknown depth never passes
/// the ground-level check, and a reading exactly at the radiation threshold
/// does not alert. The engine performs no I/O of its own beyond the
/// injected lookup and never logs; callers render the returned reasons.
pub async fn evaluate(
    event: Option<&SeismicEvent>,
    lookup: &dyn RadiationLookup,
    thresholds: &Thresholds,
) -> Decision {
    let event = match event {
        Some(event) => event,
        None => return Decision::no_alert(Evidence::None, Reason::NoSeismicActivity),
    };

    let live = |sample: Option<RadiationSample>| Evidence::Live {
        event: event.clone(),
        sample,
    };

    // A missing magnitude never alerts, regardless of radiation.
    let magnitude = match event.magnitude {
        Some(magnitude) => magnitude,
        None => return Decision::no_alert(live(None), Reason::MagnitudeUnknown),
    };

    if magnitude < thresholds.min_magnitude {
        return Decision::no_alert(
            live(None),
            Reason::MagnitudeBelowThreshold {
                magnitude,
                min_magnitude: thresholds.min_magnitude,
            },
        );
    }

    // A missing depth must fail the ground-level check explicitly; comparing
    // a sentinel numerically would alert on events of unknown depth.
    let depth_km = match event.depth_km {
        Some(depth_km) => depth_km,
        None => return Decision::no_alert(live(None), Reason::DepthUnknown),
    };

    if depth_km > thresholds.max_depth_km {
        return Decision::no_alert(
            live(None),
            Reason::DepthExceedsThreshold {
                depth_km,
                max_depth_km: thresholds.max_depth_km,
            },
        );
    }

    // A failed lookup degrades to "no sample"; radiation absence is never
    // treated as a spike.
    let sample = lookup
        .nearest(event.latitude, event.longitude, thresholds.search_radius_km)
        .await
        .unwrap_or(None);

    let sample = match sample {
        Some(sample) => sample,
        None => return Decision::no_alert(live(None), Reason::NoRadiationSample),
    };

    // Strictly greater-than: a reading exactly at the threshold stays quiet.
    if sample.value > thresholds.radiation_threshold_cpm {
        let reason = Reason::RadiationExceedsThreshold {
            value: sample.value,
            threshold_cpm: thresholds.radiation_threshold_cpm,
        };
        Decision::alert(live(Some(sample)), reason)
    } else {
        let reason = Reason::RadiationWithinThreshold {
            value: sample.value,
            threshold_cpm: thresholds.radiation_threshold_cpm,
        };
        Decision::no_alert(live(Some(sample)), reason)
    }
}

/// Evaluate operator-supplied simulation inputs
///
/// Bypasses the seismic checks and the live feeds entirely; only the
/// simulated reading is compared against the radiation threshold, with the
/// same strict inequality as the live path.
pub fn evaluate_simulated(sim: &SimulatedReading, thresholds: &Thresholds) -> Decision {
    let evidence = Evidence::Simulated {
        latitude: sim.latitude,
        longitude: sim.longitude,
        radiation_cpm: sim.radiation_cpm,
    };

    if sim.radiation_cpm > thresholds.radiation_threshold_cpm {
        Decision::alert(
            evidence,
            Reason::RadiationExceedsThreshold {
                value: sim.radiation_cpm,
                threshold_cpm: thresholds.radiation_threshold_cpm,
            },
        )
    } else {
        Decision::no_alert(
            evidence,
            Reason::RadiationWithinThreshold {
                value: sim.radiation_cpm,
                threshold_cpm: thresholds.radiation_threshold_cpm,
            },
        )
    }
}
