use crate::adapters::SeismicFeed;
use crate::correlation::{
    evaluate, evaluate_simulated, Decision, RadiationLookup, SimulatedReading, Thresholds,
};
use crate::notifications::{log_decision, render_alert, render_simulation, Notifier};
use tracing::{info, warn};

/// Run one evaluation cycle and return the decision
///
/// When simulation inputs are present the live feeds are never queried.
/// Otherwise the most recent seismic event (feed order) goes to the engine,
/// which issues the radiation lookup itself only after the seismic gates
/// pass. The decision is logged before any publish attempt, and a publish
/// failure never fails the cycle.
pub async fn run_cycle(
    thresholds: &Thresholds,
    simulation: Option<SimulatedReading>,
    feed: &dyn SeismicFeed,
    lookup: &dyn RadiationLookup,
    notifier: Option<&dyn Notifier>,
) -> Decision {
    if let Some(sim) = simulation {
        let decision = evaluate_simulated(&sim, thresholds);
        log_decision(&decision);

        publish(notifier, &render_simulation(&decision)).await;
        return decision;
    }

    let events = feed.recent_events(thresholds.lookback_minutes).await;
    info!(count = events.len(), "Seismic events in window");

    let decision = evaluate(events.first(), lookup, thresholds).await;
    log_decision(&decision);

    if decision.is_alert() {
        publish(notifier, &render_alert(&decision)).await;
    }

    decision
}

async fn publish(notifier: Option<&dyn Notifier>, message: &str) {
    let Some(notifier) = notifier else {
        return;
    };

    if let Err(e) = notifier.publish(message).await {
        warn!(error = %e, "Publish failed, decision already reported");
    }
}
