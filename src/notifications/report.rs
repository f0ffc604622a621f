use crate::correlation::{Decision, DecisionKind, Evidence};
use tracing::info;

/// Render the alert message template for a live decision
pub fn render_alert(decision: &Decision) -> String {
    match &decision.evidence {
        Evidence::Live { event, sample } => {
            let radiation = sample
                .as_ref()
                .map(|s| format!("{} {}", s.value, s.unit))
                .unwrap_or_else(|| "unknown".to_string());
            let magnitude = event
                .magnitude
                .map(|m| m.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let depth = event
                .depth_km
                .map(|d| format!("{} km", d))
                .unwrap_or_else(|| "unknown".to_string());

            format!(
                "Alert! Possible detonation detected at {:.4}, {:.4} (magnitude {}, depth {}, radiation {}, event time {})",
                event.latitude,
                event.longitude,
                magnitude,
                depth,
                radiation,
                event.occurred_at.to_rfc3339(),
            )
        }
        _ => "Alert! Possible detonation detected".to_string(),
    }
}

/// Render the simulation-result message template
pub fn render_simulation(decision: &Decision) -> String {
    let outcome = match decision.kind {
        DecisionKind::Alert => "ALERT",
        DecisionKind::NoAlert => "no alert",
    };

    match &decision.evidence {
        Evidence::Simulated {
            latitude,
            longitude,
            radiation_cpm,
        } => format!(
            "Simulation result at {:.4}, {:.4}: radiation {} CPM, outcome: {}",
            latitude, longitude, radiation_cpm, outcome,
        ),
        _ => format!("Simulation result: {}", outcome),
    }
}

/// Emit one structured log event for a decision and its reasons
///
/// Keeps observability out of the engine: the engine returns the reasons,
/// this renders them.
pub fn log_decision(decision: &Decision) {
    let reasons = serde_json::to_string(&decision.reasons)
        .unwrap_or_else(|_| "[]".to_string());

    match decision.kind {
        DecisionKind::Alert => {
            info!(kind = "alert", reasons = %reasons, "Evaluation cycle complete");
        }
        DecisionKind::NoAlert => {
            info!(kind = "no_alert", reasons = %reasons, "Evaluation cycle complete");
        }
    }
}
