use async_trait::async_trait;
use chrono::Utc;
use detonation_watch::{
    adapters::SeismicFeed,
    correlation::{
        evaluate, evaluate_simulated, DecisionKind, RadiationLookup, Reason, SimulatedReading,
        Thresholds,
    },
    error::Result,
    models::{RadiationSample, SeismicEvent},
    notifications::Notifier,
    runner::run_cycle,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

fn event(magnitude: Option<f64>, depth_km: Option<f64>) -> SeismicEvent {
    SeismicEvent::new(magnitude, depth_km, 37.77, -122.42, 1_700_000_000_000)
}

/// Radiation lookup returning a fixed reading and counting queries
struct FixedLookup {
    value: Option<f64>,
    calls: AtomicUsize,
}

impl FixedLookup {
    fn reading(value: f64) -> Self {
        Self {
            value: Some(value),
            calls: AtomicUsize::new(0),
        }
    }

    fn empty() -> Self {
        Self {
            value: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RadiationLookup for FixedLookup {
    async fn nearest(&self, _: f64, _: f64, _: f64) -> Result<Option<RadiationSample>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .value
            .map(|v| RadiationSample::new(v, "cpm", Utc::now())))
    }
}

/// Lookup that must never be reached
struct UnreachableLookup;

#[async_trait]
impl RadiationLookup for UnreachableLookup {
    async fn nearest(&self, _: f64, _: f64, _: f64) -> Result<Option<RadiationSample>> {
        panic!("radiation lookup must not be queried in this scenario");
    }
}

/// Seismic feed serving a canned event list
struct StaticFeed(Vec<SeismicEvent>);

#[async_trait]
impl SeismicFeed for StaticFeed {
    async fn recent_events(&self, _: f64) -> Vec<SeismicEvent> {
        self.0.clone()
    }
}

/// Feed that must never be reached
struct UnreachableFeed;

#[async_trait]
impl SeismicFeed for UnreachableFeed {
    async fn recent_events(&self, _: f64) -> Vec<SeismicEvent> {
        panic!("seismic feed must not be queried in simulation mode");
    }
}

/// Notifier that records every published message
#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, message: &str) -> Result<()> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

// Scenario A: every gate met but radiation exactly at the threshold.
#[tokio::test]
async fn scenario_a_boundary_values_do_not_alert() {
    let lookup = FixedLookup::reading(125.0);
    let decision = evaluate(
        Some(&event(Some(1.0), Some(2.0))),
        &lookup,
        &Thresholds::default(),
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert_eq!(
        decision.reasons,
        vec![Reason::RadiationWithinThreshold {
            value: 125.0,
            threshold_cpm: 125.0
        }]
    );
}

// Scenario B: radiation just over the threshold alerts.
#[tokio::test]
async fn scenario_b_radiation_just_over_threshold_alerts() {
    let lookup = FixedLookup::reading(125.1);
    let decision = evaluate(
        Some(&event(Some(1.0), Some(2.0))),
        &lookup,
        &Thresholds::default(),
    )
    .await;

    assert!(decision.is_alert());
}

// Scenario C: magnitude fails first even with extreme radiation.
#[tokio::test]
async fn scenario_c_low_magnitude_wins_over_high_radiation() {
    let decision = evaluate(
        Some(&event(Some(0.9), Some(1.0))),
        &UnreachableLookup,
        &Thresholds::default(),
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert_eq!(
        decision.reasons,
        vec![Reason::MagnitudeBelowThreshold {
            magnitude: 0.9,
            min_magnitude: 1.0
        }]
    );
}

// Scenario D: an empty feed produces NO_ALERT and no radiation query.
#[tokio::test]
async fn scenario_d_empty_feed_skips_radiation_query() {
    let decision = run_cycle(
        &Thresholds::default(),
        None,
        &StaticFeed(Vec::new()),
        &UnreachableLookup,
        None,
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert_eq!(decision.reasons, vec![Reason::NoSeismicActivity]);
}

// Scenario E: simulated 130 CPM alerts with no seismic checks at all.
#[tokio::test]
async fn scenario_e_simulated_reading_alerts() {
    let decision = evaluate_simulated(
        &SimulatedReading {
            latitude: 35.0,
            longitude: 139.0,
            radiation_cpm: 130.0,
        },
        &Thresholds::default(),
    );

    assert!(decision.is_alert());
}

#[tokio::test]
async fn magnitudes_below_minimum_never_alert() {
    for magnitude in [0.0, 0.5, 0.99, -1.0] {
        let decision = evaluate(
            Some(&event(Some(magnitude), Some(0.1))),
            &UnreachableLookup,
            &Thresholds::default(),
        )
        .await;
        assert_eq!(decision.kind, DecisionKind::NoAlert, "magnitude {}", magnitude);
    }
}

#[tokio::test]
async fn depths_beyond_maximum_never_alert() {
    for depth in [2.01, 10.0, 700.0] {
        let decision = evaluate(
            Some(&event(Some(9.0), Some(depth))),
            &UnreachableLookup,
            &Thresholds::default(),
        )
        .await;
        assert_eq!(decision.kind, DecisionKind::NoAlert, "depth {}", depth);
    }
}

#[tokio::test]
async fn depth_absent_event_never_alerts_even_when_everything_else_qualifies() {
    // Magnitude qualifies and the lookup would return a huge spike; the
    // missing depth alone must keep this quiet.
    let decision = evaluate(
        Some(&event(Some(6.0), None)),
        &UnreachableLookup,
        &Thresholds::default(),
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert_eq!(decision.reasons, vec![Reason::DepthUnknown]);
}

#[tokio::test]
async fn missing_radiation_sample_never_alerts() {
    let lookup = FixedLookup::empty();
    let decision = evaluate(
        Some(&event(Some(6.0), Some(0.1))),
        &lookup,
        &Thresholds::default(),
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert_eq!(decision.reasons, vec![Reason::NoRadiationSample]);
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn simulation_mode_never_touches_live_feeds() {
    let notifier = RecordingNotifier::default();
    let decision = run_cycle(
        &Thresholds::default(),
        Some(SimulatedReading {
            latitude: 35.0,
            longitude: 139.0,
            radiation_cpm: 130.0,
        }),
        &UnreachableFeed,
        &UnreachableLookup,
        Some(&notifier),
    )
    .await;

    assert!(decision.is_alert());

    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Simulation result"));
}

#[tokio::test]
async fn simulation_below_threshold_still_publishes_result() {
    let notifier = RecordingNotifier::default();
    let decision = run_cycle(
        &Thresholds::default(),
        Some(SimulatedReading {
            latitude: 35.0,
            longitude: 139.0,
            radiation_cpm: 10.0,
        }),
        &UnreachableFeed,
        &UnreachableLookup,
        Some(&notifier),
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);

    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("no alert"));
}

#[tokio::test]
async fn live_no_alert_publishes_nothing() {
    let notifier = RecordingNotifier::default();
    let decision = run_cycle(
        &Thresholds::default(),
        None,
        &StaticFeed(vec![event(Some(0.5), Some(1.0))]),
        &FixedLookup::reading(999.0),
        Some(&notifier),
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert!(notifier.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn live_alert_publishes_alert_message() {
    let notifier = RecordingNotifier::default();
    let decision = run_cycle(
        &Thresholds::default(),
        None,
        &StaticFeed(vec![event(Some(4.2), Some(1.5))]),
        &FixedLookup::reading(400.0),
        Some(&notifier),
    )
    .await;

    assert!(decision.is_alert());

    let messages = notifier.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Possible detonation detected"));
}

#[tokio::test]
async fn only_most_recent_event_is_considered() {
    // Feed order is most-recent-first; the second event would alert but
    // only the first is ever evaluated.
    let quiet_recent = event(Some(0.5), Some(1.0));
    let loud_older = event(Some(6.0), Some(0.5));

    let decision = run_cycle(
        &Thresholds::default(),
        None,
        &StaticFeed(vec![quiet_recent, loud_older]),
        &UnreachableLookup,
        None,
    )
    .await;

    assert_eq!(decision.kind, DecisionKind::NoAlert);
    assert_eq!(
        decision.reasons,
        vec![Reason::MagnitudeBelowThreshold {
            magnitude: 0.5,
            min_magnitude: 1.0
        }]
    );
}

#[tokio::test]
async fn thresholds_are_per_call_values() {
    // The same event flips outcome purely through the passed-in thresholds.
    let strict = Thresholds {
        radiation_threshold_cpm: 1_000.0,
        ..Thresholds::default()
    };
    let loose = Thresholds {
        radiation_threshold_cpm: 50.0,
        ..Thresholds::default()
    };

    let ev = event(Some(2.0), Some(1.0));

    let quiet = evaluate(Some(&ev), &FixedLookup::reading(200.0), &strict).await;
    assert_eq!(quiet.kind, DecisionKind::NoAlert);

    let loud = evaluate(Some(&ev), &FixedLookup::reading(200.0), &loose).await;
    assert!(loud.is_alert());
}
