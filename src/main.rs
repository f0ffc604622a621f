use clap::Parser;
use detonation_watch::{
    adapters::{SafecastLookup, UsgsFeed},
    config::Config,
    correlation::SimulatedReading,
    notifications::{Notifier, WebhookNotifier},
    runner::run_cycle,
};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Exit codes: 0 = no alert, 1 = startup error, 2 = alert raised.
#[derive(Parser)]
#[command(name = "detonation-watch")]
#[command(version)]
#[command(about = "Correlates seismic and radiation feeds to flag ground-level detonation signatures")]
#[command(after_help = "Exit codes:\n  0  no alert\n  1  startup error\n  2  alert raised")]
struct Cli {
    /// Simulated epicenter latitude (simulation mode needs all three simulate flags)
    #[arg(long, env = "DETWATCH_SIMULATE_LAT")]
    simulate_lat: Option<f64>,

    /// Simulated epicenter longitude
    #[arg(long, env = "DETWATCH_SIMULATE_LON")]
    simulate_lon: Option<f64>,

    /// Simulated radiation reading (CPM)
    #[arg(long, env = "DETWATCH_SIMULATE_RADIATION")]
    simulate_radiation: Option<f64>,

    /// Override: minimum seismic magnitude to consider
    #[arg(long, env = "DETWATCH_MIN_MAGNITUDE")]
    min_magnitude: Option<f64>,

    /// Override: maximum depth (km) to count as ground-level
    #[arg(long, env = "DETWATCH_MAX_DEPTH_KM")]
    max_depth_km: Option<f64>,

    /// Override: radiation alert threshold (CPM)
    #[arg(long, env = "DETWATCH_RADIATION_THRESHOLD_CPM")]
    radiation_threshold_cpm: Option<f64>,

    /// Override: radiation search radius (km)
    #[arg(long, env = "DETWATCH_SEARCH_RADIUS_KM")]
    search_radius_km: Option<f64>,

    /// Override: trailing seismic window (minutes)
    #[arg(long, env = "DETWATCH_LOOKBACK_MINUTES")]
    lookback_minutes: Option<f64>,
}

impl Cli {
    /// Simulation inputs, only when the full triple is present. A partial
    /// triple falls through to live mode.
    fn simulation(&self) -> Option<SimulatedReading> {
        match (self.simulate_lat, self.simulate_lon, self.simulate_radiation) {
            (Some(latitude), Some(longitude), Some(radiation_cpm)) => Some(SimulatedReading {
                latitude,
                longitude,
                radiation_cpm,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!(
                    "Partial simulation input ignored; all of --simulate-lat, \
                     --simulate-lon and --simulate-radiation are required"
                );
                None
            }
        }
    }

    fn apply_threshold_overrides(&self, config: &mut Config) {
        let t = &mut config.thresholds;
        if let Some(v) = self.min_magnitude {
            t.min_magnitude = v;
        }
        if let Some(v) = self.max_depth_km {
            t.max_depth_km = v;
        }
        if let Some(v) = self.radiation_threshold_cpm {
            t.radiation_threshold_cpm = v;
        }
        if let Some(v) = self.search_radius_km {
            t.search_radius_km = v;
        }
        if let Some(v) = self.lookback_minutes {
            t.lookback_minutes = v;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });
    cli.apply_threshold_overrides(&mut config);

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "detonation_watch={}",
            config.observability.log_level
        ))
    });
    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting detonation-watch v{}", env!("CARGO_PKG_VERSION"));

    let feed = match UsgsFeed::new(&config.feeds) {
        Ok(feed) => feed,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize seismic feed adapter");
            return ExitCode::from(1);
        }
    };

    let lookup = match SafecastLookup::new(&config.feeds) {
        Ok(lookup) => lookup,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize radiation feed adapter");
            return ExitCode::from(1);
        }
    };

    // A misconfigured notifier downgrades to report-only; the evaluation
    // cycle never depends on publication.
    let notifier: Option<WebhookNotifier> = match WebhookNotifier::from_config(&config.notifications) {
        Ok(notifier) => {
            if notifier.is_some() {
                tracing::info!("Webhook notifier initialized");
            }
            notifier
        }
        Err(e) => {
            tracing::warn!(error = %e, "Notifier unavailable, continuing report-only");
            None
        }
    };

    let simulation = cli.simulation();
    if simulation.is_some() {
        tracing::info!("Simulation mode: live feeds will not be queried");
    }

    let decision = run_cycle(
        &config.thresholds,
        simulation,
        &feed,
        &lookup,
        notifier.as_ref().map(|n| n as &dyn Notifier),
    )
    .await;

    if decision.is_alert() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
