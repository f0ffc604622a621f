use crate::adapters::SeismicFeed;
use crate::config::FeedConfig;
use crate::error::{AppError, Result};
use crate::models::SeismicEvent;
use async_trait::async_trait;
use chrono::{Duration, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

/// Seismic feed adapter for the USGS FDSN event service
///
/// Always queries unfiltered (`minmagnitude=0`) and lets the engine apply
/// its own magnitude threshold; the feed-level filter is not relied on for
/// correctness.
#[derive(Clone)]
pub struct UsgsFeed {
    client: Client,
    url: String,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
    geometry: FeatureGeometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    /// Magnitude; the feed emits JSON null for unreviewed events
    mag: Option<f64>,

    /// Origin time, epoch milliseconds
    time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    /// `[longitude, latitude, depth_km]`; depth may be null or missing
    #[serde(default)]
    coordinates: Vec<Option<f64>>,
}

impl UsgsFeed {
    /// Create a new USGS feed adapter
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.usgs_url.clone(),
        })
    }

    async fn fetch(&self, lookback_minutes: f64) -> Result<Vec<SeismicEvent>> {
        let (start, end) = lookback_window(lookback_minutes);
        let start_iso = start.to_rfc3339_opts(SecondsFormat::Secs, true);
        let end_iso = end.to_rfc3339_opts(SecondsFormat::Secs, true);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("format", "geojson"),
                ("starttime", start_iso.as_str()),
                ("endtime", end_iso.as_str()),
                // Unfiltered on purpose; the engine applies the magnitude gate.
                ("minmagnitude", "0"),
                ("orderby", "time"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "USGS feed returned non-success status {}",
                status
            )));
        }

        let collection: FeatureCollection = response.json().await?;

        // Preserve feed order (most recent first); never re-sort.
        let events = collection
            .features
            .into_iter()
            .filter_map(|feature| {
                let lon = feature.geometry.coordinates.first().copied().flatten()?;
                let lat = feature.geometry.coordinates.get(1).copied().flatten()?;
                let depth_km = feature.geometry.coordinates.get(2).copied().flatten();
                let time_ms = feature.properties.time?;
                Some(SeismicEvent::new(
                    feature.properties.mag,
                    depth_km,
                    lat,
                    lon,
                    time_ms,
                ))
            })
            .collect();

        Ok(events)
    }
}

/// Trailing query window ending now
///
/// A non-finite or negative `lookback_minutes` collapses to an empty window,
/// and an out-of-range one saturates instead of wrapping, so a pathological
/// configured value can never produce a start after the end.
fn lookback_window(lookback_minutes: f64) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    let end = Utc::now();

    let millis = lookback_minutes * 60_000.0;
    let millis = if millis.is_finite() { millis.max(0.0) } else { 0.0 };

    // The f64 -> i64 cast saturates; try_milliseconds rejects what chrono
    // cannot represent.
    let span = Duration::try_milliseconds(millis as i64).unwrap_or(Duration::MAX);

    (end.checked_sub_signed(span).unwrap_or(chrono::DateTime::<Utc>::MIN_UTC), end)
}

#[async_trait]
impl SeismicFeed for UsgsFeed {
    async fn recent_events(&self, lookback_minutes: f64) -> Vec<SeismicEvent> {
        match self.fetch(lookback_minutes).await {
            Ok(events) => {
                debug!(count = events.len(), "Fetched seismic events");
                events
            }
            Err(e) => {
                warn!(error = %e, "Seismic feed query failed, treating as no data");
                Vec::new()
            }
        }
    }
}
