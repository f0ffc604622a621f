use crate::config::FeedConfig;
use crate::correlation::RadiationLookup;
use crate::error::{AppError, Result};
use crate::models::RadiationSample;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Radiation feed adapter for the Safecast measurements API
///
/// Among the measurements the API returns for a coordinate and radius, the
/// one with the minimum value is selected as "nearest". That is the feed
/// convention this system inherits, not a distance metric; the lowest
/// reading may come from the farthest station.
#[derive(Clone)]
pub struct SafecastLookup {
    client: Client,
    url: String,
}

/// Response body for the measurements endpoint
///
/// The API has served both a bare array and a `{"measurements": [...]}`
/// wrapper across versions; both decode to the same list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MeasurementsBody {
    Bare(Vec<Measurement>),
    Wrapped { measurements: Vec<Measurement> },
}

impl MeasurementsBody {
    fn into_measurements(self) -> Vec<Measurement> {
        match self {
            MeasurementsBody::Bare(measurements) => measurements,
            MeasurementsBody::Wrapped { measurements } => measurements,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Measurement {
    /// Intensity; the API emits this as a number or a numeric string
    #[serde(default)]
    value: Option<serde_json::Value>,

    #[serde(default)]
    unit: Option<String>,

    #[serde(default)]
    captured_at: Option<DateTime<Utc>>,
}

impl Measurement {
    fn numeric_value(&self) -> Option<f64> {
        match self.value.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl SafecastLookup {
    /// Create a new Safecast lookup adapter
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.safecast_url.clone(),
        })
    }

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Measurement>> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("distance", radius_km.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "Safecast feed returned non-success status {}",
                status
            )));
        }

        let body: MeasurementsBody = response.json().await?;
        Ok(body.into_measurements())
    }
}

#[async_trait]
impl RadiationLookup for SafecastLookup {
    async fn nearest(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Option<RadiationSample>> {
        let measurements = match self.fetch(latitude, longitude, radius_km).await {
            Ok(measurements) => measurements,
            Err(e) => {
                warn!(error = %e, "Radiation feed query failed");
                return Err(e);
            }
        };

        debug!(count = measurements.len(), "Fetched radiation measurements");

        // Minimum value wins; rows without a usable non-negative reading
        // are skipped.
        let selected = measurements
            .into_iter()
            .filter_map(|m| {
                let value = m.numeric_value().filter(|v| v.is_finite() && *v >= 0.0)?;
                Some(RadiationSample::new(
                    value,
                    m.unit.unwrap_or_else(|| "cpm".to_string()),
                    m.captured_at.unwrap_or_else(Utc::now),
                ))
            })
            .min_by(|a, b| a.value.total_cmp(&b.value));

        Ok(selected)
    }
}
