use crate::config::NotificationConfig;
use crate::error::{AppError, Result};
use crate::notifications::Notifier;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

/// Webhook notification sender
///
/// Posts a JSON text payload to a URL resolved from the environment. Config
/// names the environment variable; the URL itself never appears in config
/// files or logs.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    /// Build a notifier from config, resolving the webhook URL from the
    /// environment variable the config names. Returns `Ok(None)` when
    /// webhooks are disabled or the variable is unset.
    pub fn from_config(config: &NotificationConfig) -> Result<Option<Self>> {
        if !config.webhook_enabled {
            return Ok(None);
        }

        let url = match std::env::var(&config.webhook_url_env) {
            Ok(url) if !url.is_empty() => url,
            _ => {
                return Err(AppError::Configuration(format!(
                    "Webhook enabled but {} is not set",
                    config.webhook_url_env
                )))
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.webhook_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Some(Self { client, url }))
    }

    /// Build a notifier against an explicit URL (tests, one-off tooling)
    pub fn with_url(url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, message: &str) -> Result<()> {
        let notification_id = Uuid::new_v4();

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .header("User-Agent", "detonation-watch/0.1")
            .json(&json!({ "text": message }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout("Webhook request timed out".to_string())
                } else {
                    AppError::Publish(format!("Webhook request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let err = AppError::Publish(format!(
                "Webhook returned non-success status {}",
                status
            ));
            error!(notification_id = %notification_id, error = %err, "Failed to publish notification");
            return Err(err);
        }

        info!(notification_id = %notification_id, "Notification published");
        Ok(())
    }
}
