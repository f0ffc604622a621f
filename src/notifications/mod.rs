use crate::error::Result;
use async_trait::async_trait;

pub mod report;
pub mod webhook;

pub use report::{log_decision, render_alert, render_simulation};
pub use webhook::WebhookNotifier;

/// Opaque publish capability
///
/// Whoever holds credentials or endpoint URLs lives behind this trait; the
/// rest of the system only hands over a rendered message. Publication
/// failure must never fail an evaluation cycle.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, message: &str) -> Result<()>;
}
