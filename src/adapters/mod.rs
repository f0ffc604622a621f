use crate::models::SeismicEvent;
use async_trait::async_trait;

pub mod safecast;
pub mod usgs;

pub use safecast::SafecastLookup;
pub use usgs::UsgsFeed;

/// Source of recent seismic events
///
/// Implementations return events in the feed's own order (most recent
/// first) and degrade every failure to an empty list; the engine treats
/// "feed down" and "legitimately no data" identically.
#[async_trait]
pub trait SeismicFeed: Send + Sync {
    async fn recent_events(&self, lookback_minutes: f64) -> Vec<SeismicEvent>;
}
