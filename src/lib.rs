//! detonation-watch correlates two public data feeds, seismic event reports
//! and ambient radiation measurements, and flags co-located coincident
//! anomalies consistent with a ground-level detonation: a shallow seismic
//! event plus an elevated radiation reading at the same location.
//!
//! It is a monitoring utility, not a detection instrument. Upstream sources
//! are trusted for raw measurements; this crate adds only correlation and
//! thresholding. The decision logic lives in [`correlation`]; everything
//! else is feed plumbing and reporting.

pub mod adapters;
pub mod config;
pub mod correlation;
pub mod error;
pub mod models;
pub mod notifications;
pub mod runner;
