pub mod engine;
pub mod models;

pub use engine::{evaluate, evaluate_simulated, RadiationLookup};
pub use models::{Decision, DecisionKind, Evidence, Reason, SimulatedReading, Thresholds};
