//! Policy methodology scoring for classroom policy deliberation.
//!
//! The library owns the factor catalogue, the validated methodology dataset, and the
//! pure scoring functions that derive adjusted factor scores and overall scores from it.

pub mod config;
pub mod error;
pub mod methodology;
pub mod telemetry;
