//! Policy methodology scoring: the factor catalogue, the validated methodology dataset,
//! modifier application, and overall score aggregation.
//!
//! Everything here is read-only after load. Scoring functions are pure and can be called
//! from any number of threads without coordination.

pub mod domain;
pub mod export;
pub mod factors;
pub mod router;
pub mod scorecard;
pub mod scoring;
pub mod store;
mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    AdjustedScoreSet, FactorChanges, FactorId, FactorScore, Modifier, ModifierId, PolicyId,
    PolicyMethodology, ScoreSet,
};
pub use export::write_scorecard_csv;
pub use factors::{FactorDefinition, FactorNotFound, FactorRegistry};
pub use router::{methodology_router, ScorecardRequest};
pub use scorecard::{
    FactorScoreRow, ModifierImpact, PolicySummary, RankingEntry, Scorecard, ScorecardEngine,
    ScorecardError,
};
pub use scoring::{
    adjusted_score_set, apply_modifiers, base_scores, compute_overall_score, ScoringError,
};
pub use store::MethodologyStore;
pub use validation::DatasetError;
