use std::collections::HashSet;
use std::path::PathBuf;

use super::domain::{FactorId, ModifierId, PolicyId, PolicyMethodology};
use super::factors::FactorRegistry;

/// Integrity failure in the methodology dataset. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read methodology dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("methodology dataset is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("policy '{policy_id}' has more than one methodology")]
    DuplicatePolicy { policy_id: PolicyId },
    #[error("policy '{policy_id}' has no score for factor '{factor_id}'")]
    MissingFactor {
        policy_id: PolicyId,
        factor_id: FactorId,
    },
    #[error("policy '{policy_id}' scores unregistered factor '{factor_id}'")]
    UnknownFactor {
        policy_id: PolicyId,
        factor_id: FactorId,
    },
    #[error("policy '{policy_id}' factor '{factor_id}' score {score} is outside [0, 1]")]
    ScoreOutOfRange {
        policy_id: PolicyId,
        factor_id: FactorId,
        score: f64,
    },
    #[error("policy '{policy_id}' declares modifier '{modifier_id}' more than once")]
    DuplicateModifier {
        policy_id: PolicyId,
        modifier_id: ModifierId,
    },
    #[error(
        "policy '{policy_id}' modifier '{modifier_id}' changes unregistered factor '{factor_id}'"
    )]
    ModifierUnknownFactor {
        policy_id: PolicyId,
        modifier_id: ModifierId,
        factor_id: FactorId,
    },
    #[error(
        "policy '{policy_id}' modifier '{modifier_id}' delta {delta} for '{factor_id}' is outside [-1, 1]"
    )]
    DeltaOutOfRange {
        policy_id: PolicyId,
        modifier_id: ModifierId,
        factor_id: FactorId,
        delta: f64,
    },
}

/// Checks a single methodology against the registry: total factor coverage, score
/// bounds, and modifier references.
pub(crate) fn validate_methodology(
    registry: &FactorRegistry,
    methodology: &PolicyMethodology,
) -> Result<(), DatasetError> {
    let policy_id = &methodology.policy_id;

    for factor_id in registry.ids() {
        if !methodology.factors.contains_key(&factor_id) {
            return Err(DatasetError::MissingFactor {
                policy_id: policy_id.clone(),
                factor_id,
            });
        }
    }

    for (factor_id, factor) in &methodology.factors {
        if !registry.contains(factor_id) {
            return Err(DatasetError::UnknownFactor {
                policy_id: policy_id.clone(),
                factor_id: factor_id.clone(),
            });
        }
        if !(0.0..=1.0).contains(&factor.score) {
            return Err(DatasetError::ScoreOutOfRange {
                policy_id: policy_id.clone(),
                factor_id: factor_id.clone(),
                score: factor.score,
            });
        }
    }

    let mut seen = HashSet::new();
    for modifier in &methodology.modifiers {
        if !seen.insert(&modifier.id) {
            return Err(DatasetError::DuplicateModifier {
                policy_id: policy_id.clone(),
                modifier_id: modifier.id.clone(),
            });
        }

        for (factor_id, delta) in modifier.factor_changes.iter() {
            if !registry.contains(factor_id) {
                return Err(DatasetError::ModifierUnknownFactor {
                    policy_id: policy_id.clone(),
                    modifier_id: modifier.id.clone(),
                    factor_id: factor_id.clone(),
                });
            }
            // NaN fails the range check too.
            if !(-1.0..=1.0).contains(&delta) {
                return Err(DatasetError::DeltaOutOfRange {
                    policy_id: policy_id.clone(),
                    modifier_id: modifier.id.clone(),
                    factor_id: factor_id.clone(),
                    delta,
                });
            }
        }
    }

    Ok(())
}
