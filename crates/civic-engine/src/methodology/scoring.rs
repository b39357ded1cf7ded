use std::collections::BTreeMap;

use super::domain::{AdjustedScoreSet, FactorId, ModifierId, PolicyId, PolicyMethodology, ScoreSet};

/// Per-call scoring failure. Returned to the caller, never swallowed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("modifier '{modifier_id}' does not belong to policy '{policy_id}'")]
    UnknownModifier {
        policy_id: PolicyId,
        modifier_id: ModifierId,
    },
    #[error("cannot compute an overall score from an empty score set")]
    EmptyScoreSet,
}

/// Base factor scores exactly as authored.
pub fn base_scores(methodology: &PolicyMethodology) -> ScoreSet {
    methodology
        .factors
        .iter()
        .map(|(factor, score)| (factor.clone(), score.score))
        .collect()
}

/// Adjusted factor scores for a selection of the methodology's own modifiers.
///
/// Duplicate ids count once. Selected modifiers are summed in declaration order so the
/// result does not depend on how the caller ordered the selection. Deltas are totalled per
/// factor, added to the base, and clamped to `[0, 1]` a single time; factors that no selected
/// modifier mentions keep their base value untouched.
///
/// Only untouched factors are bit-exact copies of the base. Touched factors carry ordinary
/// `f64` rounding (`0.9 + 0.05` is `0.9500000000000001`), so compare them with a tolerance.
pub fn apply_modifiers(
    methodology: &PolicyMethodology,
    selection: &[ModifierId],
) -> Result<ScoreSet, ScoringError> {
    for modifier_id in selection {
        if methodology.modifier(modifier_id).is_none() {
            return Err(ScoringError::UnknownModifier {
                policy_id: methodology.policy_id.clone(),
                modifier_id: modifier_id.clone(),
            });
        }
    }

    let mut totals: BTreeMap<&FactorId, f64> = BTreeMap::new();
    for modifier in methodology
        .modifiers
        .iter()
        .filter(|modifier| selection.contains(&modifier.id))
    {
        for (factor, delta) in modifier.factor_changes.iter() {
            *totals.entry(factor).or_insert(0.0) += delta;
        }
    }

    let mut scores = base_scores(methodology);
    for (factor, total) in totals {
        if let Some(score) = scores.get_mut(factor) {
            *score = (*score + total).clamp(0.0, 1.0);
        }
    }

    Ok(scores)
}

/// Unweighted arithmetic mean of every factor score.
pub fn compute_overall_score(scores: &ScoreSet) -> Result<f64, ScoringError> {
    if scores.is_empty() {
        return Err(ScoringError::EmptyScoreSet);
    }

    let total: f64 = scores.values().sum();
    Ok(total / scores.len() as f64)
}

/// Selection with duplicates removed, keeping first-seen order.
pub(crate) fn distinct_selection(selection: &[ModifierId]) -> Vec<ModifierId> {
    let mut distinct: Vec<ModifierId> = Vec::with_capacity(selection.len());
    for modifier_id in selection {
        if !distinct.contains(modifier_id) {
            distinct.push(modifier_id.clone());
        }
    }
    distinct
}

pub fn adjusted_score_set(
    methodology: &PolicyMethodology,
    selection: &[ModifierId],
) -> Result<AdjustedScoreSet, ScoringError> {
    let scores = apply_modifiers(methodology, selection)?;
    let overall = compute_overall_score(&scores)?;

    Ok(AdjustedScoreSet {
        policy_id: methodology.policy_id.clone(),
        selected_modifiers: distinct_selection(selection),
        scores,
        overall,
    })
}
