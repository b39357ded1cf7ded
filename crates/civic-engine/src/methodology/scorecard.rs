use std::cmp::Ordering;
use std::sync::Arc;

use serde::Serialize;

use super::domain::{
    AdjustedScoreSet, FactorId, ModifierId, PolicyId, PolicyMethodology, ScoreSet,
};
use super::factors::FactorRegistry;
use super::scoring::{adjusted_score_set, base_scores, compute_overall_score, ScoringError};
use super::store::MethodologyStore;

/// One factor row of a scorecard, in registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScoreRow {
    pub factor_id: FactorId,
    pub label: &'static str,
    pub base: f64,
    pub adjusted: f64,
    pub delta: f64,
}

/// Presentation-neutral scorecard for a policy and a modifier selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub selected_modifiers: Vec<ModifierId>,
    pub rows: Vec<FactorScoreRow>,
    pub base_overall: f64,
    pub adjusted_overall: f64,
}

impl Scorecard {
    pub fn overall_delta(&self) -> f64 {
        self.adjusted_overall - self.base_overall
    }
}

/// Effect of selecting a single modifier on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifierImpact {
    pub modifier_id: ModifierId,
    pub name: String,
    pub affected_factors: Vec<FactorId>,
    pub adjusted_overall: f64,
    pub overall_delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicySummary {
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub description: String,
    pub modifier_count: usize,
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScorecardError {
    #[error("no methodology has been authored for policy '{0}'")]
    PolicyNotFound(PolicyId),
    #[error("policy '{policy_id}' has no score for factor '{factor_id}'")]
    IncompleteScores {
        policy_id: PolicyId,
        factor_id: FactorId,
    },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Stateless facade over the store used by the HTTP and CLI surfaces.
#[derive(Debug, Clone)]
pub struct ScorecardEngine {
    store: Arc<MethodologyStore>,
}

impl ScorecardEngine {
    pub fn new(store: Arc<MethodologyStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MethodologyStore {
        &self.store
    }

    fn methodology(&self, policy_id: &str) -> Result<&PolicyMethodology, ScorecardError> {
        self.store
            .get(policy_id)
            .ok_or_else(|| ScorecardError::PolicyNotFound(PolicyId::from(policy_id)))
    }

    /// Adjusted scores and overall for a policy; duplicate ids in `selection` count once.
    pub fn adjusted(
        &self,
        policy_id: &str,
        selection: &[ModifierId],
    ) -> Result<AdjustedScoreSet, ScorecardError> {
        let methodology = self.methodology(policy_id)?;
        Ok(adjusted_score_set(methodology, selection)?)
    }

    pub fn scorecard(
        &self,
        policy_id: &str,
        selection: &[ModifierId],
    ) -> Result<Scorecard, ScorecardError> {
        let methodology = self.methodology(policy_id)?;
        let base = base_scores(methodology);
        let base_overall = compute_overall_score(&base)?;
        let adjusted = adjusted_score_set(methodology, selection)?;

        let rows = scorecard_rows(
            self.store.registry(),
            &methodology.policy_id,
            &base,
            &adjusted.scores,
        )?;

        Ok(Scorecard {
            policy_id: methodology.policy_id.clone(),
            policy_name: methodology.policy_name.clone(),
            selected_modifiers: adjusted.selected_modifiers,
            rows,
            base_overall,
            adjusted_overall: adjusted.overall,
        })
    }

    pub fn modifier_impacts(&self, policy_id: &str) -> Result<Vec<ModifierImpact>, ScorecardError> {
        let methodology = self.methodology(policy_id)?;
        let base_overall = compute_overall_score(&base_scores(methodology))?;

        methodology
            .modifiers
            .iter()
            .map(|modifier| -> Result<ModifierImpact, ScorecardError> {
                let adjusted = adjusted_score_set(methodology, std::slice::from_ref(&modifier.id))?;
                Ok(ModifierImpact {
                    modifier_id: modifier.id.clone(),
                    name: modifier.name.clone(),
                    affected_factors: modifier
                        .factor_changes
                        .iter()
                        .map(|(factor, _)| factor.clone())
                        .collect(),
                    adjusted_overall: adjusted.overall,
                    overall_delta: adjusted.overall - base_overall,
                })
            })
            .collect()
    }

    pub fn summaries(&self) -> Result<Vec<PolicySummary>, ScorecardError> {
        self.store
            .all()
            .iter()
            .map(|methodology| -> Result<PolicySummary, ScorecardError> {
                Ok(PolicySummary {
                    policy_id: methodology.policy_id.clone(),
                    policy_name: methodology.policy_name.clone(),
                    description: methodology.description.clone(),
                    modifier_count: methodology.modifiers.len(),
                    overall: compute_overall_score(&base_scores(methodology))?,
                })
            })
            .collect()
    }

    /// Policies by base overall score, highest first; ties fall back to policy id.
    pub fn rankings(&self) -> Result<Vec<RankingEntry>, ScorecardError> {
        let mut summaries = self.summaries()?;
        summaries.sort_by(|left, right| {
            right
                .overall
                .partial_cmp(&left.overall)
                .unwrap_or(Ordering::Equal)
                .then_with(|| left.policy_id.cmp(&right.policy_id))
        });

        Ok(summaries
            .into_iter()
            .enumerate()
            .map(|(position, summary)| RankingEntry {
                rank: position + 1,
                policy_id: summary.policy_id,
                policy_name: summary.policy_name,
                overall: summary.overall,
            })
            .collect())
    }
}

/// One row per registered factor. A factor missing from either score set is an error,
/// never a silently shorter scorecard.
pub(crate) fn scorecard_rows(
    registry: &FactorRegistry,
    policy_id: &PolicyId,
    base: &ScoreSet,
    adjusted: &ScoreSet,
) -> Result<Vec<FactorScoreRow>, ScorecardError> {
    registry
        .list()
        .iter()
        .map(|definition| {
            let factor_id = FactorId::from(definition.id);
            let (Some(&base_score), Some(&adjusted_score)) =
                (base.get(&factor_id), adjusted.get(&factor_id))
            else {
                return Err(ScorecardError::IncompleteScores {
                    policy_id: policy_id.clone(),
                    factor_id,
                });
            };

            Ok(FactorScoreRow {
                factor_id,
                label: definition.label,
                base: base_score,
                adjusted: adjusted_score,
                delta: adjusted_score - base_score,
            })
        })
        .collect()
}
