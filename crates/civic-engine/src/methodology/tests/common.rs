use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::methodology::domain::{
    FactorChanges, FactorId, FactorScore, Modifier, ModifierId, PolicyId, PolicyMethodology,
};
use crate::methodology::factors::FactorRegistry;
use crate::methodology::scorecard::ScorecardEngine;
use crate::methodology::store::MethodologyStore;

pub(super) fn registry() -> FactorRegistry {
    FactorRegistry::standard()
}

pub(super) fn factor_score(score: f64) -> FactorScore {
    FactorScore {
        score,
        reasoning: "fixture reasoning".to_string(),
        key_points: vec!["first point".to_string(), "second point".to_string()],
        sources: Vec::new(),
    }
}

/// Methodology scoring every registered factor at `score`.
pub(super) fn uniform_methodology(policy_id: &str, score: f64) -> PolicyMethodology {
    let factors: BTreeMap<FactorId, FactorScore> = registry()
        .ids()
        .map(|factor| (factor, factor_score(score)))
        .collect();

    PolicyMethodology {
        policy_id: PolicyId::from(policy_id),
        policy_name: format!("{policy_id} fixture"),
        description: "fixture policy".to_string(),
        overall_rationale: "fixture rationale".to_string(),
        factors,
        modifiers: Vec::new(),
    }
}

pub(super) fn modifier(id: &str, changes: FactorChanges) -> Modifier {
    Modifier {
        id: ModifierId::from(id),
        name: format!("{id} modifier"),
        description: "fixture modifier".to_string(),
        factor_changes: changes,
    }
}

pub(super) fn set_factor(methodology: &mut PolicyMethodology, factor: &str, score: f64) {
    methodology
        .factors
        .insert(FactorId::from(factor), factor_score(score));
}

pub(super) fn ids(raw: &[&str]) -> Vec<ModifierId> {
    raw.iter().map(|id| ModifierId::from(*id)).collect()
}

pub(super) fn embedded_store() -> MethodologyStore {
    MethodologyStore::embedded().expect("embedded dataset is valid")
}

pub(super) fn engine() -> ScorecardEngine {
    ScorecardEngine::new(Arc::new(embedded_store()))
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
