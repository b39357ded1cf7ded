//! End-to-end checks against the embedded methodology dataset through the public API only.

use std::sync::Arc;
use std::thread;

use civic_engine::methodology::{
    apply_modifiers, compute_overall_score, write_scorecard_csv, FactorId, MethodologyStore,
    ModifierId, ScorecardEngine, ScoringError,
};

fn store() -> MethodologyStore {
    MethodologyStore::embedded().expect("embedded dataset is valid")
}

fn selection(raw: &[&str]) -> Vec<ModifierId> {
    raw.iter().map(|id| ModifierId::from(*id)).collect()
}

#[test]
fn congress_stock_ban_strong_penalties_scenario() {
    let store = store();
    let methodology = store.get("congress-stock-ban").expect("policy present");
    let olson = FactorId::from("olson");

    assert_eq!(methodology.factors[&olson].score, 0.9);

    let adjusted =
        apply_modifiers(methodology, &selection(&["strong-penalties"])).expect("adjusted");
    assert!((adjusted[&olson] - 0.95).abs() < 1e-9);

    let duplicated = apply_modifiers(
        methodology,
        &selection(&["strong-penalties", "strong-penalties"]),
    )
    .expect("adjusted");
    assert_eq!(adjusted, duplicated);
}

#[test]
fn wealth_tax_irs_enforcement_leaves_buchanan_alone() {
    let store = store();
    let methodology = store
        .get("ultra-millionaire-wealth-tax")
        .expect("policy present");

    let adjusted =
        apply_modifiers(methodology, &selection(&["irs-enforcement"])).expect("adjusted");

    assert_eq!(adjusted[&FactorId::from("buchanan")], 0.3);
}

#[test]
fn cross_policy_modifier_is_a_usage_error() {
    let store = store();
    let wealth_tax = store
        .get("ultra-millionaire-wealth-tax")
        .expect("policy present");

    let result = apply_modifiers(wealth_tax, &selection(&["strong-penalties"]));

    assert!(matches!(
        result,
        Err(ScoringError::UnknownModifier { .. })
    ));
}

#[test]
fn overall_scores_are_means_within_bounds() {
    let store = store();
    for methodology in store.all() {
        let scores = apply_modifiers(methodology, &[]).expect("base scores");
        let overall = compute_overall_score(&scores).expect("overall");
        let expected = scores.values().sum::<f64>() / scores.len() as f64;
        assert_eq!(overall, expected);
        assert!((0.0..=1.0).contains(&overall));
    }
}

#[test]
fn concurrent_readers_observe_identical_scorecards() {
    let engine = ScorecardEngine::new(Arc::new(store()));
    let expected = engine
        .scorecard("carbon-fee-and-dividend", &selection(&["border-adjustment"]))
        .expect("scorecard");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || {
                engine
                    .scorecard("carbon-fee-and-dividend", &selection(&["border-adjustment"]))
                    .expect("scorecard")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), expected);
    }
}

#[test]
fn scorecard_exports_one_csv_row_per_factor() {
    let engine = ScorecardEngine::new(Arc::new(store()));
    let scorecard = engine
        .scorecard("participatory-budgeting", &selection(&["equity-weighting"]))
        .expect("scorecard");

    let mut buffer = Vec::new();
    write_scorecard_csv(&scorecard, &mut buffer).expect("csv written");
    let output = String::from_utf8(buffer).expect("utf8");

    assert_eq!(output.lines().count(), 1 + engine.store().registry().len());
    assert!(output.contains("sen,Sen: Capabilities,0.700,0.850,+0.150"));
}
