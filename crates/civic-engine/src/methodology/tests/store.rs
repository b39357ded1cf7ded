use super::common::*;
use crate::methodology::domain::{FactorChanges, FactorId, ModifierId, PolicyId};
use crate::methodology::factors::{FactorDefinition, FactorRegistry};
use crate::methodology::store::MethodologyStore;
use crate::methodology::validation::DatasetError;

#[test]
fn embedded_dataset_scores_every_factor_for_every_policy() {
    let store = embedded_store();
    let registry = store.registry();

    assert!(!store.is_empty());
    for methodology in store.all() {
        for factor in registry.ids() {
            let score = methodology
                .factor(&factor)
                .unwrap_or_else(|| panic!("{} missing {}", methodology.policy_id, factor))
                .score;
            assert!((0.0..=1.0).contains(&score));
        }
    }
}

#[test]
fn lookup_distinguishes_scored_and_unscored_policies() {
    let store = embedded_store();

    assert!(store.contains("congress-stock-ban"));
    assert_eq!(
        store.get("congress-stock-ban").map(|m| &m.policy_id),
        Some(&PolicyId::from("congress-stock-ban"))
    );
    assert!(!store.contains("universal-basic-income"));
    assert!(store.get("universal-basic-income").is_none());
}

#[test]
fn all_preserves_dataset_order() {
    let first: Vec<_> = embedded_store()
        .all()
        .iter()
        .map(|m| m.policy_id.clone())
        .collect();
    let second: Vec<_> = embedded_store()
        .all()
        .iter()
        .map(|m| m.policy_id.clone())
        .collect();

    assert_eq!(first, second);
    assert_eq!(first[0], PolicyId::from("congress-stock-ban"));
}

#[test]
fn load_fails_when_a_factor_is_missing() {
    let mut methodology = uniform_methodology("incomplete", 0.5);
    methodology.factors.remove(&FactorId::from("north"));

    match MethodologyStore::load(registry(), vec![methodology]) {
        Err(DatasetError::MissingFactor {
            policy_id,
            factor_id,
        }) => {
            assert_eq!(policy_id, PolicyId::from("incomplete"));
            assert_eq!(factor_id, FactorId::from("north"));
        }
        other => panic!("expected missing factor, got {other:?}"),
    }
}

#[test]
fn load_fails_when_a_factor_is_not_registered() {
    let mut methodology = uniform_methodology("extra-factor", 0.5);
    set_factor(&mut methodology, "keynes", 0.5);

    assert!(matches!(
        MethodologyStore::load(registry(), vec![methodology]),
        Err(DatasetError::UnknownFactor { .. })
    ));
}

#[test]
fn load_fails_when_modifier_targets_unregistered_factor() {
    let mut methodology = uniform_methodology("bad-modifier", 0.5);
    methodology.modifiers = vec![modifier(
        "stimulus",
        FactorChanges::new().with("keynes", 0.1),
    )];

    match MethodologyStore::load(registry(), vec![methodology]) {
        Err(DatasetError::ModifierUnknownFactor {
            modifier_id,
            factor_id,
            ..
        }) => {
            assert_eq!(modifier_id, ModifierId::from("stimulus"));
            assert_eq!(factor_id, FactorId::from("keynes"));
        }
        other => panic!("expected modifier factor error, got {other:?}"),
    }
}

#[test]
fn load_fails_on_out_of_range_scores_and_deltas() {
    let mut score_too_high = uniform_methodology("too-high", 0.5);
    set_factor(&mut score_too_high, "sen", 1.2);
    assert!(matches!(
        MethodologyStore::load(registry(), vec![score_too_high]),
        Err(DatasetError::ScoreOutOfRange { .. })
    ));

    let mut wild_delta = uniform_methodology("wild-delta", 0.5);
    wild_delta.modifiers = vec![modifier("swing", FactorChanges::new().with("sen", 1.5))];
    assert!(matches!(
        MethodologyStore::load(registry(), vec![wild_delta]),
        Err(DatasetError::DeltaOutOfRange { .. })
    ));

    let mut nan_delta = uniform_methodology("nan-delta", 0.5);
    nan_delta.modifiers = vec![modifier("nan", FactorChanges::new().with("sen", f64::NAN))];
    assert!(matches!(
        MethodologyStore::load(registry(), vec![nan_delta]),
        Err(DatasetError::DeltaOutOfRange { .. })
    ));
}

#[test]
fn load_fails_on_duplicate_policies_and_modifiers() {
    let result = MethodologyStore::load(
        registry(),
        vec![
            uniform_methodology("twice", 0.5),
            uniform_methodology("twice", 0.6),
        ],
    );
    assert!(matches!(result, Err(DatasetError::DuplicatePolicy { .. })));

    let mut methodology = uniform_methodology("repeated-modifier", 0.5);
    methodology.modifiers = vec![
        modifier("same", FactorChanges::new().with("sen", 0.1)),
        modifier("same", FactorChanges::new().with("arrow", 0.1)),
    ];
    assert!(matches!(
        MethodologyStore::load(registry(), vec![methodology]),
        Err(DatasetError::DuplicateModifier { .. })
    ));
}

#[test]
fn load_checks_totality_against_the_supplied_registry() {
    let narrow = FactorRegistry::from_definitions(vec![FactorDefinition {
        id: "hayek",
        label: "Hayek",
        low_description: "low",
        high_description: "high",
    }]);

    let methodology = uniform_methodology("full", 0.5);
    assert!(matches!(
        MethodologyStore::load(narrow, vec![methodology]),
        Err(DatasetError::UnknownFactor { .. })
    ));
}

#[test]
fn json_reader_rejects_malformed_dataset() {
    let result = MethodologyStore::from_json_reader(registry(), "[{\"policy_id\": 7}]".as_bytes());
    assert!(matches!(result, Err(DatasetError::Parse(_))));
}

#[test]
fn json_reader_accepts_omitted_optional_lists() {
    let factors: serde_json::Map<String, serde_json::Value> = registry()
        .ids()
        .map(|factor| {
            (
                factor.0,
                serde_json::json!({ "score": 0.5, "reasoning": "even" }),
            )
        })
        .collect();
    let dataset = serde_json::json!([{
        "policy_id": "minimal",
        "policy_name": "Minimal",
        "description": "Minimal record",
        "overall_rationale": "None",
        "factors": factors,
    }]);

    let store = MethodologyStore::from_json_reader(registry(), dataset.to_string().as_bytes())
        .expect("minimal dataset loads");
    let methodology = store.get("minimal").expect("policy present");
    assert!(methodology.modifiers.is_empty());
    assert!(methodology.factors.values().all(|f| f.sources.is_empty()));
}

#[test]
fn from_path_reports_missing_file() {
    let result = MethodologyStore::from_path(registry(), "/nonexistent/methodologies.json");
    assert!(matches!(result, Err(DatasetError::Io { .. })));
}
