use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Slug identifying one scoring dimension, e.g. `hayek`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorId(pub String);

/// Opaque key shared with the external policy catalogue.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyId(pub String);

/// Modifier identifier, unique only within its parent policy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierId(pub String);

impl FactorId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FactorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PolicyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PolicyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ModifierId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModifierId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authored score for one factor of one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub score: f64,
    pub reasoning: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Sparse per-factor adjustments. A factor without an entry has a delta of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorChanges(BTreeMap<FactorId, f64>);

impl FactorChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, factor: &str, delta: f64) -> Self {
        self.0.insert(FactorId::from(factor), delta);
        self
    }

    pub fn delta(&self, factor: &FactorId) -> f64 {
        self.0.get(factor).copied().unwrap_or(0.0)
    }

    pub fn affects(&self, factor: &FactorId) -> bool {
        self.0.contains_key(factor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FactorId, f64)> {
        self.0.iter().map(|(factor, delta)| (factor, *delta))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Optional amendment to a policy's design that shifts some factor scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub id: ModifierId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub factor_changes: FactorChanges,
}

/// Complete authored scorecard for one policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyMethodology {
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub description: String,
    pub overall_rationale: String,
    pub factors: BTreeMap<FactorId, FactorScore>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl PolicyMethodology {
    pub fn modifier(&self, id: &ModifierId) -> Option<&Modifier> {
        self.modifiers.iter().find(|modifier| &modifier.id == id)
    }

    pub fn factor(&self, id: &FactorId) -> Option<&FactorScore> {
        self.factors.get(id)
    }
}

/// Total mapping from factor to score, base or adjusted.
pub type ScoreSet = BTreeMap<FactorId, f64>;

/// Derived result for one policy and one modifier selection. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedScoreSet {
    pub policy_id: PolicyId,
    pub selected_modifiers: Vec<ModifierId>,
    pub scores: ScoreSet,
    pub overall: f64,
}
