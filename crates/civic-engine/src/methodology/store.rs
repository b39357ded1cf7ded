use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{error, info};

use super::domain::{PolicyId, PolicyMethodology};
use super::factors::FactorRegistry;
use super::validation::{validate_methodology, DatasetError};

const EMBEDDED_METHODOLOGIES: &str = include_str!("../../data/methodologies.json");

/// Validated, read-only index of policy methodologies keyed by policy id.
#[derive(Debug, Clone)]
pub struct MethodologyStore {
    registry: FactorRegistry,
    methodologies: Vec<PolicyMethodology>,
    index: HashMap<PolicyId, usize>,
}

impl MethodologyStore {
    /// Validate every record against the registry. Any integrity problem aborts the load.
    pub fn load(
        registry: FactorRegistry,
        methodologies: Vec<PolicyMethodology>,
    ) -> Result<Self, DatasetError> {
        let mut index = HashMap::with_capacity(methodologies.len());

        for (position, methodology) in methodologies.iter().enumerate() {
            if let Err(err) = validate_methodology(&registry, methodology) {
                error!(policy = %methodology.policy_id, %err, "methodology failed validation");
                return Err(err);
            }

            if index
                .insert(methodology.policy_id.clone(), position)
                .is_some()
            {
                let err = DatasetError::DuplicatePolicy {
                    policy_id: methodology.policy_id.clone(),
                };
                error!(%err, "methodology dataset rejected");
                return Err(err);
            }
        }

        info!(
            policies = methodologies.len(),
            factors = registry.len(),
            "methodology dataset loaded"
        );

        Ok(Self {
            registry,
            methodologies,
            index,
        })
    }

    /// The dataset compiled into the crate, scored against the standard registry.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json_reader(FactorRegistry::standard(), EMBEDDED_METHODOLOGIES.as_bytes())
    }

    pub fn from_json_reader<R: Read>(
        registry: FactorRegistry,
        reader: R,
    ) -> Result<Self, DatasetError> {
        let methodologies: Vec<PolicyMethodology> = serde_json::from_reader(reader)?;
        Self::load(registry, methodologies)
    }

    pub fn from_path<P: AsRef<Path>>(
        registry: FactorRegistry,
        path: P,
    ) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_reader(registry, BufReader::new(file))
    }

    pub fn registry(&self) -> &FactorRegistry {
        &self.registry
    }

    /// `None` means the policy has not been scored yet, which is not an error.
    pub fn get(&self, policy_id: &str) -> Option<&PolicyMethodology> {
        self.index
            .get(&PolicyId::from(policy_id))
            .map(|position| &self.methodologies[*position])
    }

    pub fn contains(&self, policy_id: &str) -> bool {
        self.index.contains_key(&PolicyId::from(policy_id))
    }

    /// Dataset order, stable across calls.
    pub fn all(&self) -> &[PolicyMethodology] {
        &self.methodologies
    }

    pub fn len(&self) -> usize {
        self.methodologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methodologies.is_empty()
    }
}
