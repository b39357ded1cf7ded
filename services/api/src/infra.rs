use civic_engine::config::DatasetConfig;
use civic_engine::methodology::{
    DatasetError, FactorRegistry, MethodologyStore, ModifierId, ScorecardEngine,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load and validate the methodology dataset. Any integrity error is fatal to the caller.
pub(crate) fn load_store(config: &DatasetConfig) -> Result<MethodologyStore, DatasetError> {
    let registry = FactorRegistry::standard();
    match &config.methodology_path {
        Some(path) => {
            info!(path = %path.display(), "loading methodology dataset from file");
            MethodologyStore::from_path(registry, path)
        }
        None => MethodologyStore::embedded(),
    }
}

pub(crate) fn scorecard_engine(config: &DatasetConfig) -> Result<ScorecardEngine, DatasetError> {
    let store = load_store(config)?;
    Ok(ScorecardEngine::new(Arc::new(store)))
}

pub(crate) fn modifier_selection(raw: &[String]) -> Vec<ModifierId> {
    raw.iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ModifierId::from)
        .collect()
}
