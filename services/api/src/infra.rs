use facility_intel::config::DataConfig;
use facility_intel::directory::{
    CsvFacilityRepository, DataLoadError, DirectoryService, IntelligenceStore,
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

pub(crate) type SnapshotDirectory = DirectoryService<CsvFacilityRepository, IntelligenceStore>;

/// Load both snapshots once; they stay immutable for the life of the process.
pub(crate) fn load_directory(config: &DataConfig) -> Result<SnapshotDirectory, DataLoadError> {
    let repository =
        CsvFacilityRepository::from_path(&config.facilities_path, &config.jurisdiction)?;
    let intelligence = IntelligenceStore::from_path(&config.intelligence_path)?;

    info!(
        facilities = repository.len(),
        intelligence_records = intelligence.facility_count(),
        benchmarks = intelligence.benchmark_count(),
        jurisdiction = %config.jurisdiction,
        "loaded directory snapshots"
    );

    Ok(DirectoryService::new(
        Arc::new(repository),
        Arc::new(intelligence),
    ))
}
