//! Region catalog: every configured region set with its loaded tables.
//!
//! Files are read once when the catalog opens; the tables are immutable
//! afterwards and shared by every render.

use std::path::{Path, PathBuf};

use log::{info, warn};

use atlas_region_core::{
    AtlasError, AtlasResult, BoundaryRecord, MetricsRecord, RegionSetId, build_choropleth,
    unmatched_metric_keys,
};

use crate::boundaries::load_boundaries;
use crate::config::{AtlasConfig, RegionConfig, resolve_data_path};
use crate::metrics::load_metrics;

#[derive(Clone, Debug)]
pub struct RegionDataset {
    pub boundaries: Vec<BoundaryRecord>,
    pub metrics: Vec<MetricsRecord>,
}

impl RegionDataset {
    /// Load both files and validate them by running the join once.
    pub fn load(base_dir: &Path, region: &RegionConfig) -> AtlasResult<Option<Self>> {
        let Some(data) = &region.data else {
            return Ok(None);
        };
        let boundaries = load_boundaries(&resolve_data_path(base_dir, &data.boundaries))?;
        let metrics = load_metrics(&resolve_data_path(base_dir, &data.metrics))?;
        build_choropleth(&boundaries, &metrics)
            .map_err(|err| AtlasError::data_load(format!("region '{}': {err}", region.id)))?;

        let unmatched = unmatched_metric_keys(&boundaries, &metrics);
        if !unmatched.is_empty() {
            warn!(
                "store: region '{}' has {} metric districts without a boundary",
                region.id,
                unmatched.len()
            );
        }
        Ok(Some(Self {
            boundaries,
            metrics,
        }))
    }
}

#[derive(Clone, Debug)]
pub struct RegionEntry {
    pub config: RegionConfig,
    pub dataset: Option<RegionDataset>,
}

impl RegionEntry {
    pub fn id(&self) -> RegionSetId {
        self.config.region_id()
    }

    pub fn is_available(&self) -> bool {
        self.dataset.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct RegionCatalog {
    config: AtlasConfig,
    entries: Vec<RegionEntry>,
}

impl RegionCatalog {
    pub fn load(config: AtlasConfig, base_dir: &Path) -> AtlasResult<Self> {
        config.validate()?;
        let mut entries = Vec::with_capacity(config.regions.len());
        for region in &config.regions {
            let dataset = RegionDataset::load(base_dir, region)?;
            entries.push(RegionEntry {
                config: region.clone(),
                dataset,
            });
        }
        let available = entries.iter().filter(|entry| entry.is_available()).count();
        info!(
            "store: catalog ready regions={} available={}",
            entries.len(),
            available
        );
        Ok(Self { config, entries })
    }

    /// Build a catalog from tables already in memory (fixtures, tools).
    pub fn from_entries(config: AtlasConfig, entries: Vec<RegionEntry>) -> AtlasResult<Self> {
        config.validate()?;
        Ok(Self { config, entries })
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    pub fn region_ids(&self) -> Vec<RegionSetId> {
        self.entries.iter().map(RegionEntry::id).collect()
    }

    pub fn entry(&self, id: &RegionSetId) -> Option<&RegionEntry> {
        self.entries
            .iter()
            .find(|entry| entry.config.id == id.as_str())
    }

    /// Loaded tables for `id`, or `RegionUnavailable` when it has none.
    pub fn dataset(&self, id: &RegionSetId) -> AtlasResult<&RegionDataset> {
        self.entry(id)
            .and_then(|entry| entry.dataset.as_ref())
            .ok_or_else(|| AtlasError::region_unavailable(id.as_str()))
    }
}

pub fn load_or_init_config(base: &Path) -> AtlasResult<AtlasConfig> {
    AtlasConfig::load_or_init(base)
}

/// Load config and every region dataset off the async runtime's core threads.
pub async fn open_catalog(base: &Path) -> AtlasResult<RegionCatalog> {
    let config = load_or_init_config(base)?;
    let base: PathBuf = base.to_path_buf();
    tokio::task::spawn_blocking(move || RegionCatalog::load(config, &base))
        .await
        .map_err(|err| AtlasError::data_load(format!("catalog loader task failed: {err}")))?
}
