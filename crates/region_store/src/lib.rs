pub mod boundaries;
pub mod catalog;
pub mod config;
pub mod metrics;

pub use atlas_region_core::*;
pub use boundaries::{load_boundaries, parse_boundaries};
pub use catalog::{
    RegionCatalog, RegionDataset, RegionEntry, load_or_init_config, open_catalog,
};
pub use config::{
    AtlasConfig, DEFAULT_CONFIG_NAME, MapConfig, RegionConfig, RegionDataConfig,
    resolve_data_path,
};
pub use metrics::{REQUIRED_METRIC_COLUMNS, TOTAL_COLUMNS, load_metrics, read_metrics};
