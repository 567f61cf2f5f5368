use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use atlas_region_core::{AtlasError, AtlasResult, RegionSetId};

pub const DEFAULT_CONFIG_NAME: &str = "atlas.json";

const DEFAULT_CENTER: [f64; 2] = [-6.206867, 106.8248906];
const DEFAULT_ZOOM: u8 = 11;

/// Boundary and metrics files for one region set, relative to the data dir
/// unless absolute.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegionDataConfig {
    pub boundaries: String,
    pub metrics: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RegionConfig {
    pub id: String,
    pub label: Option<String>,
    /// Regions listed without data stay selectable but render no map.
    pub data: Option<RegionDataConfig>,
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
}

impl RegionConfig {
    fn with_data(id: &str, boundaries: &str, metrics: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            data: Some(RegionDataConfig {
                boundaries: boundaries.to_string(),
                metrics: metrics.to_string(),
            }),
            center: None,
            zoom: None,
        }
    }

    fn listed(id: &str) -> Self {
        Self {
            id: id.to_string(),
            label: None,
            data: None,
            center: None,
            zoom: None,
        }
    }

    pub fn region_id(&self) -> RegionSetId {
        RegionSetId::new(self.id.clone())
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MapConfig {
    pub tiles: Option<String>,
    pub legend_name: Option<String>,
    pub layer_name: Option<String>,
    pub center: Option<[f64; 2]>,
    pub zoom: Option<u8>,
}

impl MapConfig {
    pub fn with_defaults() -> Self {
        Self {
            tiles: Some("CartoDB positron".to_string()),
            legend_name: Some("Total Students".to_string()),
            layer_name: Some("Students by District".to_string()),
            center: Some(DEFAULT_CENTER),
            zoom: Some(DEFAULT_ZOOM),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AtlasConfig {
    pub regions: Vec<RegionConfig>,
    pub map: Option<MapConfig>,
}

impl AtlasConfig {
    pub fn with_defaults() -> Self {
        Self {
            regions: vec![
                RegionConfig::with_data(
                    "Jakarta",
                    "data/jakarta_formatted.geojson",
                    "data/jakarta_metrics.csv",
                ),
                RegionConfig::with_data(
                    "Jabodetabek",
                    "data/jabodetabek_formatted.geojson",
                    "data/jabodetabek_metrics.csv",
                ),
                RegionConfig::listed("Jawa Barat"),
                RegionConfig::listed("Surabaya"),
            ],
            map: Some(MapConfig::with_defaults()),
        }
    }

    pub fn load_or_init(base_dir: &Path) -> AtlasResult<Self> {
        fs::create_dir_all(base_dir)
            .map_err(|err| AtlasError::data_load(format!("create config dir: {err}")))?;
        let config_path = base_dir.join(DEFAULT_CONFIG_NAME);
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .map_err(|err| AtlasError::data_load(format!("read config: {err}")))?;
            let config: AtlasConfig =
                serde_json::from_str(&raw).map_err(|err| AtlasError::invalid(err.to_string()))?;
            config.validate()?;
            return Ok(config);
        }
        let default = AtlasConfig::with_defaults();
        let payload = serde_json::to_string_pretty(&default)
            .map_err(|err| AtlasError::data_load(format!("serialize config: {err}")))?;
        fs::write(&config_path, payload)
            .map_err(|err| AtlasError::data_load(format!("write config: {err}")))?;
        Ok(default)
    }

    pub fn validate(&self) -> AtlasResult<()> {
        if self.regions.is_empty() {
            return Err(AtlasError::invalid("config lists no regions"));
        }
        let mut seen = HashSet::new();
        for region in &self.regions {
            if region.id.trim().is_empty() {
                return Err(AtlasError::invalid("region id must not be blank"));
            }
            if !seen.insert(region.id.as_str()) {
                return Err(AtlasError::invalid(format!(
                    "duplicate region id '{}'",
                    region.id
                )));
            }
        }
        Ok(())
    }

    pub fn region_ids(&self) -> Vec<RegionSetId> {
        self.regions.iter().map(RegionConfig::region_id).collect()
    }

    pub fn region(&self, id: &RegionSetId) -> Option<&RegionConfig> {
        self.regions.iter().find(|region| region.id == id.as_str())
    }

    pub fn map(&self) -> MapConfig {
        self.map.clone().unwrap_or_else(MapConfig::with_defaults)
    }

    /// Region override, then map default, then the built-in view.
    pub fn view_for(&self, region: &RegionConfig) -> ([f64; 2], u8) {
        let map = self.map();
        let center = region.center.or(map.center).unwrap_or(DEFAULT_CENTER);
        let zoom = region.zoom.or(map.zoom).unwrap_or(DEFAULT_ZOOM);
        (center, zoom)
    }
}

pub fn resolve_data_path(base_dir: &Path, path: &str) -> PathBuf {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_list_four_regions_with_two_datasets() {
        let config = AtlasConfig::with_defaults();
        let ids: Vec<&str> = config.regions.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["Jakarta", "Jabodetabek", "Jawa Barat", "Surabaya"]);
        assert_eq!(config.regions.iter().filter(|r| r.data.is_some()).count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_duplicate_and_blank_ids() {
        let mut config = AtlasConfig::with_defaults();
        config.regions.push(RegionConfig::listed("Jakarta"));
        assert!(config.validate().is_err());

        let mut config = AtlasConfig::with_defaults();
        config.regions.push(RegionConfig::listed(" "));
        assert!(config.validate().is_err());

        let config = AtlasConfig {
            regions: Vec::new(),
            map: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn view_prefers_region_override() {
        let mut config = AtlasConfig::with_defaults();
        config.regions[1].center = Some([-6.4, 106.8]);
        config.regions[1].zoom = Some(9);
        assert_eq!(config.view_for(&config.regions[0]), (DEFAULT_CENTER, DEFAULT_ZOOM));
        assert_eq!(config.view_for(&config.regions[1]), ([-6.4, 106.8], 9));
    }

    #[test]
    fn resolve_keeps_absolute_paths() {
        let base = Path::new("/srv/atlas");
        assert_eq!(
            resolve_data_path(base, "data/a.csv"),
            PathBuf::from("/srv/atlas/data/a.csv")
        );
        assert_eq!(resolve_data_path(base, "/tmp/b.csv"), PathBuf::from("/tmp/b.csv"));
    }
}
