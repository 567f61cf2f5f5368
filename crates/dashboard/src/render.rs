//! Render frame handed to the UI: region options, map layer data and the
//! metrics panel. Plain data only; colours, popups and layout are the
//! renderer's concern.

use atlas_region_core::{
    DrilldownSummary, RegionSetId, SelectedDistrict, build_choropleth, feature_collection,
    summarize,
};
use atlas_region_store::{RegionCatalog, RegionEntry};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::ipc::HostError;

/// Property the renderer joins features on.
pub const KEY_ON: &str = "feature.properties.district";
/// Property the choropleth is shaded by.
pub const VALUE_FIELD: &str = "total";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FieldLabel {
    pub field: &'static str,
    pub alias: &'static str,
}

const POPUP_FIELDS: [FieldLabel; 4] = [
    FieldLabel {
        field: "district",
        alias: "District: ",
    },
    FieldLabel {
        field: "active",
        alias: "Active Students: ",
    },
    FieldLabel {
        field: "inactive",
        alias: "Inactive Students: ",
    },
    FieldLabel {
        field: "total",
        alias: "Total Students: ",
    },
];

const TOOLTIP_FIELDS: [FieldLabel; 1] = [FieldLabel {
    field: "district",
    alias: "District: ",
}];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
    pub tiles: String,
    pub legend_name: String,
    pub layer_name: String,
    pub key_on: &'static str,
    pub value_field: &'static str,
    pub popup: Vec<FieldLabel>,
    pub tooltip: Vec<FieldLabel>,
    pub features: JsonValue,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionOption {
    pub id: RegionSetId,
    pub label: String,
    pub available: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum MetricsPanel {
    NoSelection,
    NoData {
        title: String,
        district: String,
        regency: String,
    },
    Summary {
        title: String,
        headline: String,
        summary: DrilldownSummary,
    },
}

impl MetricsPanel {
    pub fn for_selection(selected: &SelectedDistrict, summary: DrilldownSummary) -> Self {
        let title = format!("{} in {} Facts", selected.district, selected.regency);
        if summary.is_empty() {
            return Self::NoData {
                title,
                district: selected.district.clone(),
                regency: selected.regency.clone(),
            };
        }
        let headline = format!(
            "{} students live in {}, out of {} students in {}",
            summary.total_sum, selected.district, summary.regency_total_sum, selected.regency
        );
        Self::Summary {
            title,
            headline,
            summary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    pub region: RegionSetId,
    pub regions: Vec<RegionOption>,
    pub map: Option<MapView>,
    pub panel: MetricsPanel,
}

pub fn region_options(catalog: &RegionCatalog, active: &RegionSetId) -> Vec<RegionOption> {
    catalog
        .entries()
        .iter()
        .map(|entry| RegionOption {
            id: entry.id(),
            label: entry.config.display_label().to_string(),
            available: entry.is_available(),
            active: entry.config.id == active.as_str(),
        })
        .collect()
}

/// Rebuild the map layer for a region; `None` when it has no data.
pub fn map_view(catalog: &RegionCatalog, entry: &RegionEntry) -> Result<Option<MapView>, HostError> {
    let Some(dataset) = &entry.dataset else {
        return Ok(None);
    };
    let rows = build_choropleth(&dataset.boundaries, &dataset.metrics)?;
    let config = catalog.config();
    let map = config.map();
    let (center, zoom) = config.view_for(&entry.config);
    Ok(Some(MapView {
        center,
        zoom,
        tiles: map.tiles.unwrap_or_else(|| "CartoDB positron".to_string()),
        legend_name: map.legend_name.unwrap_or_else(|| "Total Students".to_string()),
        layer_name: map
            .layer_name
            .unwrap_or_else(|| "Students by District".to_string()),
        key_on: KEY_ON,
        value_field: VALUE_FIELD,
        popup: POPUP_FIELDS.to_vec(),
        tooltip: TOOLTIP_FIELDS.to_vec(),
        features: feature_collection(&rows),
    }))
}

/// Metrics panel for the current selection, read from the raw metrics table.
pub fn metrics_panel(entry: &RegionEntry, selected: Option<&SelectedDistrict>) -> MetricsPanel {
    match (selected, &entry.dataset) {
        (Some(selected), Some(dataset)) => {
            MetricsPanel::for_selection(selected, summarize(&dataset.metrics, selected))
        }
        (Some(selected), None) => MetricsPanel::for_selection(selected, DrilldownSummary::default()),
        (None, _) => MetricsPanel::NoSelection,
    }
}
