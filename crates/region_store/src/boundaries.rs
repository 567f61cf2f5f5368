//! GeoJSON boundary loader.

use std::fs;
use std::path::Path;

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use atlas_region_core::{AtlasError, AtlasResult, BoundaryRecord, Geometry};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<Map<String, JsonValue>>,
    #[serde(default)]
    geometry: JsonValue,
}

pub fn load_boundaries(path: &Path) -> AtlasResult<Vec<BoundaryRecord>> {
    let raw = fs::read_to_string(path).map_err(|err| {
        AtlasError::data_load(format!("read boundaries {}: {err}", path.display()))
    })?;
    let records = parse_boundaries(&raw)?;
    info!(
        "store: loaded {} boundaries from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn parse_boundaries(raw: &str) -> AtlasResult<Vec<BoundaryRecord>> {
    let collection: FeatureCollection = serde_json::from_str(raw)
        .map_err(|err| AtlasError::data_load(format!("parse boundaries: {err}")))?;
    if collection.kind != "FeatureCollection" {
        return Err(AtlasError::data_load(format!(
            "expected FeatureCollection, found '{}'",
            collection.kind
        )));
    }
    if collection.features.is_empty() {
        return Err(AtlasError::data_load("boundary collection has no features"));
    }

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            let properties = feature.properties.unwrap_or_default();
            Ok(BoundaryRecord {
                district: required_property(&properties, "district", index)?,
                regency: required_property(&properties, "regency", index)?,
                geometry: Geometry(feature.geometry),
            })
        })
        .collect()
}

fn required_property(
    properties: &Map<String, JsonValue>,
    name: &str,
    index: usize,
) -> AtlasResult<String> {
    match properties.get(name).and_then(JsonValue::as_str) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(AtlasError::data_load(format!(
            "feature {index} missing property '{name}'"
        ))),
    }
}
