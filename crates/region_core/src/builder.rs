//! Boundary/metrics join producing the choropleth table.

use std::collections::HashMap;

use log::{debug, info};
use serde_json::{Value as JsonValue, json};

use crate::error::{AtlasError, AtlasResult};
use crate::key::DistrictKey;
use crate::records::{BoundaryRecord, ChoroplethRow, Counts, MetricsRecord};

/// Sum metrics per normalized `(standardized_district, regency)`.
pub fn aggregate_by_district(metrics: &[MetricsRecord]) -> HashMap<DistrictKey, Counts> {
    let mut totals: HashMap<DistrictKey, Counts> = HashMap::new();
    for record in metrics {
        totals.entry(record.key()).or_default().add(record.counts());
    }
    totals
}

/// Join boundaries against per-district metric totals.
///
/// The output has exactly one row per boundary, in boundary order. Boundaries
/// without metrics get zero counts; metrics without a boundary are left out
/// (drilldown keeps reading the raw metrics table, so they are not lost).
pub fn build_choropleth(
    boundaries: &[BoundaryRecord],
    metrics: &[MetricsRecord],
) -> AtlasResult<Vec<ChoroplethRow>> {
    if boundaries.is_empty() {
        return Err(AtlasError::data_load("boundary dataset is empty"));
    }
    if metrics.is_empty() {
        return Err(AtlasError::data_load("metrics dataset is empty"));
    }
    for (index, boundary) in boundaries.iter().enumerate() {
        if boundary.district.trim().is_empty() {
            return Err(AtlasError::data_load(format!(
                "boundary {index} has a blank district"
            )));
        }
        if boundary.regency.trim().is_empty() {
            return Err(AtlasError::data_load(format!(
                "boundary {index} has a blank regency"
            )));
        }
    }

    let totals = aggregate_by_district(metrics);
    let mut matched = 0usize;
    let rows: Vec<ChoroplethRow> = boundaries
        .iter()
        .map(|boundary| {
            let counts = match totals.get(&boundary.key()) {
                Some(counts) => {
                    matched += 1;
                    *counts
                }
                None => Counts::default(),
            };
            ChoroplethRow {
                district: boundary.district.clone(),
                regency: boundary.regency.clone(),
                geometry: boundary.geometry.clone(),
                active: counts.active,
                inactive: counts.inactive,
                total: counts.total,
            }
        })
        .collect();

    info!(
        "core: choropleth built rows={} matched={} metric_districts={}",
        rows.len(),
        matched,
        totals.len()
    );
    debug!(
        "core: choropleth zero-filled {} boundaries",
        rows.len() - matched
    );
    Ok(rows)
}

/// GeoJSON handed to the map renderer, keyed on `feature.properties.district`.
pub fn feature_collection(rows: &[ChoroplethRow]) -> JsonValue {
    let features: Vec<JsonValue> = rows
        .iter()
        .map(|row| {
            json!({
                "type": "Feature",
                "properties": {
                    "district": row.district,
                    "regency": row.regency,
                    "active": row.active,
                    "inactive": row.inactive,
                    "total": row.total,
                },
                "geometry": row.geometry,
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
