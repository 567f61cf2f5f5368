//! District drilldown over the raw metrics table.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::key::{is_unresolved_district, normalize_key_text};
use crate::records::MetricsRecord;
use crate::selection::SelectedDistrict;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRow {
    pub subdistrict: String,
    pub branch_name: String,
    pub active: u64,
    pub inactive: u64,
    pub total: u64,
}

impl From<&MetricsRecord> for DetailRow {
    fn from(record: &MetricsRecord) -> Self {
        Self {
            subdistrict: record.subdistrict.clone(),
            branch_name: record.branch_name.clone(),
            active: record.active,
            inactive: record.inactive,
            total: record.total,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrilldownSummary {
    pub active_sum: u64,
    pub inactive_sum: u64,
    pub total_sum: u64,
    /// Sum of `total` over every row in the selected regency.
    pub regency_total_sum: u64,
    /// Rows in the regency whose district could not be standardized.
    pub unresolved_rows: usize,
    pub unresolved_total: u64,
    pub detail_rows: Vec<DetailRow>,
}

impl DrilldownSummary {
    /// No branch matched the selected district.
    pub fn is_empty(&self) -> bool {
        self.detail_rows.is_empty()
    }
}

/// Summarize the selected district.
///
/// Rows are matched on normalized regency first (giving the regency total),
/// then on normalized `standardized_district`. Detail rows are ordered by
/// `active` descending; `sort_by` is stable, so ties keep input order.
pub fn summarize(metrics: &[MetricsRecord], selected: &SelectedDistrict) -> DrilldownSummary {
    let regency = normalize_key_text(&selected.regency);
    let district = normalize_key_text(&selected.district);

    let in_regency: Vec<&MetricsRecord> = metrics
        .iter()
        .filter(|record| normalize_key_text(&record.regency) == regency)
        .collect();

    let mut summary = DrilldownSummary::default();
    for record in &in_regency {
        summary.regency_total_sum = summary.regency_total_sum.saturating_add(record.total);
        if is_unresolved_district(&record.standardized_district) {
            summary.unresolved_rows += 1;
            summary.unresolved_total = summary.unresolved_total.saturating_add(record.total);
        }
    }

    let mut detail_rows: Vec<DetailRow> = in_regency
        .into_iter()
        .filter(|record| normalize_key_text(&record.standardized_district) == district)
        .map(DetailRow::from)
        .collect();
    detail_rows.sort_by(|left, right| right.active.cmp(&left.active));

    for row in &detail_rows {
        summary.active_sum = summary.active_sum.saturating_add(row.active);
        summary.inactive_sum = summary.inactive_sum.saturating_add(row.inactive);
        summary.total_sum = summary.total_sum.saturating_add(row.total);
    }
    summary.detail_rows = detail_rows;

    debug!(
        "core: drilldown district={} regency={} rows={} total={} regency_total={}",
        selected.district,
        selected.regency,
        summary.detail_rows.len(),
        summary.total_sum,
        summary.regency_total_sum
    );
    summary
}
