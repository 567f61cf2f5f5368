//! CSV loader for branch-level metrics.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};

use atlas_region_core::{AtlasError, AtlasResult, MetricsRecord, duplicate_metric_rows};

pub const REQUIRED_METRIC_COLUMNS: [&str; 6] = [
    "standardized_district",
    "regency",
    "subdistrict",
    "branch_name",
    "active",
    "inactive",
];

/// Either header satisfies the `total` column.
pub const TOTAL_COLUMNS: [&str; 2] = ["total", "jumlah_siswa"];

pub fn load_metrics(path: &Path) -> AtlasResult<Vec<MetricsRecord>> {
    let file = File::open(path)
        .map_err(|err| AtlasError::data_load(format!("open metrics {}: {err}", path.display())))?;
    let records = read_metrics(file)?;
    info!(
        "store: loaded {} metrics rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

pub fn read_metrics<R: Read>(reader: R) -> AtlasResult<Vec<MetricsRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|err| AtlasError::data_load(format!("read metrics header: {err}")))?
        .clone();
    check_columns(&headers)?;

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<MetricsRecord>().enumerate() {
        let record = result
            .map_err(|err| AtlasError::data_load(format!("metrics row {}: {err}", index + 1)))?;
        records.push(record);
    }

    let duplicates = duplicate_metric_rows(&records);
    if !duplicates.is_empty() {
        warn!(
            "store: {} metrics rows repeat an earlier district/branch key (kept as-is)",
            duplicates.len()
        );
    }
    Ok(records)
}

fn check_columns(headers: &StringRecord) -> AtlasResult<()> {
    let has = |name: &str| headers.iter().any(|header| header == name);
    for column in REQUIRED_METRIC_COLUMNS {
        if !has(column) {
            return Err(AtlasError::data_load(format!(
                "metrics file missing column '{column}'"
            )));
        }
    }
    if !TOTAL_COLUMNS.iter().any(|column| has(column)) {
        return Err(AtlasError::data_load(
            "metrics file missing column 'total' (or 'jumlah_siswa')",
        ));
    }
    if TOTAL_COLUMNS.iter().all(|column| has(column)) {
        return Err(AtlasError::data_load(
            "metrics file has both 'total' and 'jumlah_siswa' columns; keep one",
        ));
    }
    Ok(())
}
