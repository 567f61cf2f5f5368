//! Data-quality checks reported by loaders and the `check-data` task.

use std::collections::{BTreeSet, HashSet};

use crate::key::{DistrictKey, normalize_key_text};
use crate::records::{BoundaryRecord, MetricsRecord};

/// Distinct metric keys that no boundary matches, sorted.
///
/// These districts are dropped from the map but still reachable by drilldown.
pub fn unmatched_metric_keys(
    boundaries: &[BoundaryRecord],
    metrics: &[MetricsRecord],
) -> Vec<DistrictKey> {
    let known: HashSet<DistrictKey> = boundaries.iter().map(BoundaryRecord::key).collect();
    metrics
        .iter()
        .map(MetricsRecord::key)
        .filter(|key| !known.contains(key))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Indices of rows repeating an earlier district/regency/subdistrict/branch.
pub fn duplicate_metric_rows(metrics: &[MetricsRecord]) -> Vec<usize> {
    let mut seen = HashSet::new();
    metrics
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let key = (
                record.key(),
                normalize_key_text(&record.subdistrict),
                normalize_key_text(&record.branch_name),
            );
            if seen.insert(key) { None } else { Some(index) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Geometry;

    fn boundary(district: &str) -> BoundaryRecord {
        BoundaryRecord {
            district: district.into(),
            regency: "X".into(),
            geometry: Geometry::default(),
        }
    }

    fn metric(district: &str, branch: &str) -> MetricsRecord {
        MetricsRecord {
            district: district.into(),
            standardized_district: district.into(),
            regency: "X".into(),
            subdistrict: "s1".into(),
            branch_name: branch.into(),
            active: 1,
            inactive: 0,
            total: 1,
        }
    }

    #[test]
    fn unmatched_keys_are_distinct_and_sorted() {
        let keys = unmatched_metric_keys(
            &[boundary("A")],
            &[
                metric("a", "b1"),
                metric("Not Found", "b2"),
                metric("C", "b3"),
                metric("not found", "b4"),
            ],
        );
        assert_eq!(
            keys,
            vec![DistrictKey::new("C", "X"), DistrictKey::new("Not Found", "X")]
        );
    }

    #[test]
    fn duplicates_report_later_occurrences_only() {
        let rows = [
            metric("A", "b1"),
            metric("A", "b2"),
            metric("a ", "B1"),
            metric("A", "b1"),
        ];
        assert_eq!(duplicate_metric_rows(&rows), vec![2, 3]);
    }
}
