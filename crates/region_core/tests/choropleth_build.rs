use atlas_region_core::{
    AtlasError, BoundaryRecord, Geometry, MetricsRecord, build_choropleth,
};
use serde_json::json;

fn boundary(district: &str, regency: &str, geom: &str) -> BoundaryRecord {
    BoundaryRecord {
        district: district.into(),
        regency: regency.into(),
        geometry: Geometry(json!({"type": "Polygon", "id": geom})),
    }
}

fn metric(
    district: &str,
    regency: &str,
    branch: &str,
    active: u64,
    inactive: u64,
    total: u64,
) -> MetricsRecord {
    MetricsRecord {
        district: district.into(),
        standardized_district: district.into(),
        regency: regency.into(),
        subdistrict: "s1".into(),
        branch_name: branch.into(),
        active,
        inactive,
        total,
    }
}

#[test]
fn concrete_scenario_zero_fills_unmatched_boundary() {
    let boundaries = vec![boundary("A", "X", "g1"), boundary("B", "X", "g2")];
    let metrics = vec![metric("A", "X", "b1", 3, 1, 4)];

    let rows = build_choropleth(&boundaries, &metrics).expect("build");
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].district, "A");
    assert_eq!((rows[0].active, rows[0].inactive, rows[0].total), (3, 1, 4));
    assert_eq!(rows[0].geometry, boundaries[0].geometry);

    assert_eq!(rows[1].district, "B");
    assert_eq!((rows[1].active, rows[1].inactive, rows[1].total), (0, 0, 0));
    assert_eq!(rows[1].geometry, boundaries[1].geometry);
}

#[test]
fn output_length_always_matches_boundaries() {
    let metrics = vec![
        metric("A", "X", "b1", 3, 1, 4),
        metric("Z", "Y", "b2", 8, 0, 8),
        metric("Not Found", "X", "b3", 2, 2, 4),
    ];
    for size in 1..=12 {
        let boundaries: Vec<BoundaryRecord> = (0..size)
            .map(|index| {
                let name = if index % 3 == 0 { "A".to_string() } else { format!("D{index}") };
                boundary(&name, "X", &format!("g{index}"))
            })
            .collect();
        let rows = build_choropleth(&boundaries, &metrics).expect("build");
        assert_eq!(rows.len(), boundaries.len());
        for (row, source) in rows.iter().zip(&boundaries) {
            assert_eq!(row.district, source.district);
            if source.district == "A" {
                assert_eq!(row.total, 4);
            } else {
                assert_eq!(row.counts(), Default::default());
            }
        }
    }
}

#[test]
fn build_is_idempotent() {
    let boundaries = vec![boundary("A", "X", "g1"), boundary("B", "X", "g2")];
    let metrics = vec![
        metric("A", "X", "b1", 3, 1, 4),
        metric("B", "X", "b2", 1, 1, 2),
        metric("B", "X", "b3", 0, 5, 5),
    ];
    let first = build_choropleth(&boundaries, &metrics).expect("first");
    let second = build_choropleth(&boundaries, &metrics).expect("second");
    assert_eq!(first, second);
    assert_eq!((first[1].active, first[1].inactive, first[1].total), (1, 6, 7));
}

#[test]
fn join_keys_ignore_case_and_whitespace() {
    let boundaries = vec![boundary("Kebayoran Baru", "Jakarta Selatan", "g1")];
    let metrics = vec![
        metric(" KEBAYORAN  BARU", "jakarta selatan ", "b1", 4, 0, 4),
        metric("kebayoran baru", "JAKARTA SELATAN", "b2", 1, 1, 2),
    ];
    let rows = build_choropleth(&boundaries, &metrics).expect("build");
    assert_eq!(rows[0].district, "Kebayoran Baru");
    assert_eq!(rows[0].total, 6);
}

#[test]
fn same_district_in_other_regency_does_not_match() {
    let boundaries = vec![boundary("Cilandak", "Jakarta Selatan", "g1")];
    let metrics = vec![metric("Cilandak", "Depok", "b1", 4, 0, 4)];
    let rows = build_choropleth(&boundaries, &metrics).expect("build");
    assert_eq!(rows[0].total, 0);
}

#[test]
fn total_is_preserved_not_recomputed() {
    let boundaries = vec![boundary("A", "X", "g1")];
    let metrics = vec![metric("A", "X", "b1", 3, 1, 10)];
    let rows = build_choropleth(&boundaries, &metrics).expect("build");
    assert_eq!(rows[0].total, 10);
}

#[test]
fn empty_inputs_are_data_load_errors() {
    let boundaries = vec![boundary("A", "X", "g1")];
    let metrics = vec![metric("A", "X", "b1", 3, 1, 4)];

    let err = build_choropleth(&[], &metrics).expect_err("no boundaries");
    assert!(matches!(err, AtlasError::DataLoad { .. }));
    let err = build_choropleth(&boundaries, &[]).expect_err("no metrics");
    assert!(matches!(err, AtlasError::DataLoad { .. }));
}
