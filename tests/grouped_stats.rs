//! End-to-end behaviour of the grouped statistics: dataset in, rows out.
//!
//! Run with: cargo test --test grouped_stats

use wine_stats::data::loader::load_json_str;
use wine_stats::data::model::{FieldValue, WineRecord};
use wine_stats::stats::engine::{StatsRow, compute, group_values};
use wine_stats::stats::{StatsTable, flavanoids_by_alcohol, gamma, gamma_by_class};

const EPS: f64 = 1e-9;

fn by_class(records: &[WineRecord]) -> Vec<StatsRow> {
    compute(
        records,
        |r| r.get("Class").map(|c| format!("Class {c}")),
        |r| r.number("Flavanoids"),
    )
}

fn dataset(json: &str) -> Vec<WineRecord> {
    load_json_str(json).unwrap().records
}

// ============================================================================
// Engine over records
// ============================================================================

#[test]
fn mixed_encodings_group_by_class() {
    let records = dataset(
        r#"[
            {"Class": 1, "Flavanoids": "3.0"},
            {"Class": 1, "Flavanoids": 2.0},
            {"Class": 2, "Flavanoids": 4.0}
        ]"#,
    );
    let rows = by_class(&records);

    assert_eq!(
        rows,
        vec![
            StatsRow { label: "Class 1".into(), mean: 2.5, median: 2.5, mode: Some(3.0) },
            StatsRow { label: "Class 2".into(), mean: 4.0, median: 4.0, mode: Some(4.0) },
        ]
    );
}

#[test]
fn non_numeric_measurement_is_excluded() {
    let records = dataset(
        r#"[
            {"Class": 1, "Flavanoids": "abc"},
            {"Class": 1, "Flavanoids": 1.0},
            {"Class": 1, "Flavanoids": 3.0}
        ]"#,
    );
    let rows = by_class(&records);

    assert_eq!(rows.len(), 1);
    assert!((rows[0].mean - 2.0).abs() < EPS);
    assert!(!rows[0].mean.is_nan());
    assert_eq!(rows[0].mode, Some(1.0));
}

#[test]
fn group_with_only_invalid_values_is_omitted() {
    let records = dataset(
        r#"[
            {"Class": 1, "Flavanoids": "abc"},
            {"Class": 2, "Flavanoids": 0.5},
            {"Class": 3}
        ]"#,
    );
    let rows = by_class(&records);

    assert_eq!(rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(), vec!["Class 2"]);
}

#[test]
fn mean_matches_sum_over_count_for_every_group() {
    let records: Vec<WineRecord> = (0..40)
        .map(|i| {
            WineRecord::from_iter([
                ("Class", FieldValue::Integer(i % 3)),
                ("Flavanoids", FieldValue::Float(0.37 * i as f64 + 0.1)),
            ])
        })
        .collect();

    let groups = group_values(
        &records,
        |r| r.get("Class").map(|c| format!("Class {c}")),
        |r| r.number("Flavanoids"),
    );
    let rows = by_class(&records);

    assert_eq!(rows.len(), groups.len());
    for row in &rows {
        let values = &groups[row.label.as_str()];
        let expected = values.iter().sum::<f64>() / values.len() as f64;
        assert!(
            (row.mean - expected).abs() < EPS,
            "{}: mean {} != {}",
            row.label,
            row.mean,
            expected
        );
    }
}

#[test]
fn median_uses_sorted_copy() {
    let records = dataset(
        r#"[
            {"Class": 1, "Flavanoids": 9.0},
            {"Class": 1, "Flavanoids": 1.0},
            {"Class": 1, "Flavanoids": 5.0},
            {"Class": 2, "Flavanoids": 8.0},
            {"Class": 2, "Flavanoids": 2.0},
            {"Class": 2, "Flavanoids": 4.0},
            {"Class": 2, "Flavanoids": 6.0}
        ]"#,
    );
    let rows = by_class(&records);

    assert_eq!(rows[0].median, 5.0);
    assert_eq!(rows[1].median, 5.0);
    // Sorting did not reorder the stored values: first value is still the mode.
    assert_eq!(rows[0].mode, Some(9.0));
    assert_eq!(rows[1].mode, Some(8.0));
}

#[test]
fn computing_twice_gives_identical_rows() {
    let records = dataset(
        r#"[
            {"Class": 3, "Flavanoids": 0.7},
            {"Class": 1, "Flavanoids": 2.9},
            {"Class": 3, "Flavanoids": 0.7},
            {"Class": 1, "Flavanoids": "3.1"}
        ]"#,
    );
    let first = by_class(&records);
    let second = by_class(&records);

    assert_eq!(first, second);
    assert_eq!(first[0].label, "Class 3");
}

#[test]
fn empty_dataset_yields_no_rows() {
    assert!(by_class(&[]).is_empty());
    assert!(gamma_by_class().compute(&[]).is_empty());
}

// ============================================================================
// Gamma configuration
// ============================================================================

#[test]
fn zero_magnesium_gamma_is_dropped() {
    let records = dataset(
        r#"[
            {"Class": 1, "Ash": 2.0, "Hue": 1.0, "Magnesium": 0},
            {"Class": 1, "Ash": 2.0, "Hue": 1.0, "Magnesium": 100},
            {"Class": 2, "Ash": 0.0, "Hue": 1.0, "Magnesium": 0}
        ]"#,
    );
    assert_eq!(gamma(&records[0]), Some(f64::INFINITY));
    assert!(gamma(&records[2]).is_some_and(f64::is_nan));

    let rows = gamma_by_class().compute(&records);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, "Class 1");
    assert!((rows[0].mean - 0.02).abs() < EPS);
    assert!(rows[0].mean.is_finite());
}

#[test]
fn both_tables_share_one_validation_policy() {
    let records = dataset(
        r#"[
            {"Alcohol": 1, "Class": 1, "Flavanoids": "x", "Ash": "2.0", "Hue": 1.0, "Magnesium": 100},
            {"Alcohol": 1, "Class": 1, "Flavanoids": 2.0, "Ash": 2.0, "Hue": "oops", "Magnesium": 100},
            {"Alcohol": 2, "Class": 2, "Flavanoids": 1.0, "Ash": 3.0, "Hue": 1.0, "Magnesium": 150}
        ]"#,
    );

    let flav = flavanoids_by_alcohol().compute(&records);
    let gam = gamma_by_class().compute(&records);

    assert_eq!(flav.len(), 2);
    assert_eq!(flav[0].mean, 2.0);
    assert_eq!(gam.len(), 2);
    assert!((gam[0].mean - 0.02).abs() < EPS);
    assert!((gam[1].mean - 0.02).abs() < EPS);
}

// ============================================================================
// Display tables
// ============================================================================

#[test]
fn tables_round_only_at_display() {
    let records = dataset(
        r#"[
            {"Alcohol": 1, "Class": 1, "Flavanoids": 1.0, "Ash": 2.43, "Hue": 1.04, "Magnesium": 127},
            {"Alcohol": 1, "Class": 1, "Flavanoids": 2.0, "Ash": 2.14, "Hue": 1.05, "Magnesium": 100}
        ]"#,
    );

    let flav = StatsTable::build(&flavanoids_by_alcohol(), &records);
    assert_eq!(flav.rows[0].mean, 1.5);
    assert_eq!(flav.lines[0].cells, vec!["1.50"]);

    let gam = StatsTable::build(&gamma_by_class(), &records);
    let exact = (2.43 * 1.04 / 127.0 + 2.14 * 1.05 / 100.0) / 2.0;
    assert!((gam.rows[0].mean - exact).abs() < EPS);
    assert_eq!(gam.lines[0].cells, vec![format!("{exact:.3}")]);
}
