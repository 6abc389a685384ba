//! FILENAME: core/gridvis/tests/test_summary.rs
//! PURPOSE: Revenue summary variant end to end.

mod common;

use common::{revenue_row, TestHarness};
use gridvis::model::FieldDescriptor;
use gridvis::{CellContent, GapFill, SummaryOptions, TableVis, Trend, VisError};

#[test]
fn test_ranking_example() {
    let mut harness = TestHarness::with_revenue_data();
    let output = harness.render_summary().unwrap();
    let summary = output.summary.as_ref().unwrap();

    assert_eq!(summary.latest_period.as_deref(), Some("2024-02"));
    let order: Vec<(&str, f64)> = summary
        .rows
        .iter()
        .map(|r| (r.entity_name.as_str(), r.current_value))
        .collect();
    assert_eq!(order, vec![("B", 30.0), ("A", 20.0)]);

    let a = &summary.rows[1];
    assert_eq!(a.trailing, vec![10.0, 20.0]);
    assert_eq!(a.trend, Trend::Up);
    assert!((summary.rows[0].percent_of_total - 60.0).abs() < 1e-9);
    assert!((a.percent_of_total - 40.0).abs() < 1e-9);
}

#[test]
fn test_summary_cells() {
    let mut harness = TestHarness::with_revenue_data();
    let output = harness.render_summary().unwrap();
    let painted = output.paint(&harness.input, None);

    assert_eq!(painted.len(), 2);
    let b = &painted[0];
    assert_eq!(b[0].content.as_text(), Some("B"));
    assert_eq!(b[1].content.as_text(), Some("$30"));
    match &b[3].content {
        CellContent::ShareBar { label, fill_percent, .. } => {
            assert_eq!(label, "60.0%");
            assert!((fill_percent - 100.0).abs() < 1e-9);
        }
        other => panic!("expected share bar, got {:?}", other),
    }
    match &painted[1][3].content {
        CellContent::ShareBar { label, fill_percent, .. } => {
            assert_eq!(label, "40.0%");
            assert!((fill_percent - 200.0 / 3.0).abs() < 1e-9);
        }
        other => panic!("expected share bar, got {:?}", other),
    }
}

#[test]
fn test_entity_header_rename() {
    let mut harness = TestHarness::with_revenue_data();
    let output = harness.render_summary().unwrap();
    assert_eq!(output.columns.columns[0].header, "Service");

    harness.set_options(&[("rename_billing.service", "Product")]);
    let output = harness.render_summary().unwrap();
    assert_eq!(output.columns.columns[0].header, "Product");
    assert!(!output.recomputed.summary);
    assert!(output.recomputed.columns);
}

#[test]
fn test_duplicate_pairs_sum() {
    let mut harness = TestHarness::with_revenue_data();
    harness.input.rows.push(revenue_row("A", "2024-02", 15.0));
    let output = harness.render_summary().unwrap();
    let summary = output.summary.as_ref().unwrap();
    let names: Vec<&str> = summary.rows.iter().map(|r| r.entity_name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(summary.rows[0].current_value, 35.0);
}

#[test]
fn test_omit_gap_fill() {
    let mut harness = TestHarness::with_revenue_data();
    harness.vis = TableVis::with_summary_options(SummaryOptions {
        gap_fill: GapFill::Omit,
        ..Default::default()
    });
    let output = harness.render_summary().unwrap();
    let b = &output.summary.as_ref().unwrap().rows[0];
    assert_eq!(b.trailing, vec![30.0]);
}

#[test]
fn test_shape_error() {
    let mut harness = TestHarness::with_revenue_data();
    harness.input.schema.fields.dimension_like.truncate(1);
    match harness.render_summary() {
        Err(VisError::SummaryShape { dimensions }) => assert_eq!(dimensions, 1),
        other => panic!("expected shape error, got {:?}", other.map(|o| o.kind)),
    }
}

#[test]
fn test_measure_from_rows_when_schema_has_none() {
    let mut harness = TestHarness::with_revenue_data();
    harness.input.schema.fields.measure_like.clear();
    let output = harness.render_summary().unwrap();
    let summary = output.summary.as_ref().unwrap();
    assert_eq!(summary.keys.measure_key, "billing.revenue");
    assert_eq!(summary.total, 50.0);

    harness.input.schema = harness
        .input
        .schema
        .clone()
        .with_measure(FieldDescriptor::new("billing.revenue"));
    assert!(harness.render_summary().is_ok());
}

#[test]
fn test_zero_total_share_reads_zero_percent() {
    let mut harness = TestHarness::with_revenue_data();
    harness.input.rows = vec![revenue_row("A", "2024-01", 0.0)];
    let output = harness.render_summary().unwrap();
    assert_eq!(output.summary.as_ref().unwrap().total, 0.0);

    let painted = output.paint(&harness.input, None);
    match &painted[0][3].content {
        CellContent::ShareBar { label, fill_percent, .. } => {
            assert_eq!(label, "0%");
            assert_eq!(*fill_percent, 0.0);
        }
        other => panic!("expected share bar, got {:?}", other),
    }
}
