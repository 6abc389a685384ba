//! FILENAME: core/gridvis/tests/test_pipeline.rs
//! PURPOSE: JSON entry points, memoization and host-owned sort state.

mod common;

use common::{TestHarness, ORDER_CONFIG_JSON, ORDER_ROWS_JSON, ORDER_SCHEMA_JSON};
use gridvis::model::TableVariant;
use gridvis::{CellContent, SortDirection, SortState, TableInput, TableKind, TableVis, Value};

// ============================================================================
// JSON INPUT
// ============================================================================

#[test]
fn test_decodes_host_payloads() {
    let input = TableInput::from_json(ORDER_SCHEMA_JSON, ORDER_ROWS_JSON, ORDER_CONFIG_JSON).unwrap();
    assert_eq!(input.rows.len(), 2);
    assert!(input.schema.pivots.is_empty());
    assert_eq!(input.config.rename("orders.count"), Some("Order Count"));

    let mut vis = TableVis::new();
    let output = vis.update(&input, TableKind::Standard).unwrap();
    assert_eq!(output.title.as_deref(), Some("Orders by Region"));
    assert_eq!(output.variant, TableVariant::Bordered);
    assert_eq!(output.row_borders, vec![1]);

    let headers: Vec<&str> = output.columns.columns.iter().map(|c| c.header.as_str()).collect();
    assert_eq!(headers, vec!["Region", "Order Count", "Sentiment"]);
}

#[test]
fn test_json_cells_render() {
    let input = TableInput::from_json(ORDER_SCHEMA_JSON, ORDER_ROWS_JSON, ORDER_CONFIG_JSON).unwrap();
    let mut vis = TableVis::new();
    let output = vis.render(&input);
    let painted = output.paint(&input, None);

    assert_eq!(
        painted[0][0].content,
        CellContent::Markup { html: "<b>North</b>".to_string() }
    );
    assert_eq!(painted[0][1].content.as_text(), Some("12 orders"));
    match &painted[0][2].content {
        CellContent::Sentiment { class, date, .. } => {
            assert_eq!(class, "sentiment-positive");
            assert_eq!(date.as_deref(), Some("2024-03-01"));
        }
        other => panic!("expected sentiment, got {:?}", other),
    }
    assert_eq!(painted[1][1].content, CellContent::Empty);
}

#[test]
fn test_malformed_payload_is_error() {
    assert!(TableInput::from_json("{", "[]", "{}").is_err());
    assert!(TableInput::from_json("{}", "[]", "[]").is_err());
    assert!(TableInput::from_json("{}", "[]", "{}").is_ok());
}

#[test]
fn test_pivoted_rows_decode() {
    let schema = r#"{"fields": {"measure_like": [{"name": "s.amount", "label": "Amount"}]},
                     "pivots": [{"key": "2023"}, {"key": "2024"}]}"#;
    let rows = r#"[{"s.amount": {"2023": {"value": 5}, "2024": {"value": 7}}}]"#;
    let input = TableInput::from_json(schema, rows, "{}").unwrap();
    let output = TableVis::new().render(&input);
    let column = output.columns.find("s.amount_2024").unwrap();
    assert_eq!(column.value(&input.rows[0]), Some(&Value::Number(7.0)));
}

// ============================================================================
// MEMOIZATION
// ============================================================================

#[test]
fn test_unchanged_inputs_skip_recompute() {
    let mut harness = TestHarness::with_order_data();
    let first = harness.render();
    assert!(first.recomputed.keys && first.recomputed.columns);

    let second = harness.render();
    assert!(!second.recomputed.any());
}

#[test]
fn test_row_change_keeps_column_model() {
    let mut harness = TestHarness::with_order_data();
    harness.render();
    harness.input.rows.pop();
    let output = harness.render();
    assert!(!output.recomputed.columns);
    assert!(!output.recomputed.keys);
}

#[test]
fn test_switching_variants() {
    let mut harness = TestHarness::with_revenue_data();
    let standard = harness.vis.update(&harness.input, TableKind::Standard).unwrap();
    let summary = harness.vis.update(&harness.input, TableKind::Summary).unwrap();
    assert_eq!(standard.columns.leaf_count(), 3);
    assert_eq!(summary.columns.leaf_count(), 4);
    assert_eq!(summary.kind, TableKind::Summary);

    let again = harness.vis.update(&harness.input, TableKind::Standard).unwrap();
    assert!(!again.recomputed.any());
}

// ============================================================================
// SORTING
// ============================================================================

#[test]
fn test_sort_order_does_not_touch_input() {
    let mut harness = TestHarness::with_order_data();
    let output = harness.render();
    let before = harness.input.clone();

    let state = SortState::new("orders.count", SortDirection::Descending);
    let order = output.sort_order(&harness.input, Some(&state));
    // counts: 12, 4, 9, 20
    assert_eq!(order, vec![3, 0, 2, 1]);
    assert_eq!(harness.input, before);

    let painted = output.paint(&harness.input, Some(&state));
    assert_eq!(painted[0][0].content.as_text(), Some("West"));
}

#[test]
fn test_sort_summary_rows() {
    let mut harness = TestHarness::with_revenue_data();
    let output = harness.render_summary().unwrap();
    let state = SortState::new("current_value", SortDirection::Ascending);
    let order = output.sort_order(&harness.input, Some(&state));
    assert_eq!(order, vec![1, 0]);
}
