//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for gridvis integration tests.

#![allow(dead_code)]

use gridvis::model::{FieldDescriptor, PivotDescriptor};
use gridvis::{FieldValue, Row, Schema, TableInput, TableOutput, TableVis, VisConfig, VisError};

/// Test harness holding one pipeline and its current input.
pub struct TestHarness {
    pub vis: TableVis,
    pub input: TableInput,
}

impl TestHarness {
    pub fn new(input: TableInput) -> Self {
        TestHarness {
            vis: TableVis::new(),
            input,
        }
    }

    /// An order table: two dimensions, three measures, no pivots.
    pub fn with_order_data() -> Self {
        Self::new(TableInput::new(order_schema(), order_rows(), VisConfig::default()))
    }

    /// Revenue per (service, month) for the summary variant.
    pub fn with_revenue_data() -> Self {
        Self::new(TableInput::new(revenue_schema(), revenue_rows(), VisConfig::default()))
    }

    /// Sales by region, pivoted by year plus the row total.
    pub fn with_pivot_data() -> Self {
        Self::new(TableInput::new(pivot_schema(), pivot_rows(), VisConfig::default()))
    }

    pub fn set_options(&mut self, pairs: &[(&str, &str)]) {
        self.input.config = VisConfig::from_pairs(pairs.iter().copied());
    }

    pub fn render(&mut self) -> TableOutput {
        self.vis.render(&self.input)
    }

    pub fn render_summary(&mut self) -> Result<TableOutput, VisError> {
        self.vis.render_summary(&self.input)
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn order_schema() -> Schema {
    Schema::new()
        .with_dimension(FieldDescriptor::new("orders.region").with_label("Region"))
        .with_dimension(FieldDescriptor::new("orders.status").with_label("Status"))
        .with_measure(FieldDescriptor::new("orders.count").with_label("Orders"))
        .with_measure(FieldDescriptor::new("orders.is_late").with_label("Late?"))
        .with_measure(FieldDescriptor::new("orders.total").with_label("Total"))
}

pub fn order_row(region: &str, status: &str, count: f64, late: &str, total: f64) -> Row {
    Row::new()
        .with_field("orders.region", FieldValue::new(region))
        .with_field("orders.status", FieldValue::new(status))
        .with_field("orders.count", FieldValue::new(count))
        .with_field("orders.is_late", FieldValue::new(late))
        .with_field(
            "orders.total",
            FieldValue::new(total).with_rendered(format!("${}", total)),
        )
}

pub fn order_rows() -> Vec<Row> {
    vec![
        order_row("North", "open", 12.0, "No", 1200.0),
        order_row("South", "open", 4.0, "Yes", 300.0),
        order_row("East", "closed", 9.0, "true", 950.0),
        order_row("West", "closed", 20.0, "0", 2100.0),
    ]
}

pub fn revenue_schema() -> Schema {
    Schema::new()
        .with_dimension(FieldDescriptor::new("billing.service"))
        .with_dimension(FieldDescriptor::new("billing.month"))
        .with_measure(FieldDescriptor::new("billing.revenue"))
}

pub fn revenue_row(service: &str, month: &str, revenue: f64) -> Row {
    Row::new()
        .with_field("billing.service", FieldValue::new(service))
        .with_field("billing.month", FieldValue::new(month))
        .with_field("billing.revenue", FieldValue::new(revenue))
}

pub fn revenue_rows() -> Vec<Row> {
    vec![
        revenue_row("A", "2024-01", 10.0),
        revenue_row("A", "2024-02", 20.0),
        revenue_row("B", "2024-02", 30.0),
    ]
}

pub fn pivot_schema() -> Schema {
    Schema::new()
        .with_dimension(FieldDescriptor::new("sales.region").with_label("Region"))
        .with_measure(FieldDescriptor::new("sales.amount").with_label("Amount"))
        .with_measure(FieldDescriptor::new("sales.units").with_label("Units"))
        .with_pivot(PivotDescriptor::new("2023"))
        .with_pivot(PivotDescriptor::new("2024"))
        .with_pivot(PivotDescriptor::total())
}

pub fn pivot_rows() -> Vec<Row> {
    let mut row = Row::new().with_field("sales.region", FieldValue::new("North"));
    for (pivot, amount, units) in [("2023", 100.0, 1.0), ("2024", 150.0, 2.0), ("$$$_row_total_$$$", 250.0, 3.0)] {
        row.set_pivoted("sales.amount", pivot, FieldValue::new(amount));
        row.set_pivoted("sales.units", pivot, FieldValue::new(units));
    }
    vec![row]
}

/// The host's JSON payloads for the order table.
pub const ORDER_SCHEMA_JSON: &str = r#"{
    "fields": {
        "dimension_like": [{"name": "orders.region", "label": "Region"}],
        "measure_like": [
            {"name": "orders.count", "label": "Orders", "field_group_variant": "Count"},
            {"name": "orders.rating_sentiment", "label": "Sentiment"}
        ]
    },
    "pivots": null
}"#;

pub const ORDER_ROWS_JSON: &str = r#"[
    {
        "orders.region": {"value": "North", "html": "<b>North</b>"},
        "orders.count": {"value": 12, "rendered": "12 orders"},
        "orders.rating_sentiment": {"value": "Positive"},
        "orders.sentiment_date": {"value": "2024-03-01"}
    },
    {
        "orders.region": {"value": "South"},
        "orders.count": {"value": null},
        "orders.rating_sentiment": {"value": "Mixed"}
    }
]"#;

pub const ORDER_CONFIG_JSON: &str = r#"{
    "rename_orders.count": "Order Count",
    "groupByMeasure": false,
    "chartTitle": "Orders by Region",
    "tableBordered": true,
    "borderBetweenRows": "-1"
}"#;
