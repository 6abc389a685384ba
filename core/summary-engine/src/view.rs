//! FILENAME: core/summary-engine/src/view.rs
//! Summary View - ranked entities ready for the column model.
//!
//! A `RankedEntityRow` is derived per render pass and never stored. It is
//! turned into a synthesized `Row` so the summary table goes through the
//! same column model and renderers as every other table.

use serde::{Deserialize, Serialize};
use gridvis_model::{FieldValue, Row, Value};

/// Synthesized row keys read by the summary columns.
pub const CURRENT_VALUE_KEY: &str = "current_value";
pub const TRAILING_KEY: &str = "trailing";
pub const PERCENT_OF_TOTAL_KEY: &str = "percent_of_total";
pub const SHARE_OF_LEADER_KEY: &str = "share_of_leader";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Up when the last point is not below the second-to-last, or when
    /// there are fewer than two points.
    pub fn of(series: &[f64]) -> Self {
        match series {
            [.., prev, last] if last < prev => Trend::Down,
            _ => Trend::Up,
        }
    }
}

/// One entity of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntityRow {
    pub entity_name: String,
    /// Value in the latest period, 0 when absent there.
    pub current_value: f64,
    /// Trailing series in chronological order.
    pub trailing: Vec<f64>,
    pub trend: Trend,
    /// Share of the latest-period total, in percent.
    pub percent_of_total: f64,
    /// `percent_of_total` scaled so the leading entity is 100.
    pub share_of_leader: f64,
}

impl RankedEntityRow {
    /// Row keyed by `entity_key` plus the derived metric keys.
    pub fn to_row(&self, entity_key: &str) -> Row {
        let trailing: Vec<Value> = self.trailing.iter().map(|&n| Value::Number(n)).collect();
        Row::new()
            .with_field(entity_key, FieldValue::new(self.entity_name.as_str()))
            .with_field(CURRENT_VALUE_KEY, FieldValue::new(self.current_value))
            .with_field(TRAILING_KEY, FieldValue::new(trailing))
            .with_field(PERCENT_OF_TOTAL_KEY, FieldValue::new(self.percent_of_total))
            .with_field(SHARE_OF_LEADER_KEY, FieldValue::new(self.share_of_leader))
    }
}

/// The keys a summary was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryKeys {
    pub entity_key: String,
    pub period_key: String,
    pub measure_key: String,
}

/// Output of the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub keys: SummaryKeys,
    /// Label of the most recent period, `None` without rows.
    pub latest_period: Option<String>,
    /// Period labels of the trailing window, chronological.
    pub window_periods: Vec<String>,
    /// Sum of all entities' latest-period values.
    pub total: f64,
    /// Entities in rank order.
    pub rows: Vec<RankedEntityRow>,
}

impl SummaryResult {
    /// One synthesized row per ranked entity, in rank order.
    pub fn to_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|r| r.to_row(&self.keys.entity_key))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
