//! FILENAME: core/column-engine/src/sort.rs
//! Row Sort Order - the permutation a host-owned sort state implies.
//!
//! Sorting never mutates the rows or the sort state; it returns row indices
//! in display order. Values compare by type first:
//!   Number < Text < Boolean < List
//! and absent values always go last, regardless of direction.

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use gridvis_model::{Row, Value};

use crate::definition::{ColumnDefinition, ColumnModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// The host's current sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState {
    pub column_id: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column_id: impl Into<String>, direction: SortDirection) -> Self {
        SortState {
            column_id: column_id.into(),
            direction,
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Text(_) => 1,
        Value::Boolean(_) => 2,
        Value::List(_) => 3,
        Value::Null => 4,
    }
}

/// Compares two present values. Null compares as absent.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::Boolean(x), Value::Boolean(y)) => x.cmp(y),
        (Value::List(x), Value::List(y)) => x.len().cmp(&y.len()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Sort order for one column. Stable: equal values keep row order.
pub fn sort_by_column(rows: &[Row], column: &ColumnDefinition, direction: SortDirection) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();
    if !column.sortable {
        return order;
    }

    order.sort_by(|&i, &j| {
        let a = present(column.value(&rows[i]));
        let b = present(column.value(&rows[j]));
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => {
                let ord = compare_values(a, b);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
    order
}

/// Sort order for `state`. Without a state, or when the state names a group
/// header or an unknown column, rows keep their input order.
pub fn sort_order(rows: &[Row], model: &ColumnModel, state: Option<&SortState>) -> Vec<usize> {
    let identity = || (0..rows.len()).collect();
    let Some(state) = state else {
        return identity();
    };
    match model.find(&state.column_id) {
        Some(column) if !column.is_group() => sort_by_column(rows, column, state.direction),
        Some(_) => identity(),
        None => {
            log::debug!(target: "COLUMNS", "sort column {} not in model", state.column_id);
            identity()
        }
    }
}
