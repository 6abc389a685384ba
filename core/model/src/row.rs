//! FILENAME: core/model/src/row.rs
//! PURPOSE: A data row: field key -> cell, where a cell is either a plain
//! FieldValue or (for pivoted measures) a map of pivot key -> FieldValue.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::FieldValue;

/// One entry of a row.
///
/// Decoding is untagged: an object with a `value` member is a `Field`,
/// any other object is treated as a pivot-keyed map.
#[derive(Debug, Clone, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowCell {
    Field(FieldValue),
    Pivoted(BTreeMap<String, FieldValue>),
}

/// A row of query results.
#[derive(Debug, Clone, Default, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, RowCell>,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.set_field(key, value);
        self
    }

    pub fn with_pivoted(
        mut self,
        key: impl Into<String>,
        pivot: impl Into<String>,
        value: FieldValue,
    ) -> Self {
        self.set_pivoted(key, pivot, value);
        self
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: FieldValue) {
        self.cells.insert(key.into(), RowCell::Field(value));
    }

    /// Inserts a pivoted value. A plain field already stored under `key` is replaced.
    pub fn set_pivoted(
        &mut self,
        key: impl Into<String>,
        pivot: impl Into<String>,
        value: FieldValue,
    ) {
        let entry = self
            .cells
            .entry(key.into())
            .or_insert_with(|| RowCell::Pivoted(BTreeMap::new()));
        if let RowCell::Field(_) = entry {
            *entry = RowCell::Pivoted(BTreeMap::new());
        }
        if let RowCell::Pivoted(map) = entry {
            map.insert(pivot.into(), value);
        }
    }

    /// Unpivoted read of `key`.
    ///
    /// A pivoted cell holding exactly one pivot entry reads as that entry, so
    /// single-pivot data needs no extra nesting level.
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        match self.cells.get(key)? {
            RowCell::Field(fv) => Some(fv),
            RowCell::Pivoted(map) if map.len() == 1 => map.values().next(),
            RowCell::Pivoted(_) => None,
        }
    }

    pub fn pivoted(&self, key: &str, pivot: &str) -> Option<&FieldValue> {
        match self.cells.get(key)? {
            RowCell::Pivoted(map) => map.get(pivot),
            RowCell::Field(_) => None,
        }
    }

    /// Reads `row[key][pivot]` when a pivot is given, else `row[key]`.
    pub fn lookup(&self, key: &str, pivot: Option<&str>) -> Option<&FieldValue> {
        match pivot {
            Some(p) => self.pivoted(key, p),
            None => self.field(key),
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
