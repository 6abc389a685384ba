//! FILENAME: core/column-engine/src/classify.rs
//! PURPOSE: Field Classifier - derives the ordered dimension, measure, pivot
//! and visible key lists from the schema.
//! CONTEXT: Measures that only drive another column's highlight
//! (`conditional_styles_<key>` set) are classified but not visible.

use serde::{Deserialize, Serialize};
use rustc_hash::FxHashSet;
use gridvis_model::{Row, Schema, VisConfig, CONDITIONAL_PREFIX, RENAME_PREFIX};

/// Output of the classifier. All lists keep schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassifiedKeys {
    pub dimension_keys: Vec<String>,
    pub measure_keys: Vec<String>,
    pub pivot_keys: Vec<String>,
    /// Dimensions followed by the measures that get their own column.
    pub visible_keys: Vec<String>,
}

impl ClassifiedKeys {
    pub fn has_pivots(&self) -> bool {
        !self.pivot_keys.is_empty()
    }

    /// Measures that get their own column(s), in schema order.
    pub fn visible_measure_keys(&self) -> impl Iterator<Item = &str> {
        let dimension_count = self.dimension_keys.len();
        self.visible_keys[dimension_count..].iter().map(String::as_str)
    }

    pub fn is_dimension(&self, key: &str) -> bool {
        self.dimension_keys.iter().any(|k| k == key)
    }

    pub fn is_measure(&self, key: &str) -> bool {
        self.measure_keys.iter().any(|k| k == key)
    }
}

/// Keys that are configuration markers rather than data.
fn is_marker_key(key: &str) -> bool {
    key.starts_with(CONDITIONAL_PREFIX) || key.starts_with(RENAME_PREFIX)
}

/// Classifies the schema's fields.
///
/// When the schema declares no measures at all, measure keys are inferred
/// from the first row: every key that is not a dimension (row key order).
pub fn classify_fields(schema: &Schema, rows: &[Row], config: &VisConfig) -> ClassifiedKeys {
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    let mut dimension_keys = Vec::new();
    for field in schema.dimensions() {
        if !is_marker_key(&field.name) && seen.insert(&field.name) {
            dimension_keys.push(field.name.clone());
        }
    }

    let mut measure_keys = Vec::new();
    if schema.measures().is_empty() {
        if let Some(first) = rows.first() {
            for key in first.keys() {
                if !is_marker_key(key) && seen.insert(key) {
                    measure_keys.push(key.to_string());
                }
            }
            if !measure_keys.is_empty() {
                log::debug!(
                    target: "CLASSIFY",
                    "schema has no measures, inferred {} from the first row",
                    measure_keys.len()
                );
            }
        }
    } else {
        for field in schema.measures() {
            if !is_marker_key(&field.name) && seen.insert(&field.name) {
                measure_keys.push(field.name.clone());
            }
        }
    }

    let pivot_keys: Vec<String> = schema.pivots.iter().map(|p| p.key.clone()).collect();

    let mut visible_keys = dimension_keys.clone();
    for key in &measure_keys {
        if config.is_style_driver(key) {
            log::debug!(target: "CLASSIFY", "suppressing style driver column {}", key);
            continue;
        }
        visible_keys.push(key.clone());
    }

    ClassifiedKeys {
        dimension_keys,
        measure_keys,
        pivot_keys,
        visible_keys,
    }
}
