//! FILENAME: core/summary-engine/src/cache.rs
//! Summary Cache - rows grouped by (entity, period).
//!
//! The cache is designed for:
//! - One pass over the source rows
//! - Each distinct entity and period label stored once, referenced by id
//! - Sums keyed by (entity id, period id)
//!
//! Entity and period ids are assigned in first-seen order, which is the
//! tie-break order everywhere downstream.

use rustc_hash::FxHashMap;
use gridvis_model::Value;

use crate::period::PeriodKey;

// ============================================================================
// INTERNING
// ============================================================================

/// A reference to an interned label.
pub type LabelId = u32;

/// Distinct labels in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct LabelInterner {
    label_to_id: FxHashMap<String, LabelId>,
    id_to_label: Vec<String>,
}

impl LabelInterner {
    /// Interns a label and returns its id. Existing labels keep their id.
    pub fn intern(&mut self, label: &str) -> LabelId {
        if let Some(&id) = self.label_to_id.get(label) {
            return id;
        }
        let id = self.id_to_label.len() as LabelId;
        self.id_to_label.push(label.to_string());
        self.label_to_id.insert(label.to_string(), id);
        id
    }

    pub fn get(&self, label: &str) -> Option<LabelId> {
        self.label_to_id.get(label).copied()
    }

    pub fn label(&self, id: LabelId) -> Option<&str> {
        self.id_to_label.get(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }
}

// ============================================================================
// SUMMARY CACHE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct SummaryCache {
    pub entities: LabelInterner,
    pub periods: LabelInterner,

    /// Sort key of each period, indexed by period id.
    period_keys: Vec<PeriodKey>,

    /// Summed measure per (entity, period).
    sums: FxHashMap<(LabelId, LabelId), f64>,

    record_count: usize,
}

impl SummaryCache {
    pub fn new() -> Self {
        SummaryCache::default()
    }

    /// Adds one source record. Non-numeric measures count as 0; duplicate
    /// (entity, period) pairs are summed.
    pub fn add_record(&mut self, entity: &Value, period: &Value, measure: Option<&Value>) {
        let entity_id = self.entities.intern(&entity.display());

        let period_label = period.display();
        let before = self.periods.len();
        let period_id = self.periods.intern(&period_label);
        if self.periods.len() > before {
            self.period_keys.push(PeriodKey::from_value(period));
        }

        let amount = measure
            .and_then(Value::as_number)
            .filter(|n| n.is_finite())
            .unwrap_or(0.0);
        *self.sums.entry((entity_id, period_id)).or_insert(0.0) += amount;
        self.record_count += 1;
    }

    pub fn period_keys(&self) -> &[PeriodKey] {
        &self.period_keys
    }

    /// Sum for (entity, period), `None` when the pair never occurred.
    pub fn sum(&self, entity: LabelId, period: LabelId) -> Option<f64> {
        self.sums.get(&(entity, period)).copied()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }
}
