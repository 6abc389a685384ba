//! FILENAME: core/summary-engine/src/engine.rs
//! Ranking Engine - turns raw (entity, period, measure) rows into ranked
//! summary rows.
//!
//! Algorithm:
//! 1. Resolve the entity, period and measure keys from the schema
//! 2. Group rows into the SummaryCache, summing duplicate (entity, period) pairs
//! 3. Order distinct periods newest first; the first one is the latest period
//! 4. Rank entities by their latest-period value, descending
//! 5. Derive the trailing series, trend and shares per entity

use std::cmp::Ordering;
use serde::{Deserialize, Serialize};
use gridvis_model::{Row, Schema, Value, VisError};

use crate::cache::{LabelId, SummaryCache};
use crate::period::newest_first;
use crate::view::{RankedEntityRow, SummaryKeys, SummaryResult, Trend};

/// Default length of the trailing series.
pub const DEFAULT_WINDOW: usize = 12;

// ============================================================================
// OPTIONS
// ============================================================================

/// What a missing period contributes to an entity's trailing series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GapFill {
    /// Missing periods read as 0.
    #[default]
    Zero,
    /// Missing periods are left out of the series.
    Omit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummaryOptions {
    /// Number of most recent periods in the trailing series.
    pub window: usize,
    pub gap_fill: GapFill,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        SummaryOptions {
            window: DEFAULT_WINDOW,
            gap_fill: GapFill::Zero,
        }
    }
}

// ============================================================================
// KEY RESOLUTION
// ============================================================================

impl SummaryKeys {
    /// Entity and period are the first two dimensions. The measure is the
    /// first schema measure, else the first key of the first row that is
    /// not a dimension.
    pub fn resolve(schema: &Schema, rows: &[Row]) -> Result<Self, VisError> {
        let dimensions = schema.dimensions();
        if dimensions.len() < 2 {
            log::warn!(
                target: "SUMMARY",
                "summary needs entity and period dimensions, schema has {}",
                dimensions.len()
            );
            return Err(VisError::SummaryShape {
                dimensions: dimensions.len(),
            });
        }
        let entity_key = dimensions[0].name.clone();
        let period_key = dimensions[1].name.clone();

        let measure_key = match schema.measures().first() {
            Some(measure) => measure.name.clone(),
            None => rows
                .first()
                .and_then(|row| {
                    row.keys()
                        .find(|k| !dimensions.iter().any(|d| d.name == *k))
                        .map(str::to_string)
                })
                .ok_or(VisError::MissingMeasure)?,
        };

        Ok(SummaryKeys {
            entity_key,
            period_key,
            measure_key,
        })
    }
}

// ============================================================================
// RANKING
// ============================================================================

/// Groups `rows` by (entity, period). Rows without an entity value are skipped.
pub fn build_cache(rows: &[Row], keys: &SummaryKeys) -> SummaryCache {
    let mut cache = SummaryCache::new();
    let null = Value::Null;
    for row in rows {
        let Some(entity) = row.field(&keys.entity_key) else {
            continue;
        };
        let period = row.field(&keys.period_key).map(|f| &f.value).unwrap_or(&null);
        let measure = row.field(&keys.measure_key).map(|f| &f.value);
        cache.add_record(&entity.value, period, measure);
    }
    cache
}

struct Standing {
    entity: LabelId,
    current: f64,
    present: bool,
}

/// Ranks the entities of an already grouped cache.
pub fn rank_cache(cache: &SummaryCache, keys: SummaryKeys, options: &SummaryOptions) -> SummaryResult {
    let period_order = newest_first(cache.period_keys());
    let latest = period_order.first().map(|&i| i as LabelId);

    let mut standings: Vec<Standing> = (0..cache.entities.len() as LabelId)
        .map(|entity| {
            let current = latest.and_then(|p| cache.sum(entity, p));
            Standing {
                entity,
                current: current.unwrap_or(0.0),
                present: current.is_some(),
            }
        })
        .collect();

    // Stable: equal values keep first-seen order, absent entities after present ones.
    standings.sort_by(|a, b| {
        b.current
            .partial_cmp(&a.current)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.present.cmp(&a.present))
    });

    let total: f64 = standings.iter().map(|s| s.current).sum();
    let percent = |value: f64| -> f64 {
        if total == 0.0 {
            return 0.0;
        }
        let pct = value / total * 100.0;
        if pct.is_finite() {
            pct
        } else {
            0.0
        }
    };

    // Trailing window: the most recent periods, then back to chronological order.
    let mut window: Vec<LabelId> = period_order
        .iter()
        .take(options.window)
        .map(|&i| i as LabelId)
        .collect();
    window.reverse();

    let leader_pct = standings.first().map(|s| percent(s.current)).unwrap_or(0.0);

    let rows = standings
        .iter()
        .map(|standing| {
            let trailing: Vec<f64> = window
                .iter()
                .filter_map(|&period| match (cache.sum(standing.entity, period), options.gap_fill) {
                    (Some(v), _) => Some(v),
                    (None, GapFill::Zero) => Some(0.0),
                    (None, GapFill::Omit) => None,
                })
                .collect();
            let percent_of_total = percent(standing.current);
            let share_of_leader = if leader_pct == 0.0 {
                0.0
            } else {
                (percent_of_total / leader_pct * 100.0).clamp(0.0, 100.0)
            };
            RankedEntityRow {
                entity_name: cache.entities.label(standing.entity).unwrap_or_default().to_string(),
                current_value: standing.current,
                trend: Trend::of(&trailing),
                trailing,
                percent_of_total,
                share_of_leader,
            }
        })
        .collect::<Vec<_>>();

    let label = |id: LabelId| cache.periods.label(id).unwrap_or_default().to_string();

    log::debug!(
        target: "SUMMARY",
        "ranked {} entities over {} periods from {} records",
        rows.len(),
        cache.periods.len(),
        cache.record_count()
    );

    SummaryResult {
        keys,
        latest_period: latest.map(label),
        window_periods: window.iter().map(|&id| label(id)).collect(),
        total,
        rows,
    }
}

/// Resolves keys, groups and ranks in one call.
pub fn rank_entities(rows: &[Row], schema: &Schema, options: &SummaryOptions) -> Result<SummaryResult, VisError> {
    let keys = SummaryKeys::resolve(schema, rows)?;
    let cache = build_cache(rows, &keys);
    Ok(rank_cache(&cache, keys, options))
}
