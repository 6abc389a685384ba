//! FILENAME: core/column-engine/src/builder.rs
//! Column Model Builder - turns classified keys into a column model.
//!
//! Layout is a function of two flags:
//! - no pivots                       -> `Flat`: one column per visible key
//! - pivots, `groupByMeasure` false  -> `PivotFlat`: pivot x measure leaves
//! - pivots, `groupByMeasure` true   -> `PivotGrouped`: one group per measure
//!
//! Dimension columns always come first and are never grouped. Renderers and
//! conditional checks are resolved here, once per column.

use rustc_hash::FxHashSet;
use gridvis_model::{Schema, VisConfig, TOTAL_PIVOT_KEY};

use crate::borders::mark_column_borders;
use crate::classify::ClassifiedKeys;
use crate::conditional::ConditionalRules;
use crate::definition::{Accessor, ColumnDefinition, ColumnLayout, ColumnModel, ColumnRole};
use crate::renderer::renderer_for_key;

/// Header of the row-total sub-column in grouped layout.
pub const TOTAL_HEADER: &str = "Total";

/// Picks the layout for a set of classified keys.
pub fn layout_for(keys: &ClassifiedKeys, config: &VisConfig) -> ColumnLayout {
    match (keys.has_pivots(), config.group_by_measure) {
        (false, _) => ColumnLayout::Flat,
        (true, false) => ColumnLayout::PivotFlat,
        (true, true) => ColumnLayout::PivotGrouped,
    }
}

/// Builds the column model for one table.
pub struct ColumnModelBuilder<'a> {
    schema: &'a Schema,
    config: &'a VisConfig,
    keys: &'a ClassifiedKeys,
    rules: ConditionalRules,
}

impl<'a> ColumnModelBuilder<'a> {
    pub fn new(schema: &'a Schema, config: &'a VisConfig, keys: &'a ClassifiedKeys) -> Self {
        let rules = ConditionalRules::from_config(keys, config);
        ColumnModelBuilder {
            schema,
            config,
            keys,
            rules,
        }
    }

    pub fn rules(&self) -> &ConditionalRules {
        &self.rules
    }

    /// Executes the build. Borders and id uniqueness are applied last.
    pub fn build(&self) -> ColumnModel {
        let layout = layout_for(self.keys, self.config);

        let mut columns = self.dimension_columns();
        match layout {
            ColumnLayout::Flat => columns.extend(self.flat_measure_columns()),
            ColumnLayout::PivotFlat => columns.extend(self.pivot_flat_columns()),
            ColumnLayout::PivotGrouped => columns.extend(self.pivot_grouped_columns()),
            ColumnLayout::Summary => {}
        }

        let mut model = ColumnModel { layout, columns };
        ensure_unique_ids(&mut model);
        mark_column_borders(&mut model, &self.config.border_between_columns);

        log::debug!(
            target: "COLUMNS",
            "built {:?} model: {} top-level, {} leaf columns",
            model.layout,
            model.len(),
            model.leaf_count()
        );
        model
    }

    // ========================================================================
    // HEADERS
    // ========================================================================

    /// `rename_<key>`, else the schema label, else the raw key.
    fn field_header(&self, key: &str) -> String {
        if let Some(renamed) = self.config.rename(key) {
            return renamed.to_string();
        }
        match self.schema.field(key) {
            Some(field) => field.display_label().to_string(),
            None => key.to_string(),
        }
    }

    /// `rename_<pivot>`, else the pivot key. The row total reads "Total"
    /// unless renamed; grouped layout always shows "Total".
    fn pivot_header(&self, pivot: &str, grouped: bool) -> String {
        let is_total = pivot == TOTAL_PIVOT_KEY
            || self.schema.pivot(pivot).map(|p| p.is_row_total()).unwrap_or(false);
        if is_total && grouped {
            return TOTAL_HEADER.to_string();
        }
        if let Some(renamed) = self.config.rename(pivot) {
            return renamed.to_string();
        }
        if is_total {
            TOTAL_HEADER.to_string()
        } else {
            pivot.to_string()
        }
    }

    // ========================================================================
    // COLUMN GENERATION
    // ========================================================================

    fn dimension_columns(&self) -> Vec<ColumnDefinition> {
        self.keys
            .dimension_keys
            .iter()
            .map(|key| self.unpivoted_column(key, ColumnRole::Dimension))
            .collect()
    }

    fn unpivoted_column(&self, key: &str, role: ColumnRole) -> ColumnDefinition {
        ColumnDefinition::leaf(
            key,
            self.field_header(key),
            Accessor::Field { key: key.to_string() },
            renderer_for_key(key),
            role,
        )
        .with_style_resolver(self.rules.resolver_for(key))
    }

    fn flat_measure_columns(&self) -> Vec<ColumnDefinition> {
        self.keys
            .visible_measure_keys()
            .map(|key| self.unpivoted_column(key, ColumnRole::Measure))
            .collect()
    }

    /// Leaf for one (measure, pivot) pair. With a single pivot key the
    /// pivot segment is dropped from the accessor.
    fn pivot_leaf(&self, measure: &str, pivot: &str, header: String) -> ColumnDefinition {
        let accessor = if self.keys.pivot_keys.len() == 1 {
            Accessor::Field { key: measure.to_string() }
        } else {
            Accessor::Pivoted {
                key: measure.to_string(),
                pivot: pivot.to_string(),
            }
        };
        ColumnDefinition::leaf(
            format!("{}_{}", measure, pivot),
            header,
            accessor,
            renderer_for_key(measure),
            ColumnRole::PivotedMeasure,
        )
        .with_style_resolver(self.rules.resolver_for(measure))
    }

    fn pivot_flat_columns(&self) -> Vec<ColumnDefinition> {
        let mut columns = Vec::new();
        for pivot in &self.keys.pivot_keys {
            let pivot_label = self.pivot_header(pivot, false);
            for measure in self.keys.visible_measure_keys() {
                let header = format!("{} ({})", self.field_header(measure), pivot_label);
                columns.push(self.pivot_leaf(measure, pivot, header));
            }
        }
        columns
    }

    fn pivot_grouped_columns(&self) -> Vec<ColumnDefinition> {
        self.keys
            .visible_measure_keys()
            .map(|measure| {
                let children = self
                    .keys
                    .pivot_keys
                    .iter()
                    .map(|pivot| self.pivot_leaf(measure, pivot, self.pivot_header(pivot, true)))
                    .collect();
                ColumnDefinition::group(measure, self.field_header(measure), children)
            })
            .collect()
    }
}

/// Convenience wrapper around `ColumnModelBuilder`.
pub fn build_column_model(schema: &Schema, config: &VisConfig, keys: &ClassifiedKeys) -> ColumnModel {
    ColumnModelBuilder::new(schema, config, keys).build()
}

/// Makes every id (groups and leaves) unique by suffixing repeats with
/// `__2`, `__3`, ...
pub fn ensure_unique_ids(model: &mut ColumnModel) {
    let mut seen: FxHashSet<String> = FxHashSet::default();

    let mut claim = |id: &mut String| {
        if seen.insert(id.clone()) {
            return;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}__{}", id, n);
            if seen.insert(candidate.clone()) {
                log::warn!(target: "COLUMNS", "duplicate column id {} renamed to {}", id, candidate);
                *id = candidate;
                return;
            }
            n += 1;
        }
    };

    for column in &mut model.columns {
        claim(&mut column.id);
        for child in &mut column.group_children {
            claim(&mut child.id);
        }
    }
}
