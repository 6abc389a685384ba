//! FILENAME: core/column-engine/src/definition.rs
//! Column Definition - The column model handed to the table widget.
//!
//! This module contains the types that DESCRIBE the columns of a table:
//! - How a column reads its value from a row (`Accessor`)
//! - Which renderer paints it and which conditional checks style it
//! - Width bounds, sortability and group nesting
//!
//! The model is built once per input change and is read-only afterwards.

use serde::{Deserialize, Serialize};
use gridvis_model::{ChartColors, FieldValue, Row, StyleMap, Value};

use crate::conditional::StyleResolver;
use crate::renderer::{render_cell, CellContent, CellInput, RendererKind, DEFAULT_COLUMN_WIDTH};

// ============================================================================
// ACCESSOR
// ============================================================================

/// How a column reads its primary Field Value out of a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessor {
    /// `row[key]`
    Field { key: String },
    /// `row[key][pivot]`
    Pivoted { key: String, pivot: String },
    /// Group headers read nothing.
    None,
}

impl Accessor {
    pub fn read<'r>(&self, row: &'r Row) -> Option<&'r FieldValue> {
        match self {
            Accessor::Field { key } => row.field(key),
            Accessor::Pivoted { key, pivot } => row.pivoted(key, pivot),
            Accessor::None => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Accessor::Field { key } | Accessor::Pivoted { key, .. } => Some(key.as_str()),
            Accessor::None => None,
        }
    }

    pub fn pivot(&self) -> Option<&str> {
        match self {
            Accessor::Pivoted { pivot, .. } => Some(pivot.as_str()),
            _ => None,
        }
    }
}

// ============================================================================
// COLUMN
// ============================================================================

/// Width bounds for a resizable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnWidth {
    pub width: u16,
    pub min_width: u16,
    pub max_width: u16,
}

impl Default for ColumnWidth {
    fn default() -> Self {
        ColumnWidth {
            width: DEFAULT_COLUMN_WIDTH,
            min_width: 40,
            max_width: 400,
        }
    }
}

impl ColumnWidth {
    pub fn with_width(width: u16) -> Self {
        let mut w = ColumnWidth::default();
        w.width = width.clamp(w.min_width, w.max_width);
        w
    }
}

/// What a column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    Dimension,
    Measure,
    /// One pivot value of a measure.
    PivotedMeasure,
    /// Header spanning a measure's pivot sub-columns.
    MeasureGroup,
    /// Derived column of the summary table.
    Summary,
}

/// A single column of the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Unique across the whole flattened column set.
    pub id: String,
    pub header: String,
    pub accessor: Accessor,
    pub renderer: RendererKind,
    pub role: ColumnRole,
    pub sortable: bool,
    pub width: ColumnWidth,
    pub style_resolver: Option<StyleResolver>,
    /// Sub-columns; non-empty only for `MeasureGroup` headers.
    pub group_children: Vec<ColumnDefinition>,
    /// CSS class for the header cell.
    pub header_class: Option<String>,
    /// Set from `borderBetweenColumns`.
    pub thick_right_border: bool,
}

impl ColumnDefinition {
    /// A leaf column reading `accessor` with `renderer`.
    pub fn leaf(
        id: impl Into<String>,
        header: impl Into<String>,
        accessor: Accessor,
        renderer: RendererKind,
        role: ColumnRole,
    ) -> Self {
        let width = ColumnWidth::with_width(renderer.default_width());
        ColumnDefinition {
            id: id.into(),
            header: header.into(),
            accessor,
            renderer,
            role,
            sortable: true,
            width,
            style_resolver: None,
            group_children: Vec::new(),
            header_class: None,
            thick_right_border: false,
        }
    }

    /// A group header spanning `children`. Not sortable.
    pub fn group(id: impl Into<String>, header: impl Into<String>, children: Vec<ColumnDefinition>) -> Self {
        ColumnDefinition {
            id: id.into(),
            header: header.into(),
            accessor: Accessor::None,
            renderer: RendererKind::Plain,
            role: ColumnRole::MeasureGroup,
            sortable: false,
            width: ColumnWidth::default(),
            style_resolver: None,
            group_children: children,
            header_class: Some("measure-header".to_string()),
            thick_right_border: false,
        }
    }

    pub fn with_style_resolver(mut self, resolver: Option<StyleResolver>) -> Self {
        self.style_resolver = resolver;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = ColumnWidth::with_width(width);
        self
    }

    pub fn is_group(&self) -> bool {
        self.role == ColumnRole::MeasureGroup
    }

    /// The raw value this column reads.
    pub fn value<'r>(&self, row: &'r Row) -> Option<&'r Value> {
        self.accessor.read(row).map(|fv| &fv.value)
    }

    /// The merged conditional style for this column's cell in `row`.
    pub fn cell_style(&self, row: &Row) -> StyleMap {
        match &self.style_resolver {
            Some(resolver) => resolver.resolve(row, self.accessor.pivot()),
            None => StyleMap::new(),
        }
    }

    pub fn render(&self, row: &Row, colors: &ChartColors) -> CellContent {
        let input = CellInput {
            row,
            primary: self.accessor.read(row),
            pivot: self.accessor.pivot(),
        };
        render_cell(&self.renderer, &input, colors)
    }
}

// ============================================================================
// COLUMN MODEL
// ============================================================================

/// Which of the three layouts produced a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnLayout {
    /// One column per visible key.
    Flat,
    /// Pivot x measure cross product, pivot-major.
    PivotFlat,
    /// One group per measure, one sub-column per pivot.
    PivotGrouped,
    /// Ranked summary table.
    Summary,
}

/// A painted cell: content plus its inline style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedCell {
    pub column_id: String,
    pub content: CellContent,
    pub style: StyleMap,
}

/// The full, possibly hierarchical, column model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub layout: ColumnLayout,
    pub columns: Vec<ColumnDefinition>,
}

impl ColumnModel {
    /// Top-level columns (groups count once).
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Leaf columns in display order.
    pub fn leaves(&self) -> Vec<&ColumnDefinition> {
        let mut out = Vec::new();
        for column in &self.columns {
            if column.group_children.is_empty() {
                out.push(column);
            } else {
                out.extend(column.group_children.iter());
            }
        }
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.group_children.len().max(1))
            .sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| c.is_group())
    }

    /// Finds a column (leaf or group) by id.
    pub fn find(&self, id: &str) -> Option<&ColumnDefinition> {
        for column in &self.columns {
            if column.id == id {
                return Some(column);
            }
            if let Some(child) = column.group_children.iter().find(|c| c.id == id) {
                return Some(child);
            }
        }
        None
    }

    /// Every id, groups included, in display order.
    pub fn all_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for column in &self.columns {
            ids.push(column.id.as_str());
            ids.extend(column.group_children.iter().map(|c| c.id.as_str()));
        }
        ids
    }

    /// Renders one row across all leaf columns.
    pub fn render_row(&self, row: &Row, colors: &ChartColors) -> Vec<RenderedCell> {
        self.leaves()
            .into_iter()
            .map(|column| RenderedCell {
                column_id: column.id.clone(),
                content: column.render(row, colors),
                style: column.cell_style(row),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_defaults_and_clamp() {
        let w = ColumnWidth::default();
        assert_eq!((w.width, w.min_width, w.max_width), (200, 40, 400));
        assert_eq!(ColumnWidth::with_width(900).width, 400);
        assert_eq!(ColumnWidth::with_width(10).width, 40);
    }

    #[test]
    fn test_accessors() {
        let row = Row::new()
            .with_field("a", FieldValue::new(1.0))
            .with_pivoted("m", "x", FieldValue::new(2.0))
            .with_pivoted("m", "y", FieldValue::new(3.0));

        let field = Accessor::Field { key: "a".to_string() };
        let pivoted = Accessor::Pivoted { key: "m".to_string(), pivot: "y".to_string() };
        assert_eq!(field.read(&row).map(|f| &f.value), Some(&Value::Number(1.0)));
        assert_eq!(pivoted.read(&row).map(|f| &f.value), Some(&Value::Number(3.0)));
        assert_eq!(pivoted.pivot(), Some("y"));
        assert!(Accessor::None.read(&row).is_none());
    }

    #[test]
    fn test_group_header_is_not_sortable() {
        let child = ColumnDefinition::leaf(
            "m_x",
            "x",
            Accessor::Pivoted { key: "m".into(), pivot: "x".into() },
            RendererKind::Plain,
            ColumnRole::PivotedMeasure,
        );
        let group = ColumnDefinition::group("m", "M", vec![child]);
        assert!(!group.sortable);
        assert!(group.group_children[0].sortable);
        assert_eq!(group.header_class.as_deref(), Some("measure-header"));

        let model = ColumnModel { layout: ColumnLayout::PivotGrouped, columns: vec![group] };
        assert_eq!(model.leaf_count(), 1);
        assert_eq!(model.all_ids(), vec!["m", "m_x"]);
        assert_eq!(model.find("m_x").map(|c| c.header.as_str()), Some("x"));
    }
}
