//! FILENAME: core/column-engine/src/lib.rs
//! Column engine for gridvis tables.
//!
//! Turns a schema, rows and a typed configuration into the column model the
//! table widget paints. It depends on `gridvis-model` only for shared types.
//!
//! Layers:
//! - `classify`: which keys are dimensions, measures, pivots, visible
//! - `conditional`: cross-field highlight rules as a target-grouped edge list
//! - `renderer`: static suffix dispatch to a renderer kind, cell rendering
//! - `definition`: the column model types (what a column IS)
//! - `builder`: flat / pivot-flat / pivot-grouped model construction
//! - `borders`, `sort`: host-facing markers and row order

pub mod borders;
pub mod builder;
pub mod classify;
pub mod conditional;
pub mod definition;
pub mod renderer;
pub mod sort;

pub use borders::{mark_column_borders, parse_positions, resolve_row_borders};
pub use builder::{build_column_model, ensure_unique_ids, layout_for, ColumnModelBuilder, TOTAL_HEADER};
pub use classify::{classify_fields, ClassifiedKeys};
pub use conditional::{ConditionalEdge, ConditionalRules, StyleResolver};
pub use definition::*;
pub use renderer::{
    render_cell, renderer_for_key, split_table_prefix, CellContent, CellInput, ProgressScale,
    RendererKind, SparklineColoring, SparklineStyle, Tag, DEFAULT_COLUMN_WIDTH,
    SPARKLINE_POINT_LIMIT,
};
pub use sort::{compare_values, sort_by_column, sort_order, SortDirection, SortState};
