//! FILENAME: core/gridvis/src/lib.rs
//! gridvis - table visualization core.
//!
//! Turns a query schema, rows and a flat option object into a fully
//! specified grid: column hierarchy, per-cell renderers, conditional styles,
//! sort order and, for the revenue summary variant, ranked entity rows.
//! Painting, theming and pagination belong to the host.
//!
//! Crates:
//! - `gridvis_model`: input types and configuration
//! - `column_engine`: classification, renderers, column models
//! - `summary_engine`: aggregation and ranking
//!
//! This crate adds the memoized pipeline and category logging on top.

pub mod logging;
pub mod memo;
pub mod pipeline;

pub use memo::{Memo, MemoKey};
pub use pipeline::{Recomputed, TableInput, TableKind, TableOutput, TableVis};

pub use column_engine;
pub use gridvis_model as model;
pub use summary_engine;

pub use column_engine::{CellContent, ColumnDefinition, ColumnModel, RenderedCell, SortDirection, SortState};
pub use gridvis_model::{FieldValue, Row, Schema, Value, VisConfig, VisError};
pub use summary_engine::{GapFill, RankedEntityRow, SummaryOptions, SummaryResult, Trend};
