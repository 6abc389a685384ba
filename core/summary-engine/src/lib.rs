//! FILENAME: core/summary-engine/src/lib.rs
//! Revenue summary subsystem for gridvis.
//!
//! Ranks entities by their latest-period value and derives a trailing
//! trend per entity. It depends on `gridvis-model` for shared types and on
//! `column-engine` for the column model the summary table is painted with.
//!
//! Layers:
//! - `period`: chronological ordering of period values
//! - `cache`: (entity, period) grouping with interned labels
//! - `engine`: key resolution and ranking (HOW we calculate)
//! - `view`: ranked rows and their synthesized table rows (WHAT we display)
//! - `columns`: the four summary columns

pub mod cache;
pub mod columns;
pub mod engine;
pub mod period;
pub mod view;

pub use cache::{LabelId, LabelInterner, SummaryCache};
pub use columns::summary_column_model;
pub use engine::{build_cache, rank_cache, rank_entities, GapFill, SummaryOptions, DEFAULT_WINDOW};
pub use period::{newest_first, PeriodKey};
pub use view::*;
