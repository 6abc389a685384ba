//! FILENAME: core/model/src/lib.rs
//! PURPOSE: Shared types for the gridvis table engines.
//! CONTEXT: Everything the host hands over (schema, rows, options) and the
//! small utilities both engines need (style maps, number formatting,
//! fingerprints). The engines depend on this crate only for types.

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod number_format;
pub mod row;
pub mod schema;
pub mod style;
pub mod value;

pub use config::{
    ChartColors, CssOverrides, TableVariant, VisConfig, CONDITIONAL_NONE, CONDITIONAL_PREFIX,
    RENAME_PREFIX,
};
pub use error::VisError;
pub use fingerprint::{fingerprint, Fingerprint};
pub use number_format::{format_currency, format_general, format_percent, format_usd};
pub use row::{Row, RowCell};
pub use schema::{FieldDescriptor, PivotDescriptor, Schema, SchemaFields, TOTAL_PIVOT_KEY};
pub use style::StyleMap;
pub use value::{FieldValue, Value, TRUTHY_TOKENS};
