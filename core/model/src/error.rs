//! FILENAME: core/model/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisError {
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Summary table needs an entity and a period dimension, found {dimensions}")]
    SummaryShape { dimensions: usize },

    #[error("Summary table has no numeric measure to rank by")]
    MissingMeasure,
}
