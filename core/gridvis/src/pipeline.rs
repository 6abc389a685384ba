//! FILENAME: core/gridvis/src/pipeline.rs
//! Table pipeline - the host-facing entry point.
//!
//! Two variants share one pipeline:
//! - `TableKind::Standard`: classify keys -> build the column model
//! - `TableKind::Summary`: rank entities -> synthesize rows -> summary columns
//!
//! Every derived value sits in a memo slot keyed by its exact inputs, so
//! re-rendering unchanged inputs recomputes nothing. The input is
//! never mutated; sort state stays with the host.

use std::sync::Arc;
use serde::{Deserialize, Serialize};

use column_engine::{
    classify_fields, resolve_row_borders, sort_order, ClassifiedKeys, ColumnModel, ColumnModelBuilder,
    RenderedCell, SortState,
};
use gridvis_model::{ChartColors, Row, Schema, TableVariant, VisConfig, VisError};
use summary_engine::{rank_entities, summary_column_model, SummaryOptions, SummaryResult};

use crate::logging::{log_enter, log_exit, log_info};
use crate::memo::Memo;

// ============================================================================
// INPUT / OUTPUT
// ============================================================================

/// Everything the host hands over for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableInput {
    pub schema: Schema,
    pub rows: Vec<Row>,
    pub config: VisConfig,
}

impl TableInput {
    pub fn new(schema: Schema, rows: Vec<Row>, config: VisConfig) -> Self {
        TableInput { schema, rows, config }
    }

    /// Decodes the host's three JSON payloads: the query response schema,
    /// the data rows and the flat option object.
    pub fn from_json(schema: &str, rows: &str, config: &str) -> Result<Self, VisError> {
        Ok(TableInput {
            schema: serde_json::from_str(schema)?,
            rows: serde_json::from_str(rows)?,
            config: VisConfig::from_json_str(config)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TableKind {
    #[default]
    Standard,
    Summary,
}

/// Which memo slots ran during the last update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recomputed {
    pub keys: bool,
    pub columns: bool,
    pub summary: bool,
}

impl Recomputed {
    pub fn any(&self) -> bool {
        self.keys || self.columns || self.summary
    }
}

/// What the render collaborator receives.
#[derive(Debug, Clone, Serialize)]
pub struct TableOutput {
    pub kind: TableKind,
    pub columns: Arc<ColumnModel>,
    /// Classified keys of the standard variant.
    pub keys: Option<Arc<ClassifiedKeys>>,
    /// Ranking of the summary variant.
    pub summary: Option<Arc<SummaryResult>>,
    /// Rows replacing the input rows (summary variant).
    pub rows: Option<Arc<Vec<Row>>>,
    /// 0-based indices of rows with a thick bottom border.
    pub row_borders: Vec<usize>,
    pub title: Option<String>,
    pub variant: TableVariant,
    pub colors: ChartColors,
    pub recomputed: Recomputed,
}

impl TableOutput {
    /// The rows to paint: synthesized rows when present, else the input rows.
    pub fn display_rows<'a>(&'a self, input: &'a TableInput) -> &'a [Row] {
        match &self.rows {
            Some(rows) => rows.as_slice(),
            None => input.rows.as_slice(),
        }
    }

    /// Display order of `display_rows` for the host's sort state.
    pub fn sort_order(&self, input: &TableInput, state: Option<&SortState>) -> Vec<usize> {
        sort_order(self.display_rows(input), &self.columns, state)
    }

    /// Paints every row in display order.
    pub fn paint(&self, input: &TableInput, state: Option<&SortState>) -> Vec<Vec<RenderedCell>> {
        let rows = self.display_rows(input);
        self.sort_order(input, state)
            .into_iter()
            .map(|i| self.columns.render_row(&rows[i], &self.colors))
            .collect()
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Inputs of the standard variant: schema, config and the sample row that
/// measures are read from when the schema lists none.
type StandardKey = (Schema, VisConfig, Vec<Row>);
type SummaryKey = (Vec<Row>, Schema, SummaryOptions);
type SummaryColumnsKey = (String, VisConfig);

/// Memoized table pipeline. One instance per visualization.
#[derive(Debug)]
pub struct TableVis {
    options: SummaryOptions,
    keys: Memo<StandardKey, ClassifiedKeys>,
    columns: Memo<StandardKey, ColumnModel>,
    summary: Memo<SummaryKey, SummaryResult>,
    summary_rows: Memo<SummaryKey, Vec<Row>>,
    summary_columns: Memo<SummaryColumnsKey, ColumnModel>,
}

impl Default for TableVis {
    fn default() -> Self {
        TableVis::new()
    }
}

impl TableVis {
    pub fn new() -> Self {
        TableVis::with_summary_options(SummaryOptions::default())
    }

    pub fn with_summary_options(options: SummaryOptions) -> Self {
        TableVis {
            options,
            keys: Memo::new("classified keys"),
            columns: Memo::new("column model"),
            summary: Memo::new("ranked rows"),
            summary_rows: Memo::new("summary rows"),
            summary_columns: Memo::new("summary columns"),
        }
    }

    pub fn summary_options(&self) -> &SummaryOptions {
        &self.options
    }

    /// Changes the summary options; the ranking recomputes on the next update.
    pub fn set_summary_options(&mut self, options: SummaryOptions) {
        if options != self.options {
            self.options = options;
            self.summary.invalidate();
            self.summary_rows.invalidate();
        }
    }

    /// Runs one render pass. Only slots whose inputs changed recompute.
    pub fn update(&mut self, input: &TableInput, kind: TableKind) -> Result<TableOutput, VisError> {
        log_enter!("PIPELINE", "update", "{:?} with {} rows", kind, input.rows.len());
        let output = match kind {
            TableKind::Standard => self.update_standard(input),
            TableKind::Summary => self.update_summary(input)?,
        };
        if output.recomputed.any() {
            log_info!("PIPELINE", "recomputed {:?}", output.recomputed);
        }
        log_exit!("PIPELINE", "update", "{} columns", output.columns.leaf_count());
        Ok(output)
    }

    /// The standard table. Never fails.
    pub fn render(&mut self, input: &TableInput) -> TableOutput {
        log_enter!("PIPELINE", "render");
        let output = self.update_standard(input);
        log_exit!("PIPELINE", "render");
        output
    }

    /// The ranked revenue summary table.
    pub fn render_summary(&mut self, input: &TableInput) -> Result<TableOutput, VisError> {
        self.update(input, TableKind::Summary)
    }

    fn update_standard(&mut self, input: &TableInput) -> TableOutput {
        let mut recomputed = Recomputed::default();
        let TableInput { schema, rows, config } = input;

        // Measures are only read from the rows when the schema has none.
        let sample: &[Row] = if schema.measures().is_empty() { &rows[..rows.len().min(1)] } else { &[] };
        let (keys, ran) = self
            .keys
            .get_or_compute((schema, config, sample), || classify_fields(schema, rows, config));
        recomputed.keys = ran;

        let (columns, ran) = self
            .columns
            .get_or_compute((schema, config, sample), || ColumnModelBuilder::new(schema, config, &keys).build());
        recomputed.columns = ran;

        TableOutput {
            kind: TableKind::Standard,
            columns,
            keys: Some(keys),
            summary: None,
            rows: None,
            row_borders: resolve_row_borders(&config.border_between_rows, rows.len()),
            title: config.title().map(str::to_string),
            variant: config.variant,
            colors: config.colors.clone(),
            recomputed,
        }
    }

    fn update_summary(&mut self, input: &TableInput) -> Result<TableOutput, VisError> {
        let mut recomputed = Recomputed::default();
        let TableInput { schema, rows, config } = input;
        let options = self.options;

        let summary_key = (rows.as_slice(), schema, &options);
        let (summary, ran) = self
            .summary
            .get_or_try_compute(summary_key, || rank_entities(rows, schema, &options))?;
        recomputed.summary = ran;

        let (synthesized, _) = self
            .summary_rows
            .get_or_compute(summary_key, || summary.to_rows());

        let entity_key = summary.keys.entity_key.as_str();
        let (columns, ran) = self
            .summary_columns
            .get_or_compute((entity_key, config), || summary_column_model(entity_key, config));
        recomputed.columns = ran;

        Ok(TableOutput {
            kind: TableKind::Summary,
            columns,
            keys: None,
            row_borders: resolve_row_borders(&config.border_between_rows, synthesized.len()),
            summary: Some(summary),
            rows: Some(synthesized),
            title: config.title().map(str::to_string),
            variant: config.variant,
            colors: config.colors.clone(),
            recomputed,
        })
    }
}
