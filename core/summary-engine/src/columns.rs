//! FILENAME: core/summary-engine/src/columns.rs
//! PURPOSE: Column model of the revenue summary table.
//! CONTEXT: Four fixed columns over the synthesized summary rows: entity,
//! latest value as whole dollars, trailing sparkline, share of total.

use column_engine::{
    Accessor, ColumnDefinition, ColumnLayout, ColumnModel, ColumnRole, RendererKind,
    SparklineColoring, SparklineStyle,
};
use gridvis_model::VisConfig;

use crate::view::{CURRENT_VALUE_KEY, PERCENT_OF_TOTAL_KEY, SHARE_OF_LEADER_KEY, TRAILING_KEY};

pub const ENTITY_HEADER: &str = "Service";
pub const CURRENT_VALUE_HEADER: &str = "Current Month Revenue";
pub const GROWTH_HEADER: &str = "Growth";
pub const PERCENT_OF_TOTAL_HEADER: &str = "% of Total";

fn summary_column(id: &str, header: &str, renderer: RendererKind, width: u16) -> ColumnDefinition {
    ColumnDefinition::leaf(
        id,
        header,
        Accessor::Field { key: id.to_string() },
        renderer,
        ColumnRole::Summary,
    )
    .with_width(width)
}

/// Builds the summary columns for rows keyed by `entity_key`.
pub fn summary_column_model(entity_key: &str, config: &VisConfig) -> ColumnModel {
    let entity_header = config.rename(entity_key).unwrap_or(ENTITY_HEADER);

    let columns = vec![
        summary_column(entity_key, entity_header, RendererKind::Plain, 200),
        summary_column(CURRENT_VALUE_KEY, CURRENT_VALUE_HEADER, RendererKind::Currency, 200),
        summary_column(
            TRAILING_KEY,
            GROWTH_HEADER,
            RendererKind::Sparkline {
                style: SparklineStyle::Line,
                coloring: SparklineColoring::LastStep,
            },
            150,
        ),
        summary_column(
            PERCENT_OF_TOTAL_KEY,
            PERCENT_OF_TOTAL_HEADER,
            RendererKind::ShareBar {
                fill_key: SHARE_OF_LEADER_KEY.to_string(),
            },
            200,
        ),
    ];

    let mut model = ColumnModel {
        layout: ColumnLayout::Summary,
        columns,
    };
    column_engine::mark_column_borders(&mut model, &config.border_between_columns);
    model
}
