//! FILENAME: core/column-engine/src/borders.rs
//! PURPOSE: Thick separator markers from `borderBetweenColumns` and
//! `borderBetweenRows`.
//! CONTEXT: Both options are comma-separated 1-based positions. Column
//! positions count leaf columns in display order. Row positions may be
//! negative, counting back from the last row (-1 = last row).

use crate::definition::ColumnModel;

/// Parses a comma-separated position list. Non-integer entries are skipped.
pub fn parse_positions(list: &str) -> Vec<i64> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse::<i64>() {
            Ok(n) => Some(n),
            Err(_) => {
                log::debug!(target: "COLUMNS", "ignoring border position {:?}", s);
                None
            }
        })
        .collect()
}

/// Sets `thick_right_border` on the leaf columns named by `list`.
/// Out-of-range positions are ignored.
pub fn mark_column_borders(model: &mut ColumnModel, list: &str) {
    let positions = parse_positions(list);
    if positions.is_empty() {
        return;
    }

    let mut index: i64 = 0;
    for column in &mut model.columns {
        if column.group_children.is_empty() {
            index += 1;
            if positions.contains(&index) {
                column.thick_right_border = true;
            }
            continue;
        }
        for child in &mut column.group_children {
            index += 1;
            if positions.contains(&index) {
                child.thick_right_border = true;
            }
        }
    }
}

/// Resolves row positions to sorted, deduplicated 0-based row indices for a
/// table of `row_count` rows.
pub fn resolve_row_borders(list: &str, row_count: usize) -> Vec<usize> {
    let count = row_count as i64;
    let mut rows: Vec<usize> = parse_positions(list)
        .into_iter()
        .filter_map(|pos| {
            let one_based = if pos < 0 { count + pos + 1 } else { pos };
            if one_based >= 1 && one_based <= count {
                Some((one_based - 1) as usize)
            } else {
                None
            }
        })
        .collect();
    rows.sort_unstable();
    rows.dedup();
    rows
}
