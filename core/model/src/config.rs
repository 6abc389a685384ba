//! FILENAME: core/model/src/config.rs
//! PURPOSE: Typed visualization configuration.
//! CONTEXT: The host hands over a flat string-keyed option object. It is
//! decoded exactly once into `VisConfig`; nothing downstream looks up option
//! names dynamically. Prefixed keys (`rename_*`, `conditional_styles_*`) are
//! collected into typed maps.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::VisError;
use crate::style::StyleMap;

pub const RENAME_PREFIX: &str = "rename_";
pub const CONDITIONAL_PREFIX: &str = "conditional_styles_";

/// Sentinel that disables a `conditional_styles_*` entry.
pub const CONDITIONAL_NONE: &str = "none";

pub const DEFAULT_BAR_COLOR: &str = "#4A90E2";
pub const DEFAULT_BAR_BACKGROUND: &str = "#eee";
pub const DEFAULT_UP_COLOR: &str = "#34D058";
pub const DEFAULT_DOWN_COLOR: &str = "#FF4B4B";

/// Table chrome picked by the `tableBordered` / `unsetTable` / `fixedHeight` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TableVariant {
    #[default]
    Default,
    Bordered,
    Unset,
    FixedHeight,
}

impl TableVariant {
    /// Class name handed to the table paint layer.
    pub fn class_name(&self) -> &'static str {
        match self {
            TableVariant::Default => "table",
            TableVariant::Bordered => "table bordered",
            TableVariant::Unset => "table unsetTable",
            TableVariant::FixedHeight => "table fixedHeight",
        }
    }
}

/// Colors used by chart-like renderers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartColors {
    pub bar: String,
    pub bar_background: String,
    pub up: String,
    pub down: String,
}

impl Default for ChartColors {
    fn default() -> Self {
        ChartColors {
            bar: DEFAULT_BAR_COLOR.to_string(),
            bar_background: DEFAULT_BAR_BACKGROUND.to_string(),
            up: DEFAULT_UP_COLOR.to_string(),
            down: DEFAULT_DOWN_COLOR.to_string(),
        }
    }
}

/// Free-form CSS strings. They are carried for the styling collaborator and
/// never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CssOverrides {
    pub header_styles: String,
    pub row_styles: String,
    pub general_css: String,
}

/// The complete, typed configuration of one table visualization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisConfig {
    /// `rename_<key>` overrides, empty values already dropped.
    pub renames: BTreeMap<String, String>,

    /// `conditional_styles_<source>` -> target key. Disabled entries dropped.
    pub conditional_targets: BTreeMap<String, String>,

    /// Parsed `conditionalHighlightStyle`.
    pub highlight_style: StyleMap,

    pub group_by_measure: bool,

    pub chart_title: String,

    pub colors: ChartColors,

    /// Raw `borderBetweenColumns` list (1-based column positions).
    pub border_between_columns: String,

    /// Raw `borderBetweenRows` list (1-based, negative counts from the end).
    pub border_between_rows: String,

    pub variant: TableVariant,

    pub css: CssOverrides,
}

fn as_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn as_bool(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}

impl VisConfig {
    /// Decodes the flat host option object. Unknown keys are ignored.
    pub fn from_map(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        let mut config = VisConfig::default();
        let mut table_bordered = false;
        let mut unset_table = false;
        let mut fixed_height = false;

        for (key, value) in map {
            if let Some(field) = key.strip_prefix(RENAME_PREFIX) {
                if let Some(text) = as_string(value).filter(|t| !t.is_empty()) {
                    config.renames.insert(field.to_string(), text);
                }
                continue;
            }
            if let Some(source) = key.strip_prefix(CONDITIONAL_PREFIX) {
                match as_string(value) {
                    Some(target) if !target.is_empty() && target != CONDITIONAL_NONE => {
                        config
                            .conditional_targets
                            .insert(source.to_string(), target);
                    }
                    _ => {}
                }
                continue;
            }

            match key.as_str() {
                "conditionalHighlightStyle" => {
                    if let Some(text) = as_string(value) {
                        config.highlight_style = StyleMap::parse(&text);
                    }
                }
                "groupByMeasure" => config.group_by_measure = as_bool(value),
                "chartTitle" => config.chart_title = as_string(value).unwrap_or_default(),
                "chartBarColor" => {
                    if let Some(c) = as_string(value).filter(|c| !c.is_empty()) {
                        config.colors.bar = c;
                    }
                }
                "chartBarBackgroundColor" | "chartBackgroundColor" => {
                    if let Some(c) = as_string(value).filter(|c| !c.is_empty()) {
                        config.colors.bar_background = c;
                    }
                }
                "upSparklineColor" => {
                    if let Some(c) = as_string(value).filter(|c| !c.is_empty()) {
                        config.colors.up = c;
                    }
                }
                "downSparklineColor" => {
                    if let Some(c) = as_string(value).filter(|c| !c.is_empty()) {
                        config.colors.down = c;
                    }
                }
                "borderBetweenColumns" => {
                    config.border_between_columns = as_string(value).unwrap_or_default()
                }
                "borderBetweenRows" => {
                    config.border_between_rows = as_string(value).unwrap_or_default()
                }
                "tableBordered" => table_bordered = as_bool(value),
                "unsetTable" => unset_table = as_bool(value),
                "fixedHeight" => fixed_height = as_bool(value),
                "headerStyles" => config.css.header_styles = as_string(value).unwrap_or_default(),
                "rowStyles" => config.css.row_styles = as_string(value).unwrap_or_default(),
                "generalCSS" => config.css.general_css = as_string(value).unwrap_or_default(),
                _ => {}
            }
        }

        config.variant = if table_bordered {
            TableVariant::Bordered
        } else if unset_table {
            TableVariant::Unset
        } else if fixed_height {
            TableVariant::FixedHeight
        } else {
            TableVariant::Default
        };

        config
    }

    /// Decodes a JSON object string. A non-object top level is an error.
    pub fn from_json_str(json: &str) -> Result<Self, VisError> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        Ok(VisConfig::from_map(&map))
    }

    /// Convenience for string-valued options.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), serde_json::Value::String(v.into())))
            .collect();
        VisConfig::from_map(&map)
    }

    /// Header override for a field or pivot key.
    pub fn rename(&self, key: &str) -> Option<&str> {
        self.renames.get(key).map(String::as_str)
    }

    /// The key whose cell `source` highlights, if the rule is enabled.
    pub fn conditional_target(&self, source: &str) -> Option<&str> {
        self.conditional_targets.get(source).map(String::as_str)
    }

    /// True when `key` only exists to drive another column's highlight.
    pub fn is_style_driver(&self, key: &str) -> bool {
        self.conditional_targets.contains_key(key)
    }

    pub fn title(&self) -> Option<&str> {
        if self.chart_title.is_empty() {
            None
        } else {
            Some(self.chart_title.as_str())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VisConfig::default();
        assert!(!config.group_by_measure);
        assert_eq!(config.colors.up, "#34D058");
        assert_eq!(config.colors.down, "#FF4B4B");
        assert_eq!(config.colors.bar, "#4A90E2");
        assert_eq!(config.colors.bar_background, "#eee");
        assert_eq!(config.variant, TableVariant::Default);
        assert!(config.title().is_none());
    }

    #[test]
    fn test_prefixed_keys() {
        let config = VisConfig::from_pairs([
            ("rename_orders.count", "Orders"),
            ("rename_orders.empty", ""),
            ("conditional_styles_orders.flag", "orders.count"),
            ("conditional_styles_orders.other", "none"),
            ("conditional_styles_orders.blank", ""),
        ]);
        assert_eq!(config.rename("orders.count"), Some("Orders"));
        assert_eq!(config.rename("orders.empty"), None);
        assert_eq!(config.conditional_target("orders.flag"), Some("orders.count"));
        assert!(config.is_style_driver("orders.flag"));
        assert!(!config.is_style_driver("orders.other"));
        assert!(!config.is_style_driver("orders.blank"));
    }

    #[test]
    fn test_json_booleans_and_strings() {
        let config = VisConfig::from_json_str(
            r#"{"groupByMeasure": true, "fixedHeight": "true", "conditionalHighlightStyle": "color: red"}"#,
        )
        .unwrap();
        assert!(config.group_by_measure);
        assert_eq!(config.variant, TableVariant::FixedHeight);
        assert_eq!(config.highlight_style.get("color"), Some("red"));

        let config = VisConfig::from_pairs([("groupByMeasure", "false")]);
        assert!(!config.group_by_measure);
    }

    #[test]
    fn test_bordered_wins_over_other_variants() {
        let config = VisConfig::from_pairs([
            ("fixedHeight", "true"),
            ("tableBordered", "true"),
        ]);
        assert_eq!(config.variant, TableVariant::Bordered);
        assert_eq!(config.variant.class_name(), "table bordered");
    }

    #[test]
    fn test_background_alias() {
        let config = VisConfig::from_pairs([("chartBackgroundColor", "#ccc")]);
        assert_eq!(config.colors.bar_background, "#ccc");
    }

    #[test]
    fn test_non_object_is_error() {
        assert!(VisConfig::from_json_str("[1, 2]").is_err());
    }
}
