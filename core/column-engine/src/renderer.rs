//! FILENAME: core/column-engine/src/renderer.rs
//! PURPOSE: Cell Renderer Dispatch - picks a renderer per column from the
//! field name and renders cells into paint-ready `CellContent`.
//! CONTEXT: Dispatch happens once per column at build time. Field keys are
//! split at the first `.` into a table prefix and a bare name; renderers that
//! need companion fields carry the fully prefixed companion keys as data.
//!
//! | match                         | renderer         | companions                      |
//! |-------------------------------|------------------|---------------------------------|
//! | key == `description`          | RawMarkup        |                                 |
//! | ends `_html`                  | RawMarkup        |                                 |
//! | ends `property_image`         | ImageCaption     | `property_name`, `property_floor` |
//! | ends `rank`                   | SignedBadge      | `rank_change`                   |
//! | ends `sentiment`              | SentimentBadge   | `sentiment_date`                |
//! | ends `tags`                   | TagList          |                                 |
//! | ends `_change_pct`            | PercentDelta     |                                 |
//! | ends `_completion`            | Progress(Direct) |                                 |
//! | ends `_rate`                  | Progress(Scaled) |                                 |
//! | ends `_trend`                 | Sparkline(Area)  |                                 |
//! | ends `_history`               | Sparkline(Marks) |                                 |
//! | anything else                 | Plain            |                                 |

use serde::{Deserialize, Serialize};
use gridvis_model::{format_general, format_percent, format_usd, ChartColors, FieldValue, Row, Value};

/// Maximum number of points the sparkline primitive draws.
pub const SPARKLINE_POINT_LIMIT: usize = 10;

pub const DEFAULT_COLUMN_WIDTH: u16 = 200;

// ============================================================================
// RENDERER KINDS
// ============================================================================

/// How a progress bar derives its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgressScale {
    /// Value is fraction-like: `"3/4"` -> 75, or a number already in percent.
    Direct,
    /// Value is in `[0, 1]` and is multiplied by 100.
    Scaled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SparklineStyle {
    Area,
    Line,
    LineMarkers,
}

/// What decides a sparkline's up/down color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SparklineColoring {
    /// Down when the last point is below the first.
    FirstToLast,
    /// Down when the last point is below the one before it.
    LastStep,
}

/// The renderer attached to a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RendererKind {
    Plain,
    RawMarkup,
    ImageCaption { caption_key: String, detail_key: String },
    SignedBadge { delta_key: String },
    SentimentBadge { date_key: String },
    TagList,
    PercentDelta,
    Progress(ProgressScale),
    Sparkline { style: SparklineStyle, coloring: SparklineColoring },
    /// Whole-dollar USD (summary table).
    Currency,
    /// Percent label plus a bar whose fill is read from `fill_key` (summary table).
    ShareBar { fill_key: String },
}

impl RendererKind {
    /// Renderer-specific default width.
    pub fn default_width(&self) -> u16 {
        match self {
            RendererKind::ImageCaption { .. } | RendererKind::TagList => 250,
            RendererKind::Progress(_) => 160,
            RendererKind::Sparkline { .. } => 150,
            _ => DEFAULT_COLUMN_WIDTH,
        }
    }
}

// ============================================================================
// DISPATCH TABLE
// ============================================================================

enum Pattern {
    /// Whole key, no table prefix.
    Literal(&'static str),
    /// Suffix of the bare name.
    Suffix(&'static str),
}

struct DispatchRule {
    pattern: Pattern,
    build: fn(&str) -> RendererKind,
}

fn raw_markup(_prefix: &str) -> RendererKind {
    RendererKind::RawMarkup
}

fn image_caption(prefix: &str) -> RendererKind {
    RendererKind::ImageCaption {
        caption_key: format!("{}property_name", prefix),
        detail_key: format!("{}property_floor", prefix),
    }
}

fn signed_badge(prefix: &str) -> RendererKind {
    RendererKind::SignedBadge {
        delta_key: format!("{}rank_change", prefix),
    }
}

fn sentiment_badge(prefix: &str) -> RendererKind {
    RendererKind::SentimentBadge {
        date_key: format!("{}sentiment_date", prefix),
    }
}

fn tag_list(_prefix: &str) -> RendererKind {
    RendererKind::TagList
}

fn percent_delta(_prefix: &str) -> RendererKind {
    RendererKind::PercentDelta
}

fn progress_direct(_prefix: &str) -> RendererKind {
    RendererKind::Progress(ProgressScale::Direct)
}

fn progress_scaled(_prefix: &str) -> RendererKind {
    RendererKind::Progress(ProgressScale::Scaled)
}

fn sparkline_area(_prefix: &str) -> RendererKind {
    RendererKind::Sparkline {
        style: SparklineStyle::Area,
        coloring: SparklineColoring::FirstToLast,
    }
}

fn sparkline_line(_prefix: &str) -> RendererKind {
    RendererKind::Sparkline {
        style: SparklineStyle::LineMarkers,
        coloring: SparklineColoring::FirstToLast,
    }
}

const DISPATCH_TABLE: &[DispatchRule] = &[
    DispatchRule { pattern: Pattern::Literal("description"), build: raw_markup },
    DispatchRule { pattern: Pattern::Suffix("_html"), build: raw_markup },
    DispatchRule { pattern: Pattern::Suffix("property_image"), build: image_caption },
    DispatchRule { pattern: Pattern::Suffix("rank"), build: signed_badge },
    DispatchRule { pattern: Pattern::Suffix("sentiment"), build: sentiment_badge },
    DispatchRule { pattern: Pattern::Suffix("tags"), build: tag_list },
    DispatchRule { pattern: Pattern::Suffix("_change_pct"), build: percent_delta },
    DispatchRule { pattern: Pattern::Suffix("_completion"), build: progress_direct },
    DispatchRule { pattern: Pattern::Suffix("_rate"), build: progress_scaled },
    DispatchRule { pattern: Pattern::Suffix("_trend"), build: sparkline_area },
    DispatchRule { pattern: Pattern::Suffix("_history"), build: sparkline_line },
];

/// Splits `orders.status` into (`orders.`, `status`). Keys without a `.`
/// have an empty prefix.
pub fn split_table_prefix(key: &str) -> (&str, &str) {
    match key.find('.') {
        Some(dot) => key.split_at(dot + 1),
        None => ("", key),
    }
}

/// Picks the renderer for a field key. First matching rule wins; unmatched
/// keys render as plain text.
pub fn renderer_for_key(key: &str) -> RendererKind {
    let (prefix, bare) = split_table_prefix(key);
    for rule in DISPATCH_TABLE {
        let matched = match rule.pattern {
            Pattern::Literal(literal) => key == literal,
            Pattern::Suffix(suffix) => bare.ends_with(suffix),
        };
        if matched {
            return (rule.build)(prefix);
        }
    }
    RendererKind::Plain
}

// ============================================================================
// RENDERED CONTENT
// ============================================================================

pub const BADGE_UP_CLASS: &str = "badge-up";
pub const BADGE_DOWN_CLASS: &str = "badge-down";
pub const BADGE_UP_GLYPH: &str = "\u{25B2}";
pub const BADGE_DOWN_GLYPH: &str = "\u{25BC}";

pub const SENTIMENT_POSITIVE_CLASS: &str = "sentiment-positive";
pub const SENTIMENT_NEGATIVE_CLASS: &str = "sentiment-negative";
pub const SENTIMENT_NEUTRAL_CLASS: &str = "sentiment-neutral";

pub const DELTA_POSITIVE_CLASS: &str = "delta-positive";
pub const DELTA_NEGATIVE_CLASS: &str = "delta-negative";

pub const TAG_DEFAULT_CLASS: &str = "tag-default";

/// Tag labels with a dedicated style class.
const TAG_CLASSES: [(&str, &str); 6] = [
    ("New", "tag-new"),
    ("Hot", "tag-hot"),
    ("Sale", "tag-sale"),
    ("Featured", "tag-featured"),
    ("Limited", "tag-limited"),
    ("Popular", "tag-popular"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub label: String,
    pub class: String,
}

/// Paint-ready content of one cell, handed to the external table widget.
///
/// `Markup` carries caller-supplied HTML unescaped; see `FieldValue`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CellContent {
    Empty,
    Text { text: String },
    Markup { html: String },
    ImageCaption {
        src: Option<String>,
        caption: Option<String>,
        detail: Option<String>,
    },
    Badge { class: String, glyph: String, text: String },
    Sentiment { class: String, label: String, date: Option<String> },
    Tags { tags: Vec<Tag> },
    PercentDelta { class: String, text: String },
    Progress { width_percent: f64, label: String },
    Sparkline {
        style: SparklineStyle,
        color: String,
        points: Vec<f64>,
        limit: usize,
    },
    ShareBar {
        label: String,
        fill_percent: f64,
        bar_color: String,
        background_color: String,
    },
}

impl CellContent {
    pub fn text(s: impl Into<String>) -> Self {
        CellContent::Text { text: s.into() }
    }

    /// Plain-text view, used for sorting and tests.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellContent::Text { text } => Some(text),
            CellContent::Markup { html } => Some(html),
            _ => None,
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Inputs for rendering one cell: the row, the column's primary value and
/// the pivot the column reads (companions are read under the same pivot).
pub struct CellInput<'r> {
    pub row: &'r Row,
    pub primary: Option<&'r FieldValue>,
    pub pivot: Option<&'r str>,
}

impl<'r> CellInput<'r> {
    fn companion(&self, key: &str) -> Option<&'r FieldValue> {
        self.row.lookup(key, self.pivot)
    }
}

/// Plain display: html (as markup), else `rendered`, else the value.
fn plain(primary: Option<&FieldValue>) -> CellContent {
    let Some(fv) = primary else {
        return CellContent::Empty;
    };
    if let Some(html) = fv.html.as_deref() {
        return CellContent::Markup { html: html.to_string() };
    }
    match fv.rendered.as_deref() {
        Some(r) if !r.is_empty() => CellContent::text(r),
        _ if fv.value.is_null() => CellContent::Empty,
        _ => CellContent::text(fv.value.display()),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Three-way sentiment classification by exact label.
pub fn sentiment_class(label: &str) -> &'static str {
    match label {
        "Positive" => SENTIMENT_POSITIVE_CLASS,
        "Negative" => SENTIMENT_NEGATIVE_CLASS,
        _ => SENTIMENT_NEUTRAL_CLASS,
    }
}

pub fn tag_class(label: &str) -> &'static str {
    TAG_CLASSES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, class)| *class)
        .unwrap_or(TAG_DEFAULT_CLASS)
}

/// Up color unless the last point is below the first.
pub fn trend_color<'c>(points: &[f64], colors: &'c ChartColors) -> &'c str {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if last < first => colors.down.as_str(),
        _ => colors.up.as_str(),
    }
}

fn last_step_color<'c>(points: &[f64], colors: &'c ChartColors) -> &'c str {
    if points.len() >= 2 && points[points.len() - 1] < points[points.len() - 2] {
        colors.down.as_str()
    } else {
        colors.up.as_str()
    }
}

fn numeric_series(value: &Value) -> Vec<f64> {
    match value {
        Value::List(items) => items
            .iter()
            .map(|v| v.as_number().filter(|n| n.is_finite()).unwrap_or(0.0))
            .collect(),
        other => other.as_number().into_iter().collect(),
    }
}

fn tag_labels(value: &Value) -> Vec<String> {
    match value {
        Value::List(items) => items
            .iter()
            .map(Value::display)
            .filter(|s| !s.is_empty())
            .collect(),
        Value::Text(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Progress width in percent. Zero divisors and non-finite values give 0.
pub fn progress_percent(value: &Value, scale: ProgressScale) -> f64 {
    let raw = match scale {
        ProgressScale::Scaled => value.as_number().map(|n| n * 100.0),
        ProgressScale::Direct => match value {
            Value::Text(s) if s.contains('/') => {
                let (num, den) = s.split_once('/').unwrap_or((s.as_str(), ""));
                match (num.trim().parse::<f64>(), den.trim().parse::<f64>()) {
                    (Ok(n), Ok(d)) if d != 0.0 => Some(n / d * 100.0),
                    _ => Some(0.0),
                }
            }
            Value::Text(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
            other => other.as_number(),
        },
    };
    match raw {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0),
        _ => 0.0,
    }
}

/// Renders one cell with the given renderer.
pub fn render_cell(kind: &RendererKind, input: &CellInput<'_>, colors: &ChartColors) -> CellContent {
    match kind {
        RendererKind::Plain => plain(input.primary),

        RendererKind::RawMarkup => match input.primary.and_then(|fv| fv.html.as_deref()) {
            Some(html) => CellContent::Markup { html: html.to_string() },
            None => plain(input.primary),
        },

        RendererKind::ImageCaption { caption_key, detail_key } => CellContent::ImageCaption {
            src: input.primary.and_then(|fv| non_empty(fv.value.display())),
            caption: input.companion(caption_key).and_then(|fv| non_empty(fv.display_text())),
            detail: input.companion(detail_key).and_then(|fv| non_empty(fv.display_text())),
        },

        RendererKind::SignedBadge { delta_key } => {
            let delta = input
                .companion(delta_key)
                .and_then(|fv| fv.value.as_number())
                .unwrap_or(0.0);
            let (class, glyph) = if delta < 0.0 {
                (BADGE_DOWN_CLASS, BADGE_DOWN_GLYPH)
            } else {
                (BADGE_UP_CLASS, BADGE_UP_GLYPH)
            };
            CellContent::Badge {
                class: class.to_string(),
                glyph: glyph.to_string(),
                text: input.primary.map(FieldValue::display_text).unwrap_or_default(),
            }
        }

        RendererKind::SentimentBadge { date_key } => {
            let label = input.primary.map(|fv| fv.value.display()).unwrap_or_default();
            CellContent::Sentiment {
                class: sentiment_class(&label).to_string(),
                label,
                date: input.companion(date_key).and_then(|fv| non_empty(fv.display_text())),
            }
        }

        RendererKind::TagList => CellContent::Tags {
            tags: input
                .primary
                .map(|fv| tag_labels(&fv.value))
                .unwrap_or_default()
                .into_iter()
                .map(|label| Tag {
                    class: tag_class(&label).to_string(),
                    label,
                })
                .collect(),
        },

        RendererKind::PercentDelta => {
            match input.primary.and_then(|fv| fv.value.as_number()) {
                Some(n) => CellContent::PercentDelta {
                    class: if n < 0.0 { DELTA_NEGATIVE_CLASS } else { DELTA_POSITIVE_CLASS }
                        .to_string(),
                    text: format!("{}%", format_general(n)),
                },
                None => CellContent::Empty,
            }
        }

        RendererKind::Progress(scale) => {
            let Some(fv) = input.primary else {
                return CellContent::Empty;
            };
            let width = progress_percent(&fv.value, *scale);
            let label = match (scale, fv.rendered.as_deref()) {
                (ProgressScale::Direct, Some(r)) if !r.is_empty() => r.to_string(),
                _ => format_percent(width, 0),
            };
            CellContent::Progress { width_percent: width, label }
        }

        RendererKind::Sparkline { style, coloring } => {
            let points = input
                .primary
                .map(|fv| numeric_series(&fv.value))
                .unwrap_or_default();
            let color = match coloring {
                SparklineColoring::FirstToLast => trend_color(&points, colors),
                SparklineColoring::LastStep => last_step_color(&points, colors),
            };
            CellContent::Sparkline {
                style: *style,
                color: color.to_string(),
                points,
                limit: SPARKLINE_POINT_LIMIT,
            }
        }

        RendererKind::Currency => match input.primary.and_then(|fv| fv.value.as_number()) {
            Some(n) => CellContent::text(format_usd(n)),
            None => CellContent::Empty,
        },

        RendererKind::ShareBar { fill_key } => {
            let pct = input
                .primary
                .and_then(|fv| fv.value.as_number())
                .filter(|n| n.is_finite())
                .unwrap_or(0.0);
            let fill = input
                .companion(fill_key)
                .and_then(|fv| fv.value.as_number())
                .filter(|n| n.is_finite())
                .unwrap_or(0.0)
                .clamp(0.0, 100.0);
            // a zero share (including a zero total) reads "0%"
            let label = if pct == 0.0 { format_percent(0.0, 0) } else { format_percent(pct, 1) };
            CellContent::ShareBar {
                label,
                fill_percent: fill,
                bar_color: colors.bar.clone(),
                background_color: colors.bar_background.clone(),
            }
        }
    }
}
