//! FILENAME: core/column-engine/src/conditional.rs
//! PURPOSE: Conditional Style Resolver.
//! CONTEXT: `conditional_styles_<source> = <target>` means: when the source
//! measure's value in a row is a truthy token, the target's cell gets the
//! configured highlight style. The option map is turned into an edge list
//! once, then grouped by target so each column carries only its own checks.

use serde::{Deserialize, Serialize};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use gridvis_model::{Row, StyleMap, VisConfig};

use crate::classify::ClassifiedKeys;

/// One directed highlight rule: `source` truthy -> style `target`'s cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionalEdge {
    pub source_key: String,
    pub target_key: String,
    pub style: StyleMap,
}

/// The checks attached to one target column, in classifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleResolver {
    checks: SmallVec<[ConditionalEdge; 2]>,
}

impl StyleResolver {
    /// Style for one cell. `pivot` selects `row[source][pivot]`; without it
    /// the source is read unpivoted.
    pub fn resolve(&self, row: &Row, pivot: Option<&str>) -> StyleMap {
        let mut style = StyleMap::new();
        for check in &self.checks {
            let fires = row
                .lookup(&check.source_key, pivot)
                .map(|fv| fv.is_truthy_token())
                .unwrap_or(false);
            if fires {
                style.merge(&check.style);
            }
        }
        style
    }

    pub fn source_keys(&self) -> impl Iterator<Item = &str> {
        self.checks.iter().map(|c| c.source_key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// All highlight rules of a table, grouped by target key.
#[derive(Debug, Clone, Default)]
pub struct ConditionalRules {
    edges: Vec<ConditionalEdge>,
    by_target: FxHashMap<String, StyleResolver>,
}

impl ConditionalRules {
    /// Builds the edge list from the measure keys in classifier order.
    /// A measure pointing at itself is ignored.
    pub fn from_config(keys: &ClassifiedKeys, config: &VisConfig) -> Self {
        let mut edges = Vec::new();
        for source in &keys.measure_keys {
            let Some(target) = config.conditional_target(source) else {
                continue;
            };
            if target == source {
                log::warn!(target: "CONDITIONAL", "ignoring self-targeting rule on {}", source);
                continue;
            }
            edges.push(ConditionalEdge {
                source_key: source.clone(),
                target_key: target.to_string(),
                style: config.highlight_style.clone(),
            });
        }
        ConditionalRules::from_edges(edges)
    }

    pub fn from_edges(edges: Vec<ConditionalEdge>) -> Self {
        let mut by_target: FxHashMap<String, StyleResolver> = FxHashMap::default();
        for edge in &edges {
            by_target
                .entry(edge.target_key.clone())
                .or_default()
                .checks
                .push(edge.clone());
        }
        ConditionalRules { edges, by_target }
    }

    pub fn edges(&self) -> &[ConditionalEdge] {
        &self.edges
    }

    /// The resolver to attach to `target`'s column, if any rule targets it.
    pub fn resolver_for(&self, target: &str) -> Option<StyleResolver> {
        self.by_target.get(target).cloned()
    }

    /// `resolve(row, key, pivot)`: the merged style for one cell. Rules fire
    /// in classifier order, later rules overriding earlier ones.
    pub fn resolve(&self, row: &Row, key: &str, pivot: Option<&str>) -> StyleMap {
        match self.by_target.get(key) {
            Some(resolver) => resolver.resolve(row, pivot),
            None => StyleMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_fields;
    use gridvis_model::{FieldDescriptor, FieldValue, Schema};

    fn setup(extra: &[(&str, &str)]) -> (ClassifiedKeys, VisConfig) {
        let schema = Schema::new()
            .with_dimension(FieldDescriptor::new("t.name"))
            .with_measure(FieldDescriptor::new("t.score"))
            .with_measure(FieldDescriptor::new("t.is_late"))
            .with_measure(FieldDescriptor::new("t.is_vip"));
        let mut pairs = vec![
            ("conditional_styles_t.is_late", "t.score"),
            ("conditionalHighlightStyle", "background-color: yellow; color: black"),
        ];
        pairs.extend_from_slice(extra);
        let config = VisConfig::from_pairs(pairs);
        (classify_fields(&schema, &[], &config), config)
    }

    #[test]
    fn test_truthy_trigger_applies_style() {
        let (keys, config) = setup(&[]);
        let rules = ConditionalRules::from_config(&keys, &config);

        for token in ["Yes", "true", "1"] {
            let row = Row::new().with_field("t.is_late", FieldValue::new(token));
            let style = rules.resolve(&row, "t.score", None);
            assert_eq!(style.get("background-color"), Some("yellow"), "token {}", token);
        }
    }

    #[test]
    fn test_other_values_apply_nothing() {
        let (keys, config) = setup(&[]);
        let rules = ConditionalRules::from_config(&keys, &config);

        let no = Row::new().with_field("t.is_late", FieldValue::new("No"));
        let zero = Row::new().with_field("t.is_late", FieldValue::new(0.0));
        let absent = Row::new();
        for row in [no, zero, absent] {
            assert!(rules.resolve(&row, "t.score", None).is_empty());
        }
    }

    #[test]
    fn test_only_target_is_styled() {
        let (keys, config) = setup(&[]);
        let rules = ConditionalRules::from_config(&keys, &config);
        let row = Row::new().with_field("t.is_late", FieldValue::new("Yes"));
        assert!(rules.resolve(&row, "t.name", None).is_empty());
    }

    #[test]
    fn test_pivoted_source_is_read_per_pivot() {
        let (keys, config) = setup(&[]);
        let rules = ConditionalRules::from_config(&keys, &config);
        let row = Row::new()
            .with_pivoted("t.is_late", "2024", FieldValue::new("Yes"))
            .with_pivoted("t.is_late", "2025", FieldValue::new("No"));

        assert!(!rules.resolve(&row, "t.score", Some("2024")).is_empty());
        assert!(rules.resolve(&row, "t.score", Some("2025")).is_empty());
    }

    #[test]
    fn test_multiple_rules_merge_in_order() {
        let (keys, config) = setup(&[("conditional_styles_t.is_vip", "t.score")]);
        let rules = ConditionalRules::from_config(&keys, &config);
        assert_eq!(rules.edges().len(), 2);
        assert_eq!(rules.edges()[0].source_key, "t.is_late");
        assert_eq!(rules.edges()[1].source_key, "t.is_vip");

        let row = Row::new()
            .with_field("t.is_late", FieldValue::new("No"))
            .with_field("t.is_vip", FieldValue::new("true"));
        assert_eq!(
            rules.resolve(&row, "t.score", None).get("color"),
            Some("black")
        );
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let (keys, config) = setup(&[]);
        let rules = ConditionalRules::from_config(&keys, &config);
        let row = Row::new().with_field("t.is_late", FieldValue::new("Yes"));
        let first = rules.resolve(&row, "t.score", None);
        let second = rules.resolve(&row, "t.score", None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_style_string_yields_empty_style() {
        let schema = Schema::new()
            .with_measure(FieldDescriptor::new("a"))
            .with_measure(FieldDescriptor::new("b"));
        let config = VisConfig::from_pairs([("conditional_styles_b", "a")]);
        let keys = classify_fields(&schema, &[], &config);
        let rules = ConditionalRules::from_config(&keys, &config);
        let row = Row::new().with_field("b", FieldValue::new("Yes"));
        assert!(rules.resolve(&row, "a", None).is_empty());
    }
}
