//! FILENAME: core/model/src/style.rs
//! PURPOSE: CSS-like style maps and the `prop:value;prop:value` declaration parser.
//! CONTEXT: Conditional highlights are configured as a single declaration
//! string. It is parsed once into a `StyleMap` and merged into cell styles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property -> value mapping for a cell's inline style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap {
    entries: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        StyleMap::default()
    }

    /// Parses a semicolon-delimited declaration list.
    ///
    /// Entries without a `:` separator, or with an empty property name, are
    /// skipped. Only the first `:` splits, so values such as `url(http://x)`
    /// survive intact.
    pub fn parse(declarations: &str) -> Self {
        let mut style = StyleMap::new();
        for entry in declarations.split(';') {
            if entry.trim().is_empty() {
                continue;
            }
            match entry.split_once(':') {
                Some((prop, value)) if !prop.trim().is_empty() => {
                    style.set(prop.trim(), value.trim());
                }
                _ => {
                    log::debug!(target: "STYLE", "skipping malformed style entry {:?}", entry);
                }
            }
        }
        style
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    /// Merges `other` into `self`; `other` wins on key collision.
    pub fn merge(&mut self, other: &StyleMap) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders back to a declaration string (sorted by property).
    pub fn to_css(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
