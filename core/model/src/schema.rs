//! FILENAME: core/model/src/schema.rs
//! PURPOSE: The query schema: ordered dimension, measure and pivot descriptors.
//! CONTEXT: Decoded from the host's query response. Every section is optional;
//! an absent or `null` list decodes as empty.

use serde::{Deserialize, Deserializer, Serialize};

/// Reserved pivot key that denotes the row-total column.
pub const TOTAL_PIVOT_KEY: &str = "$$$_row_total_$$$";

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A dimension or measure descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub field_group_variant: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        FieldDescriptor {
            name: name.into(),
            label: None,
            field_group_variant: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Configured label, or the raw name when no label is set.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(l) if !l.is_empty() => l,
            _ => self.name.as_str(),
        }
    }
}

/// One pivot value (a fan-out column of each measure).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PivotDescriptor {
    pub key: String,
    #[serde(default)]
    pub is_total: bool,
}

impl PivotDescriptor {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let is_total = key == TOTAL_PIVOT_KEY;
        PivotDescriptor { key, is_total }
    }

    pub fn total() -> Self {
        PivotDescriptor::new(TOTAL_PIVOT_KEY)
    }

    pub fn is_row_total(&self) -> bool {
        self.is_total || self.key == TOTAL_PIVOT_KEY
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dimension_like: Vec<FieldDescriptor>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub measure_like: Vec<FieldDescriptor>,
}

/// Schema of a query result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub fields: SchemaFields,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pivots: Vec<PivotDescriptor>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    pub fn with_dimension(mut self, field: FieldDescriptor) -> Self {
        self.fields.dimension_like.push(field);
        self
    }

    pub fn with_measure(mut self, field: FieldDescriptor) -> Self {
        self.fields.measure_like.push(field);
        self
    }

    pub fn with_pivot(mut self, pivot: PivotDescriptor) -> Self {
        self.pivots.push(pivot);
        self
    }

    pub fn dimensions(&self) -> &[FieldDescriptor] {
        &self.fields.dimension_like
    }

    pub fn measures(&self) -> &[FieldDescriptor] {
        &self.fields.measure_like
    }

    /// Looks a field up by name across dimensions and measures.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.dimensions()
            .iter()
            .chain(self.measures().iter())
            .find(|f| f.name == name)
    }

    pub fn pivot(&self, key: &str) -> Option<&PivotDescriptor> {
        self.pivots.iter().find(|p| p.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sections_decode_empty() {
        let schema: Schema = serde_json::from_str("{}").unwrap();
        assert!(schema.dimensions().is_empty());
        assert!(schema.measures().is_empty());
        assert!(schema.pivots.is_empty());

        let nulls: Schema = serde_json::from_str(
            r#"{"fields": {"dimension_like": null, "measure_like": null}, "pivots": null}"#,
        )
        .unwrap();
        assert_eq!(nulls, Schema::default());
    }

    #[test]
    fn test_decodes_host_shape() {
        let schema: Schema = serde_json::from_str(
            r#"{
                "fields": {
                    "dimension_like": [{"name": "orders.region", "label": "Region"}],
                    "measure_like": [{"name": "orders.count", "label": "Count", "field_group_variant": "Count"}]
                },
                "pivots": [{"key": "2024"}, {"key": "$$$_row_total_$$$", "is_total": true}]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.dimensions()[0].display_label(), "Region");
        assert_eq!(schema.measures()[0].field_group_variant.as_deref(), Some("Count"));
        assert!(schema.pivots[1].is_row_total());
        assert!(!schema.pivots[0].is_row_total());
    }

    #[test]
    fn test_label_falls_back_to_name() {
        let field = FieldDescriptor::new("orders.id").with_label("");
        assert_eq!(field.display_label(), "orders.id");
    }
}
