use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::types::EntryId;
use crate::matching::normalize::normalize;

/// One ingredient classification record in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical (usually English) label
    pub name: String,

    /// Secondary display label, e.g. the Hebrew name
    #[serde(
        default,
        rename = "localName",
        alias = "local_name",
        alias = "he",
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub local_name: Option<String>,

    /// Additional keys that resolve to this entry (INCI names, E-numbers, ...)
    #[serde(
        default,
        alias = "keys",
        deserialize_with = "string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub aliases: Vec<String>,

    /// Classification label; opaque to the matcher
    #[serde(default, deserialize_with = "string_or_empty")]
    pub status: String,

    /// Why the ingredient has this status
    #[serde(
        default,
        alias = "why",
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,

    /// Suggested substitutes
    #[serde(
        default,
        alias = "alt",
        deserialize_with = "optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub alternatives: Option<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local_name: None,
            aliases: Vec::new(),
            status: status.into(),
            explanation: None,
            alternatives: None,
        }
    }

    #[must_use]
    pub fn with_local_name(mut self, local_name: impl Into<String>) -> Self {
        self.local_name = Some(local_name.into());
        self
    }

    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    #[must_use]
    pub fn with_alternatives(mut self, alternatives: impl Into<String>) -> Self {
        self.alternatives = Some(alternatives.into());
        self
    }

    /// Label shown to users: `name · local_name`
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.local_name.as_deref().map(str::trim) {
            Some(local) if !local.is_empty() => format!("{} · {local}", self.name.trim()),
            _ => self.name.trim().to_string(),
        }
    }

    /// Every raw key this entry answers to, canonical name first.
    ///
    /// Blank keys are skipped; duplicates are left for the index to collapse
    /// after normalization.
    pub fn raw_keys(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.local_name.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
            .filter(|k| !k.trim().is_empty())
    }

    /// An entry is usable only with a name that survives normalization
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !normalize(&self.name).is_empty()
    }
}

// Only the name is required; a null or mistyped optional field reads as absent.

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A lone string is one alias; non-string list items are dropped
fn string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// A catalog entry together with its position in the catalog
#[derive(Debug, Clone, Copy)]
pub struct EntryRef<'a> {
    pub id: EntryId,
    pub entry: &'a CatalogEntry,
}

impl Serialize for EntryRef<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entry.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_with_local_name() {
        let entry = CatalogEntry::new("Carmine", "animal-derived").with_local_name("קרמין");
        assert_eq!(entry.display_name(), "Carmine · קרמין");
    }

    #[test]
    fn test_display_name_ignores_blank_local_name() {
        let entry = CatalogEntry::new("Glycerin", "depends").with_local_name("  ");
        assert_eq!(entry.display_name(), "Glycerin");
    }

    #[test]
    fn test_raw_keys_order_and_blanks() {
        let entry = CatalogEntry::new("Carmine", "animal-derived")
            .with_local_name("קרמין")
            .with_aliases(["cochineal", "", "E120"]);
        let keys: Vec<&str> = entry.raw_keys().collect();
        assert_eq!(keys, vec!["Carmine", "קרמין", "cochineal", "E120"]);
    }

    #[test]
    fn test_deserialize_site_field_names() {
        let json = r#"{
            "name": "Lanolin",
            "he": "לנולין",
            "keys": ["lanolin", "wool wax"],
            "status": "animal-derived",
            "why": "From sheep wool.",
            "alt": "Plant butters",
            "unknown_field": 42
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.local_name.as_deref(), Some("לנולין"));
        assert_eq!(entry.aliases, vec!["lanolin", "wool wax"]);
        assert_eq!(entry.explanation.as_deref(), Some("From sheep wool."));
        assert_eq!(entry.alternatives.as_deref(), Some("Plant butters"));
    }

    #[test]
    fn test_deserialize_documented_field_names() {
        let json = r#"{
            "name": "Carmine",
            "localName": "קרמין",
            "aliases": ["E120"],
            "status": "animal-derived",
            "explanation": "Made from insects.",
            "alternatives": "Beet extract"
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.local_name.as_deref(), Some("קרמין"));
        assert_eq!(entry.aliases, vec!["E120"]);
        assert_eq!(entry.explanation.as_deref(), Some("Made from insects."));
    }

    #[test]
    fn test_deserialize_tolerates_null_and_mistyped_fields() {
        let json = r#"{
            "name": "Gelatin",
            "he": null,
            "keys": ["gelatin", 441, null, "E441"],
            "status": null,
            "why": 7,
            "alt": null
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "Gelatin");
        assert_eq!(entry.local_name, None);
        assert_eq!(entry.aliases, vec!["gelatin", "E441"]);
        assert_eq!(entry.status, "");
        assert_eq!(entry.explanation, None);
        assert_eq!(entry.alternatives, None);
    }

    #[test]
    fn test_deserialize_single_string_alias() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"name": "Beeswax", "keys": "cera alba"}"#).unwrap();
        assert_eq!(entry.aliases, vec!["cera alba"]);

        let entry: CatalogEntry =
            serde_json::from_str(r#"{"name": "Shellac", "keys": null}"#).unwrap();
        assert!(entry.aliases.is_empty());
    }

    #[test]
    fn test_serialize_documented_field_names() {
        let entry = CatalogEntry::new("Gelatin", "animal-derived")
            .with_explanation("Boiled animal tissue.")
            .with_alternatives("Agar agar");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["explanation"], "Boiled animal tissue.");
        assert_eq!(json["alternatives"], "Agar agar");
        assert!(json.get("localName").is_none());
        assert!(json.get("aliases").is_none());
    }

    #[test]
    fn test_is_valid() {
        assert!(CatalogEntry::new("Carmine", "").is_valid());
        assert!(!CatalogEntry::new("   ", "").is_valid());
        assert!(!CatalogEntry::new("?!", "").is_valid());
    }
}
