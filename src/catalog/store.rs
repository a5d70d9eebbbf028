use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::entry::{CatalogEntry, EntryRef};
use crate::core::types::EntryId;
use crate::matching::normalize::normalize;

/// Catalog version written by [`IngredientCatalog::to_json`]
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable export format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub items: Vec<CatalogEntry>,
}

/// The ingredient catalog with its normalized index
///
/// Built once from a list of entries and never mutated afterwards; a reload
/// builds a fresh catalog.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    /// All entries, indexed by [`EntryId`]
    entries: Vec<CatalogEntry>,

    /// Per-entry normalized keys (name, local name, aliases), deduplicated, in that order
    keys: Vec<Vec<String>>,

    /// Index: normalized key -> first entry registering it
    key_to_entry: HashMap<String, EntryId>,
}

impl IngredientCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog and its index from raw entries.
    ///
    /// Entries whose name normalizes to nothing are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::new();
        for entry in entries {
            if catalog.add_entry(entry).is_none() {
                tracing::debug!("Skipping catalog entry with unusable name");
            }
        }
        tracing::debug!(
            "Indexed {} entries under {} distinct keys",
            catalog.len(),
            catalog.key_to_entry.len()
        );
        catalog
    }

    /// Add an entry and index its keys; first writer wins for shared keys
    fn add_entry(&mut self, entry: CatalogEntry) -> Option<EntryId> {
        if !entry.is_valid() {
            return None;
        }

        let id = EntryId(self.entries.len());
        let mut keys: Vec<String> = Vec::new();
        for raw in entry.raw_keys() {
            let key = normalize(raw);
            if key.is_empty() || keys.contains(&key) {
                continue;
            }
            self.key_to_entry.entry(key.clone()).or_insert(id);
            keys.push(key);
        }

        self.entries.push(entry);
        self.keys.push(keys);
        Some(id)
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.get(id.0)
    }

    /// Exact lookup of an already-normalized key
    pub fn find_exact(&self, normalized_key: &str) -> Option<EntryRef<'_>> {
        self.key_to_entry.get(normalized_key).map(|&id| EntryRef {
            id,
            entry: &self.entries[id.0],
        })
    }

    /// Normalized keys of one entry
    pub fn keys_of(&self, id: EntryId) -> &[String] {
        self.keys.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Iterate entries together with their IDs and normalized keys
    pub fn iter(&self) -> impl Iterator<Item = (EntryRef<'_>, &[String])> {
        self.entries.iter().zip(&self.keys).enumerate().map(|(i, (entry, keys))| {
            (
                EntryRef {
                    id: EntryId(i),
                    entry,
                },
                keys.as_slice(),
            )
        })
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Export catalog to JSON
    pub fn to_json(&self, source: Option<&str>) -> Result<String, serde_json::Error> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            source: source.map(str::to_string),
            items: self.entries.clone(),
        };
        serde_json::to_string_pretty(&data)
    }

    /// Number of entries in catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
