use crate::core::entry::CatalogEntry;

use super::loader::parse_catalog_document;

/// Built-in catalog, validated at compile time by build.rs
const EMBEDDED_FALLBACK: &str = include_str!("../../catalogs/fallback.json");

/// The small built-in catalog used when the configured one cannot be loaded.
///
/// Covers the most commonly asked-about ambiguous ingredients.
pub fn fallback_entries() -> Vec<CatalogEntry> {
    match parse_catalog_document(EMBEDDED_FALLBACK) {
        Ok((entries, _)) => entries,
        Err(e) => {
            // build.rs rejects a broken fallback, so this is unreachable in practice
            tracing::error!("Embedded fallback catalog is invalid: {e}");
            Vec::new()
        }
    }
}
