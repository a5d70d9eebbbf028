//! Core data types for ingredient lookup.
//!
//! - [`CatalogEntry`](entry::CatalogEntry): one ingredient classification record
//! - [`EntryId`](types::EntryId): an entry's position in the catalog
//! - [`MatchTier`](types::MatchTier): exact / prefix / substring match quality
//! - [`BulkPolicy`](types::BulkPolicy): how pasted tokens are resolved
//!
//! ## Field names
//!
//! Catalog documents in the wild use two naming schemes for the same fields:
//!
//! | Field | Documented | Site data file |
//! |-------|------------|----------------|
//! | secondary label | `localName` | `he` |
//! | aliases | `aliases` | `keys` |
//! | explanation | `explanation` | `why` |
//! | alternatives | `alternatives` | `alt` |
//!
//! Both are accepted when reading; the documented names are written.

pub mod entry;
pub mod types;
