//! # ingredient-detective
//!
//! Look up cosmetic and food ingredients in a vegan classification catalog.
//!
//! Ingredient labels are messy: the same substance appears as an INCI name,
//! an E-number, a common name or a Hebrew label, with inconsistent case,
//! accents and punctuation. `ingredient-detective` normalizes all of these to
//! one comparison form and matches them against a catalog of known
//! ingredients.
//!
//! ## Features
//!
//! - **As-you-type lookup**: exact, prefix and substring tiers with a confident
//!   single match when the query names exactly one ingredient
//! - **Pasted lists**: split a label's ingredient list and resolve each token
//!   exactly, reporting found entries and unknown tokens
//! - **Degraded mode**: a built-in catalog takes over when the configured one
//!   cannot be loaded
//!
//! ## Example
//!
//! ```rust
//! use ingredient_detective::{BulkOutcome, CatalogEntry, IngredientCatalog, Matcher};
//!
//! let catalog = IngredientCatalog::from_entries(vec![
//!     CatalogEntry::new("Carmine", "animal-derived").with_aliases(["cochineal", "E120"]),
//!     CatalogEntry::new("Glycerin", "source-dependent").with_aliases(["glycerol"]),
//! ]);
//! let matcher = Matcher::new(catalog);
//!
//! if let BulkOutcome::Report(report) = matcher.bulk("Aqua, Glycerol, E120, carmine") {
//!     assert_eq!(report.found.len(), 2);
//!     assert_eq!(report.unknown, vec!["Aqua"]);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog loading, fallback, storage and indexing
//! - [`core`]: Catalog entry and match classification types
//! - [`matching`]: Normalization, ranking, bulk matching and the session lifecycle
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;

// Re-export commonly used types for convenience
pub use catalog::loader::{CatalogSource, LoadOutcome, LoaderConfig};
pub use catalog::store::IngredientCatalog;
pub use core::entry::CatalogEntry;
pub use core::types::*;
pub use matching::bulk::{BulkOutcome, BulkReport};
pub use matching::engine::{LookupOutcome, MatchResult, Matcher, MatcherConfig};
pub use matching::session::MatcherSession;
