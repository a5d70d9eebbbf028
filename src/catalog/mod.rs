//! Ingredient catalog loading, storage and indexing.
//!
//! The catalog is a JSON document, either a bare array of entries or an
//! object holding the array under `items`. It is read from a file or fetched
//! over HTTP once per session. When that fails for any reason (missing file,
//! HTTP error, timeout, malformed JSON, no usable entries) a small catalog
//! compiled into the binary is used instead, so lookups keep working in a
//! degraded mode.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ingredient_detective::catalog::loader::{load_catalog, CatalogSource, LoaderConfig};
//! use ingredient_detective::IngredientCatalog;
//!
//! # async fn demo() {
//! let source = CatalogSource::parse("https://example.org/data/ingredient-db.json");
//! let outcome = load_catalog(&source, &LoaderConfig::default()).await;
//! if outcome.is_fallback() {
//!     eprintln!("using the built-in catalog");
//! }
//! let catalog = IngredientCatalog::from_entries(outcome.into_entries());
//! # }
//! ```

pub mod fallback;
pub mod index;
pub mod loader;
pub mod store;
