//! Ingredient matching: normalization, ranking and bulk resolution.
//!
//! - [`normalize`](normalize::normalize): canonical comparison form for keys and queries
//! - [`Matcher`]: answers incremental and bulk queries against a catalog
//! - [`MatcherSession`]: owns the `Uninitialized → Loading → Ready` lifecycle
//!
//! ## Incremental queries
//!
//! Every entry is scored by its best key:
//!
//! | Tier | Rule |
//! |------|------|
//! | exact | key equals the query |
//! | prefix | key starts with the query |
//! | substring | key contains the query |
//!
//! Results are ordered by tier, then case-insensitively by display name. A
//! query matching exactly one entry exactly is a confident match
//! ([`LookupOutcome::Detail`]); anything else is a capped suggestion list.
//! Queries under two normalized characters return
//! [`LookupOutcome::NeedMoreInput`], which is distinct from
//! [`LookupOutcome::NoResults`].
//!
//! ## Example
//!
//! ```rust
//! use ingredient_detective::{CatalogEntry, IngredientCatalog, LookupOutcome, Matcher};
//!
//! let catalog = IngredientCatalog::from_entries(vec![
//!     CatalogEntry::new("Carmine", "animal-derived").with_aliases(["cochineal", "E120"]),
//! ]);
//! let matcher = Matcher::new(catalog);
//!
//! assert!(matches!(matcher.lookup("e120"), LookupOutcome::Detail(_)));
//! assert!(matches!(matcher.lookup("carm"), LookupOutcome::Suggestions { .. }));
//! assert!(matches!(matcher.lookup("c"), LookupOutcome::NeedMoreInput));
//! ```

pub mod bulk;
pub mod engine;
pub mod normalize;
pub mod session;

pub use bulk::{BulkOutcome, BulkReport};
pub use engine::{LookupOutcome, Matcher, MatcherConfig};
pub use session::MatcherSession;
