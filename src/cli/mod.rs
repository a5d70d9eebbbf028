//! Command-line interface for ingredient-detective.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **lookup**: Look up one ingredient, as-you-type style
//! - **paste**: Resolve a whole pasted ingredient list
//! - **interactive**: Answer queries line by line while the catalog loads
//! - **catalog**: List, show, or export entries from the catalog
//!
//! ## Usage
//!
//! ```text
//! # Look up a single ingredient
//! ingredient-detective lookup carmine
//!
//! # Check a label's ingredient list
//! ingredient-detective paste label.txt
//!
//! # Pipe from the clipboard
//! pbpaste | ingredient-detective paste -
//!
//! # Use a remote catalog, JSON output for scripting
//! ingredient-detective --catalog https://example.org/data/ingredient-db.json lookup e120 --format json
//! ```

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::catalog::loader::{load_catalog, CachePolicy, CatalogSource, LoadOutcome, LoaderConfig};
use crate::catalog::store::IngredientCatalog;

pub mod catalog;
pub mod interactive;
pub mod lookup;
pub mod paste;

/// Catalog location used when `--catalog` is not given
pub const DEFAULT_CATALOG_LOCATION: &str = "data/ingredient-db.json";

#[derive(Parser)]
#[command(name = "ingredient-detective")]
#[command(author = "Kind Beauty Without Guilt")]
#[command(version)]
#[command(about = "Check whether cosmetic and food ingredients are vegan")]
#[command(
    long_about = "ingredient-detective looks up ingredient names, INCI names and E-numbers in a catalog of known ingredients.\n\nIt matches queries regardless of case, accents and punctuation and provides:\n- A confident match when a name identifies exactly one ingredient\n- Ranked suggestions while a name is still being typed\n- A found/unknown breakdown for whole pasted ingredient lists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub catalog: CatalogOptions,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up a single ingredient
    Lookup(lookup::LookupArgs),

    /// Check a pasted ingredient list
    Paste(paste::PasteArgs),

    /// Answer queries from stdin, one per line
    Interactive(interactive::InteractiveArgs),

    /// Inspect the ingredient catalog
    Catalog(catalog::CatalogArgs),
}

/// Where to load the catalog from and how
#[derive(Args, Debug, Clone)]
pub struct CatalogOptions {
    /// Catalog file path or http(s) URL
    #[arg(long = "catalog", global = true, default_value = DEFAULT_CATALOG_LOCATION)]
    pub location: String,

    /// Seconds to wait for the catalog before using the built-in one
    #[arg(long, global = true, default_value_t = 5)]
    pub timeout: u64,

    /// Bypass HTTP caches when fetching the catalog
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl CatalogOptions {
    pub fn source(&self) -> CatalogSource {
        CatalogSource::parse(&self.location)
    }

    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            timeout: Duration::from_secs(self.timeout),
            cache: if self.no_cache {
                CachePolicy::NoStore
            } else {
                CachePolicy::AllowStale
            },
            ..LoaderConfig::default()
        }
    }

    /// Load the catalog to completion on a fresh runtime.
    ///
    /// A failed load is not an error: the outcome carries the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn load(&self, verbose: bool) -> anyhow::Result<LoadOutcome> {
        let rt = tokio::runtime::Runtime::new()?;
        let outcome = rt.block_on(load_catalog(&self.source(), &self.loader_config()));

        if verbose {
            eprintln!(
                "Loaded catalog from {} with {} entries",
                outcome.describe(),
                outcome.entries().len()
            );
        }

        Ok(outcome)
    }

    /// Load and index the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn load_catalog(&self, verbose: bool) -> anyhow::Result<IngredientCatalog> {
        Ok(IngredientCatalog::from_entries(
            self.load(verbose)?.into_entries(),
        ))
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Shorten `s` to at most `max_chars` characters, marking the cut with "..."
pub(crate) fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Replace tabs and newlines so a value fits in one TSV cell
pub(crate) fn tsv_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Carmine", 10), "Carmine");
        assert_eq!(truncate("Candelilla Wax", 10), "Candeli...");
        // Multi-byte text is never split inside a character
        assert_eq!(truncate("קוכיניל אדום", 6), "קוכ...");
    }

    #[test]
    fn test_tsv_field() {
        assert_eq!(tsv_field("a\tb\nc"), "a b c");
    }

    #[test]
    fn test_catalog_options() {
        let cli = Cli::parse_from([
            "ingredient-detective",
            "--catalog",
            "https://example.org/db.json",
            "--timeout",
            "2",
            "--no-cache",
            "lookup",
            "carmine",
        ]);
        assert_eq!(
            cli.catalog.source(),
            CatalogSource::Url("https://example.org/db.json".into())
        );
        let config = cli.catalog.loader_config();
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.cache, CachePolicy::NoStore);
    }

    #[test]
    fn test_default_catalog_location() {
        let cli = Cli::parse_from(["ingredient-detective", "lookup", "carmine"]);
        assert_eq!(cli.catalog.location, DEFAULT_CATALOG_LOCATION);
        assert_eq!(cli.catalog.loader_config().cache, CachePolicy::AllowStale);
    }
}
