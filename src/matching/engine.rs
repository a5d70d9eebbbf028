use serde::Serialize;
use std::cmp::Ordering;

use crate::catalog::index::{Candidate, CandidateFinder};
use crate::catalog::store::IngredientCatalog;
use crate::core::entry::CatalogEntry;
use crate::core::types::{BulkPolicy, EntryId, MatchTier};
use crate::matching::normalize::{normalize, normalized_len};

/// Queries shorter than this (in normalized characters) are not searched
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;

/// Maximum suggestions returned for an ambiguous query
pub const DEFAULT_SUGGESTION_LIMIT: usize = 12;

/// Maximum unknown pasted tokens shown before truncating
pub const DEFAULT_UNKNOWN_DISPLAY_LIMIT: usize = 30;

/// Aliases shorter than this only ever match a pasted token exactly
pub const DEFAULT_SHORT_ALIAS_LEN: usize = 5;

/// Configuration for the matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    pub min_query_chars: usize,
    pub suggestion_limit: usize,
    pub unknown_display_limit: usize,
    pub short_alias_len: usize,
    pub bulk_policy: BulkPolicy,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            unknown_display_limit: DEFAULT_UNKNOWN_DISPLAY_LIMIT,
            short_alias_len: DEFAULT_SHORT_ALIAS_LEN,
            bulk_policy: BulkPolicy::default(),
        }
    }
}

/// An entry that matched a query
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub id: EntryId,
    pub tier: MatchTier,
    pub display_name: String,
    pub entry: CatalogEntry,
}

impl MatchResult {
    fn from_candidate(candidate: &Candidate<'_>) -> Self {
        Self {
            id: candidate.entry.id,
            tier: candidate.tier,
            display_name: candidate.entry.entry.display_name(),
            entry: candidate.entry.entry.clone(),
        }
    }
}

/// Answer to an incremental (as-you-type) query
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The catalog is not ready yet; this is not "no match"
    Loading,
    /// The query is too short to search
    NeedMoreInput,
    /// Nothing matched
    NoResults,
    /// Exactly one entry matched exactly
    Detail(MatchResult),
    /// Ranked candidates, capped to the suggestion limit
    Suggestions {
        matches: Vec<MatchResult>,
        /// Number of matches before capping
        total: usize,
    },
}

/// The ingredient matcher: a catalog plus matching configuration
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: IngredientCatalog,
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with default configuration
    pub fn new(catalog: IngredientCatalog) -> Self {
        Self {
            catalog,
            config: MatcherConfig::default(),
        }
    }

    /// Create a matcher with custom configuration
    pub fn with_config(catalog: IngredientCatalog, config: MatcherConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &IngredientCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Rank every matching entry: tier, then display name (case-insensitive), then catalog order
    pub fn rank(&self, query: &str) -> Vec<MatchResult> {
        let normalized = normalize(query);
        let finder = CandidateFinder::new(&self.catalog);

        let mut results: Vec<MatchResult> = finder
            .find_by_tier(&normalized)
            .iter()
            .map(MatchResult::from_candidate)
            .collect();

        results.sort_by(compare_results);
        results
    }

    /// Answer an incremental query
    pub fn lookup(&self, query: &str) -> LookupOutcome {
        if normalized_len(query) < self.config.min_query_chars {
            return LookupOutcome::NeedMoreInput;
        }

        let mut ranked = self.rank(query);
        if ranked.is_empty() {
            return LookupOutcome::NoResults;
        }

        let exact_count = ranked
            .iter()
            .take_while(|m| m.tier == MatchTier::Exact)
            .count();
        if exact_count == 1 {
            return LookupOutcome::Detail(ranked.swap_remove(0));
        }

        let total = ranked.len();
        ranked.truncate(self.config.suggestion_limit);
        LookupOutcome::Suggestions {
            matches: ranked,
            total,
        }
    }
}

fn compare_results(a: &MatchResult, b: &MatchResult) -> Ordering {
    a.tier
        .cmp(&b.tier)
        .then_with(|| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        })
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fallback::fallback_entries;

    fn make_test_matcher() -> Matcher {
        Matcher::new(IngredientCatalog::from_entries(vec![
            CatalogEntry::new("Carmine", "animal-derived").with_aliases(["carmine", "cochineal", "E120"]),
            CatalogEntry::new("Carnauba Wax", "vegan").with_aliases(["carnauba", "E903"]),
            CatalogEntry::new("Beeswax", "animal-derived").with_aliases(["cera alba", "E901"]),
            CatalogEntry::new("candelilla wax", "vegan").with_aliases(["E902"]),
            CatalogEntry::new("Café Extract", "vegan"),
        ]))
    }

    fn names(matches: &[MatchResult]) -> Vec<&str> {
        matches.iter().map(|m| m.entry.name.as_str()).collect()
    }

    #[test]
    fn test_prefix_query_suggests() {
        let matcher = make_test_matcher();
        match matcher.lookup("carm") {
            LookupOutcome::Suggestions { matches, total } => {
                assert_eq!(total, 1);
                assert_eq!(matches[0].entry.name, "Carmine");
                assert_eq!(matches[0].tier, MatchTier::Prefix);
            }
            other => panic!("Expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_name_is_detail() {
        let matcher = make_test_matcher();
        for query in ["Carmine", "CARMINE", "  carmine ", "cochineal", "e120"] {
            match matcher.lookup(query) {
                LookupOutcome::Detail(m) => assert_eq!(m.entry.name, "Carmine"),
                other => panic!("Expected detail for {query:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_short_query_needs_more_input() {
        let matcher = make_test_matcher();
        for query in ["", "a", " c ", "?!", "é"] {
            assert!(
                matches!(matcher.lookup(query), LookupOutcome::NeedMoreInput),
                "{query:?} should need more input"
            );
        }
    }

    #[test]
    fn test_no_results() {
        let matcher = make_test_matcher();
        assert!(matches!(matcher.lookup("xyz"), LookupOutcome::NoResults));
    }

    #[test]
    fn test_ranking_by_tier_then_name() {
        let matcher = make_test_matcher();
        let ranked = matcher.rank("wax");
        // "wax" is a substring everywhere; ties broken case-insensitively by name
        assert_eq!(names(&ranked), vec!["Beeswax", "candelilla wax", "Carnauba Wax"]);
        assert!(ranked.iter().all(|m| m.tier == MatchTier::Substring));

        let ranked = matcher.rank("ca");
        assert_eq!(
            names(&ranked),
            vec!["Café Extract", "candelilla wax", "Carmine", "Carnauba Wax"]
        );
        assert!(ranked.iter().all(|m| m.tier == MatchTier::Prefix));

        // An exact hit outranks an alphabetically earlier prefix hit
        let ranked = matcher.rank("carnauba");
        assert_eq!(ranked[0].tier, MatchTier::Exact);
        assert_eq!(ranked[0].entry.name, "Carnauba Wax");
    }

    #[test]
    fn test_diacritic_insensitive_lookup() {
        let matcher = make_test_matcher();
        match matcher.lookup("cafe extract") {
            LookupOutcome::Detail(m) => assert_eq!(m.entry.name, "Café Extract"),
            other => panic!("Expected detail, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_exact_aliases_give_suggestions() {
        let matcher = Matcher::new(IngredientCatalog::from_entries(vec![
            CatalogEntry::new("Squalane (plant)", "vegan").with_aliases(["squalane"]),
            CatalogEntry::new("Squalane (shark)", "animal-derived").with_aliases(["squalane"]),
        ]));
        match matcher.lookup("squalane") {
            LookupOutcome::Suggestions { matches, total } => {
                assert_eq!(total, 2);
                assert!(matches.iter().all(|m| m.tier == MatchTier::Exact));
            }
            other => panic!("Expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn test_suggestions_capped() {
        let entries = (0..20).map(|i| CatalogEntry::new(format!("Extract {i:02}"), "vegan"));
        let matcher = Matcher::new(IngredientCatalog::from_entries(entries));
        match matcher.lookup("extract") {
            LookupOutcome::Suggestions { matches, total } => {
                assert_eq!(total, 20);
                assert_eq!(matches.len(), DEFAULT_SUGGESTION_LIMIT);
                assert_eq!(matches[0].entry.name, "Extract 00");
            }
            other => panic!("Expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_min_query_chars() {
        let config = MatcherConfig {
            min_query_chars: 4,
            ..MatcherConfig::default()
        };
        let matcher = Matcher::with_config(make_test_matcher().catalog().clone(), config);
        assert!(matches!(matcher.lookup("car"), LookupOutcome::NeedMoreInput));
        assert!(matches!(
            matcher.lookup("carm"),
            LookupOutcome::Suggestions { .. }
        ));
    }

    #[test]
    fn test_fallback_catalog_answers() {
        let matcher = Matcher::new(IngredientCatalog::from_entries(fallback_entries()));
        assert!(matches!(matcher.lookup("lanolin"), LookupOutcome::Detail(_)));
        assert_eq!(matcher.rank("squal").first().unwrap().tier, MatchTier::Prefix);
    }

    #[test]
    fn test_lookup_outcome_json_shape() {
        let matcher = make_test_matcher();
        let json = serde_json::to_value(matcher.lookup("carmine")).unwrap();
        assert_eq!(json["state"], "detail");
        assert_eq!(json["tier"], "exact");
        assert_eq!(json["entry"]["name"], "Carmine");

        let json = serde_json::to_value(matcher.lookup("a")).unwrap();
        assert_eq!(json["state"], "need_more_input");
    }
}
