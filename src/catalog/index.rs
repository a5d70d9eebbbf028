use crate::core::entry::EntryRef;
use crate::core::types::MatchTier;
use crate::matching::normalize::word_offset;

use super::store::IngredientCatalog;

/// A catalog entry that matched a query, with its best tier
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub entry: EntryRef<'a>,
    pub tier: MatchTier,
}

/// Finds candidate entries for a normalized query
pub struct CandidateFinder<'a> {
    catalog: &'a IngredientCatalog,
}

impl<'a> CandidateFinder<'a> {
    pub fn new(catalog: &'a IngredientCatalog) -> Self {
        Self { catalog }
    }

    /// Every entry with at least one key matching `query`, tagged with its best tier.
    ///
    /// Returned in catalog order; ranking is left to the caller.
    pub fn find_by_tier(&self, query: &str) -> Vec<Candidate<'a>> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for (entry, keys) in self.catalog.iter() {
            let mut best: Option<MatchTier> = None;
            for key in keys {
                if let Some(tier) = MatchTier::classify(key, query) {
                    best = Some(best.map_or(tier, |b| b.min(tier)));
                    if tier == MatchTier::Exact {
                        break;
                    }
                }
            }
            if let Some(tier) = best {
                candidates.push(Candidate { entry, tier });
            }
        }
        candidates
    }

    /// Find the entry whose key occurs as a whole-word phrase inside `token`.
    ///
    /// Keys shorter than `min_key_chars` are ignored here; they only match a
    /// token exactly. The earliest phrase wins, then the longest, then catalog
    /// order.
    pub fn find_by_words(&self, token: &str, min_key_chars: usize) -> Option<EntryRef<'a>> {
        let mut best: Option<(usize, usize, EntryRef<'a>)> = None;

        for (entry, keys) in self.catalog.iter() {
            for key in keys {
                let key_chars = key.chars().count();
                if key_chars < min_key_chars {
                    continue;
                }
                let Some(offset) = word_offset(token, key) else {
                    continue;
                };
                let better = match best {
                    None => true,
                    Some((best_offset, best_len, _)) => {
                        offset < best_offset || (offset == best_offset && key_chars > best_len)
                    }
                };
                if better {
                    best = Some((offset, key_chars, entry));
                }
            }
        }

        best.map(|(_, _, entry)| entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::CatalogEntry;
    use crate::core::types::EntryId;

    fn catalog() -> IngredientCatalog {
        IngredientCatalog::from_entries(vec![
            CatalogEntry::new("Carmine", "animal-derived").with_aliases(["cochineal", "E120"]),
            CatalogEntry::new("Shellac", "animal-derived").with_aliases(["lac"]),
            CatalogEntry::new("Stearic Acid", "source-dependent"),
            CatalogEntry::new("Acid", "test"),
        ])
    }

    #[test]
    fn test_best_tier_per_entry() {
        let catalog = catalog();
        let finder = CandidateFinder::new(&catalog);

        let hits = finder.find_by_tier("carmine");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tier, MatchTier::Exact);

        let hits = finder.find_by_tier("coch");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tier, MatchTier::Prefix);
    }

    #[test]
    fn test_substring_tier() {
        let catalog = catalog();
        let finder = CandidateFinder::new(&catalog);

        let hits = finder.find_by_tier("lac");
        // "lac" is exact for Shellac (alias) and nothing else contains it
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.id, EntryId(1));
        assert_eq!(hits[0].tier, MatchTier::Exact);

        let hits = finder.find_by_tier("acid");
        assert_eq!(hits.len(), 2);
        let tiers: Vec<MatchTier> = hits.iter().map(|c| c.tier).collect();
        assert_eq!(tiers, vec![MatchTier::Substring, MatchTier::Exact]);
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let catalog = catalog();
        assert!(CandidateFinder::new(&catalog).find_by_tier("").is_empty());
    }

    #[test]
    fn test_find_by_words_prefers_earliest_then_longest() {
        let catalog = catalog();
        let finder = CandidateFinder::new(&catalog);

        let hit = finder.find_by_words("hydrolyzed stearic acid", 4).unwrap();
        assert_eq!(hit.entry.name, "Stearic Acid");

        let hit = finder.find_by_words("carmine stearic acid", 4).unwrap();
        assert_eq!(hit.entry.name, "Carmine");
    }

    #[test]
    fn test_find_by_words_skips_short_keys() {
        let catalog = catalog();
        let finder = CandidateFinder::new(&catalog);

        assert!(finder.find_by_words("lac flakes", 5).is_none());
        assert!(finder.find_by_words("e120 colorant", 5).is_none());
        assert_eq!(
            finder.find_by_words("e120 colorant", 4).unwrap().entry.name,
            "Carmine"
        );
    }
}
