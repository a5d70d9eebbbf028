//! Bulk ("paste an ingredient list") matching.
//!
//! A pasted label is split into tokens and each token is resolved on its own.
//! Only exact alias matches count by default: fuzzy matching across dozens of
//! short tokens produces too many false positives. The optional
//! [`BulkPolicy::WholeWords`] policy also accepts long aliases appearing as
//! whole words inside a token; aliases shorter than the configured
//! `short_alias_len` never match that way.

use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::index::CandidateFinder;
use crate::core::entry::{CatalogEntry, EntryRef};
use crate::core::types::{BulkPolicy, EntryId};
use crate::matching::engine::Matcher;
use crate::matching::normalize::normalize;

/// Characters that separate tokens in a pasted list.
///
/// Slash is deliberately absent: it appears inside names like "Squalene / Squalane".
const TOKEN_SEPARATORS: &[char] = &['\n', '\r', ',', ';', '|', '\u{FF0C}', '\u{3001}', '\u{061B}'];

/// How a pasted token was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Exact,
    WholeWord,
}

/// A catalog entry found in a pasted list
#[derive(Debug, Clone, Serialize)]
pub struct BulkMatch {
    /// First pasted token that resolved to this entry
    pub token: String,
    pub id: EntryId,
    pub resolution: Resolution,
    pub display_name: String,
    pub entry: CatalogEntry,
}

/// Partition of a pasted list into found entries and unknown tokens
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkReport {
    /// Distinct entries, in order of first appearance
    pub found: Vec<BulkMatch>,
    /// Raw tokens with no match, in order of appearance
    pub unknown: Vec<String>,
}

impl BulkReport {
    /// The first `limit` unknown tokens and how many were left out
    pub fn unknown_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.unknown.len().min(limit);
        (&self.unknown[..shown], self.unknown.len() - shown)
    }
}

/// Answer to a bulk query
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BulkOutcome {
    /// The catalog is not ready yet
    Loading,
    /// The input held no tokens
    Empty,
    Report(BulkReport),
}

/// Split pasted text into trimmed, non-empty tokens.
///
/// Tokens are deduplicated by normalized form, keeping the first occurrence;
/// tokens that normalize to nothing are dropped.
pub fn split_tokens(text: &str) -> Vec<&str> {
    let mut seen: HashSet<String> = HashSet::new();
    text.split(TOKEN_SEPARATORS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| {
            let key = normalize(token);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

impl Matcher {
    /// Resolve every token of a pasted ingredient list
    pub fn bulk(&self, text: &str) -> BulkOutcome {
        let tokens = split_tokens(text);
        if tokens.is_empty() {
            return BulkOutcome::Empty;
        }

        let finder = CandidateFinder::new(self.catalog());
        let mut found_ids: HashSet<EntryId> = HashSet::new();
        let mut report = BulkReport::default();

        for token in tokens {
            let normalized = normalize(token);
            let resolved = self
                .catalog()
                .find_exact(&normalized)
                .map(|hit| (hit, Resolution::Exact))
                .or_else(|| match self.config().bulk_policy {
                    BulkPolicy::Exact => None,
                    BulkPolicy::WholeWords => finder
                        .find_by_words(&normalized, self.config().short_alias_len)
                        .map(|hit| (hit, Resolution::WholeWord)),
                });

            match resolved {
                Some((hit, resolution)) => {
                    if found_ids.insert(hit.id) {
                        report.found.push(bulk_match(token, hit, resolution));
                    }
                }
                None => report.unknown.push(token.to_string()),
            }
        }

        tracing::debug!(
            "Bulk query: {} found, {} unknown",
            report.found.len(),
            report.unknown.len()
        );
        BulkOutcome::Report(report)
    }
}

fn bulk_match(token: &str, hit: EntryRef<'_>, resolution: Resolution) -> BulkMatch {
    BulkMatch {
        token: token.to_string(),
        id: hit.id,
        resolution,
        display_name: hit.entry.display_name(),
        entry: hit.entry.clone(),
    }
}
