use serde::Serialize;

/// Position of an entry in the catalog; identity for deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntryId(pub usize);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How well an alias matched a query; lower is better
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Alias equals the query
    Exact = 0,
    /// Alias starts with the query
    Prefix = 1,
    /// Alias contains the query
    Substring = 2,
}

impl MatchTier {
    /// Classify a normalized alias against a normalized query
    #[must_use]
    pub fn classify(alias: &str, query: &str) -> Option<Self> {
        if alias == query {
            Some(Self::Exact)
        } else if alias.starts_with(query) {
            Some(Self::Prefix)
        } else if alias.contains(query) {
            Some(Self::Substring)
        } else {
            None
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Prefix => write!(f, "prefix"),
            Self::Substring => write!(f, "substring"),
        }
    }
}

/// How pasted tokens are resolved against the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BulkPolicy {
    /// Token must equal an alias after normalization
    #[default]
    Exact,
    /// Exact first, then long aliases appearing as whole words inside the token
    WholeWords,
}
