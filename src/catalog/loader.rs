use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::core::entry::CatalogEntry;

use super::fallback::fallback_entries;

/// Default bound on a catalog fetch before falling back
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Field names under which a wrapping object may hold the entry array
const WRAPPER_FIELDS: [&str; 2] = ["items", "entries"];

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog request returned HTTP {0}")]
    Status(u16),

    #[error("Catalog fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog must be an array of entries or an object with an 'items' array")]
    InvalidShape,

    #[error("Catalog contains no usable entries")]
    Empty,
}

/// Where the working catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Path(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path
    pub fn parse(location: &str) -> Self {
        let lower = location.trim().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(location.trim().to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Cache preference sent with HTTP catalog requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// A stale cached copy is acceptable
    #[default]
    AllowStale,
    /// Always go to the origin
    NoStore,
}

impl CachePolicy {
    #[must_use]
    pub fn header_value(self) -> &'static str {
        match self {
            Self::AllowStale => "max-stale",
            Self::NoStore => "no-store",
        }
    }
}

/// Configuration for catalog loading
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Upper bound on the whole fetch; expiry counts as a failure
    pub timeout: Duration,
    pub cache: CachePolicy,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub system_proxy: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
            cache: CachePolicy::default(),
            system_proxy: true,
        }
    }
}

/// Result of a catalog load; failure is carried, never thrown
#[derive(Debug)]
pub enum LoadOutcome {
    /// The configured catalog was loaded
    Loaded {
        source: String,
        entries: Vec<CatalogEntry>,
        /// Entries dropped as malformed
        skipped: usize,
    },
    /// The configured catalog was unavailable; the built-in one is used
    Fallback {
        entries: Vec<CatalogEntry>,
        reason: CatalogError,
    },
}

impl LoadOutcome {
    pub fn entries(&self) -> &[CatalogEntry] {
        match self {
            Self::Loaded { entries, .. } | Self::Fallback { entries, .. } => entries,
        }
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        match self {
            Self::Loaded { entries, .. } | Self::Fallback { entries, .. } => entries,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// Short human-readable origin, for logs and CLI output
    pub fn describe(&self) -> String {
        match self {
            Self::Loaded { source, .. } => source.clone(),
            Self::Fallback { .. } => "built-in fallback".to_string(),
        }
    }
}

/// Load the catalog from `source`, falling back to the built-in catalog on any failure
pub async fn load_catalog(source: &CatalogSource, config: &LoaderConfig) -> LoadOutcome {
    let result = match tokio::time::timeout(config.timeout, fetch_document(source, config)).await
    {
        Ok(Ok(text)) => parse_catalog_document(&text),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(CatalogError::Timeout(config.timeout)),
    };

    match result {
        Ok((entries, skipped)) => {
            tracing::info!(
                "Loaded {} catalog entries from {source} ({skipped} skipped)",
                entries.len()
            );
            LoadOutcome::Loaded {
                source: source.to_string(),
                entries,
                skipped,
            }
        }
        Err(reason) => {
            tracing::warn!("Catalog load from {source} failed; using fallback: {reason}");
            LoadOutcome::Fallback {
                entries: fallback_entries(),
                reason,
            }
        }
    }
}

/// The built-in catalog, without attempting any fetch
pub fn load_fallback(reason: CatalogError) -> LoadOutcome {
    LoadOutcome::Fallback {
        entries: fallback_entries(),
        reason,
    }
}

async fn fetch_document(source: &CatalogSource, config: &LoaderConfig) -> Result<String, CatalogError> {
    match source {
        CatalogSource::Path(path) => Ok(tokio::fs::read_to_string(path).await?),
        CatalogSource::Url(url) => {
            let mut builder = reqwest::Client::builder().timeout(config.timeout);
            if !config.system_proxy {
                builder = builder.no_proxy();
            }
            let client = builder.build()?;
            let response = client
                .get(url)
                .header(reqwest::header::CACHE_CONTROL, config.cache.header_value())
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }
            Ok(response.text().await?)
        }
    }
}

/// Parse a catalog document into valid entries plus the count of skipped ones.
///
/// Accepts a bare array or an object wrapping the array under `items` or
/// `entries`. Individual malformed entries are skipped; a document with no
/// usable entry at all is an error.
///
/// # Errors
///
/// Returns `CatalogError::Parse` for invalid JSON, `CatalogError::InvalidShape`
/// when no entry array is found, and `CatalogError::Empty` when nothing usable
/// remains.
pub fn parse_catalog_document(text: &str) -> Result<(Vec<CatalogEntry>, usize), CatalogError> {
    let value: Value = serde_json::from_str(text)?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match WRAPPER_FIELDS.into_iter().find_map(|k| map.remove(k)) {
            Some(Value::Array(items)) => items,
            _ => return Err(CatalogError::InvalidShape),
        },
        _ => return Err(CatalogError::InvalidShape),
    };

    let mut entries = Vec::with_capacity(items.len());
    let mut skipped = 0usize;

    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<CatalogEntry>(item) {
            Ok(entry) if entry.is_valid() => entries.push(entry),
            Ok(_) => {
                tracing::debug!("Skipping catalog entry {i}: missing name");
                skipped += 1;
            }
            Err(e) => {
                tracing::debug!("Skipping catalog entry {i}: {e}");
                skipped += 1;
            }
        }
    }

    if entries.is_empty() {
        return Err(CatalogError::Empty);
    }

    Ok((entries, skipped))
}
