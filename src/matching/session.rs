//! Catalog lifecycle for a matching session.
//!
//! A session moves `Uninitialized → Loading → Ready` exactly once. The state
//! lives in a [`tokio::sync::watch`] channel: the loader builds the complete
//! [`Matcher`] and publishes it in one step, so a query either sees the old
//! state or the finished catalog, never a half-built index. While the catalog
//! is not ready both query modes answer `Loading`, which keeps a bootstrap gap
//! from reading as "not in the database".

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::loader::{load_catalog, CatalogSource, LoadOutcome, LoaderConfig};
use crate::catalog::store::IngredientCatalog;
use crate::matching::bulk::BulkOutcome;
use crate::matching::engine::{LookupOutcome, Matcher, MatcherConfig};

/// Where a ready catalog came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    Loaded { source: String, skipped: usize },
    Fallback { reason: String },
}

impl CatalogOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

impl std::fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { source, .. } => write!(f, "{source}"),
            Self::Fallback { reason } => write!(f, "built-in fallback ({reason})"),
        }
    }
}

/// A loaded matcher together with its origin
#[derive(Debug)]
pub struct ReadyCatalog {
    pub matcher: Matcher,
    pub origin: CatalogOrigin,
}

impl ReadyCatalog {
    /// Build the matcher for a load outcome
    pub fn from_outcome(outcome: LoadOutcome, config: MatcherConfig) -> Self {
        let origin = match &outcome {
            LoadOutcome::Loaded { source, skipped, .. } => CatalogOrigin::Loaded {
                source: source.clone(),
                skipped: *skipped,
            },
            LoadOutcome::Fallback { reason, .. } => CatalogOrigin::Fallback {
                reason: reason.to_string(),
            },
        };
        let catalog = IngredientCatalog::from_entries(outcome.into_entries());
        Self {
            matcher: Matcher::with_config(catalog, config),
            origin,
        }
    }
}

/// Lifecycle state of the session's catalog
#[derive(Debug, Clone, Default)]
pub enum CatalogState {
    #[default]
    Uninitialized,
    Loading,
    Ready(Arc<ReadyCatalog>),
}

impl CatalogState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(&self) -> Option<Arc<ReadyCatalog>> {
        match self {
            Self::Ready(ready) => Some(Arc::clone(ready)),
            _ => None,
        }
    }
}

/// An explicitly owned matching session; construct once and hand to consumers
pub struct MatcherSession {
    state: Arc<watch::Sender<CatalogState>>,
    config: MatcherConfig,
}

impl MatcherSession {
    pub fn new(config: MatcherConfig) -> Self {
        let (tx, _rx) = watch::channel(CatalogState::Uninitialized);
        Self {
            state: Arc::new(tx),
            config,
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// Begin loading the catalog in the background.
    ///
    /// Only the first call starts a load; later calls return `None`. Must be
    /// called from within a Tokio runtime.
    pub fn start(&self, source: CatalogSource, loader: LoaderConfig) -> Option<JoinHandle<()>> {
        let started = self.state.send_if_modified(|state| {
            if matches!(state, CatalogState::Uninitialized) {
                *state = CatalogState::Loading;
                true
            } else {
                false
            }
        });
        if !started {
            tracing::debug!("Catalog load already started; ignoring");
            return None;
        }

        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        Some(tokio::spawn(async move {
            let outcome = load_catalog(&source, &loader).await;
            publish(&state, ReadyCatalog::from_outcome(outcome, config));
        }))
    }

    /// Publish an already-obtained load outcome; ignored once the session is ready
    pub fn install(&self, outcome: LoadOutcome) {
        publish(
            &self.state,
            ReadyCatalog::from_outcome(outcome, self.config.clone()),
        );
    }

    /// Wait until the catalog is ready.
    ///
    /// Waits forever on a session that was never started.
    pub async fn ready(&self) -> Option<Arc<ReadyCatalog>> {
        let mut rx = self.state.subscribe();
        let state = rx.wait_for(CatalogState::is_ready).await.ok()?;
        state.ready()
    }

    /// Incremental query against the current state
    pub fn lookup(&self, query: &str) -> LookupOutcome {
        let ready = self.state.borrow().ready();
        match ready {
            Some(ready) => ready.matcher.lookup(query),
            None => LookupOutcome::Loading,
        }
    }

    /// Bulk query against the current state
    pub fn bulk(&self, text: &str) -> BulkOutcome {
        let ready = self.state.borrow().ready();
        match ready {
            Some(ready) => ready.matcher.bulk(text),
            None => BulkOutcome::Loading,
        }
    }
}

impl Default for MatcherSession {
    fn default() -> Self {
        Self::new(MatcherConfig::default())
    }
}

fn publish(state: &watch::Sender<CatalogState>, ready: ReadyCatalog) {
    let origin = ready.origin.clone();
    let ready = Arc::new(ready);
    let published = state.send_if_modified(|current| {
        if current.is_ready() {
            false
        } else {
            *current = CatalogState::Ready(Arc::clone(&ready));
            true
        }
    });

    if published {
        tracing::debug!(
            "Catalog ready from {origin}: {} entries",
            ready.matcher.catalog().len()
        );
    } else {
        tracing::debug!("Catalog already ready; discarding load from {origin}");
    }
}
