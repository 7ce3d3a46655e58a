//! # Catalog Store
//!
//! Owns the list of catalog items and its request status, and degrades to
//! the embedded seed list when the source cannot be reached.
//!
//! ## Overlapping Fetches
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch #1 ──begin──────────────────────────────── resolve ──┐          │
//! │  fetch #2 ─────begin──────────── resolve ──┐                │          │
//! │                                            ▼                ▼          │
//! │  LatestRequest (default)          applied, loading off   Superseded    │
//! │  LastResponse                     applied, loading off   applied       │
//! │                                                                         │
//! │  #2 resolving last is applied under both policies, loading ends off.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering by name and genre is derived data; views run
//! [`gamevault_core::catalog::filter_items`] over [`CatalogStore::state`].

use std::sync::Arc;

use gamevault_client::{CatalogSource, ClientResult};
use gamevault_core::{CatalogItem, CatalogState, Generation, OverlapPolicy};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// How a single `fetch_games` call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The source answered; its items are now in the store.
    Live { count: usize },

    /// The source failed; the seed list is in the store with `reason` as
    /// the advisory error.
    Fallback { reason: String },

    /// A newer fetch was issued before this one resolved; its result was
    /// discarded.
    Superseded { generation: u64 },
}

impl FetchOutcome {
    /// Returns true if this call's result settled the store.
    pub fn applied(&self) -> bool {
        !matches!(self, FetchOutcome::Superseded { .. })
    }
}

/// Handle to the catalog store. Clones share the same state.
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    state: watch::Sender<CatalogState>,
    source: Arc<dyn CatalogSource>,
    policy: OverlapPolicy,
}

impl CatalogStore {
    pub fn new(source: Arc<dyn CatalogSource>, policy: OverlapPolicy) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        CatalogStore {
            inner: Arc::new(CatalogInner {
                state,
                source,
                policy,
            }),
        }
    }

    /// Current state.
    pub fn state(&self) -> CatalogState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every transition.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.inner.state.subscribe()
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.inner.policy
    }

    /// Loads one page from the source into the store.
    ///
    /// Never fails: a source error settles the store with fallback data.
    pub async fn fetch_games(&self) -> FetchOutcome {
        let mut generation = Generation::default();
        self.inner
            .state
            .send_modify(|s| generation = s.begin_fetch());
        debug!(%generation, "Catalog fetch started");

        let policy = self.inner.policy;
        match self.inner.source.fetch_games().await {
            Ok(items) => {
                let count = items.len();
                let applied = self
                    .inner
                    .state
                    .send_if_modified(|s| s.settle_live(generation, items, policy));

                if applied {
                    info!(%generation, count, "Catalog loaded");
                    FetchOutcome::Live { count }
                } else {
                    self.superseded(generation)
                }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(%generation, error = %reason, "Catalog source failed, showing fallback data");

                let applied = self
                    .inner
                    .state
                    .send_if_modified(|s| s.settle_fallback(generation, reason.clone(), policy));

                if applied {
                    FetchOutcome::Fallback { reason }
                } else {
                    self.superseded(generation)
                }
            }
        }
    }

    /// Fetches one item with its description. Store state is not touched.
    pub async fn fetch_game_details(&self, id: u64) -> ClientResult<CatalogItem> {
        debug!(id, "Fetching game details");
        self.inner.source.fetch_game(id).await
    }

    fn superseded(&self, generation: Generation) -> FetchOutcome {
        debug!(
            %generation,
            latest = %self.inner.state.borrow().latest_generation(),
            "Discarding stale catalog response"
        );
        FetchOutcome::Superseded {
            generation: generation.value(),
        }
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("policy", &self.inner.policy)
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gamevault_client::{CatalogSourceConfig, ClientError, RawgSource};
    use gamevault_core::fallback::seed_catalog;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    type Reply = ClientResult<Vec<CatalogItem>>;

    /// Source whose responses are released by the test, one per call in
    /// call order.
    #[derive(Default)]
    struct ScriptedSource {
        pending: Mutex<VecDeque<oneshot::Receiver<Reply>>>,
    }

    impl ScriptedSource {
        fn script(&self) -> oneshot::Sender<Reply> {
            let (tx, rx) = oneshot::channel();
            self.pending.lock().unwrap().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl CatalogSource for ScriptedSource {
        async fn fetch_games(&self) -> Reply {
            let rx = self.pending.lock().unwrap().pop_front();
            match rx {
                Some(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(ClientError::Transport("script dropped".into()))),
                None => Err(ClientError::Transport("unscripted call".into())),
            }
        }

        async fn fetch_game(&self, id: u64) -> ClientResult<CatalogItem> {
            Ok(CatalogItem::new(id, "Detail"))
        }
    }

    fn items(names: &[&str]) -> Vec<CatalogItem> {
        names
            .iter()
            .enumerate()
            .map(|(i, n)| CatalogItem::new(i as u64 + 1, *n))
            .collect()
    }

    async fn started(store: &CatalogStore, generation: u64) {
        store
            .subscribe()
            .wait_for(|s| s.latest_generation().value() >= generation)
            .await
            .unwrap();
    }

    fn spawn_fetch(store: &CatalogStore) -> tokio::task::JoinHandle<FetchOutcome> {
        let store = store.clone();
        tokio::spawn(async move { store.fetch_games().await })
    }

    #[tokio::test]
    async fn test_live_fetch_replaces_items() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source.clone(), OverlapPolicy::default());

        source.script().send(Ok(items(&["Portal 2", "Celeste"]))).unwrap();
        let outcome = store.fetch_games().await;

        assert_eq!(outcome, FetchOutcome::Live { count: 2 });
        let state = store.state();
        assert_eq!(state.items().len(), 2);
        assert!(!state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_source_error_falls_back_to_seed_list() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source.clone(), OverlapPolicy::default());

        source.script().send(Err(ClientError::Status { status: 503 })).unwrap();
        let outcome = store.fetch_games().await;

        assert_eq!(
            outcome,
            FetchOutcome::Fallback {
                reason: "Failed to fetch games (HTTP 503)".into()
            }
        );
        let state = store.state();
        assert_eq!(state.items(), seed_catalog().as_slice());
        assert_eq!(state.error(), Some("Failed to fetch games (HTTP 503)"));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_unreachable_source_yields_fallback() {
        let source = RawgSource::new(
            CatalogSourceConfig::new("http://127.0.0.1:1/api").timeout(Duration::from_secs(2)),
        )
        .unwrap();
        let store = CatalogStore::new(Arc::new(source), OverlapPolicy::default());

        let outcome = store.fetch_games().await;

        assert!(matches!(outcome, FetchOutcome::Fallback { .. }));
        let state = store.state();
        assert!(!state.items().is_empty());
        assert!(state.error().is_some());
    }

    #[tokio::test]
    async fn test_new_fetch_clears_previous_error() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source.clone(), OverlapPolicy::default());

        source.script().send(Err(ClientError::Timeout(10))).unwrap();
        store.fetch_games().await;
        assert!(store.state().error().is_some());

        let reply = source.script();
        let pending = spawn_fetch(&store);
        started(&store, 2).await;

        let state = store.state();
        assert!(state.is_loading());
        assert_eq!(state.error(), None);

        reply.send(Ok(items(&["Hades"]))).unwrap();
        assert_eq!(pending.await.unwrap(), FetchOutcome::Live { count: 1 });
    }

    #[tokio::test]
    async fn test_latest_request_discards_stale_response() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source.clone(), OverlapPolicy::LatestRequest);
        let (first, second) = (source.script(), source.script());

        let h1 = spawn_fetch(&store);
        started(&store, 1).await;
        let h2 = spawn_fetch(&store);
        started(&store, 2).await;

        // second request resolves first
        second.send(Ok(items(&["New"]))).unwrap();
        assert_eq!(h2.await.unwrap(), FetchOutcome::Live { count: 1 });
        assert!(!store.state().is_loading());

        first.send(Ok(items(&["Old", "Older"]))).unwrap();
        assert_eq!(h1.await.unwrap(), FetchOutcome::Superseded { generation: 1 });

        let state = store.state();
        assert_eq!(state.items()[0].name, "New");
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_latest_request_keeps_loading_until_latest_resolves() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source.clone(), OverlapPolicy::LatestRequest);
        let (first, second) = (source.script(), source.script());

        let h1 = spawn_fetch(&store);
        started(&store, 1).await;
        let h2 = spawn_fetch(&store);
        started(&store, 2).await;

        first.send(Err(ClientError::Timeout(10))).unwrap();
        assert!(!h1.await.unwrap().applied());
        assert!(store.state().is_loading());
        assert_eq!(store.state().error(), None);

        second.send(Ok(items(&["Second"]))).unwrap();
        assert_eq!(h2.await.unwrap(), FetchOutcome::Live { count: 1 });

        let state = store.state();
        assert_eq!(state.items()[0].name, "Second");
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_last_response_wins() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source.clone(), OverlapPolicy::LastResponse);
        let (first, second) = (source.script(), source.script());

        let h1 = spawn_fetch(&store);
        started(&store, 1).await;
        let h2 = spawn_fetch(&store);
        started(&store, 2).await;

        first.send(Ok(items(&["First"]))).unwrap();
        assert_eq!(h1.await.unwrap(), FetchOutcome::Live { count: 1 });
        assert_eq!(store.state().items()[0].name, "First");

        second.send(Ok(items(&["Second", "Also second"]))).unwrap();
        assert_eq!(h2.await.unwrap(), FetchOutcome::Live { count: 2 });

        let state = store.state();
        assert_eq!(state.items()[0].name, "Second");
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_details_do_not_touch_list_state() {
        let source = Arc::new(ScriptedSource::default());
        let store = CatalogStore::new(source, OverlapPolicy::default());
        let rx = store.subscribe();

        let item = store.fetch_game_details(3328).await.unwrap();
        assert_eq!(item.id, 3328);
        assert!(!rx.has_changed().unwrap());
        assert_eq!(store.state(), CatalogState::default());
    }
}
