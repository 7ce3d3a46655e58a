//! # Catalog State
//!
//! Pure state and transitions behind the CatalogStore, the generation tokens
//! that resolve overlapping fetches, and the derived filtering the views run
//! over the in-memory collection.
//!
//! ## Fetch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Fetch                                    │
//! │                                                                         │
//! │  begin_fetch() ──► Generation(n)   loading=true, error=None            │
//! │        │                                                                │
//! │        ▼ (await source)                                                 │
//! │  ┌─────────────┐                                                        │
//! │  │  response   │──── ok ─────► settle_live(n, items)                   │
//! │  │             │               items replaced, error=None              │
//! │  │             │──── err ────► settle_fallback(n, reason)              │
//! │  └─────────────┘               items = seed list, error=Some(reason)   │
//! │                                                                         │
//! │  Either settle is ignored when `n` is stale under LatestRequest.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Overlapping Fetches
//! ```text
//!   call A: begin(1) ───────────────────────── resolve(1)
//!   call B:      begin(2) ─────── resolve(2)
//!
//!   LatestRequest: resolve(2) applies, resolve(1) is discarded
//!   LastResponse:  resolve(2) applies, then resolve(1) overwrites it
//! ```
//! When B resolves after A, both policies end with B's result.

use serde::{Deserialize, Serialize};

use crate::fallback;
use crate::types::{CatalogItem, NamedRef, RequestStatus};

// =============================================================================
// Generation
// =============================================================================

/// Monotonically increasing token identifying one fetch invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Overlap Policy
// =============================================================================

/// How overlapping fetches settle the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Only the most recently issued fetch may settle the store.
    #[default]
    LatestRequest,

    /// Every response settles the store; the last one to arrive wins.
    LastResponse,
}

impl std::fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverlapPolicy::LatestRequest => write!(f, "latest_request"),
            OverlapPolicy::LastResponse => write!(f, "last_response"),
        }
    }
}

impl std::str::FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest_request" | "latest" | "generation" => Ok(OverlapPolicy::LatestRequest),
            "last_response" | "last_writer_wins" | "lww" => Ok(OverlapPolicy::LastResponse),
            other => Err(format!(
                "Unknown overlap policy: '{}'. Valid options: latest_request, last_response",
                other
            )),
        }
    }
}

// =============================================================================
// Catalog State
// =============================================================================

/// Everything the CatalogStore owns.
///
/// ## Invariants
/// - `is_loading` and `error.is_some()` are never both true
/// - `items` is only ever replaced wholesale
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogState {
    items: Vec<CatalogItem>,
    is_loading: bool,
    error: Option<String>,
    #[serde(skip)]
    latest: Generation,
}

impl CatalogState {
    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Advisory error. Set alongside fallback data when the source failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> RequestStatus {
        RequestStatus::from_flags(self.is_loading, self.error())
    }

    /// Token of the most recently issued fetch.
    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Starts a fetch and hands out its generation token.
    pub fn begin_fetch(&mut self) -> Generation {
        self.latest = self.latest.next();
        self.is_loading = true;
        self.error = None;
        self.latest
    }

    /// Returns true if a response for `generation` may settle the store.
    pub fn accepts(&self, generation: Generation, policy: OverlapPolicy) -> bool {
        match policy {
            OverlapPolicy::LatestRequest => generation == self.latest,
            OverlapPolicy::LastResponse => true,
        }
    }

    /// Settles a fetch with live data. Returns false if the response was stale.
    pub fn settle_live(
        &mut self,
        generation: Generation,
        items: Vec<CatalogItem>,
        policy: OverlapPolicy,
    ) -> bool {
        if !self.accepts(generation, policy) {
            return false;
        }
        self.items = items;
        self.error = None;
        self.is_loading = false;
        true
    }

    /// Settles a failed fetch with the embedded seed list and an advisory
    /// error. Returns false if the response was stale.
    pub fn settle_fallback(
        &mut self,
        generation: Generation,
        reason: impl Into<String>,
        policy: OverlapPolicy,
    ) -> bool {
        if !self.accepts(generation, policy) {
            return false;
        }
        self.items = fallback::seed_catalog();
        self.error = Some(reason.into());
        self.is_loading = false;
        true
    }
}

// =============================================================================
// Derived Filtering
// =============================================================================

/// Search and genre selection applied by the views over the full collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the item name. Empty matches everything.
    pub query: String,

    /// Only items tagged with this genre.
    pub genre: Option<u64>,
}

impl CatalogFilter {
    pub fn new(query: impl Into<String>) -> Self {
        CatalogFilter {
            query: query.into(),
            genre: None,
        }
    }

    pub fn with_genre(mut self, genre: Option<u64>) -> Self {
        self.genre = genre;
        self
    }

    /// Returns true if the item passes both criteria.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let query = self.query.trim().to_lowercase();
        let name_ok = query.is_empty() || item.name.to_lowercase().contains(&query);
        let genre_ok = self.genre.map_or(true, |g| item.has_genre(g));
        name_ok && genre_ok
    }
}

/// Applies a filter, preserving source order.
pub fn filter_items<'a>(items: &'a [CatalogItem], filter: &CatalogFilter) -> Vec<&'a CatalogItem> {
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Distinct genres present in a collection, in first-seen order.
pub fn available_genres(items: &[CatalogItem]) -> Vec<NamedRef> {
    let mut genres: Vec<NamedRef> = Vec::new();
    for genre in items.iter().flat_map(|i| i.genres.iter()) {
        if !genres.iter().any(|g| g.id == genre.id) {
            genres.push(genre.clone());
        }
    }
    genres
}

// =============================================================================
// Unit Tests
// =============================================================================
