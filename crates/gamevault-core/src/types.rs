//! # Domain Types
//!
//! Core domain types used throughout GameVault.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────┐   ┌─────────────────┐   │
//! │  │    Session      │   │    CatalogItem      │   │    NamedRef     │   │
//! │  │  ─────────────  │   │  ─────────────────  │   │  ─────────────  │   │
//! │  │  id             │   │  id (u64)           │   │  id (u64)       │   │
//! │  │  username       │   │  name               │   │  name           │   │
//! │  │  email (unique) │   │  image_url?         │   └─────────────────┘   │
//! │  └─────────────────┘   │  rating?            │                         │
//! │                        │  release_date?      │   ┌─────────────────┐   │
//! │                        │  genres[]  ─────────┼──►│  RequestStatus  │   │
//! │                        │  platforms[]        │   │  Idle           │   │
//! │                        │  description?       │   │  Loading        │   │
//! │                        └─────────────────────┘   │  Failed         │   │
//! │                                                  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here crosses into the view layer, so field names serialize in
//! camelCase and TypeScript bindings are exported with `ts-rs`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Session
// =============================================================================

/// The record identifying an authenticated user.
///
/// Persisted verbatim inside the auth snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    /// Backend-assigned identifier ("1" for the demo user, UUID v4 otherwise).
    pub id: String,

    /// Display name.
    pub username: String,

    /// Login identifier, unique across the registry.
    pub email: String,
}

impl Session {
    /// Creates a session record.
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Session {
            id: id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// An `{ id, name }` pair used for genres and platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

impl NamedRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        NamedRef {
            id,
            name: name.into(),
        }
    }
}

/// A game shown by the catalog views.
///
/// The source guarantees unique ids, so collections of these are replaced
/// wholesale and never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogItem {
    /// Source identifier (RAWG game id).
    pub id: u64,

    /// Title.
    pub name: String,

    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Aggregate rating, 0.0 to 5.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// First release date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub release_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<NamedRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<NamedRef>,

    /// Plain-text description; only present on detail fetches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogItem {
    /// Creates an item with only the required fields set.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        CatalogItem {
            id,
            name: name.into(),
            image_url: None,
            rating: None,
            release_date: None,
            genres: Vec::new(),
            platforms: Vec::new(),
            description: None,
        }
    }

    /// Returns true if the item is tagged with the given genre.
    pub fn has_genre(&self, genre_id: u64) -> bool {
        self.genres.iter().any(|g| g.id == genre_id)
    }

    /// Release year, for compact listings.
    pub fn release_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}

// =============================================================================
// Request Status
// =============================================================================

/// Tri-state view of a store's `(is_loading, error)` flag pair.
///
/// ```text
///   is_loading  error      status
///   ──────────  ─────────  ─────────────
///   false       None       Idle
///   true        None       Loading
///   false       Some(msg)  Failed { msg }
///   true        Some(_)    (unreachable: begin clears error)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "camelCase")]
#[ts(export)]
pub enum RequestStatus {
    Idle,
    Loading,
    Failed { message: String },
}

impl RequestStatus {
    /// Collapses the two store flags into a status.
    pub fn from_flags(is_loading: bool, error: Option<&str>) -> Self {
        match (is_loading, error) {
            (true, _) => RequestStatus::Loading,
            (false, Some(message)) => RequestStatus::Failed {
                message: message.to_string(),
            },
            (false, None) => RequestStatus::Idle,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_item_serializes_camel_case() {
        let mut item = CatalogItem::new(3498, "Grand Theft Auto V");
        item.image_url = Some("https://example.com/gta.jpg".to_string());
        item.release_date = NaiveDate::from_ymd_opt(2013, 9, 17);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["imageUrl"], "https://example.com/gta.jpg");
        assert_eq!(json["releaseDate"], "2013-09-17");
        // Empty collections and missing optionals are omitted
        assert!(json.get("genres").is_none());
        assert!(json.get("rating").is_none());
    }

    #[test]
    fn test_catalog_item_deserializes_with_missing_optionals() {
        let item: CatalogItem = serde_json::from_str(r#"{"id": 7, "name": "Tetris"}"#).unwrap();
        assert_eq!(item, CatalogItem::new(7, "Tetris"));
        assert_eq!(item.release_year(), None);
    }

    #[test]
    fn test_has_genre() {
        let mut item = CatalogItem::new(1, "Portal 2");
        item.genres = vec![NamedRef::new(7, "Puzzle"), NamedRef::new(3, "Adventure")];

        assert!(item.has_genre(7));
        assert!(!item.has_genre(4));
    }

    #[test]
    fn test_request_status_from_flags() {
        assert_eq!(RequestStatus::from_flags(false, None), RequestStatus::Idle);
        assert_eq!(RequestStatus::from_flags(true, None), RequestStatus::Loading);
        assert_eq!(
            RequestStatus::from_flags(false, Some("boom")),
            RequestStatus::Failed {
                message: "boom".to_string()
            }
        );
    }
}
