//! # Catalog Commands
//!
//! The home page (list, search, genre filter) and the detail page.
//!
//! ## Home Page Flow
//! ```text
//! list_games(query, genre)
//!      │
//!      ▼
//! CatalogStore::fetch_games() ──► live items | seed list + notice
//!      │
//!      ▼
//! filter_items(items, CatalogFilter { query, genre })   (derived, no state)
//!      │
//!      ▼
//! GamesResponse { games, total, genres, notice }
//! ```

use gamevault_core::catalog::{available_genres, filter_items};
use gamevault_core::{CatalogFilter, CatalogItem, NamedRef};
use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;
use crate::state::{CatalogStore, FetchOutcome};

/// The home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesResponse {
    /// Items passing the filter, in source order.
    pub games: Vec<CatalogItem>,

    /// Size of the unfiltered collection.
    pub total: usize,

    /// Genres available for the genre picker.
    pub genres: Vec<NamedRef>,

    /// Advisory error shown above fallback data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,

    pub outcome: FetchOutcome,
}

impl std::fmt::Display for GamesResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "! {} (showing offline picks)", notice)?;
        }

        for game in &self.games {
            write!(f, "{:>7}  {}", game.id, game.name)?;
            if let Some(year) = game.release_year() {
                write!(f, " ({})", year)?;
            }
            if let Some(rating) = game.rating {
                write!(f, "  ★ {:.1}", rating)?;
            }
            writeln!(f)?;
        }

        write!(f, "{} of {} games", self.games.len(), self.total)
    }
}

/// Detail page for one game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GameDetails(pub CatalogItem);

impl std::fmt::Display for GameDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let game = &self.0;
        writeln!(f, "{}", game.name)?;

        if let Some(date) = game.release_date {
            writeln!(f, "Released: {}", date)?;
        }
        if let Some(rating) = game.rating {
            writeln!(f, "Rating:   {:.2} / 5", rating)?;
        }
        if !game.genres.is_empty() {
            writeln!(f, "Genres:   {}", join_names(&game.genres))?;
        }
        if !game.platforms.is_empty() {
            writeln!(f, "Platforms: {}", join_names(&game.platforms))?;
        }
        if let Some(description) = &game.description {
            writeln!(f)?;
            write!(f, "{}", description)?;
        }
        Ok(())
    }
}

fn join_names(refs: &[NamedRef]) -> String {
    refs.iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fetches the catalog and applies the home page filters.
pub async fn list_games(
    catalog: &CatalogStore,
    query: Option<&str>,
    genre: Option<u64>,
) -> GamesResponse {
    debug!(?query, ?genre, "list_games command");
    let outcome = catalog.fetch_games().await;
    debug!(applied = outcome.applied(), "Catalog fetch finished");

    let state = catalog.state();
    let filter = CatalogFilter::new(query.unwrap_or_default()).with_genre(genre);

    GamesResponse {
        games: filter_items(state.items(), &filter)
            .into_iter()
            .cloned()
            .collect(),
        total: state.items().len(),
        genres: available_genres(state.items()),
        notice: state.error().map(str::to_string),
        outcome,
    }
}

/// Fetches one game for the detail page.
pub async fn game_details(catalog: &CatalogStore, id: u64) -> AppResult<GameDetails> {
    debug!(id, "game_details command");
    Ok(GameDetails(catalog.fetch_game_details(id).await?))
}
