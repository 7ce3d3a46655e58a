//! # Wire Format
//!
//! DTOs for the RAWG-shaped catalog API and their conversion into
//! [`CatalogItem`]. Unknown fields are ignored; every optional field may be
//! missing or `null`.
//!
//! ## Mapping
//! ```text
//!  RAWG field                          CatalogItem field
//!  ─────────────────────────────────   ─────────────────
//!  id                                  id
//!  name                                name
//!  background_image                    image_url
//!  rating                              rating
//!  released ("YYYY-MM-DD")             release_date
//!  genres[{id,name}]                   genres
//!  platforms[{platform:{id,name}}]     platforms (flattened)
//!  description_raw | description       description
//! ```

use chrono::NaiveDate;
use gamevault_core::{CatalogItem, NamedRef};
use serde::Deserialize;

/// `GET /games` response body.
#[derive(Debug, Deserialize)]
pub struct GameListResponse {
    #[serde(default)]
    pub results: Vec<GameDto>,
}

impl GameListResponse {
    pub fn into_items(self) -> Vec<CatalogItem> {
        self.results.into_iter().map(CatalogItem::from).collect()
    }
}

/// One game, as listed or as returned by `GET /games/{id}`.
#[derive(Debug, Deserialize)]
pub struct GameDto {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub background_image: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub released: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<NamedRefDto>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub platforms: Vec<PlatformEntryDto>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub description_raw: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NamedRefDto {
    pub id: u64,
    pub name: String,
}

/// RAWG nests each platform one level deeper than genres.
#[derive(Debug, Deserialize)]
pub struct PlatformEntryDto {
    pub platform: NamedRefDto,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<NamedRefDto> for NamedRef {
    fn from(dto: NamedRefDto) -> Self {
        NamedRef::new(dto.id, dto.name)
    }
}

impl From<GameDto> for CatalogItem {
    fn from(dto: GameDto) -> Self {
        let description = dto
            .description_raw
            .or(dto.description)
            .filter(|d| !d.trim().is_empty());

        CatalogItem {
            id: dto.id,
            name: dto.name,
            image_url: dto.background_image.filter(|u| !u.is_empty()),
            rating: dto.rating,
            // RAWG sends partial or empty dates for unreleased titles
            release_date: dto
                .released
                .as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            genres: dto.genres.into_iter().map(NamedRef::from).collect(),
            platforms: dto
                .platforms
                .into_iter()
                .map(|p| NamedRef::from(p.platform))
                .collect(),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST_BODY: &str = r#"{
        "count": 2,
        "next": "https://api.rawg.io/api/games?page=2",
        "results": [
            {
                "id": 3498,
                "slug": "grand-theft-auto-v",
                "name": "Grand Theft Auto V",
                "released": "2013-09-17",
                "background_image": "https://media.rawg.io/gta5.jpg",
                "rating": 4.47,
                "genres": [{"id": 4, "name": "Action", "slug": "action"}],
                "platforms": [
                    {"platform": {"id": 4, "name": "PC"}, "released_at": "2013-09-17"},
                    {"platform": {"id": 187, "name": "PlayStation 5"}}
                ]
            },
            {
                "id": 999999,
                "name": "Untitled Project",
                "released": null,
                "background_image": null,
                "rating": 0,
                "genres": null,
                "platforms": null
            }
        ]
    }"#;

    #[test]
    fn test_list_maps_rawg_fields() {
        let response: GameListResponse = serde_json::from_str(LIST_BODY).unwrap();
        let items = response.into_items();

        assert_eq!(items.len(), 2);
        let gta = &items[0];
        assert_eq!(gta.id, 3498);
        assert_eq!(gta.image_url.as_deref(), Some("https://media.rawg.io/gta5.jpg"));
        assert_eq!(gta.release_date, NaiveDate::from_ymd_opt(2013, 9, 17));
        assert_eq!(gta.genres, vec![NamedRef::new(4, "Action")]);
        assert_eq!(
            gta.platforms,
            vec![NamedRef::new(4, "PC"), NamedRef::new(187, "PlayStation 5")]
        );
        assert!(gta.description.is_none());
    }

    #[test]
    fn test_nulls_become_absent() {
        let response: GameListResponse = serde_json::from_str(LIST_BODY).unwrap();
        let items = response.into_items();
        let untitled = &items[1];

        assert!(untitled.image_url.is_none());
        assert!(untitled.release_date.is_none());
        assert!(untitled.genres.is_empty());
        assert!(untitled.platforms.is_empty());
    }

    #[test]
    fn test_detail_prefers_plain_description() {
        let body = r#"{
            "id": 3328,
            "name": "The Witcher 3: Wild Hunt",
            "description": "<p>Geralt</p>",
            "description_raw": "Geralt"
        }"#;
        let item: CatalogItem = serde_json::from_str::<GameDto>(body).unwrap().into();
        assert_eq!(item.description.as_deref(), Some("Geralt"));
    }

    #[test]
    fn test_unparseable_release_date_is_dropped() {
        let body = r#"{"id": 1, "name": "Soon", "released": "TBA"}"#;
        let item: CatalogItem = serde_json::from_str::<GameDto>(body).unwrap().into();
        assert!(item.release_date.is_none());
    }

    #[test]
    fn test_missing_results_is_empty() {
        let response: GameListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_items().is_empty());
    }
}
