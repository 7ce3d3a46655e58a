//! # Fallback Catalog
//!
//! Fixed seed collection the CatalogStore substitutes when the external
//! source cannot be reached or answers with a non-success status, so the
//! views always have something to render.
//!
//! Ids match the source's ids for the same titles, so a detail fetch for a
//! fallback item still resolves once the source is back.

use chrono::NaiveDate;

use crate::types::{CatalogItem, NamedRef};

// Genre and platform ids as the source numbers them.
const ACTION: (u64, &str) = (4, "Action");
const ADVENTURE: (u64, &str) = (3, "Adventure");
const RPG: (u64, &str) = (5, "RPG");
const SHOOTER: (u64, &str) = (2, "Shooter");
const PUZZLE: (u64, &str) = (7, "Puzzle");
const PLATFORMER: (u64, &str) = (83, "Platformer");
const INDIE: (u64, &str) = (51, "Indie");

const PC: (u64, &str) = (4, "PC");
const PLAYSTATION_4: (u64, &str) = (18, "PlayStation 4");
const XBOX_ONE: (u64, &str) = (1, "Xbox One");
const NINTENDO_SWITCH: (u64, &str) = (7, "Nintendo Switch");
const PLAYSTATION_3: (u64, &str) = (16, "PlayStation 3");
const XBOX_360: (u64, &str) = (14, "Xbox 360");

struct Seed {
    id: u64,
    name: &'static str,
    rating: f64,
    released: (i32, u32, u32),
    genres: &'static [(u64, &'static str)],
    platforms: &'static [(u64, &'static str)],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 3498,
        name: "Grand Theft Auto V",
        rating: 4.47,
        released: (2013, 9, 17),
        genres: &[ACTION],
        platforms: &[PC, PLAYSTATION_4, XBOX_ONE, PLAYSTATION_3, XBOX_360],
    },
    Seed {
        id: 3328,
        name: "The Witcher 3: Wild Hunt",
        rating: 4.65,
        released: (2015, 5, 18),
        genres: &[ACTION, ADVENTURE, RPG],
        platforms: &[PC, PLAYSTATION_4, XBOX_ONE, NINTENDO_SWITCH],
    },
    Seed {
        id: 4200,
        name: "Portal 2",
        rating: 4.61,
        released: (2011, 4, 18),
        genres: &[SHOOTER, PUZZLE],
        platforms: &[PC, PLAYSTATION_3, XBOX_360],
    },
    Seed {
        id: 4291,
        name: "Counter-Strike: Global Offensive",
        rating: 3.57,
        released: (2012, 8, 21),
        genres: &[ACTION, SHOOTER],
        platforms: &[PC, PLAYSTATION_3, XBOX_360],
    },
    Seed {
        id: 5286,
        name: "Tomb Raider (2013)",
        rating: 4.05,
        released: (2013, 3, 5),
        genres: &[ACTION, ADVENTURE],
        platforms: &[PC, PLAYSTATION_4, XBOX_ONE, PLAYSTATION_3, XBOX_360],
    },
    Seed {
        id: 3439,
        name: "Life is Strange",
        rating: 4.11,
        released: (2015, 1, 29),
        genres: &[ADVENTURE],
        platforms: &[PC, PLAYSTATION_4, XBOX_ONE, PLAYSTATION_3, XBOX_360],
    },
    Seed {
        id: 22511,
        name: "The Legend of Zelda: Breath of the Wild",
        rating: 4.5,
        released: (2017, 3, 3),
        genres: &[ACTION, ADVENTURE, RPG],
        platforms: &[NINTENDO_SWITCH],
    },
    Seed {
        id: 9767,
        name: "Hollow Knight",
        rating: 4.37,
        released: (2017, 2, 24),
        genres: &[ACTION, PLATFORMER, INDIE],
        platforms: &[PC, PLAYSTATION_4, XBOX_ONE, NINTENDO_SWITCH],
    },
];

fn refs(pairs: &[(u64, &str)]) -> Vec<NamedRef> {
    pairs.iter().map(|(id, name)| NamedRef::new(*id, *name)).collect()
}

/// Builds the fallback collection.
pub fn seed_catalog() -> Vec<CatalogItem> {
    SEEDS
        .iter()
        .map(|seed| {
            let (y, m, d) = seed.released;
            CatalogItem {
                rating: Some(seed.rating),
                release_date: NaiveDate::from_ymd_opt(y, m, d),
                genres: refs(seed.genres),
                platforms: refs(seed.platforms),
                ..CatalogItem::new(seed.id, seed.name)
            }
        })
        .collect()
}
