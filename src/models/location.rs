//! Location area DTOs
//!
//! Shapes returned by `GET /location-area` and `GET /location-area/{name}`.

use serde::{Deserialize, Serialize};

/// A `{ name, url }` reference to another API resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the location area listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas
    pub count: u32,
    /// Absolute URL of the next page, if any
    pub next: Option<String>,
    /// Absolute URL of the previous page, if any
    pub previous: Option<String>,
    /// Location areas on this page
    pub results: Vec<NamedResource>,
}

/// Details of a single location area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    /// Pokemon that can be encountered here
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

impl LocationArea {
    /// Names of the Pokemon found in this area, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}
