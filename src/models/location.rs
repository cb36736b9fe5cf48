//! Location area models
//!
//! `GET /location-area/` returns a paginated [`LocationPage`];
//! `GET /location-area/{name}` returns a single [`LocationArea`].

use serde::Deserialize;

use super::NamedResource;

/// One page of location areas
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationPage {
    pub count: u32,
    /// URL of the following page, absent on the last page
    pub next: Option<String>,
    /// URL of the preceding page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A location area and the Pokemon that can be encountered there
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationArea {
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}

impl LocationArea {
    /// Names of the encounterable Pokemon, in API order.
    pub fn pokemon_names(&self) -> impl Iterator<Item = &str> {
        self.pokemon_encounters
            .iter()
            .map(|encounter| encounter.pokemon.name.as_str())
    }
}
