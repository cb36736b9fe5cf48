//! Per-process REPL state: map pagination and caught Pokemon

use std::collections::BTreeMap;

use crate::models::{LocationPage, Pokemon};

#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Page `map` will fetch next; `None` past the last page
    next: Option<String>,
    /// Page `mapb` will fetch; `None` on the first page
    previous: Option<String>,
    caught: BTreeMap<String, Pokemon>,
}

impl Session {
    /// Starts a session whose first `map` fetches `first_page_url`.
    pub fn new(first_page_url: impl Into<String>) -> Self {
        Self {
            next: Some(first_page_url.into()),
            previous: None,
            caught: BTreeMap::new(),
        }
    }

    pub fn next_page(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn previous_page(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Moves the pagination cursor to the page just displayed.
    pub fn show_page(&mut self, page: &LocationPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
    }

    /// Adds a Pokemon to the collection, replacing an earlier catch of the
    /// same name.
    pub fn record_catch(&mut self, pokemon: Pokemon) {
        self.caught.insert(pokemon.name.clone(), pokemon);
    }

    /// Looks up a caught Pokemon by name or by dex number, matching however
    /// it was named in the `catch` that recorded it.
    pub fn caught(&self, query: &str) -> Option<&Pokemon> {
        self.caught.get(query).or_else(|| {
            let id: u32 = query.parse().ok()?;
            self.caught.values().find(|pokemon| pokemon.id == Some(id))
        })
    }

    /// Caught Pokemon in name order.
    pub fn pokedex(&self) -> impl Iterator<Item = &Pokemon> {
        self.caught.values()
    }
}
