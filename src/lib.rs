//! Pokedex - An interactive PokeAPI client
//!
//! Explores location areas, catches and inspects Pokemon, and keeps recent
//! API responses in a short-lived in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::TtlCache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Repl;
