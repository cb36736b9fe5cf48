//! API Module
//!
//! HTTP client for the remote PokeAPI, consulting the response cache before
//! every request.
//!
//! # Resources
//! - `GET /location-area/` - paginated list of location areas
//! - `GET /location-area/{name}` - Pokemon encountered in one area
//! - `GET /pokemon/{name}` - a single Pokemon

pub mod client;

pub use client::PokeApiClient;
