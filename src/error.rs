//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these cover the network, decoding and command-line layers.

use reqwest::StatusCode;
use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the Pokedex client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// Request could not be sent or its body could not be read
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { status: StatusCode, url: String },

    /// Response body was not the expected JSON shape
    #[error("Unexpected response format: {0}")]
    Decode(#[from] serde_json::Error),

    /// First word of the input is not a known command
    #[error("Unknown command: {0}. Type 'help' for usage.")]
    UnknownCommand(String),

    /// Command needs an argument that was not supplied
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// Terminal read or write failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PokedexError {
    /// True when the remote API reported the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokedexError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;
