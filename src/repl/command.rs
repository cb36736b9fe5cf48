//! Command parsing
//!
//! Maps cleaned input words onto a [`Command`].

use crate::error::{PokedexError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
    Cache,
}

/// Name and description of every command, in the order `help` lists them.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Display the next 20 location areas"),
    ("mapb", "Display the previous 20 location areas"),
    ("explore <area>", "List the Pokemon found in a location area"),
    ("catch <pokemon>", "Throw a Pokeball at a Pokemon"),
    ("inspect <pokemon>", "Show details of a caught Pokemon"),
    ("pokedex", "List every Pokemon you have caught"),
    ("cache", "Show response cache statistics"),
];

impl Command {
    /// Parses cleaned input words. Blank input yields `Ok(None)`.
    ///
    /// Words after those a command needs are ignored.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(required(args, "explore", "area")?),
            "catch" => Command::Catch(required(args, "catch", "pokemon")?),
            "inspect" => Command::Inspect(required(args, "inspect", "pokemon")?),
            "pokedex" => Command::Pokedex,
            "cache" => Command::Cache,
            other => return Err(PokedexError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required(args: &[String], command: &'static str, argument: &'static str) -> Result<String> {
    args.first()
        .cloned()
        .ok_or(PokedexError::MissingArgument { command, argument })
}
