//! Terminal output formatting
//!
//! Pure functions from data to the text the REPL prints.

use std::fmt::Write;
use std::time::Duration;

use crate::cache::CacheStats;
use crate::models::{LocationArea, LocationPage, Pokemon};
use crate::repl::command::COMMANDS;

pub fn render_help() -> String {
    let mut out = String::from("Welcome to the Pokedex!\nUsage:\n\n");
    for (usage, description) in COMMANDS {
        let _ = writeln!(out, "{usage}: {description}");
    }
    out
}

pub fn render_locations(page: &LocationPage) -> String {
    page.results
        .iter()
        .map(|area| area.name.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_explore(area: &LocationArea) -> String {
    let mut out = format!("Exploring {}...\n", area.name);
    if area.pokemon_encounters.is_empty() {
        out.push_str("No Pokemon found.");
        return out;
    }

    out.push_str("Found Pokemon:");
    for name in area.pokemon_names() {
        let _ = write!(out, "\n - {name}");
    }
    out
}

pub fn render_catch(name: &str, caught: bool) -> String {
    let result = if caught {
        format!("{name} was caught!\nYou may now inspect it with the inspect command.")
    } else {
        format!("{name} escaped!")
    };
    format!("Throwing a Pokeball at {name}...\n{result}")
}

pub fn render_pokemon(pokemon: &Pokemon) -> String {
    let mut out = format!(
        "Name: {}\nHeight: {}\nWeight: {}\nStats:",
        pokemon.name, pokemon.height, pokemon.weight
    );
    for stat in &pokemon.stats {
        let _ = write!(out, "\n  -{}: {}", stat.stat.name, stat.base_stat);
    }
    out.push_str("\nTypes:");
    for kind in &pokemon.types {
        let _ = write!(out, "\n  - {}", kind.kind.name);
    }
    out
}

pub fn render_pokedex<'a>(caught: impl Iterator<Item = &'a Pokemon>) -> String {
    let names: Vec<_> = caught.map(|p| format!(" - {}", p.name)).collect();
    if names.is_empty() {
        return "Your Pokedex is empty.".to_string();
    }
    format!("Your Pokedex:\n{}", names.join("\n"))
}

pub fn render_cache_stats(stats: &CacheStats, ttl: Duration) -> String {
    let hit_rate = match stats.hit_rate() {
        Some(rate) => format!("{:.1}%", rate * 100.0),
        None => "n/a".to_string(),
    };
    format!(
        "Cache TTL: {}ms\nEntries: {}\nHits: {}\nMisses: {}\nHit rate: {}\n\
         Expired: {} ({} on lookup, {} swept over {} sweeps)",
        ttl.as_millis(),
        stats.total_entries,
        stats.hits,
        stats.misses,
        hit_rate,
        stats.expired(),
        stats.dropped_on_read,
        stats.swept,
        stats.sweeps,
    )
}
