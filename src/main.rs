//! Pokedex - An interactive PokeAPI client
//!
//! Reads commands from stdin, fetches data from the PokeAPI and caches
//! responses for a few seconds.

use std::io;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::repl::spawn_line_reader;
use pokedex::{Config, PokeApiClient, Repl, TtlCache};

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the response cache, which starts its reaper task
/// 4. Run the REPL on stdin/stdout until `exit`, EOF or Ctrl+C
/// 5. Stop the reaper task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so log lines do not interleave with the REPL;
    // can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}ms, api_base_url={}, http_timeout={}s",
        config.cache_ttl_ms, config.api_base_url, config.http_timeout_secs
    );

    let cache = TtlCache::new(config.cache_ttl());
    let client = PokeApiClient::new(&config.api_base_url, cache.clone(), config.http_timeout())
        .context("failed to build HTTP client")?;
    let mut repl = Repl::new(client, StdRng::from_entropy());

    // Stdin is read on a plain thread: a blocked read there cannot hold up
    // runtime shutdown after Ctrl+C
    let lines = spawn_line_reader(io::BufReader::new(io::stdin()))
        .context("failed to start stdin reader")?;
    let mut stdout = io::stdout();

    tokio::select! {
        result = repl.run_lines(lines, &mut stdout) => {
            result.context("terminal I/O failed")?;
        }
        _ = signal::ctrl_c() => {
            println!();
            info!("Received Ctrl+C, shutting down");
        }
    }

    cache.shutdown().await;
    info!("Pokedex shutdown complete");
    Ok(())
}
