//! REPL loop and command execution

use std::io::Write;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::Result;
use crate::repl::{clean_input, render, Command, Session};

pub const PROMPT: &str = "Pokedex > ";

/// Result of executing one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (if any) and read the next line
    Continue(String),
    /// Print the text and stop
    Exit(String),
}

/// Chance of catching a Pokemon with the given base experience.
///
/// Falls linearly from 1.0 at zero experience to 0.2 at 400 and above.
/// Unknown experience counts as zero.
pub fn catch_probability(base_experience: Option<u32>) -> f64 {
    let experience = base_experience.unwrap_or(0).min(400) as f64;
    (1.0 - experience / 500.0).clamp(0.2, 1.0)
}

/// Interactive command loop.
///
/// `R` supplies the catch rolls.
pub struct Repl<R> {
    client: PokeApiClient,
    session: Session,
    rng: R,
}

impl<R: Rng> Repl<R> {
    pub fn new(client: PokeApiClient, rng: R) -> Self {
        let session = Session::new(client.first_location_page_url());
        Self {
            client,
            session,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // == Run ==
    /// Reads commands from `input` until EOF or `exit`, writing prompts and
    /// results to `out`.
    ///
    /// Lines are decoded lossily, so bytes that are not UTF-8 become an
    /// unknown command rather than a read error. Command failures are printed
    /// and the loop carries on; only terminal I/O errors end it early.
    pub async fn run<I, W>(&mut self, mut input: I, out: &mut W) -> Result<()>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut buf = Vec::new();

        loop {
            prompt(out)?;

            buf.clear();
            if input.read_until(b'\n', &mut buf).await? == 0 {
                writeln!(out)?;
                break;
            }
            if self.respond(&buf, out).await? {
                break;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Same loop as [`Repl::run`], fed by raw lines from a channel. Ends when
    /// every sender is gone or on `exit`.
    ///
    /// Dropping this future never leaves a read in flight, which is what lets
    /// the binary stop on Ctrl+C while stdin is blocked on another thread.
    pub async fn run_lines<W: Write>(
        &mut self,
        mut lines: mpsc::Receiver<Vec<u8>>,
        out: &mut W,
    ) -> Result<()> {
        loop {
            prompt(out)?;

            let Some(raw) = lines.recv().await else {
                writeln!(out)?;
                break;
            };
            if self.respond(&raw, out).await? {
                break;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Executes one raw line and prints its result. Returns true on `exit`.
    async fn respond<W: Write>(&mut self, raw: &[u8], out: &mut W) -> Result<bool> {
        let line = String::from_utf8_lossy(raw);
        match self.handle_line(&line).await {
            Outcome::Continue(text) => {
                if !text.is_empty() {
                    writeln!(out, "{text}")?;
                }
                Ok(false)
            }
            Outcome::Exit(text) => {
                writeln!(out, "{text}")?;
                Ok(true)
            }
        }
    }

    /// Parses and executes one line, turning errors into printable text.
    pub async fn handle_line(&mut self, line: &str) -> Outcome {
        let words = clean_input(line);
        let result = match Command::parse(&words) {
            Ok(Some(command)) => self.execute(command).await,
            Ok(None) => Ok(Outcome::Continue(String::new())),
            Err(err) => Err(err),
        };

        result.unwrap_or_else(|err| {
            debug!(error = %err, line, "command failed");
            Outcome::Continue(err.to_string())
        })
    }

    // == Execute ==
    pub async fn execute(&mut self, command: Command) -> Result<Outcome> {
        let text = match command {
            Command::Help => render::render_help(),
            Command::Exit => return Ok(Outcome::Exit("Closing the Pokedex... Goodbye!".to_string())),
            Command::Map => match self.session.next_page().map(str::to_string) {
                Some(url) => self.show_page(&url).await?,
                None => "You're on the last page.".to_string(),
            },
            Command::MapBack => match self.session.previous_page().map(str::to_string) {
                Some(url) => self.show_page(&url).await?,
                None => "You're on the first page.".to_string(),
            },
            Command::Explore(name) => match self.client.location_area(&name).await {
                Ok(area) => render::render_explore(&area),
                Err(err) if err.is_not_found() => format!("Location area '{name}' not found."),
                Err(err) => return Err(err),
            },
            Command::Catch(name) => match self.client.pokemon(&name).await {
                Ok(pokemon) => {
                    let chance = catch_probability(pokemon.base_experience);
                    let caught = self.rng.gen_bool(chance);
                    debug!(query = %name, pokemon = %pokemon.name, chance, caught, "catch attempt");
                    let text = render::render_catch(&pokemon.name, caught);
                    if caught {
                        self.session.record_catch(pokemon);
                    }
                    text
                }
                Err(err) if err.is_not_found() => format!("Pokemon '{name}' not found."),
                Err(err) => return Err(err),
            },
            Command::Inspect(name) => match self.session.caught(&name) {
                Some(pokemon) => render::render_pokemon(pokemon),
                None => "You have not caught that Pokemon.".to_string(),
            },
            Command::Pokedex => render::render_pokedex(self.session.pokedex()),
            Command::Cache => {
                let cache = self.client.cache();
                render::render_cache_stats(&cache.stats(), cache.ttl())
            }
        };
        Ok(Outcome::Continue(text))
    }

    async fn show_page(&mut self, url: &str) -> Result<String> {
        let page = self.client.location_page(url).await?;
        self.session.show_page(&page);
        Ok(render::render_locations(&page))
    }
}

fn prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rand::rngs::mock::StepRng;
    use std::io::Cursor;
    use tokio::io::BufReader;

    use crate::cache::TtlCache;
    use crate::repl::spawn_line_reader;

    // Nothing listens on the discard port; these tests never reach the network
    fn offline_repl(rng: StepRng) -> (Repl<StepRng>, TtlCache) {
        let cache = TtlCache::new(Duration::from_secs(60));
        let client =
            PokeApiClient::new("http://127.0.0.1:9", cache.clone(), Duration::from_secs(1)).unwrap();
        (Repl::new(client, rng), cache)
    }

    fn always_succeed() -> StepRng {
        StepRng::new(0, 0)
    }

    fn always_fail() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn seed_pokemon(cache: &TtlCache, name: &str, base_experience: u32) {
        cache.put(
            format!("http://127.0.0.1:9/pokemon/{name}"),
            format!(
                r#"{{"name":"{name}","height":3,"weight":18,"base_experience":{base_experience},
                    "stats":[{{"base_stat":40,"stat":{{"name":"hp","url":""}}}}],
                    "types":[{{"slot":1,"type":{{"name":"normal","url":""}}}}]}}"#
            ),
        );
    }

    #[tokio::test]
    async fn test_catch_by_dex_number_then_inspect() {
        let (mut repl, cache) = offline_repl(always_succeed());
        cache.put(
            "http://127.0.0.1:9/pokemon/16",
            r#"{"id":16,"name":"pidgey","height":3,"weight":18,"base_experience":50}"#,
        );

        // The message names the Pokemon, not the number typed
        assert_eq!(
            repl.handle_line("catch 16").await,
            Outcome::Continue(render::render_catch("pidgey", true))
        );

        for query in ["inspect 16", "inspect pidgey"] {
            let Outcome::Continue(details) = repl.handle_line(query).await else {
                panic!("inspect should not exit");
            };
            assert!(details.starts_with("Name: pidgey\n"), "{query}: {details}");
        }
        cache.shutdown().await;
    }

    #[test]
    fn test_catch_probability() {
        assert_eq!(catch_probability(Some(0)), 1.0);
        assert_eq!(catch_probability(None), 1.0);
        assert!((catch_probability(Some(250)) - 0.5).abs() < f64::EPSILON);
        assert!((catch_probability(Some(400)) - 0.2).abs() < 1e-9);
        assert!((catch_probability(Some(608)) - 0.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_catch_then_inspect() {
        let (mut repl, cache) = offline_repl(always_succeed());
        seed_pokemon(&cache, "pidgey", 50);

        let caught = repl.handle_line("catch pidgey").await;
        assert_eq!(caught, Outcome::Continue(render::render_catch("pidgey", true)));

        let Outcome::Continue(details) = repl.handle_line("inspect PIDGEY").await else {
            panic!("inspect should not exit");
        };
        assert!(details.starts_with("Name: pidgey\nHeight: 3"));

        let Outcome::Continue(pokedex) = repl.handle_line("pokedex").await else {
            panic!("pokedex should not exit");
        };
        assert_eq!(pokedex, "Your Pokedex:\n - pidgey");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_failed_catch_is_not_recorded() {
        let (mut repl, cache) = offline_repl(always_fail());
        seed_pokemon(&cache, "mewtwo", 340);

        let outcome = repl.handle_line("catch mewtwo").await;

        assert_eq!(outcome, Outcome::Continue(render::render_catch("mewtwo", false)));
        assert!(repl.session().caught("mewtwo").is_none());
        assert_eq!(
            repl.handle_line("inspect mewtwo").await,
            Outcome::Continue("You have not caught that Pokemon.".to_string())
        );
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_mapb_on_first_page() {
        let (mut repl, cache) = offline_repl(always_succeed());

        assert_eq!(
            repl.handle_line("mapb").await,
            Outcome::Continue("You're on the first page.".to_string())
        );
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_errors_are_reported_not_fatal() {
        let (mut repl, cache) = offline_repl(always_succeed());

        assert_eq!(
            repl.handle_line("fly").await,
            Outcome::Continue("Unknown command: fly. Type 'help' for usage.".to_string())
        );
        assert_eq!(
            repl.handle_line("explore").await,
            Outcome::Continue("Usage: explore <area>".to_string())
        );

        // Network failure surfaces as text
        let Outcome::Continue(text) = repl.handle_line("map").await else {
            panic!("map should not exit");
        };
        assert!(text.starts_with("Request failed"), "got: {text}");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_until_exit() {
        let (mut repl, cache) = offline_repl(always_succeed());
        let input = tokio_test::io::Builder::new()
            .read(b"\n")
            .read(b"pokedex\n")
            .read(b"exit\n")
            .build();
        let mut out = Vec::new();

        repl.run(BufReader::new(input), &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Pokedex > Pokedex > Your Pokedex is empty.\nPokedex > Closing the Pokedex... Goodbye!\n"
        );
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_survives_invalid_utf8() {
        let (mut repl, cache) = offline_repl(always_succeed());
        let input = BufReader::new(&b"\xff\xfe\npokedex\nexit\n"[..]);
        let mut out = Vec::new();

        repl.run(input, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Unknown command: \u{fffd}\u{fffd}"), "got: {out}");
        assert!(out.contains("Your Pokedex is empty.\n"));
        assert!(out.ends_with("Closing the Pokedex... Goodbye!\n"));
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_lines_from_reader_thread() {
        let (mut repl, cache) = offline_repl(always_succeed());
        let input = Cursor::new(b"\xff\npokedex\r\nexit\nhelp\n".to_vec());
        let lines = spawn_line_reader(input).unwrap();
        let mut out = Vec::new();

        repl.run_lines(lines, &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Unknown command: \u{fffd}"), "got: {out}");
        assert!(out.contains("Your Pokedex is empty.\n"));
        // Stops at exit even though more input was queued
        assert!(out.ends_with("Closing the Pokedex... Goodbye!\n"));
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_lines_stops_when_input_closes() {
        let (mut repl, cache) = offline_repl(always_succeed());
        let (tx, rx) = mpsc::channel(1);
        drop(tx);
        let mut out = Vec::new();

        repl.run_lines(rx, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Pokedex > \n");
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_run_stops_at_eof() {
        let (mut repl, cache) = offline_repl(always_succeed());
        let input = tokio_test::io::Builder::new().read(b"cache\n").build();
        let mut out = Vec::new();

        repl.run(BufReader::new(input), &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Cache TTL: 60000ms"));
        assert!(out.ends_with("Pokedex > \n"));
        cache.shutdown().await;
    }
}
