//! Command Handlers
//!
//! One handler per REPL command. Handlers return the text to print and leave
//! all I/O to the caller.

use std::fmt::Write as _;

use anyhow::{bail, Context};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::COMMANDS;
use crate::pokeapi::PokeApiClient;

/// Base experience below which a roll of `0..=base_experience` counts as a catch.
pub const CATCH_THRESHOLD: u32 = 50;

/// Mutable REPL state shared by the handlers.
pub struct Session {
    client: PokeApiClient,
    next_page: Option<String>,
    previous_page: Option<String>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied generator for catch rolls.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            next_page: None,
            previous_page: None,
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn into_client(self) -> PokeApiClient {
        self.client
    }
}

pub fn help() -> String {
    let mut out = String::from("Welcome to the Pokedex!\nUsage:\n\n");
    for command in COMMANDS {
        let _ = writeln!(out, "{}: {}", command.usage, command.description);
    }
    out
}

/// Shows the next page of location areas.
pub async fn map(session: &mut Session) -> anyhow::Result<String> {
    let page = session
        .client
        .location_areas(session.next_page.as_deref())
        .await?;

    session.next_page = page.next.clone();
    session.previous_page = page.previous.clone();

    Ok(list_names(page.results.iter().map(|area| area.name.as_str())))
}

/// Shows the previous page of location areas.
pub async fn map_back(session: &mut Session) -> anyhow::Result<String> {
    let Some(previous) = session.previous_page.clone() else {
        bail!("you're on the first page");
    };

    let page = session.client.location_areas(Some(&previous)).await?;

    session.next_page = page.next.clone();
    session.previous_page = page.previous.clone();

    Ok(list_names(page.results.iter().map(|area| area.name.as_str())))
}

pub async fn explore(session: &mut Session, area: Option<&str>) -> anyhow::Result<String> {
    let area = area.context("you must provide a location area name")?;
    let details = session.client.location_area(area).await?;

    let mut out = format!("Exploring {}...\nFound Pokemon:\n", details.name);
    for name in details.pokemon_names() {
        let _ = writeln!(out, " - {}", name);
    }
    Ok(out)
}

pub async fn catch(session: &mut Session, name: Option<&str>) -> anyhow::Result<String> {
    let name = name.context("you must provide a pokemon name")?;
    let pokemon = session.client.pokemon(name).await?;

    let mut out = format!("Throwing a Pokeball at {}...\n", pokemon.name);
    let base_experience = pokemon.base_experience.unwrap_or(0);
    let roll = session.rng.gen_range(0..=base_experience);

    if roll < CATCH_THRESHOLD {
        let _ = writeln!(out, "{} was caught!", pokemon.name);
        out.push_str("You may now inspect it with the inspect command.\n");
        session.client.pokedex().add(pokemon).await;
    } else {
        let _ = writeln!(out, "{} escaped!", pokemon.name);
    }
    Ok(out)
}

pub async fn inspect(session: &mut Session, name: Option<&str>) -> anyhow::Result<String> {
    let name = name.context("you must provide a pokemon name")?;
    let Some(caught) = session.client.pokedex().get(name).await else {
        bail!("you have not caught {}", name);
    };
    let pokemon = caught.pokemon;

    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", pokemon.name);
    let _ = writeln!(out, "Height: {}", pokemon.height);
    let _ = writeln!(out, "Weight: {}", pokemon.weight);
    out.push_str("Stats:\n");
    for stat in &pokemon.stats {
        let _ = writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat);
    }
    out.push_str("Types:\n");
    for kind in &pokemon.types {
        let _ = writeln!(out, "  - {}", kind.kind.name);
    }
    let _ = writeln!(out, "Caught at: {}", caught.caught_at.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(out)
}

pub async fn pokedex(session: &mut Session) -> anyhow::Result<String> {
    let names = session.client.pokedex().names().await;
    if names.is_empty() {
        return Ok("Your Pokedex is empty.\n".to_string());
    }

    let mut out = String::from("Your Pokedex:\n");
    for name in names {
        let _ = writeln!(out, " - {}", name);
    }
    Ok(out)
}

pub async fn stats(session: &mut Session) -> anyhow::Result<String> {
    let cache = session.client.cache();
    let stats = cache.stats().await;

    let mut out = String::new();
    let _ = writeln!(out, "Cache interval: {:?}", cache.interval().await);
    let _ = writeln!(out, "Entries: {}", stats.total_entries);
    let _ = writeln!(
        out,
        "Hits: {} Misses: {} Hit rate: {:.1}%",
        stats.hits,
        stats.misses,
        stats.hit_rate() * 100.0
    );
    let _ = writeln!(out, "Undecodable hits: {}", stats.corrupt_hits);
    let _ = writeln!(out, "Reaped: {}", stats.reaped);
    Ok(out)
}

fn list_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pokemon;
    use tokio::time::Duration;

    fn offline_session() -> Session {
        let client = PokeApiClient::with_base_url("http://127.0.0.1:9", Duration::from_secs(60));
        Session::with_rng(client, StdRng::seed_from_u64(7))
    }

    fn pokemon(name: &str) -> Pokemon {
        serde_json::from_value(serde_json::json!({
            "id": 16,
            "name": name,
            "base_experience": 50,
            "height": 3,
            "weight": 18,
            "stats": [{"base_stat": 40, "stat": {"name": "hp", "url": "u"}}],
            "types": [{"slot": 1, "type": {"name": "normal", "url": "u"}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_help_lists_every_command() {
        let text = help();
        for command in COMMANDS {
            assert!(text.contains(command.description), "missing {}", command.name);
        }
    }

    #[tokio::test]
    async fn test_map_back_on_first_page() {
        let mut session = offline_session();
        let err = map_back(&mut session).await.unwrap_err();
        assert_eq!(err.to_string(), "you're on the first page");
    }

    #[tokio::test]
    async fn test_missing_arguments() {
        let mut session = offline_session();
        assert!(explore(&mut session, None).await.is_err());
        assert!(catch(&mut session, None).await.is_err());
        assert!(inspect(&mut session, None).await.is_err());
    }

    #[tokio::test]
    async fn test_inspect_requires_catch() {
        let mut session = offline_session();
        let err = inspect(&mut session, Some("pidgey")).await.unwrap_err();
        assert!(err.to_string().contains("not caught pidgey"));

        session.client().pokedex().add(pokemon("pidgey")).await;

        let out = inspect(&mut session, Some("pidgey")).await.unwrap();
        assert!(out.contains("Name: pidgey"));
        assert!(out.contains("  -hp: 40"));
        assert!(out.contains("  - normal"));
    }

    #[tokio::test]
    async fn test_pokedex_listing() {
        let mut session = offline_session();
        assert_eq!(pokedex(&mut session).await.unwrap(), "Your Pokedex is empty.\n");

        session.client().pokedex().add(pokemon("pidgey")).await;
        session.client().pokedex().add(pokemon("caterpie")).await;

        let out = pokedex(&mut session).await.unwrap();
        assert_eq!(out, "Your Pokedex:\n - caterpie\n - pidgey\n");
    }

    #[tokio::test]
    async fn test_stats_output() {
        let mut session = offline_session();
        session.client().cache().add("k", b"v".to_vec()).await;

        let out = stats(&mut session).await.unwrap();
        assert!(out.contains("Entries: 1"));
        assert!(out.contains("Cache interval: 60s"));
    }
}
