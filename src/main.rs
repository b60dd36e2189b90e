//! Pokedex - An interactive PokeAPI explorer
//!
//! Reads commands from stdin and serves API responses through an expiring
//! in-memory cache.

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::commands::{dispatch, Outcome, Session};
use pokedex::{Config, PokeApiClient};

const PROMPT: &str = "Pokedex > ";

/// Main entry point for the Pokedex REPL.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging (stderr)
/// 2. Load configuration from environment variables
/// 3. Create the API client, which starts the cache reaper
/// 4. Run the read-eval-print loop until `exit`, EOF or Ctrl+C
/// 5. Stop the cache reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs stay out of the REPL, override with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_interval={:?}, api_base_url={}, http_timeout={:?}",
        config.cache_interval, config.api_base_url, config.http_timeout
    );

    let client = PokeApiClient::new(&config).context("failed to build HTTP client")?;
    let mut session = Session::new(client);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        print!("{}", PROMPT);
        stdout.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read input")?,
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, exiting");
                None
            }
        };

        // EOF
        let Some(line) = line else {
            println!();
            break;
        };

        match dispatch(&mut session, &line).await {
            Ok(Outcome::Continue(text)) => print!("{}", text),
            Ok(Outcome::Exit) => {
                println!("Closing the Pokedex... Goodbye!");
                break;
            }
            Err(err) => eprintln!("Error: {:#}", err),
        }
    }

    session.into_client().shutdown().await;
    info!("Pokedex shutdown complete");
    Ok(())
}
