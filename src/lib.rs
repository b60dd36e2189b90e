//! Pokedex - An interactive PokeAPI explorer
//!
//! API responses are de-duplicated by an in-memory cache whose entries are
//! swept by a background reaper once they outlive the configured interval.

pub mod cache;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod pokeapi;
pub mod pokedex;
pub mod tasks;

pub use cache::Cache;
pub use config::Config;
pub use error::FetchError;
pub use pokeapi::PokeApiClient;
pub use tasks::spawn_reaper;
