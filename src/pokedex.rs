//! Pokedex Module
//!
//! Collection of caught Pokemon, guarded by one exclusive lock like the
//! response cache. Entries never expire.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::models::Pokemon;

/// A caught Pokemon and when it was caught.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Pokedex {
    entries: Mutex<HashMap<String, CaughtPokemon>>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `pokemon` as caught now, replacing an earlier catch of the same name.
    pub async fn add(&self, pokemon: Pokemon) {
        let caught = CaughtPokemon {
            caught_at: Utc::now(),
            pokemon,
        };
        self.entries
            .lock()
            .await
            .insert(caught.pokemon.name.clone(), caught);
    }

    pub async fn get(&self, name: &str) -> Option<CaughtPokemon> {
        self.entries.lock().await.get(name).cloned()
    }

    /// Names of every caught Pokemon, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.lock().await.keys().cloned().collect();
        names.sort();
        names
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}
