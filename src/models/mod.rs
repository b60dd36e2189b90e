//! Response models for the PokeAPI endpoints
//!
//! This module defines the shapes decoded from raw (possibly cached)
//! response bodies. Fields the client does not use are ignored on decode.

pub mod location;
pub mod pokemon;

// Re-export commonly used types
pub use location::{LocationArea, LocationAreaPage, NamedResource, PokemonEncounter};
pub use pokemon::{Pokemon, PokemonStat, PokemonType};
