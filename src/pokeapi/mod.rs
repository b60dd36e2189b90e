//! PokeAPI Module
//!
//! Cached REST client for the PokeAPI endpoints used by the REPL.
//!
//! # Endpoints
//! - `GET /location-area` - Paged listing of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in one area
//! - `GET /pokemon/{name}` - Details of one Pokemon

pub mod client;

pub use client::PokeApiClient;
