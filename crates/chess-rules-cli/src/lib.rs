//! Developer tooling around the chess rules engine.
//!
//! # Modules
//!
//! - [`config`] - `chess-rules.toml` loading
//! - [`selfplay`] - random games played through the public game API

pub mod config;
pub mod selfplay;
