//! Core types: card entities, configuration, RNG, errors.
//!
//! These are the value-level building blocks the board engine and the
//! match coordinator are assembled from.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{BoardConfig, ThemeConfig, MAX_MATCH_SIZE, MIN_MATCH_SIZE};
pub use entity::{Card, CardId, CardState};
pub use error::ConfigError;
pub use rng::GameRng;
