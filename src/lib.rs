//! # memory-match
//!
//! Core of a memory-matching card game: a rectangular board of face-down
//! cards, revealed in groups, with match resolution, scoring, and win
//! detection.
//!
//! ## Design Principles
//!
//! 1. **Synchronous core**: `BoardEngine` owns every card and decides
//!    matches, scores, and wins without ever waiting.
//!
//! 2. **Timing lives outside the engine**: `MatchCoordinator` runs the
//!    reveal/wait/evaluate/resolve sequence with cooperative suspension and
//!    calls back into the engine for the synchronous decisions.
//!
//! 3. **Presentation at arm's length**: rendering, input, and animation are
//!    external collaborators. They send card ids in and receive
//!    `Notification`s out; no shared mutable card references.
//!
//! ## Modules
//!
//! - `core`: card entities, board/theme configuration, RNG, errors
//! - `board`: the `BoardEngine` state machine
//! - `events`: the outward notification boundary
//! - `coordinator`: the timed match resolution sequence
//!
//! ## Quick Start
//!
//! ```
//! use memory_match::{BoardConfig, BoardEngine, ThemeConfig};
//!
//! let config = BoardConfig::pairs(4, 3);
//! let theme = ThemeConfig::new("animals")
//!     .with_sprites(["cat", "dog", "owl", "fox", "bee", "elk"]);
//!
//! let mut engine = BoardEngine::new(42);
//! engine.initialize(&config, &theme)?;
//!
//! assert_eq!(engine.total_cards(), 12);
//! assert!(engine.cards().all(|card| card.is_hidden()));
//! # Ok::<(), memory_match::ConfigError>(())
//! ```

pub mod board;
pub mod coordinator;
pub mod core;
pub mod events;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, Card, CardId, CardState, ConfigError, GameRng, ThemeConfig, MAX_MATCH_SIZE,
    MIN_MATCH_SIZE,
};

pub use crate::board::BoardEngine;

pub use crate::events::{Notification, NotificationReceiver, NotificationSender};

pub use crate::coordinator::{MatchCoordinator, ResolutionDelays};
