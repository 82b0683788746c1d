//! Configuration validation errors.
//!
//! `initialize` rejects invalid input wholesale: no card is created and no
//! counter touched unless both the board and theme pass validation. Each
//! variant names the rule that failed so callers can surface a precise
//! message before refusing to start.

use thiserror::Error;

/// Why a board or theme configuration was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Board dimensions produce zero cells.
    #[error("board has no cells")]
    EmptyBoard,

    /// Cards cannot be paired up.
    #[error("board holds an odd number of cards ({total})")]
    OddCardCount { total: usize },

    /// Match group size outside the supported 2..=4 range.
    #[error("match group size {got} is outside the supported range 2..=4")]
    MatchSizeOutOfRange { got: usize },

    /// Theme identifier is empty.
    #[error("theme id must not be empty")]
    MissingThemeId,

    /// Theme defines no sprites at all.
    #[error("theme defines no card sprites")]
    NoSprites,

    /// Theme has fewer sprites than the board has pairs.
    #[error("theme provides {have} sprites but the board needs at least {need}")]
    InsufficientSprites { have: usize, need: usize },
}
