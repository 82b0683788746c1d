//! Card identity and lifecycle state.
//!
//! Every cell on the board holds one `Card`. A card's identity (`CardId`,
//! sprite label) is fixed at board initialization; only its `CardState`
//! changes during play.
//!
//! ## State Machine
//!
//! ```text
//! Hidden --reveal--> Revealed --resolve_match--> Matched (terminal)
//!                    Revealed --resolve_mismatch--> Hidden
//! ```
//!
//! No transition leaves `Matched`. The `BoardEngine` enforces these rules;
//! `CardState::can_transition_to` encodes them for guard checks.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card on the board.
///
/// Ids are assigned densely at initialization: `0..total_cards`. They double
/// as indices into the engine's card arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index for this card.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Lifecycle state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face-down, selectable.
    #[default]
    Hidden,
    /// Face-up, part of the current reveal group.
    Revealed,
    /// Permanently matched. Terminal.
    Matched,
}

impl CardState {
    /// Check whether the state machine permits a transition.
    #[must_use]
    pub const fn can_transition_to(self, next: CardState) -> bool {
        matches!(
            (self, next),
            (CardState::Hidden, CardState::Revealed)
                | (CardState::Revealed, CardState::Hidden)
                | (CardState::Revealed, CardState::Matched)
        )
    }
}

/// A single card on the board.
///
/// Owned exclusively by the `BoardEngine`; external code reads cards through
/// `BoardEngine::card` and mutates them only through engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Stable identifier, equal to the card's arena index.
    pub id: CardId,

    /// Sprite label. Cards with equal sprites form a match group.
    pub sprite: String,

    /// Current lifecycle state.
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, sprite: impl Into<String>) -> Self {
        Self {
            id,
            sprite: sprite.into(),
            state: CardState::Hidden,
        }
    }

    /// Is this card face-down?
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }

    /// Is this card face-up but not yet resolved?
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state == CardState::Revealed
    }

    /// Has this card been permanently matched?
    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }
}
