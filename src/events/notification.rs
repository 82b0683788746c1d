//! Outward notifications for the presentation layer.
//!
//! The core never draws, animates, or reads input. It emits `Notification`
//! values describing what just happened; a presentation layer subscribes and
//! reacts (flip a card, play a cue, show the win screen).
//!
//! ## Delivery Contract
//!
//! - Notifications are sent in the order their triggering operations
//!   occurred, at least once per trigger.
//! - `CardsMatched` / `CardsMismatched` are emitted only after the state
//!   mutation they describe has committed.
//! - Delivery is fire-and-forget over an unbounded channel: a vanished
//!   subscriber never blocks or fails game logic.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::core::entity::CardId;

/// Something the presentation layer should react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notification {
    /// A fresh board is ready, all cards face-down.
    BoardInitialized {
        width: u32,
        height: u32,
        match_size: usize,
        total_cards: usize,
    },

    /// A card flipped face-up.
    CardRevealed { card: CardId, sprite: String },

    /// A full group matched; the cards are now permanently matched.
    CardsMatched { cards: Vec<CardId>, score: u32 },

    /// A full group failed to match. The cards are still face-up; play the
    /// failure cue now, `CardsMismatched` follows once they flip back.
    MismatchShown { cards: Vec<CardId> },

    /// A failed group flipped back face-down.
    CardsMismatched { cards: Vec<CardId>, error_count: u32 },

    /// Every pair is matched.
    GameWon { final_score: u32 },

    /// A resolution sequence started; player input should be disabled.
    InputLocked,

    /// The resolution sequence finished; input may resume.
    InputUnlocked,
}

/// Sending half of the notification channel.
pub type NotificationSender = mpsc::UnboundedSender<Notification>;

/// Receiving half of the notification channel.
pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Create a notification channel.
#[must_use]
pub fn channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::unbounded_channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_preserves_order() {
        let (tx, mut rx) = channel();

        tx.send(Notification::InputLocked).unwrap();
        tx.send(Notification::GameWon { final_score: 200 }).unwrap();

        assert_eq!(rx.try_recv(), Ok(Notification::InputLocked));
        assert_eq!(rx.try_recv(), Ok(Notification::GameWon { final_score: 200 }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_notification_serialization() {
        let n = Notification::CardsMatched {
            cards: vec![CardId::new(1), CardId::new(4)],
            score: 90,
        };
        let json = serde_json::to_string(&n).unwrap();
        let deserialized: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(n, deserialized);
    }
}
