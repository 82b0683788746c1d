//! Match coordinator: the timed reveal/evaluate/resolve sequence.
//!
//! The engine is synchronous; it decides, it never waits. The coordinator
//! owns the waiting: after the final card of a group is revealed it pauses
//! so the player can see the selection, evaluates the match, commits the
//! outcome through the engine, and emits notifications around each step.
//!
//! ## Concurrency Contract
//!
//! One logical flow of control. The suspend points are cooperative
//! (`tokio::time::sleep`); no thread blocks. The `resolving` flag keeps a
//! second resolution from starting while one is in flight, and selections
//! arriving during a resolution are dropped, never queued: rapid clicks
//! during the animation window are intentionally ignored. A started
//! sequence always runs to completion; only `initialize`/`reset` discard
//! game state, and neither may be called mid-resolution.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::board::BoardEngine;
use crate::core::config::{BoardConfig, ThemeConfig};
use crate::core::entity::CardId;
use crate::core::error::ConfigError;
use crate::events::{Notification, NotificationSender};

/// Fixed pauses inside the resolution sequence.
///
/// Exact durations are a presentation concern; these defaults are merely
/// "short, perceptible". They are set at construction, not per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionDelays {
    /// After the last card of a group flips, before evaluating.
    pub reveal_settle: Duration,

    /// After a successful match commits, before win detection fires.
    pub match_celebration: Duration,

    /// Failed cards stay face-up this long before flipping back.
    pub mismatch_display: Duration,
}

impl Default for ResolutionDelays {
    fn default() -> Self {
        Self {
            reveal_settle: Duration::from_millis(600),
            match_celebration: Duration::from_millis(400),
            mismatch_display: Duration::from_millis(900),
        }
    }
}

/// Drives the board through timed match attempts.
///
/// Owns the `BoardEngine` outright; the presentation layer interacts only
/// through card ids in and `Notification`s out.
#[derive(Debug)]
pub struct MatchCoordinator {
    engine: BoardEngine,
    notifications: NotificationSender,
    delays: ResolutionDelays,
    resolving: bool,
}

impl MatchCoordinator {
    /// Wrap an engine with default delays.
    #[must_use]
    pub fn new(engine: BoardEngine, notifications: NotificationSender) -> Self {
        Self::with_delays(engine, notifications, ResolutionDelays::default())
    }

    /// Wrap an engine with explicit delays.
    #[must_use]
    pub fn with_delays(
        engine: BoardEngine,
        notifications: NotificationSender,
        delays: ResolutionDelays,
    ) -> Self {
        Self {
            engine,
            notifications,
            delays,
            resolving: false,
        }
    }

    /// Set up a fresh board and announce it.
    ///
    /// On failure the error propagates untouched: nothing is emitted and no
    /// resolution is marked in progress.
    pub fn initialize(
        &mut self,
        config: &BoardConfig,
        theme: &ThemeConfig,
    ) -> Result<(), ConfigError> {
        self.engine.initialize(config, theme)?;
        self.resolving = false;
        self.notify(Notification::BoardInitialized {
            width: config.width,
            height: config.height,
            match_size: config.match_size,
            total_cards: config.total_cards(),
        });
        Ok(())
    }

    /// Discard the board. Only valid when no resolution is in flight.
    pub fn reset(&mut self) {
        debug_assert!(!self.resolving, "reset during an active resolution");
        self.engine.reset();
        self.resolving = false;
    }

    /// Handle a player selecting a card.
    ///
    /// No-op while a resolution is in progress or when the card cannot be
    /// revealed. Otherwise the card flips, `CardRevealed` fires, and if the
    /// group is now full the full resolution sequence runs before this
    /// returns.
    pub async fn on_card_selected(&mut self, id: CardId) {
        self.handle_selection(id).await;
    }

    /// Is a resolution sequence currently in flight?
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    /// Read access to the underlying board.
    #[must_use]
    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    /// Consume selections from a channel until it closes.
    ///
    /// Selections that were sent while a resolution sequence was suspended
    /// are drained and dropped afterwards, implementing the drop-not-queue
    /// backpressure policy.
    pub async fn run(mut self, mut selections: mpsc::UnboundedReceiver<CardId>) {
        while let Some(id) = selections.recv().await {
            let resolved = self.handle_selection(id).await;
            if resolved {
                let mut dropped = 0usize;
                while selections.try_recv().is_ok() {
                    dropped += 1;
                }
                if dropped > 0 {
                    trace!(dropped, "selections dropped during resolution");
                }
            }
        }
    }

    /// Returns true iff a resolution sequence ran.
    async fn handle_selection(&mut self, id: CardId) -> bool {
        if self.resolving {
            trace!(%id, "selection ignored: resolution in progress");
            return false;
        }
        if !self.engine.reveal(id) {
            return false;
        }

        let sprite = self
            .engine
            .card(id)
            .map(|card| card.sprite.clone())
            .unwrap_or_default();
        self.notify(Notification::CardRevealed { card: id, sprite });

        if !self.engine.can_process_match() {
            return false;
        }
        self.resolve_group().await;
        true
    }

    /// The suspend/evaluate/resolve sequence for a full group.
    async fn resolve_group(&mut self) {
        self.resolving = true;
        self.notify(Notification::InputLocked);

        // Let the presentation layer finish showing the revealed cards.
        tokio::time::sleep(self.delays.reveal_settle).await;

        let cards: Vec<CardId> = self.engine.revealed().to_vec();
        if self.engine.check_match() {
            self.engine.resolve_match();
            debug!(?cards, score = self.engine.score(), "group matched");
            self.notify(Notification::CardsMatched {
                cards,
                score: self.engine.score(),
            });

            tokio::time::sleep(self.delays.match_celebration).await;

            if self.engine.is_game_won() {
                self.notify(Notification::GameWon {
                    final_score: self.engine.score(),
                });
            }
        } else {
            debug!(?cards, "group mismatched");
            self.notify(Notification::MismatchShown {
                cards: cards.clone(),
            });

            // Failure cue plays while the cards are still face-up.
            tokio::time::sleep(self.delays.mismatch_display).await;

            self.engine.resolve_mismatch();
            self.notify(Notification::CardsMismatched {
                cards,
                error_count: self.engine.error_count(),
            });
        }

        self.resolving = false;
        self.notify(Notification::InputUnlocked);
    }

    fn notify(&self, notification: Notification) {
        // Fire-and-forget: a vanished subscriber never fails game logic.
        let _ = self.notifications.send(notification);
    }
}
