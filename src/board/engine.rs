//! Board engine: card arena, reveal tracking, match resolution, scoring.
//!
//! The `BoardEngine` exclusively owns every card and the currently revealed
//! working set. All mutation flows through its operations; the presentation
//! layer only ever holds card ids.
//!
//! The engine is synchronous and single-owner. It never waits: the timed
//! reveal/evaluate/resolve choreography lives in the `MatchCoordinator`,
//! which calls back in here for the pure decisions.

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::config::{BoardConfig, ThemeConfig, MAX_MATCH_SIZE};
use crate::core::entity::{Card, CardId, CardState};
use crate::core::error::ConfigError;
use crate::core::rng::GameRng;

/// Base score for a clean match.
const MATCH_SCORE: u32 = 100;

/// Score docked per accumulated error.
const ERROR_PENALTY: u32 = 10;

/// Floor a match can never score below.
const MIN_MATCH_SCORE: u32 = 10;

/// The board state machine.
///
/// Cards live in a fixed-size arena indexed by `CardId`; the revealed set is
/// an insertion-ordered group bounded by the match size.
///
/// ## Usage
///
/// ```
/// use memory_match::{BoardConfig, BoardEngine, ThemeConfig};
///
/// let config = BoardConfig::pairs(2, 2);
/// let theme = ThemeConfig::new("animals").with_sprites(["cat", "dog"]);
///
/// let mut engine = BoardEngine::new(42);
/// engine.initialize(&config, &theme).unwrap();
///
/// assert_eq!(engine.total_cards(), 4);
/// assert!(!engine.is_game_won());
/// ```
#[derive(Clone, Debug)]
pub struct BoardEngine {
    /// Card arena. `cards[i].id == CardId(i)`.
    cards: Vec<Card>,

    /// Ids currently in `Revealed` state, in reveal order.
    revealed: SmallVec<[CardId; MAX_MATCH_SIZE]>,

    /// Revealed cards needed to attempt a match.
    match_size: usize,

    /// Cards on the board. Zero until initialized.
    total_cards: usize,

    matched_pairs: u32,
    error_count: u32,
    score: u32,

    rng: GameRng,
}

impl BoardEngine {
    /// Create an uninitialized engine with a fixed shuffle seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    /// Create an uninitialized engine seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }

    /// Create an uninitialized engine with an explicit RNG.
    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self {
            cards: Vec::new(),
            revealed: SmallVec::new(),
            match_size: 0,
            total_cards: 0,
            matched_pairs: 0,
            error_count: 0,
            score: 0,
            rng,
        }
    }

    /// Build and shuffle a fresh board.
    ///
    /// Validates both configurations wholesale before touching any state:
    /// on error nothing is mutated. On success, all prior cards, revealed
    /// ids, and counters are discarded.
    pub fn initialize(
        &mut self,
        config: &BoardConfig,
        theme: &ThemeConfig,
    ) -> Result<(), ConfigError> {
        config.validate()?;
        theme.validate_for_board(config)?;

        let total = config.total_cards();
        let mut sprites = Vec::with_capacity(total);
        for pair in 0..config.pair_count() {
            let sprite = theme.sprite_for_pair(pair);
            sprites.push(sprite.to_string());
            sprites.push(sprite.to_string());
        }
        self.rng.shuffle(&mut sprites);

        self.cards = sprites
            .into_iter()
            .enumerate()
            .map(|(i, sprite)| Card::new(CardId::new(i as u32), sprite))
            .collect();
        self.revealed.clear();
        self.match_size = config.match_size;
        self.total_cards = total;
        self.matched_pairs = 0;
        self.error_count = 0;
        self.score = 0;

        debug!(
            width = config.width,
            height = config.height,
            match_size = config.match_size,
            theme = %theme.theme_id,
            "board initialized"
        );
        Ok(())
    }

    /// Discard all cards and counters.
    ///
    /// The board is unusable until the next `initialize`. Must not be called
    /// while a resolution sequence is in flight (caller's responsibility).
    pub fn reset(&mut self) {
        self.cards.clear();
        self.revealed.clear();
        self.match_size = 0;
        self.total_cards = 0;
        self.matched_pairs = 0;
        self.error_count = 0;
        self.score = 0;
        debug!("board reset");
    }

    /// Look up a card. Absence is a normal result, not an error; stale ids
    /// from the presentation layer land here.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Can this card be revealed right now?
    ///
    /// True iff the id exists, the card is `Hidden`, and the revealed group
    /// is not yet full.
    #[must_use]
    pub fn can_reveal(&self, id: CardId) -> bool {
        self.revealed.len() < self.match_size
            && self.card(id).is_some_and(Card::is_hidden)
    }

    /// Reveal a card, appending it to the working group.
    ///
    /// Invalid attempts (unknown id, non-`Hidden` card, full group) are
    /// absorbed as no-ops and return `false`; these arise from expected UI
    /// races and must never corrupt state.
    pub fn reveal(&mut self, id: CardId) -> bool {
        if !self.can_reveal(id) {
            trace!(%id, "reveal ignored");
            return false;
        }
        self.cards[id.index()].state = CardState::Revealed;
        self.revealed.push(id);
        trace!(%id, revealed = self.revealed.len(), "card revealed");
        true
    }

    /// Is the revealed group full and ready for evaluation?
    #[must_use]
    pub fn can_process_match(&self) -> bool {
        self.match_size > 0 && self.revealed.len() == self.match_size
    }

    /// Do all revealed cards share one sprite?
    ///
    /// Pure predicate: false unless the group is full and uniform.
    #[must_use]
    pub fn check_match(&self) -> bool {
        if self.revealed.is_empty() || self.revealed.len() != self.match_size {
            return false;
        }
        let first = match self.card(self.revealed[0]) {
            Some(card) => &card.sprite,
            None => return false,
        };
        self.revealed
            .iter()
            .all(|&id| self.card(id).is_some_and(|card| card.sprite == *first))
    }

    /// Commit a successful match.
    ///
    /// Call only when `check_match()` is true. Every revealed card becomes
    /// `Matched` (terminal), the pair counter advances, and the score grows
    /// by `max(100 - error_count * 10, 10)` using the error count from
    /// before this call: earlier mistakes permanently cheapen every later
    /// match.
    pub fn resolve_match(&mut self) {
        debug_assert!(self.check_match(), "resolve_match without a match");

        for &id in &self.revealed {
            self.cards[id.index()].state = CardState::Matched;
        }
        self.matched_pairs += 1;
        self.score += Self::match_award(self.error_count);
        let cleared: SmallVec<[CardId; MAX_MATCH_SIZE]> = std::mem::take(&mut self.revealed);

        debug!(
            cards = ?cleared,
            matched_pairs = self.matched_pairs,
            score = self.score,
            "match resolved"
        );
    }

    /// Commit a failed match.
    ///
    /// Call only when the group is full and `check_match()` is false. Every
    /// revealed card flips back to `Hidden`, the error counter advances, and
    /// the score is untouched.
    pub fn resolve_mismatch(&mut self) {
        for &id in &self.revealed {
            self.cards[id.index()].state = CardState::Hidden;
        }
        self.error_count += 1;
        let cleared: SmallVec<[CardId; MAX_MATCH_SIZE]> = std::mem::take(&mut self.revealed);

        debug!(
            cards = ?cleared,
            error_count = self.error_count,
            "mismatch resolved"
        );
    }

    /// Has every pair been matched?
    ///
    /// Stays true once reached until `reset` or `initialize`.
    #[must_use]
    pub fn is_game_won(&self) -> bool {
        self.total_cards > 0 && self.matched_pairs as usize >= self.total_cards / 2
    }

    /// Points awarded for a match given the error count at resolution time.
    fn match_award(error_count: u32) -> u32 {
        MATCH_SCORE
            .saturating_sub(error_count.saturating_mul(ERROR_PENALTY))
            .max(MIN_MATCH_SCORE)
    }

    // === Read accessors ===

    /// Has the board been initialized since creation or the last reset?
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.cards.is_empty()
    }

    /// Cards on the board. Zero when uninitialized.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Revealed cards needed to attempt a match.
    #[must_use]
    pub fn match_size(&self) -> usize {
        self.match_size
    }

    /// Ids currently revealed, in reveal order.
    #[must_use]
    pub fn revealed(&self) -> &[CardId] {
        &self.revealed
    }

    /// Match groups resolved so far.
    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Failed match attempts so far.
    #[must_use]
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Running score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Iterate over all cards in id order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> BoardEngine {
        let config = BoardConfig::pairs(2, 2);
        let theme = ThemeConfig::new("animals").with_sprites(["a", "b"]);
        let mut engine = BoardEngine::new(42);
        engine.initialize(&config, &theme).unwrap();
        engine
    }

    /// Ids of the cards bearing `sprite`, in id order.
    fn ids_of(engine: &BoardEngine, sprite: &str) -> Vec<CardId> {
        engine
            .cards()
            .filter(|c| c.sprite == sprite)
            .map(|c| c.id)
            .collect()
    }

    #[test]
    fn test_initialize_creates_all_cards_hidden() {
        let engine = small_board();

        assert!(engine.is_initialized());
        assert_eq!(engine.total_cards(), 4);
        assert_eq!(engine.match_size(), 2);
        assert!(engine.cards().all(Card::is_hidden));

        // Dense ids 0..total
        let ids: Vec<u32> = engine.cards().map(|c| c.id.raw()).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_initialize_pairs_sprites() {
        let engine = small_board();
        assert_eq!(ids_of(&engine, "a").len(), 2);
        assert_eq!(ids_of(&engine, "b").len(), 2);
    }

    #[test]
    fn test_initialize_rejects_invalid_board() {
        let theme = ThemeConfig::new("t").with_sprites(["a", "b", "c", "d", "e"]);
        let mut engine = BoardEngine::new(1);

        let err = engine.initialize(&BoardConfig::pairs(3, 3), &theme);
        assert_eq!(err, Err(ConfigError::OddCardCount { total: 9 }));
        assert!(!engine.is_initialized());
    }

    #[test]
    fn test_initialize_rejects_insufficient_sprites() {
        let theme = ThemeConfig::new("t").with_sprite("a");
        let mut engine = BoardEngine::new(1);

        let err = engine.initialize(&BoardConfig::pairs(2, 2), &theme);
        assert_eq!(err, Err(ConfigError::InsufficientSprites { have: 1, need: 2 }));
    }

    #[test]
    fn test_failed_initialize_leaves_prior_board() {
        let mut engine = small_board();
        let revealed = ids_of(&engine, "a")[0];
        engine.reveal(revealed);

        let bad = ThemeConfig::new("");
        let err = engine.initialize(&BoardConfig::pairs(2, 2), &bad);
        assert!(err.is_err());

        // Prior board untouched, including the revealed working set
        assert_eq!(engine.total_cards(), 4);
        assert_eq!(engine.revealed(), &[revealed]);
    }

    #[test]
    fn test_card_lookup_absence() {
        let engine = small_board();
        assert!(engine.card(CardId::new(0)).is_some());
        assert!(engine.card(CardId::new(4)).is_none());
        assert!(engine.card(CardId::new(9999)).is_none());
    }

    #[test]
    fn test_reveal_tracks_order() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");

        assert!(engine.reveal(a[1]));
        assert!(engine.reveal(a[0]));
        assert_eq!(engine.revealed(), &[a[1], a[0]]);
    }

    #[test]
    fn test_reveal_ignores_unknown_id() {
        let mut engine = small_board();
        assert!(!engine.reveal(CardId::new(100)));
        assert!(engine.revealed().is_empty());
    }

    #[test]
    fn test_reveal_ignores_already_revealed() {
        let mut engine = small_board();
        let id = CardId::new(0);

        assert!(engine.reveal(id));
        assert!(!engine.reveal(id));
        assert_eq!(engine.revealed(), &[id]);
    }

    #[test]
    fn test_reveal_ignores_when_group_full() {
        let mut engine = small_board();
        engine.reveal(CardId::new(0));
        engine.reveal(CardId::new(1));

        assert!(engine.can_process_match());
        assert!(!engine.reveal(CardId::new(2)));
        assert_eq!(engine.revealed().len(), 2);
        assert!(engine.card(CardId::new(2)).unwrap().is_hidden());
    }

    #[test]
    fn test_reveal_ignores_matched_card() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        engine.reveal(a[0]);
        engine.reveal(a[1]);
        engine.resolve_match();

        assert!(!engine.reveal(a[0]));
        assert!(engine.revealed().is_empty());
        assert!(engine.card(a[0]).unwrap().is_matched());
    }

    #[test]
    fn test_check_match_truth_table() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        let b = ids_of(&engine, "b");

        // Empty and partial groups never match
        assert!(!engine.check_match());
        engine.reveal(a[0]);
        assert!(!engine.check_match());

        // Mixed full group: no match
        engine.reveal(b[0]);
        assert!(!engine.check_match());
        engine.resolve_mismatch();

        // Uniform full group: match
        engine.reveal(a[0]);
        engine.reveal(a[1]);
        assert!(engine.check_match());
    }

    #[test]
    fn test_resolve_match_postconditions() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        engine.reveal(a[0]);
        engine.reveal(a[1]);
        engine.resolve_match();

        assert!(engine.card(a[0]).unwrap().is_matched());
        assert!(engine.card(a[1]).unwrap().is_matched());
        assert!(engine.revealed().is_empty());
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.error_count(), 0);
    }

    #[test]
    fn test_resolve_mismatch_postconditions() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        let b = ids_of(&engine, "b");
        engine.reveal(a[0]);
        engine.reveal(b[0]);
        engine.resolve_mismatch();

        assert!(engine.card(a[0]).unwrap().is_hidden());
        assert!(engine.card(b[0]).unwrap().is_hidden());
        assert!(engine.revealed().is_empty());
        assert_eq!(engine.error_count(), 1);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.matched_pairs(), 0);
    }

    #[test]
    fn test_errors_cheapen_future_matches() {
        assert_eq!(BoardEngine::match_award(0), 100);
        assert_eq!(BoardEngine::match_award(1), 90);
        assert_eq!(BoardEngine::match_award(9), 10);
        // Floor at 10 even when the subtraction would go past zero
        assert_eq!(BoardEngine::match_award(10), 10);
        assert_eq!(BoardEngine::match_award(1000), 10);
    }

    #[test]
    fn test_win_detection() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        let b = ids_of(&engine, "b");

        assert!(!engine.is_game_won());

        engine.reveal(a[0]);
        engine.reveal(a[1]);
        engine.resolve_match();
        assert!(!engine.is_game_won());

        engine.reveal(b[0]);
        engine.reveal(b[1]);
        engine.resolve_match();
        assert!(engine.is_game_won());
        assert_eq!(engine.score(), 200);

        // Stays won until re-initialize / reset
        assert!(engine.is_game_won());
    }

    #[test]
    fn test_uninitialized_board_is_not_won() {
        let engine = BoardEngine::new(1);
        assert!(!engine.is_game_won());
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        engine.reveal(a[0]);
        engine.reveal(a[1]);
        engine.resolve_match();

        engine.reset();

        assert!(!engine.is_initialized());
        assert_eq!(engine.total_cards(), 0);
        assert_eq!(engine.matched_pairs(), 0);
        assert_eq!(engine.score(), 0);
        assert!(engine.revealed().is_empty());
        assert!(engine.card(CardId::new(0)).is_none());
        assert!(!engine.is_game_won());
    }

    #[test]
    fn test_reinitialize_discards_prior_state() {
        let mut engine = small_board();
        let a = ids_of(&engine, "a");
        engine.reveal(a[0]);
        engine.reveal(a[1]);
        engine.resolve_match();
        assert_eq!(engine.score(), 100);

        let config = BoardConfig::pairs(2, 3);
        let theme = ThemeConfig::new("fresh").with_sprites(["x", "y", "z"]);
        engine.initialize(&config, &theme).unwrap();

        assert_eq!(engine.total_cards(), 6);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.matched_pairs(), 0);
        assert!(engine.revealed().is_empty());
        assert!(engine.cards().all(Card::is_hidden));
        // No sprite leakage from the previous theme
        assert!(engine.cards().all(|c| ["x", "y", "z"].contains(&c.sprite.as_str())));
    }

    #[test]
    fn test_match_size_three_group() {
        // 2x3 board with match_size 3: groups of three revealed cards.
        let config = BoardConfig::new(2, 3, 3);
        let theme = ThemeConfig::new("t").with_sprites(["p", "q", "r"]);
        let mut engine = BoardEngine::new(9);
        engine.initialize(&config, &theme).unwrap();

        engine.reveal(CardId::new(0));
        engine.reveal(CardId::new(1));
        assert!(!engine.can_process_match());
        engine.reveal(CardId::new(2));
        assert!(engine.can_process_match());
        assert!(!engine.reveal(CardId::new(3)));
    }
}
