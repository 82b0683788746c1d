//! Board and theme configuration.
//!
//! Games configure a board at startup by providing:
//! - `BoardConfig`: grid shape and match group size
//! - `ThemeConfig`: theme identity and the sprite labels cards can bear
//!
//! Both are plain value descriptors. Validation happens up front in
//! `BoardEngine::initialize`: invalid input is rejected wholesale, never
//! partially applied.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Smallest supported match group size.
pub const MIN_MATCH_SIZE: usize = 2;

/// Largest supported match group size.
pub const MAX_MATCH_SIZE: usize = 4;

/// Shape of the card grid and the group size needed to form a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Columns.
    pub width: u32,

    /// Rows.
    pub height: u32,

    /// Number of revealed cards needed to attempt a match (2..=4).
    pub match_size: usize,
}

impl BoardConfig {
    /// Create a board configuration.
    #[must_use]
    pub const fn new(width: u32, height: u32, match_size: usize) -> Self {
        Self {
            width,
            height,
            match_size,
        }
    }

    /// Classic pairs board: groups of two.
    #[must_use]
    pub const fn pairs(width: u32, height: u32) -> Self {
        Self::new(width, height, MIN_MATCH_SIZE)
    }

    /// Total number of cards on the board.
    #[must_use]
    pub const fn total_cards(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Number of sprite pairs the board holds.
    #[must_use]
    pub const fn pair_count(&self) -> usize {
        self.total_cards() / 2
    }

    /// Validate the configuration, reporting the first rule that fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let total = self.total_cards();
        if total == 0 {
            return Err(ConfigError::EmptyBoard);
        }
        if total % 2 != 0 {
            return Err(ConfigError::OddCardCount { total });
        }
        if !(MIN_MATCH_SIZE..=MAX_MATCH_SIZE).contains(&self.match_size) {
            return Err(ConfigError::MatchSizeOutOfRange {
                got: self.match_size,
            });
        }
        Ok(())
    }

    /// Is this configuration valid?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Visual theme: an identifier plus the ordered sprite labels cards can bear.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme identifier (asset pack name, skin id, etc.).
    pub theme_id: String,

    /// Ordered sprite labels. Pair `i` uses sprite `i % card_sprites.len()`.
    pub card_sprites: Vec<String>,
}

impl ThemeConfig {
    /// Create a theme with no sprites. Add them with `with_sprite`.
    pub fn new(theme_id: impl Into<String>) -> Self {
        Self {
            theme_id: theme_id.into(),
            card_sprites: Vec::new(),
        }
    }

    /// Add a sprite label (builder pattern).
    #[must_use]
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.card_sprites.push(sprite.into());
        self
    }

    /// Add several sprite labels (builder pattern).
    #[must_use]
    pub fn with_sprites<I, S>(mut self, sprites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.card_sprites.extend(sprites.into_iter().map(Into::into));
        self
    }

    /// Sprite label for pair `pair_index`, cycling through the list.
    ///
    /// Callers must ensure the sprite list is non-empty (`validate`).
    #[must_use]
    pub fn sprite_for_pair(&self, pair_index: usize) -> &str {
        &self.card_sprites[pair_index % self.card_sprites.len()]
    }

    /// Validate the theme in isolation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme_id.is_empty() {
            return Err(ConfigError::MissingThemeId);
        }
        if self.card_sprites.is_empty() {
            return Err(ConfigError::NoSprites);
        }
        Ok(())
    }

    /// Is this theme valid in isolation?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Does the theme carry enough sprites for the board?
    ///
    /// The bound is `card_sprites.len() >= total_cards / 2`, exactly. Sprite
    /// assignment cycles with modulo, so this is an absolute floor on sprite
    /// variety, not a uniqueness guarantee per pair.
    #[must_use]
    pub fn has_sufficient_sprites(&self, config: &BoardConfig) -> bool {
        self.card_sprites.len() >= config.pair_count()
    }

    /// Validate the theme against a specific board.
    pub fn validate_for_board(&self, config: &BoardConfig) -> Result<(), ConfigError> {
        self.validate()?;
        if !self.has_sufficient_sprites(config) {
            return Err(ConfigError::InsufficientSprites {
                have: self.card_sprites.len(),
                need: config.pair_count(),
            });
        }
        Ok(())
    }
}
