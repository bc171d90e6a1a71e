//! Game configuration.

use serde::{Deserialize, Serialize};

use crate::{GameError, MAX_DIFFICULTY, PLAYER_COLORS};

/// Tunables for a game session.
///
/// The defaults are the classic table: a 30-square track, a six-sided die,
/// two correct answers per level and three levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Id of the end square. The track has `track_length + 1` squares.
    pub track_length: u32,

    /// Faces on the die. Rolls are uniform in `1..=dice_sides`.
    pub dice_sides: u8,

    /// Correct answers in a row (since the last level-up) needed to move
    /// up one difficulty level.
    pub level_up_streak: u32,

    /// Highest difficulty level, at most [`MAX_DIFFICULTY`]. Players start
    /// at level 1.
    pub max_level: u8,

    /// Fewest players a session can start with.
    pub min_players: usize,

    /// Most players a session can hold. Capped by the color palette.
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            track_length: 30,
            dice_sides: 6,
            level_up_streak: 2,
            max_level: 3,
            min_players: 2,
            max_players: 8,
        }
    }
}

impl GameConfig {
    /// Checks that the values describe a playable game.
    ///
    /// # Errors
    /// [`GameError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.track_length == 0 {
            return Err(GameError::Validation("track_length must be at least 1".into()));
        }
        if self.dice_sides == 0 {
            return Err(GameError::Validation("dice_sides must be at least 1".into()));
        }
        if self.level_up_streak == 0 {
            return Err(GameError::Validation("level_up_streak must be at least 1".into()));
        }
        if !(1..=MAX_DIFFICULTY).contains(&self.max_level) {
            return Err(GameError::Validation(format!(
                "max_level must be in 1..={MAX_DIFFICULTY}, got {}",
                self.max_level
            )));
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(GameError::Validation(format!(
                "player range {}..={} is empty",
                self.min_players, self.max_players
            )));
        }
        if self.max_players > PLAYER_COLORS.len() {
            return Err(GameError::Validation(format!(
                "max_players {} exceeds the {} available colors",
                self.max_players,
                PLAYER_COLORS.len()
            )));
        }
        Ok(())
    }
}
