//! Players and session entrants.

use serde::{Deserialize, Serialize};

use crate::CardKind;

/// Piece colors, assigned by seat order.
pub const PLAYER_COLORS: [&str; 8] = [
    "#EF4444", "#3B82F6", "#10B981", "#F59E0B", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

/// Someone sitting down at the table, before the game starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub name: String,
    pub avatar: Option<String>,
}

impl Entrant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar: None,
        }
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

/// A player's piece and progression. Only the turn engine mutates these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: u32,
    pub color: String,
    /// 1 = easy, 2 = medium, 3 = hard.
    pub difficulty_level: u8,
    pub avatar: Option<String>,
    /// Correct answers since the last level-up.
    pub correct_answers_streak: u32,
    /// The kind of card this player draws on their next turn.
    pub card_rotation: CardKind,
}

impl Player {
    /// A fresh piece on the start square.
    pub fn seated(entrant: Entrant, seat: usize) -> Self {
        Self {
            name: entrant.name.trim().to_string(),
            position: 0,
            color: PLAYER_COLORS[seat % PLAYER_COLORS.len()].to_string(),
            difficulty_level: 1,
            avatar: entrant.avatar,
            correct_answers_streak: 0,
            card_rotation: CardKind::Question,
        }
    }

    /// Back to the start square with no progression. Keeps name, color and
    /// avatar.
    pub fn reset(&mut self) {
        self.position = 0;
        self.difficulty_level = 1;
        self.correct_answers_streak = 0;
        self.card_rotation = CardKind::Question;
    }
}
