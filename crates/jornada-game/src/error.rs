//! Error types for the game rules.

use crate::{CardKind, TurnPhase};

/// Errors returned by the deck and the turn engine.
///
/// None of these are fatal: the operation is aborted and the engine is left
/// exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Bad setup input: blank player name, wrong player count, bad config.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The filtered candidate pool for this card kind is empty.
    #[error("no {0} cards available")]
    EmptyPool(CardKind),

    /// The operation is not valid in the engine's current phase.
    #[error("expected phase {expected}, engine is in {actual}")]
    InvalidPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    /// An answer was submitted for the wrong kind of card, e.g. an option
    /// index for a challenge card.
    #[error("the card on the table is a {0}")]
    CardMismatch(CardKind),

    /// A winner has been declared. Only `restart` is accepted.
    #[error("game is over, {winner} won")]
    GameOver { winner: String },

    /// A content pack that fails to parse or has inconsistent entries.
    #[error("invalid content: {0}")]
    InvalidContent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pool_message_names_the_kind() {
        let err = GameError::EmptyPool(CardKind::InstitutionalChallenge);
        assert_eq!(err.to_string(), "no institutional challenge cards available");
    }

    #[test]
    fn test_invalid_phase_message() {
        let err = GameError::InvalidPhase {
            expected: TurnPhase::Resolving,
            actual: TurnPhase::Rolling,
        };
        assert_eq!(err.to_string(), "expected phase Resolving, engine is in Rolling");
    }
}
