//! Error types for the room layer.

use jornada_game::GameError;
use jornada_protocol::{PlayerId, ProtocolError, RoomCode};

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Bad input from the caller, e.g. a blank player name.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No room matches the given code or id.
    #[error("room {0} not found")]
    NotFound(String),

    /// Every seat is taken.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The game already started; the room no longer takes players.
    #[error("room {0} has already started")]
    AlreadyStarted(RoomCode),

    #[error("need at least {needed} players to start, room has {actual}")]
    NotEnoughPlayers { needed: usize, actual: usize },

    /// An action was submitted for a player who is not on turn.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// A room with this code already exists.
    #[error("room code {0} is already taken")]
    CodeTaken(RoomCode),

    /// The store's actor is gone or its channel is closed.
    #[error("room store is unavailable")]
    Unavailable,

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Game(#[from] GameError),
}
