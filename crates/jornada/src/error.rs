//! Unified error type for Jornada.

use jornada_game::GameError;
use jornada_protocol::ProtocolError;
use jornada_room::RoomError;

/// Top-level error wrapping every crate-specific error.
///
/// The `#[from]` conversions let `?` lift sub-crate errors directly.
#[derive(Debug, thiserror::Error)]
pub enum JornadaError {
    /// Codec or room-code error.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Setup, content, or turn-order error from the engine.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Lobby, store, or online-turn error.
    #[error(transparent)]
    Room(#[from] RoomError),
}
