//! # Jornada
//!
//! A trivia board game: players race along a track, drawing a question, a
//! biblical challenge, or an institutional challenge on each turn, and move
//! only when they get it right.
//!
//! Local hot-seat games run a [`TurnEngine`](jornada_game::TurnEngine)
//! directly. Online games go through a [`RoomClient`](jornada_room::RoomClient)
//! and an [`OnlineGame`](jornada_room::OnlineGame) that mirrors every turn
//! into a shared store.
//!
//! ## Quick Start
//!
//! ```rust
//! use jornada::prelude::*;
//!
//! # fn main() -> Result<(), JornadaError> {
//! let mut game = SessionBuilder::new()
//!     .player("Ana")
//!     .player("Bia")
//!     .seed(7)
//!     .build()?;
//!
//! let rolled = game.roll()?;
//! let outcome = match rolled.card {
//!     Card::Question { correct_index, .. } => game.submit_answer(correct_index)?,
//!     Card::Challenge { .. } => game.submit_challenge_result(true)?,
//! };
//! assert_eq!(outcome.to, u32::from(rolled.dice));
//! # Ok(())
//! # }
//! ```

mod error;
pub mod logging;
mod session;

pub use error::JornadaError;
pub use session::{LocalSession, SessionBuilder};

pub use jornada_game as game;
pub use jornada_protocol as protocol;
pub use jornada_room as room;

pub mod prelude {
    pub use crate::{JornadaError, LocalSession, SessionBuilder};
    pub use jornada_game::{
        Card, CardKind, ContentPack, Entrant, GameConfig, GameError, GameRng, Player,
        RandomSource, RollOutcome, TurnEngine, TurnOutcome, TurnPhase,
    };
    pub use jornada_protocol::{PlayerId, RoomCode, RoomId, RoomStatus};
    pub use jornada_room::{
        MemoryStore, OnlineGame, RoomClient, RoomConfig, RoomError, RoomSnapshot, RoomStore,
        RoomSubscription,
    };
}
