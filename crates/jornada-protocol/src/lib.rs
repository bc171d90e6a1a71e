//! Shared vocabulary between the game client and the room backend.
//!
//! - **Types** ([`RoomRecord`], [`PlayerRecord`], [`GameStateRecord`],
//!   [`ChangeEvent`], …): the rows the backend stores and the change
//!   notifications it pushes.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how opaque payloads such
//!   as the current card are turned into bytes for the `game_state` row.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Game (cards, engine) → Protocol (records, bytes) → Room store
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ChangeEvent, ChangeKind, GamePhase, GameStateRecord, PlayerId,
    PlayerRecord, Record, RoomCode, RoomId, RoomRecord, RoomStatus, Table,
};
