//! The backend boundary: tables plus a per-room change feed.

use jornada_protocol::{
    ChangeEvent, GameStateRecord, PlayerRecord, RoomCode, RoomId, RoomRecord, RoomStatus,
};
use tokio::sync::broadcast;

use crate::RoomError;

/// A room row before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub room_code: RoomCode,
    pub host_name: String,
    pub status: RoomStatus,
}

/// A player row before the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub room_id: RoomId,
    pub name: String,
    pub color: String,
    pub player_order: usize,
}

/// A backend holding rooms, players, and per-room game state.
///
/// Every successful insert or update is published to the room's change
/// feed, in the order the store applied it. Implementations decide the
/// transport; the rest of the crate only sees these calls.
pub trait RoomStore: Clone {
    /// Inserts a room and opens its change feed.
    ///
    /// # Errors
    /// [`RoomError::CodeTaken`] if another room already uses the code.
    async fn insert_room(&self, room: NewRoom) -> Result<RoomRecord, RoomError>;

    async fn room(&self, room_id: RoomId) -> Result<Option<RoomRecord>, RoomError>;

    async fn room_by_code(&self, code: &RoomCode) -> Result<Option<RoomRecord>, RoomError>;

    /// Replaces the room row with the same id.
    ///
    /// # Errors
    /// [`RoomError::NotFound`] if there is no such room.
    async fn update_room(&self, room: RoomRecord) -> Result<(), RoomError>;

    async fn insert_player(&self, player: NewPlayer) -> Result<PlayerRecord, RoomError>;

    /// The room's players sorted by `player_order`.
    async fn players(&self, room_id: RoomId) -> Result<Vec<PlayerRecord>, RoomError>;

    async fn update_player(&self, player: PlayerRecord) -> Result<(), RoomError>;

    async fn insert_game_state(&self, state: GameStateRecord) -> Result<(), RoomError>;

    async fn game_state(&self, room_id: RoomId) -> Result<Option<GameStateRecord>, RoomError>;

    async fn update_game_state(&self, state: GameStateRecord) -> Result<(), RoomError>;

    /// Subscribes to changes in one room. Events published before the call
    /// are not replayed.
    async fn subscribe(
        &self,
        room_id: RoomId,
    ) -> Result<broadcast::Receiver<ChangeEvent>, RoomError>;
}
