//! Record shapes stored by the room backend and the change events it pushes.
//!
//! The backend keeps three collections, all keyed by room identity:
//!
//! ```text
//! rooms       { id, room_code, host_name, status, current_player_index, winner_name }
//! players     { id, room_id, name, color, position, player_order }
//! game_state  { room_id, current_card, dice_value, phase }
//! ```
//!
//! Clients never own these rows. They create and update them through the
//! room adapter and observe them through [`ChangeEvent`]s.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Backend identifier of a room row.
///
/// Serialized as a plain number (`#[serde(transparent)]`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// Backend identifier of a player row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// The short code players type to join a room, e.g. `"K3X9QZ"`.
///
/// Always six uppercase ASCII letters or digits. Construct with
/// [`RoomCode::parse`], which upper-cases and trims user input first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Number of characters in every room code.
    pub const LEN: usize = 6;

    /// Characters a generated code may contain.
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Validates and normalizes user input into a room code.
    ///
    /// # Errors
    /// [`ProtocolError::InvalidRoomCode`] if the trimmed input is not
    /// exactly [`Self::LEN`] ASCII alphanumerics.
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        let code = input.trim().to_ascii_uppercase();
        if code.len() != Self::LEN || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(ProtocolError::InvalidRoomCode(input.to_string()));
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomCode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Room lifecycle and game phase
// ---------------------------------------------------------------------------

/// Lifecycle of an online room.
///
/// ```text
/// Waiting ──(host starts)──→ Playing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    /// Lobby open, players may join.
    #[default]
    Waiting,
    /// Game running, joins are rejected.
    Playing,
}

impl RoomStatus {
    /// Returns `true` if new players may join.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => f.write_str("waiting"),
            Self::Playing => f.write_str("playing"),
        }
    }
}

/// What the shared game-state row says the table is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Waiting for the current player to roll.
    #[default]
    Roll,
    /// A card is on the table, waiting for an answer.
    Answer,
    /// Someone reached the end square.
    Finished,
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A row of the `rooms` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: RoomId,
    pub room_code: RoomCode,
    pub host_name: String,
    pub status: RoomStatus,
    pub current_player_index: usize,
    pub winner_name: Option<String>,
}

/// A row of the `players` collection. `player_order` is the seat index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: PlayerId,
    pub room_id: RoomId,
    pub name: String,
    pub color: String,
    pub position: u32,
    pub player_order: usize,
}

/// The single shared game-state row of a room.
///
/// `current_card` holds codec-encoded bytes; the backend never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameStateRecord {
    pub room_id: RoomId,
    pub current_card: Option<Vec<u8>>,
    pub dice_value: Option<u8>,
    pub phase: GamePhase,
}

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

/// The three backend collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Rooms,
    Players,
    GameState,
}

/// Whether a row was created or modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
}

/// The new contents of a changed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "table", content = "row", rename_all = "snake_case")]
pub enum Record {
    Room(RoomRecord),
    Player(PlayerRecord),
    GameState(GameStateRecord),
}

impl Record {
    /// The collection this row belongs to.
    pub fn table(&self) -> Table {
        match self {
            Self::Room(_) => Table::Rooms,
            Self::Player(_) => Table::Players,
            Self::GameState(_) => Table::GameState,
        }
    }

    /// The room this row is scoped to.
    pub fn room_id(&self) -> RoomId {
        match self {
            Self::Room(room) => room.id,
            Self::Player(player) => player.room_id,
            Self::GameState(state) => state.room_id,
        }
    }
}

/// A push notification delivered on a room's change channel.
///
/// Subscribers treat it as a "something changed" signal and re-read the
/// full room snapshot; the payload is there for logging and cheap checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub record: Record,
}

impl ChangeEvent {
    pub fn insert(record: Record) -> Self {
        Self { kind: ChangeKind::Insert, record }
    }

    pub fn update(record: Record) -> Self {
        Self { kind: ChangeKind::Update, record }
    }

    pub fn room_id(&self) -> RoomId {
        self.record.room_id()
    }
}

// =========================================================================
// Tests
// =========================================================================
