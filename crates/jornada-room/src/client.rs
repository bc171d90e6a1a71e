//! Room client: lobby operations against a [`RoomStore`].

use jornada_game::PLAYER_COLORS;
use jornada_protocol::{
    GamePhase, GameStateRecord, PlayerRecord, ProtocolError, RoomCode, RoomId, RoomRecord,
    RoomStatus,
};
use rand::Rng;

use crate::{
    NewPlayer, NewRoom, RoomConfig, RoomError, RoomSnapshot, RoomStore, RoomSubscription,
};

/// A room together with the caller's own seat in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMembership {
    pub room: RoomRecord,
    pub player: PlayerRecord,
}

/// Generates a random room code from [`RoomCode::ALPHABET`].
pub fn generate_room_code<R: Rng + ?Sized>(rng: &mut R) -> Result<RoomCode, ProtocolError> {
    let code: String = (0..RoomCode::LEN)
        .map(|_| {
            let index = rng.random_range(0..RoomCode::ALPHABET.len());
            char::from(RoomCode::ALPHABET[index])
        })
        .collect();
    RoomCode::parse(&code)
}

/// Creates, joins, and starts rooms.
///
/// Stateless apart from the store handle and config; clone it freely.
#[derive(Debug, Clone)]
pub struct RoomClient<S: RoomStore> {
    store: S,
    config: RoomConfig,
}

impl<S: RoomStore> RoomClient<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, RoomConfig::default())
    }

    pub fn with_config(store: S, config: RoomConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Opens a new room with `host_name` in seat 0.
    ///
    /// Inserts the room (`waiting`), the host, and the initial game state
    /// (`roll` phase). A code collision is retried with a fresh code up to
    /// `code_attempts` times.
    pub async fn create_room(&self, host_name: &str) -> Result<RoomMembership, RoomError> {
        let host_name = validate_name(host_name)?;

        let mut attempts = 0;
        let room = loop {
            attempts += 1;
            let room_code = generate_room_code(&mut rand::rng())?;
            let new = NewRoom {
                room_code,
                host_name: host_name.clone(),
                status: RoomStatus::Waiting,
            };
            match self.store.insert_room(new).await {
                Ok(room) => break room,
                Err(RoomError::CodeTaken(code)) if attempts < self.config.code_attempts => {
                    tracing::debug!(%code, attempts, "room code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        };

        let player = self
            .store
            .insert_player(NewPlayer {
                room_id: room.id,
                name: host_name,
                color: seat_color(0),
                player_order: 0,
            })
            .await?;

        self.store
            .insert_game_state(GameStateRecord {
                room_id: room.id,
                current_card: None,
                dice_value: None,
                phase: GamePhase::Roll,
            })
            .await?;

        tracing::info!(
            room_code = %room.room_code,
            room_id = %room.id,
            host = %player.name,
            "room created"
        );
        Ok(RoomMembership { room, player })
    }

    /// Takes the next free seat in the room with `code`.
    ///
    /// The code is trimmed and upper-cased first.
    ///
    /// # Errors
    /// [`RoomError::NotFound`], then [`RoomError::AlreadyStarted`], then
    /// [`RoomError::RoomFull`]; no player is inserted in any of those cases.
    pub async fn join_room(&self, code: &str, name: &str) -> Result<RoomMembership, RoomError> {
        let name = validate_name(name)?;
        let code = RoomCode::parse(code)?;

        let room = self
            .store
            .room_by_code(&code)
            .await?
            .ok_or_else(|| RoomError::NotFound(code.to_string()))?;

        if !room.status.is_joinable() {
            tracing::warn!(room_code = %code, player = %name, "join rejected, already started");
            return Err(RoomError::AlreadyStarted(code));
        }

        let seats = self.store.players(room.id).await?.len();
        if seats >= self.config.max_players {
            tracing::warn!(room_code = %code, player = %name, seats, "join rejected, room full");
            return Err(RoomError::RoomFull(code));
        }

        let player = self
            .store
            .insert_player(NewPlayer {
                room_id: room.id,
                name,
                color: seat_color(seats),
                player_order: seats,
            })
            .await?;

        tracing::info!(room_code = %code, player = %player.name, seat = seats, "player joined");
        Ok(RoomMembership { room, player })
    }

    /// Overwrites the room's lifecycle status.
    pub async fn set_room_status(
        &self,
        room_id: RoomId,
        status: RoomStatus,
    ) -> Result<(), RoomError> {
        let mut room = self.room(room_id).await?;
        room.status = status;
        self.store.update_room(room).await?;
        tracing::info!(%room_id, %status, "room status changed");
        Ok(())
    }

    /// Moves a waiting room to `playing`.
    ///
    /// # Errors
    /// [`RoomError::AlreadyStarted`] if it is already playing,
    /// [`RoomError::NotEnoughPlayers`] below `min_players`.
    pub async fn start_game(&self, room_id: RoomId) -> Result<(), RoomError> {
        let room = self.room(room_id).await?;
        if !room.status.is_joinable() {
            return Err(RoomError::AlreadyStarted(room.room_code));
        }

        let actual = self.store.players(room_id).await?.len();
        if actual < self.config.min_players {
            return Err(RoomError::NotEnoughPlayers {
                needed: self.config.min_players,
                actual,
            });
        }

        self.set_room_status(room_id, RoomStatus::Playing).await?;
        tracing::info!(room_code = %room.room_code, players = actual, "game started");
        Ok(())
    }

    /// Reads the room, its players in seat order, and its game state.
    pub async fn snapshot(&self, room_id: RoomId) -> Result<RoomSnapshot, RoomError> {
        RoomSnapshot::fetch(&self.store, room_id).await
    }

    /// Subscribes to the room's change feed.
    pub async fn subscribe(&self, room_id: RoomId) -> Result<RoomSubscription<S>, RoomError> {
        RoomSubscription::open(self.store.clone(), room_id).await
    }

    async fn room(&self, room_id: RoomId) -> Result<RoomRecord, RoomError> {
        self.store
            .room(room_id)
            .await?
            .ok_or_else(|| RoomError::NotFound(room_id.to_string()))
    }
}

fn validate_name(name: &str) -> Result<String, RoomError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RoomError::Validation("player name must not be blank".into()));
    }
    Ok(name.to_string())
}

fn seat_color(seat: usize) -> String {
    PLAYER_COLORS[seat % PLAYER_COLORS.len()].to_string()
}
