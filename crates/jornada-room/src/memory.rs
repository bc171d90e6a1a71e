//! In-memory store: an actor task that owns the tables.
//!
//! Callers hold a [`MemoryStore`] handle; every call becomes a command on
//! the actor's channel with a oneshot reply. Because one task applies all
//! commands in order, each room's change feed sees writes in the order they
//! happened.

use std::collections::HashMap;

use jornada_protocol::{
    ChangeEvent, GameStateRecord, PlayerId, PlayerRecord, Record, RoomCode, RoomId, RoomRecord,
};
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{NewPlayer, NewRoom, RoomConfig, RoomError, RoomStore};

type Reply<T> = oneshot::Sender<Result<T, RoomError>>;

enum StoreCommand {
    InsertRoom {
        room: NewRoom,
        reply: Reply<RoomRecord>,
    },
    GetRoom {
        room_id: RoomId,
        reply: Reply<Option<RoomRecord>>,
    },
    FindRoom {
        code: RoomCode,
        reply: Reply<Option<RoomRecord>>,
    },
    UpdateRoom {
        room: RoomRecord,
        reply: Reply<()>,
    },
    InsertPlayer {
        player: NewPlayer,
        reply: Reply<PlayerRecord>,
    },
    ListPlayers {
        room_id: RoomId,
        reply: Reply<Vec<PlayerRecord>>,
    },
    UpdatePlayer {
        player: PlayerRecord,
        reply: Reply<()>,
    },
    InsertGameState {
        state: GameStateRecord,
        reply: Reply<()>,
    },
    GetGameState {
        room_id: RoomId,
        reply: Reply<Option<GameStateRecord>>,
    },
    UpdateGameState {
        state: GameStateRecord,
        reply: Reply<()>,
    },
    Subscribe {
        room_id: RoomId,
        reply: Reply<broadcast::Receiver<ChangeEvent>>,
    },
}

/// Handle to an in-memory store actor.
///
/// Cheap to clone. The actor stops once every handle is dropped.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    sender: mpsc::Sender<StoreCommand>,
}

impl MemoryStore {
    /// Spawns a store actor with the default channel sizes.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(&RoomConfig::default())
    }

    /// Spawns a store actor sized by `config.channel_size` and
    /// `config.event_capacity`.
    pub fn with_config(config: &RoomConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_size.max(1));
        let actor = StoreActor {
            rooms: HashMap::new(),
            codes: HashMap::new(),
            players: HashMap::new(),
            game_states: HashMap::new(),
            feeds: HashMap::new(),
            next_room_id: 1,
            next_player_id: 1,
            event_capacity: config.event_capacity.max(1),
            receiver: rx,
        };
        tokio::spawn(actor.run());
        Self { sender: tx }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> StoreCommand,
    ) -> Result<T, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| RoomError::Unavailable)?;
        reply_rx.await.map_err(|_| RoomError::Unavailable)?
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomStore for MemoryStore {
    async fn insert_room(&self, room: NewRoom) -> Result<RoomRecord, RoomError> {
        self.request(|reply| StoreCommand::InsertRoom { room, reply }).await
    }

    async fn room(&self, room_id: RoomId) -> Result<Option<RoomRecord>, RoomError> {
        self.request(|reply| StoreCommand::GetRoom { room_id, reply }).await
    }

    async fn room_by_code(&self, code: &RoomCode) -> Result<Option<RoomRecord>, RoomError> {
        let code = code.clone();
        self.request(|reply| StoreCommand::FindRoom { code, reply }).await
    }

    async fn update_room(&self, room: RoomRecord) -> Result<(), RoomError> {
        self.request(|reply| StoreCommand::UpdateRoom { room, reply }).await
    }

    async fn insert_player(&self, player: NewPlayer) -> Result<PlayerRecord, RoomError> {
        self.request(|reply| StoreCommand::InsertPlayer { player, reply }).await
    }

    async fn players(&self, room_id: RoomId) -> Result<Vec<PlayerRecord>, RoomError> {
        self.request(|reply| StoreCommand::ListPlayers { room_id, reply }).await
    }

    async fn update_player(&self, player: PlayerRecord) -> Result<(), RoomError> {
        self.request(|reply| StoreCommand::UpdatePlayer { player, reply }).await
    }

    async fn insert_game_state(&self, state: GameStateRecord) -> Result<(), RoomError> {
        self.request(|reply| StoreCommand::InsertGameState { state, reply }).await
    }

    async fn game_state(&self, room_id: RoomId) -> Result<Option<GameStateRecord>, RoomError> {
        self.request(|reply| StoreCommand::GetGameState { room_id, reply }).await
    }

    async fn update_game_state(&self, state: GameStateRecord) -> Result<(), RoomError> {
        self.request(|reply| StoreCommand::UpdateGameState { state, reply }).await
    }

    async fn subscribe(
        &self,
        room_id: RoomId,
    ) -> Result<broadcast::Receiver<ChangeEvent>, RoomError> {
        self.request(|reply| StoreCommand::Subscribe { room_id, reply }).await
    }
}

/// The actor's state. Runs inside a Tokio task.
struct StoreActor {
    rooms: HashMap<RoomId, RoomRecord>,
    codes: HashMap<RoomCode, RoomId>,
    /// Kept sorted by `player_order`.
    players: HashMap<RoomId, Vec<PlayerRecord>>,
    game_states: HashMap<RoomId, GameStateRecord>,
    feeds: HashMap<RoomId, broadcast::Sender<ChangeEvent>>,
    next_room_id: u64,
    next_player_id: u64,
    event_capacity: usize,
    receiver: mpsc::Receiver<StoreCommand>,
}

impl StoreActor {
    async fn run(mut self) {
        tracing::debug!("memory store started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                StoreCommand::InsertRoom { room, reply } => {
                    let _ = reply.send(self.insert_room(room));
                }
                StoreCommand::GetRoom { room_id, reply } => {
                    let _ = reply.send(Ok(self.rooms.get(&room_id).cloned()));
                }
                StoreCommand::FindRoom { code, reply } => {
                    let room = self
                        .codes
                        .get(&code)
                        .and_then(|room_id| self.rooms.get(room_id))
                        .cloned();
                    let _ = reply.send(Ok(room));
                }
                StoreCommand::UpdateRoom { room, reply } => {
                    let _ = reply.send(self.update_room(room));
                }
                StoreCommand::InsertPlayer { player, reply } => {
                    let _ = reply.send(self.insert_player(player));
                }
                StoreCommand::ListPlayers { room_id, reply } => {
                    let players = self.players.get(&room_id).cloned().unwrap_or_default();
                    let _ = reply.send(Ok(players));
                }
                StoreCommand::UpdatePlayer { player, reply } => {
                    let _ = reply.send(self.update_player(player));
                }
                StoreCommand::InsertGameState { state, reply } => {
                    let _ = reply.send(self.insert_game_state(state));
                }
                StoreCommand::GetGameState { room_id, reply } => {
                    let _ = reply.send(Ok(self.game_states.get(&room_id).cloned()));
                }
                StoreCommand::UpdateGameState { state, reply } => {
                    let _ = reply.send(self.update_game_state(state));
                }
                StoreCommand::Subscribe { room_id, reply } => {
                    let result = self
                        .feeds
                        .get(&room_id)
                        .map(broadcast::Sender::subscribe)
                        .ok_or_else(|| RoomError::NotFound(room_id.to_string()));
                    let _ = reply.send(result);
                }
            }
        }

        tracing::debug!(rooms = self.rooms.len(), "memory store stopped");
    }

    fn insert_room(&mut self, new: NewRoom) -> Result<RoomRecord, RoomError> {
        if self.codes.contains_key(&new.room_code) {
            return Err(RoomError::CodeTaken(new.room_code));
        }

        let room = RoomRecord {
            id: RoomId(self.next_room_id),
            room_code: new.room_code,
            host_name: new.host_name,
            status: new.status,
            current_player_index: 0,
            winner_name: None,
        };
        self.next_room_id += 1;

        self.codes.insert(room.room_code.clone(), room.id);
        self.rooms.insert(room.id, room.clone());
        let (feed, _) = broadcast::channel(self.event_capacity);
        self.feeds.insert(room.id, feed);

        self.publish(ChangeEvent::insert(Record::Room(room.clone())));
        Ok(room)
    }

    fn update_room(&mut self, room: RoomRecord) -> Result<(), RoomError> {
        let existing = self
            .rooms
            .get_mut(&room.id)
            .ok_or_else(|| RoomError::NotFound(room.id.to_string()))?;
        if existing.room_code != room.room_code {
            return Err(RoomError::Validation(format!(
                "room code of {} cannot change",
                room.id
            )));
        }
        *existing = room.clone();
        self.publish(ChangeEvent::update(Record::Room(room)));
        Ok(())
    }

    fn insert_player(&mut self, new: NewPlayer) -> Result<PlayerRecord, RoomError> {
        if !self.rooms.contains_key(&new.room_id) {
            return Err(RoomError::NotFound(new.room_id.to_string()));
        }

        let player = PlayerRecord {
            id: PlayerId(self.next_player_id),
            room_id: new.room_id,
            name: new.name,
            color: new.color,
            position: 0,
            player_order: new.player_order,
        };
        self.next_player_id += 1;

        let seats = self.players.entry(player.room_id).or_default();
        seats.push(player.clone());
        seats.sort_by_key(|p| p.player_order);

        self.publish(ChangeEvent::insert(Record::Player(player.clone())));
        Ok(player)
    }

    fn update_player(&mut self, player: PlayerRecord) -> Result<(), RoomError> {
        let existing = self
            .players
            .get_mut(&player.room_id)
            .and_then(|seats| seats.iter_mut().find(|p| p.id == player.id))
            .ok_or_else(|| {
                RoomError::Validation(format!("no player {} in room {}", player.id, player.room_id))
            })?;
        *existing = player.clone();
        if let Some(seats) = self.players.get_mut(&player.room_id) {
            seats.sort_by_key(|p| p.player_order);
        }
        self.publish(ChangeEvent::update(Record::Player(player)));
        Ok(())
    }

    fn insert_game_state(&mut self, state: GameStateRecord) -> Result<(), RoomError> {
        if !self.rooms.contains_key(&state.room_id) {
            return Err(RoomError::NotFound(state.room_id.to_string()));
        }
        if self.game_states.contains_key(&state.room_id) {
            return Err(RoomError::Validation(format!(
                "room {} already has a game state",
                state.room_id
            )));
        }
        self.game_states.insert(state.room_id, state.clone());
        self.publish(ChangeEvent::insert(Record::GameState(state)));
        Ok(())
    }

    fn update_game_state(&mut self, state: GameStateRecord) -> Result<(), RoomError> {
        let existing = self
            .game_states
            .get_mut(&state.room_id)
            .ok_or_else(|| RoomError::NotFound(state.room_id.to_string()))?;
        *existing = state.clone();
        self.publish(ChangeEvent::update(Record::GameState(state)));
        Ok(())
    }

    /// Delivers to current subscribers. Having none is fine.
    fn publish(&self, event: ChangeEvent) {
        if let Some(feed) = self.feeds.get(&event.room_id()) {
            let _ = feed.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use jornada_protocol::{ChangeKind, GamePhase, RoomStatus, Table};

    use super::*;

    fn new_room(code: &str) -> NewRoom {
        NewRoom {
            room_code: RoomCode::parse(code).unwrap(),
            host_name: "Ana".into(),
            status: RoomStatus::Waiting,
        }
    }

    fn new_player(room_id: RoomId, name: &str, order: usize) -> NewPlayer {
        NewPlayer {
            room_id,
            name: name.into(),
            color: "#EF4444".into(),
            player_order: order,
        }
    }

    #[tokio::test]
    async fn test_insert_room_assigns_ids_and_finds_by_code() {
        let store = MemoryStore::new();
        let first = store.insert_room(new_room("AAAAAA")).await.unwrap();
        let second = store.insert_room(new_room("BBBBBB")).await.unwrap();
        assert_ne!(first.id, second.id);

        let found = store
            .room_by_code(&RoomCode::parse("bbbbbb").unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(second));
    }

    #[tokio::test]
    async fn test_insert_room_duplicate_code_is_rejected() {
        let store = MemoryStore::new();
        store.insert_room(new_room("ABC123")).await.unwrap();
        let result = store.insert_room(new_room("ABC123")).await;
        assert!(matches!(result, Err(RoomError::CodeTaken(_))));
    }

    #[tokio::test]
    async fn test_players_come_back_in_seat_order() {
        let store = MemoryStore::new();
        let room = store.insert_room(new_room("ABC123")).await.unwrap();
        store.insert_player(new_player(room.id, "Caio", 2)).await.unwrap();
        store.insert_player(new_player(room.id, "Ana", 0)).await.unwrap();
        store.insert_player(new_player(room.id, "Bia", 1)).await.unwrap();

        let names: Vec<String> = store
            .players(room.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Ana", "Bia", "Caio"]);
    }

    #[tokio::test]
    async fn test_insert_player_into_missing_room_fails() {
        let store = MemoryStore::new();
        let result = store.insert_player(new_player(RoomId(99), "Ana", 0)).await;
        assert!(matches!(result, Err(RoomError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_game_state_fails() {
        let store = MemoryStore::new();
        let result = store
            .update_game_state(GameStateRecord {
                room_id: RoomId(5),
                ..GameStateRecord::default()
            })
            .await;
        assert!(matches!(result, Err(RoomError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_subscribe_sees_writes_in_order() {
        let store = MemoryStore::new();
        let room = store.insert_room(new_room("ABC123")).await.unwrap();
        let mut feed = store.subscribe(room.id).await.unwrap();

        store.insert_player(new_player(room.id, "Bia", 1)).await.unwrap();
        store
            .insert_game_state(GameStateRecord {
                room_id: room.id,
                phase: GamePhase::Roll,
                ..GameStateRecord::default()
            })
            .await
            .unwrap();
        let mut playing = room.clone();
        playing.status = RoomStatus::Playing;
        store.update_room(playing).await.unwrap();

        let first = feed.recv().await.unwrap();
        assert_eq!((first.kind, first.record.table()), (ChangeKind::Insert, Table::Players));
        let second = feed.recv().await.unwrap();
        assert_eq!(second.record.table(), Table::GameState);
        let third = feed.recv().await.unwrap();
        assert_eq!((third.kind, third.record.table()), (ChangeKind::Update, Table::Rooms));
    }

    #[tokio::test]
    async fn test_subscribe_is_scoped_to_one_room() {
        let store = MemoryStore::new();
        let mine = store.insert_room(new_room("AAAAAA")).await.unwrap();
        let other = store.insert_room(new_room("BBBBBB")).await.unwrap();
        let mut feed = store.subscribe(mine.id).await.unwrap();

        store.insert_player(new_player(other.id, "Eve", 0)).await.unwrap();
        store.insert_player(new_player(mine.id, "Ana", 0)).await.unwrap();

        let event = feed.recv().await.unwrap();
        assert_eq!(event.room_id(), mine.id);
    }

    #[tokio::test]
    async fn test_subscribe_to_missing_room_fails() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.subscribe(RoomId(1)).await,
            Err(RoomError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_room_code_cannot_change() {
        let store = MemoryStore::new();
        let mut room = store.insert_room(new_room("AAAAAA")).await.unwrap();
        room.room_code = RoomCode::parse("ZZZZZZ").unwrap();
        assert!(matches!(
            store.update_room(room).await,
            Err(RoomError::Validation(_))
        ));
    }
}
