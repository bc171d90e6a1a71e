//! Room snapshots and change subscriptions.

use jornada_game::Card;
use jornada_protocol::{
    ChangeEvent, Codec, GameStateRecord, JsonCodec, PlayerId, PlayerRecord, RoomId, RoomRecord,
};
use tokio::sync::broadcast;

use crate::{RoomError, RoomStore};

/// Everything a client renders for one room, read in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub room: RoomRecord,
    /// Sorted by seat.
    pub players: Vec<PlayerRecord>,
    /// `None` only for rooms that were never fully created.
    pub game_state: Option<GameStateRecord>,
}

impl RoomSnapshot {
    pub async fn fetch<S: RoomStore>(store: &S, room_id: RoomId) -> Result<Self, RoomError> {
        let room = store
            .room(room_id)
            .await?
            .ok_or_else(|| RoomError::NotFound(room_id.to_string()))?;
        let players = store.players(room_id).await?;
        let game_state = store.game_state(room_id).await?;
        Ok(Self {
            room,
            players,
            game_state,
        })
    }

    /// The player whose turn the room says it is.
    pub fn current_player(&self) -> Option<&PlayerRecord> {
        self.players.get(self.room.current_player_index)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Decodes the card on the table, if any.
    pub fn current_card(&self) -> Result<Option<Card>, RoomError> {
        let bytes = self
            .game_state
            .as_ref()
            .and_then(|state| state.current_card.as_deref());
        match bytes {
            Some(bytes) => Ok(Some(JsonCodec.decode(bytes)?)),
            None => Ok(None),
        }
    }
}

/// One delivery from a [`RoomSubscription`].
#[derive(Debug, Clone)]
pub struct RoomUpdate {
    /// The change that woke the subscription. `None` after the receiver
    /// lagged and events were dropped.
    pub event: Option<ChangeEvent>,
    /// The room as it is now.
    pub snapshot: RoomSnapshot,
}

/// Follows a room: every change triggers a fresh [`RoomSnapshot`].
///
/// Events are signals, not diffs, so a subscriber that falls behind loses
/// nothing by skipping ahead.
pub struct RoomSubscription<S: RoomStore> {
    store: S,
    room_id: RoomId,
    receiver: broadcast::Receiver<ChangeEvent>,
}

impl<S: RoomStore> RoomSubscription<S> {
    pub async fn open(store: S, room_id: RoomId) -> Result<Self, RoomError> {
        let receiver = store.subscribe(room_id).await?;
        Ok(Self {
            store,
            room_id,
            receiver,
        })
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Waits for the next change and re-reads the room.
    ///
    /// Returns `Ok(None)` once the store closes the feed.
    pub async fn next(&mut self) -> Result<Option<RoomUpdate>, RoomError> {
        let event = match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(room_id = %self.room_id, skipped, "subscription lagged, refetching");
                None
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(None),
        };

        let snapshot = RoomSnapshot::fetch(&self.store, self.room_id).await?;
        Ok(Some(RoomUpdate { event, snapshot }))
    }
}

#[cfg(test)]
mod tests {
    use jornada_protocol::{ChangeKind, GamePhase, RoomStatus, Table};

    use super::*;
    use crate::{MemoryStore, RoomClient};

    #[tokio::test]
    async fn test_next_delivers_full_snapshot_on_join() {
        let client = RoomClient::new(MemoryStore::new());
        let created = client.create_room("Ana").await.unwrap();
        let mut subscription = client.subscribe(created.room.id).await.unwrap();

        client.join_room(created.room.room_code.as_str(), "Bia").await.unwrap();

        let update = subscription.next().await.unwrap().unwrap();
        let event = update.event.unwrap();
        assert_eq!((event.kind, event.record.table()), (ChangeKind::Insert, Table::Players));
        let names: Vec<&str> = update.snapshot.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bia"]);
    }

    #[tokio::test]
    async fn test_next_refetches_after_lag() {
        let store = MemoryStore::with_config(&crate::RoomConfig {
            event_capacity: 1,
            ..crate::RoomConfig::default()
        });
        let client = RoomClient::new(store);
        let created = client.create_room("Ana").await.unwrap();
        let mut subscription = client.subscribe(created.room.id).await.unwrap();

        client.join_room(created.room.room_code.as_str(), "Bia").await.unwrap();
        client.join_room(created.room.room_code.as_str(), "Caio").await.unwrap();
        client.start_game(created.room.id).await.unwrap();

        let update = subscription.next().await.unwrap().unwrap();
        assert!(update.event.is_none(), "older events were dropped");
        assert_eq!(update.snapshot.players.len(), 3);
        assert_eq!(update.snapshot.room.status, RoomStatus::Playing);
    }

    #[tokio::test]
    async fn test_snapshot_without_card() {
        let client = RoomClient::new(MemoryStore::new());
        let created = client.create_room("Ana").await.unwrap();
        let snapshot = client.snapshot(created.room.id).await.unwrap();

        assert_eq!(snapshot.current_player().map(|p| p.name.as_str()), Some("Ana"));
        assert_eq!(snapshot.current_card().unwrap(), None);
        assert_eq!(snapshot.game_state.unwrap().phase, GamePhase::Roll);
    }
}
