//! Online play: a turn engine whose every transition is written to the
//! store, so that subscribers see the game move.

use jornada_game::{
    ContentPack, Entrant, GameConfig, GameRng, RandomSource, RollOutcome, TurnEngine, TurnOutcome,
};
use jornada_protocol::{
    Codec, GamePhase, GameStateRecord, JsonCodec, PlayerId, PlayerRecord, RoomId, RoomRecord,
    RoomStatus,
};

use crate::{RoomError, RoomStore};

/// Drives a started room.
///
/// Seats come from the room's players in `player_order`. Actions name the
/// acting player; anyone other than the player on turn gets
/// [`RoomError::NotYourTurn`] and nothing changes.
///
/// If a store write fails after the engine already moved, the store lags
/// behind until [`OnlineGame::resync`] succeeds.
pub struct OnlineGame<S: RoomStore, R: RandomSource = GameRng> {
    store: S,
    room_id: RoomId,
    seats: Vec<PlayerRecord>,
    engine: TurnEngine<R>,
    codec: JsonCodec,
}

impl<S: RoomStore, R: RandomSource> OnlineGame<S, R> {
    /// Builds the engine for a room that has been started and writes the
    /// opening state (everyone on the start square, seat 0 to roll).
    ///
    /// # Errors
    /// [`RoomError::NotFound`] for an unknown room, [`RoomError::Validation`]
    /// if it is still waiting, [`RoomError::Game`] if the seats do not make
    /// a valid session.
    pub async fn start(
        store: S,
        room_id: RoomId,
        config: GameConfig,
        content: ContentPack,
        rng: R,
    ) -> Result<Self, RoomError> {
        let room = store
            .room(room_id)
            .await?
            .ok_or_else(|| RoomError::NotFound(room_id.to_string()))?;
        if room.status != RoomStatus::Playing {
            return Err(RoomError::Validation(format!(
                "room {} has not started",
                room.room_code
            )));
        }

        let seats = store.players(room_id).await?;
        let entrants = seats.iter().map(|p| Entrant::new(p.name.clone())).collect();
        let engine = TurnEngine::new(config, entrants, content, rng)?;

        let mut game = Self {
            store,
            room_id,
            seats,
            engine,
            codec: JsonCodec,
        };
        game.resync().await?;

        tracing::info!(
            room_code = %room.room_code,
            players = game.seats.len(),
            "online game started"
        );
        Ok(game)
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn engine(&self) -> &TurnEngine<R> {
        &self.engine
    }

    pub fn seats(&self) -> &[PlayerRecord] {
        &self.seats
    }

    /// The seat index of `player`, if they are in this game.
    pub fn seat_of(&self, player: PlayerId) -> Option<usize> {
        self.seats.iter().position(|p| p.id == player)
    }

    /// The player on turn (the winner, once the game is over).
    pub fn current_player(&self) -> &PlayerRecord {
        &self.seats[self.engine.current_player_index()]
    }

    /// Rolls for `player` and puts the drawn card on the shared table.
    pub async fn roll(&mut self, player: PlayerId) -> Result<RollOutcome, RoomError> {
        self.ensure_turn(player)?;
        let outcome = self.engine.roll()?;

        let card = self.codec.encode(&outcome.card)?;
        self.store
            .update_game_state(GameStateRecord {
                room_id: self.room_id,
                current_card: Some(card),
                dice_value: Some(outcome.dice),
                phase: GamePhase::Answer,
            })
            .await?;

        tracing::debug!(room_id = %self.room_id, %player, dice = outcome.dice, "roll mirrored");
        Ok(outcome)
    }

    pub async fn submit_answer(
        &mut self,
        player: PlayerId,
        index: usize,
    ) -> Result<TurnOutcome, RoomError> {
        self.ensure_turn(player)?;
        let outcome = self.engine.submit_answer(index)?;
        self.mirror_turn(&outcome).await?;
        Ok(outcome)
    }

    pub async fn submit_challenge_result(
        &mut self,
        player: PlayerId,
        completed: bool,
    ) -> Result<TurnOutcome, RoomError> {
        self.ensure_turn(player)?;
        let outcome = self.engine.submit_challenge_result(completed)?;
        self.mirror_turn(&outcome).await?;
        Ok(outcome)
    }

    /// Starts the same seats over and writes the reset state.
    pub async fn restart(&mut self) -> Result<(), RoomError> {
        self.engine.restart();
        self.resync().await?;
        tracing::info!(room_id = %self.room_id, "online game restarted");
        Ok(())
    }

    /// Writes the engine's full state to the store: every seat's position,
    /// the turn and winner on the room, and the table.
    pub async fn resync(&mut self) -> Result<(), RoomError> {
        for (seat, player) in self.seats.iter_mut().zip(self.engine.players()) {
            seat.position = player.position;
            self.store.update_player(seat.clone()).await?;
        }
        self.write_room().await?;

        let (current_card, dice_value) = match self.engine.current_card() {
            Some(card) => (Some(self.codec.encode(card)?), self.engine.dice_value()),
            None => (None, None),
        };
        self.store
            .update_game_state(GameStateRecord {
                room_id: self.room_id,
                current_card,
                dice_value,
                phase: self.table_phase(),
            })
            .await
    }

    fn ensure_turn(&self, player: PlayerId) -> Result<(), RoomError> {
        // After a win the engine itself answers with GameOver.
        if self.engine.phase().is_terminal() {
            return Ok(());
        }
        if self.current_player().id != player {
            tracing::warn!(
                room_id = %self.room_id,
                %player,
                on_turn = %self.current_player().id,
                "action rejected, not this player's turn"
            );
            return Err(RoomError::NotYourTurn(player));
        }
        Ok(())
    }

    async fn mirror_turn(&mut self, outcome: &TurnOutcome) -> Result<(), RoomError> {
        if outcome.to != outcome.from {
            let seat = &mut self.seats[outcome.player];
            seat.position = outcome.to;
            self.store.update_player(seat.clone()).await?;
        }

        self.write_room().await?;
        self.store
            .update_game_state(GameStateRecord {
                room_id: self.room_id,
                current_card: None,
                dice_value: None,
                phase: self.table_phase(),
            })
            .await?;

        if let Some(winner) = outcome.winner {
            tracing::info!(
                room_id = %self.room_id,
                winner = %self.seats[winner].name,
                "winner declared"
            );
        }
        Ok(())
    }

    /// Re-reads the room row and updates turn and winner on it.
    async fn write_room(&self) -> Result<(), RoomError> {
        let mut room: RoomRecord = self
            .store
            .room(self.room_id)
            .await?
            .ok_or_else(|| RoomError::NotFound(self.room_id.to_string()))?;
        room.current_player_index = self.engine.current_player_index();
        room.winner_name = self.engine.winner().map(|p| p.name.clone());
        self.store.update_room(room).await
    }

    fn table_phase(&self) -> GamePhase {
        if self.engine.phase().is_terminal() {
            GamePhase::Finished
        } else if self.engine.current_card().is_some() {
            GamePhase::Answer
        } else {
            GamePhase::Roll
        }
    }
}
