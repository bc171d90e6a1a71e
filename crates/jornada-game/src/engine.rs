//! The turn engine: roll → draw → resolve → advance, one player at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Board, Card, CardKind, ContentPack, Deck, Entrant, GameConfig, GameError, GameRng, Player,
    RandomSource,
};

// ---------------------------------------------------------------------------
// TurnPhase
// ---------------------------------------------------------------------------

/// Where the engine is within the current turn.
///
/// ```text
/// Rolling → Resolving → Advancing → Rolling …
///                           └──────→ Won (terminal)
/// ```
///
/// - **Rolling**: waiting for the active player to roll.
/// - **Resolving**: a die value and a card are on the table, waiting for an
///   answer or a challenge result.
/// - **Advancing**: bookkeeping between turns. Never observable from the
///   outside; the resolving operations pass through it before returning.
/// - **Won**: somebody reached the end square. Nothing moves any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Rolling,
    Resolving,
    Advancing,
    Won,
}

impl TurnPhase {
    /// The phase that normally follows this one. `Advancing` may also go to
    /// `Won`, see [`TurnPhase::can_transition_to`].
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Rolling => Some(Self::Resolving),
            Self::Resolving => Some(Self::Advancing),
            Self::Advancing => Some(Self::Rolling),
            Self::Won => None,
        }
    }

    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target) || (self == Self::Advancing && target == Self::Won)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rolling => write!(f, "Rolling"),
            Self::Resolving => write!(f, "Resolving"),
            Self::Advancing => write!(f, "Advancing"),
            Self::Won => write!(f, "Won"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What a successful roll put on the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub player: usize,
    pub dice: u8,
    pub card: Card,
}

/// How a turn resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Seat that played the turn.
    pub player: usize,
    /// Correct answer or completed challenge.
    pub success: bool,
    pub dice: u8,
    pub from: u32,
    pub to: u32,
    /// The new difficulty level, if this turn raised it.
    pub level_up: Option<u8>,
    /// Set when this turn reached the end square.
    pub winner: Option<usize>,
    /// Seat whose turn it is now. Equals `player` once the game is won.
    pub next_player: usize,
}

// ---------------------------------------------------------------------------
// TurnEngine
// ---------------------------------------------------------------------------

/// One game session: the players, the deck, and whose turn it is.
///
/// Every operation runs to completion before returning, and a failing
/// operation leaves the engine untouched.
#[derive(Debug, Clone)]
pub struct TurnEngine<R: RandomSource = GameRng> {
    config: GameConfig,
    board: Board,
    players: Vec<Player>,
    deck: Deck,
    rng: R,
    phase: TurnPhase,
    current_player: usize,
    dice_value: Option<u8>,
    current_card: Option<Card>,
    winner: Option<usize>,
}

impl<R: RandomSource> TurnEngine<R> {
    /// Seats the entrants in order and puts everyone on the start square.
    ///
    /// # Errors
    /// [`GameError::Validation`] for an invalid config, a blank name, or a
    /// player count outside `min_players..=max_players`;
    /// [`GameError::InvalidContent`] for an inconsistent content pack.
    pub fn new(
        config: GameConfig,
        entrants: Vec<Entrant>,
        content: ContentPack,
        rng: R,
    ) -> Result<Self, GameError> {
        config.validate()?;
        content.validate()?;

        if entrants.len() < config.min_players || entrants.len() > config.max_players {
            return Err(GameError::Validation(format!(
                "need between {} and {} players, got {}",
                config.min_players,
                config.max_players,
                entrants.len()
            )));
        }
        if let Some(seat) = entrants.iter().position(|e| e.name.trim().is_empty()) {
            return Err(GameError::Validation(format!("player {} has no name", seat + 1)));
        }

        let players: Vec<Player> = entrants
            .into_iter()
            .enumerate()
            .map(|(seat, entrant)| Player::seated(entrant, seat))
            .collect();

        tracing::info!(
            players = players.len(),
            track_length = config.track_length,
            "game session created"
        );

        Ok(Self {
            board: Board::new(config.track_length),
            config,
            players,
            deck: Deck::new(content),
            rng,
            phase: TurnPhase::Rolling,
            current_player: 0,
            dice_value: None,
            current_card: None,
            winner: None,
        })
    }

    // -- Accessors ---------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Seat index of the active player (the winner, once the game is won).
    pub fn current_player_index(&self) -> usize {
        self.current_player
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player]
    }

    pub fn dice_value(&self) -> Option<u8> {
        self.dice_value
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current_card.as_ref()
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|seat| &self.players[seat])
    }

    pub fn winner_index(&self) -> Option<usize> {
        self.winner
    }

    /// Card kind the active player draws on their next roll.
    pub fn next_card_kind(&self) -> CardKind {
        self.current_player().card_rotation
    }

    // -- Operations --------------------------------------------------------

    /// Rolls the die for the active player and draws their card.
    ///
    /// # Errors
    /// [`GameError::GameOver`] after a win, [`GameError::InvalidPhase`] if a
    /// card is already on the table, [`GameError::EmptyPool`] if the deck
    /// has nothing to offer (the turn stays in `Rolling`).
    pub fn roll(&mut self) -> Result<RollOutcome, GameError> {
        self.ensure_phase(TurnPhase::Rolling)?;

        // Draw before rolling: an empty pool must not consume a die roll.
        let player = &self.players[self.current_player];
        let card = self
            .deck
            .draw(player.card_rotation, player.difficulty_level, &mut self.rng)?;
        let dice = self.rng.roll_die(self.config.dice_sides);

        tracing::debug!(
            player = %player.name,
            dice,
            kind = %card.kind(),
            level = player.difficulty_level,
            "rolled"
        );

        self.dice_value = Some(dice);
        self.current_card = Some(card.clone());
        self.transition(TurnPhase::Resolving);

        Ok(RollOutcome {
            player: self.current_player,
            dice,
            card,
        })
    }

    /// Answers the question on the table with option `index`.
    ///
    /// Any index other than the correct one, including out-of-range ones,
    /// counts as a wrong answer.
    ///
    /// # Errors
    /// [`GameError::CardMismatch`] if the card is a challenge, plus the
    /// phase errors of [`TurnEngine::roll`].
    pub fn submit_answer(&mut self, index: usize) -> Result<TurnOutcome, GameError> {
        self.ensure_phase(TurnPhase::Resolving)?;
        let correct = match &self.current_card {
            Some(Card::Question { correct_index, .. }) => index == *correct_index,
            Some(card) => return Err(GameError::CardMismatch(card.kind())),
            None => return Err(self.phase_error(TurnPhase::Resolving)),
        };
        Ok(self.resolve(correct, true))
    }

    /// Reports whether the player completed the challenge on the table.
    ///
    /// # Errors
    /// [`GameError::CardMismatch`] if the card is a question, plus the
    /// phase errors of [`TurnEngine::roll`].
    pub fn submit_challenge_result(&mut self, completed: bool) -> Result<TurnOutcome, GameError> {
        self.ensure_phase(TurnPhase::Resolving)?;
        match &self.current_card {
            Some(Card::Challenge { .. }) => {}
            Some(card) => return Err(GameError::CardMismatch(card.kind())),
            None => return Err(self.phase_error(TurnPhase::Resolving)),
        }
        Ok(self.resolve(completed, false))
    }

    /// Starts over with the same players: everyone back on the start square
    /// at level 1, question history cleared, first seat to roll.
    pub fn restart(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.deck.reset();
        self.phase = TurnPhase::Rolling;
        self.current_player = 0;
        self.dice_value = None;
        self.current_card = None;
        self.winner = None;
        tracing::info!(players = self.players.len(), "game restarted");
    }

    // -- Internals ---------------------------------------------------------

    fn ensure_phase(&self, expected: TurnPhase) -> Result<(), GameError> {
        if self.phase == TurnPhase::Won {
            let winner = self.winner().map(|p| p.name.clone()).unwrap_or_default();
            return Err(GameError::GameOver { winner });
        }
        if self.phase != expected {
            return Err(self.phase_error(expected));
        }
        Ok(())
    }

    fn phase_error(&self, expected: TurnPhase) -> GameError {
        GameError::InvalidPhase {
            expected,
            actual: self.phase,
        }
    }

    fn transition(&mut self, target: TurnPhase) {
        debug_assert!(
            self.phase.can_transition_to(target),
            "illegal transition {} → {}",
            self.phase,
            target
        );
        self.phase = target;
    }

    /// Applies the result of the card on the table, then advances the turn.
    fn resolve(&mut self, success: bool, answered_question: bool) -> TurnOutcome {
        let seat = self.current_player;
        let dice = self.dice_value.unwrap_or(0);
        let track_length = self.config.track_length;
        let level_up_streak = self.config.level_up_streak;
        let max_level = self.config.max_level;

        let player = &mut self.players[seat];
        let from = player.position;
        let mut level_up = None;

        if success {
            player.position = from.saturating_add(u32::from(dice)).min(track_length);

            if answered_question {
                player.correct_answers_streak += 1;
                if player.correct_answers_streak >= level_up_streak
                    && player.difficulty_level < max_level
                {
                    player.difficulty_level += 1;
                    player.correct_answers_streak = 0;
                    level_up = Some(player.difficulty_level);
                    tracing::info!(
                        player = %player.name,
                        level = player.difficulty_level,
                        "difficulty level raised"
                    );
                }
            }
        }

        let to = player.position;
        tracing::debug!(player = %player.name, success, from, to, "turn resolved");

        if to == track_length {
            self.winner = Some(seat);
            tracing::info!(player = %player.name, "winner declared");
        }

        self.transition(TurnPhase::Advancing);
        self.advance();

        TurnOutcome {
            player: seat,
            success,
            dice,
            from,
            to,
            level_up,
            winner: self.winner,
            next_player: self.current_player,
        }
    }

    /// Rotates the active player's card kind, clears the table, and hands the
    /// turn on unless someone has won.
    fn advance(&mut self) {
        let player = &mut self.players[self.current_player];
        player.card_rotation = player.card_rotation.next();

        self.dice_value = None;
        self.current_card = None;

        if self.winner.is_some() {
            self.transition(TurnPhase::Won);
        } else {
            self.current_player = (self.current_player + 1) % self.players.len();
            self.transition(TurnPhase::Rolling);
        }
    }
}

impl TurnEngine<GameRng> {
    /// A session with the built-in content and a seeded RNG.
    pub fn with_seed(
        config: GameConfig,
        entrants: Vec<Entrant>,
        seed: u64,
    ) -> Result<Self, GameError> {
        Self::new(config, entrants, ContentPack::builtin(), GameRng::new(seed))
    }
}
