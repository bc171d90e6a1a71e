//! Game rules for Jornada: the track, the card deck, and the turn engine.
//!
//! Everything here is synchronous and transport-free. The room layer drives
//! a [`TurnEngine`] the same way a local hot-seat session does, and mirrors
//! its state wherever it needs to.
//!
//! # Key types
//!
//! - [`Board`] / [`generate_board`]: the fixed track of squares
//! - [`Deck`]: picks questions and challenges from a [`ContentPack`]
//! - [`TurnEngine`]: roll → draw → resolve → advance, one player at a time
//! - [`RandomSource`]: every random choice goes through this seam
//! - [`GameConfig`]: track length, dice, progression, seat limits

mod board;
mod card;
mod config;
mod content;
mod deck;
mod engine;
mod error;
mod player;
mod rng;

pub use board::{Board, BoardSquare, END_LABEL, START_LABEL, SquareType, generate_board};
pub use card::{
    BIBLICAL_EXCLUDED_KEYWORDS, Card, CardKind, ChallengeCategory, INSTITUTIONAL_KEYWORDS,
};
pub use config::GameConfig;
pub use content::{ContentPack, MAX_DIFFICULTY, Question};
pub use deck::{Deck, DeckState};
pub use engine::{RollOutcome, TurnEngine, TurnOutcome, TurnPhase};
pub use error::GameError;
pub use player::{Entrant, PLAYER_COLORS, Player};
pub use rng::{GameRng, RandomSource, ScriptedRandom};
