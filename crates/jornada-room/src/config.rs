//! Room configuration.

use serde::{Deserialize, Serialize};

/// Settings for the room layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Fewest players the host can start a game with.
    pub min_players: usize,

    /// Seats per room. Joining a room that already has this many fails.
    pub max_players: usize,

    /// How many fresh codes `create_room` tries before giving up on
    /// collisions.
    pub code_attempts: u32,

    /// Command channel size of the in-memory store actor.
    pub channel_size: usize,

    /// Buffered change events per room before slow subscribers lag.
    pub event_capacity: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 8,
            code_attempts: 8,
            channel_size: 64,
            event_capacity: 64,
        }
    }
}
