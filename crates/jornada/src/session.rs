//! Builder for local (hot-seat) game sessions.

use jornada_game::{ContentPack, Entrant, GameConfig, GameRng, TurnEngine};

use crate::JornadaError;

/// A local game: one engine, seeded randomness.
pub type LocalSession = TurnEngine<GameRng>;

/// Assembles a [`LocalSession`].
///
/// # Example
///
/// ```rust
/// use jornada::prelude::*;
///
/// let game = SessionBuilder::new()
///     .config(GameConfig { track_length: 20, ..GameConfig::default() })
///     .player("Ana")
///     .player_with_avatar("Bia", "dove")
///     .build()
///     .unwrap();
/// assert_eq!(game.players().len(), 2);
/// assert_eq!(game.board().end(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    config: GameConfig,
    content: ContentPack,
    seed: Option<u64>,
    entrants: Vec<Entrant>,
}

impl SessionBuilder {
    /// Default config, built-in content, entropy seed, no players.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            content: ContentPack::builtin(),
            seed: None,
            entrants: Vec::new(),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn content(mut self, content: ContentPack) -> Self {
        self.content = content;
        self
    }

    /// Fixes the seed so the session replays exactly.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seats a player. Seats are filled in call order.
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.entrants.push(Entrant::new(name));
        self
    }

    pub fn player_with_avatar(
        mut self,
        name: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        self.entrants.push(Entrant::new(name).with_avatar(avatar));
        self
    }

    pub fn players(mut self, entrants: impl IntoIterator<Item = Entrant>) -> Self {
        self.entrants.extend(entrants);
        self
    }

    /// Validates everything and seats the players.
    ///
    /// # Errors
    /// [`JornadaError::Game`] for a bad config, bad content, or a player
    /// list the config does not allow.
    pub fn build(self) -> Result<LocalSession, JornadaError> {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        tracing::info!(seed = rng.seed(), players = self.entrants.len(), "local session");
        Ok(TurnEngine::new(self.config, self.entrants, self.content, rng)?)
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use jornada_game::{GameError, TurnPhase};

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let game = SessionBuilder::new().player("Ana").player("Bia").build().unwrap();
        assert_eq!(game.phase(), TurnPhase::Rolling);
        assert_eq!(game.config(), &GameConfig::default());
        assert_eq!(game.board().end(), 30);
    }

    #[test]
    fn test_builder_without_players_fails() {
        let result = SessionBuilder::new().build();
        assert!(matches!(result, Err(JornadaError::Game(GameError::Validation(_)))));
    }

    #[test]
    fn test_builder_same_seed_same_first_roll() {
        let roll = |seed| {
            let mut game = SessionBuilder::new()
                .players([Entrant::new("Ana"), Entrant::new("Bia")])
                .seed(seed)
                .build()
                .unwrap();
            game.roll().unwrap()
        };
        assert_eq!(roll(99), roll(99));
    }

    #[test]
    fn test_builder_keeps_avatar() {
        let game = SessionBuilder::new()
            .player_with_avatar("Ana", "lamb")
            .player("Bia")
            .build()
            .unwrap();
        assert_eq!(game.players()[0].avatar.as_deref(), Some("lamb"));
        assert_eq!(game.players()[1].avatar, None);
    }
}
