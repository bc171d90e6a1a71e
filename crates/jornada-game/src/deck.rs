//! Card selection: which question or challenge a player draws.

use std::collections::HashSet;

use crate::{Card, CardKind, ChallengeCategory, ContentPack, GameError, RandomSource};

/// Which questions have already been asked this session.
///
/// Global across players. An index only becomes eligible again through
/// [`DeckState::reclaim`], which the deck calls when every candidate for the
/// current difficulty has been used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckState {
    used_question_indices: HashSet<usize>,
}

impl DeckState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, index: usize) -> bool {
        self.used_question_indices.contains(&index)
    }

    pub fn mark_used(&mut self, index: usize) {
        self.used_question_indices.insert(index);
    }

    /// Forgets exactly the given indices, leaving the rest of the history.
    /// Returns how many were actually removed.
    pub fn reclaim(&mut self, pool: impl IntoIterator<Item = usize>) -> usize {
        pool.into_iter()
            .filter(|index| self.used_question_indices.remove(index))
            .count()
    }

    pub fn used_count(&self) -> usize {
        self.used_question_indices.len()
    }

    pub fn clear(&mut self) {
        self.used_question_indices.clear();
    }
}

/// The content pools plus the session's draw history.
#[derive(Debug, Clone)]
pub struct Deck {
    content: ContentPack,
    state: DeckState,
}

impl Deck {
    pub fn new(content: ContentPack) -> Self {
        Self {
            content,
            state: DeckState::new(),
        }
    }

    pub fn content(&self) -> &ContentPack {
        &self.content
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Forgets the draw history.
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Draws the card `kind` calls for.
    ///
    /// # Errors
    /// [`GameError::EmptyPool`] if no entry qualifies. The history is left
    /// untouched in that case.
    pub fn draw<R: RandomSource>(
        &mut self,
        kind: CardKind,
        level: u8,
        rng: &mut R,
    ) -> Result<Card, GameError> {
        match kind.category() {
            None => self.draw_question(level, rng),
            Some(category) => self.draw_challenge(category, rng),
        }
    }

    /// Original indices of the questions eligible at `level`, ignoring
    /// history. Falls back to the whole pool when nothing has that level.
    pub fn question_pool(&self, level: u8) -> Vec<usize> {
        let at_level: Vec<usize> = self
            .content
            .questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.difficulty == level)
            .map(|(index, _)| index)
            .collect();

        if at_level.is_empty() {
            (0..self.content.questions.len()).collect()
        } else {
            at_level
        }
    }

    /// The challenges that pass `category`'s keyword filter, in pool order.
    pub fn challenges(&self, category: ChallengeCategory) -> Vec<&str> {
        self.content
            .challenges
            .iter()
            .map(String::as_str)
            .filter(|text| category.matches(text))
            .collect()
    }

    fn draw_question<R: RandomSource>(&mut self, level: u8, rng: &mut R) -> Result<Card, GameError> {
        let pool = self.question_pool(level);
        if pool.is_empty() {
            return Err(GameError::EmptyPool(CardKind::Question));
        }

        let mut candidates: Vec<usize> =
            pool.iter().copied().filter(|index| !self.state.is_used(*index)).collect();

        if candidates.is_empty() {
            let reclaimed = self.state.reclaim(pool.iter().copied());
            tracing::debug!(level, reclaimed, "question pool exhausted, reclaiming");
            candidates = pool;
        }

        let index = candidates[rng.pick(candidates.len()) % candidates.len()];
        self.state.mark_used(index);

        let question = &self.content.questions[index];
        tracing::debug!(level, index, "question drawn");
        Ok(Card::Question {
            text: question.question.clone(),
            options: question.options.clone(),
            correct_index: question.correct,
        })
    }

    fn draw_challenge<R: RandomSource>(
        &mut self,
        category: ChallengeCategory,
        rng: &mut R,
    ) -> Result<Card, GameError> {
        let candidates = self.challenges(category);
        if candidates.is_empty() {
            return Err(GameError::EmptyPool(category.kind()));
        }
        let text = candidates[rng.pick(candidates.len()) % candidates.len()].to_string();
        tracing::debug!(?category, "challenge drawn");
        Ok(Card::Challenge { text, category })
    }
}
