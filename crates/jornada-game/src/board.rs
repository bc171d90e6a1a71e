//! The track players move along.

use serde::{Deserialize, Serialize};

/// Label of square 0.
pub const START_LABEL: &str = "Start";

/// Label of the last square.
pub const END_LABEL: &str = "End";

/// What landing on a square does. Every generated square is `Normal`; the
/// other kinds exist so custom tracks can be described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareType {
    #[default]
    Normal,
    Bonus,
    Forward,
    Back,
}

/// One square of the track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSquare {
    pub id: u32,
    #[serde(rename = "type")]
    pub square_type: SquareType,
    pub label: String,
}

/// Builds the track `0..=length`.
///
/// Square 0 is labeled [`START_LABEL`], square `length` is labeled
/// [`END_LABEL`], everything in between is an unlabeled normal square.
/// With `length == 0` the single square is the start square.
pub fn generate_board(length: u32) -> Vec<BoardSquare> {
    (0..=length)
        .map(|id| {
            let label = if id == 0 {
                START_LABEL
            } else if id == length {
                END_LABEL
            } else {
                ""
            };
            BoardSquare {
                id,
                square_type: SquareType::Normal,
                label: label.to_string(),
            }
        })
        .collect()
}

/// A generated track with lookup helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: Vec<BoardSquare>,
}

impl Board {
    pub fn new(length: u32) -> Self {
        Self {
            squares: generate_board(length),
        }
    }

    /// Id of the end square (the track length).
    pub fn end(&self) -> u32 {
        self.squares.last().map_or(0, |square| square.id)
    }

    /// Number of squares, start and end included.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn squares(&self) -> &[BoardSquare] {
        &self.squares
    }

    pub fn square(&self, id: u32) -> Option<&BoardSquare> {
        self.squares.get(id as usize)
    }

    pub fn is_start(&self, id: u32) -> bool {
        id == 0
    }

    pub fn is_end(&self, id: u32) -> bool {
        id == self.end()
    }
}
