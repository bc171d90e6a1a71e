//! Cards and the per-player card rotation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terms that keep a challenge out of the biblical draw.
pub const BIBLICAL_EXCLUDED_KEYWORDS: &[&str] = &[
    "iasd",
    "adventista",
    "ellen",
    "white",
    "pioneiros",
    "conferência",
];

/// Terms that make a challenge eligible for the institutional draw.
///
/// Not the complement of [`BIBLICAL_EXCLUDED_KEYWORDS`]: a challenge can
/// match both filters, or neither (and is then never drawn as
/// institutional).
pub const INSTITUTIONAL_KEYWORDS: &[&str] = &[
    "iasd",
    "adventista",
    "ellen",
    "white",
    "pioneiros",
    "dízimo",
    "sábado",
    "santuário",
    "conferência",
    "reforma de saúde",
    "segunda vinda",
    "estado dos mortos",
];

/// Which kind of card a player draws next.
///
/// Each player cycles `Question → BiblicalChallenge → InstitutionalChallenge
/// → Question …`, one step per completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    #[default]
    Question,
    BiblicalChallenge,
    InstitutionalChallenge,
}

impl CardKind {
    /// Maps a raw rotation pointer (any integer) onto the cycle, mod 3.
    pub fn from_pointer(pointer: usize) -> Self {
        match pointer % 3 {
            0 => Self::Question,
            1 => Self::BiblicalChallenge,
            _ => Self::InstitutionalChallenge,
        }
    }

    /// Position in the cycle, `0..=2`.
    pub fn pointer(self) -> usize {
        match self {
            Self::Question => 0,
            Self::BiblicalChallenge => 1,
            Self::InstitutionalChallenge => 2,
        }
    }

    /// The kind drawn on the following turn.
    pub fn next(self) -> Self {
        Self::from_pointer(self.pointer() + 1)
    }

    /// The challenge category this kind draws from, if it is a challenge.
    pub fn category(self) -> Option<ChallengeCategory> {
        match self {
            Self::Question => None,
            Self::BiblicalChallenge => Some(ChallengeCategory::Biblical),
            Self::InstitutionalChallenge => Some(ChallengeCategory::Institutional),
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Question => f.write_str("question"),
            Self::BiblicalChallenge => f.write_str("biblical challenge"),
            Self::InstitutionalChallenge => f.write_str("institutional challenge"),
        }
    }
}

/// The two challenge decks, derived from the challenge text by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeCategory {
    Biblical,
    Institutional,
}

impl ChallengeCategory {
    /// Case-insensitive substring test against this category's keyword list.
    pub fn matches(self, text: &str) -> bool {
        let lower = text.to_lowercase();
        match self {
            Self::Biblical => !BIBLICAL_EXCLUDED_KEYWORDS
                .iter()
                .any(|keyword| lower.contains(keyword)),
            Self::Institutional => INSTITUTIONAL_KEYWORDS
                .iter()
                .any(|keyword| lower.contains(keyword)),
        }
    }

    pub fn kind(self) -> CardKind {
        match self {
            Self::Biblical => CardKind::BiblicalChallenge,
            Self::Institutional => CardKind::InstitutionalChallenge,
        }
    }
}

/// A drawn card. Lives from the draw until the turn is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Card {
    Question {
        text: String,
        options: Vec<String>,
        correct_index: usize,
    },
    Challenge {
        text: String,
        category: ChallengeCategory,
    },
}

impl Card {
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Question { .. } => CardKind::Question,
            Self::Challenge { category, .. } => category.kind(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Question { text, .. } | Self::Challenge { text, .. } => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_kind_cycles_through_three() {
        let mut kind = CardKind::Question;
        let mut seen = Vec::new();
        for _ in 0..7 {
            seen.push(kind.pointer());
            kind = kind.next();
        }
        assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_card_kind_from_pointer_wraps() {
        assert_eq!(CardKind::from_pointer(3), CardKind::Question);
        assert_eq!(CardKind::from_pointer(5), CardKind::InstitutionalChallenge);
    }

    #[test]
    fn test_biblical_filter_rejects_block_list_case_insensitive() {
        assert!(ChallengeCategory::Biblical.matches("Cante um hino sobre Davi"));
        assert!(!ChallengeCategory::Biblical.matches("Cite um livro de ELLEN G. White"));
        assert!(!ChallengeCategory::Biblical.matches("Fale sobre a Conferência Geral"));
    }

    #[test]
    fn test_institutional_filter_matches_any_keyword() {
        assert!(ChallengeCategory::Institutional.matches("Explique o SÁBADO em 30 segundos"));
        assert!(ChallengeCategory::Institutional.matches("O que é a reforma de saúde?"));
        assert!(!ChallengeCategory::Institutional.matches("Imite Jonas dentro do peixe"));
    }

    #[test]
    fn test_filters_are_not_a_partition() {
        // "dízimo" is institutional but not on the biblical block list.
        let text = "Explique o dízimo";
        assert!(ChallengeCategory::Biblical.matches(text));
        assert!(ChallengeCategory::Institutional.matches(text));
    }

    #[test]
    fn test_card_json_is_tagged() {
        let card = Card::Challenge {
            text: "Ore pelo jogador à esquerda".into(),
            category: ChallengeCategory::Biblical,
        };
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["type"], "challenge");
        assert_eq!(json["category"], "biblical");
        assert_eq!(card.kind(), CardKind::BiblicalChallenge);
    }
}
