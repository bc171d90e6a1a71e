//! Static card content: the question pool and the challenge pool.

use serde::{Deserialize, Serialize};

use crate::GameError;

/// Hardest question difficulty, and the highest level a player can reach.
pub const MAX_DIFFICULTY: u8 = 3;

/// A multiple-choice question in the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the right answer.
    pub correct: usize,
    /// 1 = easy, 2 = medium, 3 = hard.
    pub difficulty: u8,
}

/// Everything the deck can draw from.
///
/// Challenges carry no category; the deck derives it from keywords at draw
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentPack {
    pub questions: Vec<Question>,
    pub challenges: Vec<String>,
}

impl ContentPack {
    /// Parses a pack from JSON and validates it.
    ///
    /// ```json
    /// { "questions": [ { "question": "…", "options": ["…"], "correct": 0, "difficulty": 1 } ],
    ///   "challenges": [ "…" ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let pack: Self =
            serde_json::from_str(json).map_err(|e| GameError::InvalidContent(e.to_string()))?;
        pack.validate()?;
        Ok(pack)
    }

    /// Rejects questions whose answer index points outside their options or
    /// whose difficulty is outside `1..=MAX_DIFFICULTY`.
    pub fn validate(&self) -> Result<(), GameError> {
        for (index, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(GameError::InvalidContent(format!(
                    "question {index} has no options"
                )));
            }
            if question.correct >= question.options.len() {
                return Err(GameError::InvalidContent(format!(
                    "question {index} marks option {} correct but has {} options",
                    question.correct,
                    question.options.len()
                )));
            }
            if !(1..=MAX_DIFFICULTY).contains(&question.difficulty) {
                return Err(GameError::InvalidContent(format!(
                    "question {index} has difficulty {}, expected 1..={MAX_DIFFICULTY}",
                    question.difficulty
                )));
            }
        }
        Ok(())
    }

    /// The pack shipped with the game.
    pub fn builtin() -> Self {
        Self {
            questions: BUILTIN_QUESTIONS
                .iter()
                .map(|(question, options, correct, difficulty)| Question {
                    question: (*question).to_string(),
                    options: options.iter().map(|o| (*o).to_string()).collect(),
                    correct: *correct,
                    difficulty: *difficulty,
                })
                .collect(),
            challenges: BUILTIN_CHALLENGES.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

type QuestionRow = (&'static str, [&'static str; 4], usize, u8);

const BUILTIN_QUESTIONS: &[QuestionRow] = &[
    // level 1
    ("Quem construiu a arca?", ["Moisés", "Noé", "Abraão", "Davi"], 1, 1),
    ("Quantos dias durou a criação, incluindo o descanso?", ["5", "6", "7", "8"], 2, 1),
    ("Quem derrotou o gigante Golias?", ["Saul", "Sansão", "Davi", "Josué"], 2, 1),
    ("Em que cidade Jesus nasceu?", ["Nazaré", "Belém", "Jerusalém", "Cafarnaum"], 1, 1),
    ("Quem foi engolido por um grande peixe?", ["Jonas", "Elias", "Pedro", "Daniel"], 0, 1),
    ("Qual é o primeiro livro da Bíblia?", ["Êxodo", "Salmos", "Gênesis", "Mateus"], 2, 1),
    // level 2
    ("Quantos discípulos Jesus escolheu?", ["10", "12", "7", "70"], 1, 2),
    ("Quem foi lançado na cova dos leões?", ["Daniel", "José", "Jeremias", "Isaías"], 0, 2),
    ("Qual rei pediu sabedoria a Deus?", ["Davi", "Saul", "Salomão", "Ezequias"], 2, 2),
    ("Quem negou Jesus três vezes?", ["João", "Judas", "Tomé", "Pedro"], 3, 2),
    ("Qual mar se abriu para o povo passar?", ["Mar Morto", "Mar Vermelho", "Mar da Galileia", "Mediterrâneo"], 1, 2),
    ("Quem foi vendido pelos irmãos ao Egito?", ["Benjamim", "José", "Rúben", "Judá"], 1, 2),
    // level 3
    ("Qual profeta subiu ao céu num redemoinho?", ["Eliseu", "Elias", "Enoque", "Samuel"], 1, 3),
    ("Quantos livros tem o Novo Testamento?", ["27", "39", "66", "24"], 0, 3),
    ("Quem escreveu a maior parte das epístolas do Novo Testamento?", ["Pedro", "Tiago", "Paulo", "João"], 2, 3),
    ("Qual juíza liderou Israel debaixo de uma palmeira?", ["Débora", "Rute", "Ester", "Miriã"], 0, 3),
    ("Em que ilha João recebeu o Apocalipse?", ["Creta", "Chipre", "Malta", "Patmos"], 3, 3),
    ("Qual era a profissão de Lucas?", ["Pescador", "Médico", "Cobrador de impostos", "Carpinteiro"], 1, 3),
];

const BUILTIN_CHALLENGES: &[&str] = &[
    "Imite Jonas dentro do grande peixe por 10 segundos",
    "Recite um versículo de Salmos de memória",
    "Cante o refrão de um hino sobre Davi e Golias",
    "Diga o nome de cinco livros do Antigo Testamento em 15 segundos",
    "Conte a parábola do filho pródigo em uma frase",
    "Faça a mímica de Moisés abrindo o Mar Vermelho",
    "Explique em 30 segundos por que guardamos o sábado",
    "Cite dois livros escritos por Ellen G. White",
    "Diga o nome de três pioneiros adventistas",
    "Explique o que é o dízimo sem usar a palavra dinheiro",
    "Descreva o santuário do deserto em três frases",
    "Fale um princípio da reforma de saúde",
    "Cite um texto bíblico sobre a segunda vinda de Jesus",
    "Explique o estado dos mortos com um versículo",
    "Conte em que ano foi organizada a Conferência Geral",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChallengeCategory;

    #[test]
    fn test_builtin_pack_is_valid() {
        let pack = ContentPack::builtin();
        assert!(pack.validate().is_ok());
        assert_eq!(pack.questions.len(), 18);
    }

    #[test]
    fn test_builtin_pack_covers_every_level() {
        let pack = ContentPack::builtin();
        for level in 1..=3 {
            assert!(pack.questions.iter().any(|q| q.difficulty == level), "level {level}");
        }
    }

    #[test]
    fn test_builtin_pack_has_both_challenge_categories() {
        let pack = ContentPack::builtin();
        assert!(pack.challenges.iter().any(|c| ChallengeCategory::Biblical.matches(c)));
        assert!(pack.challenges.iter().any(|c| ChallengeCategory::Institutional.matches(c)));
    }

    #[test]
    fn test_from_json_parses_pack() {
        let json = r#"{
            "questions": [
                { "question": "Q?", "options": ["a", "b"], "correct": 1, "difficulty": 2 }
            ],
            "challenges": ["Cante um hino"]
        }"#;
        let pack = ContentPack::from_json(json).unwrap();
        assert_eq!(pack.questions[0].correct, 1);
        assert_eq!(pack.challenges.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_out_of_range_answer() {
        let json = r#"{
            "questions": [
                { "question": "Q?", "options": ["a", "b"], "correct": 2, "difficulty": 1 }
            ],
            "challenges": []
        }"#;
        assert!(matches!(ContentPack::from_json(json), Err(GameError::InvalidContent(_))));
    }

    #[test]
    fn test_from_json_rejects_difficulty_above_hardest() {
        let json = r#"{
            "questions": [
                { "question": "Q?", "options": ["a", "b"], "correct": 0, "difficulty": 4 }
            ],
            "challenges": []
        }"#;
        let err = ContentPack::from_json(json).unwrap_err();
        assert!(err.to_string().contains("difficulty 4"));
    }

    #[test]
    fn test_from_json_rejects_malformed_json() {
        assert!(matches!(ContentPack::from_json("{"), Err(GameError::InvalidContent(_))));
    }
}
