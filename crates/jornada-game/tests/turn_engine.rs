//! Whole-game scenarios driven through the public `TurnEngine` API.

use jornada_game::{
    Card, CardKind, ContentPack, Entrant, GameConfig, GameError, GameRng, Question, RandomSource,
    ScriptedRandom, TurnEngine, TurnOutcome, TurnPhase,
};

fn entrants(names: &[&str]) -> Vec<Entrant> {
    names.iter().map(|n| Entrant::new(*n)).collect()
}

/// Rolls, then answers or reports the challenge so that the turn succeeds
/// (or fails) as asked.
fn play<R: RandomSource>(engine: &mut TurnEngine<R>, succeed: bool) -> TurnOutcome {
    let roll = engine.roll().unwrap();
    match roll.card {
        Card::Question {
            correct_index,
            options,
            ..
        } => {
            let index = if succeed {
                correct_index
            } else {
                (correct_index + 1) % options.len()
            };
            engine.submit_answer(index).unwrap()
        }
        Card::Challenge { .. } => engine.submit_challenge_result(succeed).unwrap(),
    }
}

#[test]
fn test_overshooting_the_end_clamps_and_wins() {
    // Ana's dice: 6, 6, 6, 6, 4, 5. Bia always rolls 1 and always fails.
    let dice = [6, 1, 6, 1, 6, 1, 6, 1, 4, 1, 5];
    let mut engine = TurnEngine::new(
        GameConfig::default(),
        entrants(&["Ana", "Bia"]),
        ContentPack::builtin(),
        ScriptedRandom::new().with_dice(dice),
    )
    .unwrap();

    let mut last = None;
    for turn in 0..11 {
        let ana = turn % 2 == 0;
        last = Some(play(&mut engine, ana));
    }

    let outcome = last.unwrap();
    assert_eq!(outcome.player, 0);
    assert_eq!(outcome.from, 28);
    assert_eq!(outcome.to, 30, "28 + 5 is clamped to the end square");
    assert_eq!(outcome.winner, Some(0));
    assert_eq!(outcome.next_player, 0);

    assert_eq!(engine.phase(), TurnPhase::Won);
    assert_eq!(engine.winner().map(|p| p.name.as_str()), Some("Ana"));
    assert_eq!(engine.players()[1].position, 0);

    // Bia never gets another turn.
    match engine.roll() {
        Err(GameError::GameOver { winner }) => assert_eq!(winner, "Ana"),
        other => panic!("expected GameOver, got {other:?}"),
    }
    assert!(matches!(
        engine.submit_challenge_result(true),
        Err(GameError::GameOver { .. })
    ));
    assert_eq!(engine.current_player_index(), 0);
}

#[test]
fn test_card_rotation_is_per_player() {
    let mut engine = TurnEngine::new(
        GameConfig::default(),
        entrants(&["Ana", "Bia", "Caio"]),
        ContentPack::builtin(),
        ScriptedRandom::new(),
    )
    .unwrap();

    let mut kinds = Vec::new();
    for _ in 0..9 {
        kinds.push(engine.next_card_kind());
        play(&mut engine, false);
    }

    let cycle = [
        CardKind::Question,
        CardKind::BiblicalChallenge,
        CardKind::InstitutionalChallenge,
    ];
    let expected: Vec<CardKind> = cycle.iter().flat_map(|kind| [*kind; 3]).collect();
    assert_eq!(kinds, expected);
    assert!(engine.players().iter().all(|p| p.card_rotation == CardKind::Question));
}

#[test]
fn test_level_progression_caps_at_max_level() {
    // Every die is 1, so nobody gets near the end square.
    let mut engine = TurnEngine::new(
        GameConfig::default(),
        entrants(&["Ana", "Bia"]),
        ContentPack::builtin(),
        ScriptedRandom::new(),
    )
    .unwrap();

    let mut level_ups = Vec::new();
    for turn in 0..42 {
        let ana = turn % 2 == 0;
        let outcome = play(&mut engine, ana);
        if let Some(level) = outcome.level_up {
            assert_eq!(outcome.player, 0);
            level_ups.push(level);
        }
    }

    // Ana answered 7 questions correctly: level 2 after two, 3 after four.
    assert_eq!(level_ups, vec![2, 3]);
    assert_eq!(engine.players()[0].difficulty_level, 3);
    assert_eq!(engine.players()[1].difficulty_level, 1);
    assert_eq!(engine.players()[0].position, 21);
}

#[test]
fn test_challenges_move_but_never_level_up() {
    let mut engine = TurnEngine::new(
        GameConfig::default(),
        entrants(&["Ana", "Bia"]),
        ContentPack::builtin(),
        ScriptedRandom::new().with_dice([2, 1, 3, 1, 4]),
    )
    .unwrap();

    play(&mut engine, true); // question
    play(&mut engine, false);
    let biblical = play(&mut engine, true);
    play(&mut engine, false);
    let institutional = play(&mut engine, true);

    assert_eq!((biblical.from, biblical.to), (2, 5));
    assert_eq!((institutional.from, institutional.to), (5, 9));
    assert_eq!(engine.players()[0].correct_answers_streak, 1);
    assert_eq!(engine.players()[0].difficulty_level, 1);
}

#[test]
fn test_seeded_game_positions_never_decrease() {
    let mut engine =
        TurnEngine::with_seed(GameConfig::default(), entrants(&["Ana", "Bia", "Caio"]), 2024)
            .unwrap();

    let mut positions = vec![0u32; 3];
    let mut turn = 0usize;
    while engine.phase() != TurnPhase::Won && turn < 1_000 {
        let outcome = play(&mut engine, turn % 4 != 0);
        assert!(outcome.to >= outcome.from);
        assert!(outcome.to <= 30);
        assert!(outcome.to >= positions[outcome.player]);
        positions[outcome.player] = outcome.to;
        turn += 1;
    }

    let winner = engine.winner_index().expect("someone wins eventually");
    assert_eq!(engine.players()[winner].position, 30);
    assert_eq!(engine.players().iter().filter(|p| p.position == 30).count(), 1);
}

#[test]
fn test_same_seed_replays_same_game() {
    let run = |seed| {
        let mut engine =
            TurnEngine::with_seed(GameConfig::default(), entrants(&["Ana", "Bia"]), seed).unwrap();
        let mut outcomes = Vec::new();
        while engine.phase() != TurnPhase::Won && outcomes.len() < 200 {
            let turn = outcomes.len();
            outcomes.push(play(&mut engine, turn % 2 == 0));
        }
        (outcomes, engine.winner_index())
    };

    let (outcomes, winner) = run(77);
    assert_eq!(winner, Some(0), "only Ana ever succeeds");
    assert_eq!(outcomes.last().map(|o| o.to), Some(30));
    assert_eq!(run(77), (outcomes, winner));
}

#[test]
fn test_missing_institutional_content_fails_roll_without_moving() {
    let content = ContentPack {
        questions: vec![Question {
            question: "Quem construiu a arca?".into(),
            options: vec!["Noé".into(), "Moisés".into()],
            correct: 0,
            difficulty: 1,
        }],
        challenges: vec!["Cante um salmo".into()],
    };
    let mut engine = TurnEngine::new(
        GameConfig::default(),
        entrants(&["Ana", "Bia"]),
        content,
        ScriptedRandom::new().with_dice([1, 1, 1, 1, 5]),
    )
    .unwrap();

    for _ in 0..4 {
        play(&mut engine, true);
    }
    assert_eq!(engine.next_card_kind(), CardKind::InstitutionalChallenge);

    let before = engine.clone();
    assert!(matches!(
        engine.roll(),
        Err(GameError::EmptyPool(CardKind::InstitutionalChallenge))
    ));
    assert_eq!(engine.phase(), TurnPhase::Rolling);
    assert_eq!(engine.players(), before.players());
    // The die was not rolled: the scripted 5 is still queued.
    assert_eq!(format!("{engine:?}"), format!("{before:?}"));
}

#[test]
fn test_restart_after_win_plays_again() {
    let config = GameConfig {
        track_length: 3,
        ..GameConfig::default()
    };
    let mut engine = TurnEngine::new(
        config,
        entrants(&["Ana", "Bia"]),
        ContentPack::builtin(),
        ScriptedRandom::new().with_dice([6]),
    )
    .unwrap();

    let outcome = play(&mut engine, true);
    assert_eq!(outcome.winner, Some(0));

    engine.restart();

    assert_eq!(engine.phase(), TurnPhase::Rolling);
    assert!(engine.winner().is_none());
    assert_eq!(engine.current_player_index(), 0);
    assert!(engine.players().iter().all(|p| p.position == 0));
    assert!(engine.roll().is_ok());
}

#[test]
fn test_game_rng_default_engine_type() {
    let engine: TurnEngine = TurnEngine::new(
        GameConfig::default(),
        entrants(&["Ana", "Bia"]),
        ContentPack::builtin(),
        GameRng::new(1),
    )
    .unwrap();
    assert_eq!(engine.board().end(), 30);
    assert_eq!(engine.board().len(), 31);
}
