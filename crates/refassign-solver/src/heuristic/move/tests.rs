use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use refassign_core::{GameId, RefereeId, Weights};
use refassign_scoring::{AssignmentView, IdSet, ScoreDirector};
use refassign_test::fixtures::{same_day_pair, single_game, small_league};

use super::*;

fn r(code: u32) -> RefereeId {
    RefereeId::new(code)
}

fn crew(codes: &[u32]) -> IdSet<RefereeId> {
    codes.iter().map(|&c| r(c)).collect()
}

fn neighborhood<G: MoveGenerator>(generator: &G, director: &ScoreDirector<'_>) -> Vec<G::Move> {
    let mut moves = Vec::new();
    let mut next = generator.first_move(director);
    while let Some(mv) = next {
        next = generator.next_move(director, &mv);
        moves.push(mv);
    }
    moves
}

fn candidates<G: MoveGenerator>(generator: &G, director: &ScoreDirector<'_>) -> Vec<G::Move> {
    let mut moves = Vec::new();
    let mut next = generator.first_candidate(director);
    while let Some(mv) = next {
        next = generator.next_candidate(director, &mv);
        moves.push(mv);
    }
    moves
}

#[test]
fn test_whole_game_neighborhood_of_empty_game() {
    let instance = single_game(1, 2, 3);
    let director = ScoreDirector::new(&instance);
    let moves = neighborhood(&WholeGameGenerator::default(), &director);
    let names: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "1: {} -> {R1}",
            "1: {} -> {R2}",
            "1: {} -> {R3}",
            "1: {} -> {R1,R2}",
            "1: {} -> {R1,R3}",
            "1: {} -> {R2,R3}",
        ]
    );
}

#[test]
fn test_whole_game_skips_current_crew() {
    let instance = single_game(1, 2, 3);
    let game = GameId::new(1);
    let mut director = ScoreDirector::new(&instance);
    director.replace_referees(game, &crew(&[1]));

    let moves = candidates(&WholeGameGenerator::default(), &director);
    assert_eq!(moves.len(), 5);
    assert!(moves.iter().all(|m| m.new_crew() != [r(1)]));
    assert!(moves.iter().all(|m| m.old() == [r(1)]));
}

#[test]
fn test_whole_game_rejects_travel_conflict() {
    let instance = same_day_pair();
    let mut director = ScoreDirector::new(&instance);
    director.replace_referees(GameId::new(1), &crew(&[1]));

    let generator = WholeGameGenerator::default();
    let current = director.assignment().referees_of(GameId::new(2)).clone();
    let conflicting = WholeGameMove::new(GameId::new(2), &current, &crew(&[1]));
    assert!(!generator.is_feasible(&director, &conflicting));

    let fine = WholeGameMove::new(GameId::new(2), &current, &crew(&[2]));
    assert!(generator.is_feasible(&director, &fine));

    let moves = neighborhood(&generator, &director);
    assert!(!moves.contains(&conflicting));
    assert!(moves.contains(&fine));
}

#[test]
fn test_stale_whole_game_move_is_not_doable() {
    let instance = single_game(1, 2, 3);
    let game = GameId::new(1);
    let mut director = ScoreDirector::new(&instance);
    let generator = WholeGameGenerator::default();
    let mv = generator.first_move(&director).unwrap();

    director.replace_referees(game, &crew(&[3]));
    assert!(!generator.is_feasible(&director, &mv));
}

#[test]
fn test_single_slot_order() {
    let instance = single_game(1, 2, 3);
    let mut director = ScoreDirector::new(&instance);
    director.replace_referees(GameId::new(1), &crew(&[2]));
    let generator = SingleSlotGenerator::default();

    let all: Vec<String> = candidates(&generator, &director)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(
        all,
        vec![
            "1: 0 -> R1",
            "1: 0 -> R3",
            "1: R2 -> 0",
            "1: R2 -> R1",
            "1: R2 -> R3",
        ]
    );

    // Removing the only referee would break the minimum.
    let feasible: Vec<String> = neighborhood(&generator, &director)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(
        feasible,
        vec!["1: 0 -> R1", "1: 0 -> R3", "1: R2 -> R1", "1: R2 -> R3"]
    );
}

#[test]
fn test_single_slot_full_crew_skips_additions() {
    let instance = single_game(1, 2, 3);
    let mut director = ScoreDirector::new(&instance);
    director.replace_referees(GameId::new(1), &crew(&[1, 2]));
    let generator = SingleSlotGenerator::default();

    let all: Vec<String> = candidates(&generator, &director)
        .iter()
        .map(|m| m.to_string())
        .collect();
    assert_eq!(
        all,
        vec!["1: R1 -> 0", "1: R1 -> R3", "1: R2 -> 0", "1: R2 -> R3"]
    );
}

#[test]
fn test_single_slot_doable() {
    let current = crew(&[1, 2]);
    let game = GameId::new(1);
    assert!(!SingleSlotMove::new(game, None, None).is_doable(&current));
    assert!(!SingleSlotMove::new(game, Some(r(1)), Some(r(1))).is_doable(&current));
    assert!(!SingleSlotMove::new(game, Some(r(3)), None).is_doable(&current));
    assert!(!SingleSlotMove::new(game, None, Some(r(2))).is_doable(&current));
    assert!(SingleSlotMove::new(game, Some(r(1)), Some(r(3))).is_doable(&current));

    let swap = SingleSlotMove::new(game, Some(r(1)), Some(r(3)));
    assert_eq!(swap.target_crew(&current), crew(&[2, 3]));
    assert_eq!(swap.inverse().to_string(), "1: R3 -> R1");
}

#[test]
fn test_move_then_inverse_restores_state() {
    let instance = small_league(Weights::UNIT);
    let mut director = ScoreDirector::new(&instance);
    let mut rng = StdRng::seed_from_u64(5);
    let generator = WholeGameGenerator::default();

    for _ in 0..50 {
        let Some(mv) = generator.random_move(&director, &mut rng) else {
            continue;
        };
        let before = director.assignment().clone();
        let totals = *director.totals();

        generator.make_move(&mut director, &mv);
        let inverse = mv.inverse();
        assert!(inverse.is_doable(director.assignment().referees_of(mv.game())));
        generator.make_move(&mut director, &inverse);

        assert_eq!(director.assignment(), &before);
        assert_eq!(director.totals(), &totals);

        // Keep the walk moving.
        generator.make_move(&mut director, &mv);
    }
    director.assert_totals().unwrap();
}

#[test]
fn test_random_moves_are_feasible() {
    let instance = small_league(Weights::UNIT);
    let mut director = ScoreDirector::new(&instance);
    let mut rng = StdRng::seed_from_u64(11);
    let generator = SingleSlotGenerator::default();

    for _ in 0..200 {
        let Some(mv) = generator.random_move(&director, &mut rng) else {
            continue;
        };
        assert!(mv.is_doable(director.assignment().referees_of(mv.game())));
        let delta = generator.delta(&director, &mv);
        assert!(!delta.worsens_hard());
        let applied = generator.make_move(&mut director, &mv);
        assert_eq!(applied, delta);
    }
    director.assert_totals().unwrap();
}

#[test]
fn test_no_games_no_moves() {
    let instance = refassign_core::Instance::builder().build().unwrap();
    let director = ScoreDirector::new(&instance);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(WholeGameGenerator::default().first_move(&director).is_none());
    assert!(SingleSlotGenerator::default()
        .random_move(&director, &mut rng)
        .is_none());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_neighborhood_matches_feasibility(seed in 0u64..500) {
        let instance = small_league(Weights::UNIT);
        let mut director = ScoreDirector::new(&instance);
        let mut rng = StdRng::seed_from_u64(seed);
        let generator = SingleSlotGenerator::default();
        for _ in 0..10 {
            if let Some(mv) = generator.random_move(&director, &mut rng) {
                generator.make_move(&mut director, &mv);
            }
        }

        let listed = neighborhood(&generator, &director);
        let expected: Vec<SingleSlotMove> = candidates(&generator, &director)
            .into_iter()
            .filter(|m| generator.is_feasible(&director, m))
            .collect();
        prop_assert_eq!(listed, expected);
    }
}
