//! Tests for the local search phase.

use rand::SeedableRng;
use refassign_config::{SimulatedAnnealingConfig, TabuSearchConfig};
use refassign_core::{HardSoftScore, Instance, RefereeId, Weights};
use refassign_scoring::{AssignmentView, ScoreDirector};
use refassign_test::fixtures::{single_game, small_league};

use super::*;
use crate::heuristic::{MoveGenerator, SingleSlotGenerator, WholeGameGenerator};
use crate::phase::random_state::random_initial_state;
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::StepCountTermination;

fn random_scope(instance: &Instance, seed: u64, step_limit: u64) -> SolverScope<'_> {
    let mut director = ScoreDirector::new(instance);
    random_initial_state(&mut director, &mut rand::rngs::StdRng::seed_from_u64(seed));
    let mut scope = SolverScope::with_seed(director, seed)
        .with_termination(Box::new(StepCountTermination::new(step_limit)))
        .with_full_assert(true);
    scope.start_solving();
    scope
}

#[test]
fn test_hill_climbing_never_loses_ground() {
    let instance = small_league(Weights::UNIT);
    for seed in 0..5 {
        let mut scope = random_scope(&instance, seed, 300);
        let initial = scope.score_director().score();

        let mut phase = LocalSearchPhase::new(
            WholeGameGenerator::default(),
            HillClimbingAcceptor::new(),
            Exploration::RandomSample,
        );
        phase.solve(&mut scope).unwrap();

        let working = scope.score_director().score();
        assert!(working >= initial);
        assert_eq!(scope.best_score(), Some(working));
        assert_eq!(scope.total_step_count(), 300);
    }
}

#[test]
fn test_steepest_descent_stops_at_local_optimum() {
    let instance = small_league(Weights::UNIT);
    let mut scope = random_scope(&instance, 3, u64::MAX);

    let generator = SingleSlotGenerator::default();
    let mut phase = LocalSearchPhase::new(
        generator.clone(),
        SteepestDescentAcceptor::new(),
        Exploration::FullScan,
    );
    phase.solve(&mut scope).unwrap();

    let director = scope.score_director();
    let score = director.score();
    let mut next = generator.first_move(director);
    while let Some(mv) = next {
        let delta = generator.delta(director, &mv);
        assert!(director.score_with(&delta) <= score, "{mv} still improves");
        next = generator.next_move(director, &mv);
    }
}

#[test]
fn test_steepest_descent_from_empty_crew() {
    let instance = single_game(1, 2, 3);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0);
    scope.start_solving();

    let mut phase = LocalSearchPhase::new(
        SingleSlotGenerator::default(),
        SteepestDescentAcceptor::new(),
        Exploration::FullScan,
    );
    phase.solve(&mut scope).unwrap();

    assert_eq!(scope.total_step_count(), 1);
    let (assignment, score) = scope.take_best().unwrap();
    assert_eq!(score, HardSoftScore::from_penalties(0, 8));
    let game = instance.game_ids().next().unwrap();
    let crew: Vec<_> = assignment.referees_of(game).iter().collect();
    assert_eq!(crew, vec![RefereeId::new(1)]);
}

#[test]
fn test_tabu_search_keeps_best() {
    let instance = small_league(Weights::UNIT);
    let mut scope = random_scope(&instance, 11, 60);
    let initial = scope.score_director().score();

    let mut phase = LocalSearchPhase::new(
        SingleSlotGenerator::default(),
        TabuSearchAcceptor::new(&TabuSearchConfig::default()),
        Exploration::FullScan,
    );
    phase.solve(&mut scope).unwrap();

    let best = scope.best_score().unwrap();
    assert!(best >= initial);
    assert!(best >= scope.score_director().score());
    scope.score_director().assert_totals().unwrap();
}

#[test]
fn test_simulated_annealing_ends_when_cold() {
    let instance = small_league(Weights::UNIT);
    let mut scope = random_scope(&instance, 5, u64::MAX);

    let config = SimulatedAnnealingConfig {
        start_temperature: 10.0,
        min_temperature: 1.0,
        cooling_rate: 0.5,
        neighbors_sampled: 1,
        neighbors_accepted: 1,
    };
    let mut phase = LocalSearchPhase::new(
        WholeGameGenerator::default(),
        SimulatedAnnealingAcceptor::new(&config),
        Exploration::RandomSample,
    );
    phase.solve(&mut scope).unwrap();

    assert!(Acceptor::<crate::heuristic::WholeGameMove>::is_exhausted(phase.acceptor()));
    assert!(scope.total_step_count() <= 4);
    assert!(scope.best_score().is_some());
}
