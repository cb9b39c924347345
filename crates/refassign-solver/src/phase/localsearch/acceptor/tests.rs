//! Tests for acceptors.

use super::*;
use rand::SeedableRng;
use refassign_config::{SimulatedAnnealingConfig, TabuSearchConfig};
use refassign_core::{GameId, RefereeId};

use crate::heuristic::SingleSlotMove;

fn add(game: usize, referee: u32) -> SingleSlotMove {
    SingleSlotMove::new(GameId::from_index(game), None, Some(RefereeId::new(referee)))
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn test_hill_climbing_accepts_improving_and_equal() {
    let mut acceptor = HillClimbingAcceptor::new();
    let mv = add(0, 1);
    let mut rng = rng();

    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -10), &HardSoftScore::of(0, -5), &mv, &mut rng));
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -5), &HardSoftScore::of(0, -5), &mv, &mut rng));
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -5), &HardSoftScore::of(0, -6), &mv, &mut rng));
}

#[test]
fn test_steepest_descent_rejects_equal() {
    let mut acceptor = SteepestDescentAcceptor::new();
    let mv = add(0, 1);
    let mut rng = rng();

    assert!(acceptor.is_accepted(&HardSoftScore::of(-1, 0), &HardSoftScore::of(0, -50), &mv, &mut rng));
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -5), &HardSoftScore::of(0, -5), &mv, &mut rng));
}

#[test]
fn test_simulated_annealing_accepts_improving() {
    let mut acceptor = SimulatedAnnealingAcceptor::default();
    let mv = add(0, 1);
    let mut rng = rng();
    for _ in 0..50 {
        assert!(acceptor.is_accepted(&HardSoftScore::of(0, -10), &HardSoftScore::of(0, -5), &mv, &mut rng));
    }
}

#[test]
fn test_simulated_annealing_never_breaks_hard_at_low_temperature() {
    let mut acceptor = SimulatedAnnealingAcceptor::default();
    let mv = add(0, 1);
    let mut rng = rng();
    for _ in 0..200 {
        assert!(!acceptor.is_accepted(&HardSoftScore::of(0, 0), &HardSoftScore::of(-1, 0), &mv, &mut rng));
    }
}

#[test]
fn test_simulated_annealing_hot_accepts_small_worsening() {
    let config = SimulatedAnnealingConfig {
        start_temperature: 1.0e9,
        min_temperature: 1.0,
        ..SimulatedAnnealingConfig::default()
    };
    let mut acceptor = SimulatedAnnealingAcceptor::new(&config);
    let mv = add(0, 1);
    let mut rng = rng();
    let accepted = (0..100)
        .filter(|_| acceptor.is_accepted(&HardSoftScore::of(0, -5), &HardSoftScore::of(0, -6), &mv, &mut rng))
        .count();
    assert!(accepted > 90);
}

#[test]
fn test_simulated_annealing_cools_and_exhausts() {
    let config = SimulatedAnnealingConfig {
        start_temperature: 1.0,
        min_temperature: 0.3,
        cooling_rate: 0.5,
        neighbors_sampled: 2,
        neighbors_accepted: 100,
    };
    let mut acceptor = SimulatedAnnealingAcceptor::new(&config);
    let mv = add(0, 1);
    let mut rng = rng();
    let last = HardSoftScore::of(0, 0);
    let worse = HardSoftScore::of(-1, 0);
    Acceptor::<SingleSlotMove>::phase_started(&mut acceptor, &last);

    acceptor.is_accepted(&last, &worse, &mv, &mut rng);
    assert_eq!(acceptor.temperature(), 1.0);
    acceptor.is_accepted(&last, &worse, &mv, &mut rng);
    assert_eq!(acceptor.temperature(), 0.5);
    assert!(!Acceptor::<SingleSlotMove>::is_exhausted(&acceptor));

    acceptor.is_accepted(&last, &worse, &mv, &mut rng);
    acceptor.is_accepted(&last, &worse, &mv, &mut rng);
    assert_eq!(acceptor.temperature(), 0.25);
    assert!(Acceptor::<SingleSlotMove>::is_exhausted(&acceptor));

    Acceptor::<SingleSlotMove>::phase_started(&mut acceptor, &last);
    assert_eq!(acceptor.temperature(), 1.0);
}

#[test]
fn test_simulated_annealing_cools_on_missed_draws() {
    let config = SimulatedAnnealingConfig {
        start_temperature: 1.0,
        min_temperature: 0.3,
        cooling_rate: 0.5,
        neighbors_sampled: 3,
        neighbors_accepted: 100,
    };
    let mut acceptor = SimulatedAnnealingAcceptor::new(&config);

    for _ in 0..3 {
        Acceptor::<SingleSlotMove>::candidate_missed(&mut acceptor);
    }
    assert_eq!(acceptor.temperature(), 0.5);
    for _ in 0..3 {
        Acceptor::<SingleSlotMove>::candidate_missed(&mut acceptor);
    }
    assert!(Acceptor::<SingleSlotMove>::is_exhausted(&acceptor));
}

#[test]
fn test_simulated_annealing_cools_after_accepted_steps() {
    let config = SimulatedAnnealingConfig {
        start_temperature: 8.0,
        min_temperature: 1.0,
        cooling_rate: 0.5,
        neighbors_sampled: 1000,
        neighbors_accepted: 2,
    };
    let mut acceptor = SimulatedAnnealingAcceptor::new(&config);
    let mv = add(0, 1);
    let mut rng = rng();
    let score = HardSoftScore::of(0, -1);

    acceptor.step_ended(&score, &mv, &mut rng);
    assert_eq!(acceptor.temperature(), 8.0);
    acceptor.step_ended(&score, &mv, &mut rng);
    assert_eq!(acceptor.temperature(), 4.0);
}

#[test]
fn test_tabu_forbids_inverse_of_last_step() {
    let mut acceptor = TabuSearchAcceptor::<SingleSlotMove>::new(&TabuSearchConfig {
        min_tenure: 3,
        max_tenure: 3,
    });
    let mut rng = rng();
    let initial = HardSoftScore::of(0, -10);
    acceptor.phase_started(&initial);

    let mv = add(0, 1);
    acceptor.step_ended(&HardSoftScore::of(0, -8), &mv, &mut rng);
    let undo = mv.inverse();
    assert!(acceptor.is_tabu(&undo));
    assert!(!acceptor.is_tabu(&mv));

    // Undoing would return to -10, no better than the best -8.
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -8), &HardSoftScore::of(0, -10), &undo, &mut rng));
    // A worsening move that is not tabu is fine.
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -8), &HardSoftScore::of(0, -30), &add(1, 2), &mut rng));
}

#[test]
fn test_tabu_aspiration() {
    let mut acceptor = TabuSearchAcceptor::<SingleSlotMove>::default();
    let mut rng = rng();
    acceptor.phase_started(&HardSoftScore::of(0, -10));

    let mv = add(0, 1);
    acceptor.step_ended(&HardSoftScore::of(0, -12), &mv, &mut rng);
    let undo = mv.inverse();
    assert!(acceptor.is_tabu(&undo));
    assert!(acceptor.is_accepted(&HardSoftScore::of(0, -12), &HardSoftScore::of(0, -9), &undo, &mut rng));
    assert!(!acceptor.is_accepted(&HardSoftScore::of(0, -12), &HardSoftScore::of(0, -10), &undo, &mut rng));
}

#[test]
fn test_tabu_tenure_expires() {
    let mut acceptor = TabuSearchAcceptor::<SingleSlotMove>::new(&TabuSearchConfig {
        min_tenure: 2,
        max_tenure: 2,
    });
    let mut rng = rng();
    let score = HardSoftScore::of(0, -1);
    acceptor.phase_started(&score);

    let first = add(0, 1);
    acceptor.step_ended(&score, &first, &mut rng);
    acceptor.step_ended(&score, &add(1, 1), &mut rng);
    assert!(acceptor.is_tabu(&first.inverse()));
    assert_eq!(acceptor.tabu_count(), 2);

    acceptor.step_ended(&score, &add(2, 1), &mut rng);
    assert!(!acceptor.is_tabu(&first.inverse()));
    assert_eq!(acceptor.tabu_count(), 2);

    Acceptor::<SingleSlotMove>::phase_ended(&mut acceptor);
    assert_eq!(acceptor.tabu_count(), 0);
}
