use refassign_core::{GameId, RefereeId, Weights};
use refassign_test::{same_day_pair, single_game, small_league};

use super::*;
use crate::assignment::Assignment;

#[test]
fn test_empty_assignment_on_single_game() {
    let instance = single_game(1, 2, 3);
    let totals = evaluate(&instance, &Assignment::new(&instance));

    assert_eq!(totals[ConstraintKind::MinReferees], 1);
    assert_eq!(totals[ConstraintKind::OptionalReferee], 1);
    assert_eq!(totals.violations(), 1);
    for kind in [
        ConstraintKind::GamesDistribution,
        ConstraintKind::TotalDistance,
        ConstraintKind::AssignmentFrequency,
    ] {
        assert_eq!(totals[kind], 0, "{}", kind);
    }
}

#[test]
fn test_full_crew_on_single_game() {
    let instance = single_game(1, 2, 3);
    let mut assignment = Assignment::new(&instance);
    let g = GameId::new(1);
    assignment.assign(RefereeId::new(1), g);
    assignment.assign(RefereeId::new(3), g);

    let totals = evaluate(&instance, &assignment);
    assert_eq!(totals.violations(), 0);
    assert_eq!(totals[ConstraintKind::OptionalReferee], 0);
    // Average 2/3: R1 and R3 sit 1/3 above, R2 2/3 below.
    assert_eq!(totals[ConstraintKind::GamesDistribution], 3);
    // R1 lives 1 km away, R3 3 km away, both drive there and back.
    assert_eq!(totals[ConstraintKind::TotalDistance], 8);
    assert_eq!(compute_violations(&instance, &assignment), 0);
    assert!(!has_violations(&instance, &assignment));
}

#[test]
fn test_over_max_crew() {
    let instance = single_game(1, 2, 3);
    let mut assignment = Assignment::new(&instance);
    for r in instance.referee_ids() {
        assignment.assign(r, GameId::new(1));
    }
    let totals = evaluate(&instance, &assignment);
    assert_eq!(totals[ConstraintKind::MaxReferees], 1);
    assert_eq!(totals[ConstraintKind::OptionalReferee], 0);
    assert!(has_violations(&instance, &assignment));
}

#[test]
fn test_same_day_travel_conflict() {
    let instance = same_day_pair();
    let mut assignment = Assignment::new(&instance);
    assignment.assign(RefereeId::new(1), GameId::new(1));
    assignment.assign(RefereeId::new(1), GameId::new(2));

    assert!(!travel_feasible(&instance, &assignment, RefereeId::new(1)));
    assert_eq!(evaluate(&instance, &assignment)[ConstraintKind::FeasibleTravel], 1);

    assignment.unassign(RefereeId::new(1), GameId::new(2));
    assignment.assign(RefereeId::new(2), GameId::new(2));
    assert_eq!(compute_violations(&instance, &assignment), 0);
}

#[test]
fn test_same_day_distance_goes_arena_to_arena() {
    let instance = same_day_pair();
    let mut assignment = Assignment::new(&instance);
    let r1 = RefereeId::new(1);
    assignment.assign(r1, GameId::new(1));
    assignment.assign(r1, GameId::new(2));
    // Home (0, 0) -> A1 (0, 0) -> A2 (100, 0) -> home.
    assert_eq!(total_distance(&instance, &assignment, r1), 200);
}

#[test]
fn test_unavailable_and_under_level_count_once_per_referee() {
    let instance = small_league(Weights::UNIT);
    let mut assignment = Assignment::new(&instance);
    let r1 = RefereeId::new(1);
    let r5 = RefereeId::new(5);
    assignment.assign(r1, GameId::new(1));
    assignment.assign(r1, GameId::new(3));
    assignment.assign(r5, GameId::new(3));
    assignment.assign(r5, GameId::new(4));

    let totals = evaluate(&instance, &assignment);
    assert_eq!(totals[ConstraintKind::MinimumLevel], 1);
    assert_eq!(totals[ConstraintKind::Availability], 1);
    assert!(!has_min_level(&instance, &assignment, r1));
    assert!(!is_available(&instance, &assignment, r5));
}

#[test]
fn test_lack_of_experience() {
    let instance = small_league(Weights::UNIT);
    let mut assignment = Assignment::new(&instance);
    let g = GameId::new(1);
    // Game 1 requires experience 4.
    assignment.assign(RefereeId::new(4), g);
    assert!(lacks_experience(&instance, &assignment, g));
    assignment.assign(RefereeId::new(3), g);
    assert!(!lacks_experience(&instance, &assignment, g));
}

#[test]
fn test_weighted_cost_scales_soft_terms() {
    let unit = small_league(Weights::UNIT);
    let doubled = small_league(Weights::uniform(2));
    let mut assignment = Assignment::new(&unit);
    assignment.assign(RefereeId::new(2), GameId::new(1));
    assignment.assign(RefereeId::new(3), GameId::new(1));

    assert_eq!(compute_cost(&doubled, &assignment), 2 * compute_cost(&unit, &assignment));
}

#[test]
fn test_distribution_term_rounds_up() {
    assert_eq!(distribution_term(7, 2, 3), 1);
    assert_eq!(distribution_term(6, 2, 3), 0);
    assert_eq!(distribution_term(0, 0, 0), 0);
    assert_eq!(frequency_term(4, 1, 4), 0);
    assert_eq!(frequency_term(4, 2, 4), 1);
    assert_eq!(frequency_term(3, 3, 2), 2);
}
