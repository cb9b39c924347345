use refassign_core::RefereeId;
use refassign_scoring::ScoreDirector;
use refassign_test::fixtures::single_game;

use super::*;

#[test]
fn test_first_solution_is_best() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 1);
    assert!(scope.best_score().is_none());
    assert!(scope.update_best_solution());
    assert_eq!(scope.best_score(), Some(scope.score_director().score()));
}

#[test]
fn test_best_only_replaced_by_strictly_better() {
    let instance = single_game(1, 2, 2);
    let game = instance.game_ids().next().unwrap();
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 1);
    scope.update_best_solution();

    scope.score_director_mut().assign(RefereeId::new(1), game);
    assert!(scope.update_best_solution());
    let best = scope.best_score();
    assert!(!scope.update_best_solution());

    scope.score_director_mut().unassign(RefereeId::new(1), game);
    assert!(!scope.update_best_solution());
    assert_eq!(scope.best_score(), best);

    let (assignment, score) = scope.take_best().unwrap();
    assert!(assignment.is_assigned(RefereeId::new(1), game));
    assert_eq!(score.violations(), 0);
}

#[test]
fn test_phase_scope_counts_steps() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 1);
    scope.start_solving();
    {
        let mut phase = PhaseScope::new(&mut scope);
        assert_eq!(phase.phase_index(), 0);
        phase.increment_step_count();
        phase.increment_step_count();
        assert_eq!(phase.step_count(), 2);
        assert_eq!(phase.best_score_label(), "none");
    }
    assert_eq!(scope.total_step_count(), 2);
    assert_eq!(scope.unimproved_step_count(), 2);
    assert_eq!(PhaseScope::new(&mut scope).phase_index(), 1);
}

#[test]
fn test_take_best_or_working_without_best() {
    let instance = single_game(1, 2, 2);
    let game = instance.game_ids().next().unwrap();
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 1);
    scope.score_director_mut().assign(RefereeId::new(2), game);
    let assignment = scope.take_best_or_working();
    assert!(assignment.is_assigned(RefereeId::new(2), game));
}

#[test]
fn test_assert_step_only_with_full_assert() {
    let instance = single_game(1, 2, 2);
    let scope = SolverScope::with_seed(ScoreDirector::new(&instance), 1).with_full_assert(true);
    assert!(scope.assert_step().is_ok());
    assert_eq!(scope.score_director().score().violations(), 1);
}
