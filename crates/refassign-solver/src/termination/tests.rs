use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use refassign_scoring::ScoreDirector;
use refassign_test::fixtures::single_game;

use super::*;
use crate::scope::SolverScope;

#[test]
fn test_step_count() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0);
    scope.start_solving();
    let term = StepCountTermination::new(3);

    for _ in 0..2 {
        scope.increment_step_count();
    }
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_needs_started_scope() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0);
    let term = TimeTermination::new(Duration::ZERO);
    assert!(!term.is_terminated(&scope));
    scope.start_solving();
    assert!(term.is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_unimproved_resets_on_new_best() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0);
    scope.start_solving();
    scope.update_best_solution();
    let term = UnimprovedStepCountTermination::new(2);

    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));

    let game = instance.game_ids().next().unwrap();
    scope
        .score_director_mut()
        .assign(refassign_core::RefereeId::new(1), game);
    assert!(scope.update_best_solution());
    scope.increment_step_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_step_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_external_flag() {
    let instance = single_game(1, 2, 2);
    let scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0);
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(Arc::clone(&flag));
    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_or_combinations() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0);
    scope.start_solving();
    scope.increment_step_count();

    let tuple = OrTermination((
        TimeTermination::seconds(3600),
        StepCountTermination::new(1),
    ));
    assert!(tuple.is_terminated(&scope));

    let none: OrTermination<Vec<Box<dyn Termination>>> = OrTermination(Vec::new());
    assert!(!none.is_terminated(&scope));

    let boxed: OrTermination<Vec<Box<dyn Termination>>> = OrTermination(vec![
        Box::new(StepCountTermination::new(5)),
        Box::new(StepCountTermination::new(1)),
    ]);
    assert!(boxed.is_terminated(&scope));
}

#[test]
fn test_scope_polls_configured_termination() {
    let instance = single_game(1, 2, 2);
    let mut scope = SolverScope::with_seed(ScoreDirector::new(&instance), 0)
        .with_termination(Box::new(StepCountTermination::new(1)));
    scope.start_solving();
    assert!(!scope.should_terminate());
    scope.increment_step_count();
    assert!(scope.should_terminate());
}
