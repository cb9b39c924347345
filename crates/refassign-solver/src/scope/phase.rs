//! Phase-level scope.

use std::time::{Duration, Instant};

use refassign_scoring::ScoreDirector;

use super::SolverScope;

/// Scope for a single phase of solving.
pub struct PhaseScope<'s, 'a> {
    solver_scope: &'s mut SolverScope<'a>,
    phase_index: usize,
    step_count: u64,
    start_time: Instant,
}

impl<'s, 'a> PhaseScope<'s, 'a> {
    /// Opens the scope of the next phase.
    pub fn new(solver_scope: &'s mut SolverScope<'a>) -> Self {
        let phase_index = solver_scope.start_phase();
        Self {
            solver_scope,
            phase_index,
            step_count: 0,
            start_time: Instant::now(),
        }
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Increments both the phase and the solver step counts.
    pub fn increment_step_count(&mut self) -> u64 {
        self.step_count += 1;
        self.solver_scope.increment_step_count();
        self.step_count
    }

    /// Steps per second over the phase so far.
    pub fn speed(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.step_count as f64 / secs) as u64
        } else {
            0
        }
    }

    pub fn solver_scope(&self) -> &SolverScope<'a> {
        self.solver_scope
    }

    pub fn solver_scope_mut(&mut self) -> &mut SolverScope<'a> {
        self.solver_scope
    }

    pub fn score_director(&self) -> &ScoreDirector<'a> {
        self.solver_scope.score_director()
    }

    pub fn score_director_mut(&mut self) -> &mut ScoreDirector<'a> {
        self.solver_scope.score_director_mut()
    }

    pub fn should_terminate(&self) -> bool {
        self.solver_scope.should_terminate()
    }

    pub fn update_best_solution(&mut self) -> bool {
        self.solver_scope.update_best_solution()
    }

    /// Best score so far rendered for log events.
    pub fn best_score_label(&self) -> String {
        self.solver_scope
            .best_score()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string())
    }
}
