//! Solver phases for different solving strategies
//!
//! - [`BacktrackingPhase`](backtracking::BacktrackingPhase): branch and bound
//!   over one combination per game
//! - [`EnumerationPhase`](enumeration::EnumerationPhase): every combination of
//!   every game, tested when complete
//! - [`GreedyPhase`](greedy::GreedyPhase): randomized greedy construction
//! - [`RandomStatePhase`](random_state::RandomStatePhase): random initial
//!   crews for local search
//! - [`LocalSearchPhase`](localsearch::LocalSearchPhase): improves an
//!   existing assignment one move at a time

pub mod backtracking;
pub mod enumeration;
pub mod greedy;
pub mod localsearch;
pub mod random_state;

use std::fmt::Debug;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::SolverError;
use crate::scope::{PhaseScope, SolverScope};

/// A phase of the solving process.
///
/// Phases run in sequence over the solver scope's working assignment.
/// Each records the solutions it finds through the scope, so the best one
/// survives termination at any point.
pub trait Phase: Send + Debug {
    /// Executes this phase.
    ///
    /// Fails only when full assertions are enabled and the incremental
    /// score bookkeeping disagrees with a full evaluation.
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<(), SolverError>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

/// Outcome of visiting one node of an exhaustive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// A feasible partial assignment; the search goes deeper next.
    Partial,
    /// The assignment breaks a hard constraint.
    Infeasible,
    /// Every game is decided and no hard constraint is broken.
    Complete,
    /// The search space is used up; no node was visited.
    Exhausted,
}

pub(crate) fn log_phase_start(phase_scope: &PhaseScope<'_, '_>, phase: &'static str) {
    info!(
        event = "phase_start",
        phase = phase,
        phase_index = phase_scope.phase_index(),
    );
}

pub(crate) fn log_phase_end(phase_scope: &PhaseScope<'_, '_>, phase: &'static str) {
    info!(
        event = "phase_end",
        phase = phase,
        phase_index = phase_scope.phase_index(),
        duration_ms = phase_scope.elapsed().as_millis() as u64,
        steps = phase_scope.step_count(),
        speed = phase_scope.speed(),
        score = phase_scope.best_score_label(),
    );
}

/// Emits a `progress` event at most once per interval.
#[derive(Debug)]
pub(crate) struct ProgressLog {
    interval: Duration,
    last_time: Instant,
    last_steps: u64,
}

impl ProgressLog {
    pub(crate) fn new() -> Self {
        Self {
            interval: Duration::from_secs(1),
            last_time: Instant::now(),
            last_steps: 0,
        }
    }

    pub(crate) fn tick(&mut self, phase_scope: &PhaseScope<'_, '_>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_time);
        if elapsed < self.interval {
            return;
        }
        let steps = phase_scope.step_count();
        let speed = ((steps - self.last_steps) as f64 / elapsed.as_secs_f64()) as u64;
        debug!(
            event = "progress",
            steps = steps,
            speed = speed,
            score = phase_scope.best_score_label(),
        );
        self.last_time = now;
        self.last_steps = steps;
    }
}
