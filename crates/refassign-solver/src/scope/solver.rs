//! Solver-level scope.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use refassign_core::HardSoftScore;
use refassign_scoring::{Assignment, ScoreDirector};
use tracing::debug;

use crate::error::SolverError;
use crate::termination::Termination;

/// Top-level scope for the entire solving process.
///
/// Owns the score director, the best assignment found so far, the random
/// source and the termination condition every phase polls.
pub struct SolverScope<'a> {
    score_director: ScoreDirector<'a>,
    best_assignment: Option<Assignment>,
    best_score: Option<HardSoftScore>,
    rng: StdRng,
    start_time: Option<Instant>,
    total_step_count: u64,
    last_improvement_step: u64,
    phase_count: usize,
    termination: Option<Box<dyn Termination>>,
    full_assert: bool,
}

impl<'a> SolverScope<'a> {
    pub fn new(score_director: ScoreDirector<'a>) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    pub fn with_seed(score_director: ScoreDirector<'a>, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    fn with_rng(score_director: ScoreDirector<'a>, rng: StdRng) -> Self {
        Self {
            score_director,
            best_assignment: None,
            best_score: None,
            rng,
            start_time: None,
            total_step_count: 0,
            last_improvement_step: 0,
            phase_count: 0,
            termination: None,
            full_assert: false,
        }
    }

    pub fn with_termination(mut self, termination: Box<dyn Termination>) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Verify the incremental totals after every step.
    pub fn with_full_assert(mut self, enabled: bool) -> Self {
        self.full_assert = enabled;
        self
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.total_step_count = 0;
        self.last_improvement_step = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn score_director(&self) -> &ScoreDirector<'a> {
        &self.score_director
    }

    pub fn score_director_mut(&mut self) -> &mut ScoreDirector<'a> {
        &mut self.score_director
    }

    /// The score director together with the random source, for move
    /// sampling that reads the one and advances the other.
    pub fn director_and_rng(&mut self) -> (&ScoreDirector<'a>, &mut StdRng) {
        (&self.score_director, &mut self.rng)
    }

    pub fn director_and_rng_mut(&mut self) -> (&mut ScoreDirector<'a>, &mut StdRng) {
        (&mut self.score_director, &mut self.rng)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn best_assignment(&self) -> Option<&Assignment> {
        self.best_assignment.as_ref()
    }

    pub fn best_score(&self) -> Option<HardSoftScore> {
        self.best_score
    }

    /// Records the working assignment as best if it beats the incumbent,
    /// or if there is none yet. Returns whether it was recorded.
    pub fn update_best_solution(&mut self) -> bool {
        let score = self.score_director.score();
        let is_better = self.best_score.map_or(true, |best| score > best);
        if is_better {
            self.best_assignment = Some(self.score_director.assignment().clone());
            self.best_score = Some(score);
            self.last_improvement_step = self.total_step_count;
            debug!(
                event = "new_best",
                step = self.total_step_count,
                score = %score,
            );
        }
        is_better
    }

    /// Index of the phase about to start.
    pub fn start_phase(&mut self) -> usize {
        self.phase_count += 1;
        self.phase_count - 1
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Steps taken since the best solution last improved.
    pub fn unimproved_step_count(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    pub fn should_terminate(&self) -> bool {
        self.termination
            .as_ref()
            .is_some_and(|t| t.is_terminated(self))
    }

    /// Checks the score director against a full evaluation when running
    /// with full assertions. A no-op otherwise.
    pub fn assert_step(&self) -> Result<(), SolverError> {
        if !self.full_assert {
            return Ok(());
        }
        self.score_director
            .assert_totals()
            .map_err(|source| SolverError::ScoreCorruption {
                step: self.total_step_count,
                source,
            })
    }

    /// Consumes the scope, returning the best assignment and its score, or
    /// `None` if no phase ever recorded one.
    pub fn take_best(self) -> Option<(Assignment, HardSoftScore)> {
        self.best_assignment.zip(self.best_score)
    }

    /// Consumes the scope, returning the best assignment or, failing that,
    /// the working one.
    pub fn take_best_or_working(self) -> Assignment {
        match self.best_assignment {
            Some(best) => best,
            None => self.score_director.into_assignment(),
        }
    }
}

impl std::fmt::Debug for SolverScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .field("termination", &self.termination)
            .finish()
    }
}
