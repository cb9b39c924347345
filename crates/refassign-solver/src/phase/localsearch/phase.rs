//! Local search phase implementation.

use refassign_core::HardSoftScore;
use refassign_scoring::{AssignmentView, ConstraintVector};
use tracing::trace;

use super::{Acceptor, Exploration};
use crate::error::SolverError;
use crate::heuristic::{Move, MoveGenerator};
use crate::phase::{log_phase_end, log_phase_start, Phase, ProgressLog};
use crate::scope::{PhaseScope, SolverScope};

/// Candidates evaluated between two termination checks of a full scan.
const SCAN_CHECK_INTERVAL: usize = 256;

/// Local search phase that improves an existing assignment.
///
/// Each step:
/// 1. Finds a candidate move, either one random draw or the best accepted
///    move of the full neighborhood, per [`Exploration`]
/// 2. Scores it through the delta engine without touching the assignment
/// 3. Applies it if the acceptor agrees and records a new best
///
/// The phase runs until the solver terminates, the acceptor is exhausted,
/// or a full scan finds nothing to accept.
///
/// # Type Parameters
/// * `G` - The move generator
/// * `A` - The acceptor for the generator's moves
#[derive(Debug)]
pub struct LocalSearchPhase<G, A> {
    generator: G,
    acceptor: A,
    exploration: Exploration,
}

/// A move chosen for the step with its effect.
struct Step<M> {
    mv: M,
    delta: ConstraintVector,
    score: HardSoftScore,
}

impl<G, A> LocalSearchPhase<G, A>
where
    G: MoveGenerator,
    A: Acceptor<G::Move>,
{
    pub fn new(generator: G, acceptor: A, exploration: Exploration) -> Self {
        Self {
            generator,
            acceptor,
            exploration,
        }
    }

    pub fn acceptor(&self) -> &A {
        &self.acceptor
    }

    fn sample(
        &mut self,
        phase_scope: &mut PhaseScope<'_, '_>,
        last_step_score: &HardSoftScore,
    ) -> Option<Step<G::Move>> {
        let (director, rng) = phase_scope.solver_scope_mut().director_and_rng();
        let Some(mv) = self.generator.random_move(director, rng) else {
            self.acceptor.candidate_missed();
            return None;
        };
        let delta = self.generator.delta(director, &mv);
        let score = director.score_with(&delta);
        self.acceptor
            .is_accepted(last_step_score, &score, &mv, rng)
            .then_some(Step { mv, delta, score })
    }

    fn scan(
        &mut self,
        phase_scope: &mut PhaseScope<'_, '_>,
        last_step_score: &HardSoftScore,
    ) -> Option<Step<G::Move>> {
        let mut best: Option<Step<G::Move>> = None;
        let mut cursor = self.generator.first_move(phase_scope.score_director());

        while let Some(start) = cursor.take() {
            let (director, rng) = phase_scope.solver_scope_mut().director_and_rng();
            let mut next = Some(start);
            for _ in 0..SCAN_CHECK_INTERVAL {
                let Some(mv) = next.take() else {
                    break;
                };
                next = self.generator.next_move(director, &mv);

                let delta = self.generator.delta(director, &mv);
                let score = director.score_with(&delta);
                let improves_pick = best.as_ref().map_or(true, |b| score > b.score);
                if improves_pick && self.acceptor.is_accepted(last_step_score, &score, &mv, rng) {
                    best = Some(Step { mv, delta, score });
                }
            }
            cursor = next;

            if cursor.is_some() && phase_scope.should_terminate() {
                break;
            }
        }
        best
    }
}

impl<G, A> Phase for LocalSearchPhase<G, A>
where
    G: MoveGenerator,
    A: Acceptor<G::Move>,
{
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<(), SolverError> {
        let mut phase_scope = PhaseScope::new(solver_scope);
        log_phase_start(&phase_scope, "Local Search");

        phase_scope.update_best_solution();
        let mut last_step_score = phase_scope.score_director().score();
        self.acceptor.phase_started(&last_step_score);
        let mut progress = ProgressLog::new();

        while !phase_scope.should_terminate() && !self.acceptor.is_exhausted() {
            self.acceptor.step_started();
            let chosen = match self.exploration {
                Exploration::RandomSample => self.sample(&mut phase_scope, &last_step_score),
                Exploration::FullScan => match self.scan(&mut phase_scope, &last_step_score) {
                    Some(step) => Some(step),
                    None => break,
                },
            };
            phase_scope.increment_step_count();

            if let Some(step) = chosen {
                let (director, rng) = phase_scope.solver_scope_mut().director_and_rng_mut();
                let game = step.mv.game();
                let target = step.mv.target_crew(director.assignment().referees_of(game));
                director.apply(game, &target, step.delta);
                self.acceptor.step_ended(&step.score, &step.mv, rng);
                last_step_score = step.score;

                trace!(
                    event = "step",
                    step = phase_scope.step_count(),
                    mv = %step.mv,
                    score = %step.score,
                );
                phase_scope.update_best_solution();
            }

            phase_scope.solver_scope().assert_step()?;
            progress.tick(&phase_scope);
        }

        self.acceptor.phase_ended();
        log_phase_end(&phase_scope, "Local Search");
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
