//! Generate and test over every combination of every game.

use refassign_core::{GameId, RefereeId};
use refassign_scoring::{IdSet, ScoreDirector};

use super::{log_phase_end, log_phase_start, Node, Phase, ProgressLog};
use crate::combination::CombinationSpace;
use crate::error::SolverError;
use crate::scope::{PhaseScope, SolverScope};

/// Cursor over the cartesian product of per-game combination spaces.
///
/// The product advances like a mixed-radix counter with game 1 as the
/// lowest digit: the first game that can advance does, and every game
/// before it rolls back to its first crew. Each step leaves one complete
/// assignment on the score director.
#[derive(Debug, Clone)]
pub struct Enumerator {
    spaces: Vec<CombinationSpace>,
    crews: Vec<IdSet<RefereeId>>,
    started: bool,
    exhausted: bool,
}

impl Enumerator {
    pub fn new(director: &ScoreDirector<'_>) -> Self {
        let instance = director.instance();
        let spaces: Vec<CombinationSpace> = instance
            .game_ids()
            .map(|g| CombinationSpace::for_game(instance, g))
            .collect();
        Self {
            crews: vec![IdSet::new(); spaces.len()],
            exhausted: spaces.iter().any(|s| s.is_empty()),
            spaces,
            started: false,
        }
    }

    /// Moves to the next complete assignment and tests it.
    pub fn step(&mut self, director: &mut ScoreDirector<'_>) -> Node {
        if self.exhausted {
            return Node::Exhausted;
        }
        if !self.started {
            self.started = true;
            for (i, space) in self.spaces.iter().enumerate() {
                self.crews[i] = space.first();
                director.replace_referees(GameId::from_index(i), &self.crews[i]);
            }
        } else if !self.advance(director) {
            self.exhausted = true;
            return Node::Exhausted;
        }

        if director.is_feasible() {
            Node::Complete
        } else {
            Node::Infeasible
        }
    }

    fn advance(&mut self, director: &mut ScoreDirector<'_>) -> bool {
        for (i, space) in self.spaces.iter().enumerate() {
            let game = GameId::from_index(i);
            if space.advance(&mut self.crews[i]) {
                director.replace_referees(game, &self.crews[i]);
                return true;
            }
            self.crews[i] = space.first();
            director.replace_referees(game, &self.crews[i]);
        }
        false
    }
}

/// Exhaustive enumeration for small instances.
///
/// Keeps the cheapest feasible assignment; ties go to the one found first.
/// Every tested assignment counts as one step.
#[derive(Debug, Clone, Default)]
pub struct EnumerationPhase;

impl EnumerationPhase {
    pub fn new() -> Self {
        Self
    }
}

impl Phase for EnumerationPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<(), SolverError> {
        let mut phase_scope = PhaseScope::new(solver_scope);
        log_phase_start(&phase_scope, "Enumeration");

        let mut search = Enumerator::new(phase_scope.score_director());
        let mut progress = ProgressLog::new();
        while !phase_scope.should_terminate() {
            let node = search.step(phase_scope.score_director_mut());
            if node == Node::Exhausted {
                break;
            }
            phase_scope.increment_step_count();
            phase_scope.solver_scope().assert_step()?;
            if node == Node::Complete {
                phase_scope.update_best_solution();
            }
            progress.tick(&phase_scope);
        }

        log_phase_end(&phase_scope, "Enumeration");
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Enumeration"
    }
}
