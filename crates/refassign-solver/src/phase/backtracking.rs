//! Branch and bound over one crew decision per game.
//!
//! Games are decided in chronological order. Each level tries the crews of
//! its game in canonical combination order; a level whose crew breaks a
//! referee rule (travel, availability, level) is abandoned before any later
//! game is decided. Crews are always drawn from the division's allowed
//! sizes, so minimum and maximum hold by construction.
//!
//! Only hard constraints prune: the soft cost of a partial assignment is
//! not a lower bound on the cost of its completions.

use refassign_core::{GameId, RefereeId};
use refassign_scoring::{ConstraintKind, IdSet, ScoreDirector};
use tracing::debug;

use super::{log_phase_end, log_phase_start, Node, Phase, ProgressLog};
use crate::combination::CombinationSpace;
use crate::error::SolverError;
use crate::scope::{PhaseScope, SolverScope};

/// Cursor over the backtracking search tree.
///
/// Each call to [`step`](Backtracker::step) visits exactly one node by
/// placing one crew on the score director's working assignment, so a
/// caller can stop between any two steps.
#[derive(Debug, Clone)]
pub struct Backtracker {
    spaces: Vec<CombinationSpace>,
    crews: Vec<IdSet<RefereeId>>,
    level: usize,
    last: Option<Node>,
}

impl Backtracker {
    pub fn new(director: &ScoreDirector<'_>) -> Self {
        let instance = director.instance();
        let spaces: Vec<CombinationSpace> = instance
            .game_ids()
            .map(|g| CombinationSpace::for_game(instance, g))
            .collect();
        Self {
            crews: vec![IdSet::new(); spaces.len()],
            spaces,
            level: 0,
            last: None,
        }
    }

    /// Current depth: the index of the game decided last.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Visits the next node.
    ///
    /// Returns [`Node::Complete`] when the working assignment is a feasible
    /// full solution, and [`Node::Exhausted`] once the tree is used up, after
    /// which the working assignment is empty again.
    pub fn step(&mut self, director: &mut ScoreDirector<'_>) -> Node {
        let node = match self.last {
            None if self.spaces.is_empty() => Node::Complete,
            None => self.descend(director, 0),
            Some(Node::Partial) => self.descend(director, self.level + 1),
            Some(Node::Infeasible) | Some(Node::Complete) => self.backtrack(director),
            Some(Node::Exhausted) => Node::Exhausted,
        };
        self.last = Some(node);
        node
    }

    fn descend(&mut self, director: &mut ScoreDirector<'_>, level: usize) -> Node {
        self.level = level;
        let space = self.spaces[level];
        if space.is_empty() {
            return Node::Infeasible;
        }
        self.crews[level] = space.first();
        self.place(director)
    }

    fn backtrack(&mut self, director: &mut ScoreDirector<'_>) -> Node {
        if self.spaces.is_empty() {
            return Node::Exhausted;
        }
        loop {
            let space = self.spaces[self.level];
            if !space.is_empty() && space.advance(&mut self.crews[self.level]) {
                return self.place(director);
            }
            director.replace_referees(GameId::from_index(self.level), &IdSet::new());
            if self.level == 0 {
                return Node::Exhausted;
            }
            self.level -= 1;
        }
    }

    fn place(&mut self, director: &mut ScoreDirector<'_>) -> Node {
        director.replace_referees(GameId::from_index(self.level), &self.crews[self.level]);
        let totals = director.totals();
        let feasible = totals[ConstraintKind::FeasibleTravel] == 0
            && totals[ConstraintKind::Availability] == 0
            && totals[ConstraintKind::MinimumLevel] == 0;
        if !feasible {
            Node::Infeasible
        } else if self.level + 1 == self.spaces.len() {
            Node::Complete
        } else {
            Node::Partial
        }
    }
}

/// Exhaustive branch and bound search.
///
/// Keeps the cheapest feasible full assignment; ties go to the one found
/// first. Every visited node counts as one step.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingPhase;

impl BacktrackingPhase {
    pub fn new() -> Self {
        Self
    }
}

impl Phase for BacktrackingPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<(), SolverError> {
        let mut phase_scope = PhaseScope::new(solver_scope);
        log_phase_start(&phase_scope, "Backtracking");

        let mut search = Backtracker::new(phase_scope.score_director());
        let mut progress = ProgressLog::new();
        let mut solutions = 0u64;
        loop {
            if phase_scope.should_terminate() {
                debug!(level = search.level(), "backtracking interrupted");
                break;
            }
            let node = search.step(phase_scope.score_director_mut());
            if node == Node::Exhausted {
                break;
            }
            phase_scope.increment_step_count();
            phase_scope.solver_scope().assert_step()?;
            if node == Node::Complete {
                solutions += 1;
                phase_scope.update_best_solution();
            }
            progress.tick(&phase_scope);
        }

        debug!(solutions = solutions, "backtracking finished");
        log_phase_end(&phase_scope, "Backtracking");
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Backtracking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refassign_core::Instance;
    use refassign_scoring::AssignmentView;
    use refassign_test::fixtures::{same_day_pair, single_game};

    fn walk(instance: &Instance) -> Vec<Node> {
        let mut director = ScoreDirector::new(instance);
        let mut search = Backtracker::new(&director);
        let mut nodes = Vec::new();
        loop {
            let node = search.step(&mut director);
            nodes.push(node);
            if node == Node::Exhausted {
                break;
            }
        }
        assert_eq!(director.assignment().total_assignments(), 0);
        nodes
    }

    #[test]
    fn test_single_game_visits_every_crew() {
        let nodes = walk(&single_game(1, 2, 3));
        assert_eq!(nodes.len(), 7);
        assert!(nodes[..6].iter().all(|n| *n == Node::Complete));
    }

    #[test]
    fn test_travel_conflict_prunes() {
        use Node::*;
        assert_eq!(
            walk(&same_day_pair()),
            vec![Partial, Infeasible, Complete, Partial, Complete, Infeasible, Exhausted]
        );
    }

    #[test]
    fn test_zero_games_is_one_solution() {
        let instance = Instance::builder().build().unwrap();
        assert_eq!(walk(&instance), vec![Node::Complete, Node::Exhausted]);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let instance = single_game(1, 1, 1);
        let mut director = ScoreDirector::new(&instance);
        let mut search = Backtracker::new(&director);
        assert_eq!(search.step(&mut director), Node::Complete);
        assert_eq!(search.step(&mut director), Node::Exhausted);
        assert_eq!(search.step(&mut director), Node::Exhausted);
    }
}
