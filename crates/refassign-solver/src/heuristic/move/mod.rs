//! Move system for local search.
//!
//! A move changes the crew of exactly one game. Two kinds exist:
//! - [`WholeGameMove`]: replace the crew with another allowed combination
//! - [`SingleSlotMove`]: add, remove, or swap one referee
//!
//! Each kind has a [`MoveGenerator`] that samples random feasible moves and
//! walks the feasible neighborhood in a fixed order. Feasibility and scoring
//! go through the score director's delta engine, so evaluating a move never
//! touches the working assignment.

mod single_slot;
mod whole_game;

use std::fmt::{Debug, Display};

use rand::rngs::StdRng;
use refassign_core::{GameId, RefereeId};
use refassign_scoring::{AssignmentView, ConstraintVector, IdSet, ScoreDirector};

pub use single_slot::{SingleSlotGenerator, SingleSlotMove};
pub use whole_game::{WholeGameGenerator, WholeGameMove};

/// Rejection-sampling budget of one random move when none is configured.
pub const DEFAULT_RANDOM_MOVE_ATTEMPTS: usize = 1000;

/// A change to the crew of one game.
pub trait Move: Clone + PartialEq + Debug + Display + Send {
    /// The game whose crew changes.
    fn game(&self) -> GameId;

    /// Whether the move applies to a game whose crew is `current`.
    fn is_doable(&self, current: &IdSet<RefereeId>) -> bool;

    /// The crew the game has after the move.
    fn target_crew(&self, current: &IdSet<RefereeId>) -> IdSet<RefereeId>;

    /// The move that undoes this one.
    fn inverse(&self) -> Self;
}

/// Produces moves of one kind against the working assignment.
pub trait MoveGenerator: Send + Debug {
    type Move: Move;

    /// Upper bound on the candidates [`random_move`](Self::random_move) draws.
    fn attempts(&self) -> usize;

    /// One uniformly drawn candidate, not necessarily feasible.
    fn random_candidate(&self, director: &ScoreDirector<'_>, rng: &mut StdRng)
        -> Option<Self::Move>;

    /// The first candidate of the neighborhood, not necessarily feasible.
    fn first_candidate(&self, director: &ScoreDirector<'_>) -> Option<Self::Move>;

    /// The candidate following `mv` in neighborhood order.
    fn next_candidate(&self, director: &ScoreDirector<'_>, mv: &Self::Move) -> Option<Self::Move>;

    fn name(&self) -> &'static str;

    /// Draws candidates until a feasible one turns up. Returns `None` once
    /// the attempt budget is spent.
    fn random_move(&self, director: &ScoreDirector<'_>, rng: &mut StdRng) -> Option<Self::Move> {
        for _ in 0..self.attempts() {
            if let Some(candidate) = self.random_candidate(director, rng) {
                if self.is_feasible(director, &candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// The first feasible move in neighborhood order.
    fn first_move(&self, director: &ScoreDirector<'_>) -> Option<Self::Move> {
        let candidate = self.first_candidate(director)?;
        self.feasible_from(director, candidate)
    }

    /// The feasible move following `mv` in neighborhood order.
    fn next_move(&self, director: &ScoreDirector<'_>, mv: &Self::Move) -> Option<Self::Move> {
        let candidate = self.next_candidate(director, mv)?;
        self.feasible_from(director, candidate)
    }

    /// `candidate` itself if feasible, else the next feasible one after it.
    fn feasible_from(
        &self,
        director: &ScoreDirector<'_>,
        mut candidate: Self::Move,
    ) -> Option<Self::Move> {
        loop {
            if self.is_feasible(director, &candidate) {
                return Some(candidate);
            }
            candidate = self.next_candidate(director, &candidate)?;
        }
    }

    /// A move is feasible if it applies to the current crew, changes it,
    /// and worsens no hard constraint.
    fn is_feasible(&self, director: &ScoreDirector<'_>, mv: &Self::Move) -> bool {
        let current = director.assignment().referees_of(mv.game());
        if !mv.is_doable(current) {
            return false;
        }
        let target = mv.target_crew(current);
        target != *current && !director.hard_delta_for(mv.game(), &target).worsens_hard()
    }

    /// Change of every constraint total if `mv` were made.
    fn delta(&self, director: &ScoreDirector<'_>, mv: &Self::Move) -> ConstraintVector {
        let target = mv.target_crew(director.assignment().referees_of(mv.game()));
        director.delta_for(mv.game(), &target)
    }

    /// Makes `mv` on the working assignment and returns the applied change.
    fn make_move(&self, director: &mut ScoreDirector<'_>, mv: &Self::Move) -> ConstraintVector {
        let target = mv.target_crew(director.assignment().referees_of(mv.game()));
        director.replace_referees(mv.game(), &target)
    }
}

#[cfg(test)]
mod tests;
