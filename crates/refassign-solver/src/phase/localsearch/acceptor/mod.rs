//! Acceptors for local search move acceptance.
//!
//! Acceptors decide whether a move should be taken by comparing the score
//! it leads to with the score of the last step.

mod hill_climbing;
mod simulated_annealing;
mod steepest_descent;
mod tabu_search;

use std::fmt::Debug;

use rand::rngs::StdRng;
use refassign_core::HardSoftScore;

use crate::heuristic::Move;

pub use hill_climbing::HillClimbingAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;
pub use steepest_descent::SteepestDescentAcceptor;
pub use tabu_search::TabuSearchAcceptor;

/// Trait for accepting or rejecting moves in local search.
///
/// Acceptors implement different strategies for escaping local optima,
/// such as simulated annealing or tabu search.
pub trait Acceptor<M: Move>: Send + Debug {
    /// Returns true if `mv`, leading to `move_score`, should be accepted
    /// given the previous step's score.
    fn is_accepted(
        &mut self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        mv: &M,
        rng: &mut StdRng,
    ) -> bool;

    /// Called when a phase starts.
    fn phase_started(&mut self, _initial_score: &HardSoftScore) {}

    /// Called when a phase ends.
    fn phase_ended(&mut self) {}

    /// Called when a step starts.
    fn step_started(&mut self) {}

    /// Called when a random draw found no feasible move to judge.
    fn candidate_missed(&mut self) {}

    /// Called when a step ends with an accepted move.
    fn step_ended(&mut self, _step_score: &HardSoftScore, _mv: &M, _rng: &mut StdRng) {}

    /// True once the acceptor will accept nothing further.
    fn is_exhausted(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests;
