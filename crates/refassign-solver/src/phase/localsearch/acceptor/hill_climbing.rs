//! Hill climbing acceptor.

use rand::rngs::StdRng;
use refassign_core::HardSoftScore;

use super::Acceptor;
use crate::heuristic::Move;

/// Accepts any move that does not make the score worse.
///
/// Sideways moves are taken so the search can walk across plateaus.
///
/// # Example
///
/// ```
/// use refassign_solver::HillClimbingAcceptor;
///
/// let acceptor = HillClimbingAcceptor::new();
/// ```
#[derive(Debug, Clone, Default)]
pub struct HillClimbingAcceptor;

impl HillClimbingAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<M: Move> Acceptor<M> for HillClimbingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        _mv: &M,
        _rng: &mut StdRng,
    ) -> bool {
        move_score >= last_step_score
    }
}
