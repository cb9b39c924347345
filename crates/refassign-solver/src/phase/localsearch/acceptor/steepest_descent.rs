//! Steepest descent acceptor.

use rand::rngs::StdRng;
use refassign_core::HardSoftScore;

use super::Acceptor;
use crate::heuristic::Move;

/// Accepts only strictly improving moves.
///
/// Paired with a full neighborhood scan, the phase takes the best
/// improving move each step and stops at a local optimum.
#[derive(Debug, Clone, Default)]
pub struct SteepestDescentAcceptor;

impl SteepestDescentAcceptor {
    pub fn new() -> Self {
        Self
    }
}

impl<M: Move> Acceptor<M> for SteepestDescentAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        _mv: &M,
        _rng: &mut StdRng,
    ) -> bool {
        move_score > last_step_score
    }
}
