//! Termination based on lack of improvement.

use super::Termination;
use crate::scope::SolverScope;

/// Terminates once `limit` steps pass without a new best solution.
///
/// The solver scope remembers the step of the last improvement, so this
/// condition keeps no state of its own.
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for UnimprovedStepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        solver_scope.unimproved_step_count() >= self.limit
    }
}
