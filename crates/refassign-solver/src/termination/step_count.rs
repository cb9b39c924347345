//! Step count termination.

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a number of steps across all phases.
///
/// Exhaustive phases count every visited search node as a step.
///
/// ```
/// use refassign_solver::termination::StepCountTermination;
///
/// let term = StepCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        solver_scope.total_step_count() >= self.limit
    }
}
