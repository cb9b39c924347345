//! Termination conditions for solver phases.

mod composite;
mod external;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedStepCountTermination;

/// Trait for determining when to stop solving.
///
/// Phases poll the solver scope's termination between steps (between
/// search nodes for the exhaustive phases), so every phase stops at a
/// consistent state and still reports its best solution.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool;
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        (**self).is_terminated(solver_scope)
    }
}

#[cfg(test)]
mod tests;
