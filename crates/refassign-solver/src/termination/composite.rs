//! OR composition of termination conditions.

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when ANY child terminates.
///
/// Wraps either a tuple of terminations, for combinations fixed at compile
/// time, or a `Vec<Box<dyn Termination>>` for combinations built from
/// configuration.
///
/// ```
/// use refassign_solver::termination::{OrTermination, StepCountTermination, TimeTermination};
///
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     StepCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
                $((self.0).$idx.is_terminated(solver_scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);

impl Termination for OrTermination<Vec<Box<dyn Termination>>> {
    fn is_terminated(&self, solver_scope: &SolverScope<'_>) -> bool {
        self.0.iter().any(|t| t.is_terminated(solver_scope))
    }
}
