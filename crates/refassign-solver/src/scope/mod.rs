//! Scopes carrying solver and phase state.

mod phase;
mod solver;

pub use phase::PhaseScope;
pub use solver::SolverScope;

#[cfg(test)]
mod tests;
