//! Local search phase
//!
//! Improves an existing assignment by repeatedly applying moves that an
//! acceptance criterion lets through.

mod acceptor;
mod phase;

pub use acceptor::{
    Acceptor, HillClimbingAcceptor, SimulatedAnnealingAcceptor, SteepestDescentAcceptor,
    TabuSearchAcceptor,
};
pub use phase::LocalSearchPhase;

/// How a step looks for its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Exploration {
    /// Draw one random feasible move and ask the acceptor about it. A
    /// rejected draw still counts as a step.
    #[default]
    RandomSample,
    /// Walk the whole feasible neighborhood and take the best accepted
    /// move. The phase ends when no move is accepted.
    FullScan,
}

#[cfg(test)]
mod tests;
