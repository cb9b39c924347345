//! RefAssign Solver Engine
//!
//! This crate provides the search side of referee assignment:
//! - The canonical per-game referee combination generator
//! - Exhaustive phases (backtracking branch and bound, full enumeration)
//! - Construction phases (randomized greedy, random initial state)
//! - Local search moves (whole game, single slot) and the local search phase
//!   with its acceptors
//! - Termination conditions and the `Solver` that wires a configuration
//!   into phases

pub mod combination;
pub mod error;
pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod termination;

pub use combination::{CombinationSpace, Combinations};
pub use error::SolverError;
pub use heuristic::{
    Move, MoveGenerator, SingleSlotGenerator, SingleSlotMove, WholeGameGenerator, WholeGameMove,
};
pub use phase::{
    backtracking::{BacktrackingPhase, Backtracker},
    enumeration::{EnumerationPhase, Enumerator},
    greedy::GreedyPhase,
    localsearch::{
        Acceptor, Exploration, HillClimbingAcceptor, LocalSearchPhase,
        SimulatedAnnealingAcceptor, SteepestDescentAcceptor, TabuSearchAcceptor,
    },
    random_state::{random_initial_state, RandomStatePhase},
    Node, Phase,
};
pub use scope::{PhaseScope, SolverScope};
pub use solver::{SolveOutcome, Solver};
pub use termination::{
    ExternalTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination,
};
