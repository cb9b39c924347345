//! Constraint evaluation for referee assignment.
//!
//! This crate provides the mutable side of the problem and everything that
//! scores it:
//! - [`Assignment`], the bidirectional game <-> referee state
//! - the full evaluator ([`evaluate`]) over any [`AssignmentView`]
//! - the delta engine ([`delta`]), exact per-constraint changes of one
//!   game's crew replacement
//! - [`ScoreDirector`], which keeps totals current through the delta engine
//! - [`violation_report`] for explaining a score

pub mod assignment;
pub mod constraint;
pub mod delta;
pub mod director;
pub mod evaluate;
pub mod report;
pub mod set;
pub mod travel;

pub use assignment::{Assignment, AssignmentView, ConsistencyError};
pub use constraint::{ConstraintKind, ConstraintVector};
pub use delta::GameChange;
pub use director::ScoreDirector;
pub use evaluate::{compute_cost, compute_violations, evaluate, has_violations};
pub use report::{violation_report, ConstraintViolation, Subject};
pub use set::IdSet;
pub use travel::{games_conflict, leg_distance};
