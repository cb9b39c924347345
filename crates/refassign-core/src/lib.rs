//! RefAssign Core - problem model for referee assignment
//!
//! This crate provides the immutable side of the problem:
//! - Entity tables (divisions, teams, arenas, referees, games)
//! - Time windows and locations with the travel model built on them
//! - Constraint weights fixed at instance construction
//! - Score types used to compare assignments

pub mod domain;
pub mod error;
pub mod geo;
pub mod ids;
pub mod instance;
pub mod score;
pub mod settings;
pub mod time;

pub use domain::{Arena, Division, Game, Referee, Team};
pub use error::{RefAssignError, Result};
pub use geo::{travel_minutes, Location};
pub use ids::{ArenaId, DivisionId, GameId, RefereeId, TeamId};
pub use instance::{Instance, InstanceBuilder};
pub use score::{HardSoftScore, Score};
pub use settings::{ProblemSettings, Weights, DEFAULT_AVERAGE_SPEED_KMH};
pub use time::{TimeWindow, DEFAULT_MATCH_MINUTES};
