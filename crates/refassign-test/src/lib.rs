//! Shared test fixtures for RefAssign crates.
//!
//! This crate provides problem instances for testing. It depends only on
//! `refassign-core` so that the scoring and solver crates can both use it as
//! a dev-dependency without pulling in a second copy of their own types.
//!
//! - [`fixtures`] - small hand-built instances with known optima
//! - [`random`] - seeded random instances and crews
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! refassign-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use refassign_test::fixtures::single_game;
//! use refassign_test::random::{random_instance, RandomInstanceConfig};
//! ```

pub mod fixtures;
pub mod random;

pub use fixtures::{at, referees, same_day_pair, single_game, small_league};
pub use random::{random_crews, random_instance, RandomInstanceConfig};
