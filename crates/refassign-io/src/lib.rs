//! Text formats for referee assignment.
//!
//! - [`InstanceReader`] / [`write_instance`]: the sectioned instance file
//!   (counts header, then divisions, referees, arenas, teams, games)
//! - [`read_solution`] / [`write_solution`]: one line per game listing its
//!   crew
//!
//! Errors carry the 1-based line they were found on.

mod instance;
mod scanner;
mod solution;

pub use instance::{format_instance, write_instance, InstanceReader};
pub use solution::{format_solution, read_solution, read_solution_file, write_solution};
