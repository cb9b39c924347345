//! Score types for comparing assignments
//!
//! A referee assignment is judged first by how many hard constraints it
//! breaks and then by its weighted soft cost. Both are penalties, so scores
//! store them negated: higher is better and zero is perfect.

#[macro_use]
mod macros;

mod hard_soft;
mod traits;

#[cfg(test)]
mod tests;

pub use hard_soft::HardSoftScore;
pub use traits::Score;
