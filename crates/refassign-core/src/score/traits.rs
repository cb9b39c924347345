//! Core Score trait definition

use std::fmt::{Debug, Display};
use std::ops::{Add, Neg, Sub};

/// Core trait for score types.
///
/// Scores are immutable values with a total order where greater means
/// better. Acceptors and terminations rely only on this trait.
pub trait Score:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + Eq
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Returns true if no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    /// Collapses the score into one number for temperature-based acceptance.
    ///
    /// Higher levels dominate lower ones by a large fixed factor.
    fn to_scalar(&self) -> f64;
}
