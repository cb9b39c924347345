//! HardSoftScore - violations and weighted cost as one comparable value

use std::cmp::Ordering;
use std::fmt;

use super::traits::Score;

/// A score with separate hard and soft levels.
///
/// For referee assignment the hard level is minus the number of violated
/// hard constraints and the soft level is minus the weighted soft cost.
/// Hard levels are compared first.
///
/// # Examples
///
/// ```
/// use refassign_core::HardSoftScore;
///
/// let broken = HardSoftScore::from_penalties(1, 10);
/// let expensive = HardSoftScore::from_penalties(0, 200);
/// let cheap = HardSoftScore::from_penalties(0, 50);
///
/// assert!(expensive > broken);
/// assert!(cheap > expensive);
/// assert_eq!(cheap.cost(), 50);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Builds a score from a violation count and a cost, both non-negative.
    #[inline]
    pub const fn from_penalties(violations: i64, cost: i64) -> Self {
        HardSoftScore {
            hard: -violations,
            soft: -cost,
        }
    }

    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Number of violated hard constraints.
    #[inline]
    pub const fn violations(&self) -> i64 {
        -self.hard
    }

    /// Weighted soft cost.
    #[inline]
    pub const fn cost(&self) -> i64 {
        -self.soft
    }
}

impl Score for HardSoftScore {
    #[inline]
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    #[inline]
    fn to_scalar(&self) -> f64 {
        self.hard as f64 * 1_000_000.0 + self.soft as f64
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl_score_ops!(HardSoftScore { hard, soft } => of);

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}
