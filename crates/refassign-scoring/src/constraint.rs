//! Constraint identifiers and per-constraint value vectors.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Neg, Sub, SubAssign};

use refassign_core::{HardSoftScore, Weights};

/// The twelve constraints of the referee assignment problem.
///
/// Hard constraints count one unit per violated game or referee. Soft
/// constraints contribute a non-negative raw cost that is scaled by its
/// weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    MinReferees,
    MaxReferees,
    FeasibleTravel,
    Availability,
    MinimumLevel,
    LackOfExperience,
    OptionalReferee,
    RefereeIncompatibility,
    TeamIncompatibility,
    GamesDistribution,
    TotalDistance,
    AssignmentFrequency,
}

impl ConstraintKind {
    pub const COUNT: usize = 12;

    pub const ALL: [ConstraintKind; Self::COUNT] = [
        ConstraintKind::MinReferees,
        ConstraintKind::MaxReferees,
        ConstraintKind::FeasibleTravel,
        ConstraintKind::Availability,
        ConstraintKind::MinimumLevel,
        ConstraintKind::LackOfExperience,
        ConstraintKind::OptionalReferee,
        ConstraintKind::RefereeIncompatibility,
        ConstraintKind::TeamIncompatibility,
        ConstraintKind::GamesDistribution,
        ConstraintKind::TotalDistance,
        ConstraintKind::AssignmentFrequency,
    ];

    pub const HARD: [ConstraintKind; 5] = [
        ConstraintKind::MinReferees,
        ConstraintKind::MaxReferees,
        ConstraintKind::FeasibleTravel,
        ConstraintKind::Availability,
        ConstraintKind::MinimumLevel,
    ];

    pub const SOFT: [ConstraintKind; 7] = [
        ConstraintKind::LackOfExperience,
        ConstraintKind::OptionalReferee,
        ConstraintKind::RefereeIncompatibility,
        ConstraintKind::TeamIncompatibility,
        ConstraintKind::GamesDistribution,
        ConstraintKind::TotalDistance,
        ConstraintKind::AssignmentFrequency,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn is_hard(self) -> bool {
        (self as usize) < 5
    }

    pub const fn name(self) -> &'static str {
        match self {
            ConstraintKind::MinReferees => "min_referees",
            ConstraintKind::MaxReferees => "max_referees",
            ConstraintKind::FeasibleTravel => "feasible_travel",
            ConstraintKind::Availability => "availability",
            ConstraintKind::MinimumLevel => "minimum_level",
            ConstraintKind::LackOfExperience => "lack_of_experience",
            ConstraintKind::OptionalReferee => "optional_referee",
            ConstraintKind::RefereeIncompatibility => "referee_incompatibility",
            ConstraintKind::TeamIncompatibility => "team_incompatibility",
            ConstraintKind::GamesDistribution => "games_distribution",
            ConstraintKind::TotalDistance => "total_distance",
            ConstraintKind::AssignmentFrequency => "assignment_frequency",
        }
    }

    /// Multiplier applied to this constraint's raw value. Hard constraints count once.
    pub const fn weight(self, weights: &Weights) -> i64 {
        match self {
            ConstraintKind::LackOfExperience => weights.lack_of_experience,
            ConstraintKind::OptionalReferee => weights.optional_referee,
            ConstraintKind::RefereeIncompatibility => weights.referee_incompatibility,
            ConstraintKind::TeamIncompatibility => weights.team_incompatibility,
            ConstraintKind::GamesDistribution => weights.games_distribution,
            ConstraintKind::TotalDistance => weights.total_distance,
            ConstraintKind::AssignmentFrequency => weights.assignment_frequency,
            _ => 1,
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One signed integer per constraint.
///
/// Used both for absolute totals (all entries non-negative) and for deltas
/// (any sign). Values are raw: weights are applied by [`weighted_cost`].
///
/// [`weighted_cost`]: ConstraintVector::weighted_cost
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConstraintVector([i64; ConstraintKind::COUNT]);

impl ConstraintVector {
    pub const ZERO: ConstraintVector = ConstraintVector([0; ConstraintKind::COUNT]);

    #[inline]
    pub fn get(&self, kind: ConstraintKind) -> i64 {
        self.0[kind.index()]
    }

    #[inline]
    pub fn set(&mut self, kind: ConstraintKind, value: i64) {
        self.0[kind.index()] = value;
    }

    /// Sum of the hard entries.
    pub fn violations(&self) -> i64 {
        ConstraintKind::HARD.iter().map(|k| self.get(*k)).sum()
    }

    /// Weighted sum of the soft entries.
    pub fn weighted_cost(&self, weights: &Weights) -> i64 {
        ConstraintKind::SOFT
            .iter()
            .map(|k| k.weight(weights) * self.get(*k))
            .sum()
    }

    pub fn score(&self, weights: &Weights) -> HardSoftScore {
        HardSoftScore::from_penalties(self.violations(), self.weighted_cost(weights))
    }

    /// True if some hard entry is positive, i.e. a delta that breaks something.
    pub fn worsens_hard(&self) -> bool {
        ConstraintKind::HARD.iter().any(|k| self.get(*k) > 0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConstraintKind, i64)> + '_ {
        ConstraintKind::ALL.iter().map(move |k| (*k, self.get(*k)))
    }
}

impl Index<ConstraintKind> for ConstraintVector {
    type Output = i64;

    fn index(&self, kind: ConstraintKind) -> &i64 {
        &self.0[kind.index()]
    }
}

impl IndexMut<ConstraintKind> for ConstraintVector {
    fn index_mut(&mut self, kind: ConstraintKind) -> &mut i64 {
        &mut self.0[kind.index()]
    }
}

impl Add for ConstraintVector {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for ConstraintVector {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a += b;
        }
    }
}

impl Sub for ConstraintVector {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl SubAssign for ConstraintVector {
    fn sub_assign(&mut self, other: Self) {
        for (a, b) in self.0.iter_mut().zip(other.0) {
            *a -= b;
        }
    }
}

impl Neg for ConstraintVector {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.0.iter_mut().for_each(|v| *v = -*v);
        self
    }
}

impl fmt::Debug for ConstraintVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, value) in self.iter() {
            map.entry(&kind.name(), &value);
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_and_soft_partition() {
        assert_eq!(
            ConstraintKind::ALL.iter().filter(|k| k.is_hard()).count(),
            ConstraintKind::HARD.len()
        );
        for kind in ConstraintKind::SOFT {
            assert!(!kind.is_hard());
        }
    }

    #[test]
    fn test_weighted_cost_ignores_hard() {
        let mut v = ConstraintVector::ZERO;
        v[ConstraintKind::MinReferees] = 3;
        v[ConstraintKind::TotalDistance] = 10;
        v[ConstraintKind::OptionalReferee] = 2;
        let weights = Weights {
            total_distance: 2,
            optional_referee: 5,
            ..Weights::UNIT
        };
        assert_eq!(v.violations(), 3);
        assert_eq!(v.weighted_cost(&weights), 30);
        assert_eq!(v.score(&weights), HardSoftScore::from_penalties(3, 30));
    }

    #[test]
    fn test_arithmetic() {
        let mut a = ConstraintVector::ZERO;
        a[ConstraintKind::Availability] = 1;
        let mut b = ConstraintVector::ZERO;
        b[ConstraintKind::Availability] = 4;
        b[ConstraintKind::GamesDistribution] = -2;

        let sum = a + b;
        assert_eq!(sum.get(ConstraintKind::Availability), 5);
        assert_eq!((sum - b), a);
        assert_eq!((-b).get(ConstraintKind::GamesDistribution), 2);
        assert!(b.worsens_hard());
        assert!(!(-b).worsens_hard());
    }
}
