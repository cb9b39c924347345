//! Canonical enumeration of the referee subsets one game can take.
//!
//! Subsets are visited by size, smallest first, and within one size in
//! lexicographic order of their sorted ids:
//!
//! ```text
//! {R1} {R2} {R3} {R1,R2} {R1,R3} {R2,R3} {R1,R2,R3}
//! ```
//!
//! The backtracking and enumeration phases and the whole game move
//! generator all walk this order.

use refassign_core::{GameId, Instance, RefereeId};
use refassign_scoring::IdSet;

/// The subsets of `1..=num_referees` with sizes in `min..=max`.
///
/// `max` is capped at `num_referees`, so a division that allows more
/// referees than exist still has a finite, non-empty space as long as
/// `min <= num_referees`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinationSpace {
    num_referees: usize,
    min: usize,
    max: usize,
}

impl CombinationSpace {
    pub fn new(num_referees: usize, min: usize, max: usize) -> Self {
        Self {
            num_referees,
            min,
            max: max.min(num_referees),
        }
    }

    /// The space of crews the division of `game` allows.
    pub fn for_game(instance: &Instance, game: GameId) -> Self {
        let division = instance.game_division(game);
        Self::new(
            instance.num_referees(),
            division.min_referees,
            division.max_referees,
        )
    }

    #[inline]
    pub fn min(&self) -> usize {
        self.min
    }

    #[inline]
    pub fn max(&self) -> usize {
        self.max
    }

    /// True if no subset has an allowed size.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Whether `crew` has a size this space contains.
    pub fn contains(&self, crew: &IdSet<RefereeId>) -> bool {
        (self.min..=self.max).contains(&crew.len())
    }

    /// The first subset: `{R1, ..., R<min>}`.
    pub fn first(&self) -> IdSet<RefereeId> {
        debug_assert!(!self.is_empty(), "empty combination space");
        RefereeId::range(self.min).collect()
    }

    /// Advances `crew` to its successor in canonical order.
    ///
    /// Returns false, leaving `crew` untouched, once the last subset of the
    /// largest size has been reached.
    pub fn advance(&self, crew: &mut IdSet<RefereeId>) -> bool {
        // Length of the run N, N-1, ... at the top of the set.
        let mut run = 0;
        let mut top = self.num_referees as u32;
        for r in crew.iter().rev() {
            if top == 0 || r.get() != top {
                break;
            }
            run += 1;
            top -= 1;
        }
        if run >= self.max {
            return false;
        }

        for _ in 0..run {
            if let Some(last) = crew.last() {
                crew.remove(last);
            }
        }
        // Bump the largest element left, or grow the size when nothing is left.
        let start = match crew.last() {
            Some(last) => {
                crew.remove(last);
                last.get() + 1
            }
            None => 1,
        };
        for code in start..=start + run as u32 {
            crew.insert(RefereeId::new(code));
        }
        true
    }

    /// Iterates the whole space in canonical order.
    pub fn iter(&self) -> Combinations {
        Combinations {
            space: *self,
            next: (!self.is_empty()).then(|| self.first()),
        }
    }

    /// Number of subsets in the space.
    pub fn len(&self) -> u128 {
        if self.is_empty() {
            return 0;
        }
        (self.min..=self.max)
            .map(|k| binomial(self.num_referees as u128, k as u128))
            .sum()
    }
}

impl IntoIterator for CombinationSpace {
    type Item = IdSet<RefereeId>;
    type IntoIter = Combinations;

    fn into_iter(self) -> Combinations {
        self.iter()
    }
}

/// Iterator over a [`CombinationSpace`].
#[derive(Debug, Clone)]
pub struct Combinations {
    space: CombinationSpace,
    next: Option<IdSet<RefereeId>>,
}

impl Iterator for Combinations {
    type Item = IdSet<RefereeId>;

    fn next(&mut self) -> Option<IdSet<RefereeId>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if self.space.advance(&mut successor) {
            self.next = Some(successor);
        }
        Some(current)
    }
}

fn binomial(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}
