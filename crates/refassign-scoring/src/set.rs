//! Ordered id sets with neighbor queries.

use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::ops::Bound::{Excluded, Unbounded};

/// An ordered set of ids.
///
/// Backed by a B-tree, so membership, insertion, and the `predecessor` /
/// `successor` neighbor queries are all logarithmic. Games in a referee's
/// schedule are ordered chronologically because game ids are.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdSet<T: Ord + Copy>(BTreeSet<T>);

impl<T: Ord + Copy> IdSet<T> {
    pub fn new() -> Self {
        IdSet(BTreeSet::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, id: T) -> bool {
        self.0.contains(&id)
    }

    /// Inserts `id`, returning false if it was already present.
    #[inline]
    pub fn insert(&mut self, id: T) -> bool {
        self.0.insert(id)
    }

    /// Removes `id`, returning false if it was absent.
    #[inline]
    pub fn remove(&mut self, id: T) -> bool {
        self.0.remove(&id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn first(&self) -> Option<T> {
        self.0.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<T> {
        self.0.last().copied()
    }

    /// Largest element strictly less than `id`.
    #[inline]
    pub fn predecessor(&self, id: T) -> Option<T> {
        self.0.range(..id).next_back().copied()
    }

    /// Smallest element strictly greater than `id`.
    #[inline]
    pub fn successor(&self, id: T) -> Option<T> {
        self.0.range((Excluded(id), Unbounded)).next().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + ExactSizeIterator + '_ {
        self.0.iter().copied()
    }

    /// Elements of `self` not in `other`, ascending.
    pub fn difference<'a>(&'a self, other: &'a IdSet<T>) -> impl Iterator<Item = T> + 'a {
        self.0.difference(&other.0).copied()
    }

    pub fn is_subset(&self, other: &IdSet<T>) -> bool {
        self.0.is_subset(&other.0)
    }

    /// Consecutive pairs in ascending order.
    pub fn adjacent_pairs(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.0.iter().copied().zip(self.0.iter().copied().skip(1))
    }
}

impl<T: Ord + Copy> Default for IdSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Copy> FromIterator<T> for IdSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        IdSet(iter.into_iter().collect())
    }
}

impl<T: Ord + Copy> Extend<T> for IdSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a, T: Ord + Copy> IntoIterator for &'a IdSet<T> {
    type Item = &'a T;
    type IntoIter = btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: Ord + Copy + fmt::Display> fmt::Debug for IdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<T: Ord + Copy + fmt::Display> fmt::Display for IdSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", id)?;
        }
        f.write_str("}")
    }
}
