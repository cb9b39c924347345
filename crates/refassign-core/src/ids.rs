//! Typed 1-based identifiers for problem entities.
//!
//! Every entity table is dense: ids run from 1 to the table length, and
//! `index()` maps an id to its zero-based slot. Ids order like their
//! numeric value, so an ordered set of `GameId` walks games chronologically.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(u32);

        impl $name {
            /// Creates an id from its 1-based code.
            #[inline]
            pub const fn new(code: u32) -> Self {
                debug_assert!(code >= 1, "ids are 1-based");
                $name(code)
            }

            /// Creates an id from a zero-based table index.
            #[inline]
            pub const fn from_index(index: usize) -> Self {
                $name(index as u32 + 1)
            }

            /// Returns the 1-based code.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Returns the zero-based table index.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize - 1
            }

            /// Iterates `1..=count` as ids.
            pub fn range(count: usize) -> impl DoubleEndedIterator<Item = $name> + Clone {
                (0..count).map($name::from_index)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Division code (`D<n>` in text form).
    DivisionId => "D"
);
define_id!(
    /// Referee code (`R<n>` in text form).
    RefereeId => "R"
);
define_id!(
    /// Arena code (`A<n>` in text form).
    ArenaId => "A"
);
define_id!(
    /// Team code (`T<n>` in text form).
    TeamId => "T"
);

/// Position of a game in the chronologically sorted game table.
///
/// Game ids are assigned after sorting, so they carry no `T`/`D` style
/// prefix in text form: they print as the bare number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameId(u32);

impl GameId {
    #[inline]
    pub const fn new(code: u32) -> Self {
        debug_assert!(code >= 1, "ids are 1-based");
        GameId(code)
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        GameId(index as u32 + 1)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }

    pub fn range(count: usize) -> impl DoubleEndedIterator<Item = GameId> + Clone {
        (0..count).map(GameId::from_index)
    }
}

impl fmt::Debug for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
