//! Problem entities.
//!
//! All entities are plain data; cross references are typed ids that the
//! [`Instance`](crate::Instance) validates at construction.

use crate::geo::Location;
use crate::ids::{ArenaId, DivisionId, GameId, RefereeId, TeamId};
use crate::time::TimeWindow;

/// A competition category with its referee bounds and required skill level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Division {
    pub id: DivisionId,
    pub min_referees: usize,
    pub max_referees: usize,
    pub required_level: i64,
    pub team_count: usize,
}

impl Division {
    pub fn new(
        id: DivisionId,
        min_referees: usize,
        max_referees: usize,
        required_level: i64,
        team_count: usize,
    ) -> Self {
        Self {
            id,
            min_referees,
            max_referees,
            required_level,
            team_count,
        }
    }

    /// Number of slots a game of this division may leave empty at no hard cost.
    #[inline]
    pub fn optional_slots(&self) -> usize {
        self.max_referees - self.min_referees
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub division: DivisionId,
}

impl Team {
    pub fn new(id: TeamId, division: DivisionId) -> Self {
        Self { id, division }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    pub id: ArenaId,
    pub location: Location,
}

impl Arena {
    pub fn new(id: ArenaId, location: Location) -> Self {
        Self { id, location }
    }
}

/// A referee with skill, home location, and personal restrictions.
///
/// The incompatibility lists are kept sorted so lookups are binary searches;
/// unavailability windows are kept sorted by start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Referee {
    pub id: RefereeId,
    pub level: i64,
    pub home: Location,
    pub experience: i64,
    incompatible_referees: Vec<RefereeId>,
    incompatible_teams: Vec<TeamId>,
    unavailability: Vec<TimeWindow>,
}

impl Referee {
    pub fn new(id: RefereeId, level: i64, home: Location, experience: i64) -> Self {
        Self {
            id,
            level,
            home,
            experience,
            incompatible_referees: Vec::new(),
            incompatible_teams: Vec::new(),
            unavailability: Vec::new(),
        }
    }

    pub fn with_incompatible_referees(mut self, ids: impl IntoIterator<Item = RefereeId>) -> Self {
        self.incompatible_referees = ids.into_iter().collect();
        self.incompatible_referees.sort_unstable();
        self.incompatible_referees.dedup();
        self
    }

    pub fn with_incompatible_teams(mut self, ids: impl IntoIterator<Item = TeamId>) -> Self {
        self.incompatible_teams = ids.into_iter().collect();
        self.incompatible_teams.sort_unstable();
        self.incompatible_teams.dedup();
        self
    }

    pub fn with_unavailability(mut self, windows: impl IntoIterator<Item = TimeWindow>) -> Self {
        self.unavailability = windows.into_iter().collect();
        self.unavailability.sort_by_key(|w| w.start());
        self
    }

    pub fn incompatible_referees(&self) -> &[RefereeId] {
        &self.incompatible_referees
    }

    pub fn incompatible_teams(&self) -> &[TeamId] {
        &self.incompatible_teams
    }

    pub fn unavailability(&self) -> &[TimeWindow] {
        &self.unavailability
    }

    #[inline]
    pub fn is_incompatible_with_referee(&self, other: RefereeId) -> bool {
        self.incompatible_referees.binary_search(&other).is_ok()
    }

    #[inline]
    pub fn is_incompatible_with_team(&self, team: TeamId) -> bool {
        self.incompatible_teams.binary_search(&team).is_ok()
    }

    /// Returns true if `window` overlaps any declared unavailability.
    pub fn is_unavailable_during(&self, window: &TimeWindow) -> bool {
        self.unavailability.iter().any(|u| u.overlaps(window))
    }
}

/// A scheduled match.
///
/// `id` is the game's position in the chronologically sorted game table and
/// is filled in by the instance builder.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    pub id: GameId,
    pub home: TeamId,
    pub away: TeamId,
    pub division: DivisionId,
    pub window: TimeWindow,
    pub arena: ArenaId,
    pub required_experience: i64,
}

impl Game {
    pub fn new(
        home: TeamId,
        away: TeamId,
        division: DivisionId,
        window: TimeWindow,
        arena: ArenaId,
        required_experience: i64,
    ) -> Self {
        Self {
            id: GameId::new(1),
            home,
            away,
            division,
            window,
            arena,
            required_experience,
        }
    }

    #[inline]
    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }
}
