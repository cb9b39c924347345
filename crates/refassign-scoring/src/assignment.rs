//! The mutable game <-> referee assignment.

use refassign_core::{GameId, Instance, RefereeId};
use thiserror::Error;

use crate::set::IdSet;

/// Read-only queries every evaluator needs from an assignment.
///
/// The full evaluator and the delta engine are generic over this trait, so
/// any state type that can answer these queries can be scored without
/// duplicating constraint logic.
pub trait AssignmentView {
    fn num_games(&self) -> usize;

    fn num_referees(&self) -> usize;

    /// Referees assigned to `game`, ascending.
    fn referees_of(&self, game: GameId) -> &IdSet<RefereeId>;

    /// Games assigned to `referee`, ascending (and so chronological).
    fn games_of(&self, referee: RefereeId) -> &IdSet<GameId>;

    /// Sum of crew sizes over all games.
    fn total_assignments(&self) -> usize {
        GameId::range(self.num_games())
            .map(|g| self.referees_of(g).len())
            .sum()
    }
}

/// Broken bidirectional bookkeeping, reported by [`Assignment::check_consistency`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("referee {referee} is listed on game {game} but the referee's schedule lacks it")]
    MissingGame { game: GameId, referee: RefereeId },

    #[error("game {game} is in the schedule of referee {referee} but its crew lacks the referee")]
    MissingReferee { game: GameId, referee: RefereeId },

    #[error("cached assignment total {cached} differs from actual {actual}")]
    TotalMismatch { cached: usize, actual: usize },

    #[error("incremental totals drifted from full evaluation: {details}")]
    ScoreDrift { details: String },
}

/// Which referees officiate which games.
///
/// Two index structures are kept in lockstep: the crew of every game and the
/// schedule of every referee. All mutation goes through `assign` and
/// `unassign`, which update both sides together.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    crews: Vec<IdSet<RefereeId>>,
    schedules: Vec<IdSet<GameId>>,
    total: usize,
}

impl Assignment {
    /// Creates an empty assignment sized for `instance`.
    pub fn new(instance: &Instance) -> Self {
        Self::with_dimensions(instance.num_games(), instance.num_referees())
    }

    pub fn with_dimensions(num_games: usize, num_referees: usize) -> Self {
        Self {
            crews: vec![IdSet::new(); num_games],
            schedules: vec![IdSet::new(); num_referees],
            total: 0,
        }
    }

    #[inline]
    pub fn is_assigned(&self, referee: RefereeId, game: GameId) -> bool {
        self.crews[game.index()].contains(referee)
    }

    /// Adds `referee` to the crew of `game`. Returns false if already there.
    pub fn assign(&mut self, referee: RefereeId, game: GameId) -> bool {
        let inserted = self.crews[game.index()].insert(referee);
        if inserted {
            self.schedules[referee.index()].insert(game);
            self.total += 1;
        }
        inserted
    }

    /// Removes `referee` from the crew of `game`. Returns false if absent.
    pub fn unassign(&mut self, referee: RefereeId, game: GameId) -> bool {
        let removed = self.crews[game.index()].remove(referee);
        if removed {
            self.schedules[referee.index()].remove(game);
            self.total -= 1;
        }
        removed
    }

    /// Empties the crew of `game`.
    pub fn unassign_all(&mut self, game: GameId) {
        let crew = std::mem::take(&mut self.crews[game.index()]);
        for r in crew.iter() {
            self.schedules[r.index()].remove(game);
        }
        self.total -= crew.len();
    }

    /// Makes the crew of `game` equal to `crew`, touching only the difference.
    pub fn replace_referees(&mut self, game: GameId, crew: &IdSet<RefereeId>) {
        let current = self.crews[game.index()].clone();
        for r in current.difference(crew) {
            self.unassign(r, game);
        }
        for r in crew.difference(&current) {
            self.assign(r, game);
        }
    }

    /// Removes every assignment.
    pub fn reset(&mut self) {
        self.crews.iter_mut().for_each(IdSet::clear);
        self.schedules.iter_mut().for_each(IdSet::clear);
        self.total = 0;
    }

    /// Verifies that both index structures describe the same relation.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        let mut actual = 0;
        for (gi, crew) in self.crews.iter().enumerate() {
            let game = GameId::from_index(gi);
            actual += crew.len();
            for referee in crew.iter() {
                if !self.schedules[referee.index()].contains(game) {
                    return Err(ConsistencyError::MissingGame { game, referee });
                }
            }
        }
        for (ri, schedule) in self.schedules.iter().enumerate() {
            let referee = RefereeId::from_index(ri);
            for game in schedule.iter() {
                if !self.crews[game.index()].contains(referee) {
                    return Err(ConsistencyError::MissingReferee { game, referee });
                }
            }
        }
        if actual != self.total {
            return Err(ConsistencyError::TotalMismatch {
                cached: self.total,
                actual,
            });
        }
        Ok(())
    }

    /// Iterates `(game, crew)` pairs in game order.
    pub fn crews(&self) -> impl Iterator<Item = (GameId, &IdSet<RefereeId>)> {
        self.crews
            .iter()
            .enumerate()
            .map(|(i, crew)| (GameId::from_index(i), crew))
    }
}

impl AssignmentView for Assignment {
    #[inline]
    fn num_games(&self) -> usize {
        self.crews.len()
    }

    #[inline]
    fn num_referees(&self) -> usize {
        self.schedules.len()
    }

    #[inline]
    fn referees_of(&self, game: GameId) -> &IdSet<RefereeId> {
        &self.crews[game.index()]
    }

    #[inline]
    fn games_of(&self, referee: RefereeId) -> &IdSet<GameId> {
        &self.schedules[referee.index()]
    }

    #[inline]
    fn total_assignments(&self) -> usize {
        self.total
    }
}

impl std::fmt::Debug for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assignment")
            .field("games", &self.crews.len())
            .field("referees", &self.schedules.len())
            .field("total", &self.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(id: u32) -> RefereeId {
        RefereeId::new(id)
    }

    fn g(id: u32) -> GameId {
        GameId::new(id)
    }

    #[test]
    fn test_assign_updates_both_sides() {
        let mut a = Assignment::with_dimensions(3, 2);
        assert!(a.assign(r(2), g(3)));
        assert!(!a.assign(r(2), g(3)));
        assert!(a.referees_of(g(3)).contains(r(2)));
        assert!(a.games_of(r(2)).contains(g(3)));
        assert_eq!(a.total_assignments(), 1);
        a.check_consistency().unwrap();
    }

    #[test]
    fn test_assign_then_unassign_restores_state() {
        let mut a = Assignment::with_dimensions(3, 3);
        a.assign(r(1), g(1));
        a.assign(r(3), g(2));
        let before = a.clone();

        a.assign(r(2), g(2));
        a.unassign(r(2), g(2));
        assert_eq!(a, before);
    }

    #[test]
    fn test_unassign_all() {
        let mut a = Assignment::with_dimensions(2, 3);
        for id in 1..=3 {
            a.assign(r(id), g(1));
        }
        a.assign(r(1), g(2));
        a.unassign_all(g(1));
        assert!(a.referees_of(g(1)).is_empty());
        assert_eq!(a.games_of(r(1)).len(), 1);
        assert_eq!(a.total_assignments(), 1);
        a.check_consistency().unwrap();
    }

    #[test]
    fn test_replace_referees() {
        let mut a = Assignment::with_dimensions(1, 4);
        a.assign(r(1), g(1));
        a.assign(r(2), g(1));
        let target: IdSet<RefereeId> = [r(2), r(4)].into_iter().collect();
        a.replace_referees(g(1), &target);
        assert_eq!(a.referees_of(g(1)), &target);
        assert!(a.games_of(r(1)).is_empty());
        assert!(a.games_of(r(4)).contains(g(1)));
        a.check_consistency().unwrap();
    }

    #[test]
    fn test_reset() {
        let mut a = Assignment::with_dimensions(2, 2);
        a.assign(r(1), g(1));
        a.assign(r(2), g(2));
        a.reset();
        assert_eq!(a, Assignment::with_dimensions(2, 2));
    }
}
