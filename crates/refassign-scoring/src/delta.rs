//! Incremental evaluation of a single game's crew change.
//!
//! Every function here answers: if the crew of `game` went from `old` to
//! `new`, by how much would this constraint's global total change? The
//! answer equals `evaluate(after) - evaluate(before)` exactly.
//!
//! Only referees in the symmetric difference of the two crews can change
//! state. Per-referee constraints inspect the referee's chronological
//! neighbors around `game` and fall back to a schedule scan only when a
//! local violation appears or disappears, since another pair may still keep
//! the referee in violation. The average-based games distribution and
//! assignment frequency recompute the affected aggregate terms from the
//! before and after totals.
//!
//! All functions require that `view` currently assigns `old` to `game`.

use refassign_core::{GameId, Instance, RefereeId};
use smallvec::SmallVec;

use crate::assignment::AssignmentView;
use crate::constraint::{ConstraintKind, ConstraintVector};
use crate::evaluate::{
    above_max, below_min, crew_experience, crew_incompatibility, distribution_term,
    frequency_term, team_conflicts, unavailable_for, under_level_for, unfilled_optional_slots,
};
use crate::set::IdSet;
use crate::travel::{games_conflict, leg_distance};

type RefereeList = SmallVec<[RefereeId; 4]>;

/// A proposed replacement of one game's crew.
#[derive(Debug, Clone)]
pub struct GameChange<'a> {
    game: GameId,
    old: &'a IdSet<RefereeId>,
    new: &'a IdSet<RefereeId>,
    removed: RefereeList,
    added: RefereeList,
}

impl<'a> GameChange<'a> {
    pub fn new(game: GameId, old: &'a IdSet<RefereeId>, new: &'a IdSet<RefereeId>) -> Self {
        Self {
            game,
            old,
            new,
            removed: old.difference(new).collect(),
            added: new.difference(old).collect(),
        }
    }

    #[inline]
    pub fn game(&self) -> GameId {
        self.game
    }

    #[inline]
    pub fn old(&self) -> &IdSet<RefereeId> {
        self.old
    }

    #[inline]
    pub fn new_crew(&self) -> &IdSet<RefereeId> {
        self.new
    }

    /// Referees leaving the crew.
    #[inline]
    pub fn removed(&self) -> &[RefereeId] {
        &self.removed
    }

    /// Referees joining the crew.
    #[inline]
    pub fn added(&self) -> &[RefereeId] {
        &self.added
    }

    #[inline]
    pub fn is_noop(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }

    fn size_change(&self) -> i64 {
        self.new.len() as i64 - self.old.len() as i64
    }
}

/// Change of every constraint.
pub fn delta<V: AssignmentView>(instance: &Instance, view: &V, change: &GameChange<'_>) -> ConstraintVector {
    let mut out = hard_delta(instance, view, change);
    for kind in ConstraintKind::SOFT {
        out[kind] = constraint_delta(kind, instance, view, change);
    }
    out
}

/// Change of the hard constraints only; soft entries are left at zero.
pub fn hard_delta<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    change: &GameChange<'_>,
) -> ConstraintVector {
    debug_assert_eq!(view.referees_of(change.game), change.old);
    let mut out = ConstraintVector::ZERO;
    if change.is_noop() {
        return out;
    }
    for kind in ConstraintKind::HARD {
        out[kind] = constraint_delta(kind, instance, view, change);
    }
    out
}

/// Change of the given constraint.
pub fn constraint_delta<V: AssignmentView>(
    kind: ConstraintKind,
    instance: &Instance,
    view: &V,
    change: &GameChange<'_>,
) -> i64 {
    if change.is_noop() {
        return 0;
    }
    match kind {
        ConstraintKind::MinReferees => min_referees_delta(instance, change),
        ConstraintKind::MaxReferees => max_referees_delta(instance, change),
        ConstraintKind::FeasibleTravel => travel_delta(instance, view, change),
        ConstraintKind::Availability => availability_delta(instance, view, change),
        ConstraintKind::MinimumLevel => level_delta(instance, view, change),
        ConstraintKind::LackOfExperience => lack_of_experience_delta(instance, change),
        ConstraintKind::OptionalReferee => optional_referee_delta(instance, change),
        ConstraintKind::RefereeIncompatibility => referee_incompatibility_delta(instance, change),
        ConstraintKind::TeamIncompatibility => team_incompatibility_delta(instance, change),
        ConstraintKind::GamesDistribution => games_distribution_delta(instance, view, change),
        ConstraintKind::TotalDistance => total_distance_delta(instance, view, change),
        ConstraintKind::AssignmentFrequency => assignment_frequency_delta(instance, view, change),
    }
}

/// Weighted soft cost change.
pub fn soft_cost_delta<V: AssignmentView>(instance: &Instance, view: &V, change: &GameChange<'_>) -> i64 {
    let weights = instance.weights();
    ConstraintKind::SOFT
        .iter()
        .filter(|k| k.weight(weights) != 0)
        .map(|k| k.weight(weights) * constraint_delta(*k, instance, view, change))
        .sum()
}

// min_referees, max_referees

pub fn min_referees_delta(instance: &Instance, change: &GameChange<'_>) -> i64 {
    let division = instance.game_division(change.game);
    below_min(division, change.new.len()) as i64 - below_min(division, change.old.len()) as i64
}

pub fn max_referees_delta(instance: &Instance, change: &GameChange<'_>) -> i64 {
    let division = instance.game_division(change.game);
    above_max(division, change.new.len()) as i64 - above_max(division, change.old.len()) as i64
}

// feasible_travel

pub fn travel_delta<V: AssignmentView>(instance: &Instance, view: &V, change: &GameChange<'_>) -> i64 {
    let g = change.game;
    let removals: i64 = change
        .removed
        .iter()
        .map(|&r| travel_removal_delta(instance, r, view.games_of(r), g))
        .sum();
    let insertions: i64 = change
        .added
        .iter()
        .map(|&r| travel_insertion_delta(instance, r, view.games_of(r), g))
        .sum();
    removals + insertions
}

fn travel_removal_delta(
    instance: &Instance,
    referee_id: RefereeId,
    schedule: &IdSet<GameId>,
    game: GameId,
) -> i64 {
    let referee = instance.referee(referee_id);
    let conflict = |a: GameId, b: GameId| games_conflict(instance, referee, a, b);
    let prev = schedule.predecessor(game);
    let next = schedule.successor(game);

    let local_before = prev.is_some_and(|p| conflict(p, game)) || next.is_some_and(|n| conflict(game, n));
    let local_after = matches!((prev, next), (Some(p), Some(n)) if conflict(p, n));
    if !local_before && !local_after {
        return 0;
    }

    let elsewhere = schedule
        .adjacent_pairs()
        .filter(|&(a, b)| a != game && b != game)
        .any(|(a, b)| conflict(a, b));
    flip(elsewhere || local_before, elsewhere || local_after)
}

fn travel_insertion_delta(
    instance: &Instance,
    referee_id: RefereeId,
    schedule: &IdSet<GameId>,
    game: GameId,
) -> i64 {
    let referee = instance.referee(referee_id);
    let conflict = |a: GameId, b: GameId| games_conflict(instance, referee, a, b);
    let prev = schedule.predecessor(game);
    let next = schedule.successor(game);

    let local_before = matches!((prev, next), (Some(p), Some(n)) if conflict(p, n));
    let local_after = prev.is_some_and(|p| conflict(p, game)) || next.is_some_and(|n| conflict(game, n));
    if !local_before && !local_after {
        return 0;
    }

    let bridged = prev.zip(next);
    let elsewhere = schedule
        .adjacent_pairs()
        .filter(|pair| Some(*pair) != bridged)
        .any(|(a, b)| conflict(a, b));
    flip(elsewhere || local_before, elsewhere || local_after)
}

// availability, minimum_level

pub fn availability_delta<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    change: &GameChange<'_>,
) -> i64 {
    schedule_flag_delta(view, change, |r, g| unavailable_for(instance, r, g))
}

pub fn level_delta<V: AssignmentView>(instance: &Instance, view: &V, change: &GameChange<'_>) -> i64 {
    schedule_flag_delta(view, change, |r, g| under_level_for(instance, r, g))
}

/// Delta of a per-referee constraint violated when any assigned game is bad.
fn schedule_flag_delta<V, F>(view: &V, change: &GameChange<'_>, is_bad: F) -> i64
where
    V: AssignmentView,
    F: Fn(RefereeId, GameId) -> bool,
{
    let g = change.game;
    let mut delta = 0;
    for &r in &change.removed {
        if is_bad(r, g) {
            let still_bad = view.games_of(r).iter().any(|h| h != g && is_bad(r, h));
            delta += flip(true, still_bad);
        }
    }
    for &r in &change.added {
        if is_bad(r, g) {
            let already_bad = view.games_of(r).iter().any(|h| is_bad(r, h));
            delta += flip(already_bad, true);
        }
    }
    delta
}

// per-game soft constraints

pub fn lack_of_experience_delta(instance: &Instance, change: &GameChange<'_>) -> i64 {
    let required = instance.game(change.game).required_experience;
    let before = crew_experience(instance, change.old) < required;
    let after = crew_experience(instance, change.new) < required;
    flip(before, after)
}

pub fn optional_referee_delta(instance: &Instance, change: &GameChange<'_>) -> i64 {
    let division = instance.game_division(change.game);
    unfilled_optional_slots(division, change.new.len())
        - unfilled_optional_slots(division, change.old.len())
}

pub fn referee_incompatibility_delta(instance: &Instance, change: &GameChange<'_>) -> i64 {
    crew_incompatibility(instance, change.new) - crew_incompatibility(instance, change.old)
}

pub fn team_incompatibility_delta(instance: &Instance, change: &GameChange<'_>) -> i64 {
    let g = change.game;
    let gained: i64 = change.added.iter().map(|&r| team_conflicts(instance, r, g)).sum();
    let lost: i64 = change.removed.iter().map(|&r| team_conflicts(instance, r, g)).sum();
    gained - lost
}

// games_distribution

pub fn games_distribution_delta<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    change: &GameChange<'_>,
) -> i64 {
    let n = instance.num_referees() as i64;
    let before_total = view.total_assignments() as i64;
    let after_total = before_total + change.size_change();
    let load = |r: RefereeId| view.games_of(r).len() as i64;

    if before_total == after_total {
        // The average is unchanged, so only the moved referees' terms differ.
        let lost: i64 = change
            .removed
            .iter()
            .map(|&r| distribution_term(after_total, load(r) - 1, n) - distribution_term(before_total, load(r), n))
            .sum();
        let gained: i64 = change
            .added
            .iter()
            .map(|&r| distribution_term(after_total, load(r) + 1, n) - distribution_term(before_total, load(r), n))
            .sum();
        return lost + gained;
    }

    instance
        .referee_ids()
        .map(|r| {
            let before = load(r);
            let after = before + load_shift(change, r);
            distribution_term(after_total, after, n) - distribution_term(before_total, before, n)
        })
        .sum()
}

// total_distance

pub fn total_distance_delta<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    change: &GameChange<'_>,
) -> i64 {
    let g = change.game;
    let mut delta = 0;
    for &r in &change.removed {
        let referee = instance.referee(r);
        let schedule = view.games_of(r);
        let (prev, next) = (schedule.predecessor(g), schedule.successor(g));
        delta += leg_distance(instance, referee, prev, next)
            - leg_distance(instance, referee, prev, Some(g))
            - leg_distance(instance, referee, Some(g), next);
    }
    for &r in &change.added {
        let referee = instance.referee(r);
        let schedule = view.games_of(r);
        let (prev, next) = (schedule.predecessor(g), schedule.successor(g));
        delta += leg_distance(instance, referee, prev, Some(g))
            + leg_distance(instance, referee, Some(g), next)
            - leg_distance(instance, referee, prev, next);
    }
    delta
}

// assignment_frequency

pub fn assignment_frequency_delta<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    change: &GameChange<'_>,
) -> i64 {
    let game = instance.game(change.game);
    let n = instance.num_referees() as i64;
    let mut counts = vec![0i64; instance.num_referees()];
    let mut delta = 0;

    for team in [game.home, game.away] {
        let mut before_total = 0;
        let mut touched: Vec<RefereeId> = Vec::new();
        for &h in instance.games_involving(team) {
            let crew = view.referees_of(h);
            before_total += crew.len() as i64;
            for r in crew.iter() {
                if counts[r.index()] == 0 {
                    touched.push(r);
                }
                counts[r.index()] += 1;
            }
        }
        touched.extend(change.added.iter().copied().filter(|r| counts[r.index()] == 0));

        let after_total = before_total + change.size_change();
        for r in touched {
            let before = counts[r.index()];
            let after = before + load_shift(change, r);
            delta += frequency_term(after_total, after, n) - frequency_term(before_total, before, n);
            counts[r.index()] = 0;
        }
    }
    delta
}

#[inline]
fn load_shift(change: &GameChange<'_>, referee: RefereeId) -> i64 {
    if change.added.contains(&referee) {
        1
    } else if change.removed.contains(&referee) {
        -1
    } else {
        0
    }
}

#[inline]
fn flip(before: bool, after: bool) -> i64 {
    after as i64 - before as i64
}
