//! Full evaluation of every constraint over an assignment.
//!
//! These functions recompute from scratch. They are the reference the delta
//! engine is checked against and are used when scoring complete solutions.

use refassign_core::{Division, GameId, Instance, RefereeId, TeamId};

use crate::assignment::AssignmentView;
use crate::constraint::{ConstraintKind, ConstraintVector};
use crate::set::IdSet;
use crate::travel::{games_conflict, leg_distance};

// Hard constraints

/// The crew of `game` reaches the division minimum.
pub fn has_min_referees<V: AssignmentView>(instance: &Instance, view: &V, game: GameId) -> bool {
    !below_min(instance.game_division(game), view.referees_of(game).len())
}

/// The crew of `game` stays within the division maximum.
pub fn within_max_referees<V: AssignmentView>(instance: &Instance, view: &V, game: GameId) -> bool {
    !above_max(instance.game_division(game), view.referees_of(game).len())
}

/// Every pair of consecutive games in the referee's schedule is reachable.
pub fn travel_feasible<V: AssignmentView>(instance: &Instance, view: &V, referee: RefereeId) -> bool {
    !schedule_has_conflict(instance, referee, view.games_of(referee))
}

/// No assigned game overlaps the referee's unavailability.
pub fn is_available<V: AssignmentView>(instance: &Instance, view: &V, referee: RefereeId) -> bool {
    !view
        .games_of(referee)
        .iter()
        .any(|g| unavailable_for(instance, referee, g))
}

/// The referee meets the level of every assigned game's division.
pub fn has_min_level<V: AssignmentView>(instance: &Instance, view: &V, referee: RefereeId) -> bool {
    !view
        .games_of(referee)
        .iter()
        .any(|g| under_level_for(instance, referee, g))
}

// Soft constraints

/// The crew's combined experience falls short of the game's requirement.
pub fn lacks_experience<V: AssignmentView>(instance: &Instance, view: &V, game: GameId) -> bool {
    crew_experience(instance, view.referees_of(game)) < instance.game(game).required_experience
}

/// Unfilled optional slots of `game`.
pub fn optional_referee<V: AssignmentView>(instance: &Instance, view: &V, game: GameId) -> i64 {
    unfilled_optional_slots(instance.game_division(game), view.referees_of(game).len())
}

/// Directed incompatibility flags among the crew of `game`.
pub fn referee_incompatibility<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    game: GameId,
) -> i64 {
    crew_incompatibility(instance, view.referees_of(game))
}

/// Crew members incompatible with the home team plus those incompatible with the away team.
pub fn team_incompatibility<V: AssignmentView>(instance: &Instance, view: &V, game: GameId) -> i64 {
    view.referees_of(game)
        .iter()
        .map(|r| team_conflicts(instance, r, game))
        .sum()
}

/// Distance of the referee's load from the average load, rounded up.
pub fn games_distribution<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    referee: RefereeId,
) -> i64 {
    distribution_term(
        view.total_assignments() as i64,
        view.games_of(referee).len() as i64,
        instance.num_referees() as i64,
    )
}

/// Kilometres the referee drives over the whole schedule.
pub fn total_distance<V: AssignmentView>(instance: &Instance, view: &V, referee: RefereeId) -> i64 {
    schedule_distance(instance, referee, view.games_of(referee))
}

/// How far above average the referee officiates games of `team`, rounded up.
pub fn assignment_frequency<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    referee: RefereeId,
    team: TeamId,
) -> i64 {
    let mut team_total = 0;
    let mut count = 0;
    for &g in instance.games_involving(team) {
        let crew = view.referees_of(g);
        team_total += crew.len() as i64;
        if crew.contains(referee) {
            count += 1;
        }
    }
    frequency_term(team_total, count, instance.num_referees() as i64)
}

/// Evaluates every constraint from scratch.
pub fn evaluate<V: AssignmentView>(instance: &Instance, view: &V) -> ConstraintVector {
    let mut totals = ConstraintVector::ZERO;

    for g in instance.game_ids() {
        let crew = view.referees_of(g);
        let division = instance.game_division(g);
        totals[ConstraintKind::MinReferees] += below_min(division, crew.len()) as i64;
        totals[ConstraintKind::MaxReferees] += above_max(division, crew.len()) as i64;
        totals[ConstraintKind::LackOfExperience] += lacks_experience(instance, view, g) as i64;
        totals[ConstraintKind::OptionalReferee] += unfilled_optional_slots(division, crew.len());
        totals[ConstraintKind::RefereeIncompatibility] += crew_incompatibility(instance, crew);
        totals[ConstraintKind::TeamIncompatibility] += team_incompatibility(instance, view, g);
    }

    let num_referees = instance.num_referees() as i64;
    let total = view.total_assignments() as i64;
    for r in instance.referee_ids() {
        let schedule = view.games_of(r);
        totals[ConstraintKind::FeasibleTravel] += schedule_has_conflict(instance, r, schedule) as i64;
        totals[ConstraintKind::Availability] += !is_available(instance, view, r) as i64;
        totals[ConstraintKind::MinimumLevel] += !has_min_level(instance, view, r) as i64;
        totals[ConstraintKind::GamesDistribution] +=
            distribution_term(total, schedule.len() as i64, num_referees);
        totals[ConstraintKind::TotalDistance] += schedule_distance(instance, r, schedule);
    }

    let mut counts = vec![0i64; instance.num_referees()];
    for t in instance.team_ids() {
        totals[ConstraintKind::AssignmentFrequency] +=
            team_frequency_cost(instance, view, t, &mut counts);
    }

    totals
}

/// Weighted soft cost of the assignment.
pub fn compute_cost<V: AssignmentView>(instance: &Instance, view: &V) -> i64 {
    evaluate(instance, view).weighted_cost(instance.weights())
}

/// Number of violated hard constraints, counted per game for the crew bounds and per referee for the rest.
pub fn compute_violations<V: AssignmentView>(instance: &Instance, view: &V) -> i64 {
    let games = instance
        .game_ids()
        .filter(|&g| !has_min_referees(instance, view, g))
        .count()
        + instance
            .game_ids()
            .filter(|&g| !within_max_referees(instance, view, g))
            .count();
    let referees: usize = instance
        .referee_ids()
        .map(|r| {
            !travel_feasible(instance, view, r) as usize
                + !is_available(instance, view, r) as usize
                + !has_min_level(instance, view, r) as usize
        })
        .sum();
    (games + referees) as i64
}

/// Returns true as soon as any hard constraint is found violated.
pub fn has_violations<V: AssignmentView>(instance: &Instance, view: &V) -> bool {
    instance
        .game_ids()
        .any(|g| !has_min_referees(instance, view, g) || !within_max_referees(instance, view, g))
        || instance.referee_ids().any(|r| {
            !travel_feasible(instance, view, r)
                || !is_available(instance, view, r)
                || !has_min_level(instance, view, r)
        })
}

// Shared terms, also used by the delta engine.

#[inline]
pub(crate) fn below_min(division: &Division, size: usize) -> bool {
    size < division.min_referees
}

#[inline]
pub(crate) fn above_max(division: &Division, size: usize) -> bool {
    size > division.max_referees
}

#[inline]
pub(crate) fn unfilled_optional_slots(division: &Division, size: usize) -> i64 {
    let filled = size.saturating_sub(division.min_referees);
    division.optional_slots().saturating_sub(filled) as i64
}

pub(crate) fn crew_experience(instance: &Instance, crew: &IdSet<RefereeId>) -> i64 {
    crew.iter().map(|r| instance.referee(r).experience).sum()
}

pub(crate) fn crew_incompatibility(instance: &Instance, crew: &IdSet<RefereeId>) -> i64 {
    let mut count = 0;
    for a in crew.iter() {
        let referee = instance.referee(a);
        for b in crew.iter() {
            if a != b && referee.is_incompatible_with_referee(b) {
                count += 1;
            }
        }
    }
    count
}

#[inline]
pub(crate) fn team_conflicts(instance: &Instance, referee: RefereeId, game: GameId) -> i64 {
    let referee = instance.referee(referee);
    let game = instance.game(game);
    referee.is_incompatible_with_team(game.home) as i64
        + referee.is_incompatible_with_team(game.away) as i64
}

#[inline]
pub(crate) fn unavailable_for(instance: &Instance, referee: RefereeId, game: GameId) -> bool {
    instance
        .referee(referee)
        .is_unavailable_during(&instance.game(game).window)
}

#[inline]
pub(crate) fn under_level_for(instance: &Instance, referee: RefereeId, game: GameId) -> bool {
    instance.referee(referee).level < instance.game_division(game).required_level
}

/// `ceil(|total / n - count|)` in exact integer arithmetic.
#[inline]
pub(crate) fn distribution_term(total: i64, count: i64, num_referees: i64) -> i64 {
    if num_referees == 0 {
        return 0;
    }
    ceil_div((total - count * num_referees).abs(), num_referees)
}

/// `ceil(count - team_total / n)` when positive, else zero.
#[inline]
pub(crate) fn frequency_term(team_total: i64, count: i64, num_referees: i64) -> i64 {
    let excess = count * num_referees - team_total;
    if num_referees == 0 || excess <= 0 {
        0
    } else {
        ceil_div(excess, num_referees)
    }
}

#[inline]
fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator - 1) / denominator
}

pub(crate) fn schedule_has_conflict(
    instance: &Instance,
    referee: RefereeId,
    schedule: &IdSet<GameId>,
) -> bool {
    let referee = instance.referee(referee);
    schedule
        .adjacent_pairs()
        .any(|(p, n)| games_conflict(instance, referee, p, n))
}

pub(crate) fn schedule_distance(
    instance: &Instance,
    referee: RefereeId,
    schedule: &IdSet<GameId>,
) -> i64 {
    let referee = instance.referee(referee);
    let mut prev = None;
    let mut distance = 0;
    for g in schedule.iter() {
        distance += leg_distance(instance, referee, prev, Some(g));
        prev = Some(g);
    }
    distance + leg_distance(instance, referee, prev, None)
}

/// Assignment frequency summed over all referees for one team. `counts` is scratch space of
/// length `num_referees`, zero on entry and on exit.
pub(crate) fn team_frequency_cost<V: AssignmentView>(
    instance: &Instance,
    view: &V,
    team: TeamId,
    counts: &mut [i64],
) -> i64 {
    let mut team_total = 0;
    for &g in instance.games_involving(team) {
        let crew = view.referees_of(g);
        team_total += crew.len() as i64;
        for r in crew.iter() {
            counts[r.index()] += 1;
        }
    }

    let num_referees = instance.num_referees() as i64;
    let mut cost = 0;
    for count in counts.iter_mut() {
        if *count > 0 {
            cost += frequency_term(team_total, *count, num_referees);
            *count = 0;
        }
    }
    cost
}

#[cfg(test)]
mod tests;
