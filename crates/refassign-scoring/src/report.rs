//! Human-readable listing of every violated constraint.

use std::fmt;

use refassign_core::{GameId, Instance, RefereeId, TeamId};

use crate::assignment::AssignmentView;
use crate::constraint::ConstraintKind;
use crate::evaluate::{
    above_max, below_min, crew_incompatibility, distribution_term, frequency_term,
    lacks_experience, schedule_distance, team_conflicts, unavailable_for, under_level_for,
    unfilled_optional_slots,
};
use crate::travel::games_conflict;

/// What a violation is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Game(GameId),
    Referee(RefereeId),
    TeamReferee(TeamId, RefereeId),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Game(g) => write!(f, "game {}", g),
            Subject::Referee(r) => write!(f, "{}", r),
            Subject::TeamReferee(t, r) => write!(f, "{} with {}", r, t),
        }
    }
}

/// One nonzero constraint term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    pub subject: Subject,
    /// Raw, unweighted contribution of this term.
    pub amount: i64,
    pub message: String,
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = if self.kind.is_hard() { "hard" } else { "soft" };
        write!(
            f,
            "[{} {}] {}: {} ({})",
            severity, self.kind, self.subject, self.message, self.amount
        )
    }
}

/// Lists every violated hard constraint and every nonzero soft term.
///
/// Summing `amount` per kind reproduces the full evaluation, so the report
/// explains the score exactly. Hard entries come first.
pub fn violation_report<V: AssignmentView>(instance: &Instance, view: &V) -> Vec<ConstraintViolation> {
    let mut report = Vec::new();
    let mut push = |kind, subject, amount, message: String| {
        report.push(ConstraintViolation {
            kind,
            subject,
            amount,
            message,
        })
    };

    for g in instance.game_ids() {
        let size = view.referees_of(g).len();
        let division = instance.game_division(g);
        if below_min(division, size) {
            push(
                ConstraintKind::MinReferees,
                Subject::Game(g),
                1,
                format!("{} referees assigned, {} requires at least {}", size, division.id, division.min_referees),
            );
        }
        if above_max(division, size) {
            push(
                ConstraintKind::MaxReferees,
                Subject::Game(g),
                1,
                format!("{} referees assigned, {} allows at most {}", size, division.id, division.max_referees),
            );
        }
    }

    for r in instance.referee_ids() {
        let referee = instance.referee(r);
        let schedule = view.games_of(r);
        if let Some((p, n)) = schedule
            .adjacent_pairs()
            .find(|&(p, n)| games_conflict(instance, referee, p, n))
        {
            push(
                ConstraintKind::FeasibleTravel,
                Subject::Referee(r),
                1,
                format!("cannot reach game {} after game {}", n, p),
            );
        }
        if let Some(g) = schedule.iter().find(|&g| unavailable_for(instance, r, g)) {
            push(
                ConstraintKind::Availability,
                Subject::Referee(r),
                1,
                format!("unavailable during game {} ({})", g, instance.game(g).window),
            );
        }
        if let Some(g) = schedule.iter().find(|&g| under_level_for(instance, r, g)) {
            push(
                ConstraintKind::MinimumLevel,
                Subject::Referee(r),
                1,
                format!(
                    "level {} below {} required for game {}",
                    referee.level,
                    instance.game_division(g).required_level,
                    g
                ),
            );
        }
    }

    for g in instance.game_ids() {
        let crew = view.referees_of(g);
        if lacks_experience(instance, view, g) {
            push(
                ConstraintKind::LackOfExperience,
                Subject::Game(g),
                1,
                format!("crew {} lacks the required experience {}", crew, instance.game(g).required_experience),
            );
        }
        let unfilled = unfilled_optional_slots(instance.game_division(g), crew.len());
        if unfilled > 0 {
            push(
                ConstraintKind::OptionalReferee,
                Subject::Game(g),
                unfilled,
                format!("{} optional slots left empty", unfilled),
            );
        }
        let incompatible = crew_incompatibility(instance, crew);
        if incompatible > 0 {
            push(
                ConstraintKind::RefereeIncompatibility,
                Subject::Game(g),
                incompatible,
                format!("crew {} contains incompatible referees", crew),
            );
        }
        let team = crew.iter().map(|r| team_conflicts(instance, r, g)).sum::<i64>();
        if team > 0 {
            push(
                ConstraintKind::TeamIncompatibility,
                Subject::Game(g),
                team,
                format!("crew {} contains referees incompatible with a playing team", crew),
            );
        }
    }

    let n = instance.num_referees() as i64;
    let total = view.total_assignments() as i64;
    for r in instance.referee_ids() {
        let schedule = view.games_of(r);
        let spread = distribution_term(total, schedule.len() as i64, n);
        if spread > 0 {
            push(
                ConstraintKind::GamesDistribution,
                Subject::Referee(r),
                spread,
                format!("{} games assigned, average is {}/{}", schedule.len(), total, n),
            );
        }
        let distance = schedule_distance(instance, r, schedule);
        if distance > 0 {
            push(
                ConstraintKind::TotalDistance,
                Subject::Referee(r),
                distance,
                format!("travels {} km", distance),
            );
        }
    }

    for t in instance.team_ids() {
        let mut team_total = 0;
        let mut counts = vec![0i64; instance.num_referees()];
        for &g in instance.games_involving(t) {
            let crew = view.referees_of(g);
            team_total += crew.len() as i64;
            for r in crew.iter() {
                counts[r.index()] += 1;
            }
        }
        for (i, &count) in counts.iter().enumerate() {
            let excess = frequency_term(team_total, count, n);
            if excess > 0 {
                let r = RefereeId::from_index(i);
                push(
                    ConstraintKind::AssignmentFrequency,
                    Subject::TeamReferee(t, r),
                    excess,
                    format!("officiates {} of {} assignments involving {}", count, team_total, t),
                );
            }
        }
    }

    report
}
