//! Solution file reader and writer.
//!
//! One line per game in game order:
//!
//! ```text
//! T1 T2 2 R1 R4
//! T3 T4 1 R2
//! ```
//!
//! Columns are right-aligned to the widest team code, crew size and
//! referee code the instance can produce.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use refassign_core::{GameId, Instance, RefAssignError, RefereeId, Result, TeamId};
use refassign_scoring::{Assignment, AssignmentView};

use crate::scanner::Scanner;

/// Writes the crews of `view` in game order.
pub fn write_solution<W: Write, V: AssignmentView>(
    mut w: W,
    instance: &Instance,
    view: &V,
) -> io::Result<()> {
    w.write_all(format_solution(instance, view).as_bytes())
}

/// Renders the crews of `view` in game order.
pub fn format_solution<V: AssignmentView>(instance: &Instance, view: &V) -> String {
    let team_width = digits(instance.num_teams()) + 1;
    let referee_width = digits(instance.num_referees()) + 1;
    let largest = instance
        .game_ids()
        .map(|g| view.referees_of(g).len())
        .max()
        .unwrap_or(0);
    let count_width = digits(largest);

    let mut out = String::new();
    for game in instance.games() {
        let crew = view.referees_of(game.id);
        let mut fields = vec![
            format!("{:>team_width$}", game.home.to_string()),
            format!("{:>team_width$}", game.away.to_string()),
            format!("{:>count_width$}", crew.len()),
        ];
        fields.extend(
            crew.iter()
                .map(|r| format!("{:>referee_width$}", r.to_string())),
        );
        out.push_str(&fields.join(" "));
        out.push('\n');
    }
    out
}

fn digits(mut n: usize) -> usize {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

/// Reads a solution file for `instance`.
pub fn read_solution_file(instance: &Instance, path: impl AsRef<Path>) -> Result<Assignment> {
    let text = fs::read_to_string(path)?;
    read_solution(instance, &text)
}

/// Parses a solution for `instance`.
///
/// Each line names a game by its home and away team. Games played more
/// than once between the same pair are filled in chronological order.
/// Every game must appear exactly once.
///
/// # Example
///
/// ```
/// use refassign_io::{format_solution, read_solution};
/// use refassign_scoring::Assignment;
/// # use refassign_core::*;
/// # use chrono::NaiveDate;
/// # let start = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// # let instance = Instance::builder()
/// #     .division(Division::new(DivisionId::new(1), 1, 2, 1, 2))
/// #     .team(Team::new(TeamId::new(1), DivisionId::new(1)))
/// #     .team(Team::new(TeamId::new(2), DivisionId::new(1)))
/// #     .arena(Arena::new(ArenaId::new(1), Location::new(0.0, 0.0)))
/// #     .referee(Referee::new(RefereeId::new(1), 1, Location::new(0.0, 0.0), 1))
/// #     .referee(Referee::new(RefereeId::new(2), 1, Location::new(1.0, 0.0), 1))
/// #     .game(Game::new(TeamId::new(1), TeamId::new(2), DivisionId::new(1),
/// #         TimeWindow::default_match(start), ArenaId::new(1), 0))
/// #     .build()
/// #     .unwrap();
///
/// let assignment = read_solution(&instance, "T1 T2 2 R1 R2\n").unwrap();
/// assert_eq!(format_solution(&instance, &assignment), "T1 T2 2 R1 R2\n");
/// ```
pub fn read_solution(instance: &Instance, text: &str) -> Result<Assignment> {
    let mut assignment = Assignment::new(instance);
    let mut filled = vec![false; instance.num_games()];
    let mut lines = 0;

    for (i, line) in text.lines().enumerate() {
        lines = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let mut sc = Scanner::at_line(line, lines);

        let home = TeamId::new(sc.code('T')?);
        let away = TeamId::new(sc.code('T')?);
        let game = locate(instance, &filled, home, away).map_err(|m| sc.error(m))?;
        filled[game.index()] = true;

        let count: usize = sc.unsigned("referee count")?;
        for listed in 0..count {
            if sc.at_end() {
                return Err(sc.error(format!(
                    "{home} {away} declares {count} referees but lists {listed}"
                )));
            }
            let code = sc.code('R')?;
            if code == 0 || code as usize > instance.num_referees() {
                return Err(sc.error(format!("unknown referee R{code}")));
            }
            if !assignment.assign(RefereeId::new(code), game) {
                return Err(sc.error(format!("R{code} listed twice for {home} {away}")));
            }
        }
        if !sc.at_end() {
            return Err(sc.error(format!(
                "{home} {away} declares {count} referees but lists more"
            )));
        }
    }

    let covered = filled.iter().filter(|f| **f).count();
    if covered != instance.num_games() {
        return Err(RefAssignError::parse(
            lines + 1,
            format!(
                "solution covers {covered} of the {} games",
                instance.num_games()
            ),
        ));
    }
    Ok(assignment)
}

/// The first game between `home` and `away` not yet read.
fn locate(
    instance: &Instance,
    filled: &[bool],
    home: TeamId,
    away: TeamId,
) -> std::result::Result<GameId, String> {
    let mut played = false;
    for game in instance.games() {
        if game.home == home && game.away == away {
            if !filled[game.id.index()] {
                return Ok(game.id);
            }
            played = true;
        }
    }
    if played {
        Err(format!("{home} {away} listed more often than it is played"))
    } else {
        Err(format!("no game {home} {away} in the instance"))
    }
}

#[cfg(test)]
mod tests;
