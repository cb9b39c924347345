//! Instance file reader and writer.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use refassign_core::{
    Arena, ArenaId, Division, DivisionId, Game, Instance, InstanceBuilder, Location,
    ProblemSettings, RefAssignError, Referee, RefereeId, Result, Team, TeamId, TimeWindow,
};
use tracing::debug;

use crate::scanner::Scanner;

/// Reads instance files.
///
/// The file itself carries no weights or travel speed; those come from the
/// reader's [`ProblemSettings`].
///
/// # Example
///
/// ```
/// use refassign_io::InstanceReader;
///
/// let text = "\
/// Divisions = 1;
/// Referees = 1;
/// Arenas = 1;
/// Teams = 2;
/// Games = 1;
///
/// DIVISIONS % code, min referees, max referees, level, teams
/// D1: 1, 1, 1, 2
///
/// REFEREES % code, level, coordinates, experience, incompatible referees, incompatible teams, unavailabilities
/// R1, 1, (0, 0), 1, [], [], []
///
/// ARENAS % code, coordinates
/// A1 (3, 4)
///
/// TEAMS % name, division
/// T1 D1
/// T2 D1
///
/// GAMES % Home team, guest team, division, date, time, arena, experience
/// T1 T2 D1 2/3/2024 18:00 A1 0
/// ";
/// let instance = InstanceReader::new().read_str(text).unwrap();
/// assert_eq!(instance.num_games(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceReader {
    settings: ProblemSettings,
}

impl InstanceReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: ProblemSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Instance> {
        let text = fs::read_to_string(path)?;
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Instance> {
        let mut sc = Scanner::new(text);

        let divisions = count(&mut sc, "Divisions")?;
        let referees = count(&mut sc, "Referees")?;
        let arenas = count(&mut sc, "Arenas")?;
        let teams = count(&mut sc, "Teams")?;
        let games = count(&mut sc, "Games")?;

        let mut builder = InstanceBuilder::new().settings(self.settings);

        section(&mut sc, "DIVISIONS")?;
        for _ in 0..divisions {
            builder.push_division(division(&mut sc)?);
        }
        section(&mut sc, "REFEREES")?;
        for _ in 0..referees {
            builder.push_referee(referee(&mut sc)?);
        }
        section(&mut sc, "ARENAS")?;
        for _ in 0..arenas {
            let id = ArenaId::new(sc.code('A')?);
            builder.push_arena(Arena::new(id, location(&mut sc)?));
        }
        section(&mut sc, "TEAMS")?;
        for _ in 0..teams {
            let id = TeamId::new(sc.code('T')?);
            builder.push_team(Team::new(id, DivisionId::new(sc.code('D')?)));
        }
        section(&mut sc, "GAMES")?;
        for _ in 0..games {
            builder.push_game(game(&mut sc)?);
        }

        if !sc.at_end() {
            return Err(sc.error(format!("more entries than the {games} games declared")));
        }

        let instance = builder.build()?;
        debug!(divisions, referees, arenas, teams, games, "instance loaded");
        Ok(instance)
    }
}

/// `Name = N;`
fn count(sc: &mut Scanner<'_>, name: &str) -> Result<usize> {
    sc.expect_word(name)?;
    sc.expect('=')?;
    let n = sc.unsigned(name)?;
    sc.expect(';')?;
    Ok(n)
}

/// Section header. Anything after it on the same line is a comment.
fn section(sc: &mut Scanner<'_>, name: &str) -> Result<()> {
    sc.expect_word(name)?;
    sc.skip_line();
    Ok(())
}

fn division(sc: &mut Scanner<'_>) -> Result<Division> {
    let id = DivisionId::new(sc.code('D')?);
    sc.expect(':')?;
    let min = sc.unsigned("minimum referees")?;
    sc.expect(',')?;
    let max = sc.unsigned("maximum referees")?;
    sc.expect(',')?;
    let level = sc.integer("level")?;
    sc.expect(',')?;
    let teams = sc.unsigned("team count")?;
    Ok(Division::new(id, min, max, level, teams))
}

fn referee(sc: &mut Scanner<'_>) -> Result<Referee> {
    let id = RefereeId::new(sc.code('R')?);
    sc.expect(',')?;
    let level = sc.integer("level")?;
    sc.expect(',')?;
    let home = location(sc)?;
    sc.expect(',')?;
    let experience = sc.integer("experience")?;
    sc.expect(',')?;
    let incompatible_referees = list(sc, |sc| Ok(RefereeId::new(sc.code('R')?)))?;
    sc.expect(',')?;
    let incompatible_teams = list(sc, |sc| Ok(TeamId::new(sc.code('T')?)))?;
    sc.expect(',')?;
    let unavailability = list(sc, window)?;

    Ok(Referee::new(id, level, home, experience)
        .with_incompatible_referees(incompatible_referees)
        .with_incompatible_teams(incompatible_teams)
        .with_unavailability(unavailability))
}

fn game(sc: &mut Scanner<'_>) -> Result<Game> {
    let home = TeamId::new(sc.code('T')?);
    let away = TeamId::new(sc.code('T')?);
    let division = DivisionId::new(sc.code('D')?);
    let window = window(sc)?;
    let arena = ArenaId::new(sc.code('A')?);
    let experience = sc.integer("experience")?;
    Ok(Game::new(home, away, division, window, arena, experience))
}

/// `(x, y)`
fn location(sc: &mut Scanner<'_>) -> Result<Location> {
    sc.expect('(')?;
    let x = sc.real("x coordinate")?;
    sc.expect(',')?;
    let y = sc.real("y coordinate")?;
    sc.expect(')')?;
    Ok(Location::new(x, y))
}

/// `[a, b, ...]`, possibly empty.
fn list<T>(
    sc: &mut Scanner<'_>,
    mut item: impl FnMut(&mut Scanner<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    sc.expect('[')?;
    let mut items = Vec::new();
    if sc.eat(']') {
        return Ok(items);
    }
    loop {
        items.push(item(sc)?);
        if sc.eat(']') {
            return Ok(items);
        }
        sc.expect(',')?;
    }
}

/// `d/m/yyyy HH:MM`, optionally followed by `-HH:MM` for a same-day end
/// or `~d/m/yyyy HH:MM` for an end on another day. Without an end the
/// window has the default match length.
fn window(sc: &mut Scanner<'_>) -> Result<TimeWindow> {
    let line = sc.line();
    let start = date_time(sc)?;
    let end = if sc.eat('-') {
        start.date().and_time(time(sc)?)
    } else if sc.eat('~') {
        date_time(sc)?
    } else {
        return Ok(TimeWindow::default_match(start));
    };
    if end <= start {
        return Err(RefAssignError::parse(
            line,
            format!("time window ends at {end}, not after its start {start}"),
        ));
    }
    TimeWindow::new(start, end)
}

fn date_time(sc: &mut Scanner<'_>) -> Result<NaiveDateTime> {
    let date = date(sc)?;
    Ok(date.and_time(time(sc)?))
}

fn date(sc: &mut Scanner<'_>) -> Result<NaiveDate> {
    let day = sc.unsigned("day")?;
    sc.expect('/')?;
    let month = sc.unsigned("month")?;
    sc.expect('/')?;
    let year = sc.unsigned::<i32>("year")?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| sc.error(format!("invalid date {day}/{month}/{year}")))
}

fn time(sc: &mut Scanner<'_>) -> Result<NaiveTime> {
    let hour = sc.unsigned("hour")?;
    sc.expect(':')?;
    let minute = sc.unsigned("minute")?;
    NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| sc.error(format!("invalid time {hour}:{minute:02}")))
}

/// Writes `instance` in the layout [`InstanceReader`] reads.
pub fn write_instance<W: Write>(mut w: W, instance: &Instance) -> io::Result<()> {
    w.write_all(format_instance(instance).as_bytes())
}

/// Renders `instance` in the layout [`InstanceReader`] reads.
pub fn format_instance(instance: &Instance) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render(&mut out, instance);
    out
}

fn render(out: &mut String, instance: &Instance) -> std::fmt::Result {
    writeln!(out, "Divisions = {};", instance.num_divisions())?;
    writeln!(out, "Referees = {};", instance.num_referees())?;
    writeln!(out, "Arenas = {};", instance.num_arenas())?;
    writeln!(out, "Teams = {};", instance.num_teams())?;
    writeln!(out, "Games = {};", instance.num_games())?;

    writeln!(out)?;
    writeln!(out, "DIVISIONS % code, min referees, max referees, level, teams")?;
    for d in instance.divisions() {
        writeln!(
            out,
            "{}: {}, {}, {}, {}",
            d.id, d.min_referees, d.max_referees, d.required_level, d.team_count
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "REFEREES % code, level, coordinates, experience, incompatible referees, incompatible teams, unavailabilities"
    )?;
    for r in instance.referees() {
        writeln!(
            out,
            "{}, {}, {}, {}, [{}], [{}], [{}]",
            r.id,
            r.level,
            r.home,
            r.experience,
            joined(r.incompatible_referees()),
            joined(r.incompatible_teams()),
            joined(r.unavailability()),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "ARENAS % code, coordinates")?;
    for a in instance.arenas() {
        writeln!(out, "{} {}", a.id, a.location)?;
    }

    writeln!(out)?;
    writeln!(out, "TEAMS % name, division")?;
    for t in instance.teams() {
        writeln!(out, "{} {}", t.id, t.division)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "GAMES % Home team, guest team, division, date, time, arena, experience"
    )?;
    for g in instance.games() {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            g.home, g.away, g.division, g.window, g.arena, g.required_experience
        )?;
    }
    Ok(())
}

fn joined<T: std::fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
