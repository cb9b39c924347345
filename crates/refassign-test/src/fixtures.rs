//! Hand-built instances.

use chrono::{NaiveDate, NaiveDateTime};
use refassign_core::{
    Arena, ArenaId, Division, DivisionId, Game, Instance, Location, Referee, RefereeId, Team,
    TeamId, TimeWindow, Weights,
};

/// A moment in March 2024.
pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .expect("valid fixture date")
}

/// `count` interchangeable referees: level 1, experience 1, living at `(i, 0)`.
pub fn referees(count: u32) -> Vec<Referee> {
    (1..=count)
        .map(|i| Referee::new(RefereeId::new(i), 1, Location::new(i as f64, 0.0), 1))
        .collect()
}

/// One game of a division requiring `min..=max` referees out of `pool`.
///
/// Every crew of the minimum size is feasible. Referee `i` lives `i` km
/// from the arena, so with unit weights and `min == 1` the optimum is the
/// crew `{R1}`: the extra driving outweighs an unfilled optional slot.
pub fn single_game(min: usize, max: usize, pool: u32) -> Instance {
    let mut builder = Instance::builder()
        .division(Division::new(DivisionId::new(1), min, max, 1, 2))
        .team(Team::new(TeamId::new(1), DivisionId::new(1)))
        .team(Team::new(TeamId::new(2), DivisionId::new(1)))
        .arena(Arena::new(ArenaId::new(1), Location::new(0.0, 0.0)))
        .game(Game::new(
            TeamId::new(1),
            TeamId::new(2),
            DivisionId::new(1),
            TimeWindow::default_match(at(1, 18, 0)),
            ArenaId::new(1),
            0,
        ));
    for r in referees(pool) {
        builder = builder.referee(r);
    }
    builder.build().expect("valid single game fixture")
}

/// Two games on the same day 30 minutes apart at arenas 100 km apart.
///
/// At the default 50 km/h the trip takes 120 minutes, so a single referee
/// cannot officiate both. The second referee makes the instance feasible.
pub fn same_day_pair() -> Instance {
    Instance::builder()
        .division(Division::new(DivisionId::new(1), 1, 1, 1, 4))
        .team(Team::new(TeamId::new(1), DivisionId::new(1)))
        .team(Team::new(TeamId::new(2), DivisionId::new(1)))
        .team(Team::new(TeamId::new(3), DivisionId::new(1)))
        .team(Team::new(TeamId::new(4), DivisionId::new(1)))
        .arena(Arena::new(ArenaId::new(1), Location::new(0.0, 0.0)))
        .arena(Arena::new(ArenaId::new(2), Location::new(100.0, 0.0)))
        .referee(Referee::new(RefereeId::new(1), 1, Location::new(0.0, 0.0), 1))
        .referee(Referee::new(RefereeId::new(2), 1, Location::new(100.0, 0.0), 1))
        .game(Game::new(
            TeamId::new(1),
            TeamId::new(2),
            DivisionId::new(1),
            TimeWindow::new(at(2, 10, 0), at(2, 12, 0)).expect("valid window"),
            ArenaId::new(1),
            0,
        ))
        .game(Game::new(
            TeamId::new(3),
            TeamId::new(4),
            DivisionId::new(1),
            TimeWindow::new(at(2, 12, 30), at(2, 14, 30)).expect("valid window"),
            ArenaId::new(2),
            0,
        ))
        .build()
        .expect("valid same day fixture")
}

/// A small league over three days with every kind of restriction present.
///
/// - D1 needs 2..=3 referees of level 2, D2 needs 1..=2 of level 1.
/// - R1 is level 1, so it cannot officiate D1 games.
/// - R2 and R3 are mutually incompatible; R4 is incompatible with T1.
/// - R5 is unavailable on day 2.
///
/// Feasible assignments exist.
pub fn small_league(weights: Weights) -> Instance {
    let d1 = DivisionId::new(1);
    let d2 = DivisionId::new(2);
    let team = |n| TeamId::new(n);
    let game = |home, away, division, day, hour, arena, experience| {
        Game::new(
            team(home),
            team(away),
            division,
            TimeWindow::default_match(at(day, hour, 0)),
            ArenaId::new(arena),
            experience,
        )
    };

    Instance::builder()
        .weights(weights)
        .division(Division::new(d1, 2, 3, 2, 2))
        .division(Division::new(d2, 1, 2, 1, 2))
        .team(Team::new(team(1), d1))
        .team(Team::new(team(2), d1))
        .team(Team::new(team(3), d2))
        .team(Team::new(team(4), d2))
        .arena(Arena::new(ArenaId::new(1), Location::new(0.0, 0.0)))
        .arena(Arena::new(ArenaId::new(2), Location::new(12.0, 5.0)))
        .arena(Arena::new(ArenaId::new(3), Location::new(-8.0, 20.0)))
        .referee(Referee::new(RefereeId::new(1), 1, Location::new(1.0, 1.0), 1))
        .referee(
            Referee::new(RefereeId::new(2), 3, Location::new(10.0, 4.0), 5)
                .with_incompatible_referees([RefereeId::new(3)]),
        )
        .referee(
            Referee::new(RefereeId::new(3), 2, Location::new(-5.0, 15.0), 3)
                .with_incompatible_referees([RefereeId::new(2)]),
        )
        .referee(
            Referee::new(RefereeId::new(4), 2, Location::new(3.0, -2.0), 2)
                .with_incompatible_teams([team(1)]),
        )
        .referee(
            Referee::new(RefereeId::new(5), 2, Location::new(6.0, 9.0), 4).with_unavailability([
                TimeWindow::new(at(2, 0, 0), at(3, 0, 0)).expect("valid window"),
            ]),
        )
        .game(game(1, 2, d1, 1, 10, 1, 4))
        .game(game(3, 4, d2, 1, 14, 2, 1))
        .game(game(2, 1, d1, 2, 11, 2, 6))
        .game(game(4, 3, d2, 2, 16, 3, 2))
        .game(game(1, 2, d1, 3, 9, 3, 3))
        .game(game(3, 4, d2, 3, 18, 1, 1))
        .build()
        .expect("valid league fixture")
}
