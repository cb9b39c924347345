//! Seeded random instances for property tests.

use chrono::TimeDelta;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use refassign_core::{
    Arena, ArenaId, Division, DivisionId, Game, Instance, Location, Referee, RefereeId, Team,
    TeamId, TimeWindow, Weights,
};

use crate::fixtures::at;

/// Shape of a generated instance.
#[derive(Debug, Clone)]
pub struct RandomInstanceConfig {
    pub divisions: u32,
    pub teams: u32,
    pub arenas: u32,
    pub referees: u32,
    pub games: u32,
    /// Games are spread over days `1..=days`.
    pub days: u32,
    /// Side of the square that arenas and homes are placed in, in km.
    pub extent: f64,
    pub weights: Weights,
}

impl Default for RandomInstanceConfig {
    fn default() -> Self {
        Self {
            divisions: 2,
            teams: 6,
            arenas: 3,
            referees: 6,
            games: 10,
            days: 3,
            extent: 60.0,
            weights: Weights::UNIT,
        }
    }
}

/// Generates a valid instance. The same seed always yields the same instance.
///
/// Restrictions are dense enough that random assignments hit every
/// constraint, including same-day travel conflicts and unavailability.
pub fn random_instance(seed: u64, config: &RandomInstanceConfig) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = Instance::builder().weights(config.weights);

    for d in 1..=config.divisions {
        let min = rng.random_range(0..=2usize).min(config.referees as usize);
        let max = min + rng.random_range(0..=2usize);
        let level = rng.random_range(1..=3);
        builder.push_division(Division::new(DivisionId::new(d), min, max, level, 0));
    }

    for t in 1..=config.teams {
        let division = DivisionId::new(rng.random_range(1..=config.divisions));
        builder.push_team(Team::new(TeamId::new(t), division));
    }

    let point = |rng: &mut ChaCha8Rng| {
        Location::new(
            rng.random_range(0.0..config.extent),
            rng.random_range(0.0..config.extent),
        )
    };

    for a in 1..=config.arenas {
        builder.push_arena(Arena::new(ArenaId::new(a), point(&mut rng)));
    }

    for r in 1..=config.referees {
        let incompatible_referees: Vec<RefereeId> = (1..=config.referees)
            .filter(|&o| o != r && rng.random_bool(0.2))
            .map(RefereeId::new)
            .collect();
        let incompatible_teams: Vec<TeamId> = (1..=config.teams)
            .filter(|_| rng.random_bool(0.15))
            .map(TeamId::new)
            .collect();
        let unavailability: Vec<TimeWindow> = (0..rng.random_range(0..=2))
            .map(|_| {
                let day = rng.random_range(1..=config.days);
                let hour = rng.random_range(8..=20);
                TimeWindow::starting_at(at(day, hour, 0), rng.random_range(60..=240))
            })
            .collect();
        let home = point(&mut rng);
        builder.push_referee(
            Referee::new(
                RefereeId::new(r),
                rng.random_range(1..=3),
                home,
                rng.random_range(0..=5),
            )
            .with_incompatible_referees(incompatible_referees)
            .with_incompatible_teams(incompatible_teams)
            .with_unavailability(unavailability),
        );
    }

    for _ in 0..config.games {
        let home = rng.random_range(1..=config.teams);
        let mut away = rng.random_range(1..config.teams);
        if away >= home {
            away += 1;
        }
        let day = rng.random_range(1..=config.days);
        let start = at(day, rng.random_range(9..=20), 0) + TimeDelta::minutes(rng.random_range(0..4) * 15);
        builder.push_game(Game::new(
            TeamId::new(home),
            TeamId::new(away),
            DivisionId::new(rng.random_range(1..=config.divisions)),
            TimeWindow::starting_at(start, rng.random_range(60..=150)),
            ArenaId::new(rng.random_range(1..=config.arenas)),
            rng.random_range(0..=8),
        ));
    }

    builder.build().expect("generated instance is valid")
}

/// A random crew for every game, indexed by game position.
///
/// Crew sizes range over `0..=largest_crew + 1`, so both referee-count
/// bounds get violated some of the time.
pub fn random_crews(instance: &Instance, seed: u64) -> Vec<Vec<RefereeId>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pool = instance.num_referees();
    instance
        .game_ids()
        .map(|_| {
            let size = rng.random_range(0..=(instance.largest_crew() + 1).min(pool));
            let mut crew: Vec<RefereeId> = Vec::with_capacity(size);
            while crew.len() < size {
                let r = RefereeId::new(rng.random_range(1..=pool as u32));
                if !crew.contains(&r) {
                    crew.push(r);
                }
            }
            crew
        })
        .collect()
}
