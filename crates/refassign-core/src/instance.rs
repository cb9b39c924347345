//! The immutable problem instance.

use crate::domain::{Arena, Division, Game, Referee, Team};
use crate::error::{RefAssignError, Result};
use crate::geo::{travel_minutes, Location};
use crate::ids::{ArenaId, DivisionId, GameId, RefereeId, TeamId};
use crate::settings::{ProblemSettings, Weights};

/// A validated referee assignment problem.
///
/// Entity tables are dense and indexed by id. Games are sorted by match start
/// (ties keep input order), so walking game ids in increasing order walks
/// them chronologically.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    divisions: Vec<Division>,
    teams: Vec<Team>,
    arenas: Vec<Arena>,
    referees: Vec<Referee>,
    games: Vec<Game>,
    games_by_team: Vec<Vec<GameId>>,
    settings: ProblemSettings,
}

impl Instance {
    pub fn builder() -> InstanceBuilder {
        InstanceBuilder::new()
    }

    #[inline]
    pub fn num_divisions(&self) -> usize {
        self.divisions.len()
    }

    #[inline]
    pub fn num_teams(&self) -> usize {
        self.teams.len()
    }

    #[inline]
    pub fn num_arenas(&self) -> usize {
        self.arenas.len()
    }

    #[inline]
    pub fn num_referees(&self) -> usize {
        self.referees.len()
    }

    #[inline]
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    #[inline]
    pub fn division(&self, id: DivisionId) -> &Division {
        &self.divisions[id.index()]
    }

    #[inline]
    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id.index()]
    }

    #[inline]
    pub fn arena(&self, id: ArenaId) -> &Arena {
        &self.arenas[id.index()]
    }

    #[inline]
    pub fn referee(&self, id: RefereeId) -> &Referee {
        &self.referees[id.index()]
    }

    #[inline]
    pub fn game(&self, id: GameId) -> &Game {
        &self.games[id.index()]
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn arenas(&self) -> &[Arena] {
        &self.arenas
    }

    pub fn referees(&self) -> &[Referee] {
        &self.referees
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn game_ids(&self) -> impl DoubleEndedIterator<Item = GameId> + Clone {
        GameId::range(self.games.len())
    }

    pub fn referee_ids(&self) -> impl DoubleEndedIterator<Item = RefereeId> + Clone {
        RefereeId::range(self.referees.len())
    }

    pub fn team_ids(&self) -> impl DoubleEndedIterator<Item = TeamId> + Clone {
        TeamId::range(self.teams.len())
    }

    /// Division of the given game.
    #[inline]
    pub fn game_division(&self, game: GameId) -> &Division {
        self.division(self.game(game).division)
    }

    /// Location of the arena hosting the given game.
    #[inline]
    pub fn game_location(&self, game: GameId) -> Location {
        self.arena(self.game(game).arena).location
    }

    /// Games in which `team` plays home or away, in game order.
    #[inline]
    pub fn games_involving(&self, team: TeamId) -> &[GameId] {
        &self.games_by_team[team.index()]
    }

    /// Largest referee count any division allows, capped at the referee pool.
    pub fn largest_crew(&self) -> usize {
        self.divisions
            .iter()
            .map(|d| d.max_referees)
            .max()
            .unwrap_or(0)
            .min(self.referees.len())
    }

    #[inline]
    pub fn settings(&self) -> &ProblemSettings {
        &self.settings
    }

    #[inline]
    pub fn weights(&self) -> &Weights {
        &self.settings.weights
    }

    /// Travel time between two locations in whole minutes, rounded up.
    #[inline]
    pub fn travel_time(&self, from: &Location, to: &Location) -> i64 {
        travel_minutes(from.distance_to(to), self.settings.average_speed_kmh)
    }

    /// Returns a copy of this instance with different settings.
    pub fn with_settings(&self, settings: ProblemSettings) -> Result<Instance> {
        validate_settings(&settings)?;
        let mut copy = self.clone();
        copy.settings = settings;
        Ok(copy)
    }
}

/// Collects entities in any order and produces a validated [`Instance`].
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    divisions: Vec<Division>,
    teams: Vec<Team>,
    arenas: Vec<Arena>,
    referees: Vec<Referee>,
    games: Vec<Game>,
    settings: ProblemSettings,
}

impl InstanceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings(mut self, settings: ProblemSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn weights(mut self, weights: Weights) -> Self {
        self.settings.weights = weights;
        self
    }

    pub fn division(mut self, division: Division) -> Self {
        self.divisions.push(division);
        self
    }

    pub fn team(mut self, team: Team) -> Self {
        self.teams.push(team);
        self
    }

    pub fn arena(mut self, arena: Arena) -> Self {
        self.arenas.push(arena);
        self
    }

    pub fn referee(mut self, referee: Referee) -> Self {
        self.referees.push(referee);
        self
    }

    pub fn game(mut self, game: Game) -> Self {
        self.games.push(game);
        self
    }

    pub fn push_division(&mut self, division: Division) {
        self.divisions.push(division);
    }

    pub fn push_team(&mut self, team: Team) {
        self.teams.push(team);
    }

    pub fn push_arena(&mut self, arena: Arena) {
        self.arenas.push(arena);
    }

    pub fn push_referee(&mut self, referee: Referee) {
        self.referees.push(referee);
    }

    pub fn push_game(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Validates cross references and bounds, then sorts games by start.
    pub fn build(self) -> Result<Instance> {
        let InstanceBuilder {
            mut divisions,
            mut teams,
            mut arenas,
            mut referees,
            mut games,
            settings,
        } = self;

        validate_settings(&settings)?;
        check_dense("division", divisions.iter().map(|d| d.id.get()))?;
        check_dense("team", teams.iter().map(|t| t.id.get()))?;
        check_dense("arena", arenas.iter().map(|a| a.id.get()))?;
        check_dense("referee", referees.iter().map(|r| r.id.get()))?;
        divisions.sort_by_key(|d| d.id);
        teams.sort_by_key(|t| t.id);
        arenas.sort_by_key(|a| a.id);
        referees.sort_by_key(|r| r.id);

        let num_referees = referees.len();
        for d in &divisions {
            if d.min_referees > d.max_referees {
                return Err(RefAssignError::invalid(format!(
                    "{}: minimum referees {} exceeds maximum {}",
                    d.id, d.min_referees, d.max_referees
                )));
            }
            if d.min_referees > num_referees {
                return Err(RefAssignError::invalid(format!(
                    "{}: requires {} referees but only {} exist",
                    d.id, d.min_referees, num_referees
                )));
            }
        }

        for t in &teams {
            check_ref("team", t.id, "division", t.division.get(), divisions.len())?;
        }

        for r in &referees {
            for other in r.incompatible_referees() {
                check_ref("referee", r.id, "referee", other.get(), num_referees)?;
            }
            for team in r.incompatible_teams() {
                check_ref("referee", r.id, "team", team.get(), teams.len())?;
            }
        }

        for (i, g) in games.iter().enumerate() {
            let line = i + 1;
            check_ref("game", line, "team", g.home.get(), teams.len())?;
            check_ref("game", line, "team", g.away.get(), teams.len())?;
            check_ref("game", line, "division", g.division.get(), divisions.len())?;
            check_ref("game", line, "arena", g.arena.get(), arenas.len())?;
            if g.home == g.away {
                return Err(RefAssignError::invalid(format!(
                    "game {}: {} cannot play against itself",
                    line, g.home
                )));
            }
        }

        games.sort_by_key(|g| g.window.start());
        for (i, g) in games.iter_mut().enumerate() {
            g.id = GameId::from_index(i);
        }

        let mut games_by_team = vec![Vec::new(); teams.len()];
        for g in &games {
            games_by_team[g.home.index()].push(g.id);
            games_by_team[g.away.index()].push(g.id);
        }

        Ok(Instance {
            divisions,
            teams,
            arenas,
            referees,
            games,
            games_by_team,
            settings,
        })
    }
}

fn validate_settings(settings: &ProblemSettings) -> Result<()> {
    if !settings.weights.is_valid() {
        return Err(RefAssignError::invalid("constraint weights must be non-negative"));
    }
    if settings.average_speed_kmh <= 0 {
        return Err(RefAssignError::invalid(format!(
            "average speed must be positive, got {}",
            settings.average_speed_kmh
        )));
    }
    Ok(())
}

fn check_dense(kind: &str, codes: impl Iterator<Item = u32>) -> Result<()> {
    let mut codes: Vec<u32> = codes.collect();
    codes.sort_unstable();
    for (i, code) in codes.iter().enumerate() {
        let expected = i as u32 + 1;
        if *code != expected {
            return Err(RefAssignError::invalid(format!(
                "{} codes must be exactly 1..={} (found {} where {} was expected)",
                kind,
                codes.len(),
                code,
                expected
            )));
        }
    }
    Ok(())
}

fn check_ref(
    owner_kind: &str,
    owner: impl std::fmt::Display,
    target_kind: &str,
    code: u32,
    len: usize,
) -> Result<()> {
    if code == 0 || code as usize > len {
        return Err(RefAssignError::invalid(format!(
            "{} {} refers to unknown {} {}",
            owner_kind, owner, target_kind, code
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::time::TimeWindow;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn base() -> InstanceBuilder {
        Instance::builder()
            .division(Division::new(DivisionId::new(1), 1, 2, 1, 2))
            .team(Team::new(TeamId::new(1), DivisionId::new(1)))
            .team(Team::new(TeamId::new(2), DivisionId::new(1)))
            .arena(Arena::new(ArenaId::new(1), Location::new(0.0, 0.0)))
            .referee(Referee::new(RefereeId::new(1), 1, Location::new(1.0, 1.0), 2))
            .referee(Referee::new(RefereeId::new(2), 1, Location::new(2.0, 2.0), 2))
    }

    fn game(day: u32, hour: u32) -> Game {
        Game::new(
            TeamId::new(1),
            TeamId::new(2),
            DivisionId::new(1),
            TimeWindow::default_match(at(day, hour)),
            ArenaId::new(1),
            1,
        )
    }

    #[test]
    fn test_games_sorted_by_start() {
        let instance = base()
            .game(game(3, 10))
            .game(game(1, 18))
            .game(game(2, 9))
            .build()
            .unwrap();

        let starts: Vec<_> = instance.games().iter().map(|g| g.window.start()).collect();
        assert_eq!(starts, vec![at(1, 18), at(2, 9), at(3, 10)]);
        for (i, g) in instance.games().iter().enumerate() {
            assert_eq!(g.id, GameId::from_index(i));
        }
    }

    #[test]
    fn test_games_involving_team() {
        let instance = base().game(game(1, 10)).game(game(2, 10)).build().unwrap();
        assert_eq!(
            instance.games_involving(TeamId::new(2)),
            &[GameId::new(1), GameId::new(2)]
        );
    }

    #[test]
    fn test_min_above_max_rejected() {
        let result = Instance::builder()
            .division(Division::new(DivisionId::new(1), 3, 2, 1, 0))
            .build();
        assert!(matches!(result, Err(RefAssignError::InvalidInstance(_))));
    }

    #[test]
    fn test_min_above_referee_pool_rejected() {
        let result = base()
            .division(Division::new(DivisionId::new(2), 3, 3, 1, 0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_sparse_codes_rejected() {
        let result = base()
            .referee(Referee::new(RefereeId::new(4), 1, Location::default(), 0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_arena_rejected() {
        let mut g = game(1, 10);
        g.arena = ArenaId::new(9);
        assert!(base().game(g).build().is_err());
    }

    #[test]
    fn test_travel_time_uses_speed() {
        let instance = base()
            .settings(ProblemSettings::default().with_average_speed(60))
            .build()
            .unwrap();
        let a = Location::new(0.0, 0.0);
        let b = Location::new(30.0, 40.0);
        assert_eq!(instance.travel_time(&a, &b), 50);
    }

    #[test]
    fn test_largest_crew_capped_by_pool() {
        let instance = base()
            .division(Division::new(DivisionId::new(2), 0, 5, 1, 0))
            .build()
            .unwrap();
        assert_eq!(instance.largest_crew(), 2);
    }
}
