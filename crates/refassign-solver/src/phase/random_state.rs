//! Random initial crews for local search.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use refassign_core::{GameId, RefereeId};
use refassign_scoring::{AssignmentView, ScoreDirector};

use super::greedy::breaks_referee_rules;
use super::{log_phase_end, log_phase_start, Phase};
use crate::error::SolverError;
use crate::scope::{PhaseScope, SolverScope};

/// Fills every game with random referees. Returns the number of
/// assignments made.
///
/// Games are visited in random order twice. The first pass draws up to the
/// division minimum for each game, the second a uniform number of optional
/// referees between zero and `max - min`. Candidates come from the
/// referees not yet on the crew, in random order; one whose addition would
/// break a travel, availability, or level rule is dropped and the draw
/// continues with the rest, so a game ends short when the pool runs dry.
pub fn random_initial_state(director: &mut ScoreDirector<'_>, rng: &mut StdRng) -> usize {
    let instance = director.instance();
    let mut games: Vec<GameId> = instance.game_ids().collect();
    games.shuffle(rng);

    let mut assigned = 0;
    for optional in [false, true] {
        for &game in &games {
            let division = instance.game_division(game);
            let wanted = if optional {
                let spare = division.max_referees.saturating_sub(division.min_referees);
                rng.random_range(0..=spare)
            } else {
                division.min_referees
            };

            let crew = director.assignment().referees_of(game);
            let mut pool: Vec<RefereeId> = instance
                .referee_ids()
                .filter(|r| !crew.contains(*r))
                .collect();
            pool.shuffle(rng);

            let mut added = 0;
            while added < wanted {
                let Some(referee) = pool.pop() else {
                    break;
                };
                let mut candidate = director.assignment().referees_of(game).clone();
                candidate.insert(referee);
                if breaks_referee_rules(&director.hard_delta_for(game, &candidate)) {
                    continue;
                }
                director.replace_referees(game, &candidate);
                added += 1;
            }
            assigned += added;
        }
    }
    assigned
}

/// Phase wrapper around [`random_initial_state`].
#[derive(Debug, Clone, Default)]
pub struct RandomStatePhase;

impl RandomStatePhase {
    pub fn new() -> Self {
        Self
    }
}

impl Phase for RandomStatePhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<(), SolverError> {
        let mut phase_scope = PhaseScope::new(solver_scope);
        log_phase_start(&phase_scope, "Random State");

        let (director, rng) = phase_scope.solver_scope_mut().director_and_rng_mut();
        let assigned = random_initial_state(director, rng);
        for _ in 0..assigned {
            phase_scope.increment_step_count();
        }
        phase_scope.solver_scope().assert_step()?;

        phase_scope.update_best_solution();
        log_phase_end(&phase_scope, "Random State");
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "RandomState"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use refassign_core::Weights;
    use refassign_scoring::ConstraintKind;
    use refassign_test::fixtures::{same_day_pair, small_league};

    #[test]
    fn test_crews_within_bounds_and_rules() {
        let instance = small_league(Weights::UNIT);
        for seed in 0..30 {
            let mut director = ScoreDirector::new(&instance);
            let mut rng = StdRng::seed_from_u64(seed);
            let assigned = random_initial_state(&mut director, &mut rng);

            assert_eq!(assigned, director.assignment().total_assignments());
            let totals = director.totals();
            assert_eq!(totals[ConstraintKind::FeasibleTravel], 0);
            assert_eq!(totals[ConstraintKind::Availability], 0);
            assert_eq!(totals[ConstraintKind::MinimumLevel], 0);
            assert_eq!(totals[ConstraintKind::MaxReferees], 0);
            director.assert_totals().unwrap();
        }
    }

    #[test]
    fn test_same_seed_same_state() {
        let instance = small_league(Weights::UNIT);
        let build = |seed| {
            let mut director = ScoreDirector::new(&instance);
            random_initial_state(&mut director, &mut StdRng::seed_from_u64(seed));
            director.into_assignment()
        };
        assert_eq!(build(9), build(9));
    }

    #[test]
    fn test_feasible_pair() {
        let instance = same_day_pair();
        for seed in 0..10 {
            let mut director = ScoreDirector::new(&instance);
            random_initial_state(&mut director, &mut StdRng::seed_from_u64(seed));
            assert!(director.is_feasible());
        }
    }
}
