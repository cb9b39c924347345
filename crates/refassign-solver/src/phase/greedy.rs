//! Randomized greedy construction.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use refassign_core::{GameId, RefereeId};
use refassign_scoring::{AssignmentView, ConstraintKind, ConstraintVector, ScoreDirector};
use tracing::debug;

use super::{log_phase_end, log_phase_start, Phase};
use crate::error::SolverError;
use crate::scope::{PhaseScope, SolverScope};

/// Builds an assignment by repeatedly adding the cheapest referee to each
/// game.
///
/// Rounds repeat until one makes no assignment. A round visits the games in
/// random order; each game below its maximum receives the referee whose
/// addition raises the weighted soft cost least, among those that break no
/// travel, availability, or level rule. A game that already has its
/// minimum takes a referee only if that does not raise the cost, and ties,
/// including the tie with adding nobody, are broken uniformly at random.
///
/// Games can end below their minimum when no eligible referee is left.
#[derive(Debug, Clone, Default)]
pub struct GreedyPhase;

impl GreedyPhase {
    pub fn new() -> Self {
        Self
    }
}

/// True if the change breaks a per-referee rule the greedy never relaxes.
pub(crate) fn breaks_referee_rules(delta: &ConstraintVector) -> bool {
    delta[ConstraintKind::FeasibleTravel] > 0
        || delta[ConstraintKind::Availability] > 0
        || delta[ConstraintKind::MinimumLevel] > 0
}

/// Picks the referee to add to `game`, or `None` to leave it as is.
///
/// Candidates tied on cost win with equal probability: the n-th tie
/// replaces the current pick with probability 1/n.
pub(crate) fn best_candidate(
    director: &ScoreDirector<'_>,
    game: GameId,
    rng: &mut StdRng,
) -> Option<RefereeId> {
    let instance = director.instance();
    let crew = director.assignment().referees_of(game);
    let division = instance.game_division(game);

    let mut pick = None;
    let mut ties = 1u32;
    let mut min_delta = if crew.len() < division.min_referees {
        i64::MAX
    } else {
        0
    };

    let mut candidate = crew.clone();
    for referee in instance.referee_ids() {
        if crew.contains(referee) {
            continue;
        }
        candidate.insert(referee);
        let hard = director.hard_delta_for(game, &candidate);
        let delta = if breaks_referee_rules(&hard) {
            None
        } else {
            Some(
                director
                    .delta_for(game, &candidate)
                    .weighted_cost(instance.weights()),
            )
        };
        candidate.remove(referee);

        let Some(delta) = delta else {
            continue;
        };
        if delta < min_delta {
            min_delta = delta;
            pick = Some(referee);
            ties = 1;
        } else if delta == min_delta {
            ties += 1;
            if rng.random_range(0..ties) == 0 {
                pick = Some(referee);
            }
        }
    }
    pick
}

impl Phase for GreedyPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<(), SolverError> {
        let mut phase_scope = PhaseScope::new(solver_scope);
        log_phase_start(&phase_scope, "Greedy");

        let mut games: Vec<GameId> = phase_scope.score_director().instance().game_ids().collect();
        let mut round = 0u64;
        'rounds: loop {
            round += 1;
            let mut assigned = 0usize;
            let (_, rng) = phase_scope.solver_scope_mut().director_and_rng_mut();
            games.shuffle(rng);

            for &game in &games {
                if phase_scope.should_terminate() {
                    break 'rounds;
                }
                let (director, rng) = phase_scope.solver_scope_mut().director_and_rng_mut();
                let size = director.assignment().referees_of(game).len();
                if size >= director.instance().game_division(game).max_referees {
                    continue;
                }
                if let Some(referee) = best_candidate(director, game, rng) {
                    director.assign(referee, game);
                    assigned += 1;
                    phase_scope.increment_step_count();
                    phase_scope.solver_scope().assert_step()?;
                }
            }

            debug!(event = "greedy_round", round = round, assigned = assigned);
            if assigned == 0 {
                break;
            }
        }

        phase_scope.update_best_solution();
        log_phase_end(&phase_scope, "Greedy");
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        "Greedy"
    }
}
