//! Score director maintaining constraint totals incrementally.

use refassign_core::{GameId, HardSoftScore, Instance, RefereeId};
use tracing::{debug, trace};

use crate::assignment::{Assignment, AssignmentView, ConsistencyError};
use crate::constraint::{ConstraintKind, ConstraintVector};
use crate::delta::{self, GameChange};
use crate::evaluate::evaluate;
use crate::set::IdSet;

/// Owns the working assignment and its per-constraint totals.
///
/// Every mutation goes through the delta engine, so `score()` is O(1) and
/// never needs a full re-evaluation. `recalculate` and `assert_totals`
/// exist for initialization and for verifying the incremental bookkeeping.
///
/// # Example
///
/// ```
/// use refassign_scoring::{IdSet, ScoreDirector};
/// use refassign_core::{
///     Arena, ArenaId, Division, DivisionId, Game, Instance, Location, Referee, RefereeId,
///     Team, TeamId, TimeWindow,
/// };
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let instance = Instance::builder()
///     .division(Division::new(DivisionId::new(1), 1, 1, 1, 2))
///     .team(Team::new(TeamId::new(1), DivisionId::new(1)))
///     .team(Team::new(TeamId::new(2), DivisionId::new(1)))
///     .arena(Arena::new(ArenaId::new(1), Location::new(0.0, 0.0)))
///     .referee(Referee::new(RefereeId::new(1), 1, Location::new(0.0, 0.0), 1))
///     .game(Game::new(
///         TeamId::new(1),
///         TeamId::new(2),
///         DivisionId::new(1),
///         TimeWindow::default_match(start),
///         ArenaId::new(1),
///         0,
///     ))
///     .build()
///     .unwrap();
///
/// let mut director = ScoreDirector::new(&instance);
/// assert_eq!(director.violations(), 1);
///
/// let game = instance.game_ids().next().unwrap();
/// let crew: IdSet<RefereeId> = [RefereeId::new(1)].into_iter().collect();
/// director.replace_referees(game, &crew);
/// assert!(director.is_feasible());
/// ```
#[derive(Clone)]
pub struct ScoreDirector<'a> {
    instance: &'a Instance,
    assignment: Assignment,
    totals: ConstraintVector,
}

impl<'a> ScoreDirector<'a> {
    /// Creates a director over the empty assignment.
    pub fn new(instance: &'a Instance) -> Self {
        Self::with_assignment(instance, Assignment::new(instance))
    }

    /// Creates a director over an existing assignment, evaluating it in full.
    pub fn with_assignment(instance: &'a Instance, assignment: Assignment) -> Self {
        debug_assert_eq!(assignment.num_games(), instance.num_games());
        debug_assert_eq!(assignment.num_referees(), instance.num_referees());
        let totals = evaluate(instance, &assignment);
        Self {
            instance,
            assignment,
            totals,
        }
    }

    #[inline]
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    #[inline]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Raw per-constraint totals of the working assignment.
    #[inline]
    pub fn totals(&self) -> &ConstraintVector {
        &self.totals
    }

    #[inline]
    pub fn violations(&self) -> i64 {
        self.totals.violations()
    }

    #[inline]
    pub fn cost(&self) -> i64 {
        self.totals.weighted_cost(self.instance.weights())
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.violations() == 0
    }

    #[inline]
    pub fn score(&self) -> HardSoftScore {
        self.totals.score(self.instance.weights())
    }

    /// Score the working assignment would have after applying `delta`.
    #[inline]
    pub fn score_with(&self, delta: &ConstraintVector) -> HardSoftScore {
        (self.totals + *delta).score(self.instance.weights())
    }

    /// Change of all totals if the crew of `game` became `crew`.
    pub fn delta_for(&self, game: GameId, crew: &IdSet<RefereeId>) -> ConstraintVector {
        let change = GameChange::new(game, self.assignment.referees_of(game), crew);
        delta::delta(self.instance, &self.assignment, &change)
    }

    /// Change of the hard totals only if the crew of `game` became `crew`.
    pub fn hard_delta_for(&self, game: GameId, crew: &IdSet<RefereeId>) -> ConstraintVector {
        let change = GameChange::new(game, self.assignment.referees_of(game), crew);
        delta::hard_delta(self.instance, &self.assignment, &change)
    }

    /// Change of one constraint if the crew of `game` became `crew`.
    pub fn constraint_delta_for(
        &self,
        kind: ConstraintKind,
        game: GameId,
        crew: &IdSet<RefereeId>,
    ) -> i64 {
        let change = GameChange::new(game, self.assignment.referees_of(game), crew);
        delta::constraint_delta(kind, self.instance, &self.assignment, &change)
    }

    /// Replaces the crew of `game` and returns the applied change.
    pub fn replace_referees(&mut self, game: GameId, crew: &IdSet<RefereeId>) -> ConstraintVector {
        let change = self.delta_for(game, crew);
        self.apply(game, crew, change);
        change
    }

    /// Replaces the crew of `game` with a change the caller already computed
    /// against the current assignment.
    pub fn apply(&mut self, game: GameId, crew: &IdSet<RefereeId>, change: ConstraintVector) {
        trace!(game = %game, crew = %crew, "replace crew");
        self.assignment.replace_referees(game, crew);
        self.totals += change;
    }

    /// Adds `referee` to the crew of `game`. Returns the applied change.
    pub fn assign(&mut self, referee: RefereeId, game: GameId) -> ConstraintVector {
        if self.assignment.is_assigned(referee, game) {
            return ConstraintVector::ZERO;
        }
        let mut crew = self.assignment.referees_of(game).clone();
        crew.insert(referee);
        self.replace_referees(game, &crew)
    }

    /// Removes `referee` from the crew of `game`. Returns the applied change.
    pub fn unassign(&mut self, referee: RefereeId, game: GameId) -> ConstraintVector {
        if !self.assignment.is_assigned(referee, game) {
            return ConstraintVector::ZERO;
        }
        let mut crew = self.assignment.referees_of(game).clone();
        crew.remove(referee);
        self.replace_referees(game, &crew)
    }

    /// Clears every crew and resets the totals to those of the empty assignment.
    pub fn clear(&mut self) {
        self.assignment.reset();
        self.recalculate();
    }

    /// Swaps in a different assignment and evaluates it in full.
    pub fn set_assignment(&mut self, assignment: Assignment) {
        self.assignment = assignment;
        self.recalculate();
    }

    /// Recomputes the totals from scratch.
    pub fn recalculate(&mut self) {
        self.totals = evaluate(self.instance, &self.assignment);
        debug!(
            violations = self.totals.violations(),
            cost = self.cost(),
            "recalculated totals"
        );
    }

    /// Checks the incrementally maintained totals and the assignment's
    /// bidirectional bookkeeping against a full evaluation.
    pub fn assert_totals(&self) -> Result<(), ConsistencyError> {
        self.assignment.check_consistency()?;
        let expected = evaluate(self.instance, &self.assignment);
        if expected == self.totals {
            return Ok(());
        }
        let details = ConstraintKind::ALL
            .iter()
            .filter(|&&k| expected[k] != self.totals[k])
            .map(|&k| format!("{} is {} but expected {}", k, self.totals[k], expected[k]))
            .collect::<Vec<_>>()
            .join(", ");
        Err(ConsistencyError::ScoreDrift { details })
    }
}

impl std::fmt::Debug for ScoreDirector<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreDirector")
            .field("score", &self.score())
            .field("totals", &self.totals)
            .finish()
    }
}
