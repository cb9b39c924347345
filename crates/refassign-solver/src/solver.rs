//! Solver wiring a configuration into phases.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use refassign_config::{
    AcceptorConfig, EnvironmentMode, InitialSolution, LocalSearchConfig, MoveKind, PhaseConfig,
    SolverConfig,
};
use refassign_core::{HardSoftScore, Instance};
use refassign_scoring::{evaluate, Assignment, AssignmentView, ConstraintVector, ScoreDirector};
use tracing::{info, warn};

use crate::error::SolverError;
use crate::heuristic::{
    MoveGenerator, SingleSlotGenerator, WholeGameGenerator, DEFAULT_RANDOM_MOVE_ATTEMPTS,
};
use crate::phase::backtracking::BacktrackingPhase;
use crate::phase::enumeration::EnumerationPhase;
use crate::phase::greedy::GreedyPhase;
use crate::phase::localsearch::{
    Exploration, HillClimbingAcceptor, LocalSearchPhase, SimulatedAnnealingAcceptor,
    SteepestDescentAcceptor, TabuSearchAcceptor,
};
use crate::phase::random_state::RandomStatePhase;
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::{
    ExternalTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedStepCountTermination,
};

/// Unimproved step limit applied to local search that would otherwise
/// never stop.
pub const DEFAULT_UNIMPROVED_STEP_LIMIT: u64 = 10_000;

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// The best assignment found. For exhaustive methods that found no
    /// feasible assignment this is the empty assignment.
    pub assignment: Assignment,
    pub score: HardSoftScore,
    /// Per-constraint breakdown of `assignment`.
    pub totals: ConstraintVector,
    /// Whether `assignment` satisfies every hard constraint.
    pub found: bool,
    /// Steps over all phases; search nodes for exhaustive methods.
    pub steps: u64,
    pub elapsed: Duration,
}

/// Runs the search method a [`SolverConfig`] describes.
///
/// # Example
///
/// ```
/// use refassign_config::{PhaseConfig, SolverConfig};
/// use refassign_solver::Solver;
/// use refassign_core::Instance;
///
/// let instance = Instance::builder().build().unwrap();
/// let config = SolverConfig::new().with_phase(PhaseConfig::Backtracking);
///
/// let outcome = Solver::new(config).solve(&instance).unwrap();
/// assert!(outcome.found);
/// assert_eq!(outcome.steps, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
    initial: Option<Assignment>,
    terminate_flag: Option<Arc<AtomicBool>>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            initial: None,
            terminate_flag: None,
        }
    }

    /// Starts local search (or greedy construction) from `assignment`
    /// instead of the configured initial solution.
    pub fn with_initial_assignment(mut self, assignment: Assignment) -> Self {
        self.initial = Some(assignment);
        self
    }

    /// Stops the search once `flag` is set.
    pub fn with_terminate_early_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate_flag = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `instance`. The instance's own weights and travel speed are
    /// used as given.
    pub fn solve(&self, instance: &Instance) -> Result<SolveOutcome, SolverError> {
        info!(
            event = "solve_start",
            games = instance.num_games(),
            referees = instance.num_referees(),
            time_limit_secs = self.config.time_limit().map_or(0, |d| d.as_secs()),
        );

        let exhaustive = matches!(
            self.config.phase,
            PhaseConfig::Backtracking | PhaseConfig::Enumeration
        );
        let director = match &self.initial {
            Some(_) if exhaustive => {
                warn!("initial assignment ignored by exhaustive search");
                ScoreDirector::new(instance)
            }
            Some(initial) => {
                check_dimensions(instance, initial)?;
                ScoreDirector::with_assignment(instance, initial.clone())
            }
            None => ScoreDirector::new(instance),
        };

        let mut scope = match self.config.random_seed {
            Some(seed) => SolverScope::with_seed(director, seed),
            None => SolverScope::new(director),
        }
        .with_termination(Box::new(self.build_termination()))
        .with_full_assert(self.config.environment_mode == EnvironmentMode::FullAssert);
        scope.start_solving();

        for mut phase in self.build_phases() {
            phase.solve(&mut scope)?;
        }

        let steps = scope.total_step_count();
        let elapsed = scope.elapsed().unwrap_or_default();
        let assignment = if exhaustive {
            scope
                .take_best()
                .map(|(assignment, _)| assignment)
                .unwrap_or_else(|| Assignment::new(instance))
        } else {
            scope.take_best_or_working()
        };

        let totals = evaluate(instance, &assignment);
        let score = totals.score(instance.weights());
        let found = totals.violations() == 0;
        info!(
            event = "solve_end",
            score = %score,
            found = found,
            steps = steps,
            duration_ms = elapsed.as_millis() as u64,
        );

        Ok(SolveOutcome {
            assignment,
            score,
            totals,
            found,
            steps,
            elapsed,
        })
    }

    fn build_termination(&self) -> OrTermination<Vec<Box<dyn Termination>>> {
        let config = self.config.termination.clone().unwrap_or_default();
        let mut terminations: Vec<Box<dyn Termination>> = Vec::new();

        if let Some(limit) = config.time_limit() {
            terminations.push(Box::new(TimeTermination::new(limit)));
        }
        if let Some(limit) = config.step_count_limit {
            terminations.push(Box::new(StepCountTermination::new(limit)));
        }
        if let Some(limit) = config.unimproved_step_count_limit {
            terminations.push(Box::new(UnimprovedStepCountTermination::new(limit)));
        }
        if config.is_unbounded() && self.runs_forever() {
            warn!(
                limit = DEFAULT_UNIMPROVED_STEP_LIMIT,
                "no termination configured, stopping after unimproved steps"
            );
            terminations.push(Box::new(UnimprovedStepCountTermination::new(
                DEFAULT_UNIMPROVED_STEP_LIMIT,
            )));
        }
        if let Some(flag) = &self.terminate_flag {
            terminations.push(Box::new(ExternalTermination::new(Arc::clone(flag))));
        }

        OrTermination::new(terminations)
    }

    /// True for local search acceptors that never stop on their own.
    fn runs_forever(&self) -> bool {
        match &self.config.phase {
            PhaseConfig::LocalSearch(ls) => matches!(
                ls.acceptor,
                AcceptorConfig::HillClimbing | AcceptorConfig::TabuSearch(_)
            ),
            _ => false,
        }
    }

    fn build_phases(&self) -> Vec<Box<dyn Phase>> {
        match &self.config.phase {
            PhaseConfig::Backtracking => vec![Box::new(BacktrackingPhase::new())],
            PhaseConfig::Enumeration => vec![Box::new(EnumerationPhase::new())],
            PhaseConfig::Greedy => vec![Box::new(GreedyPhase::new())],
            PhaseConfig::LocalSearch(ls) => {
                let mut phases: Vec<Box<dyn Phase>> = Vec::with_capacity(2);
                if self.initial.is_none() {
                    match ls.initial_solution {
                        InitialSolution::Random => phases.push(Box::new(RandomStatePhase::new())),
                        InitialSolution::Greedy => phases.push(Box::new(GreedyPhase::new())),
                        InitialSolution::Empty => {}
                    }
                }
                phases.push(local_search(ls));
                phases
            }
        }
    }
}

fn check_dimensions(instance: &Instance, assignment: &Assignment) -> Result<(), SolverError> {
    if assignment.num_games() == instance.num_games()
        && assignment.num_referees() == instance.num_referees()
    {
        return Ok(());
    }
    Err(SolverError::InitialStateMismatch {
        games: instance.num_games(),
        referees: instance.num_referees(),
        actual_games: assignment.num_games(),
        actual_referees: assignment.num_referees(),
    })
}

fn local_search(config: &LocalSearchConfig) -> Box<dyn Phase> {
    let attempts = config
        .random_move_attempts
        .unwrap_or(DEFAULT_RANDOM_MOVE_ATTEMPTS);
    match config.move_kind {
        MoveKind::WholeGame => with_acceptor(WholeGameGenerator::new(attempts), &config.acceptor),
        MoveKind::SingleSlot => with_acceptor(SingleSlotGenerator::new(attempts), &config.acceptor),
    }
}

fn with_acceptor<G>(generator: G, acceptor: &AcceptorConfig) -> Box<dyn Phase>
where
    G: MoveGenerator + 'static,
    G::Move: 'static,
{
    match acceptor {
        AcceptorConfig::HillClimbing => Box::new(LocalSearchPhase::new(
            generator,
            HillClimbingAcceptor::new(),
            Exploration::RandomSample,
        )),
        AcceptorConfig::SteepestDescent => Box::new(LocalSearchPhase::new(
            generator,
            SteepestDescentAcceptor::new(),
            Exploration::FullScan,
        )),
        AcceptorConfig::SimulatedAnnealing(sa) => Box::new(LocalSearchPhase::new(
            generator,
            SimulatedAnnealingAcceptor::new(sa),
            Exploration::RandomSample,
        )),
        AcceptorConfig::TabuSearch(ts) => Box::new(LocalSearchPhase::new(
            generator,
            TabuSearchAcceptor::new(ts),
            Exploration::FullScan,
        )),
    }
}
