//! Simulated annealing acceptor.

use rand::rngs::StdRng;
use rand::Rng;
use refassign_core::{HardSoftScore, Score};
use refassign_config::SimulatedAnnealingConfig;

use super::Acceptor;
use crate::heuristic::Move;

/// Simulated annealing acceptor - accepts worsening moves with a
/// temperature-based probability.
///
/// Non-worsening moves are always taken. A move that worsens the score by
/// `d` (on the scalar scale, where one hard unit outweighs any soft cost)
/// is taken with probability `exp(-d / T)`.
///
/// The temperature drops by `cooling_rate` once `neighbors_sampled` moves
/// have been judged or `neighbors_accepted` taken at the current
/// temperature, whichever comes first. A draw that finds no feasible move
/// counts as a judged neighbor. The acceptor is exhausted when the
/// temperature falls below `min_temperature`.
///
/// # Example
///
/// ```
/// use refassign_solver::SimulatedAnnealingAcceptor;
/// use refassign_config::SimulatedAnnealingConfig;
///
/// let acceptor = SimulatedAnnealingAcceptor::new(&SimulatedAnnealingConfig::default());
/// assert_eq!(acceptor.temperature(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealingAcceptor {
    start_temperature: f64,
    min_temperature: f64,
    cooling_rate: f64,
    neighbors_sampled: u64,
    neighbors_accepted: u64,
    temperature: f64,
    sampled: u64,
    accepted: u64,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(config: &SimulatedAnnealingConfig) -> Self {
        Self {
            start_temperature: config.start_temperature,
            min_temperature: config.min_temperature,
            cooling_rate: config.cooling_rate,
            neighbors_sampled: config.neighbors_sampled,
            neighbors_accepted: config.neighbors_accepted,
            temperature: config.start_temperature,
            sampled: 0,
            accepted: 0,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn cool_if_due(&mut self) {
        if self.sampled >= self.neighbors_sampled || self.accepted >= self.neighbors_accepted {
            self.temperature *= self.cooling_rate;
            self.sampled = 0;
            self.accepted = 0;
        }
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::new(&SimulatedAnnealingConfig::default())
    }
}

impl<M: Move> Acceptor<M> for SimulatedAnnealingAcceptor {
    fn is_accepted(
        &mut self,
        last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        _mv: &M,
        rng: &mut StdRng,
    ) -> bool {
        self.sampled += 1;
        let accepted = if move_score >= last_step_score {
            true
        } else {
            let worsening = last_step_score.to_scalar() - move_score.to_scalar();
            rng.random::<f64>() < (-worsening / self.temperature).exp()
        };
        if !accepted {
            self.cool_if_due();
        }
        accepted
    }

    fn candidate_missed(&mut self) {
        self.sampled += 1;
        self.cool_if_due();
    }

    fn phase_started(&mut self, _initial_score: &HardSoftScore) {
        self.temperature = self.start_temperature;
        self.sampled = 0;
        self.accepted = 0;
    }

    fn step_ended(&mut self, _step_score: &HardSoftScore, _mv: &M, _rng: &mut StdRng) {
        self.accepted += 1;
        self.cool_if_due();
    }

    fn is_exhausted(&self) -> bool {
        self.temperature < self.min_temperature
    }
}
