//! Tabu search acceptor.

use std::collections::VecDeque;
use std::fmt::Debug;

use rand::rngs::StdRng;
use rand::Rng;
use refassign_core::HardSoftScore;
use refassign_config::TabuSearchConfig;

use super::Acceptor;
use crate::heuristic::Move;

/// Tabu search acceptor - forbids undoing recent steps.
///
/// After each step the inverse of the move taken becomes tabu for a tenure
/// drawn uniformly from `min_tenure..=max_tenure` steps. Tabu moves are
/// rejected unless they would reach a score better than the best seen
/// during the phase (aspiration). Every other move is accepted, worsening
/// or not; the phase picks the best of them.
pub struct TabuSearchAcceptor<M> {
    min_tenure: u64,
    max_tenure: u64,
    /// Inverse moves with the step at which they stop being tabu.
    tabu_list: VecDeque<(M, u64)>,
    step: u64,
    best_score: Option<HardSoftScore>,
}

impl<M> Debug for TabuSearchAcceptor<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabuSearchAcceptor")
            .field("min_tenure", &self.min_tenure)
            .field("max_tenure", &self.max_tenure)
            .field("tabu_list_len", &self.tabu_list.len())
            .field("step", &self.step)
            .finish()
    }
}

impl<M: Clone> Clone for TabuSearchAcceptor<M> {
    fn clone(&self) -> Self {
        Self {
            min_tenure: self.min_tenure,
            max_tenure: self.max_tenure,
            tabu_list: self.tabu_list.clone(),
            step: self.step,
            best_score: self.best_score,
        }
    }
}

impl<M: Move> TabuSearchAcceptor<M> {
    pub fn new(config: &TabuSearchConfig) -> Self {
        Self {
            min_tenure: config.min_tenure as u64,
            max_tenure: config.max_tenure.max(config.min_tenure) as u64,
            tabu_list: VecDeque::new(),
            step: 0,
            best_score: None,
        }
    }

    /// Returns true if `mv` is currently forbidden.
    pub fn is_tabu(&self, mv: &M) -> bool {
        self.tabu_list.iter().any(|(tabu, _)| tabu == mv)
    }

    pub fn tabu_count(&self) -> usize {
        self.tabu_list.len()
    }

    fn expire(&mut self) {
        let step = self.step;
        self.tabu_list.retain(|(_, until)| *until > step);
    }
}

impl<M: Move> Default for TabuSearchAcceptor<M> {
    fn default() -> Self {
        Self::new(&TabuSearchConfig::default())
    }
}

impl<M: Move> Acceptor<M> for TabuSearchAcceptor<M> {
    fn is_accepted(
        &mut self,
        _last_step_score: &HardSoftScore,
        move_score: &HardSoftScore,
        mv: &M,
        _rng: &mut StdRng,
    ) -> bool {
        if !self.is_tabu(mv) {
            return true;
        }
        self.best_score.is_some_and(|best| *move_score > best)
    }

    fn phase_started(&mut self, initial_score: &HardSoftScore) {
        self.tabu_list.clear();
        self.step = 0;
        self.best_score = Some(*initial_score);
    }

    fn phase_ended(&mut self) {
        self.tabu_list.clear();
    }

    fn step_ended(&mut self, step_score: &HardSoftScore, mv: &M, rng: &mut StdRng) {
        self.step += 1;
        self.expire();
        let tenure = rng.random_range(self.min_tenure..=self.max_tenure);
        self.tabu_list.push_back((mv.inverse(), self.step + tenure));

        if self.best_score.map_or(true, |best| *step_score > best) {
            self.best_score = Some(*step_score);
        }
    }
}
