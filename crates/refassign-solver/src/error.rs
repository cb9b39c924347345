//! Solver error types.

use refassign_scoring::ConsistencyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    /// Incremental bookkeeping disagreed with a full evaluation while
    /// running with `full_assert`.
    #[error("score corruption after step {step}: {source}")]
    ScoreCorruption {
        step: u64,
        #[source]
        source: ConsistencyError,
    },

    #[error(
        "initial assignment covers {actual_games} games and {actual_referees} referees, \
         but the instance has {games} and {referees}"
    )]
    InitialStateMismatch {
        games: usize,
        referees: usize,
        actual_games: usize,
        actual_referees: usize,
    },
}
