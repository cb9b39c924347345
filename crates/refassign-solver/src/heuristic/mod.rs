//! Local search moves and their generators.

pub mod r#move;

pub use r#move::{
    Move, MoveGenerator, SingleSlotGenerator, SingleSlotMove, WholeGameGenerator, WholeGameMove,
    DEFAULT_RANDOM_MOVE_ATTEMPTS,
};
