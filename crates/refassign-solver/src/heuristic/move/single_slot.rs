//! Single slot changes: add, remove, or swap one referee of a game.

use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;
use refassign_core::{GameId, RefereeId};
use refassign_scoring::{AssignmentView, IdSet, ScoreDirector};

use super::{Move, MoveGenerator, DEFAULT_RANDOM_MOVE_ATTEMPTS};

/// Removes `remove` from and adds `add` to the crew of `game`.
///
/// Either side may be absent, but not both. With both present the move is
/// a swap.
///
/// ```
/// use refassign_core::{GameId, RefereeId};
/// use refassign_solver::SingleSlotMove;
///
/// let shrink = SingleSlotMove::new(GameId::new(3), Some(RefereeId::new(1)), None);
/// assert_eq!(shrink.to_string(), "3: R1 -> 0");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SingleSlotMove {
    game: GameId,
    remove: Option<RefereeId>,
    add: Option<RefereeId>,
}

impl SingleSlotMove {
    pub fn new(game: GameId, remove: Option<RefereeId>, add: Option<RefereeId>) -> Self {
        Self { game, remove, add }
    }

    pub fn remove(&self) -> Option<RefereeId> {
        self.remove
    }

    pub fn add(&self) -> Option<RefereeId> {
        self.add
    }
}

impl Move for SingleSlotMove {
    #[inline]
    fn game(&self) -> GameId {
        self.game
    }

    fn is_doable(&self, current: &IdSet<RefereeId>) -> bool {
        match (self.remove, self.add) {
            (None, None) => false,
            (Some(r), Some(a)) if r == a => false,
            (remove, add) => {
                remove.map_or(true, |r| current.contains(r))
                    && add.map_or(true, |a| !current.contains(a))
            }
        }
    }

    fn target_crew(&self, current: &IdSet<RefereeId>) -> IdSet<RefereeId> {
        let mut crew = current.clone();
        if let Some(r) = self.remove {
            crew.remove(r);
        }
        if let Some(a) = self.add {
            crew.insert(a);
        }
        crew
    }

    fn inverse(&self) -> Self {
        Self {
            game: self.game,
            remove: self.add,
            add: self.remove,
        }
    }
}

struct Slot(Option<RefereeId>);

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(r) => write!(f, "{}", r),
            None => f.write_str("0"),
        }
    }
}

impl fmt::Display for SingleSlotMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.game, Slot(self.remove), Slot(self.add))
    }
}

impl fmt::Debug for SingleSlotMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SingleSlotMove({})", self)
    }
}

/// Generates [`SingleSlotMove`]s.
///
/// Per game the neighborhood lists the pure additions first, unless the
/// crew is already at the division maximum, then for each crew member in
/// ascending order its removal followed by its swaps with every referee
/// outside the crew.
#[derive(Debug, Clone)]
pub struct SingleSlotGenerator {
    attempts: usize,
}

impl SingleSlotGenerator {
    pub fn new(attempts: usize) -> Self {
        Self { attempts }
    }

    fn first_in_game(director: &ScoreDirector<'_>, game: GameId) -> Option<SingleSlotMove> {
        let crew = director.assignment().referees_of(game);
        let pool = director.instance().num_referees();
        if can_grow(director, game) {
            if let Some(add) = first_outside(crew, 1, pool) {
                return Some(SingleSlotMove::new(game, None, Some(add)));
            }
        }
        crew.first()
            .map(|remove| SingleSlotMove::new(game, Some(remove), None))
    }
}

impl Default for SingleSlotGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_MOVE_ATTEMPTS)
    }
}

fn can_grow(director: &ScoreDirector<'_>, game: GameId) -> bool {
    let max = director.instance().game_division(game).max_referees;
    director.assignment().referees_of(game).len() < max
}

/// Smallest referee code `>= from` not in `crew`.
fn first_outside(crew: &IdSet<RefereeId>, from: u32, pool: usize) -> Option<RefereeId> {
    (from..=pool as u32)
        .map(RefereeId::new)
        .find(|r| !crew.contains(*r))
}

impl MoveGenerator for SingleSlotGenerator {
    type Move = SingleSlotMove;

    fn attempts(&self) -> usize {
        self.attempts
    }

    fn random_candidate(
        &self,
        director: &ScoreDirector<'_>,
        rng: &mut StdRng,
    ) -> Option<SingleSlotMove> {
        let instance = director.instance();
        if instance.num_games() == 0 {
            return None;
        }
        let game = GameId::from_index(rng.random_range(0..instance.num_games()));
        let crew = director.assignment().referees_of(game);
        let outside = instance.num_referees() - crew.len();

        let remove = match rng.random_range(0..=crew.len()) {
            0 => None,
            k => crew.iter().nth(k - 1),
        };
        let add = match rng.random_range(0..=outside) {
            0 => None,
            k => instance
                .referee_ids()
                .filter(|r| !crew.contains(*r))
                .nth(k - 1),
        };
        if remove.is_none() && add.is_none() {
            return None;
        }
        Some(SingleSlotMove::new(game, remove, add))
    }

    fn first_candidate(&self, director: &ScoreDirector<'_>) -> Option<SingleSlotMove> {
        director
            .instance()
            .game_ids()
            .find_map(|g| Self::first_in_game(director, g))
    }

    fn next_candidate(
        &self,
        director: &ScoreDirector<'_>,
        mv: &SingleSlotMove,
    ) -> Option<SingleSlotMove> {
        let game = mv.game;
        let crew = director.assignment().referees_of(game);
        let pool = director.instance().num_referees();

        if mv.remove.is_some() || can_grow(director, game) {
            let from = mv.add.map_or(1, |a| a.get() + 1);
            if let Some(add) = first_outside(crew, from, pool) {
                return Some(SingleSlotMove::new(game, mv.remove, Some(add)));
            }
        }

        let next_remove = match mv.remove {
            None => crew.first(),
            Some(r) => crew.successor(r),
        };
        if let Some(remove) = next_remove {
            return Some(SingleSlotMove::new(game, Some(remove), None));
        }

        director
            .instance()
            .game_ids()
            .skip(game.get() as usize)
            .find_map(|g| Self::first_in_game(director, g))
    }

    fn name(&self) -> &'static str {
        "SingleSlot"
    }
}
