//! Whole game reassignment.

use std::fmt;

use rand::rngs::StdRng;
use rand::Rng;
use refassign_core::{GameId, RefereeId};
use refassign_scoring::{AssignmentView, IdSet, ScoreDirector};
use smallvec::SmallVec;

use super::{Move, MoveGenerator, DEFAULT_RANDOM_MOVE_ATTEMPTS};
use crate::combination::CombinationSpace;

type Crew = SmallVec<[RefereeId; 4]>;

/// Replaces the crew of `game`, which must still be `old`, with `new`.
///
/// # Example
///
/// ```
/// use refassign_core::{GameId, RefereeId};
/// use refassign_scoring::IdSet;
/// use refassign_solver::{Move, WholeGameMove};
///
/// let old: IdSet<RefereeId> = [RefereeId::new(1), RefereeId::new(2)].into_iter().collect();
/// let new: IdSet<RefereeId> = [RefereeId::new(3)].into_iter().collect();
/// let m = WholeGameMove::new(GameId::new(4), &old, &new);
///
/// assert_eq!(m.to_string(), "4: {R1,R2} -> {R3}");
/// assert_eq!(m.inverse().to_string(), "4: {R3} -> {R1,R2}");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WholeGameMove {
    game: GameId,
    old: Crew,
    new: Crew,
}

impl WholeGameMove {
    pub fn new(game: GameId, old: &IdSet<RefereeId>, new: &IdSet<RefereeId>) -> Self {
        Self {
            game,
            old: old.iter().collect(),
            new: new.iter().collect(),
        }
    }

    pub fn old(&self) -> &[RefereeId] {
        &self.old
    }

    pub fn new_crew(&self) -> &[RefereeId] {
        &self.new
    }
}

impl Move for WholeGameMove {
    #[inline]
    fn game(&self) -> GameId {
        self.game
    }

    fn is_doable(&self, current: &IdSet<RefereeId>) -> bool {
        current.iter().eq(self.old.iter().copied())
    }

    fn target_crew(&self, _current: &IdSet<RefereeId>) -> IdSet<RefereeId> {
        self.new.iter().copied().collect()
    }

    fn inverse(&self) -> Self {
        Self {
            game: self.game,
            old: self.new.clone(),
            new: self.old.clone(),
        }
    }
}

fn write_crew(f: &mut fmt::Formatter<'_>, crew: &[RefereeId]) -> fmt::Result {
    f.write_str("{")?;
    for (i, r) in crew.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", r)?;
    }
    f.write_str("}")
}

impl fmt::Display for WholeGameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.game)?;
        write_crew(f, &self.old)?;
        f.write_str(" -> ")?;
        write_crew(f, &self.new)
    }
}

impl fmt::Debug for WholeGameMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WholeGameMove({})", self)
    }
}

/// Generates [`WholeGameMove`]s.
///
/// The neighborhood walks games in order and, within a game, every crew of
/// the division's allowed sizes in canonical combination order, skipping
/// the game's current crew.
#[derive(Debug, Clone)]
pub struct WholeGameGenerator {
    attempts: usize,
}

impl WholeGameGenerator {
    pub fn new(attempts: usize) -> Self {
        Self { attempts }
    }

    /// First candidate at or after game index `game_index`. With `after`
    /// set, scanning of that game resumes past the given crew.
    fn scan_from(
        &self,
        director: &ScoreDirector<'_>,
        mut game_index: usize,
        mut after: Option<IdSet<RefereeId>>,
    ) -> Option<WholeGameMove> {
        let instance = director.instance();
        while game_index < instance.num_games() {
            let game = GameId::from_index(game_index);
            game_index += 1;

            let space = CombinationSpace::for_game(instance, game);
            if space.is_empty() {
                after = None;
                continue;
            }
            let mut crew = match after.take() {
                Some(mut previous) => {
                    if !space.advance(&mut previous) {
                        continue;
                    }
                    previous
                }
                None => space.first(),
            };

            let current = director.assignment().referees_of(game);
            loop {
                if crew != *current {
                    return Some(WholeGameMove::new(game, current, &crew));
                }
                if !space.advance(&mut crew) {
                    break;
                }
            }
        }
        None
    }
}

impl Default for WholeGameGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_RANDOM_MOVE_ATTEMPTS)
    }
}

impl MoveGenerator for WholeGameGenerator {
    type Move = WholeGameMove;

    fn attempts(&self) -> usize {
        self.attempts
    }

    fn random_candidate(
        &self,
        director: &ScoreDirector<'_>,
        rng: &mut StdRng,
    ) -> Option<WholeGameMove> {
        let instance = director.instance();
        if instance.num_games() == 0 {
            return None;
        }
        let game = GameId::from_index(rng.random_range(0..instance.num_games()));
        let space = CombinationSpace::for_game(instance, game);
        if space.is_empty() {
            return None;
        }
        let size = rng.random_range(space.min()..=space.max());
        let crew: IdSet<RefereeId> =
            rand::seq::index::sample(rng, instance.num_referees(), size)
                .into_iter()
                .map(RefereeId::from_index)
                .collect();
        Some(WholeGameMove::new(
            game,
            director.assignment().referees_of(game),
            &crew,
        ))
    }

    fn first_candidate(&self, director: &ScoreDirector<'_>) -> Option<WholeGameMove> {
        self.scan_from(director, 0, None)
    }

    fn next_candidate(
        &self,
        director: &ScoreDirector<'_>,
        mv: &WholeGameMove,
    ) -> Option<WholeGameMove> {
        let previous: IdSet<RefereeId> = mv.new.iter().copied().collect();
        self.scan_from(director, mv.game.index(), Some(previous))
    }

    fn name(&self) -> &'static str {
        "WholeGame"
    }
}
