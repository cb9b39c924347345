//! Pairwise schedule relations between consecutive games of one referee.

use refassign_core::{GameId, Instance, Referee, TimeWindow};

/// Returns true if a referee cannot officiate `next` after `prev`.
///
/// `prev` must start no later than `next`. The matches conflict when they
/// overlap, or when the trip between them does not fit: on the same day the
/// referee drives arena to arena, otherwise they go home in between.
pub fn games_conflict(instance: &Instance, referee: &Referee, prev: GameId, next: GameId) -> bool {
    let prev_game = instance.game(prev);
    let next_game = instance.game(next);
    if prev_game.window.overlaps(&next_game.window) {
        return true;
    }

    let from = instance.game_location(prev);
    let to = instance.game_location(next);
    let minutes = if prev_game.window.same_start_day(&next_game.window) {
        instance.travel_time(&from, &to)
    } else {
        instance.travel_time(&from, &referee.home) + instance.travel_time(&referee.home, &to)
    };

    let trip = TimeWindow::starting_at(prev_game.window.end(), minutes);
    trip.overlaps(&next_game.window)
}

/// Kilometres driven between two schedule positions.
///
/// `None` stands for the referee's home at the start or end of the schedule,
/// so a whole schedule costs the sum of legs over `None, g1, .., gk, None`
/// and an empty schedule is the single leg `(None, None)` of length zero.
pub fn leg_distance(
    instance: &Instance,
    referee: &Referee,
    from: Option<GameId>,
    to: Option<GameId>,
) -> i64 {
    match (from, to) {
        (None, None) => 0,
        (None, Some(to)) => referee.home.distance_to(&instance.game_location(to)),
        (Some(from), None) => instance.game_location(from).distance_to(&referee.home),
        (Some(from), Some(to)) => {
            let a = instance.game_location(from);
            let b = instance.game_location(to);
            if instance.game(from).window.same_start_day(&instance.game(to).window) {
                a.distance_to(&b)
            } else {
                a.distance_to(&referee.home) + referee.home.distance_to(&b)
            }
        }
    }
}
