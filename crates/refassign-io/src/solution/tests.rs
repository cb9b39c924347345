use std::io::Write as _;

use refassign_core::{GameId, RefAssignError, RefereeId, Weights};
use refassign_scoring::{Assignment, AssignmentView};
use refassign_test::{
    random_crews, random_instance, same_day_pair, single_game, small_league, RandomInstanceConfig,
};

use super::*;

fn r(code: u32) -> RefereeId {
    RefereeId::new(code)
}

fn g(code: u32) -> GameId {
    GameId::new(code)
}

fn error_text(result: Result<Assignment>) -> String {
    match result {
        Err(RefAssignError::Parse { line, message }) => format!("{line}: {message}"),
        Err(other) => panic!("expected a parse error, got {other}"),
        Ok(a) => panic!("expected a parse error, got {a:?}"),
    }
}

#[test]
fn test_format_pair() {
    let instance = same_day_pair();
    let mut assignment = Assignment::new(&instance);
    assignment.assign(r(1), g(1));
    assignment.assign(r(2), g(2));
    assert_eq!(format_solution(&instance, &assignment), "T1 T2 1 R1\nT3 T4 1 R2\n");
}

#[test]
fn test_columns_are_right_aligned() {
    let instance = single_game(1, 3, 12);
    let mut assignment = Assignment::new(&instance);
    assert_eq!(format_solution(&instance, &assignment), "T1 T2 0\n");

    assignment.assign(r(3), g(1));
    assignment.assign(r(11), g(1));
    assert_eq!(format_solution(&instance, &assignment), "T1 T2 2  R3 R11\n");
}

#[test]
fn test_read_pair() {
    let instance = same_day_pair();
    let assignment = read_solution(&instance, "T3 T4 1 R2\n\nT1 T2 1 R1\n").unwrap();
    assert_eq!(assignment.referees_of(g(1)).iter().collect::<Vec<_>>(), vec![r(1)]);
    assert_eq!(assignment.referees_of(g(2)).iter().collect::<Vec<_>>(), vec![r(2)]);
    assert!(assignment.check_consistency().is_ok());
}

#[test]
fn test_repeated_pairs_fill_in_game_order() {
    let instance = small_league(Weights::UNIT);
    let text = "\
T1 T2 2 R2 R5
T3 T4 1 R1
T2 T1 2 R3 R4
T4 T3 1 R1
T1 T2 3 R2 R4 R5
T3 T4 0
";
    let assignment = read_solution(&instance, text).unwrap();
    assert_eq!(assignment.referees_of(g(1)).len(), 2);
    assert_eq!(assignment.referees_of(g(5)).len(), 3);
    assert!(assignment.is_assigned(r(4), g(5)));
    assert!(!assignment.is_assigned(r(4), g(1)));
    assert_eq!(format_solution(&instance, &assignment), text);
}

#[test]
fn test_random_round_trip() {
    let config = RandomInstanceConfig::default();
    for seed in 0..10 {
        let instance = random_instance(seed, &config);
        let mut assignment = Assignment::new(&instance);
        for (game, crew) in instance.game_ids().zip(random_crews(&instance, seed)) {
            for referee in crew {
                assignment.assign(referee, game);
            }
        }
        let read = read_solution(&instance, &format_solution(&instance, &assignment)).unwrap();
        assert_eq!(read, assignment, "seed {seed}");
    }
}

#[test]
fn test_unknown_pair() {
    let instance = same_day_pair();
    let err = error_text(read_solution(&instance, "T2 T1 1 R1\n"));
    assert_eq!(err, "1: no game T2 T1 in the instance");
}

#[test]
fn test_pair_listed_too_often() {
    let instance = same_day_pair();
    let err = error_text(read_solution(&instance, "T1 T2 1 R1\nT1 T2 1 R2\n"));
    assert_eq!(err, "2: T1 T2 listed more often than it is played");
}

#[test]
fn test_unknown_referee() {
    let instance = same_day_pair();
    let err = error_text(read_solution(&instance, "T1 T2 1 R3\nT3 T4 1 R2\n"));
    assert_eq!(err, "1: unknown referee R3");
    let err = error_text(read_solution(&instance, "T1 T2 1 R0\nT3 T4 1 R2\n"));
    assert_eq!(err, "1: unknown referee R0");
}

#[test]
fn test_referee_listed_twice() {
    let instance = same_day_pair();
    let err = error_text(read_solution(&instance, "T1 T2 2 R1 R1\nT3 T4 1 R2\n"));
    assert_eq!(err, "1: R1 listed twice for T1 T2");
}

#[test]
fn test_count_mismatch() {
    let instance = same_day_pair();
    let err = error_text(read_solution(&instance, "T1 T2 1 R1\nT3 T4 2 R2\n"));
    assert_eq!(err, "2: T3 T4 declares 2 referees but lists 1");
    let err = error_text(read_solution(&instance, "T1 T2 1 R1 R2\nT3 T4 1 R2\n"));
    assert_eq!(err, "1: T1 T2 declares 1 referees but lists more");
}

#[test]
fn test_missing_games() {
    let instance = same_day_pair();
    let err = error_text(read_solution(&instance, "T1 T2 1 R1\n"));
    assert_eq!(err, "2: solution covers 1 of the 2 games");
}

#[test]
fn test_file_round_trip() {
    let instance = same_day_pair();
    let mut assignment = Assignment::new(&instance);
    assignment.assign(r(1), g(1));
    assignment.assign(r(2), g(2));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_solution(&mut file, &instance, &assignment).unwrap();
    file.flush().unwrap();
    assert_eq!(read_solution_file(&instance, file.path()).unwrap(), assignment);
}
