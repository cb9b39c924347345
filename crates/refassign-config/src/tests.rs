//! Tests for solver configuration parsing.

use super::*;
use std::io::Write;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "full_assert"
        random_seed = 42
        average_speed_kmh = 60

        [weights]
        total_distance = 3
        optional_referee = 0

        [termination]
        seconds_spent_limit = 30
        unimproved_step_count_limit = 500

        [phase]
        type = "local_search"
        move_kind = "whole_game"
        initial_solution = "greedy"
        [phase.acceptor]
        type = "simulated_annealing"
        start_temperature = 20.0
        cooling_rate = 0.9
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.average_speed_kmh, Some(60));

    let weights = config.weights.unwrap();
    assert_eq!(weights.total_distance, 3);
    assert_eq!(weights.optional_referee, 0);
    assert_eq!(weights.lack_of_experience, 1);

    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    let termination = config.termination.as_ref().unwrap();
    assert_eq!(termination.unimproved_step_count_limit, Some(500));

    match &config.phase {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(ls.move_kind, MoveKind::WholeGame);
            assert_eq!(ls.initial_solution, InitialSolution::Greedy);
            match &ls.acceptor {
                AcceptorConfig::SimulatedAnnealing(sa) => {
                    assert_eq!(sa.start_temperature, 20.0);
                    assert_eq!(sa.cooling_rate, 0.9);
                    assert_eq!(sa.min_temperature, 1.0);
                    assert_eq!(sa.neighbors_sampled, 1000);
                }
                other => panic!("unexpected acceptor {:?}", other),
            }
        }
        other => panic!("unexpected phase {:?}", other),
    }
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
random_seed: 7
termination:
  step_count_limit: 1000
phase:
  type: backtracking
"#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.random_seed, Some(7));
    assert_eq!(config.phase, PhaseConfig::Backtracking);
    assert_eq!(config.termination.unwrap().step_count_limit, Some(1000));
}

#[test]
fn test_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Fast);
    assert_eq!(config.random_seed, None);
    assert_eq!(config.time_limit(), None);
    match config.phase {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(ls.move_kind, MoveKind::WholeGame);
            assert_eq!(ls.acceptor, AcceptorConfig::HillClimbing);
            assert_eq!(ls.initial_solution, InitialSolution::Random);
        }
        other => panic!("unexpected phase {:?}", other),
    }
}

#[test]
fn test_tabu_tenure_range() {
    let toml = r#"
        [phase]
        type = "local_search"
        [phase.acceptor]
        type = "tabu_search"
        min_tenure = 9
        max_tenure = 3
    "#;
    let err = SolverConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("min_tenure 9 exceeds max_tenure 3"));
}

#[test]
fn test_invalid_values() {
    let bad_weights = "[weights]\ntotal_distance = -1\n";
    assert!(matches!(
        SolverConfig::from_toml_str(bad_weights),
        Err(ConfigError::Invalid(_))
    ));

    let bad_speed = "average_speed_kmh = 0\n";
    assert!(matches!(
        SolverConfig::from_toml_str(bad_speed),
        Err(ConfigError::Invalid(_))
    ));

    let bad_cooling = r#"
        [phase]
        type = "local_search"
        [phase.acceptor]
        type = "simulated_annealing"
        cooling_rate = 1.5
    "#;
    assert!(matches!(
        SolverConfig::from_toml_str(bad_cooling),
        Err(ConfigError::Invalid(_))
    ));

    let unknown_phase = "[phase]\ntype = \"genetic\"\n";
    assert!(matches!(
        SolverConfig::from_toml_str(unknown_phase),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_environment_modes() {
    let config = SolverConfig::from_toml_str("environment_mode = \"fast\"\n").unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Fast);

    let unknown = "environment_mode = \"reproducible\"\n";
    assert!(matches!(
        SolverConfig::from_toml_str(unknown),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_time_limit_combines_units() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(500),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(2500)));
    assert!(!termination.is_unbounded());
    assert!(TerminationConfig::default().is_unbounded());
}

#[test]
fn test_builder_methods() {
    let config = SolverConfig::new()
        .with_termination_seconds(5)
        .with_random_seed(3)
        .with_weights(Weights::uniform(2))
        .with_average_speed(80)
        .with_phase(PhaseConfig::Greedy);

    assert_eq!(config.time_limit(), Some(Duration::from_secs(5)));
    assert_eq!(config.random_seed, Some(3));
    assert_eq!(config.phase, PhaseConfig::Greedy);

    let settings = config.problem_settings(ProblemSettings::default());
    assert_eq!(settings.weights, Weights::uniform(2));
    assert_eq!(settings.average_speed_kmh, 80);
}

#[test]
fn test_problem_settings_fall_back() {
    let base = ProblemSettings::new(Weights::uniform(4)).with_average_speed(70);
    let settings = SolverConfig::new().problem_settings(base);
    assert_eq!(settings, base);
}

#[test]
fn test_load_by_extension() {
    let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(toml_file, "random_seed = 11").unwrap();
    let config = SolverConfig::load(toml_file.path()).unwrap();
    assert_eq!(config.random_seed, Some(11));

    let mut yaml_file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    writeln!(yaml_file, "random_seed: 12").unwrap();
    let config = SolverConfig::load(yaml_file.path()).unwrap();
    assert_eq!(config.random_seed, Some(12));

    assert!(matches!(
        SolverConfig::load("/nonexistent/refassign.toml"),
        Err(ConfigError::Io(_))
    ));
}

#[test]
fn test_method_names() {
    for name in Method::NAMES {
        let method: Method = name.parse().unwrap();
        assert_eq!(method.to_string(), name);
    }
    assert!("single-slot-xx".parse::<Method>().is_err());
    assert!("annealing".parse::<Method>().is_err());
}

#[test]
fn test_method_keeps_matching_parameters() {
    let phase = PhaseConfig::LocalSearch(LocalSearchConfig {
        acceptor: AcceptorConfig::TabuSearch(TabuSearchConfig {
            min_tenure: 2,
            max_tenure: 4,
        }),
        ..Default::default()
    });

    let same: Method = "single-slot-ts".parse().unwrap();
    match same.apply_to(&phase) {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(ls.move_kind, MoveKind::SingleSlot);
            assert_eq!(
                ls.acceptor,
                AcceptorConfig::TabuSearch(TabuSearchConfig {
                    min_tenure: 2,
                    max_tenure: 4
                })
            );
        }
        other => panic!("unexpected phase {:?}", other),
    }

    let other: Method = "whole-game-sa".parse().unwrap();
    match other.apply_to(&phase) {
        PhaseConfig::LocalSearch(ls) => {
            assert_eq!(
                ls.acceptor,
                AcceptorConfig::SimulatedAnnealing(SimulatedAnnealingConfig::default())
            );
        }
        other => panic!("unexpected phase {:?}", other),
    }

    assert_eq!(Method::Greedy.apply_to(&phase), PhaseConfig::Greedy);
}
