//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use refassign_config::Method;
use refassign_core::Weights;

#[derive(Debug, Parser)]
#[command(name = "refassign", version, about = "Referee assignment solver")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search for an assignment and print it
    Solve(SolveArgs),
    /// Score an existing solution file
    Check(CheckArgs),
    /// Re-emit an instance in normalized form
    Print(PrintArgs),
}

/// Where the instance comes from and how it is weighted.
#[derive(Debug, Args)]
pub struct InstanceArgs {
    /// Instance file
    #[arg(short, long)]
    pub instance: PathBuf,

    /// Soft constraint weights: loe,gd,td,o,af,ri,ti
    #[arg(long, value_parser = parse_weights)]
    pub weights: Option<Weights>,

    /// Average travel speed in km/h
    #[arg(long)]
    pub speed: Option<i64>,
}

#[derive(Debug, Args)]
pub struct SolveArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,

    /// Solver configuration file (TOML or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Search method, e.g. backtracking, greedy or whole-game-sa
    #[arg(short, long, value_parser = parse_method)]
    pub method: Option<Method>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Solution file to start local search from
    #[arg(long)]
    pub init_state: Option<PathBuf>,

    /// Where to write the solution file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after this many seconds
    #[arg(short, long)]
    pub time_limit: Option<u64>,

    /// No progress output while solving
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub instance: InstanceArgs,

    /// Solution file to score
    #[arg(short, long)]
    pub solution: PathBuf,
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Instance file
    #[arg(short, long)]
    pub instance: PathBuf,
}

fn parse_weights(s: &str) -> Result<Weights, String> {
    let values = s
        .split(',')
        .map(|w| {
            w.trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not an integer weight", w.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let values: [i64; 7] = values
        .try_into()
        .map_err(|v: Vec<i64>| format!("expected 7 weights, got {}", v.len()))?;
    let weights = Weights::from_array(values);
    if !weights.is_valid() {
        return Err("weights must be non-negative".to_string());
    }
    Ok(weights)
}

fn parse_method(s: &str) -> Result<Method, String> {
    s.parse()
        .map_err(|_| format!("expected one of: {}", Method::NAMES.join(", ")))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use refassign_config::{AcceptorKind, MoveKind};

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_weights() {
        assert_eq!(
            parse_weights("1,2,3,4,5,6,7").unwrap(),
            Weights::from_array([1, 2, 3, 4, 5, 6, 7])
        );
        assert!(parse_weights("1,2,3").unwrap_err().contains("expected 7"));
        assert!(parse_weights("1,2,x,4,5,6,7").unwrap_err().contains("'x'"));
        assert!(parse_weights("1,2,3,4,5,6,-7").is_err());
    }

    #[test]
    fn test_solve_arguments() {
        let cli = Cli::try_parse_from([
            "refassign",
            "solve",
            "--instance",
            "league.txt",
            "--method",
            "single-slot-ts",
            "--seed",
            "42",
            "--weights",
            "1,1,2,1,1,5,5",
            "--time-limit",
            "10",
            "--quiet",
        ])
        .unwrap();
        let Command::Solve(args) = cli.command else {
            panic!("expected solve");
        };
        assert_eq!(args.instance.instance, PathBuf::from("league.txt"));
        assert_eq!(
            args.method,
            Some(Method::LocalSearch(MoveKind::SingleSlot, AcceptorKind::TabuSearch))
        );
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.instance.weights.map(|w| w.total_distance), Some(2));
        assert_eq!(args.time_limit, Some(10));
        assert!(args.quiet);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = Cli::try_parse_from(["refassign", "solve", "-i", "x", "-m", "tabu"]).unwrap_err();
        assert!(err.to_string().contains("whole-game-hc"));
    }

    #[test]
    fn test_check_requires_solution() {
        assert!(Cli::try_parse_from(["refassign", "check", "-i", "x"]).is_err());
        assert!(Cli::try_parse_from(["refassign", "check", "-i", "x", "-s", "y"]).is_ok());
    }
}
