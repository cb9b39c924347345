//! The three subcommands. Each writes its report to `out`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use owo_colors::OwoColorize;
use refassign_config::SolverConfig;
use refassign_core::{Instance, ProblemSettings};
use refassign_io::{format_solution, read_solution_file, write_instance, write_solution, InstanceReader};
use refassign_scoring::{evaluate, violation_report, ConstraintKind, ConstraintVector};
use refassign_solver::Solver;

use crate::cli::{CheckArgs, InstanceArgs, PrintArgs, SolveArgs};
use crate::error::CliError;

type Result<T> = std::result::Result<T, CliError>;

pub fn solve<W: Write>(args: &SolveArgs, mut out: W) -> Result<()> {
    let config = solver_config(args)?;
    let instance = load_instance(&args.instance, &config)?;

    let mut solver = Solver::new(config);
    if let Some(path) = &args.init_state {
        solver = solver.with_initial_assignment(read_solution_file(&instance, path)?);
    }

    if !args.quiet {
        refassign_console::init();
    }

    let start = Instant::now();
    let outcome = solver.solve(&instance)?;
    let elapsed = start.elapsed();

    let io_err = |e| CliError::io("cannot write report", e);
    if !outcome.found {
        writeln!(out, "{}", "No feasible assignment found".bright_red().bold()).map_err(io_err)?;
    }
    write!(out, "{}", format_solution(&instance, &outcome.assignment)).map_err(io_err)?;
    writeln!(out).map_err(io_err)?;
    write_totals(&mut out, &instance, &outcome.totals).map_err(io_err)?;
    writeln!(out, "Elapsed time: {:.3} s", elapsed.as_secs_f64()).map_err(io_err)?;

    if let Some(path) = &args.output {
        let mut writer = BufWriter::new(create(path)?);
        write_solution(&mut writer, &instance, &outcome.assignment)
            .and_then(|()| writer.flush())
            .map_err(|e| CliError::io(format!("cannot write {}", path.display()), e))?;
    }
    Ok(())
}

pub fn check<W: Write>(args: &CheckArgs, mut out: W) -> Result<()> {
    let instance = load_instance(&args.instance, &SolverConfig::default())?;
    let assignment = read_solution_file(&instance, &args.solution)?;
    let totals = evaluate(&instance, &assignment);

    let io_err = |e| CliError::io("cannot write report", e);
    for violation in violation_report(&instance, &assignment) {
        if violation.kind.is_hard() {
            writeln!(out, "{}", violation.bright_red()).map_err(io_err)?;
        } else {
            writeln!(out, "{}", violation).map_err(io_err)?;
        }
    }
    writeln!(out).map_err(io_err)?;

    writeln!(out, "{:<24} {:>8} {:>10}", "constraint", "value", "weighted").map_err(io_err)?;
    for kind in ConstraintKind::ALL {
        let value = totals.get(kind);
        writeln!(
            out,
            "{:<24} {:>8} {:>10}",
            kind.name(),
            value,
            value * kind.weight(instance.weights())
        )
        .map_err(io_err)?;
    }
    writeln!(out).map_err(io_err)?;
    write_totals(&mut out, &instance, &totals).map_err(io_err)
}

pub fn print<W: Write>(args: &PrintArgs, out: W) -> Result<()> {
    let instance = InstanceReader::new().read_path(&args.instance)?;
    write_instance(out, &instance).map_err(|e| CliError::io("cannot write instance", e))
}

/// The configuration file, if any, with command line flags applied on top.
fn solver_config(args: &SolveArgs) -> Result<SolverConfig> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)?,
        None => SolverConfig::new(),
    };
    if let Some(method) = args.method {
        config.phase = method.apply_to(&config.phase);
    }
    if let Some(seed) = args.seed {
        config = config.with_random_seed(seed);
    }
    if let Some(weights) = args.instance.weights {
        config = config.with_weights(weights);
    }
    if let Some(speed) = args.instance.speed {
        config = config.with_average_speed(speed);
    }
    if let Some(seconds) = args.time_limit {
        config = config.with_termination_seconds(seconds);
    }
    config.validate()?;
    Ok(config)
}

fn load_instance(args: &InstanceArgs, config: &SolverConfig) -> Result<Instance> {
    let mut settings = config.problem_settings(ProblemSettings::default());
    if let Some(weights) = args.weights {
        settings.weights = weights;
    }
    if let Some(speed) = args.speed {
        settings.average_speed_kmh = speed;
    }
    Ok(InstanceReader::new().settings(settings).read_path(&args.instance)?)
}

fn write_totals<W: Write>(
    out: &mut W,
    instance: &Instance,
    totals: &ConstraintVector,
) -> std::io::Result<()> {
    writeln!(out, "Number of violations: {}", totals.violations())?;
    writeln!(out, "Cost: {}", totals.weighted_cost(instance.weights()))
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| CliError::io(format!("cannot create {}", path.display()), e))
}
