//! Colored console output for solver events.
//!
//! Provides a `tracing` layer that renders the structured events of
//! `refassign-solver` as one colored line each.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve and phase start/end)
//! - **DEBUG**: Progress once per second and every new best solution
//! - **TRACE**: Every local search step
//!
//! `RUST_LOG` overrides the level; without it [`init`] shows INFO. Only
//! events from `refassign_solver` are rendered.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Module whose events the console renders.
const SOLVER_TARGET: &str = "refassign_solver";

/// Installs the console layer as the global subscriber.
///
/// Safe to call multiple times; only the first call has effect.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Like [`init`], with `level` as the default when `RUST_LOG` is unset.
pub fn init_with_level(level: Level) {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(level).into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SolverConsoleLayer)
            .try_init();
    });
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(
        stdout,
        "{} {}",
        "RefAssign".bright_cyan().bold(),
        format!("v{VERSION} - referee assignment solver").bright_white()
    );
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct SolverConsoleLayer;

impl<S: Subscriber> Layer<S> for SolverConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with(SOLVER_TARGET) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    phase_index: Option<u64>,
    steps: Option<u64>,
    step: Option<u64>,
    speed: Option<u64>,
    score: Option<String>,
    mv: Option<String>,
    duration_ms: Option<u64>,
    games: Option<u64>,
    referees: Option<u64>,
    time_limit_secs: Option<u64>,
    round: Option<u64>,
    assigned: Option<u64>,
    found: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "steps" => self.steps = Some(value),
            "step" => self.step = Some(value),
            "speed" => self.speed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "games" => self.games = Some(value),
            "referees" => self.referees = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "round" => self.round = Some(value),
            "assigned" => self.assigned = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "found" {
            self.found = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "phase" => self.phase = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "mv" => self.mv = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "progress" => format_progress(v),
        "new_best" => format_new_best(v),
        "greedy_round" => format_greedy_round(v),
        "step" if level == Level::TRACE => format_step(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let games = v.games.unwrap_or(0);
    let referees = v.referees.unwrap_or(0);
    let time_limit = v.time_limit_secs.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} games │ {} referees",
        format_elapsed(),
        "▶".bright_green().bold(),
        games.to_formatted_string(&Locale::en).bright_yellow(),
        referees.to_formatted_string(&Locale::en).bright_yellow(),
    );

    if time_limit > 0 {
        output.push_str(&format!(
            " │ {}s limit",
            time_limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let found = v.found.unwrap_or(false);
    let steps = v.steps.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);

    let status = if found {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    format!(
        "{} {} Solving complete │ {} │ {} steps │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
        format_score(score),
        status
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");
    let duration = v.duration_ms.unwrap_or(0);

    format!(
        "{} {} {} ended │ {} │ {} steps │ {} steps/s │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
        speed.to_formatted_string(&Locale::en).bright_magenta().bold(),
        format_score(score)
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {:>10} steps │ {:>12}/s │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        steps.to_formatted_string(&Locale::en).white(),
        speed.to_formatted_string(&Locale::en).bright_magenta().bold(),
        format_score(score)
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let step = v.step.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} New best at step {} │ {}",
        format_elapsed(),
        "★".bright_yellow(),
        step.to_formatted_string(&Locale::en).white(),
        format_score(score)
    )
}

fn format_greedy_round(v: &EventVisitor) -> String {
    format!(
        "{} {} Round {} │ {} referees assigned",
        format_elapsed(),
        "·".bright_black(),
        v.round.unwrap_or(0),
        v.assigned.unwrap_or(0).to_formatted_string(&Locale::en)
    )
}

fn format_step(v: &EventVisitor) -> String {
    let step = v.step.unwrap_or(0);
    let mv = v.mv.as_deref().unwrap_or("?");
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Step {:>10} │ {} │ {}",
        format_elapsed(),
        "✓".bright_green(),
        step.to_formatted_string(&Locale::en).bright_black(),
        mv.bright_black(),
        format_score(score)
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Colors a `<hard>hard/<soft>soft` score: violations red, cost yellow.
fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/') else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");

    let hard_str = if hard.starts_with('-') {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    let soft_str = if soft.starts_with('-') {
        format!("{}soft", soft).yellow().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };

    format!("{}/{}", hard_str, soft_str)
}
