//! `refassign`: solve, check and print referee assignment instances.

mod cli;
mod commands;
mod error;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;

use cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let stdout = io::stdout();
    let result = match cli.command {
        Command::Solve(args) => commands::solve(&args, stdout.lock()),
        Command::Check(args) => commands::check(&args, stdout.lock()),
        Command::Print(args) => commands::print(&args, stdout.lock()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
