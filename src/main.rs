mod board;
mod charts;
mod cli;
mod commands;
mod deadline;
mod drag;
mod menu;
mod model;
mod storage;
mod tracker;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        // The TUI owns the terminal, so it logs to a file instead; logging
        // setup happens inside once the data directory is known.
        cli::Command::Tui => commands::tui(),
        other => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
            match other {
                cli::Command::Init => commands::init(),
                cli::Command::Summary => commands::summary(),
                cli::Command::List { status } => commands::list(status),
                cli::Command::Tui => unreachable!(),
            }
        }
    }
}
