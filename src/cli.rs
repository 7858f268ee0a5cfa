use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pulseboard",
    version,
    about = "Terminal project-management dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a data directory with sample dashboard data
    Init,
    /// Print aggregate project and task statistics
    Summary,
    /// Print the task board as text
    List {
        /// Filter by column status (to_do, in_progress, done, pending)
        #[arg(long)]
        status: Option<String>,
    },
    /// Launch the interactive dashboard
    Tui,
}
