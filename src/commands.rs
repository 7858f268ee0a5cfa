use crate::board::{self, PLACEHOLDER};
use crate::charts::gauge;
use crate::model::{project_counts, Status, TaskStore, COLUMN_ORDER};
use crate::storage::{self, DataScope};
use crate::ui;
use anyhow::{bail, Context, Result};
use std::env;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub fn init() -> Result<()> {
    let cwd = env::current_dir()?;
    let location = storage::init_data_dir(&cwd)?;
    println!("Initialized dashboard data at {}", location.dir.display());
    Ok(())
}

pub fn summary() -> Result<()> {
    let location = storage::locate_from_cwd()?;
    let data = storage::load_dashboard(&location);
    let store = TaskStore::load(data.tasks);
    let counts = project_counts(&data.projects);
    let percents = gauge::percentages(counts);

    println!(
        "Data: {} ({})",
        location.dir.display(),
        match location.scope {
            DataScope::Project => "project",
            DataScope::Global => "global",
        }
    );
    println!(
        "Projects: {} total — {} completed, {} running, {} pending",
        counts.total, counts.completed, counts.running, counts.pending
    );
    println!(
        "Progress: {}% completed / {}% in progress / {}% pending",
        percents[0], percents[1], percents[2]
    );
    println!("Team members: {}", data.team.len());
    let task_counts = board::column_counts(&store);
    println!(
        "Tasks: {} total — {} to do, {} in progress, {} done, {} pending",
        store.len(),
        task_counts[0],
        task_counts[1],
        task_counts[2],
        task_counts[3]
    );
    Ok(())
}

pub fn list(status: Option<String>) -> Result<()> {
    let location = storage::locate_from_cwd()?;
    let data = storage::load_dashboard(&location);
    let store = TaskStore::load(data.tasks);
    let now = chrono::Utc::now().date_naive();
    let filter = status.as_deref().map(parse_status).transpose()?;

    for column in COLUMN_ORDER {
        if let Some(only) = filter {
            if column != only {
                continue;
            }
        }
        let view = board::column_view(&store, column, now);
        println!("{} ({})", column.label(), view.cards.len());
        if view.is_empty() {
            println!("  {}", PLACEHOLDER);
        }
        for card in view.cards {
            match card.badge {
                Some(badge) => println!("  - [{}] {} — {}", card.id, card.name, badge.text()),
                None => println!("  - [{}] {}", card.id, card.name),
            }
        }
        println!();
    }
    Ok(())
}

pub fn tui() -> Result<()> {
    let location = storage::locate_from_cwd()?;
    std::fs::create_dir_all(&location.dir)
        .with_context(|| format!("creating {:?}", location.dir))?;
    let log_file = File::create(location.log_file())
        .with_context(|| format!("opening log file {:?}", location.log_file()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let data = storage::load_dashboard(&location);
    ui::run(data, location)
}

fn parse_status(input: &str) -> Result<Status> {
    Ok(match input {
        "to_do" | "todo" => Status::ToDo,
        "in_progress" => Status::InProgress,
        "done" => Status::Done,
        "pending" => Status::Pending,
        other => bail!("unknown status: {} (use to_do, in_progress, done, pending)", other),
    })
}
