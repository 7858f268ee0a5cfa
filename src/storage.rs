use crate::model::{Project, ProjectStatus, Status, TaskRecord, TeamMember};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const PROJECTS_FILE: &str = "projects.json";
pub const TEAM_FILE: &str = "team.json";
pub const TASKS_FILE: &str = "tasks.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataScope {
    Project,
    Global,
}

#[derive(Debug, Clone)]
pub struct DataLocation {
    pub dir: PathBuf,
    pub scope: DataScope,
}

impl DataLocation {
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join("pulseboard.log")
    }
}

/// The three read-only collections the dashboard consumes. Each is loaded
/// independently; a broken or missing file empties that section only.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub projects: Vec<Project>,
    pub team: Vec<TeamMember>,
    pub tasks: Vec<TaskRecord>,
}

pub fn init_data_dir(start: &Path) -> Result<DataLocation> {
    let dir = start.join(".pulseboard");
    fs::create_dir_all(&dir).context("failed to create .pulseboard directory")?;
    let location = DataLocation {
        dir,
        scope: DataScope::Project,
    };
    seed_if_missing(&location)?;
    Ok(location)
}

/// Walks up from `start` looking for a `.pulseboard/` directory, falling
/// back to the platform data dir.
pub fn locate_data(start: &Path) -> Result<DataLocation> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(".pulseboard");
        if candidate.is_dir() {
            return Ok(DataLocation {
                dir: candidate,
                scope: DataScope::Project,
            });
        }
        dir = current.parent();
    }
    let dirs = ProjectDirs::from("", "", "pulseboard").context("locating data directory")?;
    Ok(DataLocation {
        dir: dirs.data_dir().to_path_buf(),
        scope: DataScope::Global,
    })
}

pub fn locate_from_cwd() -> Result<DataLocation> {
    let cwd = env::current_dir()?;
    locate_data(&cwd)
}

/// Loads all three collections. Never fails as a whole: a fetch/parse error
/// in one collection is logged and that section renders empty.
pub fn load_dashboard(location: &DataLocation) -> DashboardData {
    DashboardData {
        projects: load_collection(&location.file(PROJECTS_FILE)),
        team: load_collection(&location.file(TEAM_FILE)),
        tasks: load_collection(&location.file(TASKS_FILE)),
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) => {
            warn!(path = %path.display(), %err, "collection unavailable");
            return Vec::new();
        }
    };
    match serde_json::from_str(&data) {
        Ok(records) => records,
        Err(err) => {
            warn!(path = %path.display(), %err, "collection failed to parse");
            Vec::new()
        }
    }
}

fn write_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let serialized = serde_json::to_string_pretty(records).context("serializing collection")?;
    fs::write(path, serialized).with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

fn seed_if_missing(location: &DataLocation) -> Result<()> {
    let projects_path = location.file(PROJECTS_FILE);
    if !projects_path.exists() {
        write_collection(&projects_path, &sample_projects())?;
    }
    let team_path = location.file(TEAM_FILE);
    if !team_path.exists() {
        write_collection(&team_path, &sample_team())?;
    }
    let tasks_path = location.file(TASKS_FILE);
    if !tasks_path.exists() {
        write_collection(&tasks_path, &sample_tasks())?;
    }
    Ok(())
}

fn sample_projects() -> Vec<Project> {
    let entries = [
        ("Website Redesign", ProjectStatus::Running),
        ("Mobile App", ProjectStatus::Running),
        ("API Migration", ProjectStatus::Done),
        ("Onboarding Flow", ProjectStatus::Done),
        ("Analytics Pipeline", ProjectStatus::Pending),
        ("Design System", ProjectStatus::Running),
    ];
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, status))| Project {
            name: name.to_string(),
            image: format!("https://example.com/projects/{}.png", i + 1),
            status,
        })
        .collect()
}

fn sample_team() -> Vec<TeamMember> {
    let entries = [
        ("Amira Khalil", "Product Manager"),
        ("Jonas Weber", "Backend Engineer"),
        ("Priya Nair", "UI Designer"),
        ("Tomás Rivera", "QA Engineer"),
    ];
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (full_name, job))| TeamMember {
            full_name: full_name.to_string(),
            job: job.to_string(),
            image: format!("https://example.com/team/{}.png", i + 1),
        })
        .collect()
}

fn sample_tasks() -> Vec<TaskRecord> {
    let today = chrono::Utc::now().date_naive();
    let entries = [
        ("Draft landing page copy", "Hero, features, pricing", -2, Status::ToDo),
        ("Wire up auth endpoints", "Login, refresh, logout", 1, Status::ToDo),
        ("Review design tokens", "Colors and spacing scale", 0, Status::InProgress),
        ("Migrate billing tables", "Zero-downtime plan", 5, Status::InProgress),
        ("Ship v1.2 release notes", "Changelog and email", 3, Status::Done),
        ("Prepare sprint retro", "Collect discussion topics", 8, Status::Pending),
    ];
    entries
        .into_iter()
        .map(|(name, description, offset, status)| TaskRecord {
            name: name.to_string(),
            description: description.to_string(),
            due_date: today + chrono::Duration::days(offset),
            status,
        })
        .collect()
}
