use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::task::{Task, TaskState};
use crate::model::tree::{StructureError, TaskTree};

/// Default task file name, discovered by walking up from the working directory.
pub const TASK_FILE: &str = "agenda.json";

/// Error type for task file I/O.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no {TASK_FILE} found here or in any parent directory")]
    NotFound,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid task file: {0}")]
    Structure(#[from] StructureError),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// On-disk shape of the task file.
#[derive(Debug, Serialize, Deserialize)]
struct TaskFile {
    tasks: Vec<Task>,
}

/// Find the task file by walking up from `start`.
pub fn discover_file(start: &Path) -> Result<PathBuf, LoadError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(TASK_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(LoadError::NotFound);
        }
    }
}

/// Load and validate the task file into a tree.
pub fn load_tree(path: &Path) -> Result<TaskTree, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let file: TaskFile = serde_json::from_str(&text).map_err(|e| LoadError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(TaskTree::new(file.tasks)?)
}

/// Write a starter task file. Refuses to overwrite an existing one.
pub fn write_starter_file(path: &Path) -> Result<(), LoadError> {
    if path.exists() {
        return Err(LoadError::IoError(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", path.display()),
        )));
    }
    let mut welcome = Task::new("Welcome", TaskState::Open);
    welcome.children = vec![
        Task::new("Add your tasks to agenda.json", TaskState::Open),
        Task::new("Run `agn` to see the outline", TaskState::Open),
        Task::new("Run `agn flat` for the by-category view", TaskState::Open),
    ];
    let file = TaskFile { tasks: vec![welcome] };
    let text = serde_json::to_string_pretty(&file).expect("starter file serializes");
    fs::write(path, text + "\n")?;
    Ok(())
}
