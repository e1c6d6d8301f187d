//! File persistence for the task collection
//!
//! Two on-disk formats are supported:
//! - `Lines`: `<priority>,<target_date>,<completed>,<description>` per line, the
//!   classic format. Descriptions are not escaped, so a comma inside a
//!   description makes that line unreadable. Trailing commas survive.
//! - `Toml`: an array of `[[task]]` tables, safe for any description.

use crate::error::TaskError;
use crate::tasks::{Priority, Task};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Number of comma-separated fields in a line record
const LINE_FIELDS: usize = 4;

/// On-disk encoding of the store file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreFormat {
    /// One comma-separated record per line
    Lines,
    /// TOML array of tables
    Toml,
}

impl StoreFormat {
    /// `.toml` files use TOML, everything else the line format
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => StoreFormat::Toml,
            _ => StoreFormat::Lines,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskFile {
    #[serde(default, rename = "task")]
    tasks: Vec<Task>,
}

pub struct Storage {
    file_path: PathBuf,
    format: StoreFormat,
}

impl Storage {
    /// Storage whose format is inferred from the file extension
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let format = StoreFormat::from_path(&file_path);
        Self { file_path, format }
    }

    pub fn with_format(file_path: impl AsRef<Path>, format: StoreFormat) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn format(&self) -> StoreFormat {
        self.format
    }

    /// Read all stored tasks in file order
    ///
    /// A missing file yields an empty list.
    pub fn load(&self) -> Result<Vec<Task>, TaskError> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "store file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(TaskError::Load {
                    path: self.file_path.clone(),
                    source,
                });
            }
        };

        match self.format {
            StoreFormat::Lines => Ok(decode_lines(&content)),
            StoreFormat::Toml => {
                let file: TaskFile = toml::from_str(&content).map_err(|e| TaskError::Format {
                    path: self.file_path.clone(),
                    message: e.to_string(),
                })?;
                Ok(file.tasks)
            }
        }
    }

    /// Overwrite the store file with `tasks`, in the given order
    pub fn save(&self, tasks: &[Task]) -> Result<(), TaskError> {
        let content = match self.format {
            StoreFormat::Lines => tasks
                .iter()
                .map(|task| encode_line(task) + "\n")
                .collect::<String>(),
            StoreFormat::Toml => {
                let file = TaskFile {
                    tasks: tasks.to_vec(),
                };
                toml::to_string_pretty(&file).map_err(|e| TaskError::Format {
                    path: self.file_path.clone(),
                    message: e.to_string(),
                })?
            }
        };

        fs::write(&self.file_path, content).map_err(|source| TaskError::Save {
            path: self.file_path.clone(),
            source,
        })?;
        debug!(path = %self.file_path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// Encode a task as one line record (without the trailing newline)
pub fn encode_line(task: &Task) -> String {
    format!(
        "{},{},{},{}",
        task.priority, task.target_date, task.completed, task.description
    )
}

/// Decode one line record
///
/// Trailing empty fields are not counted, so a description ending in commas
/// still decodes and keeps those commas. Returns `None` when the line does not
/// have exactly four fields otherwise, which includes an empty description.
/// Unknown priorities fall back to Medium, and only a case-insensitive `true`
/// marks the task completed.
pub fn decode_line(line: &str) -> Option<Task> {
    if line.trim_end_matches(',').split(',').count() != LINE_FIELDS {
        return None;
    }
    let fields: Vec<&str> = line.splitn(LINE_FIELDS, ',').collect();

    let (priority, fallback) = Priority::from_input(fields[0]);
    if fallback {
        warn!(priority = fields[0], "unknown stored priority, using medium");
    }

    Some(Task {
        description: fields[3].to_string(),
        priority,
        target_date: fields[1].to_string(),
        completed: fields[2].trim().eq_ignore_ascii_case("true"),
    })
}

fn decode_lines(content: &str) -> Vec<Task> {
    content
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let task = decode_line(line);
            if task.is_none() && !line.trim().is_empty() {
                warn!(line = i + 1, "skipping malformed task record");
            }
            task
        })
        .collect()
}
