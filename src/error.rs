//! Error type shared by the task store, storage and input validation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Description was empty after trimming
    #[error("Task cannot be empty!")]
    EmptyDescription,

    /// Raw input where a task number was expected did not parse as an integer
    #[error("Invalid input '{0}'! Please enter a valid number.")]
    InvalidNumber(String),

    /// 1-based task number outside `[1, len]`, negative numbers included
    #[error("Invalid task number {index}! Expected a number between 1 and {len}.")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Error loading tasks from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error saving tasks to {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Store file content (or in-memory data) could not be converted to or from TOML
    #[error("Malformed task file {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },
}

impl TaskError {
    pub fn out_of_range(index: usize, len: usize) -> Self {
        TaskError::IndexOutOfRange {
            index: i64::try_from(index).unwrap_or(i64::MAX),
            len,
        }
    }

    /// True for failures that happened while reading or writing the store file
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            TaskError::Load { .. } | TaskError::Save { .. } | TaskError::Format { .. }
        )
    }
}
