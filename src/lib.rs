//! To-do list library
//!
//! A single-user task list with priorities and target dates, persisted to a
//! flat file that is rewritten on every change.
//!
//! # Architecture
//!
//! - **Domain Layer**: `tasks` module - `Task`, `Priority` and the `TaskStore`
//!   that keeps tasks ordered by priority and computes overdue status
//! - **Persistence Layer**: `storage` module - line or TOML store file
//! - **Terminal Layer**: `cli`, `formatting` and `validation` - the menu loop
//!
//! # Example
//!
//! ```no_run
//! use todo_list::{Storage, TaskStore};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let mut store = TaskStore::open(Storage::new("tasks.txt"))?;
//!     store.add("Pay bills", "high", "2099-01-01")?;
//!     for (task, status) in store.list() {
//!         println!("{} [{}]", task.description, status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod formatting;
pub mod storage;
pub mod tasks;
pub mod validation;

pub use error::TaskError;
pub use storage::{Storage, StoreFormat};
pub use tasks::{Priority, Task, TaskStatus, TaskStore};
