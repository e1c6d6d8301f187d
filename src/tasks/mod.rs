//! Task domain model and the task store
//!
//! - `task`: `Task`, `Priority`, `TaskStatus` and the overdue rule
//! - `task_store`: `TaskStore`, the ordered collection with persistence

mod task;
mod task_store;

pub use task::{DATE_FORMAT, Priority, Task, TaskStatus, local_date_today};
pub use task_store::TaskStore;
