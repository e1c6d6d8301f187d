use super::task::{Priority, Task, TaskStatus, local_date_today};
use crate::error::TaskError;
use crate::storage::Storage;
use chrono::NaiveDate;
use tracing::debug;

/// The ordered task collection and its backing store file
///
/// Tasks are kept sorted by ascending priority rank. The sort is stable, so
/// tasks of equal priority stay in insertion order. Every mutating operation
/// rewrites the store file. If that write fails the in-memory change is kept
/// and the storage error is returned.
pub struct TaskStore {
    /// All tasks in display order
    tasks: Vec<Task>,
    storage: Storage,
}

impl TaskStore {
    /// Create an empty store backed by `storage` without reading it
    pub fn new(storage: Storage) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
        }
    }

    /// Create a store and load its contents from `storage`
    pub fn open(storage: Storage) -> Result<Self, TaskError> {
        let mut store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Task at a 1-based position
    pub fn get(&self, index: usize) -> Option<&Task> {
        index.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    /// Add a task and persist
    ///
    /// The description is trimmed and must not be empty. An unrecognized
    /// `priority_input` becomes Medium. `target_date` is stored as given.
    pub fn add(
        &mut self,
        description: &str,
        priority_input: &str,
        target_date: &str,
    ) -> Result<Task, TaskError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::EmptyDescription);
        }

        let (priority, _) = Priority::from_input(priority_input);
        let task = Task::new(description, priority, target_date);
        self.insert(task.clone());
        debug!(priority = %priority, count = self.tasks.len(), "added task");

        self.save()?;
        Ok(task)
    }

    /// Tasks with their computed status, evaluated against today's date
    pub fn list(&self) -> Vec<(&Task, TaskStatus)> {
        self.list_on(local_date_today())
    }

    pub fn list_on(&self, today: NaiveDate) -> Vec<(&Task, TaskStatus)> {
        self.tasks
            .iter()
            .map(|task| (task, task.status_on(today)))
            .collect()
    }

    /// Mark the task at a 1-based position as completed and persist
    pub fn complete(&mut self, index: usize) -> Result<Task, TaskError> {
        let i = self.position(index)?;
        self.tasks[i].completed = true;
        let task = self.tasks[i].clone();
        debug!(index, "completed task");

        self.save()?;
        Ok(task)
    }

    /// Remove the task at a 1-based position and persist
    ///
    /// The relative order of the remaining tasks is unchanged.
    pub fn remove(&mut self, index: usize) -> Result<Task, TaskError> {
        let i = self.position(index)?;
        let task = self.tasks.remove(i);
        debug!(index, count = self.tasks.len(), "removed task");

        self.save()?;
        Ok(task)
    }

    /// Incomplete tasks due strictly before today, in display order
    pub fn overdue_tasks(&self) -> Vec<&Task> {
        self.overdue_tasks_on(local_date_today())
    }

    pub fn overdue_tasks_on(&self, today: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.is_overdue_on(today))
            .collect()
    }

    /// Replace the in-memory collection with the contents of the store file
    ///
    /// An absent file leaves the store empty. On error the current
    /// collection is untouched.
    pub fn load(&mut self) -> Result<(), TaskError> {
        let mut tasks = self.storage.load()?;
        sort_by_priority(&mut tasks);
        debug!(count = tasks.len(), "loaded tasks");
        self.tasks = tasks;
        Ok(())
    }

    /// Overwrite the store file with the current collection
    pub fn save(&self) -> Result<(), TaskError> {
        self.storage.save(&self.tasks)
    }

    fn insert(&mut self, task: Task) {
        self.tasks.push(task);
        sort_by_priority(&mut self.tasks);
    }

    /// Convert a 1-based task number to a vector index
    fn position(&self, index: usize) -> Result<usize, TaskError> {
        if index == 0 || index > self.tasks.len() {
            return Err(TaskError::out_of_range(index, self.tasks.len()));
        }
        Ok(index - 1)
    }
}

fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.priority.rank());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::DATE_FORMAT;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn test_store() -> (TaskStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = TaskStore::new(Storage::new(dir.path().join("tasks.txt")));
        (store, dir)
    }

    fn descriptions(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_add_keeps_priority_order_and_insertion_order_for_ties() {
        let (mut store, _dir) = test_store();
        store.add("m1", "medium", "2099-01-01").unwrap();
        store.add("l1", "low", "2099-01-01").unwrap();
        store.add("h1", "high", "2099-01-01").unwrap();
        store.add("m2", "Medium", "2099-01-01").unwrap();
        store.add("h2", "HIGH", "2099-01-01").unwrap();
        store.add("l2", "low", "2099-01-01").unwrap();

        assert_eq!(descriptions(&store), vec!["h1", "h2", "m1", "m2", "l1", "l2"]);
    }

    #[test]
    fn test_add_rejects_empty_description() {
        let (mut store, dir) = test_store();
        let result = store.add("   ", "high", "2099-01-01");
        assert!(matches!(result, Err(TaskError::EmptyDescription)));
        assert!(store.is_empty());
        assert!(!dir.path().join("tasks.txt").exists());
    }

    #[test]
    fn test_add_trims_description() {
        let (mut store, _dir) = test_store();
        let task = store.add("  Pay bills  ", "high", "2099-01-01").unwrap();
        assert_eq!(task.description, "Pay bills");
    }

    #[test]
    fn test_add_unknown_priority_becomes_medium() {
        let (mut store, _dir) = test_store();
        let task = store.add("Ship it", "urgent", "2099-01-01").unwrap();
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(store.tasks()[0].priority, Priority::Medium);
    }

    #[test]
    fn test_complete_and_remove_reject_out_of_range() {
        let (mut store, _dir) = test_store();
        store.add("Only", "low", "2099-01-01").unwrap();

        for index in [0, 2, 100] {
            assert!(matches!(
                store.complete(index),
                Err(TaskError::IndexOutOfRange { len: 1, .. })
            ));
            assert!(matches!(
                store.remove(index),
                Err(TaskError::IndexOutOfRange { len: 1, .. })
            ));
        }
        assert_eq!(store.len(), 1);
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn test_remove_preserves_order() {
        let (mut store, _dir) = test_store();
        store.add("a", "high", "2099-01-01").unwrap();
        store.add("b", "medium", "2099-01-01").unwrap();
        store.add("c", "low", "2099-01-01").unwrap();

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.description, "b");
        assert_eq!(descriptions(&store), vec!["a", "c"]);
    }

    #[test]
    fn test_list_and_overdue_on_fixed_date() {
        let (mut store, _dir) = test_store();
        store.add("late", "low", "2000-01-01").unwrap();
        store.add("future", "high", "2099-01-01").unwrap();
        store.add("weird", "medium", "not-a-date").unwrap();
        store.add("finished", "low", "2000-01-01").unwrap();
        store.complete(4).unwrap();

        let today = date("2024-06-01");
        let statuses: Vec<(&str, TaskStatus)> = store
            .list_on(today)
            .into_iter()
            .map(|(t, s)| (t.description.as_str(), s))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("future", TaskStatus::Pending),
                ("weird", TaskStatus::Pending),
                ("late", TaskStatus::Overdue),
                ("finished", TaskStatus::Done),
            ]
        );

        let overdue: Vec<&str> = store
            .overdue_tasks_on(today)
            .into_iter()
            .map(|t| t.description.as_str())
            .collect();
        assert_eq!(overdue, vec!["late"]);
    }

    #[test]
    fn test_get_is_one_based() {
        let (mut store, _dir) = test_store();
        store.add("first", "high", "2099-01-01").unwrap();
        assert!(store.get(0).is_none());
        assert_eq!(store.get(1).unwrap().description, "first");
        assert!(store.get(2).is_none());
    }
}
