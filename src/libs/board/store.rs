//! Cached task list shared between the mutator and its readers.

use crate::libs::task::Task;
use parking_lot::Mutex;
use std::sync::Arc;

/// Holds the current task list as an immutable snapshot.
///
/// Writers never touch a published snapshot: [`TaskStore::update`] copies the
/// list, applies the change and swaps the new list in while holding the lock,
/// so concurrent operations cannot interleave inside one change and readers
/// keep a consistent list for as long as they hold their `Arc`.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Mutex<Arc<Vec<Task>>>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(Arc::new(tasks)),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks.lock())
    }

    pub fn replace(&self, tasks: Vec<Task>) {
        *self.tasks.lock() = Arc::new(tasks);
    }

    /// Applies `change` to a copy of the list and publishes the copy.
    pub fn update<T>(&self, change: impl FnOnce(&mut Vec<Task>) -> T) -> T {
        let mut current = self.tasks.lock();
        let mut next = Vec::clone(&current);
        let output = change(&mut next);
        *current = Arc::new(next);
        output
    }

    pub fn get(&self, task_id: &str) -> Option<Task> {
        self.tasks.lock().iter().find(|task| task.id == task_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_snapshots_are_not_affected_by_later_updates() {
        let store = TaskStore::new(vec![Task::new("1", "first")]);
        let before = store.snapshot();

        store.update(|tasks| tasks.push(Task::new("2", "second")));

        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().len(), 2);
        assert!(store.get("2").is_some());
    }

    #[test]
    fn update_returns_the_closure_output() {
        let store = TaskStore::new(vec![Task::new("1", "first"), Task::new("2", "second")]);

        let removed = store.update(|tasks| {
            let index = tasks.iter().position(|task| task.id == "1")?;
            Some(tasks.remove(index))
        });

        assert_eq!(removed.map(|task| task.title), Some("first".to_string()));
        assert_eq!(store.get("2").map(|task| task.title), Some("second".to_string()));
        assert!(store.get("1").is_none());
    }
}
