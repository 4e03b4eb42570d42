pub mod helpers;
pub mod storage;
pub mod types;

use crate::shared::errors::StoreError;
use helpers::{find_task_mut, validate_text};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use types::{Task, TodoSummary};

/// File-backed todo list.
///
/// Every operation reads the whole file, and mutations write the whole file
/// back. The load-mutate-store cycle runs under `cycle_lock`, so writers in
/// this process never overwrite each other's changes. Writers in other
/// processes still race.
pub struct TodoStore {
    path: PathBuf,
    cycle_lock: Mutex<()>,
}

impl TodoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        let _guard = self.lock_cycle();
        storage::load_tasks(&self.path)
    }

    pub fn summary(&self) -> Result<TodoSummary, StoreError> {
        Ok(TodoSummary::from_tasks(&self.load_all()?))
    }

    /// Appends a new active task. Returns its index.
    pub fn add(&self, text: &str) -> Result<usize, StoreError> {
        let text = validate_text(text)?;

        self.mutate(|tasks| {
            tasks.push(Task::new(text));
            let index = tasks.len() - 1;
            tracing::info!(target: "todos", index, "Todo added");
            Ok(index)
        })
    }

    pub fn set_completed(&self, index: i64, completed: bool) -> Result<(), StoreError> {
        self.mutate(|tasks| {
            find_task_mut(tasks, index)?.completed = completed;
            tracing::info!(target: "todos", index, completed, "Todo completion updated");
            Ok(())
        })
    }

    /// Soft-deletes (`true`) or restores (`false`) a task. The slot is kept.
    pub fn set_deleted(&self, index: i64, deleted: bool) -> Result<(), StoreError> {
        self.mutate(|tasks| {
            find_task_mut(tasks, index)?.deleted = deleted;
            if deleted {
                tracing::info!(target: "todos", index, "Todo deleted");
            } else {
                tracing::info!(target: "todos", index, "Todo restored");
            }
            Ok(())
        })
    }

    pub fn set_text(&self, index: i64, text: &str) -> Result<(), StoreError> {
        let text = validate_text(text)?;

        self.mutate(|tasks| {
            find_task_mut(tasks, index)?.text = text;
            tracing::info!(target: "todos", index, "Todo text updated");
            Ok(())
        })
    }

    /// Runs one read-modify-write cycle. Nothing is written when `f` fails.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<Task>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock_cycle();

        let mut tasks = storage::load_tasks(&self.path)?;
        let result = f(&mut tasks).inspect_err(|e| {
            tracing::debug!(target: "todos", error = %e, "Todo operation rejected");
        })?;
        storage::save_tasks(&self.path, &tasks)?;

        Ok(result)
    }

    fn lock_cycle(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.cycle_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TodoStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = TodoStore::new(dir.path().join("todos.json"));
        (dir, store)
    }

    #[test]
    fn test_add_returns_appended_index() {
        let (_dir, store) = store();

        assert_eq!(store.add("a").unwrap(), 0);
        assert_eq!(store.add("b").unwrap(), 1);
    }

    #[test]
    fn test_text_is_stored_as_sent() {
        let (_dir, store) = store();

        store.add("  buy milk  ").unwrap();
        assert_eq!(store.load_all().unwrap()[0].text, "  buy milk  ");

        store.set_text(0, "milk\n").unwrap();
        assert_eq!(store.load_all().unwrap()[0].text, "milk\n");
    }

    #[test]
    fn test_set_text_validates_before_bounds() {
        let (_dir, store) = store();

        let err = store.set_text(5, "   ").unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_rejected_mutation_does_not_touch_file() {
        let (_dir, store) = store();
        store.add("a").unwrap();
        let before = std::fs::read(store.path()).unwrap();

        assert!(store.set_deleted(1, true).is_err());

        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_summary() {
        let (_dir, store) = store();
        store.add("a").unwrap();
        store.add("b").unwrap();
        store.add("c").unwrap();
        store.set_completed(0, true).unwrap();
        store.set_deleted(2, true).unwrap();

        let summary = store.summary().unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.deleted, 1);
    }
}
