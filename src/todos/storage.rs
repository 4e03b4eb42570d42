use super::types::Task;
use crate::shared::errors::StoreError;
use crate::shared::paths::ensure_parent_dir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

// ============================================================================
// File I/O
// ============================================================================

/// Creates the data file with an empty list if it does not exist yet.
/// Returns true when the file was created.
pub fn bootstrap(path: &Path) -> Result<bool, StoreError> {
    if path.exists() {
        return Ok(false);
    }

    ensure_parent_dir(path).map_err(StoreError::WriteError)?;
    save_tasks(path, &[])?;
    tracing::info!(
        target: "todos::storage",
        path = %path.display(),
        "Initialized empty data file"
    );
    Ok(true)
}

/// Reads the whole list from disk, bootstrapping a missing file first.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, StoreError> {
    bootstrap(path)?;

    let content = fs::read_to_string(path).map_err(StoreError::ReadError)?;
    let tasks: Vec<Task> = serde_json::from_str(&content)?;

    tracing::trace!(
        target: "todos::storage",
        path = %path.display(),
        count = tasks.len(),
        "Loaded todos"
    );
    Ok(tasks)
}

/// Replaces the whole list on disk.
///
/// The content goes to a sibling temp file which is synced and renamed over
/// the target, so a failed write leaves the previous file untouched.
pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(tasks).map_err(StoreError::SerializeError)?;
    let tmp_path = temp_path_for(path);

    let written = write_synced(&tmp_path, content.as_bytes())
        .and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        tracing::error!(
            target: "todos::storage",
            path = %path.display(),
            error = %e,
            "Failed to save todos"
        );
        return Err(StoreError::WriteError(e));
    }

    tracing::trace!(
        target: "todos::storage",
        path = %path.display(),
        count = tasks.len(),
        "Saved todos"
    );
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "todos.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
