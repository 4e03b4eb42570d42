use super::types::Task;
use crate::shared::errors::StoreError;

/// Resolves a signed index against the list, `NotFound` outside `[0, len)`.
pub fn slot_index(tasks: &[Task], index: i64) -> Result<usize, StoreError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < tasks.len())
        .ok_or_else(|| StoreError::not_found(index, tasks.len()))
}

pub fn find_task_mut(tasks: &mut [Task], index: i64) -> Result<&mut Task, StoreError> {
    let slot = slot_index(tasks, index)?;
    Ok(&mut tasks[slot])
}

/// Rejects empty or whitespace-only text. Accepted text is kept as sent.
pub fn validate_text(text: &str) -> Result<String, StoreError> {
    if text.trim().is_empty() {
        return Err(StoreError::validation("Todo text is required"));
    }
    Ok(text.to_string())
}
