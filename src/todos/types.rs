use serde::{Deserialize, Serialize};

/// One entry of the persisted list. Its identity is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
            deleted: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub deleted: usize,
}

impl TodoSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut summary, task| {
            summary.total += 1;
            if task.deleted {
                summary.deleted += 1;
            } else {
                summary.active += 1;
                if task.completed {
                    summary.completed += 1;
                }
            }
            summary
        })
    }
}

// Request bodies

#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub todo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetCompletedRequest {
    pub completed: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditTodoRequest {
    #[serde(default)]
    pub text: Option<String>,
}
