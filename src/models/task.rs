use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ValidationError, ValidationReason};

const TITLE_MIN_LEN: usize = 3;
const TITLE_MAX_LEN: usize = 100;

/// Represents the status of a task.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Work on the task has been started.
    Started,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed.
    Complete,
}

impl TaskStatus {
    /// Parses the exact wire name of a status. Matching is case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Started" => Some(TaskStatus::Started),
            "InProgress" => Some(TaskStatus::InProgress),
            "Complete" => Some(TaskStatus::Complete),
            _ => None,
        }
    }
}

/// Input structure for creating or updating a task.
///
/// `status` stays a plain string here so that an unknown value is reported as
/// a validation failure instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub status: String,
}

/// Represents a task as held by the task store and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier for the task (UUID v4), assigned by the store.
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Task {
    /// Builds a task from already validated input.
    pub(crate) fn from_input(id: Uuid, input: TaskInput, status: TaskStatus) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status,
        }
    }
}

/// Checks a task's fields in the order title, description, status and reports
/// the first failure only. On success the parsed status is returned.
pub fn validate_task(input: &TaskInput) -> Result<TaskStatus, ValidationError> {
    validate_title(&input.title)?;
    validate_description(&input.description)?;
    validate_status(&input.status)
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("title", ValidationReason::EmptyField));
    }
    let len = title.chars().count();
    if len > TITLE_MAX_LEN {
        return Err(ValidationError::new("title", ValidationReason::TooLong));
    }
    if len < TITLE_MIN_LEN {
        return Err(ValidationError::new("title", ValidationReason::TooShort));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(ValidationError::new(
            "description",
            ValidationReason::EmptyField,
        ));
    }
    Ok(())
}

fn validate_status(status: &str) -> Result<TaskStatus, ValidationError> {
    TaskStatus::parse(status)
        .ok_or_else(|| ValidationError::new("status", ValidationReason::InvalidEnum))
}
