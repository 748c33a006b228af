use std::sync::Mutex;
use uuid::Uuid;

use super::lock;
use crate::error::StoreError;
use crate::models::{validate_task, Task, TaskInput};

/// Thread-safe, insertion-ordered task collection.
///
/// Every stored task has passed `validate_task`; input is validated on both
/// create and update, never on read.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `input`, assigns a fresh id and appends the task.
    pub fn create(&self, input: TaskInput) -> Result<Task, StoreError> {
        let mut tasks = lock(&self.tasks);

        let status = validate_task(&input)?;
        let task = Task::from_input(Uuid::new_v4(), input, status);
        tasks.push(task.clone());

        log::debug!("created task {}", task.id);
        Ok(task)
    }

    /// Returns a copy of every task, oldest first.
    pub fn list_all(&self) -> Vec<Task> {
        lock(&self.tasks).clone()
    }

    pub fn get_by_id(&self, id: Uuid) -> Result<Task, StoreError> {
        lock(&self.tasks)
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Replaces the mutable fields of task `id` in place, keeping its position.
    ///
    /// Validation runs first, so a rejected update leaves the store untouched.
    pub fn update(&self, id: Uuid, input: TaskInput) -> Result<Task, StoreError> {
        let mut tasks = lock(&self.tasks);

        let status = validate_task(&input)?;
        let slot = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound)?;
        *slot = Task::from_input(id, input, status);

        log::debug!("updated task {}", id);
        Ok(slot.clone())
    }

    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tasks = lock(&self.tasks);

        let index = tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(StoreError::NotFound)?;
        tasks.remove(index);

        log::debug!("deleted task {}", id);
        Ok(())
    }
}
