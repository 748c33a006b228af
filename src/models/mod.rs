pub mod task;
pub mod user;

pub use task::{validate_task, Task, TaskInput, TaskStatus};
pub use user::{NewUser, User};
