pub mod task;
pub mod user;

pub use task::{Task, TaskForm, TaskInput, TaskStatus};
pub use user::{AuthPayload, User};
