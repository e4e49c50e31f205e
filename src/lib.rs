// TaskPlanner - personal task tracking with durable file storage

pub mod error;
pub mod notify;
pub mod query;
pub mod storage;
pub mod store;
pub mod task;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use query::{SortKey, TaskFilter};
pub use storage::{JsonFile, Storage, TaskDir};
pub use store::{TaskPatch, TaskStore};
pub use task::{Priority, Status, Task, parse_deadline};
