// Filtering and sorting over the task collection

use crate::error::Error;
use crate::task::{Priority, Status, Task};
use chrono::NaiveDate;
use std::str::FromStr;

/// Conjunctive match criteria: a task matches iff every supplied field
/// compares equal. An empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub deadline: Option<NaiveDate>,
    pub title: Option<String>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.deadline.is_none()
            && self.title.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(status) = self.status
            && task.status != status
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != Some(priority)
        {
            return false;
        }
        if let Some(deadline) = self.deadline
            && task.deadline != deadline
        {
            return false;
        }
        if let Some(title) = &self.title
            && &task.title != title
        {
            return false;
        }
        true
    }
}

/// Borrowed view of the matching tasks, in the input's original order
pub fn filter<'a>(tasks: &'a [Task], criteria: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| criteria.matches(t)).collect()
}

/// Field to sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Title,
    Deadline,
    Priority,
    Status,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "title" => Ok(SortKey::Title),
            "deadline" | "due_date" => Ok(SortKey::Deadline),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            _ => Err(Error::Validation(format!(
                "unknown sort key {s:?}, expected id, title, deadline, priority or status"
            ))),
        }
    }
}

/// New ordering, ascending by `key`. The sort is stable: tasks with equal
/// keys keep their relative order from the input. Priority and status compare
/// in declared enum order; tasks without a priority sort first.
pub fn sort(tasks: &[Task], key: SortKey) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    match key {
        SortKey::Id => sorted.sort_by_key(|t| t.id),
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Deadline => sorted.sort_by_key(|t| t.deadline),
        SortKey::Priority => sorted.sort_by_key(|t| t.priority),
        SortKey::Status => sorted.sort_by_key(|t| t.status),
    }
    sorted
}
