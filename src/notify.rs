// Due-date notifications

use crate::task::{Status, Task};
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};

/// Scan for overdue and near-due pending tasks using the local clock
pub fn notify(tasks: &[Task]) -> Vec<String> {
    notifications(tasks, Local::now().naive_local())
}

/// Scan for overdue and near-due pending tasks at an explicit instant
///
/// A deadline counts from midnight of its calendar date. Pending tasks whose
/// deadline has passed are overdue; pending tasks due within the next day are
/// near-due. Completed tasks are never reported. Messages come back in the
/// collection's insertion order, not sorted by urgency.
pub fn notifications(tasks: &[Task], now: NaiveDateTime) -> Vec<String> {
    let mut messages = Vec::new();
    for task in tasks {
        if task.status != Status::Pending {
            continue;
        }
        let due = task.deadline.and_time(NaiveTime::MIN);
        if due < now {
            messages.push(format!("Task {} is overdue!", task.id));
        } else if due - now <= Duration::days(1) {
            messages.push(format!("Task {} is nearing its deadline!", task.id));
        }
    }
    messages
}
