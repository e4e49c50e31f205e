// Task data model

use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used everywhere a deadline crosses a text boundary
/// (user input, the per-file storage format, display).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A unit of tracked work
///
/// Serialized field names match the durable JSON format: the deadline is
/// written as `due_date` in `YYYY-MM-DD` form, and `priority` is omitted
/// entirely when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(rename = "due_date")]
    pub deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    pub status: Status,
}

/// Completion status. `Pending < Completed` for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Pending,
    Completed,
}

/// Task priority. Declaration order (`Low < Medium < High`) is the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// Parse a `YYYY-MM-DD` deadline from user or storage text
pub fn parse_deadline(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| Error::Validation(format!("invalid date {text:?}, expected YYYY-MM-DD")))
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "Pending"),
            Status::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Status::Pending),
            "completed" => Ok(Status::Completed),
            _ => Err(Error::Validation(format!(
                "unknown status {s:?}, expected Pending or Completed"
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::Validation(format!(
                "unknown priority {s:?}, expected Low, Medium or High"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task {
            id: 1,
            title: "Pay bill".to_string(),
            description: "Utility".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            priority: Some(Priority::High),
            status: Status::Pending,
        }
    }

    #[test]
    fn test_task_serialization_field_names() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"due_date\":\"2024-01-01\""));
        assert!(json.contains("\"priority\":\"High\""));
        assert!(json.contains("\"status\":\"Pending\""));
    }

    #[test]
    fn test_task_serialization_omits_absent_priority() {
        let mut task = sample();
        task.priority = None;
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("priority"));

        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back.priority, None);
    }

    #[test]
    fn test_task_round_trip() {
        let task = sample();
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_parse_deadline() {
        let date = parse_deadline("2024-02-29").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        // Surrounding whitespace is tolerated
        assert!(parse_deadline(" 2024-01-01 ").is_ok());

        assert!(matches!(parse_deadline("01/02/2024"), Err(Error::Validation(_))));
        assert!(matches!(parse_deadline("2024-13-01"), Err(Error::Validation(_))));
        assert!(matches!(parse_deadline(""), Err(Error::Validation(_))));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!("completed".parse::<Status>().unwrap(), Status::Completed);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        // Absent priority sorts before any explicit one
        assert!(None < Some(Priority::Low));
    }
}
