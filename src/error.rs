// Typed errors for the task planner core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or empty required field, unparseable date, or an unknown
    /// priority/status/sort-key name.
    #[error("{0}")]
    Validation(String),

    /// No task with the given id exists in the store.
    #[error("no task with id {0}")]
    NotFound(u32),

    /// Storage location unreadable or unwritable.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A durable record exists but cannot be decoded.
    #[error("corrupt task record: {0}")]
    Corrupt(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Corrupt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound(7);
        assert_eq!(err.to_string(), "no task with id 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
