// Durable task storage backends

use crate::error::{Error, Result};
use crate::task::{DATE_FORMAT, Status, Task};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable backing for a task collection
///
/// The store persists every mutation through this trait, so the durable
/// record set always mirrors the in-memory collection. Writes are whole-record
/// overwrites and not crash-atomic: a crash mid-save may leave a partially
/// written record.
pub trait Storage {
    /// Idempotently create the storage location if missing
    fn ensure_exists(&self) -> Result<()>;

    /// Reconstruct every task from durable storage
    ///
    /// A record that fails to decode is skipped with a warning rather than
    /// aborting the whole load.
    fn load(&self) -> Result<Vec<Task>>;

    /// Persist a single task, replacing any prior record with the same id
    fn save(&self, task: &Task) -> Result<()>;

    /// Persist the whole collection
    fn save_all(&self, tasks: &[Task]) -> Result<()>;

    /// Remove the durable record for `id`, if any
    fn delete(&self, id: u32) -> Result<()>;
}

/// Canonical backend: one JSON file holding an array of task records
///
/// Records are `{id, title, description, due_date, priority?, status}` in
/// insertion order; dates are `YYYY-MM-DD`, priority and status the
/// capitalized variant names, priority omitted when absent. `load` is the
/// exact inverse of `save_all`. An array element that fails to decode is
/// skipped with a warning; a file that is not valid JSON at all fails hard.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<Task>> {
        let text = fs::read_to_string(&self.path)?;
        let raw: Vec<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| Error::Corrupt(format!("{}: {}", self.path.display(), e)))?;

        let mut tasks = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<Task>(value) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    warn!(
                        file = %self.path.display(),
                        error = %e,
                        "skipping unreadable task record"
                    );
                }
            }
        }
        Ok(tasks)
    }

    fn write_records(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        file.lock_exclusive()?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        debug!(file = %self.path.display(), count = tasks.len(), "wrote task records");
        Ok(())
    }
}

impl Storage for JsonFile {
    fn ensure_exists(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !self.path.exists() {
            fs::write(&self.path, "[]")?;
        }
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task>> {
        self.ensure_exists()?;
        self.read_records()
    }

    fn save(&self, task: &Task) -> Result<()> {
        self.ensure_exists()?;
        let mut tasks = self.read_records()?;
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task.clone(),
            None => tasks.push(task.clone()),
        }
        self.write_records(&tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        self.ensure_exists()?;
        self.write_records(tasks)
    }

    fn delete(&self, id: u32) -> Result<()> {
        self.ensure_exists()?;
        let mut tasks = self.read_records()?;
        tasks.retain(|t| t.id != id);
        self.write_records(&tasks)
    }
}

/// Per-file backend: a directory of `<id>.txt` files
///
/// Each file holds four lines: title, description, `YYYY-MM-DD` deadline, and
/// `True`/`False` completed. The task id is the file's base name. This format
/// cannot represent priority, which always loads as `None`, and assumes
/// single-line titles and descriptions. Directory order is arbitrary, so
/// `load` returns tasks sorted by ascending id.
pub struct TaskDir {
    dir: PathBuf,
}

impl TaskDir {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn task_path(&self, id: u32) -> PathBuf {
        self.dir.join(format!("{id}.txt"))
    }

    fn read_task(path: &Path, id: u32) -> Result<Task> {
        let text = fs::read_to_string(path)?;
        let mut lines = text.lines();
        let mut next_line = |field: &str| {
            lines
                .next()
                .map(|l| l.trim().to_string())
                .ok_or_else(|| Error::Corrupt(format!("{}: missing {field} line", path.display())))
        };

        let title = next_line("title")?;
        let description = next_line("description")?;
        let deadline_text = next_line("deadline")?;
        let completed_text = next_line("completed")?;

        let deadline = NaiveDate::parse_from_str(&deadline_text, DATE_FORMAT).map_err(|_| {
            Error::Corrupt(format!("{}: bad deadline {deadline_text:?}", path.display()))
        })?;
        let status = match completed_text.as_str() {
            "True" => Status::Completed,
            "False" => Status::Pending,
            other => {
                return Err(Error::Corrupt(format!(
                    "{}: bad completed flag {other:?}",
                    path.display()
                )));
            }
        };

        Ok(Task {
            id,
            title,
            description,
            deadline,
            priority: None,
            status,
        })
    }
}

impl Storage for TaskDir {
    fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<Task>> {
        self.ensure_exists()?;

        let mut tasks = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("txt") {
                continue;
            }

            let id = match path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u32>().ok())
            {
                Some(id) => id,
                None => {
                    warn!(file = %path.display(), "skipping file without a numeric task id");
                    continue;
                }
            };

            match Self::read_task(&path, id) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable task file");
                }
            }
        }

        tasks.sort_by_key(|t| t.id);
        Ok(tasks)
    }

    fn save(&self, task: &Task) -> Result<()> {
        self.ensure_exists()?;

        let completed = if task.status == Status::Completed {
            "True"
        } else {
            "False"
        };
        let body = format!(
            "{}\n{}\n{}\n{}\n",
            task.title,
            task.description,
            task.deadline.format(DATE_FORMAT),
            completed
        );

        let path = self.task_path(task.id);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        file.lock_exclusive()?;
        file.write_all(body.as_bytes())?;
        file.sync_all()?;

        debug!(file = %path.display(), "wrote task file");
        Ok(())
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        for task in tasks {
            self.save(task)?;
        }
        Ok(())
    }

    fn delete(&self, id: u32) -> Result<()> {
        let path = self.task_path(id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, parse_deadline};
    use tempfile::TempDir;

    fn task(id: u32, title: &str, priority: Option<Priority>, status: Status) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: format!("{title} details"),
            deadline: parse_deadline("2024-06-01").unwrap(),
            priority,
            status,
        }
    }

    #[test]
    fn test_json_file_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFile::new(temp.path().join("tasks.json"));

        let tasks = vec![
            task(1, "Pay bill", Some(Priority::High), Status::Pending),
            task(2, "Renew license", None, Status::Completed),
        ];
        storage.save_all(&tasks).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_json_file_load_creates_storage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("tasks.json");
        let storage = JsonFile::new(&path);

        let loaded = storage.load().unwrap();
        assert!(loaded.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_json_file_save_upserts() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFile::new(temp.path().join("tasks.json"));

        let mut t = task(1, "Pay bill", None, Status::Pending);
        storage.save(&t).unwrap();

        t.status = Status::Completed;
        storage.save(&t).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].status, Status::Completed);
    }

    #[test]
    fn test_json_file_delete() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFile::new(temp.path().join("tasks.json"));

        storage
            .save_all(&[
                task(1, "Pay bill", None, Status::Pending),
                task(2, "Renew license", None, Status::Pending),
            ])
            .unwrap();
        storage.delete(1).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }

    #[test]
    fn test_json_file_skips_bad_record() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(
            &path,
            r#"[
                {"id":1,"title":"Good","description":"ok","due_date":"2024-06-01","status":"Pending"},
                {"id":2,"title":"Bad","description":"no date","due_date":"06/01/2024","status":"Pending"}
            ]"#,
        )
        .unwrap();

        let loaded = JsonFile::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);
    }

    #[test]
    fn test_json_file_invalid_json_fails_hard() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tasks.json");
        fs::write(&path, "not json").unwrap();

        let result = JsonFile::new(&path).load();
        assert!(matches!(result, Err(Error::Corrupt(_))));
    }

    #[test]
    fn test_task_dir_round_trip() {
        let temp = TempDir::new().unwrap();
        let storage = TaskDir::new(temp.path().join("tasks"));

        let tasks = vec![
            task(1, "Pay bill", None, Status::Pending),
            task(2, "Renew license", None, Status::Completed),
        ];
        storage.save_all(&tasks).unwrap();

        // Wrote one file per task, four lines each
        let body = fs::read_to_string(temp.path().join("tasks/2.txt")).unwrap();
        assert_eq!(body, "Renew license\nRenew license details\n2024-06-01\nTrue\n");

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn test_task_dir_priority_not_persisted() {
        let temp = TempDir::new().unwrap();
        let storage = TaskDir::new(temp.path().join("tasks"));

        storage
            .save(&task(1, "Pay bill", Some(Priority::High), Status::Pending))
            .unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded[0].priority, None);
    }

    #[test]
    fn test_task_dir_skips_unparseable_files() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tasks");
        let storage = TaskDir::new(&dir);
        storage.ensure_exists().unwrap();

        storage.save(&task(3, "Good", None, Status::Pending)).unwrap();
        fs::write(dir.join("notes.txt"), "not a task\n").unwrap();
        fs::write(dir.join("4.txt"), "Truncated\n").unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 3);
    }

    #[test]
    fn test_task_dir_delete_removes_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tasks");
        let storage = TaskDir::new(&dir);

        storage.save(&task(1, "Pay bill", None, Status::Pending)).unwrap();
        assert!(dir.join("1.txt").exists());

        storage.delete(1).unwrap();
        assert!(!dir.join("1.txt").exists());

        // Deleting an absent record is a no-op at this layer
        storage.delete(1).unwrap();
    }

    #[test]
    fn test_ensure_exists_idempotent() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFile::new(temp.path().join("tasks.json"));

        storage.ensure_exists().unwrap();
        storage.save(&task(1, "Pay bill", None, Status::Pending)).unwrap();
        storage.ensure_exists().unwrap();

        // A second ensure_exists must not clobber existing records
        assert_eq!(storage.load().unwrap().len(), 1);
    }
}
