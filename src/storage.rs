//! Flat-file persistence for the task list.
//!
//! One record per line, pipe-delimited:
//!
//! ```text
//! T | N | read book
//! D | Y | pay bill | 2024-01-01
//! E | N | book club | 2024-06-01
//! ```
//!
//! `T` records carry exactly 3 fields, `D`/`E` records exactly 4. Loading
//! re-sorts the records into canonical order and rewrites the file, so a
//! hand-edited file is normalized on the next startup.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CorruptPolicy;
use crate::error::{Error, Result};
use crate::parser;
use crate::store::TaskStore;
use crate::task::{Task, TaskType};

/// Persistence adapter for one backing file.
///
/// The file is opened, fully read or fully rewritten, and closed within
/// each operation; no handle is held across calls.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
    on_corrupt: CorruptPolicy,
}

impl Storage {
    pub fn new(path: PathBuf, on_corrupt: CorruptPolicy) -> Self {
        Self { path, on_corrupt }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record from the backing file, sort the result into
    /// canonical order, and rewrite the file in that order.
    ///
    /// A missing file is an empty task list. Blank lines are tolerated;
    /// any other unreadable line is `Error::CorruptRecord`, which aborts
    /// the load unless the policy is `Skip`.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no task file yet, starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let mut tasks = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_record(line, number + 1) {
                Ok(task) => tasks.push(task),
                Err(err) if self.on_corrupt == CorruptPolicy::Skip => {
                    debug!(line = number + 1, %err, "skipping unreadable record");
                }
                Err(err) => return Err(err),
            }
        }

        let sorted = TaskStore::from_tasks(tasks).sorted_view();
        self.rewrite_all(&sorted)?;
        debug!(path = %self.path.display(), count = sorted.len(), "loaded task file");
        Ok(sorted)
    }

    /// Append one task as a new record.
    ///
    /// A separating newline is written only when the file already has
    /// content; the file never ends with a trailing newline.
    pub fn append_task(&self, task: &Task) -> Result<()> {
        self.ensure_parent()?;

        let record = serialize_record(task);
        let existing = fs::metadata(&self.path).map(|meta| meta.len()).unwrap_or(0);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        if existing == 0 {
            write!(file, "{record}")?;
        } else {
            write!(file, "\n{record}")?;
        }
        file.sync_all()?;

        Ok(())
    }

    /// Replace the whole file with the given tasks, one record per line.
    pub fn rewrite_all(&self, tasks: &[Task]) -> Result<()> {
        let records: Vec<String> = tasks.iter().map(serialize_record).collect();
        self.write_atomic(records.join("\n").as_bytes())
    }

    /// Write via temp file + rename so a failed write never leaves a
    /// half-written task file behind.
    fn write_atomic(&self, data: &[u8]) -> Result<()> {
        self.ensure_parent()?;

        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

/// Serialize one task in the backing file's record format.
pub fn serialize_record(task: &Task) -> String {
    let done_flag = if task.is_done() { "Y" } else { "N" };
    match task.date() {
        Some(date) => format!(
            "{} | {} | {} | {}",
            task.task_type().tag(),
            done_flag,
            task.description,
            date
        ),
        None => format!(
            "{} | {} | {}",
            task.task_type().tag(),
            done_flag,
            task.description
        ),
    }
}

/// Parse one persisted line back into a task.
///
/// The description and date fields go through `parser::parse_add` (its
/// `|` separator path), so a record is reconstructed by the same logic
/// that validated it on the way in.
fn parse_record(line: &str, line_no: usize) -> Result<Task> {
    let corrupt = |reason: String| Error::CorruptRecord {
        line: line_no,
        reason,
        content: line.to_string(),
    };

    let mut fields = line.splitn(3, '|');
    let tag = fields.next().unwrap_or_default().trim();
    let flag = match fields.next() {
        Some(flag) => flag.trim(),
        None => return Err(corrupt("expected 3 pipe-delimited fields".to_string())),
    };
    let rest = match fields.next() {
        Some(rest) => rest,
        None => return Err(corrupt("expected 3 pipe-delimited fields".to_string())),
    };

    let task_type = TaskType::from_tag(tag)
        .ok_or_else(|| corrupt(format!("unknown type tag {tag:?}")))?;

    let done = match flag {
        "Y" | "y" => true,
        "N" | "n" => false,
        other => return Err(corrupt(format!("done flag must be Y or N, got {other:?}"))),
    };

    // The remainder must hold exactly one more field for T records and
    // exactly two (description | date) for D/E records.
    let extra_pipes = rest.matches('|').count();
    let expected = match task_type {
        TaskType::Todo => 0,
        TaskType::Deadline | TaskType::Event => 1,
    };
    if extra_pipes != expected {
        return Err(corrupt(format!(
            "expected exactly {} fields for a {} record",
            expected + 3,
            task_type.tag()
        )));
    }

    let mut task =
        parser::parse_add(task_type, rest).map_err(|err| corrupt(err.to_string()))?;
    if done {
        task.mark_done();
    }
    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(raw: &str) -> NaiveDate {
        raw.parse().unwrap()
    }

    fn storage_in(temp: &TempDir, on_corrupt: CorruptPolicy) -> Storage {
        Storage::new(temp.path().join("tasks.txt"), on_corrupt)
    }

    fn read_file(storage: &Storage) -> String {
        fs::read_to_string(storage.path()).unwrap()
    }

    #[test]
    fn records_round_trip_for_every_kind() {
        let mut done_deadline = Task::deadline("pay bill", date("2024-01-01"));
        done_deadline.mark_done();

        for task in [
            Task::todo("read book"),
            done_deadline,
            Task::event("book club", date("2024-06-01")),
        ] {
            let record = serialize_record(&task);
            let parsed = parse_record(&record, 1).unwrap();
            assert_eq!(parsed, task, "{record}");
        }
    }

    #[test]
    fn serialized_records_match_the_file_format() {
        assert_eq!(
            serialize_record(&Task::todo("read book")),
            "T | N | read book"
        );
        assert_eq!(
            serialize_record(&Task::deadline("submit report", date("2024-03-15"))),
            "D | N | submit report | 2024-03-15"
        );
    }

    #[test]
    fn load_of_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        assert!(storage.load().unwrap().is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn load_sorts_records_and_rewrites_the_file() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        fs::write(
            storage.path(),
            "T | Y | eat\nD | N | pay bill | 2024-01-01",
        )
        .unwrap();

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].description, "pay bill");
        assert_eq!(tasks[1].description, "eat");
        assert!(tasks[1].is_done());

        assert_eq!(
            read_file(&storage),
            "D | N | pay bill | 2024-01-01\nT | Y | eat"
        );
    }

    #[test]
    fn loading_twice_is_stable() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        fs::write(
            storage.path(),
            "T | N | chores\nE | N | book club | 2024-06-01\nD | Y | pay bill | 2024-01-01",
        )
        .unwrap();

        let first = storage.load().unwrap();
        let file_after_first = read_file(&storage);
        let second = storage.load().unwrap();

        assert_eq!(first, second);
        assert_eq!(file_after_first, read_file(&storage));
    }

    #[test]
    fn blank_lines_are_tolerated() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        fs::write(storage.path(), "T | N | read book\n\n  \n").unwrap();

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(read_file(&storage), "T | N | read book");
    }

    #[test]
    fn wrong_field_count_is_corrupt() {
        for line in ["T | N", "T", "T | N | a | b", "D | N | no date", "D | N | a | b | c"] {
            match parse_record(line, 7) {
                Err(Error::CorruptRecord { line: at, .. }) => assert_eq!(at, 7, "{line}"),
                other => panic!("expected corrupt record for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_tag_and_bad_flag_are_corrupt() {
        assert!(matches!(
            parse_record("X | N | what", 1),
            Err(Error::CorruptRecord { .. })
        ));
        assert!(matches!(
            parse_record("T | maybe | what", 1),
            Err(Error::CorruptRecord { .. })
        ));
    }

    #[test]
    fn unparseable_date_is_corrupt_on_load() {
        assert!(matches!(
            parse_record("D | N | oops | 2024-13-40", 1),
            Err(Error::CorruptRecord { .. })
        ));
    }

    #[test]
    fn corrupt_record_aborts_load_by_default() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        let original = "T | N | read book\nnonsense line";
        fs::write(storage.path(), original).unwrap();

        match storage.load() {
            Err(Error::CorruptRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected: {other:?}"),
        }
        // A failed load must not touch the file.
        assert_eq!(read_file(&storage), original);
    }

    #[test]
    fn skip_policy_drops_corrupt_records_and_heals_the_file() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Skip);
        fs::write(
            storage.path(),
            "nonsense line\nT | N | read book\nX | N | what",
        )
        .unwrap();

        let tasks = storage.load().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(read_file(&storage), "T | N | read book");
    }

    #[test]
    fn append_separates_records_without_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);

        storage.append_task(&Task::todo("read book")).unwrap();
        assert_eq!(read_file(&storage), "T | N | read book");

        storage
            .append_task(&Task::deadline("pay bill", date("2024-01-01")))
            .unwrap();
        assert_eq!(
            read_file(&storage),
            "T | N | read book\nD | N | pay bill | 2024-01-01"
        );
    }

    #[test]
    fn rewrite_all_replaces_the_file() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        fs::write(storage.path(), "T | N | stale").unwrap();

        let mut done = Task::todo("eat");
        done.mark_done();
        storage
            .rewrite_all(&[done, Task::event("book club", date("2024-06-01"))])
            .unwrap();

        assert_eq!(
            read_file(&storage),
            "T | Y | eat\nE | N | book club | 2024-06-01"
        );
    }

    #[test]
    fn rewrite_all_with_no_tasks_empties_the_file() {
        let temp = TempDir::new().unwrap();
        let storage = storage_in(&temp, CorruptPolicy::Fail);
        fs::write(storage.path(), "T | N | stale").unwrap();

        storage.rewrite_all(&[]).unwrap();
        assert_eq!(read_file(&storage), "");
    }
}
