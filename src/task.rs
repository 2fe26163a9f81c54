//! Task model for dodo.
//!
//! A task is a trimmed, non-empty description plus a completion flag, in
//! one of three kinds: plain todos, deadlines (`by` date), and events
//! (`at` date). The backing file tags these `T`, `D`, and `E`.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::Serialize;

/// A single unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

/// Kind-specific payload of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    Todo,
    Deadline { by: NaiveDate },
    Event { at: NaiveDate },
}

/// Kind selector used before a payload exists (command keywords, file
/// type tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    Todo,
    Deadline,
    Event,
}

impl TaskType {
    /// Single-letter tag used in the backing file
    pub fn tag(self) -> char {
        match self {
            TaskType::Todo => 'T',
            TaskType::Deadline => 'D',
            TaskType::Event => 'E',
        }
    }

    /// Resolve a (trimmed) file type tag, case-insensitively
    pub fn from_tag(tag: &str) -> Option<TaskType> {
        match tag {
            "T" | "t" => Some(TaskType::Todo),
            "D" | "d" => Some(TaskType::Deadline),
            "E" | "e" => Some(TaskType::Event),
            _ => None,
        }
    }

    /// Command keyword for this kind, also used in error messages
    pub fn noun(self) -> &'static str {
        match self {
            TaskType::Todo => "todo",
            TaskType::Deadline => "deadline",
            TaskType::Event => "event",
        }
    }
}

impl Task {
    pub fn todo(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Todo,
        }
    }

    pub fn deadline(description: impl Into<String>, by: NaiveDate) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Deadline { by },
        }
    }

    pub fn event(description: impl Into<String>, at: NaiveDate) -> Self {
        Self {
            description: description.into(),
            done: false,
            kind: TaskKind::Event { at },
        }
    }

    pub fn task_type(&self) -> TaskType {
        match self.kind {
            TaskKind::Todo => TaskType::Todo,
            TaskKind::Deadline { .. } => TaskType::Deadline,
            TaskKind::Event { .. } => TaskType::Event,
        }
    }

    /// The date this task is anchored to, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self.kind {
            TaskKind::Todo => None,
            TaskKind::Deadline { by } => Some(by),
            TaskKind::Event { at } => Some(at),
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }
}

/// Canonical order for the store and the backing file: dated tasks first,
/// ascending by date; undated tasks after all dated ones. The sort is
/// stable, so ties keep insertion order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| match (left.date(), right.date()) {
        (Some(left_date), Some(right_date)) => left_date.cmp(&right_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
