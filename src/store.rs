//! In-memory task collection.
//!
//! Owns the ordered task list for one session. All external-facing
//! indices are 1-based; callers validate them with `parser::parse_index`
//! before reaching the mutating operations here.

use crate::task::{sort_tasks, Task};

/// Ordered collection of tasks, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Append a task; always succeeds.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove and return the task at a 1-based index.
    ///
    /// The index must already have passed `parse_index`; an out-of-range
    /// value here is a caller bug, not a recoverable error.
    pub fn delete_at(&mut self, index: usize) -> Task {
        debug_assert!(index >= 1 && index <= self.tasks.len());
        self.tasks.remove(index - 1)
    }

    /// Mark the task at a 1-based index as done and return a copy of it.
    ///
    /// Same index precondition as `delete_at`.
    pub fn mark_done_at(&mut self, index: usize) -> Task {
        debug_assert!(index >= 1 && index <= self.tasks.len());
        let task = &mut self.tasks[index - 1];
        task.mark_done();
        task.clone()
    }

    /// Tasks in canonical order; insertion order is left untouched.
    pub fn sorted_view(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        sort_tasks(&mut tasks);
        tasks
    }

    /// Tasks in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Case-insensitive substring search over descriptions, returning
    /// `(1-based index, task)` pairs in insertion order.
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        let needle = keyword.to_lowercase();
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.description.to_lowercase().contains(&needle))
            .map(|(at, task)| (at + 1, task))
            .collect()
    }
}
