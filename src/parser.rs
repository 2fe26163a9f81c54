//! Command and task parsing.
//!
//! Translates raw command lines into typed commands and validated tasks.
//! Parsing is side-effect free: nothing here touches the store or the
//! backing file.

use chrono::NaiveDate;

use crate::date;
use crate::error::{Error, Result};
use crate::task::{Task, TaskType};

/// A parsed command line: keyword plus still-raw argument text.
///
/// Index and task arguments stay unvalidated here because their checks
/// need context (store size) or belong to `parse_add`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(TaskType, String),
    List,
    Done(String),
    Delete(String),
    Find(String),
    Bye,
}

impl Command {
    /// Split an input line into a keyword and argument text.
    ///
    /// Keywords are matched case-insensitively; anything unknown is
    /// `Error::UnrecognizedCommand`.
    pub fn parse(line: &str) -> Result<Command> {
        let trimmed = line.trim();
        let (keyword, rest) = match trimmed.split_once(' ') {
            Some((keyword, rest)) => (keyword, rest),
            None => (trimmed, ""),
        };

        match keyword.to_ascii_lowercase().as_str() {
            "todo" => Ok(Command::Add(TaskType::Todo, rest.to_string())),
            "deadline" => Ok(Command::Add(TaskType::Deadline, rest.to_string())),
            "event" => Ok(Command::Add(TaskType::Event, rest.to_string())),
            "list" => Ok(Command::List),
            "done" => Ok(Command::Done(rest.to_string())),
            "delete" => Ok(Command::Delete(rest.to_string())),
            "find" => Ok(Command::Find(rest.to_string())),
            "bye" => Ok(Command::Bye),
            _ => Err(Error::UnrecognizedCommand(keyword.to_string())),
        }
    }
}

/// Turn the argument text of an add command into a validated task.
///
/// Deadline and event arguments split on their keyword separator
/// (`" /by "` / `" /at "`) or on a literal `|`, so persisted record
/// fields round-trip through the same path. Exactly two segments are
/// required.
pub fn parse_add(task_type: TaskType, raw_args: &str) -> Result<Task> {
    let raw = raw_args.trim();
    if raw.is_empty() {
        return Err(Error::EmptyDescription);
    }

    match task_type {
        TaskType::Todo => {
            // A pipe in the description would change the record's field
            // count on the next load.
            if raw.contains('|') {
                return Err(Error::MalformedTaskInput {
                    kind: task_type.noun(),
                    reason: "description cannot contain '|'".to_string(),
                });
            }
            Ok(Task::todo(raw))
        }
        TaskType::Deadline => {
            let (description, by) = split_timed(task_type, raw, " /by ")?;
            Ok(Task::deadline(description, by))
        }
        TaskType::Event => {
            let (description, at) = split_timed(task_type, raw, " /at ")?;
            Ok(Task::event(description, at))
        }
    }
}

/// Parse a 1-based task index against the current store size.
pub fn parse_index(raw: &str, bound: usize) -> Result<usize> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| Error::NotANumber(trimmed.to_string()))?;
    if value < 1 || value > bound as i64 {
        return Err(Error::IndexOutOfRange {
            index: value,
            size: bound,
        });
    }
    Ok(value as usize)
}

fn split_timed(
    task_type: TaskType,
    raw: &str,
    separator: &'static str,
) -> Result<(String, NaiveDate)> {
    let segments = split_segments(raw, separator);
    if segments.len() != 2 {
        return Err(Error::MalformedTaskInput {
            kind: task_type.noun(),
            reason: format!("expected \"<description>{separator}<date>\""),
        });
    }

    let description = segments[0].trim();
    if description.is_empty() {
        return Err(Error::EmptyDescription);
    }

    let date = date::parse(segments[1])?;
    Ok((description.to_string(), date))
}

/// Split on the keyword separator or on a literal `|`, whichever comes
/// first, repeatedly.
fn split_segments<'a>(raw: &'a str, separator: &str) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut rest = raw;
    loop {
        let split_at = match (rest.find(separator), rest.find('|')) {
            (Some(sep_at), Some(pipe_at)) if sep_at < pipe_at => Some((sep_at, separator.len())),
            (Some(sep_at), None) => Some((sep_at, separator.len())),
            (_, Some(pipe_at)) => Some((pipe_at, 1)),
            (None, None) => None,
        };
        match split_at {
            Some((at, width)) => {
                segments.push(&rest[..at]);
                rest = &rest[at + width..];
            }
            None => break,
        }
    }
    segments.push(rest);
    segments
}
