//! Shared output formatting for the interactive session.
//!
//! The core modules never print; everything user-visible funnels through
//! here so the session loop stays a thin dispatcher. Human output keeps
//! the conversational transcript; `--json` swaps it for one envelope per
//! response line.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{Task, TaskKind};

pub const SCHEMA_VERSION: &str = "dodo.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

/// One task line as shown in lists and confirmations.
pub fn format_task(task: &Task) -> String {
    let icon = if task.is_done() { 'x' } else { ' ' };
    match task.kind {
        TaskKind::Todo => format!("[T][{icon}] {}", task.description),
        TaskKind::Deadline { by } => format!("[D][{icon}] {} (by: {by})", task.description),
        TaskKind::Event { at } => format!("[E][{icon}] {} (at: {at})", task.description),
    }
}

pub fn emit_greeting(options: OutputOptions) -> Result<()> {
    if options.json || options.quiet {
        return Ok(());
    }
    println!("Hi there, I'm Dodo!");
    println!("How may I help you today?");
    Ok(())
}

pub fn emit_farewell(options: OutputOptions) -> Result<()> {
    if options.json || options.quiet {
        return Ok(());
    }
    println!("Stop procrastinating. See you!");
    Ok(())
}

pub fn emit_added(options: OutputOptions, task: &Task, total: usize) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Added<'a> {
            task: &'a Task,
            total: usize,
        }
        return emit_json("added", &Added { task, total });
    }
    if options.quiet {
        return Ok(());
    }

    println!("Gotcha. Added this to your list:");
    println!("{}", format_task(task));
    print_task_count(total);
    Ok(())
}

pub fn emit_list(options: OutputOptions, tasks: &[Task]) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Listed<'a> {
            tasks: &'a [Task],
        }
        return emit_json("list", &Listed { tasks });
    }

    if tasks.is_empty() {
        if !options.quiet {
            println!("You currently don't have any task. Start listing now!");
        }
        return Ok(());
    }

    if !options.quiet {
        println!("Stop procrastinating. Do it now!");
    }
    for (at, task) in tasks.iter().enumerate() {
        println!("{}. {}", at + 1, format_task(task));
    }
    Ok(())
}

pub fn emit_done(options: OutputOptions, index: usize, task: &Task) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct MarkedDone<'a> {
            index: usize,
            task: &'a Task,
        }
        return emit_json("done", &MarkedDone { index, task });
    }
    if options.quiet {
        return Ok(());
    }

    println!("Good job! One off your chest!");
    println!("{}", format_task(task));
    Ok(())
}

pub fn emit_deleted(options: OutputOptions, index: usize, task: &Task, total: usize) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Deleted<'a> {
            index: usize,
            task: &'a Task,
            total: usize,
        }
        return emit_json("deleted", &Deleted { index, task, total });
    }
    if options.quiet {
        return Ok(());
    }

    println!("Okay, I have removed this task for you:");
    println!("{}", format_task(task));
    print_task_count(total);
    Ok(())
}

pub fn emit_found(options: OutputOptions, matches: &[(usize, &Task)]) -> Result<()> {
    if options.json {
        #[derive(Serialize)]
        struct Match<'a> {
            index: usize,
            task: &'a Task,
        }
        #[derive(Serialize)]
        struct Found<'a> {
            matches: Vec<Match<'a>>,
        }
        let matches = matches
            .iter()
            .map(|&(index, task)| Match { index, task })
            .collect();
        return emit_json("found", &Found { matches });
    }

    if matches.is_empty() {
        if !options.quiet {
            println!("Sorry I can't find what you are looking for....");
        }
        return Ok(());
    }

    if !options.quiet {
        println!("Here are the matching tasks in your list:");
    }
    for (index, task) in matches {
        println!("{index}. {}", format_task(task));
    }
    Ok(())
}

/// Render an in-session error and keep the transcript going (stdout).
pub fn emit_command_error(options: OutputOptions, err: &Error) -> Result<()> {
    if options.json {
        return emit_json("error", &error_body(err));
    }

    println!("error: {err}");
    if let Some(hint) = error_hint(err) {
        println!("hint: {hint}");
    }
    Ok(())
}

/// Render a fatal startup error (stderr for humans, stdout for JSON).
pub fn emit_error(err: &Error, json: bool) -> Result<()> {
    if json {
        return emit_json("error", &error_body(err));
    }

    eprintln!("error: {err}");
    if let Some(hint) = error_hint(err) {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    kind: &'static str,
    code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

fn error_body(err: &Error) -> ErrorBody {
    ErrorBody {
        message: err.to_string(),
        kind: error_kind(err),
        code: err.exit_code(),
        hint: error_hint(err),
    }
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        2 => "user_error",
        3 => "corrupt_data",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::UnrecognizedCommand(_) => {
            Some("commands: todo, deadline, event, list, done, delete, find, bye")
        }
        Error::InvalidDate(_) => Some("dates look like 2024-03-15"),
        Error::NotANumber(_) | Error::IndexOutOfRange { .. } => {
            Some("use a task number shown by `list`")
        }
        Error::CorruptRecord { .. } => {
            Some("fix the file by hand, or set load.on_corrupt = \"skip\" in .dodo.toml")
        }
        _ => None,
    }
}

fn emit_json<T: Serialize>(event: &'static str, data: &T) -> Result<()> {
    #[derive(Serialize)]
    struct Envelope<'a, T: Serialize> {
        schema_version: &'static str,
        event: &'static str,
        data: &'a T,
    }

    let payload = Envelope {
        schema_version: SCHEMA_VERSION,
        event,
        data,
    };
    println!("{}", serde_json::to_string(&payload)?);
    Ok(())
}

fn print_task_count(total: usize) {
    let task_word = if total == 1 { "task" } else { "tasks" };
    println!("Now you got {total} {task_word} in your list!");
}
