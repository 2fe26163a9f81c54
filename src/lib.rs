//! dodo - Line-Oriented Task Keeper Library
//!
//! This library provides the core functionality for the dodo CLI tool:
//! a single-user task list driven by imperative commands and mirrored
//! onto a flat text file.
//!
//! # Core Concepts
//!
//! - **Tasks**: Todos, deadlines, and events with a completion flag
//! - **Task Store**: The ordered in-memory collection, 1-indexed at the
//!   command surface
//! - **Persistence**: One pipe-delimited record per line; every load
//!   re-sorts the records and rewrites the file
//! - **Parsing**: Commands, task arguments, indices, and strict
//!   `YYYY-MM-DD` dates, each with its own error kind
//!
//! # Module Organization
//!
//! - `cli`: Command-line entry point using clap
//! - `config`: Configuration loading from `.dodo.toml`
//! - `date`: Strict calendar-date parsing
//! - `error`: Error types and result aliases
//! - `output`: Transcript and JSON rendering
//! - `parser`: Command and task parsing
//! - `session`: The interactive command loop
//! - `storage`: Flat-file persistence adapter
//! - `store`: In-memory task collection
//! - `task`: The task model and its canonical order

pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod output;
pub mod parser;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{Error, Result};
