//! Command-line interface for dodo
//!
//! The binary takes only startup flags; task commands are read
//! interactively from standard input once the session starts.

use std::io;
use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;
use crate::session::Session;
use crate::storage::Storage;
use crate::store::TaskStore;

/// dodo - a line-oriented task keeper
///
/// Reads imperative commands (todo, deadline, event, list, done, delete,
/// find, bye) from standard input and mirrors the task list onto a flat
/// text file.
#[derive(Parser, Debug)]
#[command(name = "dodo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backing file for the task list (overrides configuration)
    #[arg(short, long, env = "DODO_FILE")]
    pub file: Option<PathBuf>,

    /// Path to a configuration file (defaults to ./.dodo.toml)
    #[arg(long, env = "DODO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit one JSON envelope per response instead of the transcript
    #[arg(long)]
    pub json: bool,

    /// Suppress conversational output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Load configuration, restore the task list, and run the session.
    pub fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_from_dir(&std::env::current_dir()?)?,
        };

        let path = self.file.unwrap_or(config.storage.path);
        let storage = Storage::new(path, config.load.on_corrupt);
        let store = TaskStore::from_tasks(storage.load()?);

        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        let stdin = io::stdin();
        Session::new(store, storage, options).run(stdin.lock())
    }
}
