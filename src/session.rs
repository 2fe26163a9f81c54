//! Interactive command session.
//!
//! Reads one command per line and dispatches it against the task store,
//! mirroring every mutation onto the backing file. All validation lives
//! in the parser, store, and storage layers; this loop only routes data
//! and renders results.
//!
//! User errors are rendered and the loop keeps going; only a failed read
//! of the input stream ends the session early.

use std::io::BufRead;

use tracing::debug;

use crate::error::{Error, Result};
use crate::output::{self, OutputOptions};
use crate::parser::{self, Command};
use crate::storage::Storage;
use crate::store::TaskStore;

enum Flow {
    Continue,
    Quit,
}

/// One interactive run over a store and its backing file.
pub struct Session {
    store: TaskStore,
    storage: Storage,
    options: OutputOptions,
}

impl Session {
    pub fn new(store: TaskStore, storage: Storage, options: OutputOptions) -> Self {
        Self {
            store,
            storage,
            options,
        }
    }

    /// Run the command loop until `bye` or end of input.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        output::emit_greeting(self.options)?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match self.dispatch(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) => output::emit_command_error(self.options, &err)?,
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow> {
        let command = Command::parse(line)?;
        debug!(?command, "dispatch");

        match command {
            Command::Add(task_type, raw) => {
                let task = parser::parse_add(task_type, &raw)?;
                self.storage.append_task(&task)?;
                self.store.add(task.clone());
                output::emit_added(self.options, &task, self.store.len())?;
            }
            Command::List => {
                output::emit_list(self.options, self.store.all())?;
            }
            Command::Done(raw) => {
                let index = parser::parse_index(&raw, self.store.len())?;
                let task = self.store.mark_done_at(index);
                self.storage.rewrite_all(self.store.all())?;
                output::emit_done(self.options, index, &task)?;
            }
            Command::Delete(raw) => {
                let index = parser::parse_index(&raw, self.store.len())?;
                let task = self.store.delete_at(index);
                self.storage.rewrite_all(self.store.all())?;
                output::emit_deleted(self.options, index, &task, self.store.len())?;
            }
            Command::Find(raw) => {
                let keyword = raw.trim();
                if keyword.is_empty() {
                    return Err(Error::EmptyDescription);
                }
                output::emit_found(self.options, &self.store.find(keyword))?;
            }
            Command::Bye => {
                output::emit_farewell(self.options)?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    /// The store as left by the commands run so far.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}
