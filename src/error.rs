//! Error types for dodo
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad command, bad date, bad index)
//! - 3: Corrupt backing file
//! - 4: Operation failed (I/O, serialization)
//!
//! In-session errors are rendered and the command loop keeps going; only
//! startup failures terminate the process with these codes.

use thiserror::Error;

/// Exit codes for the dodo binary
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const CORRUPT_DATA: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for dodo operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("A description is required for this command")]
    EmptyDescription,

    #[error("Unrecognized command: {0:?}")]
    UnrecognizedCommand(String),

    #[error("Malformed {kind} input: {reason}")]
    MalformedTaskInput { kind: &'static str, reason: String },

    #[error("Invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Not a task number: {0:?}")]
    NotANumber(String),

    #[error("Task number {index} is out of range (the list has {size} tasks)")]
    IndexOutOfRange { index: i64, size: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Corrupt backing file (exit code 3)
    #[error("Corrupt record at line {line}: {reason}: {content:?}")]
    CorruptRecord {
        line: usize,
        reason: String,
        content: String,
    },

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::EmptyDescription
            | Error::UnrecognizedCommand(_)
            | Error::MalformedTaskInput { .. }
            | Error::InvalidDate(_)
            | Error::NotANumber(_)
            | Error::IndexOutOfRange { .. }
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Corrupt backing file
            Error::CorruptRecord { .. } => exit_codes::CORRUPT_DATA,

            // Operation failures
            Error::Io(_) | Error::TomlParse(_) | Error::Json(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for dodo operations
pub type Result<T> = std::result::Result<T, Error>;
