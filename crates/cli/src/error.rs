//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: animation error (unknown animation, tick failure, bad dimensions)
//! - 11: I/O error (file write, snapshot, seed file read)
//! - 12: input error (bad palette, bad JSON params, bad seed record)
//! - 13: serialization error

use backdrop_core::AnimationError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// An animation-level error (unknown animation, tick failure, bad dimensions).
    Animation(AnimationError),
    /// An I/O error (file write, snapshot, seed file read).
    Io(String),
    /// A user input error (bad palette name, bad JSON params, bad seed record).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Animation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Animation(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<AnimationError> for CliError {
    fn from(e: AnimationError) -> Self {
        match e {
            AnimationError::Io(msg) => CliError::Io(msg),
            other => CliError::Animation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
