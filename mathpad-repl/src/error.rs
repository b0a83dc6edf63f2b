use mathpad_editor::node::ParseNodeIdError;
use std::io;
use thiserror::Error;

/// Errors that can occur while running a line of input.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown command `:{0}`; type `:help` for a list of commands")]
    UnknownCommand(String),

    #[error("`:{command}` needs {expected}")]
    MissingArgument { command: String, expected: &'static str },

    #[error(transparent)]
    BadNodeId(#[from] ParseNodeIdError),

    #[error("`{0}` is not a valid caret offset")]
    BadOffset(String),

    #[error("`{0}` is not bound to anything")]
    UnboundKey(char),

    #[error("`{0}` was ignored; set RUST_LOG=warn to see why")]
    Ignored(String),

    #[error("could not read `{path}`: {source}")]
    Io { path: String, source: io::Error },
}

impl Error {
    /// Report this [`Error`] to stderr.
    pub fn report_to_stderr(&self) {
        eprintln!("error: {}", self);
    }
}
