use std::path::PathBuf;

use thiserror::Error;

/// Everything that can make the binary exit with a non-zero status before
/// or instead of running a tick. Wrapped in `anyhow::Error` at the `main`
/// boundary, matching the reference project's mix of precise library
/// errors and a loose binary-level catch-all.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("include cycle detected: `{path}` includes itself, directly or transitively")]
    IncludeCycle { path: PathBuf },

    #[error("#include with no path on {file}:{line}")]
    EmptyInclude { file: PathBuf, line: usize },

    #[error(transparent)]
    Parse(#[from] mbl_board::ParseError),

    #[error(transparent)]
    Resolve(#[from] mbl_engine::ResolveError),

    #[error("board file has no main board named `MB`")]
    MissingMainBoard,

    #[error("{board} expects {expected} inputs, you gave {given}")]
    InputCountMismatch {
        board: String,
        expected: usize,
        given: usize,
    },
}
