use thiserror::Error;

/// Fatal function-resolution failures, raised once after every board in a
/// registry has been parsed (see [`crate::resolver::resolve_all`]).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("board `{board}` row {row} ends with unresolved cells: `{tail}`")]
    UnresolvedCallSite {
        board: String,
        row: usize,
        tail: String,
    },
}
