//! Board-boundary splitting. Operates on an already-flattened line stream
//! (comments and `#include` directives already resolved by the file loader)
//! and groups lines by the `:name` markers that start a new board.

use std::path::PathBuf;

/// One line of source text, tagged with where it came from so parse errors
/// can point at a file and line number even after `#include` flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub origin: PathBuf,
    pub line_no: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(origin: PathBuf, line_no: usize, text: impl Into<String>) -> Self {
        Self {
            origin,
            line_no,
            text: text.into(),
        }
    }
}

/// Split a flat line stream into `(board_name, lines)` groups. Lines before
/// the first `:name` line belong to the implicit main board `MB`.
pub fn split_boards(lines: &[SourceLine]) -> Vec<(String, Vec<SourceLine>)> {
    let mut boards = Vec::new();
    let mut current_name = "MB".to_string();
    let mut current_lines = Vec::new();
    for line in lines {
        if let Some(name) = line.text.strip_prefix(':') {
            boards.push((current_name, std::mem::take(&mut current_lines)));
            current_name = name.trim_end().to_string();
        } else {
            current_lines.push(line.clone());
        }
    }
    boards.push((current_name, current_lines));
    boards
}
