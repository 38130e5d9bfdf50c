//! File loading and `#include` resolution (§4.1's ambient loader). Turns a
//! main board path into a flat sequence of [`SourceLine`]s the parser can
//! consume, inlining `#include <path>` directives recursively and
//! rejecting include cycles.

use std::path::{Path, PathBuf};

use mbl_board::SourceLine;

use crate::error::CliError;

/// Load `path` and every file it transitively `#include`s into one flat
/// line stream, in inclusion order. Whole-line comments (`#...` that are
/// not `#include`) are dropped here; row-level `#` comments remain for the
/// parser's lexer to strip (§4.1).
pub fn load_lines(path: &Path) -> Result<Vec<SourceLine>, CliError> {
    let mut visited = Vec::new();
    load_file(path, &mut visited)
}

fn load_file(path: &Path, visited: &mut Vec<PathBuf>) -> Result<Vec<SourceLine>, CliError> {
    let canonical = path.canonicalize().map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if visited.contains(&canonical) {
        return Err(CliError::IncludeCycle {
            path: path.to_path_buf(),
        });
    }
    visited.push(canonical);

    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let mut lines = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim_start();
        if let Some(rest) = trimmed.strip_prefix("#include") {
            let include_path = rest.trim().trim_matches(|c| c == '<' || c == '>' || c == '"');
            if include_path.is_empty() {
                return Err(CliError::EmptyInclude {
                    file: path.to_path_buf(),
                    line: line_no,
                });
            }
            let included = load_file(&dir.join(include_path), visited)?;
            lines.extend(included);
        } else if trimmed.starts_with('#') {
            // A plain comment line; dropped before the parser ever sees it.
        } else {
            lines.push(SourceLine::new(path.to_path_buf(), line_no, raw));
        }
    }

    visited.pop();
    Ok(lines)
}
