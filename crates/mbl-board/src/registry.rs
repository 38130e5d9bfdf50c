use std::collections::HashMap;

use crate::board::Board;
use crate::error::ParseError;
use crate::parser::parse_board;
use crate::source::SourceLine;

/// The process-wide, read-only-after-construction store of board templates,
/// keyed by name. Populated once at startup; never mutated at runtime once
/// the function resolver has filled in `call_sites` for every board.
#[derive(Debug, Clone, Default)]
pub struct BoardRegistry {
    pub boards: HashMap<String, Board>,
}

impl BoardRegistry {
    /// Parse every `(name, lines)` group produced by
    /// [`crate::source::split_boards`] into a board template. Later groups
    /// with a name already seen overwrite earlier ones, matching the
    /// reference interpreter's "last `:name` wins" loading behavior.
    pub fn from_grouped(groups: Vec<(String, Vec<SourceLine>)>) -> Result<Self, ParseError> {
        let mut boards = HashMap::new();
        for (name, lines) in groups {
            let board = parse_board(&name, &lines)?;
            boards.insert(name, board);
        }
        Ok(Self { boards })
    }

    pub fn get(&self, name: &str) -> Option<&Board> {
        self.boards.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_multiple_boards() {
        let groups = vec![
            (
                "MB".to_string(),
                vec![SourceLine::new(PathBuf::from("t.mbl"), 1, "42")],
            ),
            (
                "FN".to_string(),
                vec![SourceLine::new(PathBuf::from("t.mbl"), 2, "}0")],
            ),
        ];
        let registry = BoardRegistry::from_grouped(groups).unwrap();
        assert!(registry.get("MB").is_some());
        assert!(registry.get("FN").is_some());
        assert!(registry.get("GHOST").is_none());
    }
}
