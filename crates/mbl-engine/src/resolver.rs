//! The function resolver: after every board template is parsed, find the
//! regions of each board's device grid that spell out another board's name
//! and record them as call sites.

use std::collections::HashMap;

use mbl_board::{Board, BoardRegistry, CallSite};

use crate::error::ResolveError;

/// Run the resolver over every board in `registry`, filling in each
/// board's `call_sites`. Idempotent: running it twice recomputes the same
/// result, since it only reads `devices`/`device_text`/`initial_marbles`.
pub fn resolve_all(registry: &mut BoardRegistry) -> Result<(), ResolveError> {
    let wide_names = build_wide_names(registry);
    let names: Vec<String> = registry.boards.keys().cloned().collect();
    for name in names {
        let mut board = registry
            .boards
            .remove(&name)
            .expect("name came from this registry's own key set");
        resolve_board(&mut board, &wide_names)?;
        registry.boards.insert(name, board);
    }
    Ok(())
}

/// Map from a board's name repeated to fill its function width (in
/// characters) back to the plain board name, for every board whose name
/// evenly divides its own wide-name width.
fn build_wide_names(registry: &BoardRegistry) -> HashMap<String, String> {
    let mut wide_names = HashMap::new();
    for board in registry.boards.values() {
        let name_len = board.name.chars().count();
        if name_len == 0 {
            continue;
        }
        let wide_width = 2 * board.function_width;
        if wide_width % name_len != 0 {
            continue;
        }
        let repeat = wide_width / name_len;
        if repeat == 0 {
            continue;
        }
        wide_names.insert(board.name.repeat(repeat), board.name.clone());
    }
    wide_names
}

fn resolve_board(board: &mut Board, wide_names: &HashMap<String, String>) -> Result<(), ResolveError> {
    let mut call_sites = Vec::new();
    for y in 0..board.height {
        let mut name_so_far = String::new();
        let mut start_col = 0usize;
        for x in 0..board.width {
            let is_marble = board.is_marble(y, x);
            let is_recognized_device = board.devices.get(y, x).is_some();
            if name_so_far.is_empty() {
                if is_marble || is_recognized_device {
                    continue;
                }
                start_col = x;
            }
            let text = match board.device_text.get(y, x) {
                Some(text) => text.clone(),
                None => {
                    return Err(ResolveError::UnresolvedCallSite {
                        board: board.name.clone(),
                        row: y,
                        tail: name_so_far,
                    });
                }
            };
            name_so_far.push_str(&text);
            if let Some(callee) = wide_names.get(&name_so_far) {
                call_sites.push(CallSite {
                    row: y,
                    col: start_col,
                    callee: callee.clone(),
                });
                name_so_far.clear();
            }
        }
        if !name_so_far.is_empty() {
            return Err(ResolveError::UnresolvedCallSite {
                board: board.name.clone(),
                row: y,
                tail: name_so_far,
            });
        }
    }
    board.call_sites = call_sites;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbl_board::{split_boards, SourceLine};
    use std::path::PathBuf;

    fn registry(lines: &[&str]) -> BoardRegistry {
        let source: Vec<SourceLine> = lines
            .iter()
            .enumerate()
            .map(|(i, t)| SourceLine::new(PathBuf::from("t.mbl"), i + 1, *t))
            .collect();
        BoardRegistry::from_grouped(split_boards(&source)).unwrap()
    }

    #[test]
    fn finds_a_simple_call_site() {
        // FN is a 1-input/1-output board, so its wide name is just "FN" (one cell).
        let mut reg = registry(&["FN", ":FN", "}0", "++", "{0"]);
        resolve_all(&mut reg).unwrap();
        let mb = reg.get("MB").unwrap();
        assert_eq!(mb.call_sites.len(), 1);
        assert_eq!(mb.call_sites[0].callee, "FN");
        assert_eq!(mb.call_sites[0].col, 0);
        assert_eq!(mb.call_sites[0].row, 0);
    }

    #[test]
    fn finds_two_adjacent_call_sites() {
        let mut reg = registry(&["FNFN", ":FN", "}0", "++", "{0"]);
        resolve_all(&mut reg).unwrap();
        let mb = reg.get("MB").unwrap();
        assert_eq!(mb.call_sites.len(), 2);
        assert_eq!(mb.call_sites[0].col, 0);
        assert_eq!(mb.call_sites[1].col, 1);
    }

    #[test]
    fn unresolved_tail_is_an_error() {
        let mut reg = registry(&["ZZ", ":FN", "}0", "++", "{0"]);
        let err = resolve_all(&mut reg).unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvedCallSite { .. }));
    }

    #[test]
    fn board_with_no_call_sites_resolves_cleanly() {
        let mut reg = registry(&["42"]);
        resolve_all(&mut reg).unwrap();
        assert!(reg.get("MB").unwrap().call_sites.is_empty());
    }
}
