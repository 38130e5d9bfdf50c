use std::collections::HashMap;
use std::path::PathBuf;

use mbl_device::{classify, Device};

use crate::board::{Board, SourceOrigin};
use crate::error::ParseError;
use crate::grid::Grid;
use crate::lexer::tokenize_row;
use crate::source::SourceLine;

fn is_hex_digit_upper(c: char) -> bool {
    c.is_ascii_digit() || ('A'..='F').contains(&c)
}

fn is_marble_cell(cell: &str) -> Option<u8> {
    let mut chars = cell.chars();
    let d0 = chars.next()?;
    let d1 = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if is_hex_digit_upper(d0) && is_hex_digit_upper(d1) {
        u8::from_str_radix(cell, 16).ok()
    } else {
        None
    }
}

/// Parse the lines belonging to a single board into a [`Board`] template.
/// `call_sites` is left empty; the function resolver populates it once
/// every board in the registry has been parsed.
pub fn parse_board(name: &str, lines: &[SourceLine]) -> Result<Board, ParseError> {
    let rows: Vec<Vec<String>> = lines.iter().map(|l| tokenize_row(&l.text)).collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let height = rows.len();

    let mut devices = Grid::filled(width, height, None);
    let mut initial_marbles = Grid::filled(width, height, None);
    let mut device_text: Grid<Option<String>> = Grid::filled(width, height, None);
    let mut inputs: HashMap<u8, Vec<(usize, usize)>> = HashMap::new();
    let mut outputs: HashMap<mbl_device::PortKind, Vec<(usize, usize)>> = HashMap::new();

    for (y, row) in rows.iter().enumerate() {
        for x in 0..width {
            let cell_text = row.get(x).cloned().unwrap_or_else(|| "  ".to_string());
            if let Some(value) = is_marble_cell(&cell_text) {
                initial_marbles.set(y, x, Some(value));
                continue;
            }
            device_text.set(y, x, Some(cell_text.clone()));
            let device = classify(&cell_text);
            if let Some(d) = device {
                match d {
                    Device::InputPort(n) => inputs.entry(n).or_default().push((y, x)),
                    Device::OutputPort(kind) => outputs.entry(kind).or_default().push((y, x)),
                    _ => {}
                }
            }
            devices.set(y, x, device);
        }
    }

    let mut function_width = 1usize;
    if let Some(max_input) = inputs.keys().max() {
        function_width = function_width.max(*max_input as usize + 1);
    }
    let max_output = outputs
        .keys()
        .filter_map(|kind| match kind {
            mbl_device::PortKind::Indexed(n) => Some(*n as usize),
            _ => None,
        })
        .max();
    if let Some(max_output) = max_output {
        function_width = function_width.max(max_output + 1);
    }

    if name != "MB" {
        let name_len = name.chars().count();
        let wide = 2 * function_width;
        if name_len == 0 || wide % name_len != 0 {
            return Err(ParseError::NameWidthMismatch {
                name: name.to_string(),
                name_len,
                function_width,
                wide,
            });
        }
    }

    let source_origin = lines
        .first()
        .map(|l| SourceOrigin {
            file: l.origin.clone(),
            line: l.line_no,
        })
        .unwrap_or(SourceOrigin {
            file: PathBuf::new(),
            line: 0,
        });

    Ok(Board {
        name: name.to_string(),
        width,
        height,
        devices,
        initial_marbles,
        device_text,
        inputs,
        outputs,
        function_width,
        call_sites: Vec::new(),
        source_origin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceLine;
    use std::path::PathBuf;

    fn lines(texts: &[&str]) -> Vec<SourceLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| SourceLine::new(PathBuf::from("t.mbl"), i + 1, *t))
            .collect()
    }

    #[test]
    fn single_marble_board() {
        let board = parse_board("MB", &lines(&["42"])).unwrap();
        assert_eq!(board.width, 1);
        assert_eq!(board.height, 1);
        assert_eq!(*board.initial_marbles.get(0, 0), Some(0x42));
    }

    #[test]
    fn input_and_output_ports_registered() {
        let board = parse_board("MB", &lines(&["}0", "=5", "{0"])).unwrap();
        assert_eq!(board.inputs.get(&0), Some(&vec![(0, 0)]));
        assert_eq!(
            board.outputs.get(&mbl_device::PortKind::Indexed(0)),
            Some(&vec![(2, 0)])
        );
        assert_eq!(board.function_width, 1);
    }

    #[test]
    fn name_width_mismatch_is_rejected() {
        // function_width 1 -> wide name columns = 2; "FOO" (3 chars) does not divide 2.
        let err = parse_board("FOO", &lines(&["}0"])).unwrap_err();
        assert!(matches!(err, ParseError::NameWidthMismatch { .. }));
    }

    #[test]
    fn name_width_ok_when_divisor() {
        // function_width 1 -> wide columns = 2; "FN" (2 chars) divides evenly.
        let board = parse_board("FN", &lines(&["}0"])).unwrap();
        assert_eq!(board.name, "FN");
    }

    #[test]
    fn short_rows_pad_with_pass_through() {
        let board = parse_board("MB", &lines(&["}0}1", "&0"])).unwrap();
        assert_eq!(board.width, 2);
        assert_eq!(*board.devices.get(1, 1), Some(Device::Pass));
    }
}
