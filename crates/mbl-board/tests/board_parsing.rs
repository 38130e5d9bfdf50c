use std::path::PathBuf;

use mbl_board::{split_boards, BoardRegistry, Device, PortKind, SourceLine};

fn source(lines: &[&str]) -> Vec<SourceLine> {
    lines
        .iter()
        .enumerate()
        .map(|(i, t)| SourceLine::new(PathBuf::from("main.mbl"), i + 1, *t))
        .collect()
}

#[test]
fn split_and_register_two_boards() {
    let lines = source(&["42", ":FN", "}0", "++", "{0"]);
    let groups = split_boards(&lines);
    let registry = BoardRegistry::from_grouped(groups).unwrap();

    let mb = registry.get("MB").unwrap();
    assert_eq!(mb.width, 1);
    assert_eq!(mb.height, 1);
    assert_eq!(*mb.initial_marbles.get(0, 0), Some(0x42));

    let fn_board = registry.get("FN").unwrap();
    assert_eq!(fn_board.height, 3);
    assert_eq!(fn_board.inputs.get(&0), Some(&vec![(0, 0)]));
    assert_eq!(
        fn_board.outputs.get(&PortKind::Indexed(0)),
        Some(&vec![(2, 0)])
    );
}

#[test]
fn comment_only_source_is_a_valid_empty_board() {
    let lines = source(&["# just a comment"]);
    let groups = split_boards(&lines);
    let registry = BoardRegistry::from_grouped(groups).unwrap();
    let mb = registry.get("MB").unwrap();
    assert_eq!(mb.height, 1);
    // the whole row is a comment, so it tokenizes to zero cells, leaving
    // the board with width 0.
    assert_eq!(mb.width, 0);
}

#[test]
fn branch_board_devices_classified() {
    let lines = source(&["}0", "=5", "{0"]);
    let groups = split_boards(&lines);
    let registry = BoardRegistry::from_grouped(groups).unwrap();
    let mb = registry.get("MB").unwrap();
    assert_eq!(*mb.devices.get(0, 0), Some(Device::InputPort(0)));
    assert_eq!(*mb.devices.get(1, 0), Some(Device::CompareEq(5)));
    assert_eq!(
        *mb.devices.get(2, 0),
        Some(Device::OutputPort(PortKind::Indexed(0)))
    );
}
