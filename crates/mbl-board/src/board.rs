use std::collections::HashMap;
use std::path::PathBuf;

use mbl_device::{Device, PortKind};

use crate::grid::Grid;

/// A call site recorded by the function resolver: a region of a board's
/// device grid whose cells spell out another board's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub row: usize,
    pub col: usize,
    pub callee: String,
}

/// Where a board's source text came from, for diagnostics only — never
/// part of the language's runtime semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    pub file: PathBuf,
    pub line: usize,
}

/// An immutable board template, produced once by the parser and never
/// mutated after. Every function invocation clones a fresh [`crate::BoardInstance`]
/// from one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// The recognized device at each cell, or `None` for a cell that is
    /// either call-site name lettering (claimed by the resolver) or,
    /// failing that, trash.
    pub devices: Grid<Option<Device>>,
    pub initial_marbles: Grid<Option<u8>>,
    /// Raw two-character text for every non-marble cell; used by the
    /// function resolver to match call-site names and discarded otherwise.
    pub device_text: Grid<Option<String>>,
    pub inputs: HashMap<u8, Vec<(usize, usize)>>,
    pub outputs: HashMap<PortKind, Vec<(usize, usize)>>,
    pub function_width: usize,
    pub call_sites: Vec<CallSite>,
    pub source_origin: SourceOrigin,
}

impl Board {
    pub fn is_marble(&self, row: usize, col: usize) -> bool {
        self.initial_marbles.get(row, col).is_some()
    }

    /// Every declared output port index, in ascending order, excluding the
    /// reserved left/right-return ports.
    pub fn indexed_output_ports(&self) -> Vec<u8> {
        let mut ports: Vec<u8> = self
            .outputs
            .keys()
            .filter_map(|kind| match kind {
                PortKind::Indexed(n) => Some(*n),
                _ => None,
            })
            .collect();
        ports.sort_unstable();
        ports
    }
}
