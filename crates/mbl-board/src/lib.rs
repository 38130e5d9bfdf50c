//! Board lexical grammar, grid construction, and the template registry.
//!
//! This crate turns textual boards into immutable [`Board`] templates. It
//! knows nothing about ticking a board or calling one board from another —
//! that belongs to `mbl-engine`, which consumes the templates this crate
//! produces.

mod board;
mod error;
mod grid;
mod lexer;
mod parser;
mod registry;
mod source;

pub use board::{Board, CallSite, SourceOrigin};
pub use error::ParseError;
pub use grid::Grid;
pub use lexer::tokenize_row;
pub use parser::parse_board;
pub use registry::BoardRegistry;
pub use source::{split_boards, SourceLine};

// Re-exported so downstream crates can name device types without a direct
// `mbl-device` dependency declaration.
pub use mbl_device::{base36_char, base36_digit, classify, Device, PortKind};
