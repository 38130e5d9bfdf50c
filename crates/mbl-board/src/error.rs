use thiserror::Error;

/// Fatal board-parse failures. These abort the process (exit 1) once they
/// bubble up to the binary; nothing past the parser tolerates them in-band.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "board `{name}` name is {name_len} columns wide but its function width ({function_width}) \
         (2 x {function_width} = {wide} columns) is not a multiple of the name width"
    )]
    NameWidthMismatch {
        name: String,
        name_len: usize,
        function_width: usize,
        wide: usize,
    },
}
