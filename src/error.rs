use std::{error, fmt};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the crate. The buffer and dimension variants are
/// contract violations: they indicate caller bugs and are meant to be caught
/// at integration boundaries, not recovered from mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grid dimensions the packed layout cannot represent.
    BadDimensions { cols: usize, rows: usize },
    /// `advance` was called with buffers of different layouts.
    GridMismatch,
    /// A pattern stamp does not fit inside the target grid.
    PatternOverflow {
        pattern: (usize, usize),
        grid: (usize, usize),
    },
    /// Unexpected byte in RLE pattern data.
    BadRle { offset: usize, byte: u8 },
    /// RLE pattern data ended before the pattern was complete.
    TruncatedRle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BadDimensions { cols, rows } => write!(
                f,
                "unsupported grid of {cols}x{rows} cells: width must be a positive multiple of 64 and height positive"
            ),
            Error::GridMismatch => {
                write!(f, "source and destination buffers have different layouts")
            }
            Error::PatternOverflow {
                pattern: (pw, ph),
                grid: (gw, gh),
            } => write!(f, "{pw}x{ph} pattern does not fit a {gw}x{gh} grid"),
            Error::BadRle { offset, byte } => {
                write!(f, "unexpected byte {byte:#04x} at offset {offset} in RLE data")
            }
            Error::TruncatedRle => write!(f, "RLE data ended before the pattern was complete"),
        }
    }
}

impl error::Error for Error {}
