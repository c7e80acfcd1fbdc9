//! Error type of the encoder.
//!
//! Every failure is terminal for the current call. The variants are grouped
//! into three kinds, see [ErrorKind].
use thiserror::Error;

/// Classification of an [EncodeError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested symbol layout can not be built.
    Configuration,
    /// The input does not fit into the symbol.
    DataOverflow,
    /// An internal consistency check failed. This indicates a layout bug.
    InvariantViolation,
}

/// The error type returned by all encoding operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    // ============ Configuration ============
    /// Only versions 1 to 6 are supported.
    #[error("version {0} is not supported (must be 1..=6)")]
    UnsupportedVersion(u8),

    /// Mask ids range from 0 to 7.
    #[error("mask id {0} is out of range (must be 0..=7)")]
    UnsupportedMask(u8),

    /// No generator polynomial is tabulated for this number of error codewords.
    #[error("no generator polynomial for {0} error correction codewords per block")]
    UnsupportedEcCount(usize),

    /// Two grids of different side length were combined.
    #[error("grid size mismatch: this {this}, other {other}")]
    SizeMismatch {
        /// Side length of the grid being modified.
        this: usize,
        /// Side length of the grid passed in.
        other: usize,
    },

    /// The error codewords can not be distributed evenly over the blocks.
    #[error("{ec_codewords} error correction codewords can not be split evenly over {blocks} blocks")]
    UnevenBlocks {
        /// Total number of error correction codewords.
        ec_codewords: usize,
        /// Number of Reed-Solomon blocks.
        blocks: usize,
    },

    /// The block layout has no blocks, or a block without data codewords.
    #[error("block layout is empty or contains an empty block")]
    EmptyLayout,

    /// The data codewords do not match the block layout.
    #[error("block layout holds {expected} data codewords, got {actual}")]
    LayoutMismatch {
        /// Sum of the data codewords in the layout.
        expected: usize,
        /// Number of data codewords supplied.
        actual: usize,
    },

    /// A tile placed onto a grid does not fit.
    #[error("tile of {height}x{width} at ({row}, {col}) does not fit into a grid of size {size}")]
    TileOutOfBounds {
        /// Resolved top row.
        row: isize,
        /// Resolved left column.
        col: isize,
        /// Tile height.
        height: usize,
        /// Tile width.
        width: usize,
        /// Grid side length.
        size: usize,
    },

    /// The bitstream needs more modules than the symbol has left.
    #[error("symbol has {available} free modules, {needed} needed")]
    SymbolTooSmall {
        /// Vacant modules after drawing the fixed patterns.
        available: usize,
        /// Bits in the interleaved stream.
        needed: usize,
    },

    // ============ Data overflow ============
    /// The character count field of byte mode has 8 bits.
    #[error("text of {0} characters exceeds the 255 character count field")]
    TextTooLong(usize),

    /// The encoded bitstream is larger than the data capacity.
    #[error("bitstream of {bits} bits exceeds the capacity of {capacity} codewords")]
    CapacityExceeded {
        /// Length of the bitstream.
        bits: usize,
        /// Data capacity in codewords.
        capacity: usize,
    },

    // ============ Invariant violations ============
    /// The placement tried to write onto a reserved or already written module.
    #[error("module ({row}, {col}) is already occupied")]
    OccupiedModule {
        /// Row of the module.
        row: usize,
        /// Column of the module.
        col: usize,
    },

    /// Both grids of a merge define the module.
    #[error("module collision at ({row}, {col})")]
    Collision {
        /// Row of the module.
        row: usize,
        /// Column of the module.
        col: usize,
    },

    /// Both grids of a merge leave the module unset, but empties were not allowed.
    #[error("both grids are unset at ({row}, {col})")]
    BothUnset {
        /// Row of the module.
        row: usize,
        /// Column of the module.
        col: usize,
    },

    /// The final symbol still contains an unset module.
    #[error("module ({row}, {col}) was left unset")]
    UnsetModule {
        /// Row of the module.
        row: usize,
        /// Column of the module.
        col: usize,
    },

    /// The placement walked out of the grid.
    #[error("placement left the grid at ({row}, {col})")]
    OutOfBounds {
        /// Row outside of the grid, or the row the search stopped at.
        row: isize,
        /// Column of the walk, negative once all columns are used up.
        col: isize,
    },

    /// The logarithm of zero is not defined in GF(256).
    #[error("logarithm of zero in GF(256)")]
    LogOfZero,
}

impl EncodeError {
    /// Get the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedVersion(_)
            | Self::UnsupportedMask(_)
            | Self::UnsupportedEcCount(_)
            | Self::SizeMismatch { .. }
            | Self::UnevenBlocks { .. }
            | Self::EmptyLayout
            | Self::LayoutMismatch { .. }
            | Self::TileOutOfBounds { .. }
            | Self::SymbolTooSmall { .. } => ErrorKind::Configuration,
            Self::TextTooLong(_) | Self::CapacityExceeded { .. } => ErrorKind::DataOverflow,
            Self::OccupiedModule { .. }
            | Self::Collision { .. }
            | Self::BothUnset { .. }
            | Self::UnsetModule { .. }
            | Self::OutOfBounds { .. }
            | Self::LogOfZero => ErrorKind::InvariantViolation,
        }
    }
}

#[test]
fn test_kinds() {
    assert_eq!(EncodeError::UnsupportedVersion(7).kind(), ErrorKind::Configuration);
    assert_eq!(EncodeError::TextTooLong(300).kind(), ErrorKind::DataOverflow);
    assert_eq!(
        EncodeError::Collision { row: 0, col: 0 }.kind(),
        ErrorKind::InvariantViolation
    );
}

#[test]
fn test_messages() {
    assert_eq!(
        EncodeError::UnevenBlocks {
            ec_codewords: 15,
            blocks: 2
        }
        .to_string(),
        "15 error correction codewords can not be split evenly over 2 blocks"
    );
    assert_eq!(
        EncodeError::BothUnset { row: 3, col: 4 }.to_string(),
        "both grids are unset at (3, 4)"
    );
}
