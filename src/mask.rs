//! Data masking.
//!
//! Before the data modules are merged with the fixed patterns, one of eight
//! masks is XORed onto them to break up large areas of a single color and
//! shapes resembling the position markers. The fixed patterns are never masked.
//!
//! Picking the best mask by penalty scoring is not done here, the caller
//! chooses the mask.
use crate::grid::ModuleGrid;
use crate::EncodeError;

#[cfg(test)]
use enum_iterator::Sequence;

/// The eight mask patterns, discriminant is the mask id.
///
/// Each mask is a predicate over the module coordinates (row `i`, column `j`).
/// Modules for which it holds are inverted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum MaskPattern {
    /// (i + j) mod 2 = 0
    Checkerboard = 0,
    /// i mod 2 = 0
    HorizontalLines = 1,
    /// j mod 3 = 0
    VerticalLines = 2,
    /// (i + j) mod 3 = 0
    DiagonalLines = 3,
    /// (i / 2 + j / 3) mod 2 = 0
    LargeCheckerboard = 4,
    /// (i j) mod 2 + (i j) mod 3 = 0
    Fields = 5,
    /// ((i j) mod 2 + (i j) mod 3) mod 2 = 0
    Diamonds = 6,
    /// ((i j) mod 3 + (i + j) mod 2) mod 2 = 0
    Meadow = 7,
}

impl MaskPattern {
    /// Get the mask with the given id.
    pub fn new(id: u8) -> Result<Self, EncodeError> {
        if id > 7 {
            return Err(EncodeError::UnsupportedMask(id));
        }
        Ok(Self::from_bits(id))
    }

    /// Get the mask from its three bit id, higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Checkerboard,
            1 => Self::HorizontalLines,
            2 => Self::VerticalLines,
            3 => Self::DiagonalLines,
            4 => Self::LargeCheckerboard,
            5 => Self::Fields,
            6 => Self::Diamonds,
            _ => Self::Meadow,
        }
    }

    /// The three bit mask id.
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if the module at `(row, col)` is inverted by this mask.
    pub fn is_masked(&self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self {
            Self::Checkerboard => (i + j) % 2 == 0,
            Self::HorizontalLines => i % 2 == 0,
            Self::VerticalLines => j % 3 == 0,
            Self::DiagonalLines => (i + j) % 3 == 0,
            Self::LargeCheckerboard => (i / 2 + j / 3) % 2 == 0,
            Self::Fields => (i * j) % 2 + (i * j) % 3 == 0,
            Self::Diamonds => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            Self::Meadow => ((i * j) % 3 + (i + j) % 2) % 2 == 0,
        }
    }
}

/// Apply the mask to a data layer.
///
/// Every set module selected by the mask is inverted, unset modules stay
/// unset.
pub fn apply(mut layer: ModuleGrid, mask: MaskPattern) -> ModuleGrid {
    let size = layer.size();
    for row in 0..size {
        for col in 0..size {
            if mask.is_masked(row, col) {
                let module = layer.get(row, col);
                layer.set(row, col, module.flipped());
            }
        }
    }
    layer
}
