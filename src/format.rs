//! Format information.
//!
//! The error correction level and the mask id are stored twice in the
//! symbol as a 15 bit BCH codeword, see [bch](crate::errorcode::bch).
//! The positions of its bits are fixed by the standard and are not derived
//! from a formula, bit 0 being the most significant one:
//!
//! - bits 0 to 5 in row 8, columns 0 to 5, and mirrored (bit 14 - i) in
//!   column 8, rows 0 to 5;
//! - bit 14 - i in row 8, column size - 1 - i, and bit i in column 8,
//!   row size - 1 - i, for i from 0 to 6;
//! - bit 7 at (8, size - 8);
//! - bit 8 at (7, 8), bit 7 at (8, 8) and bit 6 at (8, 7).
use crate::errorcode::bch;
use crate::grid::{Module, ModuleGrid};
use crate::mask::MaskPattern;
use crate::{EcLevel, Version};

/// Number of bits in the format information.
pub const FORMAT_BITS: usize = 15;

/// XOR pattern of the five message bits, the top of [bch::FORMAT_MASK].
const PREFIX_MASK: u8 = (bch::FORMAT_MASK >> 10) as u8;

/// The masked 15 bit format codeword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo(u16);

impl FormatInfo {
    pub fn new(ec_level: EcLevel, mask: MaskPattern) -> Self {
        let message = (ec_level.bits() << 3) | mask.id();
        Self(bch::encode(message))
    }

    /// The codeword as an integer, bit 0 is the most significant of the 15.
    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Get bit `i` in transmission order.
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < FORMAT_BITS);
        (self.0 >> (FORMAT_BITS - 1 - i)) & 1 == 1
    }

    /// Recover level and mask from the first five format bits read off a symbol.
    ///
    /// `observed` holds the modules in transmission order, `true` for dark.
    /// No error correction is attempted.
    pub fn from_prefix(observed: [bool; 5]) -> (EcLevel, MaskPattern) {
        let bits = observed
            .iter()
            .fold(0u8, |acc, &b| (acc << 1) | b as u8)
            ^ PREFIX_MASK;
        (EcLevel::from_bits(bits >> 3), MaskPattern::from_bits(bits))
    }

    /// Get the positions `(row, col)` of all copies of the format bits.
    ///
    /// Every bit is written twice, bit 7 both times near the upper left
    /// marker. The dark module of the timing pattern is not included.
    pub fn positions(size: usize) -> Vec<((usize, usize), usize)> {
        let mut positions = Vec::with_capacity(2 * FORMAT_BITS);
        for i in 0..6 {
            // below and right of the upper left marker
            positions.push(((8, i), i));
            positions.push(((i, 8), 14 - i));
        }
        for i in 0..7 {
            // below the upper right marker
            positions.push(((8, size - 1 - i), 14 - i));
            // right of the lower left marker
            positions.push(((size - 1 - i, 8), i));
        }
        positions.push(((8, size - 8), 7));
        positions.push(((7, 8), 8));
        positions.push(((8, 8), 7));
        positions.push(((8, 7), 6));
        positions
    }

    /// Get a layer with only the format information set.
    pub fn layer(&self, version: Version) -> ModuleGrid {
        let mut grid = ModuleGrid::new(version);
        for ((row, col), i) in Self::positions(grid.size()) {
            grid.set(row, col, Module::from_bit(self.bit(i)));
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_published_words() {
        let info = FormatInfo::new(EcLevel::Low, MaskPattern::new(4).unwrap());
        assert_eq!(info.bits(), 0b110_0110_0010_1111);
        let info = FormatInfo::new(EcLevel::High, MaskPattern::new(1).unwrap());
        assert_eq!(info.bits(), 0b001_0011_1011_1110);
        assert!(!info.bit(0));
        assert!(!info.bit(1));
        assert!(info.bit(2));
        assert!(!info.bit(14));
    }

    #[test]
    fn test_prefix_round_trip() {
        for level in enum_iterator::all::<EcLevel>() {
            for mask in enum_iterator::all::<MaskPattern>() {
                let info = FormatInfo::new(level, mask);
                let prefix = [info.bit(0), info.bit(1), info.bit(2), info.bit(3), info.bit(4)];
                assert_eq!(FormatInfo::from_prefix(prefix), (level, mask));
            }
        }
    }

    #[test]
    fn test_prefix_all_light() {
        // 00000 ^ 10101: level 10 (HIGH), mask 101
        assert_eq!(
            FormatInfo::from_prefix([false; 5]),
            (EcLevel::High, MaskPattern::Fields)
        );
    }

    #[test]
    fn test_positions() {
        let positions = FormatInfo::positions(21);
        assert_eq!(positions.len(), 30);
        let mut cells: Vec<_> = positions.iter().map(|(p, _)| *p).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 30);
        for bit in 0..FORMAT_BITS {
            assert_eq!(positions.iter().filter(|(_, i)| *i == bit).count(), 2);
        }
    }

    #[test]
    fn test_layer() {
        let info = FormatInfo::new(EcLevel::Low, MaskPattern::Checkerboard);
        // 111011111000100
        let layer = info.layer(Version::V1);
        let row8: String = (0..21)
            .map(|j| match layer.get(8, j) {
                Module::Dark => '#',
                Module::Light => '.',
                Module::Unset => ' ',
            })
            .collect();
        assert_eq!(row8, "###.## ##    ##...#..");
        let col8: String = (0..21)
            .map(|i| match layer.get(i, 8) {
                Module::Dark => '#',
                Module::Light => '.',
                Module::Unset => ' ',
            })
            .collect();
        assert_eq!(col8, "..#... ##     ###.###");
        assert_eq!(layer.count_unset(), 21 * 21 - 30);
    }
}
