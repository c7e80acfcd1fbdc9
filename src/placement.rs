//! Arrangement of bits in a QR Code symbol.
//!
//! The interleaved bit stream is written into the modules left vacant by the
//! fixed patterns. The walk starts in the lower right corner and moves
//! through pairs of columns, alternating upward and downward. Inside a pair
//! the right module is visited before the left one. Modules that are already
//! taken are skipped.
//!
//! The walk is expressed as a small state machine over the reference grid,
//! so it works for any layout of fixed patterns, not only the standard ones.
//! Column 6 needs no special treatment since the timing pattern fills it
//! completely.
use log::{debug, trace};

use crate::errorcode::Interleaved;
use crate::grid::{Module, ModuleGrid};
use crate::EncodeError;

/// Which module of the current column pair the cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Right,
    Left,
}

/// Position of the walk through the vacant modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    row: isize,
    col: isize,
    upward: bool,
    side: Side,
}

impl Cursor {
    fn start(size: usize) -> Self {
        let last = size as isize - 1;
        Self {
            row: last,
            col: last,
            upward: true,
            side: Side::Right,
        }
    }

    fn step(&self) -> isize {
        if self.upward {
            -1
        } else {
            1
        }
    }

    fn direction(&self) -> &'static str {
        if self.upward {
            "up"
        } else {
            "down"
        }
    }

    /// Move to the next vacant module of `reference`.
    fn advance(&mut self, reference: &ModuleGrid) -> Result<(), EncodeError> {
        match self.side {
            Side::Right => self.advance_from_right(reference),
            Side::Left => self.advance_from_left(reference),
        }
    }

    fn advance_from_right(&mut self, reference: &ModuleGrid) -> Result<(), EncodeError> {
        if reference.is_vacant(self.row, self.col - 1) {
            self.col -= 1;
            self.side = Side::Left;
            return Ok(());
        }
        // left neighbour taken, continue in the right column
        let n = reference.size() as isize;
        loop {
            self.row += self.step();
            if !(0..n).contains(&self.row) {
                return Err(EncodeError::OutOfBounds {
                    row: self.row,
                    col: self.col,
                });
            }
            if reference.is_vacant(self.row, self.col) {
                return Ok(());
            }
        }
    }

    fn advance_from_left(&mut self, reference: &ModuleGrid) -> Result<(), EncodeError> {
        let n = reference.size() as isize;
        let mut probe = self.row;
        loop {
            probe += self.step();
            if !(0..n).contains(&probe) {
                return self.next_column_pair(reference);
            }
            if reference.is_vacant(probe, self.col + 1) {
                self.row = probe;
                self.col += 1;
                self.side = Side::Right;
                return Ok(());
            }
            if reference.is_vacant(probe, self.col) {
                self.row = probe;
                return Ok(());
            }
        }
    }

    /// Column pair exhausted, find the entry of the next pair and turn around.
    fn next_column_pair(&mut self, reference: &ModuleGrid) -> Result<(), EncodeError> {
        let mut col = self.col - 1;
        let mut row = self.row;
        loop {
            if col < 0 {
                return Err(EncodeError::OutOfBounds { row, col });
            }
            if reference.is_vacant(row, col) {
                break;
            }
            row -= 1;
            if row < 0 {
                col -= 1;
                row = self.row;
            }
        }
        self.row = row;
        self.col = col;
        self.upward = !self.upward;
        self.side = Side::Right;
        trace!(
            "column pair exhausted, continuing {} at ({}, {})",
            self.direction(),
            row,
            col
        );
        Ok(())
    }
}

/// Place the bits into the vacant modules of `reference`.
///
/// Returns a new layer holding only the placed bits, dark for `true`.
/// The reference itself is not modified. Placing more bits than there are
/// vacant modules fails with [EncodeError::OutOfBounds].
pub fn place_bits(reference: &ModuleGrid, bits: &[bool]) -> Result<ModuleGrid, EncodeError> {
    walk(reference, bits, None)
}

/// Place an interleaved codeword stream, see [place_bits].
///
/// Additionally logs where the error correction part begins.
pub fn place_stream(reference: &ModuleGrid, stream: &Interleaved) -> Result<ModuleGrid, EncodeError> {
    walk(reference, stream.bits(), Some(stream.ec_start()))
}

fn walk(
    reference: &ModuleGrid,
    bits: &[bool],
    ec_start: Option<usize>,
) -> Result<ModuleGrid, EncodeError> {
    let mut layer = ModuleGrid::with_size(reference.size());
    let mut cursor = Cursor::start(reference.size());
    for (i, &bit) in bits.iter().enumerate() {
        if i > 0 {
            cursor.advance(reference)?;
        }
        if ec_start == Some(i) {
            debug!(
                "error correction starts at ({}, {}) going {}",
                cursor.row,
                cursor.col,
                cursor.direction()
            );
        }
        if !reference.is_vacant(cursor.row, cursor.col) {
            return Err(EncodeError::OccupiedModule {
                row: cursor.row as usize,
                col: cursor.col as usize,
            });
        }
        let (row, col) = (cursor.row as usize, cursor.col as usize);
        if !layer.get(row, col).is_unset() {
            return Err(EncodeError::OccupiedModule { row, col });
        }
        layer.set(row, col, Module::from_bit(bit));
    }
    Ok(layer)
}

/// Set all modules that neither `reference` nor `layer` set to dark.
///
/// This only happens if fewer bits than vacant modules were placed.
pub fn fill_vacancies(reference: &ModuleGrid, mut layer: ModuleGrid) -> Result<ModuleGrid, EncodeError> {
    if reference.size() != layer.size() {
        return Err(EncodeError::SizeMismatch {
            this: reference.size(),
            other: layer.size(),
        });
    }
    let size = layer.size();
    let mut filled = 0;
    for row in 0..size {
        for col in 0..size {
            if reference.get(row, col).is_unset() && layer.get(row, col).is_unset() {
                layer.set(row, col, Module::Dark);
                filled += 1;
            }
        }
    }
    if filled > 0 {
        debug!("{} vacant modules defaulted to dark", filled);
    }
    Ok(layer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatInfo;
    use crate::mask::MaskPattern;
    use crate::patterns::function_patterns;
    use crate::{EcLevel, Version};
    use pretty_assertions::assert_eq;

    fn reference(version: Version) -> ModuleGrid {
        let format = FormatInfo::new(EcLevel::Low, MaskPattern::Checkerboard);
        function_patterns(version, &format).unwrap()
    }

    /// Position of the single dark module after placing a one-hot stream.
    fn position_of(reference: &ModuleGrid, index: usize, len: usize) -> (usize, usize) {
        let mut bits = vec![false; len];
        bits[index] = true;
        let layer = place_bits(reference, &bits).unwrap();
        let n = layer.size();
        let dark: Vec<_> = (0..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .filter(|&(r, c)| layer.get(r, c).is_dark())
            .collect();
        assert_eq!(dark.len(), 1);
        dark[0]
    }

    #[test]
    fn test_full_coverage() {
        for version in enum_iterator::all::<Version>() {
            let reference = reference(version);
            let vacant = reference.count_unset();
            let bits: Vec<bool> = (0..vacant).map(|i| i % 3 == 0).collect();
            let layer = place_bits(&reference, &bits).unwrap();
            let n = reference.size();
            for row in 0..n {
                for col in 0..n {
                    assert_ne!(
                        reference.get(row, col).is_unset(),
                        layer.get(row, col).is_unset(),
                        "{:?} ({}, {})",
                        version,
                        row,
                        col
                    );
                }
            }
        }
    }

    #[test]
    fn test_order_version1() {
        let reference = reference(Version::V1);
        let expected = [
            (0, (20, 20)),
            (1, (20, 19)),
            (2, (19, 20)),
            (3, (19, 19)),
            (4, (18, 20)),
            (23, (9, 19)),
            // next column pair, going down
            (24, (9, 18)),
            (25, (9, 17)),
            (207, (12, 0)),
        ];
        for (index, position) in expected {
            assert_eq!(position_of(&reference, index, 208), position, "bit {}", index);
        }
    }

    #[test]
    fn test_too_many_bits() {
        let reference = reference(Version::V1);
        let bits = vec![true; 209];
        assert!(matches!(
            place_bits(&reference, &bits),
            Err(EncodeError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_occupied_start() {
        let mut reference = ModuleGrid::new(Version::V1);
        reference.set(20, 20, Module::Light);
        assert_eq!(
            place_bits(&reference, &[true]),
            Err(EncodeError::OccupiedModule { row: 20, col: 20 })
        );
        // nothing to place, nothing to check
        assert_eq!(place_bits(&reference, &[]), Ok(ModuleGrid::new(Version::V1)));
    }

    #[test]
    fn test_right_column_exhausted() {
        // only the start module is free, the walk runs up column 1
        let mut reference = ModuleGrid::with_size(2);
        reference.set(0, 0, Module::Light);
        reference.set(0, 1, Module::Light);
        reference.set(1, 0, Module::Dark);
        assert_eq!(
            place_bits(&reference, &[true, false]),
            Err(EncodeError::OutOfBounds { row: -1, col: 1 })
        );
    }

    #[test]
    fn test_small_grids_exhaustive() {
        // Every reserved subset of a 3x3 grid with more bits than vacant
        // modules. The walk fails on a taken start module or by leaving the
        // grid. It never returns to a module it already wrote.
        for reserved in 0u16..1 << 9 {
            let mut reference = ModuleGrid::with_size(3);
            for i in 0..9 {
                if reserved >> i & 1 == 1 {
                    reference.set(i / 3, i % 3, Module::Light);
                }
            }
            let result = place_bits(&reference, &[true; 9]);
            if reserved == 0 {
                assert!(result.is_ok());
            } else if reserved >> 8 & 1 == 1 {
                assert_eq!(result, Err(EncodeError::OccupiedModule { row: 2, col: 2 }));
            } else {
                assert!(
                    matches!(result, Err(EncodeError::OutOfBounds { .. })),
                    "reserved {:09b}: {:?}",
                    reserved,
                    result
                );
            }
        }
    }

    #[test]
    fn test_fill_vacancies() {
        let reference = reference(Version::V1);
        let layer = place_bits(&reference, &[false; 8]).unwrap();
        let filled = fill_vacancies(&reference, layer).unwrap();
        let n = filled.size();
        let light = (0..n)
            .flat_map(|r| (0..n).map(move |c| (r, c)))
            .filter(|&(r, c)| filled.get(r, c) == Module::Light)
            .count();
        assert_eq!(light, 8);
        assert_eq!(filled.count_unset(), n * n - 208);
        assert_eq!(filled.get(0, 0), Module::Unset);
        assert_eq!(filled.get(20, 20), Module::Light);
        assert_eq!(filled.get(9, 9), Module::Dark);

        let other = ModuleGrid::new(Version::V2);
        assert_eq!(
            fill_vacancies(&reference, other),
            Err(EncodeError::SizeMismatch { this: 21, other: 25 })
        );
    }
}
