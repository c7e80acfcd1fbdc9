//! Module grids.
//!
//! A symbol is built from several layers of [ModuleGrid]: one for the fixed
//! patterns, one for the format information, one for the data. Every module
//! starts out [Unset](Module::Unset). Layers are combined with
//! [place](ModuleGrid::place), [overwrite](ModuleGrid::overwrite) and
//! [merge](ModuleGrid::merge).
//!
//! The final output is a [Symbol], which has no unset modules left.
use crate::{EncodeError, Version};

/// A single module (the tiny squares of a QR Code).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Module {
    /// Not decided yet, must not remain in a finished symbol.
    #[default]
    Unset,
    Light,
    Dark,
}

impl Module {
    /// Dark for `true`, light for `false`.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::Unset
    }

    pub fn is_dark(&self) -> bool {
        *self == Self::Dark
    }

    /// Swap dark and light. An unset module stays unset.
    pub fn flipped(self) -> Self {
        match self {
            Self::Unset => Self::Unset,
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Square matrix of modules, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleGrid {
    /// Create a grid for the version with all modules unset.
    pub fn new(version: Version) -> Self {
        Self::with_size(version.size())
    }

    pub(crate) fn with_size(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unset; size * size],
        }
    }

    /// Side length in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the module in row `row` and column `col`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Module {
        self.modules[self.idx(row, col)]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, module: Module) {
        let idx = self.idx(row, col);
        self.modules[idx] = module;
    }

    /// Check if the position is inside the grid and unset.
    ///
    /// Positions outside of the grid are never vacant.
    pub fn is_vacant(&self, row: isize, col: isize) -> bool {
        let n = self.size as isize;
        (0..n).contains(&row)
            && (0..n).contains(&col)
            && self.get(row as usize, col as usize).is_unset()
    }

    /// Number of unset modules.
    pub fn count_unset(&self) -> usize {
        self.modules.iter().filter(|m| m.is_unset()).count()
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        assert!(row < self.size && col < self.size, "({}, {}) outside of grid", row, col);
        row * self.size + col
    }

    /// Copy a rectangular tile into the grid, replacing what was there.
    ///
    /// Negative positions count from the far edge, so `(-8, 0)` is the
    /// eighth row from the bottom.
    pub fn place<const W: usize>(
        &mut self,
        tile: &[[Module; W]],
        row: isize,
        col: isize,
    ) -> Result<(), EncodeError> {
        let n = self.size as isize;
        let row = if row < 0 { row + n } else { row };
        let col = if col < 0 { col + n } else { col };
        let height = tile.len();
        if row < 0 || col < 0 || row + height as isize > n || col + W as isize > n {
            return Err(EncodeError::TileOutOfBounds {
                row,
                col,
                height,
                width: W,
                size: self.size,
            });
        }
        for (i, tile_row) in tile.iter().enumerate() {
            let start = self.idx(row as usize + i, col as usize);
            self.modules[start..start + W].copy_from_slice(tile_row);
        }
        Ok(())
    }

    /// Take over all set modules of `other`.
    ///
    /// Where `other` is unset the current module is kept.
    pub fn overwrite(&mut self, other: &ModuleGrid) -> Result<(), EncodeError> {
        self.check_size(other)?;
        for (this, that) in self.modules.iter_mut().zip(&other.modules) {
            if !that.is_unset() {
                *this = *that;
            }
        }
        Ok(())
    }

    /// Fill the unset modules of this grid from `other`.
    ///
    /// Both grids setting the same module is a collision. If `allow_empties`
    /// is `false` it is also an error if both leave a module unset.
    ///
    /// On error the grid is left unchanged.
    pub fn merge(&mut self, other: &ModuleGrid, allow_empties: bool) -> Result<(), EncodeError> {
        self.check_size(other)?;
        let size = self.size;
        for (i, (this, that)) in self.modules.iter().zip(&other.modules).enumerate() {
            let (row, col) = (i / size, i % size);
            match (this.is_unset(), that.is_unset()) {
                (true, true) if !allow_empties => {
                    return Err(EncodeError::BothUnset { row, col });
                }
                (false, false) => return Err(EncodeError::Collision { row, col }),
                _ => {}
            }
        }
        for (this, that) in self.modules.iter_mut().zip(&other.modules) {
            if this.is_unset() {
                *this = *that;
            }
        }
        Ok(())
    }

    fn check_size(&self, other: &ModuleGrid) -> Result<(), EncodeError> {
        if self.size != other.size {
            return Err(EncodeError::SizeMismatch {
                this: self.size,
                other: other.size,
            });
        }
        Ok(())
    }

    /// Turn a fully resolved grid into a [Symbol].
    pub fn into_symbol(self) -> Result<Symbol, EncodeError> {
        let width = self.size;
        let bits = self
            .modules
            .iter()
            .enumerate()
            .map(|(i, m)| match m {
                Module::Unset => Err(EncodeError::UnsetModule {
                    row: i / width,
                    col: i % width,
                }),
                m => Ok(m.is_dark()),
            })
            .collect::<Result<Vec<bool>, _>>()?;
        Ok(Symbol { width, bits })
    }
}

/// A finished QR Code symbol.
///
/// Contains no quiet zone. When rendering, a light border of at least four
/// modules must be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    width: usize,
    bits: Vec<bool>,
}

impl Symbol {
    /// Return the width of the symbol (no quiet zone included).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Return the height of the symbol (no quiet zone included).
    pub fn height(&self) -> usize {
        self.bits.len() / self.width
    }

    /// Check if the module in row `row` and column `col` is dark.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the symbol.
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        assert!(
            row < self.height() && col < self.width,
            "({}, {}) outside of symbol",
            row,
            col
        );
        self.bits[row * self.width + col]
    }

    /// Iterate over the rows, `true` is dark.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.bits.chunks(self.width)
    }

    /// Get an iterator over the dark modules' coordinates `(x, y)`.
    ///
    /// The coordinate system is centered in the top left corner starting
    /// in `(0, 0)` with a horizontal x-axis and vertical y-axis.
    /// The modules are returned in order, incrementing x before y.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.width();
        self.bits
            .iter()
            .enumerate()
            .filter(|(_i, b)| **b)
            .map(move |(i, _b)| (i % w, i / w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const D: Module = Module::Dark;
    const L: Module = Module::Light;
    const U: Module = Module::Unset;

    #[test]
    fn test_place_negative() {
        let mut grid = ModuleGrid::new(Version::V1);
        grid.place(&[[D, L], [L, D]], -2, -2).unwrap();
        assert_eq!(grid.get(19, 19), D);
        assert_eq!(grid.get(19, 20), L);
        assert_eq!(grid.get(20, 19), L);
        assert_eq!(grid.get(20, 20), D);
        assert_eq!(grid.count_unset(), 21 * 21 - 4);

        // place replaces unconditionally, also with unset
        grid.place(&[[U]], 20, 20).unwrap();
        assert_eq!(grid.get(20, 20), U);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut grid = ModuleGrid::new(Version::V1);
        assert_eq!(
            grid.place(&[[D, D, D]], 0, 19),
            Err(EncodeError::TileOutOfBounds {
                row: 0,
                col: 19,
                height: 1,
                width: 3,
                size: 21
            })
        );
        assert!(grid.place(&[[D]], -22, 0).is_err());
    }

    #[test]
    fn test_overwrite() {
        let mut a = ModuleGrid::new(Version::V1);
        a.set(0, 0, D);
        a.set(0, 1, D);
        let mut b = ModuleGrid::new(Version::V1);
        b.set(0, 1, L);
        b.set(5, 5, D);
        a.overwrite(&b).unwrap();
        assert_eq!(a.get(0, 0), D);
        assert_eq!(a.get(0, 1), L);
        assert_eq!(a.get(5, 5), D);
        assert_eq!(a.get(1, 1), U);
    }

    #[test]
    fn test_merge() {
        let mut a = ModuleGrid::new(Version::V1);
        a.set(0, 0, D);
        let mut b = ModuleGrid::new(Version::V1);
        b.set(0, 1, L);
        a.merge(&b, true).unwrap();
        assert_eq!(a.get(0, 0), D);
        assert_eq!(a.get(0, 1), L);
    }

    #[test]
    fn test_merge_collision() {
        let mut a = ModuleGrid::new(Version::V1);
        a.set(3, 4, D);
        let mut b = ModuleGrid::new(Version::V1);
        b.set(0, 0, L);
        b.set(3, 4, D);
        let before = a.clone();
        assert_eq!(
            a.merge(&b, true),
            Err(EncodeError::Collision { row: 3, col: 4 })
        );
        // (0, 0) comes before the collision but is not taken over
        assert_eq!(a, before);
    }

    #[test]
    fn test_merge_both_unset() {
        let mut a = ModuleGrid::new(Version::V1);
        let mut b = ModuleGrid::new(Version::V1);
        a.set(0, 0, D);
        b.set(0, 1, D);
        let before = a.clone();
        assert_eq!(
            a.merge(&b, false),
            Err(EncodeError::BothUnset { row: 0, col: 2 })
        );
        assert_eq!(a, before);
    }

    #[test]
    fn test_size_mismatch() {
        let mut a = ModuleGrid::new(Version::V1);
        let b = ModuleGrid::new(Version::V2);
        assert_eq!(
            a.merge(&b, true),
            Err(EncodeError::SizeMismatch { this: 21, other: 25 })
        );
        assert_eq!(
            a.overwrite(&b),
            Err(EncodeError::SizeMismatch { this: 21, other: 25 })
        );
    }

    #[test]
    fn test_is_vacant() {
        let mut grid = ModuleGrid::new(Version::V1);
        grid.set(0, 0, L);
        assert!(!grid.is_vacant(0, 0));
        assert!(grid.is_vacant(0, 1));
        assert!(!grid.is_vacant(-1, 0));
        assert!(!grid.is_vacant(0, 21));
    }

    #[test]
    fn test_into_symbol() {
        let mut grid = ModuleGrid::with_size(2);
        grid.place(&[[D, L], [L, U]], 0, 0).unwrap();
        assert_eq!(
            grid.clone().into_symbol(),
            Err(EncodeError::UnsetModule { row: 1, col: 1 })
        );
        grid.set(1, 1, D);
        let symbol = grid.into_symbol().unwrap();
        assert_eq!(symbol.width(), 2);
        assert_eq!(symbol.height(), 2);
        assert!(symbol.is_dark(0, 0));
        assert!(!symbol.is_dark(0, 1));
        assert_eq!(symbol.pixels().collect::<Vec<_>>(), vec![(0, 0), (1, 1)]);
        assert_eq!(
            symbol.rows().collect::<Vec<_>>(),
            vec![&[true, false][..], &[false, true][..]]
        );
    }

    #[test]
    #[should_panic(expected = "(0, 2) outside of symbol")]
    fn test_symbol_column_out_of_range() {
        let mut grid = ModuleGrid::with_size(2);
        grid.place(&[[D, L], [L, D]], 0, 0).unwrap();
        let symbol = grid.into_symbol().unwrap();
        // would be (1, 0) with plain indexing
        symbol.is_dark(0, 2);
    }
}
