//! Fixed patterns: position markers, mini position marker, timing pattern
//! and format information.
//!
//! Together they form the base grid. Every module they leave unset is
//! available for data.
use flagset::{flags, FlagSet};

use crate::format::FormatInfo;
use crate::grid::{Module, ModuleGrid};
use crate::{EncodeError, Version};

const D: Module = Module::Dark;
const L: Module = Module::Light;

flags! {
    /// The fixed patterns of a symbol.
    pub enum Pattern: u8 {
        PositionMarkers = 0b0001,
        MiniMarker      = 0b0010,
        Timing          = 0b0100,
        FormatInfo      = 0b1000,
    }
}

impl Pattern {
    /// Get the patterns a symbol of the given version has.
    pub fn for_version(version: Version) -> FlagSet<Self> {
        let mut patterns = Pattern::PositionMarkers | Pattern::Timing | Pattern::FormatInfo;
        if version.has_mini_marker() {
            patterns |= Pattern::MiniMarker;
        }
        patterns
    }
}

/// Corner of a position marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    UpperLeft,
    UpperRight,
    LowerLeft,
}

impl Corner {
    /// Position of the marker tile, negative values count from the far edge.
    fn origin(&self) -> (isize, isize) {
        match self {
            Self::UpperLeft => (0, 0),
            Self::UpperRight => (0, -8),
            Self::LowerLeft => (-8, 0),
        }
    }
}

/// Get the 8x8 tile of a position marker.
///
/// The 7x7 marker of nested dark, light and dark squares is surrounded
/// by a light separator on the sides facing the symbol's inside.
fn position_marker(corner: Corner) -> [[Module; 8]; 8] {
    let mut tile = [[L; 8]; 8];
    let (dr, dc) = match corner {
        Corner::UpperLeft => (0, 0),
        Corner::UpperRight => (0, 1),
        Corner::LowerLeft => (1, 0),
    };
    for i in 0..7 {
        for j in 0..7 {
            // distance from the marker's center in the max-norm
            let ring = (i as isize - 3).abs().max((j as isize - 3).abs());
            tile[i + dr][j + dc] = Module::from_bit(ring != 2);
        }
    }
    tile
}

/// Get the 5x5 mini position marker.
fn mini_marker() -> [[Module; 5]; 5] {
    [
        [D, D, D, D, D],
        [D, L, L, L, D],
        [D, L, D, L, D],
        [D, L, L, L, D],
        [D, D, D, D, D],
    ]
}

/// Get the timing pattern as a layer.
///
/// Row 6 and column 6 alternate dark and light across the whole grid,
/// the parts crossing the position markers are covered later. The layer
/// also holds the single dark module at `(size - 8, 8)` the standard
/// requires.
fn timing_pattern(version: Version) -> ModuleGrid {
    let mut grid = ModuleGrid::new(version);
    let n = grid.size();
    for i in 0..n {
        grid.set(i, 6, Module::from_bit(i % 2 == 0));
        grid.set(6, i, Module::from_bit(i % 2 == 0));
    }
    grid.set(n - 8, 8, D);
    grid
}

/// Build the base grid with all fixed patterns for the version.
pub fn function_patterns(version: Version, format: &FormatInfo) -> Result<ModuleGrid, EncodeError> {
    function_patterns_with(version, format, Pattern::for_version(version))
}

/// Build a base grid with only the selected patterns.
///
/// The timing pattern is drawn first so the markers cover it, the format
/// information is merged last and must not collide with anything.
pub fn function_patterns_with(
    version: Version,
    format: &FormatInfo,
    patterns: FlagSet<Pattern>,
) -> Result<ModuleGrid, EncodeError> {
    let mut grid = ModuleGrid::new(version);
    if patterns.contains(Pattern::Timing) {
        grid.overwrite(&timing_pattern(version))?;
    }
    if patterns.contains(Pattern::PositionMarkers) {
        for corner in [Corner::UpperLeft, Corner::UpperRight, Corner::LowerLeft] {
            let (row, col) = corner.origin();
            grid.place(&position_marker(corner), row, col)?;
        }
    }
    if patterns.contains(Pattern::MiniMarker) {
        grid.place(&mini_marker(), -9, -9)?;
    }
    if patterns.contains(Pattern::FormatInfo) {
        grid.merge(&format.layer(version), true)?;
    }
    Ok(grid)
}
