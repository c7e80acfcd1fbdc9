use core::fmt;

use crate::errorcode::generator;
use crate::mask::MaskPattern;
use crate::EncodeError;

#[cfg(test)]
use enum_iterator::Sequence;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// The symbol versions supported by the encoder.
///
/// A version n symbol is 17 + 4n modules wide and tall.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum Version {
    V1 = 1,
    V2 = 2,
    V3 = 3,
    V4 = 4,
    V5 = 5,
    V6 = 6,
}

impl Version {
    /// Get the version for its number.
    pub fn new(number: u8) -> Result<Self, EncodeError> {
        match number {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            5 => Ok(Self::V5),
            6 => Ok(Self::V6),
            n => Err(EncodeError::UnsupportedVersion(n)),
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Side length of the symbol in modules, no quiet zone included.
    pub fn size(&self) -> usize {
        17 + 4 * self.number() as usize
    }

    /// Versions 2 and up carry a mini position marker in the lower right.
    ///
    /// For versions above 6 more than one would be needed, which is why
    /// the encoder stops there.
    pub fn has_mini_marker(&self) -> bool {
        *self != Self::V1
    }

    /// Number of modules left for data after drawing the fixed patterns.
    ///
    /// This is the codeword count times 8 plus the remainder bits.
    pub fn data_modules(&self) -> usize {
        match self {
            Self::V1 => 208,
            Self::V2 => 359,
            Self::V3 => 567,
            Self::V4 => 807,
            Self::V5 => 1079,
            Self::V6 => 1383,
        }
    }
}

impl TryFrom<u8> for Version {
    type Error = EncodeError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

/// Error correction level.
///
/// The discriminants are the two bits stored in the format information.
/// They are not in order of strength.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(Sequence))]
pub enum EcLevel {
    /// Recovers about 7% of the codewords.
    Low = 1,
    /// Recovers about 15% of the codewords.
    Medium = 0,
    /// Recovers about 25% of the codewords.
    Quality = 3,
    /// Recovers about 30% of the codewords.
    High = 2,
}

impl EcLevel {
    /// The two bit code of the level.
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Get the level from its two bit code, higher bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Medium,
            1 => Self::Low,
            2 => Self::High,
            _ => Self::Quality,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::Quality => "QUALITY",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arrangement of the Reed-Solomon blocks.
///
/// The layout is an ordered list of groups `(data codewords, repeat count)`.
/// For example `[(15, 2), (16, 2)]` describes two blocks with 15 data
/// codewords followed by two blocks with 16 data codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    groups: Vec<(usize, usize)>,
}

impl BlockLayout {
    pub fn new<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Self {
            groups: groups.into_iter().collect(),
        }
    }

    /// Number of blocks, saturating at `usize::MAX`.
    pub fn num_blocks(&self) -> usize {
        self.groups
            .iter()
            .fold(0usize, |acc, &(_, repeat)| acc.saturating_add(repeat))
    }

    /// Total number of data codewords, the data capacity of the symbol.
    ///
    /// Saturates at `usize::MAX`, such a layout never fits a symbol.
    pub fn num_data_codewords(&self) -> usize {
        self.groups.iter().fold(0usize, |acc, &(size, repeat)| {
            acc.saturating_add(size.saturating_mul(repeat))
        })
    }

    /// Iterate over the number of data codewords of each block, in order.
    pub fn block_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups
            .iter()
            .flat_map(|&(size, repeat)| core::iter::repeat(size).take(repeat))
    }

    /// Number of error codewords per block for the given total.
    pub(crate) fn ecc_per_block(&self, ec_codewords: usize) -> Result<usize, EncodeError> {
        let blocks = self.num_blocks();
        let empty_block = self.groups.iter().any(|&(size, repeat)| size == 0 && repeat > 0);
        if blocks == 0 || empty_block {
            return Err(EncodeError::EmptyLayout);
        }
        if ec_codewords % blocks != 0 {
            return Err(EncodeError::UnevenBlocks {
                ec_codewords,
                blocks,
            });
        }
        Ok(ec_codewords / blocks)
    }
}

impl<const N: usize> From<[(usize, usize); N]> for BlockLayout {
    fn from(groups: [(usize, usize); N]) -> Self {
        Self::new(groups)
    }
}

/// Everything needed to lay out a symbol.
///
/// ## Example
///
/// ```rust
/// # use qrmatrix::{BlockLayout, EcLevel, MaskPattern, SymbolSpec, Version};
/// let spec = SymbolSpec::new(
///     Version::V2,
///     EcLevel::Low,
///     MaskPattern::new(7).unwrap(),
///     [(34, 1)],
///     10,
/// )
/// .unwrap();
/// assert_eq!(spec.data_capacity(), 34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSpec {
    version: Version,
    ec_level: EcLevel,
    mask: MaskPattern,
    blocks: BlockLayout,
    ec_codewords: usize,
}

impl SymbolSpec {
    /// Create a new setup.
    ///
    /// `ec_codewords` is the total number of error codewords. It is split
    /// evenly over the blocks and a generator polynomial must exist for the
    /// per block count. All codewords together must fit into the data
    /// modules of the version.
    pub fn new<L: Into<BlockLayout>>(
        version: Version,
        ec_level: EcLevel,
        mask: MaskPattern,
        blocks: L,
        ec_codewords: usize,
    ) -> Result<Self, EncodeError> {
        let blocks = blocks.into();
        let per_block = blocks.ecc_per_block(ec_codewords)?;
        generator(per_block)?;
        let available = version.data_modules();
        let needed = blocks
            .num_data_codewords()
            .saturating_add(ec_codewords)
            .saturating_mul(8);
        if needed > available {
            return Err(EncodeError::SymbolTooSmall { available, needed });
        }
        Ok(Self {
            version,
            ec_level,
            mask,
            blocks,
            ec_codewords,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    pub fn blocks(&self) -> &BlockLayout {
        &self.blocks
    }

    /// Total number of error codewords.
    pub fn ec_codewords(&self) -> usize {
        self.ec_codewords
    }

    /// Number of data codewords the symbol holds.
    pub fn data_capacity(&self) -> usize {
        self.blocks.num_data_codewords()
    }
}

#[test]
fn test_version_sizes() {
    let sizes: Vec<usize> = enum_iterator::all::<Version>().map(|v| v.size()).collect();
    assert_eq!(sizes, vec![21, 25, 29, 33, 37, 41]);
    for v in enum_iterator::all::<Version>() {
        assert_eq!(Version::new(v.number()), Ok(v));
        assert_eq!(v.has_mini_marker(), v.number() >= 2);
    }
    assert_eq!(Version::new(0), Err(EncodeError::UnsupportedVersion(0)));
    assert_eq!(Version::try_from(7), Err(EncodeError::UnsupportedVersion(7)));
}

#[test]
fn test_ec_level_codes() {
    assert_eq!(EcLevel::Low.bits(), 1);
    assert_eq!(EcLevel::Medium.bits(), 0);
    assert_eq!(EcLevel::Quality.bits(), 3);
    assert_eq!(EcLevel::High.bits(), 2);
    for level in enum_iterator::all::<EcLevel>() {
        assert_eq!(EcLevel::from_bits(level.bits()), level);
    }
    assert_eq!(EcLevel::Quality.to_string(), "QUALITY");
}

#[test]
fn test_block_layout() {
    let layout = BlockLayout::new([(15, 2), (16, 2)]);
    assert_eq!(layout.num_blocks(), 4);
    assert_eq!(layout.num_data_codewords(), 62);
    assert_eq!(layout.block_sizes().collect::<Vec<_>>(), vec![15, 15, 16, 16]);
    assert_eq!(layout.ecc_per_block(72), Ok(18));
    assert_eq!(
        layout.ecc_per_block(70),
        Err(EncodeError::UnevenBlocks {
            ec_codewords: 70,
            blocks: 4
        })
    );
    assert_eq!(
        BlockLayout::new(Vec::<(usize, usize)>::new()).ecc_per_block(10),
        Err(EncodeError::EmptyLayout)
    );
    assert_eq!(
        BlockLayout::new([(0, 1)]).ecc_per_block(10),
        Err(EncodeError::EmptyLayout)
    );
}

#[test]
fn test_symbol_spec_validation() {
    let mask = MaskPattern::new(0).unwrap();
    let spec = SymbolSpec::new(Version::V5, EcLevel::Quality, mask, [(15, 2), (16, 2)], 72);
    assert_eq!(spec.map(|s| s.data_capacity()), Ok(62));
    assert_eq!(
        SymbolSpec::new(Version::V3, EcLevel::Low, mask, [(55, 1)], 15),
        Err(EncodeError::UnsupportedEcCount(15))
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_symbol_spec_too_large() {
    let mask = MaskPattern::new(0).unwrap();
    // 26 codewords fill version 1, 30 do not
    assert!(SymbolSpec::new(Version::V1, EcLevel::Low, mask, [(19, 1)], 7).is_ok());
    assert_eq!(
        SymbolSpec::new(Version::V1, EcLevel::Low, mask, [(20, 1)], 10),
        Err(EncodeError::SymbolTooSmall {
            available: 208,
            needed: 240
        })
    );
    // rejected without touching the blocks one by one
    assert_eq!(
        SymbolSpec::new(Version::V1, EcLevel::Low, mask, [(1, 1 << 40)], 7 << 40),
        Err(EncodeError::SymbolTooSmall {
            available: 208,
            needed: ((1 << 40) + (7 << 40)) * 8
        })
    );
    let huge = SymbolSpec::new(Version::V6, EcLevel::Low, mask, [(usize::MAX, 2)], 14);
    assert_eq!(
        huge,
        Err(EncodeError::SymbolTooSmall {
            available: 1383,
            needed: usize::MAX
        })
    );
}

#[test]
fn test_layout_saturates() {
    let layout = BlockLayout::new([(usize::MAX, 2), (1, usize::MAX)]);
    assert_eq!(layout.num_blocks(), usize::MAX);
    assert_eq!(layout.num_data_codewords(), usize::MAX);
    // a group repeated zero times adds no empty block
    assert_eq!(BlockLayout::new([(0, 0), (5, 1)]).ecc_per_block(7), Ok(7));
}
