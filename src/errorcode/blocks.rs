//! Splitting into Reed-Solomon blocks and interleaving.
//!
//! Larger symbols split their data codewords into several blocks, each
//! with its own error codewords. For transmission the blocks are woven
//! together column by column: first codeword of every block, then the second
//! of every block, and so on. Blocks with fewer data codewords drop out
//! first. The error codewords follow after all data columns, interleaved the
//! same way.
use crate::symbol_spec::BlockLayout;
use crate::EncodeError;

use super::ecc_block;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// The interleaved bit sequence of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interleaved {
    bits: Vec<bool>,
    ec_start: usize,
}

impl Interleaved {
    /// All bits, each codeword MSB first.
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Index of the first bit derived from an error codeword.
    pub fn ec_start(&self) -> usize {
        self.ec_start
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// Compute the error codewords per block and interleave everything.
///
/// `ec_codewords` is the total number of error codewords of the symbol,
/// it must be divisible by the number of blocks.
pub fn interleave(
    data: &[u8],
    layout: &BlockLayout,
    ec_codewords: usize,
) -> Result<Interleaved, EncodeError> {
    let expected = layout.num_data_codewords();
    if data.len() != expected {
        return Err(EncodeError::LayoutMismatch {
            expected,
            actual: data.len(),
        });
    }
    let ecc_len = layout.ecc_per_block(ec_codewords)?;

    let mut blocks = Vec::with_capacity(layout.num_blocks());
    let mut rest = data;
    for size in layout.block_sizes() {
        let (block, tail) = rest.split_at(size);
        blocks.push(block);
        rest = tail;
    }
    let ecc = blocks
        .iter()
        .map(|block| ecc_block(block, ecc_len))
        .collect::<Result<Vec<_>, _>>()?;

    let mut bits = Vec::with_capacity((data.len() + ec_codewords) * 8);
    push_columns(&mut bits, &blocks);
    let ec_start = bits.len();
    push_columns(&mut bits, &ecc);
    Ok(Interleaved { bits, ec_start })
}

fn push_columns<B: AsRef<[u8]>>(bits: &mut Vec<bool>, blocks: &[B]) {
    let longest = blocks.iter().map(|b| b.as_ref().len()).max().unwrap_or(0);
    for i in 0..longest {
        for block in blocks {
            // shorter blocks are exhausted first
            if let Some(&codeword) = block.as_ref().get(i) {
                push_codeword(bits, codeword);
            }
        }
    }
}

fn push_codeword(bits: &mut Vec<bool>, codeword: u8) {
    for i in (0..8).rev() {
        bits.push((codeword >> i) & 1 == 1);
    }
}

#[cfg(test)]
fn codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks(8)
        .map(|c| c.iter().fold(0, |acc, &b| (acc << 1) | b as u8))
        .collect()
}

#[test]
fn interleave_unequal_blocks() {
    let layout = BlockLayout::new([(2, 1), (3, 1)]);
    let stream = interleave(&[1, 2, 3, 4, 5], &layout, 14).unwrap();
    assert_eq!(stream.ec_start(), 5 * 8);
    assert_eq!(stream.len(), 19 * 8);
    #[rustfmt::skip]
    let should: [u8; 19] = [
        // data: [1, 2] and [3, 4, 5]
        1, 3, 2, 4, 5,
        // error codewords of both blocks, column by column
        117, 251, 1, 78, 126, 70, 149, 227, 12, 192, 170, 17, 58, 195,
    ];
    assert_eq!(codewords(stream.bits()), should);
}

#[test]
fn interleave_single_block() {
    let data = [
        32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
    ];
    let stream = interleave(&data, &BlockLayout::new([(16, 1)]), 10).unwrap();
    let cw = codewords(stream.bits());
    assert_eq!(&cw[..16], &data);
    assert_eq!(&cw[16..], &[196, 35, 39, 119, 235, 215, 231, 226, 93, 23]);
}

#[test]
fn msb_first() {
    let mut bits = Vec::new();
    push_codeword(&mut bits, 0b1000_0001);
    push_codeword(&mut bits, 0x40);
    let bits: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
    assert_eq!(bits, "1000000101000000");
}

#[test]
fn interleave_errors() {
    let layout = BlockLayout::new([(2, 1), (3, 1)]);
    assert_eq!(
        interleave(&[1, 2, 3, 4, 5], &layout, 15),
        Err(EncodeError::UnevenBlocks {
            ec_codewords: 15,
            blocks: 2
        })
    );
    assert_eq!(
        interleave(&[1, 2, 3, 4], &layout, 14),
        Err(EncodeError::LayoutMismatch {
            expected: 5,
            actual: 4
        })
    );
    assert_eq!(
        interleave(&[1, 2, 3, 4, 5], &layout, 30),
        Err(EncodeError::UnsupportedEcCount(15))
    );
}
