//! Reed-Solomon and BCH error correction codes.
//!
//! A QR Code protects its content with two codes:
//!
//! - The codewords (data and padding) are split into blocks and each block
//!   gets Reed-Solomon error correction codewords computed over GF(256),
//!   see [ecc_block] and [blocks].
//! - The format information (error correction level and mask) is protected
//!   by a BCH(15,5) code over GF(2), see [bch].
//!
//! The Reed-Solomon code is systematic: the data polynomial is multiplied by
//! x^k, where k is the number of error codewords, and divided by the
//! generator polynomial. The remainder of this division are the error codewords.
pub mod bch;
pub mod blocks;
mod galois;

use arrayvec::ArrayVec;

use crate::EncodeError;
use galois::GF;

pub use blocks::{interleave, Interleaved};

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Largest number of error codewords per block with a tabulated generator.
pub const MAX_ECC_PER_BLOCK: usize = 28;

/// The generator polynomials used by the Reed-Solomon code of QR Code.
///
/// A polynomial of degree k is the product (x - a^0)(x - a^1)...(x - a^(k-1)).
/// The coefficients are stored as powers of the generator a (not as field
/// elements), highest degree first. The leading coefficient is always a^0 = 1.
const GENERATOR_POLYNOMIALS: [&[u8]; 8] = [
    // 7
    &[0, 87, 229, 146, 149, 238, 102, 21],
    // 10
    &[0, 251, 67, 46, 61, 118, 70, 64, 94, 32, 45],
    // 13
    &[0, 74, 152, 176, 100, 86, 100, 106, 104, 130, 218, 206, 140, 78],
    // 16
    &[
        0, 120, 104, 107, 109, 102, 161, 76, 3, 91, 191, 147, 169, 182, 194, 225, 120,
    ],
    // 17
    &[
        0, 43, 139, 206, 78, 43, 239, 123, 206, 214, 147, 24, 99, 150, 39, 243, 163, 136,
    ],
    // 18
    &[
        0, 215, 234, 158, 94, 184, 97, 118, 170, 79, 187, 152, 148, 252, 179, 5, 98, 96, 153,
    ],
    // 22
    &[
        0, 210, 171, 247, 242, 93, 230, 14, 109, 221, 53, 200, 74, 8, 172, 98, 80, 219, 134, 160,
        105, 165, 231,
    ],
    // 28
    &[
        0, 168, 223, 200, 104, 224, 234, 108, 180, 110, 190, 195, 147, 205, 27, 232, 201, 21, 43,
        245, 87, 42, 195, 212, 119, 242, 37, 9, 123,
    ],
];

/// Get the generator polynomial for `len` error codewords.
pub(crate) fn generator(len: usize) -> Result<&'static [u8], EncodeError> {
    GENERATOR_POLYNOMIALS
        .iter()
        .find(|p| p.len() - 1 == len)
        .copied()
        .ok_or(EncodeError::UnsupportedEcCount(len))
}

/// Compute the Reed-Solomon error codewords for one block.
///
/// The data codewords are given highest degree term first. The input
/// is not modified, the error codewords are returned in a new buffer.
pub fn ecc_block(
    data: &[u8],
    ecc_len: usize,
) -> Result<ArrayVec<u8, MAX_ECC_PER_BLOCK>, EncodeError> {
    let g = generator(ecc_len)?;
    // Let d be the data polynomial (n coefficients) and g the generator
    // with k + 1 coefficients. Long division of d(x) * x^k by g leaves a
    // remainder r with k coefficients, which is the error code.
    //
    // Each step cancels the leading coefficient of the remainder by subtracting
    // a multiple of g aligned to it. Instead of dropping the leading
    // coefficient we advance the offset `step`.
    let mut rem: Vec<GF> = data
        .iter()
        .map(|&a| GF(a))
        .chain(std::iter::repeat(GF(0)).take(ecc_len))
        .collect();
    for step in 0..data.len() {
        let lead = rem[step];
        if lead == GF(0) {
            // nothing to subtract, the zero term is just consumed
            continue;
        }
        let e = lead.log()?;
        for (j, &g_j) in g.iter().enumerate() {
            rem[step + j] += GF::exp(g_j as usize + e);
        }
        debug_assert_eq!(rem[step], GF(0));
    }
    Ok(rem[data.len()..].iter().map(|&a| a.into()).collect())
}

#[test]
fn ecc_block_hello_world() {
    // "HELLO WORLD" as version 1-M, a widely published example
    let data = [
        32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
    ];
    let ecc = ecc_block(&data, 10).unwrap();
    assert_eq!(
        ecc.as_slice(),
        &[196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
    );
}

#[test]
fn ecc_block_leading_zeros() {
    // zero terms of highest degree do not change the remainder
    let with_zeros = ecc_block(&[0, 0, 12], 7).unwrap();
    let without = ecc_block(&[12], 7).unwrap();
    assert_eq!(with_zeros, without);
    assert_eq!(with_zeros.as_slice(), &[62, 2, 246, 227, 116, 23, 70]);
}

#[test]
fn ecc_block_zero_data() {
    let ecc = ecc_block(&[0, 0, 0, 0], 13).unwrap();
    assert_eq!(ecc.as_slice(), &[0; 13]);
}

#[test]
fn ecc_block_unsupported() {
    assert_eq!(
        ecc_block(&[1, 2, 3], 15),
        Err(EncodeError::UnsupportedEcCount(15))
    );
    assert_eq!(ecc_block(&[1, 2, 3], 0), Err(EncodeError::UnsupportedEcCount(0)));
}

#[test]
fn generator_table_matches_products() {
    // (x - a^0)(x - a^1)...(x - a^(k-1)) computed directly
    for g in GENERATOR_POLYNOMIALS {
        let k = g.len() - 1;
        let mut poly = vec![GF(1)];
        for i in 0..k {
            let mut next = vec![GF(0); poly.len() + 1];
            for (j, &c) in poly.iter().enumerate() {
                next[j] += c;
                next[j + 1] += c * GF::exp(i);
            }
            poly = next;
        }
        let logs: Vec<u8> = poly.iter().map(|c| c.log().unwrap() as u8).collect();
        assert_eq!(&logs, g, "generator of degree {}", k);
    }
}
