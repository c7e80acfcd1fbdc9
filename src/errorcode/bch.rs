//! BCH(15,5) code protecting the format information.
//!
//! The 5 message bits (2 bits error correction level, 3 bits mask id) are
//! extended by 10 parity bits. These are the remainder of the binary polynomial
//! division of m(x) * x^10 by the generator
//!
//! > g(x) = x^10 + x^8 + x^5 + x^4 + x^2 + x + 1.
//!
//! The full 15 bit codeword is finally XORed with [FORMAT_MASK] so that it is
//! never all zero.

/// Generator bits, highest degree first: `1,0,1,0,0,1,1,0,1,1,1`.
pub const GENERATOR: u16 = 0b101_0011_0111;

/// XOR mask applied to the 15 bit format codeword.
pub const FORMAT_MASK: u16 = 0x5412;

const PARITY_BITS: u32 = 10;

/// Compute the 10 parity bits for a 5 bit message.
///
/// The message is right-padded with ten zeros and divided by [GENERATOR]
/// over GF(2). Bits above the fifth are ignored.
pub fn parity(message: u8) -> u16 {
    let mut rem = ((message & 0b1_1111) as u16) << PARITY_BITS;
    // strip leading bits: whenever the top bit of the rest is set, subtract
    // (XOR) the generator aligned to it
    for shift in (0..=4).rev() {
        if rem & (1 << (shift + PARITY_BITS)) != 0 {
            rem ^= GENERATOR << shift;
        }
    }
    debug_assert!(rem < 1 << PARITY_BITS);
    rem
}

/// Compute the masked 15 bit codeword for a 5 bit message.
pub fn encode(message: u8) -> u16 {
    let message = (message & 0b1_1111) as u16;
    ((message << PARITY_BITS) | parity(message as u8)) ^ FORMAT_MASK
}
