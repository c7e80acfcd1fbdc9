//! Data part encoding
//!
//! The codewords of a QR Code consist of two parts: the data codewords
//! (the encoded input plus padding) and the error correction codewords.
//!
//! The function in this module computes the first part. There is little
//! reason to call it directly, but it is useful when working on a lower level,
//! for example together with [errorcode::interleave](crate::errorcode::interleave)
//! and [placement](crate::placement).
use crate::encodation::encode_bytes;
use crate::EncodeError;

/// Encode input to data codewords using the byte mode.
///
/// Returns exactly `capacity` codewords.
///
/// ## Example
///
/// ```rust
/// let codewords = qrmatrix::data::encode_data(b"ab", 5).unwrap();
/// assert_eq!(codewords, vec![0x40, 0x26, 0x16, 0x20, 0xEC]);
/// ```
pub fn encode_data(data: &[u8], capacity: usize) -> Result<Vec<u8>, EncodeError> {
    encode_bytes(data, capacity)
}
