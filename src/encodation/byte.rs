//! Byte mode: every input byte is one 8 bit character.
use super::{finish, BitWriter};
use crate::EncodeError;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Mode indicator of the byte mode.
pub(crate) const MODE_BYTE: u16 = 0b0100;

const MODE_BITS: usize = 4;
const COUNT_BITS: usize = 8;
const TERMINATOR_BITS: usize = 4;

/// Longest input the character count field can describe.
pub(crate) const MAX_CHARACTERS: usize = (1 << COUNT_BITS) - 1;

/// Encode `data` into exactly `capacity` data codewords.
///
/// The bitstream is mode indicator, character count, the characters and
/// a four bit terminator. It is padded with alternating 0xEC and 0x11.
pub(crate) fn encode(data: &[u8], capacity: usize) -> Result<Vec<u8>, EncodeError> {
    if data.len() > MAX_CHARACTERS {
        return Err(EncodeError::TextTooLong(data.len()));
    }
    let mut writer =
        BitWriter::with_capacity(MODE_BITS + COUNT_BITS + 8 * data.len() + TERMINATOR_BITS);
    writer.write(MODE_BYTE, MODE_BITS);
    writer.write(data.len() as u16, COUNT_BITS);
    for &ch in data {
        writer.write(ch as u16, 8);
    }
    writer.write(0, TERMINATOR_BITS);
    finish(writer, capacity)
}

#[test]
fn test_two_characters() {
    // 0100 00000010 01100001 01100010 0000
    assert_eq!(encode(b"ab", 5).unwrap(), vec![0x40, 0x26, 0x16, 0x20, 0xEC]);
}

#[test]
fn test_empty() {
    assert_eq!(encode(b"", 3).unwrap(), vec![0x40, 0x00, 0xEC]);
}

#[test]
fn test_high_bytes() {
    // bytes above 127 are taken as they are
    let cw = encode(&[0xFF, 0x80], 4).unwrap();
    assert_eq!(cw, vec![0x40, 0x2F, 0xF8, 0x00]);
}

#[test]
fn test_url() {
    let cw = encode(b"http://srv.prof-morii.net/~lab", 34).unwrap();
    assert_eq!(cw.len(), 34);
    assert_eq!(&cw[..3], &[0x41, 0xE6, 0x87]);
    assert_eq!(&cw[32..], &[0xEC, 0x11]);
}

#[test]
fn test_too_long() {
    let data = vec![b'a'; 256];
    assert_eq!(encode(&data, 300), Err(EncodeError::TextTooLong(256)));
    assert!(encode(&data[..255], 258).is_ok());
}

#[test]
fn test_capacity_exceeded() {
    // 4 + 8 + 16 + 4 = 32 bits
    assert!(encode(b"ab", 4).is_ok());
    assert_eq!(
        encode(b"abc", 4),
        Err(EncodeError::CapacityExceeded {
            bits: 40,
            capacity: 4
        })
    );
}
