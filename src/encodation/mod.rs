//! Data encodation: from input bytes to data codewords.
//!
//! Only the byte mode is implemented. The numeric (0b0001), alphanumeric
//! (0b0010) and kanji (0b1000) modes are not.
use crate::EncodeError;

pub(crate) mod byte;

pub(crate) use byte::encode as encode_bytes;

/// First padding codeword, `11101100`.
pub(crate) const PAD_1: u8 = 0xEC;
/// Second padding codeword, `00010001`.
pub(crate) const PAD_2: u8 = 0x11;

/// Append-only bit buffer, bits are written MSB first.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Write the lowest `len` bits of `value`.
    pub fn write(&mut self, value: u16, len: usize) {
        debug_assert!(len <= 16);
        for i in (0..len).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Split into codewords, a short last group is filled with zeros.
    pub fn into_codewords(self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
            })
            .collect()
    }
}

/// Write the bitstream into codewords and fill up to the capacity.
///
/// Fails if the bitstream does not fit, it is never truncated.
pub(crate) fn finish(writer: BitWriter, capacity: usize) -> Result<Vec<u8>, EncodeError> {
    if writer.len() > capacity * 8 {
        return Err(EncodeError::CapacityExceeded {
            bits: writer.len(),
            capacity,
        });
    }
    let mut codewords = writer.into_codewords();
    codewords.reserve(capacity - codewords.len());
    for pad in [PAD_1, PAD_2].iter().cycle() {
        if codewords.len() >= capacity {
            break;
        }
        codewords.push(*pad);
    }
    Ok(codewords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bit_writer() {
        let mut writer = BitWriter::default();
        writer.write(0b0100, 4);
        writer.write(0xFF, 8);
        writer.write(0b1, 1);
        assert_eq!(writer.len(), 13);
        assert_eq!(writer.into_codewords(), vec![0b0100_1111, 0b1111_1000]);
    }

    #[test]
    fn test_padding_alternates() {
        let mut writer = BitWriter::default();
        writer.write(0xAB, 8);
        assert_eq!(
            finish(writer, 6).unwrap(),
            vec![0xAB, PAD_1, PAD_2, PAD_1, PAD_2, PAD_1]
        );
    }

    #[test]
    fn test_exact_fit() {
        let mut writer = BitWriter::default();
        writer.write(0xABCD, 16);
        assert_eq!(finish(writer, 2).unwrap(), vec![0xAB, 0xCD]);
    }

    #[test]
    fn test_overflow() {
        let mut writer = BitWriter::default();
        writer.write(0xABCD, 16);
        writer.write(0, 1);
        assert_eq!(
            finish(writer, 2),
            Err(EncodeError::CapacityExceeded {
                bits: 17,
                capacity: 2
            })
        );
    }
}
