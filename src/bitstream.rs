//! Packing a segment into the data codeword sequence.

use crate::error::{QrError, Result};
use crate::qrcode::{QrCodeEcc, Version};
use crate::segment::{QrSegment, QrSegmentMode};
use crate::tables;
use tracing::trace;

/// An append-only sequence of bits with a fixed capacity.
///
/// Bits are stored most significant first within each byte.
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    /// Creates an empty buffer able to hold `capacity_bytes * 8` bits.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            data: vec![0u8; capacity_bytes],
            length: 0,
        }
    }

    /// Returns the number of bits written so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of bits that can still be written.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.length
    }

    /// Appends the low `len` bits of `val`, most significant first.
    ///
    /// # Errors
    ///
    /// Returns [`QrError::BufferOverflow`] if the bits do not fit; nothing is written then.
    pub fn append_bits(&mut self, val: u32, len: u8) -> Result<()> {
        debug_assert!(len <= 31 && (val >> len) == 0);
        if usize::from(len) > self.remaining() {
            return Err(QrError::BufferOverflow {
                requested: usize::from(len),
                remaining: self.remaining(),
            });
        }
        for i in (0..len).rev() {
            let index: usize = self.length >> 3;
            let shift: u8 = 7 - ((self.length as u8) & 7);
            let bit: u8 = ((val >> i) as u8) & 1;
            self.data[index] |= bit << shift;
            self.length += 1;
        }
        Ok(())
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Builds the data codewords for `seg` in a symbol of the given version and level.
///
/// Writes the mode indicator, the character count, the payload, a terminator of
/// up to four zero bits, zero bits up to a byte boundary, and then alternating
/// `0xEC` and `0x11` pad bytes until the data capacity is filled exactly.
///
/// # Errors
///
/// [`QrError::UnsupportedMode`] for Kanji segments, [`QrError::BufferOverflow`]
/// if the segment does not fit (the version must have been selected first).
pub fn build_data_codewords(seg: &QrSegment, version: Version, ecl: QrCodeEcc) -> Result<Vec<u8>> {
    if seg.mode() == QrSegmentMode::Kanji {
        return Err(QrError::UnsupportedMode(seg.mode()));
    }
    let datacapacitybits: usize = tables::bit_capacity(version, ecl);
    let mut bb = BitBuffer::new(datacapacitybits / 8);

    bb.append_bits(seg.mode().mode_bits(), 4)?;
    bb.append_bits(seg.num_chars() as u32, seg.mode().num_char_count_bits(version))?;
    for &(value, width) in seg.chunks() {
        bb.append_bits(u32::from(value), width)?;
    }
    let usedbits = bb.len();

    // Add terminator and pad up to a byte if applicable
    let numzerobits: usize = bb.remaining().min(4);
    bb.append_bits(0, numzerobits as u8)?;
    let numzerobits: usize = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, numzerobits as u8)?;
    debug_assert_eq!(bb.len() % 8, 0);

    // Pad with alternating bytes until data capacity is reached
    for &padbyte in [0xec, 0x11].iter().cycle() {
        if bb.remaining() == 0 {
            break;
        }
        bb.append_bits(padbyte, 8)?;
    }
    trace!(usedbits, capacity = datacapacitybits, "built data codewords");
    Ok(bb.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_bits_msb_first() {
        let mut bb = BitBuffer::new(2);
        bb.append_bits(0b1, 1).unwrap();
        bb.append_bits(0b0110, 4).unwrap();
        bb.append_bits(0b101_0101, 7).unwrap();
        assert_eq!(bb.len(), 12);
        assert_eq!(bb.into_bytes(), vec![0b1011_0101, 0b0101_0000]);
    }

    #[test]
    fn test_append_past_capacity_fails() {
        let mut bb = BitBuffer::new(1);
        bb.append_bits(0b11, 6).unwrap();
        assert_eq!(
            bb.append_bits(0b111, 3),
            Err(QrError::BufferOverflow { requested: 3, remaining: 2 })
        );
        assert_eq!(bb.len(), 6);
    }

    #[test]
    fn test_hello_world_data_codewords() {
        let seg = QrSegment::from_text("HELLO WORLD");
        let data = build_data_codewords(&seg, Version::new(1), QrCodeEcc::Medium).unwrap();
        assert_eq!(
            data,
            vec![32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17]
        );
    }

    #[test]
    fn test_numeric_data_codewords() {
        // 0001 0000001000 0000001100 0101011001 1000011 0000 then padding
        let seg = QrSegment::from_text("01234567");
        let data = build_data_codewords(&seg, Version::new(1), QrCodeEcc::Medium).unwrap();
        assert_eq!(&data[..6], &[0b0001_0000, 0b0010_0000, 0b0000_1100, 0b0101_0110, 0b0110_0001, 0b1000_0000]);
        assert_eq!(&data[6..10], &[0xec, 0x11, 0xec, 0x11]);
        assert_eq!(data.len(), 16);
    }

    #[test]
    fn test_empty_input_is_all_padding() {
        let seg = QrSegment::from_text("");
        let data = build_data_codewords(&seg, Version::new(1), QrCodeEcc::Low).unwrap();
        // Mode 0001, count 0000000000, terminator 0000, align 00
        assert_eq!(&data[..3], &[0b0001_0000, 0, 0]);
        assert!(data[3..].chunks(2).all(|pair| pair[0] == 0xec && pair.get(1).map_or(true, |&b| b == 0x11)));
        assert_eq!(data.len(), 19);
    }

    #[test]
    fn test_terminator_shrinks_at_capacity() {
        // 17 digits take 4 + 10 + 50 + 7 = 71 of the 72 bits in version 1-H
        let seg = QrSegment::from_text("12345678901234567");
        assert_eq!(seg.total_bits(Version::new(1)), Some(71));
        let data = build_data_codewords(&seg, Version::new(1), QrCodeEcc::High).unwrap();
        assert_eq!(data.len(), 9);
        assert_eq!(data[8] & 1, 0);
    }

    #[test]
    fn test_kanji_is_rejected() {
        let seg = QrSegment::new(QrSegmentMode::Kanji, 1, vec![(0x1aa, 13)]);
        assert_eq!(
            build_data_codewords(&seg, Version::new(1), QrCodeEcc::Low),
            Err(QrError::UnsupportedMode(QrSegmentMode::Kanji))
        );
    }
}
