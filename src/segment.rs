//! Segment classification and payload packing.
//!
//! A whole input string becomes exactly one segment. The classifier picks the
//! cheapest mode able to represent every character, and the segment stores the
//! payload as a list of `(value, bit_width)` chunks ready to be appended to a
//! bit buffer.

use crate::qrcode::Version;
use tracing::trace;

/// The 45 characters encodable in alphanumeric mode, in code order.
pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Describes how a segment's data bits are interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QrSegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
    /// Reserved. No input is ever classified as Kanji and the bitstream builder rejects it.
    Kanji,
}

impl QrSegmentMode {
    /// Returns the 4-bit mode indicator.
    pub(crate) fn mode_bits(self) -> u32 {
        use QrSegmentMode::*;
        match self {
            Numeric => 0x1,
            Alphanumeric => 0x2,
            Byte => 0x4,
            Kanji => 0x8,
        }
    }

    /// Returns the width of the character count indicator at the given version.
    pub fn num_char_count_bits(self, ver: Version) -> u8 {
        use QrSegmentMode::*;
        let widths: [u8; 3] = match self {
            Numeric => [10, 12, 14],
            Alphanumeric => [9, 11, 13],
            Byte => [8, 16, 16],
            Kanji => [8, 10, 12],
        };
        // Versions 1-9, 10-26 and 27-40.
        widths[usize::from((ver.value() + 7) / 17)]
    }
}

/// A run of input encoded in a single mode.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrSegment {
    mode: QrSegmentMode,
    /// Characters for numeric and alphanumeric mode, octets for byte mode.
    numchars: usize,
    /// Packed payload values, each with its bit width.
    chunks: Vec<(u16, u8)>,
}

impl QrSegment {
    /// Builds a segment from already packed chunks.
    ///
    /// Every chunk must be at most 16 bits wide with a value that fits its width.
    /// Outside callers go through the `make_*` constructors, which uphold this.
    pub(crate) fn new(mode: QrSegmentMode, numchars: usize, chunks: Vec<(u16, u8)>) -> Self {
        Self { mode, numchars, chunks }
    }

    /// Picks the cheapest mode that can represent all of `text`.
    ///
    /// Numeric wins over alphanumeric, which wins over byte. The empty string is numeric.
    pub fn classify(text: &str) -> QrSegmentMode {
        let mut only_numeric = true;
        let mut only_alphanumeric = true;
        for c in text.chars() {
            if !c.is_ascii_digit() {
                only_numeric = false;
            }
            if !ALPHANUMERIC_CHARSET.contains(c) {
                only_alphanumeric = false;
            }
            // Nothing later in the string can make a cheaper mode possible again.
            if !only_numeric && !only_alphanumeric {
                break;
            }
        }
        if only_numeric {
            QrSegmentMode::Numeric
        } else if only_alphanumeric {
            QrSegmentMode::Alphanumeric
        } else {
            QrSegmentMode::Byte
        }
    }

    /// Classifies `text` and packs it in the chosen mode.
    pub fn from_text(text: &str) -> Self {
        let mode = Self::classify(text);
        trace!(?mode, chars = text.chars().count(), "classified input");
        let seg = match mode {
            QrSegmentMode::Numeric => Self::make_numeric(text),
            QrSegmentMode::Alphanumeric => Self::make_alphanumeric(text),
            _ => None,
        };
        seg.unwrap_or_else(|| Self::make_bytes(&utf8_encode(text)))
    }

    /// Creates a byte mode segment, one 8-bit chunk per octet.
    pub fn make_bytes(data: &[u8]) -> Self {
        let chunks = data.iter().map(|&b| (u16::from(b), 8)).collect();
        Self::new(QrSegmentMode::Byte, data.len(), chunks)
    }

    /// Creates a numeric mode segment, or `None` if `text` has a non-digit.
    ///
    /// Digits are grouped in threes (10 bits); a trailing group of one or two
    /// digits takes 4 or 7 bits.
    pub fn make_numeric(text: &str) -> Option<Self> {
        let mut chunks = Vec::with_capacity(text.len() / 3 + 1);
        let mut accumdata: u16 = 0;
        let mut accumcount: u8 = 0;
        for b in text.bytes() {
            if !b.is_ascii_digit() {
                return None;
            }
            accumdata = accumdata * 10 + u16::from(b - b'0');
            accumcount += 1;
            if accumcount == 3 {
                chunks.push((accumdata, 10));
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            chunks.push((accumdata, accumcount * 3 + 1));
        }
        Some(Self::new(QrSegmentMode::Numeric, text.len(), chunks))
    }

    /// Creates an alphanumeric mode segment, or `None` if `text` leaves the charset.
    ///
    /// Characters are paired as `45 * first + second` in 11 bits; a trailing
    /// single character takes 6 bits.
    pub fn make_alphanumeric(text: &str) -> Option<Self> {
        let mut chunks = Vec::with_capacity(text.len() / 2 + 1);
        let mut accumdata: u16 = 0;
        let mut accumcount: u8 = 0;
        let mut numchars = 0;
        for c in text.chars() {
            let index = ALPHANUMERIC_CHARSET.find(c)?;
            accumdata = accumdata * 45 + index as u16;
            accumcount += 1;
            numchars += 1;
            if accumcount == 2 {
                chunks.push((accumdata, 11));
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            chunks.push((accumdata, 6));
        }
        Some(Self::new(QrSegmentMode::Alphanumeric, numchars, chunks))
    }

    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    pub(crate) fn chunks(&self) -> &[(u16, u8)] {
        &self.chunks
    }

    /// Returns the number of payload bits, excluding the mode and count header.
    pub fn bit_length(&self) -> usize {
        self.chunks.iter().map(|&(_, width)| usize::from(width)).sum()
    }

    /// Returns the bits needed at `version` including the header, or `None`
    /// when the character count overflows the count indicator.
    pub fn total_bits(&self, version: Version) -> Option<usize> {
        let ccbits: u8 = self.mode.num_char_count_bits(version);
        if self.numchars >= 1usize << ccbits {
            return None;
        }
        Some(4 + usize::from(ccbits) + self.bit_length())
    }
}

/// Encodes `text` as UTF-8 octets, one code point at a time.
pub fn utf8_encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let cp = u32::from(c);
        if cp < 0x80 {
            out.push(cp as u8);
        } else if cp < 0x800 {
            out.push(0b1100_0000 | ((cp >> 6) & 0b1_1111) as u8);
            out.push(0b1000_0000 | (cp & 0b11_1111) as u8);
        } else if cp < 0x10000 {
            out.push(0b1110_0000 | ((cp >> 12) & 0b1111) as u8);
            out.push(0b1000_0000 | ((cp >> 6) & 0b11_1111) as u8);
            out.push(0b1000_0000 | (cp & 0b11_1111) as u8);
        } else {
            out.push(0b1111_0000 | ((cp >> 18) & 0b111) as u8);
            out.push(0b1000_0000 | ((cp >> 12) & 0b11_1111) as u8);
            out.push(0b1000_0000 | ((cp >> 6) & 0b11_1111) as u8);
            out.push(0b1000_0000 | (cp & 0b11_1111) as u8);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(QrSegment::classify("1234567890"), QrSegmentMode::Numeric);
        assert_eq!(QrSegment::classify(""), QrSegmentMode::Numeric);
        assert_eq!(QrSegment::classify("HELLO WORLD"), QrSegmentMode::Alphanumeric);
        assert_eq!(QrSegment::classify("12345$"), QrSegmentMode::Alphanumeric);
        assert_eq!(QrSegment::classify("Hello World"), QrSegmentMode::Byte);
        assert_eq!(QrSegment::classify("1234a"), QrSegmentMode::Byte);
        assert_eq!(QrSegment::classify("HELLO'"), QrSegmentMode::Byte);
    }

    #[test]
    fn test_one_foreign_char_forces_byte_mode() {
        let digits = "0".repeat(50);
        for c in ['a', '#', '\u{e9}', '\u{1f600}'] {
            let text = format!("{}{}{}", &digits[..10], c, &digits[10..]);
            assert_eq!(QrSegment::classify(&text), QrSegmentMode::Byte);
        }
    }

    #[test]
    fn test_make_numeric_chunks() {
        let seg = QrSegment::make_numeric("01234567").unwrap();
        assert_eq!(seg.chunks(), &[(12, 10), (345, 10), (67, 7)]);
        assert_eq!(seg.num_chars(), 8);
        assert_eq!(seg.bit_length(), 27);
        assert_eq!(QrSegment::make_numeric("1").unwrap().chunks(), &[(1, 4)]);
        assert!(QrSegment::make_numeric("12a").is_none());
    }

    #[test]
    fn test_make_alphanumeric_chunks() {
        let seg = QrSegment::make_alphanumeric("HELLO WORLD").unwrap();
        assert_eq!(seg.num_chars(), 11);
        // "HE" = 17 * 45 + 14, trailing "D" = 13
        assert_eq!(seg.chunks()[0], (779, 11));
        assert_eq!(*seg.chunks().last().unwrap(), (13, 6));
        assert_eq!(seg.bit_length(), 5 * 11 + 6);
        assert!(QrSegment::make_alphanumeric("hello").is_none());
    }

    #[test]
    fn test_empty_segment_has_no_payload() {
        let seg = QrSegment::from_text("");
        assert_eq!(seg.mode(), QrSegmentMode::Numeric);
        assert_eq!(seg.bit_length(), 0);
        assert_eq!(seg.total_bits(Version::new(1)), Some(14));
    }

    #[test]
    fn test_utf8_encode_matches_std() {
        for text in ["", "abc", "\u{e9}t\u{e9}", "\u{20ac}100", "\u{1f600}!", "\u{7ff}\u{800}\u{ffff}\u{10000}"] {
            assert_eq!(utf8_encode(text), text.as_bytes(), "{:?}", text);
        }
    }

    #[test]
    fn test_byte_mode_counts_octets() {
        let seg = QrSegment::from_text("\u{e9}a\u{1f600}");
        assert_eq!(seg.mode(), QrSegmentMode::Byte);
        assert_eq!(seg.num_chars(), 7);
        assert_eq!(seg.bit_length(), 56);
    }

    #[test]
    fn test_char_count_bits_breakpoints() {
        let widths = |mode: QrSegmentMode| {
            [1, 9, 10, 26, 27, 40].map(|v| mode.num_char_count_bits(Version::new(v)))
        };
        assert_eq!(widths(QrSegmentMode::Numeric), [10, 10, 12, 12, 14, 14]);
        assert_eq!(widths(QrSegmentMode::Alphanumeric), [9, 9, 11, 11, 13, 13]);
        assert_eq!(widths(QrSegmentMode::Byte), [8, 8, 16, 16, 16, 16]);
        assert_eq!(widths(QrSegmentMode::Kanji), [8, 8, 10, 10, 12, 12]);
    }

    #[test]
    fn test_total_bits_rejects_count_overflow() {
        let seg = QrSegment::make_bytes(&[0u8; 256]);
        assert_eq!(seg.total_bits(Version::new(9)), None);
        assert_eq!(seg.total_bits(Version::new(10)), Some(4 + 16 + 256 * 8));
    }

    #[test]
    fn test_public_constructors_pack_valid_chunks() {
        let segs = [
            QrSegment::from_text(""),
            QrSegment::from_text("9999999999"),
            QrSegment::from_text("::::ZZZZ :"),
            QrSegment::from_text("\u{ff}\u{1f600}~"),
            QrSegment::make_bytes(&[0xff; 40]),
        ];
        for seg in &segs {
            for &(val, len) in seg.chunks() {
                assert!(len > 0 && len <= 16, "{:?}", seg);
                assert_eq!(u32::from(val) >> len, 0, "{:?}", seg);
            }
        }
    }
}
