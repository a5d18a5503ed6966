#![forbid(unsafe_code)]
//! QR code encoding functionality.
//!
//! This module drives the encoding pipeline for QR Code Model 2 symbols: the input is
//! classified into a single segment, the smallest version (1–40) that holds it at the
//! requested error correction level is selected, and the data codewords, error correction
//! codewords and module grid are built in turn with a caller-chosen mask.

use crate::bitstream;
use crate::error::{QrError, Result};
use crate::matrix::{self, ModuleMatrix, FORMAT_GENERATOR, FORMAT_MASK, VERSION_GENERATOR};
use crate::placement;
use crate::reed_solomon;
use crate::segment::{QrSegment, QrSegmentMode};
use crate::tables;
use tracing::debug;

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// This struct supports QR Code Model 2, covering versions 1 to 40 and all four error
/// correction levels. The whole input is carried in one numeric, alphanumeric or byte
/// segment. Instances are immutable after creation.
///
/// # Creation
///
/// - From text: use [`QrCode::encode_text`].
/// - From raw octets: use [`QrCode::encode_binary`].
/// - From a prepared segment: use [`QrCode::encode_segment`].
///
/// # Example
///
/// ```rust
/// use qirust::qrcode::{Mask, QrCode, QrCodeEcc};
///
/// let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Medium, Mask::new(0)).unwrap();
///
/// assert_eq!(qr.version().value(), 1);
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct QrCode {
    version: Version,
    ecl: QrCodeEcc,
    mask: Mask,
    mode: QrSegmentMode,

    /// The width and height of this QR Code, measured in modules, between
    /// 21 and 177 (inclusive). This is equal to version * 4 + 17.
    size: u8,

    /// The modules of this QR Code (0 = light, 1 = dark), packed bitwise into bytes,
    /// row-major with the least significant bit first. Accessed through get_module().
    modules: Vec<u8>,
}

impl QrCode {
    /// Encodes a text string into a QR code.
    ///
    /// The text is classified as numeric, alphanumeric or byte (UTF-8) data, and the smallest
    /// version that can hold it at the given error correction level is selected.
    ///
    /// # Arguments
    ///
    /// * `text` - The text to encode. The empty string is valid and yields a numeric symbol.
    /// * `ecl` - Error correction level.
    /// * `mask` - Mask pattern applied to the data modules.
    ///
    /// # Returns
    ///
    /// A `Result` containing the QR code, or [`QrError::CapacityExceeded`] if even a version 40
    /// symbol cannot hold the text at the given level.
    ///
    /// # Example
    ///
    /// ```rust
    /// use qirust::qrcode::{Mask, QrCode, QrCodeEcc};
    /// use qirust::segment::QrSegmentMode;
    ///
    /// let qr = QrCode::encode_text("01234567", QrCodeEcc::High, Mask::new(3)).unwrap();
    /// assert_eq!(qr.mode(), QrSegmentMode::Numeric);
    /// ```
    pub fn encode_text(text: &str, ecl: QrCodeEcc, mask: Mask) -> Result<Self> {
        let seg = QrSegment::from_text(text);
        Self::encode_segment(&seg, ecl, mask)
    }

    /// Encodes arbitrary binary data into a QR code using byte mode.
    pub fn encode_binary(data: &[u8], ecl: QrCodeEcc, mask: Mask) -> Result<Self> {
        let seg = QrSegment::make_bytes(data);
        Self::encode_segment(&seg, ecl, mask)
    }

    /// Encodes a single segment into a QR code.
    ///
    /// # Errors
    ///
    /// [`QrError::CapacityExceeded`] when no version fits, [`QrError::UnsupportedMode`] for
    /// Kanji segments. Any other error means an internal table or invariant is broken.
    pub fn encode_segment(seg: &QrSegment, ecl: QrCodeEcc, mask: Mask) -> Result<Self> {
        let version: Version = Self::select_version(seg, ecl)?;
        let datacodewords: Vec<u8> = bitstream::build_data_codewords(seg, version, ecl)?;
        let allcodewords: Vec<u8> = reed_solomon::add_ecc_and_interleave(&datacodewords, version, ecl)?;

        let mut grid = ModuleMatrix::with_function_patterns(version, ecl, mask);
        placement::draw_codewords(&mut grid, &allcodewords, mask);
        let modules: Vec<u8> = grid.finish()?;

        debug!(
            version = version.value(),
            ?ecl,
            mask = mask.value(),
            mode = ?seg.mode(),
            codewords = allcodewords.len(),
            "encoded QR code"
        );
        Ok(Self {
            version,
            ecl,
            mask,
            mode: seg.mode(),
            size: version.size(),
            modules,
        })
    }

    /// Returns the smallest version whose data capacity at `ecl` holds `seg`.
    ///
    /// A version whose character count indicator is too narrow for the segment's
    /// length is skipped.
    ///
    /// # Errors
    ///
    /// [`QrError::CapacityExceeded`] with the bit counts at version 40 if nothing fits.
    pub fn select_version(seg: &QrSegment, ecl: QrCodeEcc) -> Result<Version> {
        for ver in Version::MIN.value()..=Version::MAX.value() {
            let version = Version::new(ver);
            let datacapacitybits: usize = tables::bit_capacity(version, ecl);
            match seg.total_bits(version) {
                Some(datausedbits) if datausedbits <= datacapacitybits => return Ok(version),
                _ => {}
            }
        }
        let ccbits = usize::from(seg.mode().num_char_count_bits(Version::MAX));
        Err(QrError::CapacityExceeded {
            needed: 4 + ccbits + seg.bit_length(),
            capacity: tables::bit_capacity(Version::MAX, ecl),
        })
    }

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        i32::from(self.size)
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the mode the input was encoded in.
    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    /// Returns the color of the module at the given coordinates.
    ///
    /// Returns `true` for dark modules and `false` for light modules. Coordinates outside the QR
    /// code's bounds return `false`.
    ///
    /// # Arguments
    ///
    /// * `x` - X-coordinate (0 is left).
    /// * `y` - Y-coordinate (0 is top).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size();
        range.contains(&x) && range.contains(&y) && self.get_module_bounded(x as u8, y as u8)
    }

    fn get_module_bounded(&self, x: u8, y: u8) -> bool {
        let index = usize::from(y) * usize::from(self.size) + usize::from(x);
        let byteindex: usize = index >> 3;
        let bitindex: usize = index & 7;
        matrix::get_bit(self.modules[byteindex].into(), bitindex)
    }

    /// Decodes the format information drawn in the grid.
    ///
    /// Both copies are read; the first one whose BCH check bits are consistent wins.
    /// Returns `None` if neither copy is valid.
    pub fn read_format_info(&self) -> Option<(QrCodeEcc, Mask)> {
        let size = usize::from(self.size);
        (0..2).find_map(|copy| {
            let raw: u32 = (0..15).fold(0, |acc, i| {
                let (x, y) = matrix::format_bit_positions(size, i)[copy];
                acc | (u32::from(self.get_module_bounded(x as u8, y as u8)) << i)
            });
            let bits: u32 = raw ^ FORMAT_MASK;
            let data: u32 = bits >> 10;
            if matrix::bch_remainder(data, FORMAT_GENERATOR) != bits & 0x3ff {
                return None;
            }
            Some((QrCodeEcc::from_format_bits((data >> 3) as u8), Mask::new((data & 7) as u8)))
        })
    }

    /// Decodes the version information blocks, present from version 7 upward.
    ///
    /// Returns `None` for smaller symbols or if neither block is valid.
    pub fn read_version_info(&self) -> Option<Version> {
        if self.version.value() < 7 {
            return None;
        }
        let size = usize::from(self.size);
        (0..2).find_map(|copy| {
            let bits: u32 = (0..18).fold(0, |acc, i| {
                let (x, y) = matrix::version_bit_positions(size, i)[copy];
                acc | (u32::from(self.get_module_bounded(x as u8, y as u8)) << i)
            });
            let data: u32 = bits >> 12;
            let valid = matrix::bch_remainder(data, VERSION_GENERATOR) == bits & 0xfff;
            if valid && (7..=u32::from(Version::MAX.value())).contains(&data) {
                Some(Version::new(data as u8))
            } else {
                None
            }
        })
    }
}

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Returns the table index of this level (in the range 0 to 3).
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// Returns the 2-bit indicator written into the format information.
    pub(crate) fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }

    fn from_format_bits(bits: u8) -> Self {
        use QrCodeEcc::*;
        match bits & 3 {
            1 => Low,
            0 => Medium,
            3 => Quartile,
            _ => High,
        }
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the side length in modules, `4 * version + 17`.
    pub const fn size(self) -> u8 {
        self.0 * 4 + 17
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7]. Use `Mask::try_from` for
    /// values that come from outside the program.
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Mask {
    type Error = QrError;

    fn try_from(mask: u8) -> Result<Self> {
        if mask <= 7 {
            Ok(Self(mask))
        } else {
            Err(QrError::InvalidMask(mask))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_version_hello_world() {
        let seg = QrSegment::from_text("HELLO WORLD");
        assert_eq!(QrCode::select_version(&seg, QrCodeEcc::Medium), Ok(Version::new(1)));
        assert_eq!(QrCode::select_version(&seg, QrCodeEcc::High), Ok(Version::new(2)));
    }

    #[test]
    fn test_select_version_boundaries() {
        // 41 digits take 4 + 10 + 13 * 10 + 7 = 151 of the 152 bits in version 1-L.
        let seg = QrSegment::from_text(&"7".repeat(41));
        assert_eq!(QrCode::select_version(&seg, QrCodeEcc::Low), Ok(Version::new(1)));
        let seg = QrSegment::from_text(&"7".repeat(42));
        assert_eq!(QrCode::select_version(&seg, QrCodeEcc::Low), Ok(Version::new(2)));
    }

    #[test]
    fn test_select_version_capacity_exceeded() {
        let seg = QrSegment::from_text(&"1".repeat(7089));
        assert_eq!(QrCode::select_version(&seg, QrCodeEcc::Low), Ok(Version::MAX));
        let seg = QrSegment::from_text(&"1".repeat(7090));
        assert_eq!(
            QrCode::select_version(&seg, QrCodeEcc::Low),
            Err(QrError::CapacityExceeded { needed: 23652, capacity: 23648 })
        );
    }

    #[test]
    fn test_hello_world_symbol() {
        let qr = QrCode::encode_text("HELLO WORLD", QrCodeEcc::Medium, Mask::new(0)).unwrap();
        assert_eq!(qr.version(), Version::new(1));
        assert_eq!(qr.size(), 21);
        assert_eq!(qr.mode(), QrSegmentMode::Alphanumeric);
        assert_eq!(qr.error_correction_level(), QrCodeEcc::Medium);
        assert_eq!(qr.read_format_info(), Some((QrCodeEcc::Medium, Mask::new(0))));
        assert_eq!(qr.read_version_info(), None);
    }

    #[test]
    fn test_get_module_out_of_bounds_is_light() {
        let qr = QrCode::encode_text("", QrCodeEcc::Low, Mask::new(1)).unwrap();
        assert!(qr.get_module(0, 0));
        assert!(!qr.get_module(7, 7));
        assert!(!qr.get_module(-1, 0));
        assert!(!qr.get_module(0, 21));
        assert!(!qr.get_module(21, 21));
    }

    #[test]
    fn test_encode_binary_uses_byte_mode() {
        let qr = QrCode::encode_binary(b"0123", QrCodeEcc::Quartile, Mask::new(6)).unwrap();
        assert_eq!(qr.mode(), QrSegmentMode::Byte);
        assert_eq!(qr.read_format_info(), Some((QrCodeEcc::Quartile, Mask::new(6))));
    }

    #[test]
    fn test_version_info_is_readable() {
        let qr = QrCode::encode_binary(&[0x5a; 200], QrCodeEcc::Low, Mask::new(2)).unwrap();
        assert_eq!(qr.version(), Version::new(9));
        assert_eq!(qr.read_version_info(), Some(Version::new(9)));
    }

    #[test]
    fn test_kanji_segment_is_rejected() {
        let seg = QrSegment::new(QrSegmentMode::Kanji, 1, vec![(0x1aa, 13)]);
        assert_eq!(
            QrCode::encode_segment(&seg, QrCodeEcc::Low, Mask::new(0)),
            Err(QrError::UnsupportedMode(QrSegmentMode::Kanji))
        );
    }

    #[test]
    fn test_mask_try_from() {
        assert_eq!(Mask::try_from(7), Ok(Mask::new(7)));
        assert_eq!(Mask::try_from(8), Err(QrError::InvalidMask(8)));
    }

    #[test]
    fn test_ecc_format_bits_round_trip() {
        for ecl in [QrCodeEcc::Low, QrCodeEcc::Medium, QrCodeEcc::Quartile, QrCodeEcc::High] {
            assert_eq!(QrCodeEcc::from_format_bits(ecl.format_bits()), ecl);
        }
    }

    #[test]
    fn test_version_size() {
        assert_eq!(Version::MIN.size(), 21);
        assert_eq!(Version::MAX.size(), 177);
    }
}
