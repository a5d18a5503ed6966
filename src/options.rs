//! Caller-facing encoding options.

use crate::qrcode::QrCodeEcc;

/// Full block, drawn for dark modules by default.
pub const DEFAULT_FILL: &str = "\u{2588}";

/// Light shade, drawn for light modules by default.
pub const DEFAULT_CLEAR: &str = "\u{2591}";

/// Parameters for [`crate::encode_with`].
///
/// The mask is kept as a raw number and validated when encoding, so an
/// out-of-range value surfaces as [`crate::QrError::InvalidMask`].
///
/// ```rust
/// use qirust::{EncodeOptions, QrCodeEcc};
///
/// let opts = EncodeOptions::new()
///     .with_ecl(QrCodeEcc::High)
///     .with_symbols("#", " ");
/// assert_eq!(opts.mask, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub ecl: QrCodeEcc,
    pub mask: u8,
    pub fill: String,
    pub clear: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            ecl: QrCodeEcc::Medium,
            mask: 1,
            fill: DEFAULT_FILL.to_string(),
            clear: DEFAULT_CLEAR.to_string(),
        }
    }
}

impl EncodeOptions {
    /// Create options with the default level, mask and symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error correction level.
    pub fn with_ecl(mut self, ecl: QrCodeEcc) -> Self {
        self.ecl = ecl;
        self
    }

    /// Set the mask pattern, 0 to 7.
    pub fn with_mask(mut self, mask: u8) -> Self {
        self.mask = mask;
        self
    }

    /// Set the symbols drawn for dark and light modules.
    pub fn with_symbols(mut self, fill: &str, clear: &str) -> Self {
        self.fill = fill.to_string();
        self.clear = clear.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = EncodeOptions::default();
        assert_eq!(opts.ecl, QrCodeEcc::Medium);
        assert_eq!(opts.mask, 1);
        assert_eq!(opts.fill, "█");
        assert_eq!(opts.clear, "░");
    }

    #[test]
    fn test_builders() {
        let opts = EncodeOptions::new().with_ecl(QrCodeEcc::Low).with_mask(6).with_symbols("X", ".");
        assert_eq!(opts.ecl, QrCodeEcc::Low);
        assert_eq!(opts.mask, 6);
        assert_eq!(opts.fill, "X");
        assert_eq!(opts.clear, ".");
    }
}
