//! Error type shared by every stage of the encoder.

use crate::segment::QrSegmentMode;
use thiserror::Error;

/// Errors produced while encoding a QR code.
///
/// Ways to handle [`QrError::CapacityExceeded`]:
///
/// - Decrease the error correction level if it was greater than `QrCodeEcc::Low`.
/// - Change the text to fit the character set of a cheaper mode (e.g. uppercase alphanumeric).
/// - Change the text or binary data to be shorter.
///
/// The remaining variants signal a caller mistake ([`QrError::InvalidMask`],
/// [`QrError::UnsupportedMode`]) or a broken internal invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload does not fit in a version 40 symbol at the requested level.
    #[error("data length = {needed} bits, max capacity = {capacity} bits")]
    CapacityExceeded {
        /// Bits the payload needs at version 40, including its header.
        needed: usize,
        /// Bits available at version 40 for the requested level.
        capacity: usize,
    },

    /// Mask pattern outside the range 0 to 7.
    #[error("mask pattern {0} out of range 0..=7")]
    InvalidMask(u8),

    /// A segment mode the bitstream builder cannot pack.
    #[error("unsupported segment mode: {0:?}")]
    UnsupportedMode(QrSegmentMode),

    /// The logarithm of zero was requested in GF(256).
    #[error("logarithm of zero requested in GF(256)")]
    LogOfZero,

    /// A write went past the end of a fixed-capacity bit buffer.
    #[error("bit buffer overflow: {requested} bits requested, {remaining} remaining")]
    BufferOverflow {
        /// Bits the caller tried to append.
        requested: usize,
        /// Bits still free in the buffer.
        remaining: usize,
    },

    /// A module was still unassigned when the symbol was finalized.
    #[error("module ({x}, {y}) left unassigned")]
    UnassignedModule {
        /// Column of the module.
        x: usize,
        /// Row of the module.
        y: usize,
    },

    /// A codeword sequence had the wrong length for its version and level.
    #[error("expected {expected} codewords, got {actual}")]
    CodewordCount {
        /// Length required by the capacity tables.
        expected: usize,
        /// Length actually produced.
        actual: usize,
    },
}

/// Result alias for encoder operations.
pub type Result<T> = std::result::Result<T, QrError>;
