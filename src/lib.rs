//! # qirust
//!
//! A Rust library for encoding text into QR codes.
//!
//! `qirust` encodes text or binary data into QR Code Model 2 symbols, versions 1 to 40, at any
//! of the four error correction levels. The whole input is carried in a single segment whose
//! mode (numeric, alphanumeric or byte) is the cheapest one able to represent it, and the mask
//! pattern is chosen by the caller. Finished symbols can be rendered as text, SVG or images.
//!
//! ## Features
//!
//! - Encode data in numeric, alphanumeric or byte (UTF-8) mode.
//! - Support four error correction levels: Low, Medium, Quartile, High.
//! - Render QR codes as text with custom symbols, PNG images, SVGs, or in-memory image buffers.
//! - Read the format and version information back out of a finished symbol.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qirust = "0.2" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a symbol as text, one line per module row:
//!
//! ```rust
//! use qirust::QrCodeEcc;
//!
//! let text = qirust::encode("HELLO WORLD", QrCodeEcc::Medium, 0, "##", "  ").unwrap();
//! assert_eq!(text.lines().count(), 21);
//! ```
//!
//! Generate an in-memory image buffer:
//!
//! ```rust
//! use qirust::helper::generate_image_buffer;
//!
//! let img = generate_image_buffer("Hello, World!").unwrap();
//! assert_eq!(img.dimensions(), (29, 29));
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: The encoding pipeline and the finished [`QrCode`].
//! - [`segment`], [`bitstream`], [`reed_solomon`], [`matrix`], [`placement`]: the pipeline stages.
//! - [`gf256`], [`tables`]: field arithmetic and reference tables.
//! - [`helper`]: Utilities for rendering QR codes in various formats.

#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod gf256;
pub mod helper;
pub mod matrix;
pub mod options;
pub mod placement;
pub mod qrcode;
pub mod reed_solomon;
pub mod segment;
pub mod tables;

pub use error::{QrError, Result};
pub use options::EncodeOptions;
pub use qrcode::{Mask, QrCode, QrCodeEcc, Version};
pub use segment::{QrSegment, QrSegmentMode};

/// Encodes `text` and renders the symbol, one line per module row.
///
/// Dark modules are drawn as `fill` and light modules as `clear`; every row ends with `\n`.
///
/// # Errors
///
/// [`QrError::InvalidMask`] if `mask` is above 7, [`QrError::CapacityExceeded`] if no
/// version holds the text at `ecl`.
pub fn encode(text: &str, ecl: QrCodeEcc, mask: u8, fill: &str, clear: &str) -> Result<String> {
    let mask = Mask::try_from(mask)?;
    let qr = QrCode::encode_text(text, ecl, mask)?;
    Ok(helper::to_text_string(&qr, fill, clear))
}

/// Same as [`encode`], taking its parameters from `opts`.
pub fn encode_with(text: &str, opts: &EncodeOptions) -> Result<String> {
    encode(text, opts.ecl, opts.mask, &opts.fill, &opts.clear)
}
