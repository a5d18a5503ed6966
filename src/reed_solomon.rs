//! Reed-Solomon error correction codewords and block interleaving.
//!
//! Polynomials are byte vectors with the highest-degree coefficient first.
//! Every operation that can cancel the leading term is followed by
//! [`trim_leading_zeros`], so `len() - 1` is always the true degree.

use crate::error::{QrError, Result};
use crate::gf256;
use crate::qrcode::{QrCodeEcc, Version};
use crate::tables;
use std::borrow::Cow;
use tracing::trace;

/// Computes error correction codewords for one fixed generator degree.
pub struct ReedSolomonGenerator {
    divisor: Cow<'static, [u8]>,
}

impl ReedSolomonGenerator {
    /// Creates a generator of the given degree, from the cache when available.
    pub fn new(degree: usize) -> Self {
        let divisor = match tables::cached_generator(degree) {
            Some(poly) => Cow::Borrowed(poly),
            None => Cow::Owned(build_generator(degree)),
        };
        Self { divisor }
    }

    /// Number of error correction codewords produced per block.
    pub fn degree(&self) -> usize {
        self.divisor.len() - 1
    }

    pub fn coefficients(&self) -> &[u8] {
        &self.divisor
    }

    /// Returns the remainder of `data * x^degree` divided by the generator,
    /// right-aligned into exactly `degree` bytes.
    ///
    /// # Errors
    ///
    /// [`QrError::LogOfZero`] if a zero leading coefficient survives trimming.
    pub fn compute_remainder(&self, data: &[u8]) -> Result<Vec<u8>> {
        let degree = self.degree();
        let mut dividend = Vec::with_capacity(data.len() + degree);
        dividend.extend_from_slice(data);
        dividend.resize(data.len() + degree, 0);

        let mut rem = trim_leading_zeros(dividend);
        let leadlog = gf256::log(self.divisor[0])?;
        while rem.len() >= self.divisor.len() {
            let factor = gf256::exp(gf256::log(rem[0])? + 255 - leadlog);
            for (x, &y) in rem.iter_mut().zip(self.divisor.iter()) {
                *x ^= gf256::multiply(y, factor);
            }
            rem = trim_leading_zeros(rem);
        }

        let mut result = vec![0u8; degree];
        result[degree - rem.len()..].copy_from_slice(&rem);
        Ok(result)
    }
}

/// Builds the generator `(x - α^0)(x - α^1)...(x - α^(degree-1))`.
pub fn build_generator(degree: usize) -> Vec<u8> {
    let mut poly = vec![1u8];
    for i in 0..degree {
        poly = trim_leading_zeros(multiply_polynomials(&poly, &[1, gf256::exp(i)]));
    }
    poly
}

/// Multiplies two polynomials over GF(256).
pub fn multiply_polynomials(a: &[u8], b: &[u8]) -> Vec<u8> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0u8; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            result[i + j] ^= gf256::multiply(x, y);
        }
    }
    result
}

/// Drops zero coefficients from the high-degree end.
pub fn trim_leading_zeros(mut poly: Vec<u8>) -> Vec<u8> {
    let zeros = poly.iter().take_while(|&&c| c == 0).count();
    poly.drain(..zeros);
    poly
}

/// One Reed-Solomon block: its slice of the data codewords and its EC codewords.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Splits the data codewords into blocks and computes each block's EC codewords.
///
/// # Errors
///
/// [`QrError::CodewordCount`] if `data` is not exactly the data capacity of the
/// version and level.
pub fn split_into_blocks(data: &[u8], ver: Version, ecl: QrCodeEcc) -> Result<Vec<Block>> {
    let expected = tables::data_codewords(ver, ecl);
    if data.len() != expected {
        return Err(QrError::CodewordCount {
            expected,
            actual: data.len(),
        });
    }
    let mut blocks = Vec::new();
    let mut dat: &[u8] = data;
    for &(count, total, datalen) in tables::rs_blocks(ver, ecl) {
        let datalen = usize::from(datalen);
        let rs = ReedSolomonGenerator::new(usize::from(total) - datalen);
        for _ in 0..count {
            let (head, tail) = dat.split_at(datalen);
            blocks.push(Block {
                data: head.to_vec(),
                ecc: rs.compute_remainder(head)?,
            });
            dat = tail;
        }
    }
    debug_assert!(dat.is_empty());
    Ok(blocks)
}

/// Interleaves blocks: the i-th data codeword of every block that has one, for
/// each i, then the EC codewords in the same fashion.
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();
    let mut result = Vec::with_capacity(total);
    let maxdata = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for i in 0..maxdata {
        result.extend(blocks.iter().filter_map(|b| b.data.get(i)));
    }
    let maxecc = blocks.iter().map(|b| b.ecc.len()).max().unwrap_or(0);
    for i in 0..maxecc {
        result.extend(blocks.iter().filter_map(|b| b.ecc.get(i)));
    }
    result
}

/// Returns the final codeword sequence for placement: data and EC codewords of
/// all blocks, interleaved.
pub fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: QrCodeEcc) -> Result<Vec<u8>> {
    let blocks = split_into_blocks(data, ver, ecl)?;
    trace!(blocks = blocks.len(), ecc_per_block = blocks[0].ecc.len(), "computed error correction");
    let result = interleave(&blocks);
    let expected = tables::total_codewords(ver, ecl);
    if result.len() != expected {
        return Err(QrError::CodewordCount {
            expected,
            actual: result.len(),
        });
    }
    Ok(result)
}
