//! The module grid under construction and its function patterns.
//!
//! Every cell starts [`Module::Unassigned`]. Function patterns (finders with
//! their separators, alignment and timing patterns, format and version
//! information) are stamped first; data placement then fills exactly the
//! cells that are still unassigned.

use crate::error::{QrError, Result};
use crate::qrcode::{Mask, QrCodeEcc, Version};
use crate::tables;

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1.
pub const FORMAT_GENERATOR: u32 = 0b101_0011_0111;

/// XOR mask applied to the 15 format bits.
pub const FORMAT_MASK: u32 = 0b101_0100_0001_0010;

/// BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1.
pub const VERSION_GENERATOR: u32 = 0b1_1111_0010_0101;

/// State of one cell of the grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Module {
    Unassigned,
    Dark,
    Light,
}

impl Module {
    pub fn from_dark(isdark: bool) -> Self {
        if isdark {
            Module::Dark
        } else {
            Module::Light
        }
    }
}

/// A square grid of tri-state modules, addressed as `(x, y)` with `x` the column.
#[derive(Clone, Debug)]
pub struct ModuleMatrix {
    size: usize,
    modules: Vec<Module>,
}

impl ModuleMatrix {
    /// Creates a grid for the given version with every module unassigned.
    pub fn new(ver: Version) -> Self {
        let size = usize::from(ver.size());
        Self {
            size,
            modules: vec![Module::Unassigned; size * size],
        }
    }

    /// Creates a grid with all function patterns drawn for the given version,
    /// error correction level and mask.
    pub fn with_function_patterns(ver: Version, ecl: QrCodeEcc, mask: Mask) -> Self {
        let mut result = Self::new(ver);
        result.draw_finder_patterns();
        result.draw_alignment_patterns(ver);
        result.draw_timing_patterns();
        result.draw_format_bits(ecl, mask);
        if ver.value() >= 7 {
            result.draw_version_bits(ver);
        }
        result
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> Module {
        self.modules[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, module: Module) {
        self.modules[y * self.size + x] = module;
    }

    fn set_unbounded(&mut self, x: i32, y: i32, module: Module) {
        let range = 0..self.size as i32;
        if range.contains(&x) && range.contains(&y) {
            self.set(x as usize, y as usize, module);
        }
    }

    pub fn unassigned_count(&self) -> usize {
        self.modules.iter().filter(|&&m| m == Module::Unassigned).count()
    }

    /// Packs the finished grid into bits (1 = dark), row-major, least
    /// significant bit first within each byte.
    ///
    /// # Errors
    ///
    /// [`QrError::UnassignedModule`] naming the first cell still unassigned.
    pub fn finish(self) -> Result<Vec<u8>> {
        let mut packed = vec![0u8; (self.modules.len() + 7) / 8];
        for (index, &module) in self.modules.iter().enumerate() {
            match module {
                Module::Dark => packed[index >> 3] |= 1 << (index & 7),
                Module::Light => {}
                Module::Unassigned => {
                    return Err(QrError::UnassignedModule {
                        x: index % self.size,
                        y: index / self.size,
                    })
                }
            }
        }
        Ok(packed)
    }

    // Each finder is drawn with its separator as a 9x9 window clipped to the grid:
    // Chebyshev distance 2 and 4 from the centre are light, 0, 1 and 3 are dark.
    fn draw_finder_patterns(&mut self) {
        let far = self.size as i32 - 4;
        for (cx, cy) in [(3, 3), (far, 3), (3, far)] {
            for dy in -4i32..=4 {
                for dx in -4i32..=4 {
                    let dist: i32 = dx.abs().max(dy.abs());
                    let module = Module::from_dark(dist != 2 && dist != 4);
                    self.set_unbounded(cx + dx, cy + dy, module);
                }
            }
        }
    }

    fn draw_alignment_patterns(&mut self, ver: Version) {
        let alignpatpos: &[u8] = tables::alignment_pattern_positions(ver);
        for &cy in alignpatpos {
            for &cx in alignpatpos {
                let (cx, cy) = (usize::from(cx), usize::from(cy));
                // Centres inside a finder pattern are skipped.
                if self.get(cx, cy) != Module::Unassigned {
                    continue;
                }
                for dy in 0..5usize {
                    for dx in 0..5usize {
                        let dist = dx.abs_diff(2).max(dy.abs_diff(2));
                        self.set(cx + dx - 2, cy + dy - 2, Module::from_dark(dist != 1));
                    }
                }
            }
        }
    }

    fn draw_timing_patterns(&mut self) {
        for i in 8..self.size - 8 {
            let module = Module::from_dark(i % 2 == 0);
            if self.get(6, i) == Module::Unassigned {
                self.set(6, i, module);
            }
            if self.get(i, 6) == Module::Unassigned {
                self.set(i, 6, module);
            }
        }
    }

    fn draw_format_bits(&mut self, ecl: QrCodeEcc, mask: Mask) {
        let bits: u32 = format_bits(ecl, mask);
        for i in 0..15 {
            let module = Module::from_dark(get_bit(bits, i));
            for (x, y) in format_bit_positions(self.size, i) {
                self.set(x, y, module);
            }
        }
        self.set(8, self.size - 8, Module::Dark);
    }

    fn draw_version_bits(&mut self, ver: Version) {
        let bits: u32 = version_bits(ver);
        for i in 0..18 {
            let module = Module::from_dark(get_bit(bits, i));
            for (x, y) in version_bit_positions(self.size, i) {
                self.set(x, y, module);
            }
        }
    }
}

/// Returns the two `(x, y)` cells holding format bit `i` (0 = least significant).
pub fn format_bit_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    let first = match i {
        0..=5 => (8, i),
        6 => (8, 7),
        7 => (8, 8),
        8 => (7, 8),
        _ => (14 - i, 8),
    };
    let second = if i < 8 {
        (size - 1 - i, 8)
    } else {
        (8, size - 15 + i)
    };
    [first, second]
}

/// Returns the two `(x, y)` cells holding version bit `i`: the top-right block
/// and its transpose in the bottom-left.
pub fn version_bit_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    let a = size - 11 + i % 3;
    let b = i / 3;
    [(a, b), (b, a)]
}

fn bit_length(x: u32) -> u32 {
    u32::BITS - x.leading_zeros()
}

/// Returns the remainder of `data * x^(deg g)` modulo `generator` over GF(2).
pub fn bch_remainder(data: u32, generator: u32) -> u32 {
    let genlen = bit_length(generator);
    let mut rem = data << (genlen - 1);
    while bit_length(rem) >= genlen {
        rem ^= generator << (bit_length(rem) - genlen);
    }
    rem
}

/// Returns the 15 masked format bits for the given level and mask.
pub fn format_bits(ecl: QrCodeEcc, mask: Mask) -> u32 {
    let data = u32::from((ecl.format_bits() << 3) | mask.value());
    ((data << 10) | bch_remainder(data, FORMAT_GENERATOR)) ^ FORMAT_MASK
}

/// Returns the 18 version information bits.
pub fn version_bits(ver: Version) -> u32 {
    let data = u32::from(ver.value());
    (data << 12) | bch_remainder(data, VERSION_GENERATOR)
}

pub(crate) fn get_bit(x: u32, i: usize) -> bool {
    ((x >> i) & 1) != 0
}
