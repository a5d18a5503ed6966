//! Data placement in the zig-zag scan order, with masking applied on the fly.

use crate::matrix::{Module, ModuleMatrix};
use crate::qrcode::Mask;

impl Mask {
    /// Returns whether this mask inverts the module at column `x`, row `y`.
    pub fn inverts(self, x: usize, y: usize) -> bool {
        let (r, c) = (y, x);
        match self.value() {
            0 => (r + c) % 2 == 0,
            1 => r % 2 == 0,
            2 => c % 3 == 0,
            3 => (r + c) % 3 == 0,
            4 => (r / 2 + c / 3) % 2 == 0,
            5 => (r * c) % 2 + (r * c) % 3 == 0,
            6 => ((r * c) % 2 + (r * c) % 3) % 2 == 0,
            7 => ((r * c) % 3 + (r + c) % 2) % 2 == 0,
            _ => unreachable!(),
        }
    }
}

/// Fills every unassigned module of `matrix` from `data`, most significant bit
/// first, applying `mask` to each one.
///
/// Columns are scanned in pairs from the right edge, skipping the vertical
/// timing column, moving upward in the first pair and alternating direction
/// after each. Modules left over once `data` is exhausted are remainder bits
/// and start out light. Returns the number of modules placed.
pub fn draw_codewords(matrix: &mut ModuleMatrix, data: &[u8], mask: Mask) -> usize {
    let size = matrix.size() as i32;
    let totalbits = data.len() * 8;
    let mut i: usize = 0;
    let mut upward = true;
    let mut right: i32 = size - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            let y = (if upward { size - 1 - vert } else { vert }) as usize;
            for j in 0..2 {
                let x = (right - j) as usize;
                if matrix.get(x, y) != Module::Unassigned {
                    continue;
                }
                let isdark = i < totalbits && ((data[i >> 3] >> (7 - (i & 7))) & 1) != 0;
                matrix.set(x, y, Module::from_dark(isdark ^ mask.inverts(x, y)));
                i += 1;
            }
        }
        upward = !upward;
        right -= 2;
    }
    i
}
