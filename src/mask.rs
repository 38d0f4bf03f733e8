//! Mask selection and format/version information.
//!
//! Each of the eight masks is tried on the data modules with its format bits
//! in place, the candidate is scored with the four penalty rules, and the
//! lowest score wins (ties go to the lower mask id).

use log::{debug, trace};

use crate::matrix::ModuleMatrix;
use crate::qrcode::{Mask, QrCodeEcc, Version};

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

/// The 15-bit format word: level and mask, 10 BCH bits, XORed with 0x5412.
pub fn format_info_bits(ecl: QrCodeEcc, mask: Mask) -> u32 {
    let data = u32::from((ecl.format_bits() << 3) | mask.value());
    let mut rem: u32 = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * 0x537);
    }
    ((data << 10) | rem) ^ 0x5412
}

/// The 18-bit version word: 6 version bits followed by 12 BCH bits.
pub fn version_info_bits(version: Version) -> u32 {
    let ver = u32::from(version.value());
    let mut rem: u32 = ver;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) * 0x1f25);
    }
    (ver << 12) | rem
}

/// Picks the mask with the lowest penalty for an unmasked matrix.
/// The matrix is left as it was given, apart from its format bits.
pub fn choose_mask(matrix: &mut ModuleMatrix, ecl: QrCodeEcc) -> Mask {
    let mut best = Mask::new(0);
    let mut minpenalty = i32::MAX;
    for i in 0u8..8 {
        let mask = Mask::new(i);
        matrix.apply_mask(mask);
        matrix.draw_format(ecl, mask);
        let penalty: i32 = penalty_score(matrix);
        trace!("mask {} penalty {}", i, penalty);
        if penalty < minpenalty {
            best = mask;
            minpenalty = penalty;
        }
        matrix.apply_mask(mask); // Undoes the mask due to XOR
    }
    debug!("chose mask {} with penalty {}", best.value(), minpenalty);
    best
}

/// Masks the data modules and writes format and version information.
///
/// With `mask` unset the lowest-penalty mask is chosen. Returns the mask applied.
pub fn finalize(matrix: &mut ModuleMatrix, ecl: QrCodeEcc, mask: Option<Mask>) -> Mask {
    matrix.draw_version_bits(version_info_bits(matrix.version()));
    let mask = match mask {
        Some(mask) => mask,
        None => choose_mask(matrix, ecl),
    };
    matrix.apply_mask(mask);
    matrix.draw_format(ecl, mask);
    mask
}

/// Total penalty of a matrix under the four standard rules.
pub fn penalty_score(matrix: &ModuleMatrix) -> i32 {
    let size = matrix.size();
    let mut result: i32 = 0;

    // Runs and finder-like patterns, in rows then columns
    for y in 0..size {
        result += line_penalty(matrix.row(y), size);
    }
    for x in 0..size {
        result += line_penalty(matrix.column(x), size);
    }

    result += block_penalty(size, |x, y| matrix.is_dark(x, y));
    result + balance_penalty(matrix.dark_count(), size * size)
}

// 2x2 blocks of one color
fn block_penalty(size: usize, is_dark: impl Fn(usize, usize) -> bool) -> i32 {
    let mut result: i32 = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let color: bool = is_dark(x, y);
            if color == is_dark(x + 1, y)
                && color == is_dark(x, y + 1)
                && color == is_dark(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }
    result
}

// Dark ratio, in whole 5% steps away from 50%, rounded down
fn balance_penalty(dark: usize, total: usize) -> i32 {
    let dark = dark as i32;
    let total = total as i32;
    let k: i32 = (dark * 20 - total * 10).abs() / total;
    k * PENALTY_N4
}

fn line_penalty(line: impl Iterator<Item = bool>, size: usize) -> i32 {
    let mut result: i32 = 0;
    let mut runcolor = false;
    let mut runlen: i32 = 0;
    let mut runhistory = FinderPenalty::new(size);
    for color in line {
        if color == runcolor {
            runlen += 1;
            if runlen == 5 {
                result += PENALTY_N1;
            } else if runlen > 5 {
                result += 1;
            }
        } else {
            runhistory.add_history(runlen);
            if !runcolor {
                result += runhistory.count_patterns() * PENALTY_N3;
            }
            runcolor = color;
            runlen = 1;
        }
    }
    result + runhistory.terminate_and_count(runcolor, runlen) * PENALTY_N3
}

/// Tracks the last seven run lengths of a line to spot 1:1:3:1:1 finder-like
/// patterns with four light modules on at least one side. The light border
/// around the symbol counts as part of the outermost runs.
struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: usize) -> Self {
        Self {
            qr_size: size as i32,
            run_history: [0; 7],
        }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size;
        }
        self.run_history.copy_within(0..6, 1);
        self.run_history[0] = currentrunlength;
    }

    // A pattern counts once, whether one or both sides carry the margin
    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        i32::from(
            n > 0
                && rh[2] == n
                && rh[3] == n * 3
                && rh[4] == n
                && rh[5] == n
                && (rh[0] >= n * 4 || rh[6] >= n * 4),
        )
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size;
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}
