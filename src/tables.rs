//! Static capacity, block structure and alignment tables for QR Code Model 2.
//!
//! The error correction tables come straight from the standard. Character
//! capacities and alignment pattern coordinates are derived from them at
//! compile time, so every lookup is a read of constant data.

use crate::mode::QrSegmentMode;
use crate::qrcode::{QrCodeEcc, Version};

// Index: [error correction level ordinal][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

// Index: [mode ordinal][version range: 1-9, 10-26, 27-40]
const CHAR_COUNT_BITS: [[u8; 3]; 4] = [
    [10, 12, 14], // Numeric
    [9, 11, 13],  // Alphanumeric
    [8, 16, 16],  // Byte
    [8, 10, 12],  // Kanji
];

/// Maximum payload units, indexed by `[version][ecl ordinal][mode ordinal]`.
static CHARACTER_CAPACITY: [[[u16; 4]; 4]; 41] = build_capacity_table();

/// Alignment pattern centre coordinates per version; unused slots are zero.
static ALIGNMENT_PATTERN_POSITIONS: [[u8; 7]; 41] = build_alignment_table();

const fn num_raw_data_modules_at(ver: usize) -> usize {
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let numalign = ver / 7 + 2;
        result -= (25 * numalign - 10) * numalign - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}

const fn num_data_codewords_at(ver: usize, ecl: usize) -> usize {
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[ecl][ver] as usize;
    num_raw_data_modules_at(ver) / 8 - ECC_CODEWORDS_PER_BLOCK[ecl][ver] as usize * blocks
}

const fn char_count_bits_at(mode: usize, ver: usize) -> usize {
    CHAR_COUNT_BITS[mode][(ver + 7) / 17] as usize
}

// Largest unit count whose packed payload fits in `available` bits.
const fn max_units(mode: usize, available: usize) -> usize {
    match mode {
        0 => {
            let rem = available % 10;
            available / 10 * 3
                + if rem >= 7 {
                    2
                } else if rem >= 4 {
                    1
                } else {
                    0
                }
        }
        1 => available / 11 * 2 + if available % 11 >= 6 { 1 } else { 0 },
        2 => available / 8,
        _ => available / 13,
    }
}

const fn build_capacity_table() -> [[[u16; 4]; 4]; 41] {
    let mut table = [[[0u16; 4]; 4]; 41];
    let mut ver = 1;
    while ver <= 40 {
        let mut ecl = 0;
        while ecl < 4 {
            let databits = num_data_codewords_at(ver, ecl) * 8;
            let mut mode = 0;
            while mode < 4 {
                let ccbits = char_count_bits_at(mode, ver);
                let units = max_units(mode, databits - 4 - ccbits);
                let limit = (1 << ccbits) - 1;
                let capped = if units < limit { units } else { limit };
                table[ver][ecl][mode] = capped as u16;
                mode += 1;
            }
            ecl += 1;
        }
        ver += 1;
    }
    table
}

const fn build_alignment_table() -> [[u8; 7]; 41] {
    let mut table = [[0u8; 7]; 41];
    let mut ver = 2;
    while ver <= 40 {
        let numalign = ver / 7 + 2;
        let step = if ver == 32 {
            26
        } else {
            (ver * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
        };
        let size = ver * 4 + 17;
        table[ver][0] = 6;
        let mut i = 0;
        while i < numalign - 1 {
            table[ver][numalign - 1 - i] = (size - 7 - i * step) as u8;
            i += 1;
        }
        ver += 1;
    }
    table
}

/// Number of modules available for data and error correction bits,
/// after all function patterns are excluded. May not be a multiple of 8.
pub fn num_raw_data_modules(ver: Version) -> usize {
    num_raw_data_modules_at(usize::from(ver.value()))
}

/// Total codewords (data plus error correction) a symbol of this version holds.
pub fn num_raw_codewords(ver: Version) -> usize {
    num_raw_data_modules(ver) / 8
}

/// Number of 8-bit data codewords for the given version and level.
pub fn num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
    num_data_codewords_at(usize::from(ver.value()), ecl.ordinal())
}

/// Width of the character count indicator.
pub fn char_count_bits(mode: QrSegmentMode, ver: Version) -> u8 {
    CHAR_COUNT_BITS[mode.ordinal()][usize::from((ver.value() + 7) / 17)]
}

/// Maximum number of payload units (digits, characters, bytes or kanji)
/// a symbol of this version and level holds in the given mode.
pub fn character_capacity(ver: Version, ecl: QrCodeEcc, mode: QrSegmentMode) -> usize {
    usize::from(CHARACTER_CAPACITY[usize::from(ver.value())][ecl.ordinal()][mode.ordinal()])
}

/// Centre coordinates of the alignment patterns, ascending. Empty for version 1.
pub fn alignment_pattern_positions(ver: Version) -> &'static [u8] {
    let v = usize::from(ver.value());
    let count = if v == 1 { 0 } else { v / 7 + 2 };
    &ALIGNMENT_PATTERN_POSITIONS[v][..count]
}

/// A run of equally sized blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGroup {
    pub count: usize,
    pub data_len: usize,
}

/// How a symbol's codewords are split into Reed-Solomon blocks.
///
/// At most two block sizes coexist; the second group's blocks carry one more
/// data codeword than the first. Every block has the same number of error
/// correction codewords.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSpec {
    pub ec_len: usize,
    pub groups: [BlockGroup; 2],
}

impl BlockSpec {
    pub fn num_blocks(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn num_data_codewords(&self) -> usize {
        self.groups.iter().map(|g| g.count * g.data_len).sum()
    }

    /// Data length of each block in order, short blocks first.
    pub fn data_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups
            .iter()
            .flat_map(|g| std::iter::repeat(g.data_len).take(g.count))
    }
}

/// Block structure for the given version and level.
pub fn block_spec(ver: Version, ecl: QrCodeEcc) -> BlockSpec {
    let v = usize::from(ver.value());
    let e = ecl.ordinal();
    let numblocks = NUM_ERROR_CORRECTION_BLOCKS[e][v] as usize;
    let ec_len = ECC_CODEWORDS_PER_BLOCK[e][v] as usize;
    let rawcodewords = num_raw_codewords(ver);
    let numshortblocks = numblocks - rawcodewords % numblocks;
    let shortblockdatalen = rawcodewords / numblocks - ec_len;
    BlockSpec {
        ec_len,
        groups: [
            BlockGroup {
                count: numshortblocks,
                data_len: shortblockdatalen,
            },
            BlockGroup {
                count: numblocks - numshortblocks,
                data_len: shortblockdatalen + 1,
            },
        ],
    }
}
