//! Reed-Solomon error correction and codeword interleaving.

use once_cell::sync::Lazy;

use crate::gf256;
use crate::qrcode::{QrCodeEcc, Version};
use crate::tables::{self, BlockSpec};

/// Largest number of error correction codewords per block in any QR symbol.
pub const MAX_EC_DEGREE: usize = 30;

static GENERATORS: Lazy<Vec<ReedSolomonGenerator>> = Lazy::new(|| {
    (0..=MAX_EC_DEGREE)
        .map(ReedSolomonGenerator::new)
        .collect()
});

/// The generator polynomial of a given degree, built once and shared.
///
/// # Panics
///
/// Panics if `degree` is not in `1..=30`.
pub fn generator(degree: usize) -> &'static ReedSolomonGenerator {
    assert!((1..=MAX_EC_DEGREE).contains(&degree), "Degree out of range");
    &GENERATORS[degree]
}

/// Divisor for computing error correction codewords.
///
/// Holds the product of `(x - alpha^i)` for `i` in `0..degree`, without its
/// leading `x^degree` term, highest degree first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomonGenerator {
    divisor: Vec<u8>,
}

impl ReedSolomonGenerator {
    fn new(degree: usize) -> Self {
        let mut divisor = vec![0u8; degree];
        if degree == 0 {
            return Self { divisor };
        }
        // Start with the monomial x^0
        divisor[degree - 1] = 1;
        for i in 0..degree {
            let root = gf256::exp(i);
            for j in 0..degree {
                divisor[j] = gf256::multiply(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
        }
        Self { divisor }
    }

    pub fn degree(&self) -> usize {
        self.divisor.len()
    }

    /// Coefficients below the leading term, highest degree first.
    pub fn coefficients(&self) -> &[u8] {
        &self.divisor
    }

    /// Remainder of `data(x) * x^degree` divided by the generator: the error
    /// correction codewords for `data`.
    pub fn compute_remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.degree()];
        for &b in data {
            let factor: u8 = b ^ result[0];
            result.rotate_left(1);
            if let Some(last) = result.last_mut() {
                *last = 0;
            }
            for (x, &y) in result.iter_mut().zip(self.divisor.iter()) {
                *x ^= gf256::multiply(y, factor);
            }
        }
        result
    }
}

/// One block of data codewords and its error correction codewords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordBlock {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Splits data codewords into blocks and computes each block's error correction.
///
/// # Panics
///
/// Panics if `data` does not hold exactly the layout's data codeword count.
pub fn split_blocks(data: &[u8], layout: &BlockSpec) -> Vec<CodewordBlock> {
    assert_eq!(data.len(), layout.num_data_codewords(), "Invalid data length");
    let rs = generator(layout.ec_len);
    let mut rest: &[u8] = data;
    layout
        .data_lengths()
        .map(|datlen| {
            let (block, tail) = rest.split_at(datlen);
            rest = tail;
            CodewordBlock {
                data: block.to_vec(),
                ecc: rs.compute_remainder(block),
            }
        })
        .collect()
}

/// Interleaves blocks column by column: all data codewords first, then all
/// error correction codewords. Shorter blocks simply drop out of later columns.
pub fn interleave(blocks: &[CodewordBlock]) -> Vec<u8> {
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

/// Appends error correction to the data codewords and returns the final
/// codeword sequence placed in the symbol.
pub fn add_ecc_and_interleave(data: &[u8], version: Version, ecl: QrCodeEcc) -> Vec<u8> {
    let spec = tables::block_spec(version, ecl);
    let result = interleave(&split_blocks(data, &spec));
    debug_assert_eq!(result.len(), tables::num_raw_codewords(version));
    result
}
