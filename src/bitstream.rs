//! Data codeword construction.
//!
//! Packs the mode indicator, character count, payload, terminator and padding
//! into exactly the number of data codewords the symbol holds.

use crate::mode::{QrSegment, QrSegmentMode, ALPHANUMERIC_CHARSET};
use crate::qrcode::{QrCodeEcc, Version};
use crate::tables;

const PAD_BYTES: [u32; 2] = [0xec, 0x11];

/// An append-only sequence of bits, packed most significant bit first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BitBuffer {
    data: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: Vec::with_capacity((bits + 7) / 8),
            length: 0,
        }
    }

    /// Number of bits appended so far.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Appends the low `len` bits of `val`, most significant first.
    ///
    /// # Panics
    ///
    /// Panics if `len > 31` or `val` does not fit in `len` bits.
    pub fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0, "Value does not fit in bit length");
        for i in (0..len).rev() {
            let shift: usize = 7 - (self.length & 7);
            let bit = (((val >> i) & 1) as u8) << shift;
            if shift == 7 {
                self.data.push(bit);
            } else if let Some(last) = self.data.last_mut() {
                *last |= bit;
            }
            self.length += 1;
        }
    }

    /// The bits packed into bytes; a partial last byte is zero-filled.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer as codewords.
    ///
    /// # Panics
    ///
    /// Panics unless exactly `capacitybits` bits were written.
    pub fn into_codewords(self, capacitybits: usize) -> Vec<u8> {
        assert_eq!(self.length, capacitybits, "Bit stream does not fill the data capacity");
        self.data
    }
}

/// Builds the data codewords of a segment for the resolved version and level.
///
/// The segment must fit; [`crate::planner::plan`] guarantees this.
pub fn encode_segment(seg: &QrSegment, version: Version, ecl: QrCodeEcc) -> Vec<u8> {
    let datacapacitybits: usize = tables::num_data_codewords(version, ecl) * 8;
    let mut bb = BitBuffer::with_capacity(datacapacitybits);

    let ccbits = seg.mode().num_char_count_bits(version);
    debug_assert!(seg.num_chars() < 1 << ccbits);
    bb.append_bits(seg.mode().mode_bits(), 4);
    bb.append_bits(seg.num_chars() as u32, ccbits);
    append_payload(&mut bb, seg);
    assert!(bb.len() <= datacapacitybits, "Segment exceeds data capacity");

    // Add terminator and pad up to a byte if applicable
    let numzerobits: usize = core::cmp::min(4, datacapacitybits - bb.len());
    bb.append_bits(0, numzerobits as u8);
    let numzerobits: usize = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, numzerobits as u8);
    debug_assert_eq!(bb.len() % 8, 0);

    // Pad with alternating bytes until data capacity is reached
    for &padbyte in PAD_BYTES.iter().cycle() {
        if bb.len() >= datacapacitybits {
            break;
        }
        bb.append_bits(padbyte, 8);
    }
    bb.into_codewords(datacapacitybits)
}

fn append_payload(bb: &mut BitBuffer, seg: &QrSegment) {
    let data = seg.data();
    match seg.mode() {
        QrSegmentMode::Numeric => {
            // Groups of three digits; a trailing pair takes 7 bits, a single digit 4
            for group in data.chunks(3) {
                let value = group
                    .iter()
                    .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'));
                bb.append_bits(value, group.len() as u8 * 3 + 1);
            }
        }
        QrSegmentMode::Alphanumeric => {
            for pair in data.chunks(2) {
                match *pair {
                    [first, second] => {
                        let value = alphanumeric_code(first) * 45 + alphanumeric_code(second);
                        bb.append_bits(value, 11)
                    }
                    [single] => bb.append_bits(alphanumeric_code(single), 6),
                    _ => {}
                }
            }
        }
        QrSegmentMode::Byte => {
            for &b in data {
                bb.append_bits(u32::from(b), 8);
            }
        }
        QrSegmentMode::Kanji => {
            for pair in data.chunks_exact(2) {
                bb.append_bits(kanji_value(u16::from_be_bytes([pair[0], pair[1]])), 13);
            }
        }
    }
}

fn alphanumeric_code(c: u8) -> u32 {
    ALPHANUMERIC_CHARSET
        .bytes()
        .position(|x| x == c)
        .map_or(0, |i| i as u32)
}

/// Compacts a Shift-JIS kanji code into its 13-bit QR value.
fn kanji_value(code: u16) -> u32 {
    let reduced = if code <= 0x9ffc {
        code - 0x8140
    } else {
        code - 0xc140
    };
    u32::from(reduced >> 8) * 0xc0 + u32::from(reduced & 0xff)
}
