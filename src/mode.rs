//! Input classification for the four QR data modes.
//!
//! A caller hands over text or bytes plus optional mode and codec hints; this
//! module turns that into a validated [`QrSegment`], the payload every later
//! stage works from. Auto-detection tries Numeric, then Alphanumeric, then
//! Kanji, and falls back to Byte.

use core::fmt;
use core::str::FromStr;
use std::borrow::Cow;

use encoding_rs::Encoding;
use log::debug;

use crate::error::{QrError, Result};
use crate::qrcode::Version;
use crate::tables;

pub(crate) static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

const LATIN1_LABELS: [&str; 8] = [
    "latin1",
    "latin-1",
    "l1",
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso-ir-100",
    "cp819",
];

/// Encoding scheme for the payload characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum QrSegmentMode {
    Numeric,
    Alphanumeric,
    Byte,
    Kanji,
}

impl QrSegmentMode {
    /// The 4-bit mode indicator.
    pub(crate) fn mode_bits(self) -> u32 {
        use QrSegmentMode::*;
        match self {
            Numeric => 0x1,
            Alphanumeric => 0x2,
            Byte => 0x4,
            Kanji => 0x8,
        }
    }

    pub(crate) fn ordinal(self) -> usize {
        use QrSegmentMode::*;
        match self {
            Numeric => 0,
            Alphanumeric => 1,
            Byte => 2,
            Kanji => 3,
        }
    }

    /// Width of the character count indicator for this mode at the given version.
    pub fn num_char_count_bits(self, ver: Version) -> u8 {
        tables::char_count_bits(self, ver)
    }

    /// The mode's name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        use QrSegmentMode::*;
        match self {
            Numeric => "numeric",
            Alphanumeric => "alphanumeric",
            Byte => "binary",
            Kanji => "kanji",
        }
    }
}

impl fmt::Display for QrSegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QrSegmentMode {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            "alphanumeric" => Ok(Self::Alphanumeric),
            "binary" | "byte" => Ok(Self::Byte),
            "kanji" => Ok(Self::Kanji),
            _ => Err(QrError::Mode(format!(
                "unknown mode {s:?}, expected numeric, alphanumeric, binary or kanji"
            ))),
        }
    }
}

/// Raw data handed to the encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Text(String),
    Bytes(Vec<u8>),
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_owned())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl From<&String> for Input {
    fn from(text: &String) -> Self {
        Input::Text(text.clone())
    }
}

impl From<&[u8]> for Input {
    fn from(data: &[u8]) -> Self {
        Input::Bytes(data.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Input {
    fn from(data: &[u8; N]) -> Self {
        Input::Bytes(data.to_vec())
    }
}

impl From<Vec<u8>> for Input {
    fn from(data: Vec<u8>) -> Self {
        Input::Bytes(data)
    }
}

// Numbers are encoded through their decimal representation.
macro_rules! impl_input_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Input {
                fn from(n: $t) -> Self {
                    Input::Text(n.to_string())
                }
            }
        )*
    };
}

impl_input_from_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

/// A named text codec used for Byte mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteEncoding {
    /// ISO-8859-1, one byte per code point up to U+00FF.
    Latin1,
    /// Any other codec known to `encoding_rs`.
    Codec(&'static Encoding),
}

impl ByteEncoding {
    /// Looks up a codec by label, case-insensitively.
    ///
    /// Labels follow the WHATWG Encoding Standard, except that the ISO-8859-1
    /// family resolves to true Latin-1 instead of windows-1252.
    pub fn for_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        if LATIN1_LABELS.contains(&normalized.as_str()) {
            return Ok(Self::Latin1);
        }
        let encoding = Encoding::for_label(normalized.as_bytes())
            .ok_or_else(|| QrError::Value(format!("unknown encoding {label:?}")))?;
        if encoding.output_encoding() != encoding {
            return Err(QrError::Value(format!(
                "encoding {} cannot be used to encode text",
                encoding.name()
            )));
        }
        Ok(Self::Codec(encoding))
    }

    pub fn utf8() -> Self {
        Self::Codec(encoding_rs::UTF_8)
    }

    pub fn shift_jis() -> Self {
        Self::Codec(encoding_rs::SHIFT_JIS)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Codec(encoding) => encoding.name(),
        }
    }

    /// Encodes text, failing if any character has no representation.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(c).map_err(|_| {
                        let name = self.name();
                        QrError::Value(format!("character {c:?} cannot be encoded as {name}"))
                    })
                })
                .collect(),
            Self::Codec(encoding) => {
                let (bytes, _, had_errors) = encoding.encode(text);
                if had_errors {
                    Err(QrError::Value(format!(
                        "text contains characters that cannot be encoded as {}",
                        encoding.name()
                    )))
                } else {
                    Ok(bytes.into_owned())
                }
            }
        }
    }

    /// Decodes bytes, failing on malformed sequences.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Codec(encoding) => encoding
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(Cow::into_owned)
                .ok_or_else(|| {
                    QrError::Value(format!("data is not valid {}", encoding.name()))
                }),
        }
    }
}

/// The validated payload of a symbol: its mode and the unit sequence.
///
/// `data` holds ASCII digits for Numeric, ASCII characters from the 45-symbol
/// set for Alphanumeric, raw bytes for Byte, and big-endian Shift-JIS pairs
/// for Kanji. Instances are only created through the checking constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSegment {
    mode: QrSegmentMode,
    numchars: usize,
    data: Vec<u8>,
    encoding: Option<ByteEncoding>,
}

impl QrSegment {
    /// Creates a Numeric segment from a string of decimal digits.
    pub fn make_numeric(text: &str) -> Result<Self> {
        if !Self::is_numeric(text) {
            return Err(QrError::Mode(format!(
                "{text:?} contains characters other than decimal digits"
            )));
        }
        Ok(Self::new(QrSegmentMode::Numeric, text.as_bytes().to_vec(), None))
    }

    /// Creates an Alphanumeric segment.
    ///
    /// Allowed characters: 0–9, A–Z (uppercase), space, `$`, `%`, `*`, `+`, `-`, `.`, `/`, `:`.
    pub fn make_alphanumeric(text: &str) -> Result<Self> {
        if !Self::is_alphanumeric(text) {
            return Err(QrError::Mode(format!(
                "{text:?} contains characters outside the alphanumeric set"
            )));
        }
        Ok(Self::new(QrSegmentMode::Alphanumeric, text.as_bytes().to_vec(), None))
    }

    /// Creates a Kanji segment from text whose every character is a
    /// double-byte Shift-JIS kanji.
    pub fn make_kanji(text: &str) -> Result<Self> {
        Self::to_kanji(text)
            .map(|sjis| Self::new(QrSegmentMode::Kanji, sjis, Some(ByteEncoding::shift_jis())))
            .ok_or_else(|| {
                QrError::Mode(format!("{text:?} cannot be represented in kanji mode"))
            })
    }

    /// Creates a Byte segment from raw bytes. No codec is attached.
    pub fn make_bytes(data: &[u8]) -> Self {
        Self::new(QrSegmentMode::Byte, data.to_vec(), None)
    }

    /// Creates a Byte segment by encoding text.
    ///
    /// A named codec must represent every character. Without one, ISO-8859-1
    /// is tried first and UTF-8 is used when Latin-1 cannot hold the text.
    pub fn make_text_bytes(text: &str, encoding: Option<ByteEncoding>) -> Result<Self> {
        let (data, encoding) = match encoding {
            Some(encoding) => (encoding.encode(text)?, encoding),
            None => match ByteEncoding::Latin1.encode(text) {
                Ok(data) => (data, ByteEncoding::Latin1),
                Err(_) => (ByteEncoding::utf8().encode(text)?, ByteEncoding::utf8()),
            },
        };
        Ok(Self::new(QrSegmentMode::Byte, data, Some(encoding)))
    }

    fn new(mode: QrSegmentMode, data: Vec<u8>, encoding: Option<ByteEncoding>) -> Self {
        let numchars = match mode {
            QrSegmentMode::Kanji => data.len() / 2,
            _ => data.len(),
        };
        Self {
            mode,
            numchars,
            data,
            encoding,
        }
    }

    pub fn mode(&self) -> QrSegmentMode {
        self.mode
    }

    /// Count of payload units: digits, characters, bytes or kanji.
    pub fn num_chars(&self) -> usize {
        self.numchars
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The codec that produced `data`, if any.
    pub fn encoding(&self) -> Option<ByteEncoding> {
        self.encoding
    }

    pub fn is_numeric(text: &str) -> bool {
        text.chars().all(|c| ('0'..='9').contains(&c))
    }

    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }

    /// Returns the Shift-JIS bytes of `text` if every character is a kanji
    /// in the double-byte ranges the standard allows.
    pub fn to_kanji(text: &str) -> Option<Vec<u8>> {
        let (sjis, _, had_errors) = encoding_rs::SHIFT_JIS.encode(text);
        (!had_errors && Self::is_kanji_bytes(&sjis)).then(|| sjis.into_owned())
    }

    /// Checks that `data` is a sequence of Shift-JIS pairs in 0x8140–0x9FFC
    /// or 0xE040–0xEBBF.
    pub fn is_kanji_bytes(data: &[u8]) -> bool {
        data.len() % 2 == 0
            && data.chunks_exact(2).all(|pair| {
                let code = u16::from_be_bytes([pair[0], pair[1]]);
                let trail_ok = matches!(pair[1], 0x40..=0x7e | 0x80..=0xfc);
                trail_ok && matches!(code, 0x8140..=0x9ffc | 0xe040..=0xebbf)
            })
    }
}

/// Classifies the input and builds its payload segment.
///
/// With `mode` set, the data is validated strictly against that mode. With an
/// `encoding` name, byte input is decoded through it first and Byte mode text
/// is encoded through it.
pub fn select_segment(
    input: &Input,
    mode: Option<QrSegmentMode>,
    encoding: Option<&str>,
) -> Result<QrSegment> {
    let encoding = encoding.map(ByteEncoding::for_label).transpose()?;
    let segment = match (input, encoding) {
        (Input::Bytes(bytes), Some(encoding)) => {
            let text = encoding.decode(bytes)?;
            let segment = match mode {
                Some(QrSegmentMode::Byte) => None,
                _ => Some(segment_for_text(&text, mode, Some(encoding))?),
            };
            match segment {
                Some(segment) if segment.mode() != QrSegmentMode::Byte => segment,
                // Byte mode carries the caller's bytes, not a re-encoding of them
                _ => QrSegment::new(QrSegmentMode::Byte, bytes.clone(), Some(encoding)),
            }
        }
        (Input::Bytes(bytes), None) => segment_for_bytes(bytes, mode)?,
        (Input::Text(text), encoding) => segment_for_text(text, mode, encoding)?,
    };
    debug!(
        "selected {} mode for {} units (encoding: {:?})",
        segment.mode(),
        segment.num_chars(),
        segment.encoding().map(ByteEncoding::name)
    );
    Ok(segment)
}

fn segment_for_text(
    text: &str,
    mode: Option<QrSegmentMode>,
    encoding: Option<ByteEncoding>,
) -> Result<QrSegment> {
    use QrSegmentMode::*;
    match mode {
        Some(Numeric) => QrSegment::make_numeric(text),
        Some(Alphanumeric) => QrSegment::make_alphanumeric(text),
        Some(Kanji) => QrSegment::make_kanji(text),
        Some(Byte) => QrSegment::make_text_bytes(text, encoding),
        None => {
            if QrSegment::is_numeric(text) {
                QrSegment::make_numeric(text)
            } else if QrSegment::is_alphanumeric(text) {
                QrSegment::make_alphanumeric(text)
            } else if let Some(sjis) = QrSegment::to_kanji(text) {
                Ok(QrSegment::new(Kanji, sjis, Some(ByteEncoding::shift_jis())))
            } else {
                QrSegment::make_text_bytes(text, encoding)
            }
        }
    }
}

fn segment_for_bytes(bytes: &[u8], mode: Option<QrSegmentMode>) -> Result<QrSegment> {
    use QrSegmentMode::*;
    let valid = match mode {
        None | Some(Byte) => return Ok(QrSegment::make_bytes(bytes)),
        Some(Numeric) => bytes.iter().all(u8::is_ascii_digit),
        Some(Alphanumeric) => bytes
            .iter()
            .all(|&b| b.is_ascii() && ALPHANUMERIC_CHARSET.contains(char::from(b))),
        Some(Kanji) => QrSegment::is_kanji_bytes(bytes),
    };
    match mode {
        Some(mode) if valid => {
            let encoding = (mode == Kanji).then(ByteEncoding::shift_jis);
            Ok(QrSegment::new(mode, bytes.to_vec(), encoding))
        }
        _ => Err(QrError::Mode(format!(
            "data cannot be represented in {} mode",
            mode.map_or("binary", QrSegmentMode::name)
        ))),
    }
}
