/// QR code encoding entry point.
///
/// This module ties the pipeline together: the input is classified into a
/// segment, a version and error correction level are planned, the data and
/// error correction codewords are built, placed into the module grid and
/// masked. It also holds the small value types shared by every stage.
use core::convert::TryFrom;
use core::fmt;
use core::str::FromStr;

use log::debug;

use crate::bitstream;
use crate::ecc;
use crate::error::{QrError, Result};
use crate::mask;
use crate::matrix::{Module, ModuleMatrix};
use crate::mode::{self, ByteEncoding, Input, QrSegment, QrSegmentMode};
use crate::planner;

/// A QR Code symbol, representing a square grid of dark and light modules.
///
/// Instances are immutable after creation. Create one with [`QrCode::encode`],
/// [`QrCode::encode_text`], [`QrCode::encode_binary`] or, from untyped
/// parameters, [`QrCode::create`].
///
/// # Example
///
/// ```rust
/// use qrsmith::{EncodeOptions, QrCode, QrCodeEcc};
///
/// let options = EncodeOptions::new().with_error(QrCodeEcc::Quartile);
/// let qr = QrCode::encode("HELLO WORLD", &options).unwrap();
///
/// assert_eq!(qr.designator(), "1-Q");
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    ecl: QrCodeEcc,
    mask: Mask,
    segment: QrSegment,
    matrix: ModuleMatrix,
}

impl QrCode {
    /// Encodes text, bytes or a number with the given options.
    ///
    /// Fails if a forced mode cannot represent the data, the codec cannot
    /// represent the text, or the data does not fit any permitted symbol.
    pub fn encode(data: impl Into<Input>, options: &EncodeOptions) -> Result<Self> {
        let input: Input = data.into();
        let segment = mode::select_segment(&input, options.mode, options.encoding.as_deref())?;
        let (version, ecl) =
            planner::plan(segment.mode(), segment.num_chars(), options.version, options.error)?;

        let datacodewords = bitstream::encode_segment(&segment, version, ecl);
        let allcodewords = ecc::add_ecc_and_interleave(&datacodewords, version, ecl);

        let mut matrix = ModuleMatrix::new(version);
        matrix.draw_codewords(&allcodewords);
        let mask = mask::finalize(&mut matrix, ecl, options.mask);

        debug!(
            "encoded {}-{} symbol in {} mode with mask {}",
            version.value(),
            ecl,
            segment.mode(),
            mask.value()
        );
        Ok(Self {
            version,
            ecl,
            mask,
            segment,
            matrix,
        })
    }

    /// Encodes text with automatic mode selection at the given level, picking
    /// the smallest version that fits.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self> {
        Self::encode(text, &EncodeOptions::new().with_error(ecl))
    }

    /// Encodes raw bytes in Byte mode at the given level. The bytes are
    /// placed in the symbol unchanged.
    pub fn encode_binary(data: &[u8], ecl: QrCodeEcc) -> Result<Self> {
        let options = EncodeOptions::new()
            .with_error(ecl)
            .with_mode(QrSegmentMode::Byte);
        Self::encode(data, &options)
    }

    /// Encodes with untyped parameters, validating each of them first.
    ///
    /// `error` is one of `L`, `M`, `Q`, `H` (or `7%`, `15%`, `25%`, `30%`),
    /// `version` is 1 to 40, `mode` is `numeric`, `alphanumeric`, `kanji` or
    /// `binary`, and `encoding` names a text codec.
    ///
    /// ```rust
    /// use qrsmith::QrCode;
    ///
    /// let qr = QrCode::create(123456, Some("h"), None, None, None).unwrap();
    /// assert_eq!(qr.data(), b"123456");
    /// ```
    pub fn create(
        data: impl Into<Input>,
        error: Option<&str>,
        version: Option<i64>,
        mode: Option<&str>,
        encoding: Option<&str>,
    ) -> Result<Self> {
        let options = EncodeOptions::parse(error, version, mode, encoding)?;
        Self::encode(data, &options)
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    pub fn mode(&self) -> QrSegmentMode {
        self.segment.mode()
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Side length in modules, between 21 and 177.
    pub fn size(&self) -> usize {
        self.matrix.size()
    }

    /// Version and level, e.g. `"1-L"`.
    pub fn designator(&self) -> String {
        format!("{}-{}", self.version.value(), self.ecl)
    }

    /// The encoded payload units: digits, characters, bytes or Shift-JIS pairs.
    pub fn data(&self) -> &[u8] {
        self.segment.data()
    }

    /// Name of the codec the payload was encoded with, if any.
    pub fn encoding(&self) -> Option<&'static str> {
        self.segment.encoding().map(ByteEncoding::name)
    }

    /// Returns the color of the module at `(x, y)`: `true` for dark.
    /// Coordinates outside the symbol are light.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        self.module(x, y).is_dark()
    }

    /// The module at `(x, y)`, or [`Module::QUIET`] outside the symbol.
    pub fn module(&self, x: i32, y: i32) -> Module {
        let range = 0..self.size() as i32;
        if range.contains(&x) && range.contains(&y) {
            self.matrix.get(x as usize, y as usize)
        } else {
            Module::QUIET
        }
    }

    /// All modules, row-major.
    pub fn modules(&self) -> &[Module] {
        self.matrix.modules()
    }

    /// Rows of dark flags, top to bottom.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.size())
            .map(|y| self.matrix.row(y).collect())
            .collect()
    }

    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }
}

/// Per-call encoding parameters. Every field left unset is chosen automatically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Error correction level.
    pub error: Option<QrCodeEcc>,
    pub version: Option<Version>,
    pub mode: Option<QrSegmentMode>,
    /// Codec label for Byte mode text, and for decoding byte input.
    pub encoding: Option<String>,
    /// Mask pattern; when set no penalty scoring is done.
    pub mask: Option<Mask>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates untyped parameters, see [`QrCode::create`].
    pub fn parse(
        error: Option<&str>,
        version: Option<i64>,
        mode: Option<&str>,
        encoding: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            error: error.map(str::parse::<QrCodeEcc>).transpose()?,
            version: version.map(Version::try_from).transpose()?,
            mode: mode.map(str::parse::<QrSegmentMode>).transpose()?,
            encoding: encoding.map(str::to_owned),
            mask: None,
        })
    }

    pub fn with_error(mut self, ecl: QrCodeEcc) -> Self {
        self.error = Some(ecl);
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_mode(mut self, mode: QrSegmentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }
}

/// Error correction level for a QR code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    #[default]
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    /// Returns an unsigned 2-bit integer (in the range 0 to 3).
    pub(crate) fn ordinal(self) -> usize {
        use QrCodeEcc::*;
        match self {
            Low => 0,
            Medium => 1,
            Quartile => 2,
            High => 3,
        }
    }

    /// Returns the 2-bit value stored in the format information.
    pub(crate) fn format_bits(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 1,
            Medium => 0,
            Quartile => 3,
            High => 2,
        }
    }

    /// Approximate share of damaged codewords the level can restore.
    pub fn recovery_percent(self) -> u8 {
        use QrCodeEcc::*;
        match self {
            Low => 7,
            Medium => 15,
            Quartile => 25,
            High => 30,
        }
    }

    fn letter(self) -> &'static str {
        use QrCodeEcc::*;
        match self {
            Low => "L",
            Medium => "M",
            Quartile => "Q",
            High => "H",
        }
    }
}

impl fmt::Display for QrCodeEcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

impl FromStr for QrCodeEcc {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        use QrCodeEcc::*;
        match s.trim().to_ascii_uppercase().as_str() {
            "L" | "7%" => Ok(Low),
            "M" | "15%" => Ok(Medium),
            "Q" | "25%" => Ok(Quartile),
            "H" | "30%" => Ok(High),
            _ => Err(QrError::ErrorLevel(s.to_owned())),
        }
    }
}

/// A QR code version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(
            Version::MIN.value() <= ver && ver <= Version::MAX.value(),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Returns the value, which is in the range [1, 40].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Every version, smallest first.
    pub fn all() -> impl Iterator<Item = Version> + Clone {
        (Self::MIN.0..=Self::MAX.0).map(Version)
    }
}

impl TryFrom<i64> for Version {
    type Error = QrError;

    fn try_from(ver: i64) -> Result<Self> {
        u8::try_from(ver)
            .ok()
            .filter(|v| (Self::MIN.0..=Self::MAX.0).contains(v))
            .map(Version)
            .ok_or(QrError::Version(ver))
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Mask(u8);

impl Mask {
    /// Creates a mask object from the given number.
    ///
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    /// Returns the value, which is in the range [0, 7].
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this pattern flips the module in column `x`, row `y`.
    pub fn inverts(self, x: usize, y: usize) -> bool {
        match self.0 {
            0 => (x + y) % 2 == 0,
            1 => y % 2 == 0,
            2 => x % 3 == 0,
            3 => (x + y) % 3 == 0,
            4 => (x / 3 + y / 2) % 2 == 0,
            5 => ((x * y) % 2) + ((x * y) % 3) == 0,
            6 => (((x * y) % 2) + ((x * y) % 3)) % 2 == 0,
            _ => (((x + y) % 2) + ((x * y) % 3)) % 2 == 0,
        }
    }
}
