//! Symbol size planning: picks the version and error correction level.

use log::debug;

use crate::error::{QrError, Result};
use crate::mode::QrSegmentMode;
use crate::qrcode::{QrCodeEcc, Version};
use crate::tables::character_capacity;

/// Levels in the order they are tried, most redundant first.
const ECC_SEARCH_ORDER: [QrCodeEcc; 4] = [
    QrCodeEcc::High,
    QrCodeEcc::Quartile,
    QrCodeEcc::Medium,
    QrCodeEcc::Low,
];

/// Resolves the final `(Version, QrCodeEcc)` for a payload of `numchars` units.
///
/// - Both fixed: the payload must fit that exact combination.
/// - Only the version fixed: the most redundant level that fits.
/// - Only the level fixed: the smallest version that fits.
/// - Neither: the smallest version, then the most redundant level at it.
///
/// Fails with [`QrError::DataOverflow`] when no permitted combination fits.
pub fn plan(
    mode: QrSegmentMode,
    numchars: usize,
    version: Option<Version>,
    ecl: Option<QrCodeEcc>,
) -> Result<(Version, QrCodeEcc)> {
    let fits = |&(ver, ecl): &(Version, QrCodeEcc)| numchars <= character_capacity(ver, ecl, mode);
    let resolved = match (version, ecl) {
        (Some(ver), Some(ecl)) => Some((ver, ecl)).filter(fits),
        (Some(ver), None) => ECC_SEARCH_ORDER.into_iter().map(|e| (ver, e)).find(fits),
        (None, Some(ecl)) => Version::all().map(|v| (v, ecl)).find(fits),
        (None, None) => Version::all()
            .flat_map(|v| ECC_SEARCH_ORDER.into_iter().map(move |e| (v, e)))
            .find(fits),
    };
    match resolved {
        Some((ver, ecl)) => {
            debug!(
                "planned version {} level {:?} for {} {} units (capacity {})",
                ver.value(),
                ecl,
                numchars,
                mode,
                character_capacity(ver, ecl, mode)
            );
            Ok((ver, ecl))
        }
        None => {
            // The largest capacity any permitted combination offers
            let ver = version.unwrap_or(Version::MAX);
            let ecl = ecl.unwrap_or(QrCodeEcc::Low);
            Err(QrError::DataOverflow {
                mode,
                length: numchars,
                capacity: character_capacity(ver, ecl, mode),
            })
        }
    }
}
