//! Integration tests for the public encoding entry points
//!
//! These cover mode detection, automatic sizing, parameter validation and the
//! structure of finished symbols as a scanner would read them.

use qrsmith::mask::format_info_bits;
use qrsmith::{
    EncodeOptions, Mask, ModuleKind, QrCode, QrCodeEcc, QrError, QrSegmentMode, Version,
};

fn auto(data: &str) -> QrCode {
    QrCode::encode(data, &EncodeOptions::default()).unwrap()
}

#[test]
fn test_mode_detection() {
    assert_eq!(auto("123456").mode(), QrSegmentMode::Numeric);
    assert_eq!(auto("123A").mode(), QrSegmentMode::Alphanumeric);
    assert_eq!(auto("123a").mode(), QrSegmentMode::Byte);
    assert_eq!(auto("点茗").mode(), QrSegmentMode::Kanji);
    assert_eq!(auto("点 a").mode(), QrSegmentMode::Byte);
}

#[test]
fn test_integer_input() {
    let qr = QrCode::encode(123456, &EncodeOptions::default()).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Numeric);
    assert_eq!(qr.data(), b"123456");

    // The minus sign is part of the alphanumeric set
    let qr = QrCode::encode(-42i64, &EncodeOptions::default()).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Alphanumeric);
    assert_eq!(qr.data(), b"-42");
}

#[test]
fn test_forced_mode_rejects_nonconforming_data() {
    let alnum = EncodeOptions::new().with_mode(QrSegmentMode::Alphanumeric);
    assert!(matches!(QrCode::encode("a", &alnum), Err(QrError::Mode(_))));

    let numeric = EncodeOptions::new().with_mode(QrSegmentMode::Numeric);
    assert!(matches!(QrCode::encode("b", &numeric), Err(QrError::Mode(_))));

    let kanji = EncodeOptions::new().with_mode(QrSegmentMode::Kanji);
    assert!(matches!(QrCode::encode("abc", &kanji), Err(QrError::Mode(_))));
}

#[test]
fn test_forced_byte_mode_on_digits() {
    let qr = QrCode::create("123", None, None, Some("binary"), None).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Byte);
    assert_eq!(qr.data(), b"123");
}

#[test]
fn test_auto_sizing() {
    let qr = auto(&"1".repeat(17));
    assert_eq!(qr.designator(), "1-H");

    let qr = QrCode::create("1".repeat(41), Some("L"), None, None, None).unwrap();
    assert_eq!(qr.designator(), "1-L");

    let qr = QrCode::create("1".repeat(42), Some("L"), None, None, None).unwrap();
    assert_eq!(qr.designator(), "2-L");
}

#[test]
fn test_fixed_version_overflow() {
    let err = QrCode::create("A".repeat(26), None, Some(1), None, None).unwrap_err();
    assert_eq!(
        err,
        QrError::DataOverflow {
            mode: QrSegmentMode::Alphanumeric,
            length: 26,
            capacity: 25,
        }
    );

    let qr = QrCode::create("A".repeat(25), Some("L"), Some(1), None, None).unwrap();
    assert_eq!(qr.designator(), "1-L");
    assert_eq!(qr.mode(), QrSegmentMode::Alphanumeric);
}

#[test]
fn test_overflow_beyond_largest_symbol() {
    let data = vec![0x55u8; 2954];
    let err = QrCode::encode_binary(&data, QrCodeEcc::Low).unwrap_err();
    assert!(matches!(err, QrError::DataOverflow { capacity: 2953, .. }));

    let qr = QrCode::encode_binary(&data[..2953], QrCodeEcc::Low).unwrap();
    assert_eq!(qr.version(), Version::MAX);
    assert_eq!(qr.size(), 177);
}

#[test]
fn test_parameter_validation() {
    assert_eq!(
        QrCode::create("x", None, Some(0), None, None).unwrap_err(),
        QrError::Version(0)
    );
    assert_eq!(
        QrCode::create("x", None, Some(41), None, None).unwrap_err(),
        QrError::Version(41)
    );
    assert_eq!(
        QrCode::create("x", Some("R"), None, None, None).unwrap_err(),
        QrError::ErrorLevel("R".to_owned())
    );
    assert!(matches!(
        QrCode::create("x", None, None, Some("murks"), None),
        Err(QrError::Mode(_))
    ));
    assert!(matches!(
        QrCode::create("x", None, None, None, Some("no-such-codec")),
        Err(QrError::Value(_))
    ));
}

#[test]
fn test_byte_mode_codecs() {
    let qr = auto("héllo");
    assert_eq!(qr.encoding(), Some("ISO-8859-1"));
    assert_eq!(qr.data(), &[b'h', 0xe9, b'l', b'l', b'o']);

    let qr = auto("hello ☃");
    assert_eq!(qr.encoding(), Some("UTF-8"));
    assert_eq!(qr.data(), "hello ☃".as_bytes());

    let err = QrCode::create("☃", None, None, None, Some("latin1")).unwrap_err();
    assert!(matches!(err, QrError::Value(_)));
}

#[test]
fn test_byte_input_with_encoding_is_reclassified() {
    let bytes = "点茗".as_bytes().to_vec();
    let qr = QrCode::create(bytes, None, None, None, Some("utf-8")).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Kanji);
    assert_eq!(qr.encoding(), Some("Shift_JIS"));
    assert_eq!(qr.data(), &[0x93, 0x5f, 0xe4, 0xaa]);

    let err = QrCode::create(&[0xffu8, 0xfe][..], None, None, None, Some("utf-8")).unwrap_err();
    assert!(matches!(err, QrError::Value(_)));
}

#[test]
fn test_byte_mode_keeps_bytes_given_with_encoding() {
    let qr = QrCode::create(&[0xedu8, 0x40][..], None, None, Some("binary"), Some("shift_jis"))
        .unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Byte);
    assert_eq!(qr.encoding(), Some("Shift_JIS"));
    assert_eq!(qr.data(), &[0xed, 0x40]);
}

#[test]
fn test_raw_bytes_are_preserved() {
    let data: Vec<u8> = (0..=255).collect();
    let qr = QrCode::encode(data.clone(), &EncodeOptions::default()).unwrap();
    assert_eq!(qr.mode(), QrSegmentMode::Byte);
    assert_eq!(qr.data(), data.as_slice());
    assert_eq!(qr.encoding(), None);
}

#[test]
fn test_encoding_is_idempotent() {
    let options = EncodeOptions::new()
        .with_error(QrCodeEcc::Quartile)
        .with_version(Version::new(10));
    let first = QrCode::encode("https://example.com/?q=idempotent", &options).unwrap();
    let second = QrCode::encode("https://example.com/?q=idempotent", &options).unwrap();
    assert_eq!(first.to_rows(), second.to_rows());
    assert_eq!(first.mask(), second.mask());
}

#[test]
fn test_function_patterns_in_finished_symbol() {
    let qr = QrCode::encode("Hello, World!", &EncodeOptions::new().with_version(Version::new(7)))
        .unwrap();
    let size = qr.size() as i32;
    assert_eq!(size, 45);

    // Finder corners and their light separators
    for (x, y) in [(0, 0), (size - 1, 0), (0, size - 1)] {
        assert!(qr.get_module(x, y));
        assert_eq!(qr.module(x, y).kind(), ModuleKind::Finder);
    }
    assert!(!qr.get_module(7, 0));
    assert!(!qr.get_module(size - 8, 7));

    // Timing lines alternate between the separators
    for i in 8..size - 8 {
        assert_eq!(qr.get_module(i, 6), i % 2 == 0);
        assert_eq!(qr.get_module(6, i), i % 2 == 0);
    }

    assert!(qr.get_module(8, size - 8));
    assert_eq!(qr.module(8, size - 8).kind(), ModuleKind::DarkModule);
}

#[test]
fn test_format_bits_match_level_and_mask() {
    for mask in 0..8 {
        let options = EncodeOptions::new()
            .with_error(QrCodeEcc::High)
            .with_mask(Mask::new(mask));
        let qr = QrCode::encode("FORMAT", &options).unwrap();
        let bits = format_info_bits(qr.error_correction_level(), qr.mask());
        let size = qr.size() as i32;
        for i in 0..6 {
            assert_eq!(qr.get_module(8, i), (bits >> i) & 1 == 1);
        }
        for i in 0..8 {
            assert_eq!(qr.get_module(size - 1 - i, 8), (bits >> i) & 1 == 1);
        }
    }
}

#[test]
fn test_rows_match_modules() {
    let qr = auto("rows");
    let rows = qr.to_rows();
    assert_eq!(rows.len(), qr.size());
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), qr.size());
        for (x, &dark) in row.iter().enumerate() {
            assert_eq!(dark, qr.get_module(x as i32, y as i32));
        }
    }
}
