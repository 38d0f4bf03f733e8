//! # qrsmith
//!
//! A Rust library for encoding data into QR Code Model 2 symbols.
//!
//! `qrsmith` turns text, bytes or numbers into the module matrix of a QR code,
//! covering versions 1 to 40, the four error correction levels and the four
//! data modes (numeric, alphanumeric, byte, kanji). Rendering is left to the
//! caller: a finished [`QrCode`] exposes its version, level, mode and a
//! row-major grid of dark and light modules.
//!
//! ## Features
//!
//! - Automatic mode detection, or a forced mode validated strictly.
//! - Automatic sizing: the smallest version that fits, at the most redundant
//!   level that still fits it, unless version or level are given.
//! - Byte mode text in any codec known to `encoding_rs`, plus true ISO-8859-1.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrsmith = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! ```rust
//! use qrsmith::{EncodeOptions, QrCode, QrCodeEcc, QrSegmentMode};
//!
//! let qr = QrCode::encode("1".repeat(17), &EncodeOptions::default()).unwrap();
//! assert_eq!(qr.designator(), "1-H");
//! assert_eq!(qr.mode(), QrSegmentMode::Numeric);
//!
//! // Untyped parameters, as they might come from a form or a command line
//! let qr = QrCode::create("A".repeat(25), Some("L"), Some(1), None, None).unwrap();
//! for row in qr.to_rows() {
//!     let line: String = row.iter().map(|&dark| if dark { '#' } else { ' ' }).collect();
//!     println!("{line}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`qrcode`]: The entry point and the shared value types.
//! - [`mode`]: Input classification into a payload segment.
//! - [`planner`]: Version and error correction level selection.
//! - [`bitstream`]: Data codeword construction.
//! - [`ecc`]: Reed-Solomon error correction and interleaving.
//! - [`matrix`]: The module grid and its function patterns.
//! - [`mask`]: Mask selection, format and version information.
//! - [`tables`] and [`gf256`]: Constant tables and field arithmetic.

#![forbid(unsafe_code)]

pub mod bitstream;
pub mod ecc;
pub mod error;
pub mod gf256;
pub mod mask;
pub mod matrix;
pub mod mode;
pub mod planner;
pub mod qrcode;
pub mod tables;

pub use error::{QrError, Result};
pub use matrix::{Module, ModuleKind, ModuleMatrix};
pub use mode::{ByteEncoding, Input, QrSegment, QrSegmentMode};
pub use qrcode::{EncodeOptions, Mask, QrCode, QrCodeEcc, Version};
