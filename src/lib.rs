//! Encodes text strings and byte arrays into QR Code symbols.
//!
//! This crate aims to be a clear, focused QR Code symbol encoder. It covers
//! the symbol-construction pipeline described by ISO/IEC 18004 (Model 2):
//! mode selection, bit-level data encoding, Reed-Solomon error correction
//! over GF(2^8) with interleaved blocks, the module matrix with its
//! functional patterns, the eight mask patterns with penalty scoring, and
//! the format/version information payloads.
//!
//! Rendering the resulting module matrix to pixels, Kanji mode, ECI
//! designators, and structured append are all out of scope; see the crate
//! README / SPEC_FULL.md for the boundary.
//!
//! # Examples
//!
//! High-level, single call:
//!
//! ```
//! use qrenc::{encode, CodeEcc};
//!
//! let matrix = encode(b"Hello, world!", CodeEcc::Medium, None).unwrap();
//! assert_eq!(matrix.len(), matrix[0].len()); // square
//! ```
//!
//! Mid-level, explicit segments and a forced version/mask:
//!
//! ```
//! use qrenc::{CodeEcc, Mask, QrCode, Segment, Version};
//!
//! let segs = Segment::make_segments("3141592653589793238462643383");
//! let qr = QrCode::encode_segments_advanced(
//!     &segs,
//!     CodeEcc::High,
//!     Version::new(5),
//!     Version::new(5),
//!     Some(Mask::new(2)),
//! )
//! .unwrap();
//! for y in 0..qr.size() {
//!     for x in 0..qr.size() {
//!         let _dark: bool = qr.get_module(x, y);
//!     }
//! }
//! ```

mod bit_buffer;
mod capacity;
mod code_ecc;
mod error;
mod finder_penalty;
mod gf;
mod mask;
mod qr_code;
mod rs;
mod segment;
mod segment_mode;
mod version;

pub use code_ecc::*;
pub use error::*;
pub use mask::*;
pub use qr_code::*;
pub use segment::*;
pub use segment_mode::*;
pub use version::*;

/// The set of all legal characters in alphanumeric mode, where each
/// character's position is its value in the base-45 encoding.
pub static ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

// Weights for the four penalty terms scored in qr_code::get_penalty_score(),
// used when evaluating which of the 8 mask patterns is best.
pub const PENALTY_N1: i32 = 3;
pub const PENALTY_N2: i32 = 3;
pub const PENALTY_N3: i32 = 40;
pub const PENALTY_N4: i32 = 10;

/// The module matrix produced by `encode()`: a square, row-major grid of
/// `0` (light) / `1` (dark) cells. Rendering this to a raster image is the
/// caller's responsibility.
pub type Matrix = Vec<Vec<u8>>;

/// Encodes `data` into a QR Code module matrix.
///
/// `data` is interpreted as UTF-8 text for mode selection (Numeric >
/// Alphanumeric > Byte, per [`Segment::make_segments`]); bytes that aren't
/// valid UTF-8 always fall back to byte mode, since the numeric and
/// alphanumeric character classes are both subsets of ASCII and can never
/// match non-UTF-8 input.
///
/// `version`, when `Some`, forces that exact version number in `[1, 40]`;
/// `None` selects the smallest version that fits the data at the requested
/// `ecc`.
///
/// Returns `Err(QrError::InvalidVersion(_))` if `version` is `Some` and
/// outside `[1, 40]`, or `Err(QrError::CapacityExceeded { .. })` if `data`
/// doesn't fit the forced version (or no version up to 40, when searching
/// automatically).
pub fn encode(data: &[u8], ecc: CodeEcc, version: Option<u8>) -> Result<Matrix, QrError> {
    let segs: Vec<Segment> = match std::str::from_utf8(data) {
        Ok(text) => Segment::make_segments(text),
        Err(_) => vec![Segment::make_bytes(data)],
    };
    let (minversion, maxversion) = match version {
        Some(v) => {
            let v = Version::try_new(v)?;
            (v, v)
        }
        None => (Version::MIN, Version::MAX),
    };
    let qr = QrCode::encode_segments_advanced(&segs, ecc, minversion, maxversion, None)?;
    Ok(qr.to_matrix())
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn encode_an_empty_string_as_version_one() {
        let matrix = encode(b"", CodeEcc::High, None).unwrap();
        assert_eq!(21, matrix.len());
    }

    #[test]
    fn fall_back_to_byte_mode_for_non_utf8_input() {
        let data = [0xFFu8, 0xFE, 0x00, 0x01];
        let matrix = encode(&data, CodeEcc::Medium, None).unwrap();
        assert!(!matrix.is_empty());
    }

    #[test]
    fn honor_a_forced_version() {
        let matrix = encode(b"1", CodeEcc::High, Some(5)).unwrap();
        assert_eq!(Version::new(5).size() as usize, matrix.len());
    }

    #[test]
    fn report_capacity_exceeded_for_a_too_small_forced_version() {
        let data = vec![b'A'; 5000];
        let err = encode(&data, CodeEcc::High, Some(1)).unwrap_err();
        assert!(matches!(err, QrError::CapacityExceeded { .. }));
    }

    #[test]
    fn report_invalid_version_for_an_out_of_range_forced_version() {
        let err = encode(b"1", CodeEcc::High, Some(41)).unwrap_err();
        assert!(matches!(err, QrError::InvalidVersion(41)));
    }

    #[test]
    fn produce_every_cell_as_zero_or_one() {
        let matrix = encode(b"Hello, world!", CodeEcc::Low, None).unwrap();
        for row in &matrix {
            for &cell in row {
                assert!(cell == 0 || cell == 1);
            }
        }
    }
}
