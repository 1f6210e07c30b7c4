/// The error type for everything that can prevent a QR Code from being built.
///
/// Ways to handle `CapacityExceeded` include:
///
/// - Decrease the error correction level if it was greater than `CodeEcc::Low`.
/// - If a forced version was supplied, allow a larger version.
/// - Split the text data into better or optimal segments to reduce the bits required.
/// - Change the text or binary data to be shorter.
/// - Propagate the error upward to the caller/user.
#[derive(Debug, Clone)]
pub enum QrError {
    /// A version number argument was outside the range [1, 40].
    InvalidVersion(u8),

    /// A segment's character count doesn't fit its length field at any version.
    SegmentTooLong,

    /// The requested (or version-40-saturated) capacity can't hold the data.
    CapacityExceeded {
        data_bits: usize,
        capacity_bits: usize,
    },

    /// A debug-assertion-grade invariant was violated (e.g. block-splitting
    /// failed to find a valid partition). Should be unreachable given table
    /// correctness; surfaced rather than panicking so embedding callers
    /// never abort.
    InternalInvariantViolation(&'static str),
}

impl std::error::Error for QrError {}

impl std::fmt::Display for QrError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::InvalidVersion(v) => write!(f, "version {v} is out of range [1, 40]"),
            Self::SegmentTooLong => write!(f, "segment too long"),
            Self::CapacityExceeded {
                data_bits,
                capacity_bits,
            } => write!(
                f,
                "data length = {data_bits} bits, max capacity = {capacity_bits} bits"
            ),
            Self::InternalInvariantViolation(msg) => {
                write!(f, "internal invariant violation: {msg}")
            }
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn format_capacity_exceeded_with_both_bit_counts() {
        let err = QrError::CapacityExceeded {
            data_bits: 100,
            capacity_bits: 80,
        };
        assert_eq!("data length = 100 bits, max capacity = 80 bits", err.to_string());
    }
}
