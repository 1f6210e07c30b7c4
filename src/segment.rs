use crate::bit_buffer::BitBuffer;
use crate::segment_mode::SegmentMode;
use crate::version::Version;
use crate::ALPHANUMERIC_CHARSET;

/// A segment of character or binary data in a QR Code symbol.
///
/// Instances of this struct are immutable. The mid-level way to create a
/// segment is to take the payload data and call a static factory function
/// such as `Segment::make_numeric()`. The low-level way to create a segment
/// is to custom-make the bit buffer and call the `Segment::new()`
/// constructor with appropriate values.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment {
    /// The mode indicator of this segment.
    pub mode: SegmentMode,

    /// The length of this segment's unencoded data, measured in characters
    /// for numeric/alphanumeric mode and bytes for byte mode. Not the same
    /// as the data's bit length.
    pub numchars: usize,

    /// The data bits of this segment.
    pub data: Vec<bool>,
}

impl Segment {
    /*---- Static factory functions (mid level) ----*/

    /// Returns a segment representing the given binary data encoded in byte mode.
    ///
    /// All input byte slices are acceptable: any text string can be converted
    /// to UTF-8 bytes and encoded as a byte mode segment.
    pub fn make_bytes(data: &[u8]) -> Self {
        let mut bb = BitBuffer(Vec::with_capacity(data.len() * 8));
        for &b in data {
            bb.append_bits(u32::from(b), 8);
        }
        Segment::new(SegmentMode::Byte, data.len(), bb.0)
    }

    /// Returns a segment representing the given string of decimal digits encoded in numeric mode.
    ///
    /// Panics if the string contains non-digit characters.
    pub fn make_numeric(text: &str) -> Self {
        let mut bb = BitBuffer(Vec::with_capacity(text.len() * 3 + (text.len() + 2) / 3));
        let mut accumdata: u32 = 0;
        let mut accumcount: u8 = 0;
        for b in text.bytes() {
            assert!(
                b.is_ascii_digit(),
                "String contains non-numeric characters"
            );
            accumdata = accumdata * 10 + u32::from(b - b'0');
            accumcount += 1;
            if accumcount == 3 {
                bb.append_bits(accumdata, 10);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            // 1 or 2 digits remaining -> 4 or 7 bits
            bb.append_bits(accumdata, accumcount * 3 + 1);
        }
        Segment::new(SegmentMode::Numeric, text.len(), bb.0)
    }

    /// Returns a segment representing the given text string encoded in alphanumeric mode.
    ///
    /// The characters allowed are: 0 to 9, A to Z (uppercase only), space,
    /// dollar, percent, asterisk, plus, hyphen, period, slash, colon.
    ///
    /// Panics if the string contains non-encodable characters.
    pub fn make_alphanumeric(text: &str) -> Self {
        let mut bb = BitBuffer(Vec::with_capacity(text.len() * 5 + (text.len() + 1) / 2));
        let mut accumdata: u32 = 0;
        let mut accumcount: u32 = 0;
        for c in text.chars() {
            let i: usize = ALPHANUMERIC_CHARSET
                .find(c)
                .expect("String contains unencodable characters in alphanumeric mode");
            accumdata = accumdata * 45 + u32::try_from(i).unwrap();
            accumcount += 1;
            if accumcount == 2 {
                bb.append_bits(accumdata, 11);
                accumdata = 0;
                accumcount = 0;
            }
        }
        if accumcount > 0 {
            // 1 character remaining -> 6 bits
            bb.append_bits(accumdata, 6);
        }
        Segment::new(SegmentMode::Alphanumeric, text.len(), bb.0)
    }

    /// Returns a list of zero or one segments to represent the given text string,
    /// choosing the most compact of Numeric, Alphanumeric, or Byte mode.
    ///
    /// An empty string matches `is_numeric` (vacuously true) and so is encoded
    /// as a single zero-length Numeric segment: a 4-bit mode indicator and a
    /// zero-length count field, no data bits.
    pub fn make_segments(text: &str) -> Vec<Self> {
        vec![if Segment::is_numeric(text) {
            Segment::make_numeric(text)
        } else if Segment::is_alphanumeric(text) {
            Segment::make_alphanumeric(text)
        } else {
            Segment::make_bytes(text.as_bytes())
        }]
    }

    /*---- Constructor (low level) ----*/

    /// Creates a new QR Code segment with the given attributes and data.
    ///
    /// The character count (numchars) must agree with the mode and
    /// the bit buffer length, but the constraint isn't checked.
    pub fn new(mode: SegmentMode, numchars: usize, data: Vec<bool>) -> Self {
        Self {
            mode,
            numchars,
            data,
        }
    }

    /*---- Other static functions ----*/

    /// Calculates the number of bits needed to encode the given segments at
    /// the given version. `None` if a segment's character count doesn't fit
    /// its length field, or the total bits would overflow `usize`.
    pub fn get_total_bits(segs: &[Self], version: Version) -> Option<usize> {
        let mut result: usize = 0;
        for seg in segs {
            let ccbits: u8 = seg.mode.num_char_count_bits(version);
            // ccbits can be as large as 16, but usize can be as small as 16
            if let Some(limit) = 1usize.checked_shl(ccbits.into()) {
                if seg.numchars >= limit {
                    return None; // The segment's length doesn't fit the field's bit width
                }
            }
            result = result.checked_add(4 + usize::from(ccbits))?;
            result = result.checked_add(seg.data.len())?;
        }
        Some(result)
    }

    /// Tests whether the given string can be encoded as a segment in numeric mode:
    /// every character is in the range 0 to 9 (matches `^[0-9]*$`).
    pub fn is_numeric(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_digit())
    }

    /// Tests whether the given string can be encoded as a segment in alphanumeric
    /// mode: every character is in `ALPHANUMERIC_CHARSET` (matches
    /// `^[0-9A-Z $%*+\-./:]*$`).
    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars().all(|c| ALPHANUMERIC_CHARSET.contains(c))
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn classify_digits_only_as_numeric() {
        assert!(Segment::is_numeric("0123456789"));
        assert!(!Segment::is_numeric("12A"));
    }

    #[test]
    fn classify_the_forty_five_character_set_as_alphanumeric() {
        assert!(Segment::is_alphanumeric("HELLO WORLD"));
        assert!(Segment::is_alphanumeric("$%*+-./:"));
        assert!(!Segment::is_alphanumeric("hello"));
    }

    #[test]
    fn prefer_numeric_over_alphanumeric_over_byte() {
        assert_eq!(
            SegmentMode::Numeric,
            Segment::make_segments("123").first().unwrap().mode
        );
        assert_eq!(
            SegmentMode::Alphanumeric,
            Segment::make_segments("HELLO WORLD").first().unwrap().mode
        );
        assert_eq!(
            SegmentMode::Byte,
            Segment::make_segments("Hello, world!").first().unwrap().mode
        );
    }

    #[test]
    fn encode_empty_text_as_a_zero_length_numeric_segment() {
        let segs = Segment::make_segments("");
        assert_eq!(1, segs.len());
        assert_eq!(SegmentMode::Numeric, segs[0].mode);
        assert_eq!(0, segs[0].numchars);
        assert!(segs[0].data.is_empty());
    }

    #[test]
    fn encode_hello_world_with_the_documented_length_prefix() {
        let seg = Segment::make_alphanumeric("HELLO WORLD");
        let mut bb = BitBuffer(Vec::new());
        bb.append_bits(seg.mode.mode_bits(), 4);
        bb.append_bits(seg.numchars as u32, seg.mode.num_char_count_bits(Version::new(1)));
        let mode_and_len: String = bb.0.iter().map(|&b| if b { '1' } else { '0' }).collect();
        assert_eq!("0010000001011", mode_and_len);
    }

    #[test]
    fn encode_three_digit_groups_as_ten_bits_and_remainder_as_four_or_seven() {
        let seg = Segment::make_numeric("1");
        assert_eq!(4, seg.data.len());
        let seg = Segment::make_numeric("12");
        assert_eq!(7, seg.data.len());
        let seg = Segment::make_numeric("123");
        assert_eq!(10, seg.data.len());
        let seg = Segment::make_numeric("1234");
        assert_eq!(14, seg.data.len());
    }
}
