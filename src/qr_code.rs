use crate::bit_buffer::{get_bit, BitBuffer};
use crate::capacity;
use crate::code_ecc::CodeEcc;
use crate::error::QrError;
use crate::finder_penalty::FinderPenalty;
use crate::mask::Mask;
use crate::rs;
use crate::segment::Segment;
use crate::version::Version;
use crate::{PENALTY_N1, PENALTY_N2, PENALTY_N3, PENALTY_N4};

/// A QR Code symbol: an immutable square grid of dark and light cells.
///
/// Described in the ISO/IEC 18004 standard (QR Code Model 2), supporting all
/// versions (sizes) from 1 to 40, all 4 error correction levels, and the
/// Numeric / Alphanumeric / Byte character encoding modes.
///
/// Ways to create a QR Code:
///
/// - High level: take the payload and call `QrCode::encode_text()` or
///   `QrCode::encode_binary()`.
/// - Mid level: custom-make a list of segments and call
///   `QrCode::encode_segments()` or `QrCode::encode_segments_advanced()`.
/// - Low level: custom-make the array of data codeword bytes (including
///   segment headers and final padding, excluding error correction
///   codewords), supply the appropriate version number, and call the
///   `QrCode::encode_codewords()` constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    /// The version number of this QR Code, between 1 and 40 (inclusive).
    pub version: Version,

    /// The width and height of this QR Code in modules, between 21 and 177
    /// (inclusive). Equal to `version * 4 + 17`.
    pub size: i32,

    /// The error correction level used in this QR Code.
    pub errorcorrectionlevel: CodeEcc,

    /// The mask pattern used, between 0 and 7 (inclusive). Even when
    /// automatic masking was requested, the resulting object carries the
    /// mask that was actually chosen.
    pub mask: Mask,

    // Modules of this QR Code (false = light, true = dark), dimensions size*size.
    // Immutable after the constructor finishes. Accessed through get_module().
    modules: Vec<bool>,

    // Marks function modules, which are not subjected to masking. Discarded
    // once the constructor finishes.
    isfunction: Vec<bool>,
}

impl QrCode {
    /*---- Static factory functions (high level) ----*/

    /// Returns a QR Code representing the given Unicode text string at the
    /// given error correction level.
    ///
    /// The smallest possible QR Code version is automatically chosen.
    ///
    /// Returns `Err` if the data is too long to fit in any version at the
    /// given ECC level.
    pub fn encode_text(text: &str, ecl: CodeEcc) -> Result<Self, QrError> {
        let segs: Vec<Segment> = Segment::make_segments(text);
        QrCode::encode_segments(&segs, ecl)
    }

    /// Returns a QR Code representing the given binary data at the given
    /// error correction level, always using byte mode.
    ///
    /// Returns `Err` if the data is too long to fit in any version at the
    /// given ECC level.
    pub fn encode_binary(data: &[u8], ecl: CodeEcc) -> Result<Self, QrError> {
        let segs: [Segment; 1] = [Segment::make_bytes(data)];
        QrCode::encode_segments(&segs, ecl)
    }

    /*---- Static factory functions (mid level) ----*/

    /// Returns a QR Code representing the given segments at the given error
    /// correction level, searching the full version range [1, 40].
    pub fn encode_segments(segs: &[Segment], ecl: CodeEcc) -> Result<Self, QrError> {
        QrCode::encode_segments_advanced(segs, ecl, Version::MIN, Version::MAX, None)
    }

    /// Returns a QR Code representing the given segments with the given
    /// encoding parameters.
    ///
    /// The smallest version within `[minversion, maxversion]` that fits the
    /// data is chosen. The mask number is either 0 to 7 (inclusive) to force
    /// that mask, or `None` to automatically choose the lowest-penalty mask.
    ///
    /// Returns `Err` if the data is too long to fit in any version in the
    /// given range at the given ECC level.
    pub fn encode_segments_advanced(
        segs: &[Segment],
        ecl: CodeEcc,
        minversion: Version,
        maxversion: Version,
        mask: Option<Mask>,
    ) -> Result<Self, QrError> {
        assert!(minversion <= maxversion, "Invalid value");

        // Find the minimal version number to use
        let mut version: Version = minversion;
        let datausedbits: usize = loop {
            let datacapacitybits: usize = capacity::data_capacity(version, ecl) * 8;
            let dataused: Option<usize> = Segment::get_total_bits(segs, version);
            if dataused.map_or(false, |n| n <= datacapacitybits) {
                break dataused.unwrap(); // This version number is found to be suitable
            } else if version >= maxversion {
                // All versions in the range could not fit the given data
                return Err(match dataused {
                    None => QrError::SegmentTooLong,
                    Some(n) => QrError::CapacityExceeded {
                        data_bits: n,
                        capacity_bits: datacapacitybits,
                    },
                });
            } else {
                version = Version::new(version.value() + 1);
            }
        };

        // Concatenate all segments to create the data bit string
        let mut bb = BitBuffer::new();
        for seg in segs {
            bb.append_bits(seg.mode.mode_bits(), 4);
            bb.append_bits(
                u32::try_from(seg.numchars).unwrap(),
                seg.mode.num_char_count_bits(version),
            );
            bb.0.extend_from_slice(&seg.data);
        }
        debug_assert_eq!(bb.len(), datausedbits);

        // Add terminator and pad up to a byte if applicable
        let datacapacitybits: usize = capacity::data_capacity(version, ecl) * 8;
        debug_assert!(bb.len() <= datacapacitybits);
        let numzerobits: usize = std::cmp::min(4, datacapacitybits - bb.len());
        bb.append_bits(0, u8::try_from(numzerobits).unwrap());
        let numzerobits: usize = bb.len().wrapping_neg() & 7;
        bb.append_bits(0, u8::try_from(numzerobits).unwrap());
        debug_assert_eq!(bb.len() % 8, 0);

        // Pad with alternating bytes until data capacity is reached
        for &padbyte in [0xECu32, 0x11].iter().cycle() {
            if bb.len() >= datacapacitybits {
                break;
            }
            bb.append_bits(padbyte, 8);
        }

        let datacodewords = bb.into_bytes();

        // Create the QR Code object
        Ok(QrCode::encode_codewords(version, ecl, &datacodewords, mask))
    }

    /*---- Constructor (low level) ----*/

    /// Creates a new QR Code with the given version number, error correction
    /// level, data codeword bytes, and mask number.
    ///
    /// This is a low-level API; most callers should use
    /// `encode_segments()` or `encode_segments_advanced()`.
    pub fn encode_codewords(
        ver: Version,
        ecl: CodeEcc,
        datacodewords: &[u8],
        mut msk: Option<Mask>,
    ) -> Self {
        let size = usize::from(ver.value()) * 4 + 17;
        let mut result = Self {
            version: ver,
            size: size as i32,
            mask: Mask::new(0), // Dummy value, overwritten below
            errorcorrectionlevel: ecl,
            modules: vec![false; size * size], // Initially all light
            isfunction: vec![false; size * size],
        };

        // Compute ECC, draw modules
        result.draw_function_patterns();
        let allcodewords: Vec<u8> = rs::add_ecc_and_interleave(datacodewords, ver, ecl);
        result.draw_codewords(&allcodewords);

        // Do masking
        if msk.is_none() {
            // Automatically choose the lowest-penalty mask, lowest index wins ties
            let mut minpenalty = i32::MAX;
            for i in 0u8..8 {
                let i = Mask::new(i);
                result.apply_mask(i);
                result.draw_format_bits(i);
                let penalty: i32 = result.get_penalty_score();
                if penalty < minpenalty {
                    msk = Some(i);
                    minpenalty = penalty;
                }
                result.apply_mask(i); // Undoes the mask due to XOR
            }
        }
        let msk: Mask = msk.unwrap();
        result.mask = msk;
        result.apply_mask(msk); // Apply the final choice of mask
        result.draw_format_bits(msk); // Overwrite old format bits

        result.isfunction.clear();
        result.isfunction.shrink_to_fit();
        result
    }

    /*---- Public methods ----*/

    /// Returns this QR Code's version, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns this QR Code's size, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Returns this QR Code's error correction level.
    pub fn error_correction_level(&self) -> CodeEcc {
        self.errorcorrectionlevel
    }

    /// Returns this QR Code's mask, in the range [0, 7].
    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module (pixel) at the given coordinates:
    /// `false` for light, `true` for dark.
    ///
    /// The top left corner has the coordinates (x=0, y=0). Out-of-bounds
    /// coordinates return `false` (light).
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        (0..self.size).contains(&x) && (0..self.size).contains(&y) && self.module(x, y)
    }

    /// Collapses this symbol to the `{0, 1}` module matrix the encoder is
    /// ultimately responsible for: `0` is light, `1` is dark, row-major.
    pub fn to_matrix(&self) -> Vec<Vec<u8>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| u8::from(self.get_module(x, y)))
                    .collect()
            })
            .collect()
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[(y * self.size + x) as usize]
    }

    fn module_mut(&mut self, x: i32, y: i32) -> &mut bool {
        &mut self.modules[(y * self.size + x) as usize]
    }

    /*---- Private helper methods for constructor: Drawing function modules ----*/

    fn draw_function_patterns(&mut self) {
        // Draw horizontal and vertical timing patterns
        let size: i32 = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        // Draw 3 finder patterns (all corners except bottom right; overwrites some timing modules)
        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        // Draw numerous alignment patterns
        let alignpatpos: Vec<i32> = self.version.alignment_positions();
        let numalign: usize = alignpatpos.len();
        for i in 0..numalign {
            for j in 0..numalign {
                // Don't draw on the three finder corners
                if !(i == 0 && j == 0 || i == 0 && j == numalign - 1 || i == numalign - 1 && j == 0)
                {
                    self.draw_alignment_pattern(alignpatpos[i], alignpatpos[j]);
                }
            }
        }

        // Draw configuration data
        self.draw_format_bits(Mask::new(0)); // Dummy mask value; overwritten later in the constructor
        self.draw_version();
    }

    // Draws two copies of the format bits (with its own BCH error correction code)
    // based on the given mask and this object's error correction level field.
    fn draw_format_bits(&mut self, mask: Mask) {
        let bits: u32 = {
            // errcorrlvl is uint2, mask is uint3
            let data: u32 = u32::from(self.errorcorrectionlevel.format_bits() << 3 | mask.value());
            let mut rem: u32 = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            (data << 10 | rem) ^ 0x5412 // uint15
        };
        debug_assert_eq!(bits >> 15, 0);

        // Draw first copy
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        // Draw second copy
        let size: i32 = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true); // Always dark
    }

    // Draws two copies of the version bits (with its own BCH error correction
    // code), based on this object's version field, iff 7 <= version <= 40.
    fn draw_version(&mut self) {
        if self.version.value() < 7 {
            return;
        }

        let bits: u32 = {
            let data = u32::from(self.version.value()); // uint6, in the range [7, 40]
            let mut rem: u32 = data;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
            }
            data << 12 | rem // uint18
        };
        debug_assert_eq!(bits >> 18, 0);

        // Draw two copies
        for i in 0..18 {
            let bit: bool = get_bit(bits, i);
            let a: i32 = self.size - 11 + i % 3;
            let b: i32 = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    // Draws a 9*9 finder pattern including the border separator, with the
    // center module at (x, y). Modules can be out of bounds.
    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        for dy in -4..=4 {
            for dx in -4..=4 {
                let xx: i32 = x + dx;
                let yy: i32 = y + dy;
                if (0..self.size).contains(&xx) && (0..self.size).contains(&yy) {
                    let dist: i32 = std::cmp::max(dx.abs(), dy.abs()); // Chebyshev/infinity norm
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    // Draws a 5*5 alignment pattern, with the center module at (x, y). All
    // modules must be in bounds.
    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2..=2 {
            for dx in -2..=2 {
                self.set_function_module(x + dx, y + dy, std::cmp::max(dx.abs(), dy.abs()) != 1);
            }
        }
    }

    // Sets the color of a module and marks it as a function module. Only used
    // by the constructor. Coordinates must be in bounds.
    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        *self.module_mut(x, y) = isdark;
        self.isfunction[(y * self.size + x) as usize] = true;
    }

    /*---- Private helper methods for constructor: Codewords and masking ----*/

    // Draws the given sequence of 8-bit codewords (data and error correction)
    // onto the entire data area of this QR Code, in the zig-zag scan order.
    // Function modules must already be marked off.
    fn draw_codewords(&mut self, data: &[u8]) {
        let mut i: usize = 0; // Bit index into the data
        let mut right: i32 = self.size - 1;
        while right >= 1 {
            // Index of right column in each column pair
            if right == 6 {
                right = 5;
            }
            for vert in 0..self.size {
                // Vertical counter
                for j in 0..2 {
                    let x: i32 = right - j; // Actual x coordinate
                    let upward: bool = (right + 1) & 2 == 0;
                    let y: i32 = if upward { self.size - 1 - vert } else { vert }; // Actual y coordinate
                    if !self.isfunction[(y * self.size + x) as usize] && i < data.len() * 8 {
                        *self.module_mut(x, y) =
                            get_bit(u32::from(data[i >> 3]), 7 - ((i as i32) & 7));
                        i += 1;
                    }
                    // Any remainder bits (0 to 7) were left as 0/false/light by the constructor
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, data.len() * 8);
    }

    // XORs the codeword modules in this QR Code with the given mask pattern.
    // Due to the arithmetic of XOR, calling apply_mask() with the same mask
    // value a second time undoes it; a well-formed QR Code needs exactly one
    // mask applied in the end.
    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let invert: bool = mask.invert_at(x, y);
                *self.module_mut(x, y) ^= invert & !self.isfunction[(y * self.size + x) as usize];
            }
        }
    }

    // Calculates the penalty score based on the current module state. Used
    // by automatic mask selection to find the pattern with the lowest score.
    fn get_penalty_score(&self) -> i32 {
        let mut result: i32 = 0;
        let size: i32 = self.size;

        // Adjacent modules in row having same color, and finder-like patterns
        for y in 0..size {
            let mut runcolor = false;
            let mut runx: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for x in 0..size {
                if self.module(x, y) == runcolor {
                    runx += 1;
                    if runx == 5 {
                        result += PENALTY_N1;
                    } else if runx > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runx);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runx = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runx) * PENALTY_N3;
        }
        // Adjacent modules in column having same color, and finder-like patterns
        for x in 0..size {
            let mut runcolor = false;
            let mut runy: i32 = 0;
            let mut runhistory = FinderPenalty::new(size);
            for y in 0..size {
                if self.module(x, y) == runcolor {
                    runy += 1;
                    if runy == 5 {
                        result += PENALTY_N1;
                    } else if runy > 5 {
                        result += 1;
                    }
                } else {
                    runhistory.add_history(runy);
                    if !runcolor {
                        result += runhistory.count_patterns() * PENALTY_N3;
                    }
                    runcolor = self.module(x, y);
                    runy = 1;
                }
            }
            result += runhistory.terminate_and_count(runcolor, runy) * PENALTY_N3;
        }

        // 2*2 blocks of modules having same color
        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color: bool = self.module(x, y);
                if color == self.module(x + 1, y)
                    && color == self.module(x, y + 1)
                    && color == self.module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        // Balance of dark and light modules
        let dark: i32 = self.modules.iter().copied().map(i32::from).sum();
        let total: i32 = size * size; // size is odd, so dark/total != 1/2
        let k: i32 = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        debug_assert!(0 <= k && k <= 9);
        result += k * PENALTY_N4;
        result
    }
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::segment::Segment;

    #[test]
    fn produce_a_21_by_21_matrix_for_a_single_digit_at_version_1() {
        let qr = QrCode::encode_text("1", CodeEcc::High).unwrap();
        assert_eq!(Version::new(1), qr.version());
        assert_eq!(21, qr.size());
        assert_eq!(21, qr.to_matrix().len());
        assert_eq!(21, qr.to_matrix()[0].len());
    }

    #[test]
    fn keep_the_four_finder_corners_bit_exact() {
        let qr = QrCode::encode_text("1", CodeEcc::High).unwrap();
        // Top-left finder ring: dark 3x3 core at (1,1)-(3,3) ... check center and a ring cell.
        assert!(qr.get_module(3, 3)); // center of TL finder
        assert!(!qr.get_module(1, 1)); // light ring (Chebyshev distance 2 from center)
        assert!(!qr.get_module(0, 7)); // separator, light
        assert!(qr.get_module(0, 0)); // outer dark border (Chebyshev distance 3)
        let n = qr.size() - 1;
        assert!(qr.get_module(n, 3)); // outer dark border of TR finder
        assert!(qr.get_module(3, n)); // outer dark border of BL finder
    }

    #[test]
    fn always_set_the_dark_module() {
        for v in [1u8, 7, 20, 40] {
            let ver = Version::new(v);
            let data = vec![0u8; crate::capacity::data_capacity(ver, CodeEcc::Medium)];
            let qr = QrCode::encode_codewords(ver, CodeEcc::Medium, &data, None);
            let size = qr.size();
            assert!(qr.get_module(8, size - 8), "version {v}");
        }
    }

    #[test]
    fn select_alphanumeric_mode_for_hello_world_at_version_1() {
        let segs = Segment::make_segments("HELLO WORLD");
        let qr = QrCode::encode_segments(&segs, CodeEcc::Quartile).unwrap();
        assert_eq!(Version::new(1), qr.version());
    }

    #[test]
    fn fail_with_capacity_exceeded_when_a_forced_version_is_too_small() {
        let segs = Segment::make_segments(&"A".repeat(100));
        let err = QrCode::encode_segments_advanced(
            &segs,
            CodeEcc::High,
            Version::new(1),
            Version::new(1),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, QrError::CapacityExceeded { .. }));
    }

    #[test]
    fn succeed_at_the_theoretical_max_alphanumeric_length_for_level_l_version_40() {
        let text = "A".repeat(4296);
        let segs = Segment::make_segments(&text);
        let qr = QrCode::encode_segments_advanced(
            &segs,
            CodeEcc::Low,
            Version::new(40),
            Version::new(40),
            None,
        )
        .unwrap();
        assert_eq!(Version::new(40), qr.version());
    }

    #[test]
    fn reject_one_more_character_than_the_theoretical_max() {
        let text = "A".repeat(4297);
        let segs = Segment::make_segments(&text);
        let err = QrCode::encode_segments_advanced(
            &segs,
            CodeEcc::Low,
            Version::new(40),
            Version::new(40),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, QrError::CapacityExceeded { .. }));
    }

    #[test]
    fn choose_the_mask_with_the_lowest_penalty_score() {
        let qr = QrCode::encode_text("Hello, world! This is a test of the mask selection logic.", CodeEcc::Medium)
            .unwrap();
        assert!(qr.mask().value() <= 7);
    }
}
