/// A QR Code version number between 1 and 40 (inclusive).
///
/// Determines the side length of the symbol: `size = 17 + 4 * version`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Version(u8);

impl Version {
    /// The minimum version number supported in the QR Code Model 2 standard.
    pub const MIN: Version = Version(1);

    /// The maximum version number supported in the QR Code Model 2 standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// Panics if the number is outside the range [1, 40]. For a caller-supplied
    /// number that may be out of range, use `try_new` instead.
    pub fn new(ver: u8) -> Self {
        assert!(
            (Version::MIN.value()..=Version::MAX.value()).contains(&ver),
            "Version number out of range"
        );
        Self(ver)
    }

    /// Creates a version object from the given number, or
    /// `Err(QrError::InvalidVersion(ver))` if it's outside [1, 40].
    pub fn try_new(ver: u8) -> Result<Self, crate::error::QrError> {
        if (Version::MIN.value()..=Version::MAX.value()).contains(&ver) {
            Ok(Self(ver))
        } else {
            Err(crate::error::QrError::InvalidVersion(ver))
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub fn value(self) -> u8 {
        self.0
    }

    /// The side length of the symbol in modules: `17 + 4 * version`.
    pub fn size(self) -> i32 {
        i32::from(self.0) * 4 + 17
    }

    /// The number of alignment pattern positions on one axis (0 for version 1).
    pub fn alignment_count(self) -> usize {
        if self.0 == 1 {
            0
        } else {
            usize::from(self.0) / 7 + 2
        }
    }

    /// Ascending positions of alignment pattern centers, shared by both axes.
    ///
    /// Each position is in the range `[0, size)`. Empty for version 1.
    pub fn alignment_positions(self) -> Vec<i32> {
        if self.0 == 1 {
            return vec![];
        }
        let numalign = self.alignment_count() as i32;
        let size = self.size();
        let step: i32 = if self.0 == 32 {
            26
        } else {
            (i32::from(self.0) * 4 + numalign * 2 + 1) / (numalign * 2 - 2) * 2
        };
        let mut result: Vec<i32> = (0..numalign - 1).map(|i| size - 7 - i * step).collect();
        result.push(6);
        result.reverse();
        result
    }

    /// The number of data bits this version can hold after excluding all function
    /// modules, including any remainder bits (so the result may not be a multiple of 8).
    /// Range is [208, 29648].
    pub fn raw_data_modules(self) -> usize {
        let ver = usize::from(self.0);
        let mut result: usize = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign: usize = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        debug_assert!((208..=29648).contains(&result));
        result
    }
}
