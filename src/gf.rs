//! GF(2^8) arithmetic for primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D),
//! used by Reed-Solomon error-correction coding.
//!
//! `EXP` and `LOG` are computed at compile time from the generator element 0x02,
//! the standard construction for this field. `EXP[i]` is `0x02^i`; `LOG[v]` is the
//! exponent `e` such that `EXP[e] == v` (undefined for `v == 0`, never queried there).

const PRIMITIVE_POLY: u16 = 0x11D;

pub const EXP: [u8; 256] = {
    let mut exp = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0usize;
    while i < 255 {
        exp[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    exp[255] = exp[0];
    exp
};

pub const LOG: [u8; 256] = {
    let mut log = [0u8; 256];
    let mut i = 0usize;
    while i < 255 {
        log[EXP[i] as usize] = i as u8;
        i += 1;
    }
    log
};

/// `EXP[e % 255]`.
pub fn exp(e: i32) -> u8 {
    EXP[e.rem_euclid(255) as usize]
}

/// The exponent `e` in `[0, 255)` such that `EXP[e] == v`. `v` must be nonzero.
pub fn log(v: u8) -> u8 {
    debug_assert_ne!(v, 0, "log of zero is undefined in GF(2^8)");
    LOG[v as usize]
}

/// Product of two field elements, `x * y` in GF(2^8).
pub fn mul(x: u8, y: u8) -> u8 {
    if x == 0 || y == 0 {
        0
    } else {
        exp(i32::from(log(x)) + i32::from(log(y)))
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn start_the_exponent_table_at_one() {
        assert_eq!(1, EXP[0]);
        assert_eq!(0, LOG[1]);
    }

    #[test]
    fn wrap_the_exponent_table_at_two_hundred_fifty_five() {
        assert_eq!(EXP[0], EXP[255]);
    }

    #[test]
    fn invert_exponentiation_with_log_for_every_nonzero_value() {
        for v in 1u8..=255 {
            assert_eq!(v, EXP[LOG[v as usize] as usize]);
        }
    }

    #[test]
    fn multiply_by_zero_to_zero() {
        assert_eq!(0, mul(0, 200));
        assert_eq!(0, mul(200, 0));
    }

    #[test]
    fn multiply_known_values() {
        // 0x02 * 0x02 = 0x04 (no reduction needed yet)
        assert_eq!(0x04, mul(0x02, 0x02));
        // EXP[254] * EXP[1] should reduce modulo the field order (254+1=255 -> EXP[0])
        assert_eq!(EXP[0], mul(EXP[254], EXP[1]));
    }
}
