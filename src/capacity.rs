use crate::code_ecc::CodeEcc;
use crate::version::Version;

/// ECC codewords per block, indexed `[ecc.ordinal()][version]` (index 0 unused).
#[rustfmt::skip]
pub static ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    // 0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [-1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Low
    [-1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28], // Medium
    [-1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // Quartile
    [-1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30], // High
];

/// Number of error-correction blocks, indexed `[ecc.ordinal()][version]` (index 0 unused).
#[rustfmt::skip]
pub static NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    // 0, 1, 2, 3, 4, 5, 6, 7, 8, 9,10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40
    [-1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25], // Low
    [-1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49], // Medium
    [-1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68], // Quartile
    [-1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81], // High
];

fn table_get(table: &'static [[i8; 41]; 4], ver: Version, ecl: CodeEcc) -> usize {
    table[ecl.ordinal()][usize::from(ver.value())] as usize
}

/// ECC codeword count per block for the given version and error correction level.
pub fn ecc_codewords_per_block(ver: Version, ecl: CodeEcc) -> usize {
    table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl)
}

/// Number of RS blocks for the given version and error correction level.
pub fn block_count(ver: Version, ecl: CodeEcc) -> usize {
    table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
}

/// Number of 8-bit data codewords (excluding ECC) available at the given version
/// and error correction level, with remainder bits discarded. Equivalent to the
/// literal `DataCapacity[ecc][version]` table in spec terms; see DESIGN.md.
pub fn data_capacity(ver: Version, ecl: CodeEcc) -> usize {
    ver.raw_data_modules() / 8 - ecc_codewords_per_block(ver, ecl) * block_count(ver, ecl)
}

/// Block sizing: given `count` blocks whose data bytes must total `capacity`,
/// returns the per-block data length for each of the `count` blocks. Blocks are
/// sized as evenly as possible; any remainder goes to the trailing blocks, which
/// therefore carry one extra data byte (and correspondingly skip the short-block
/// padding byte — see `rs::interleave`).
pub fn block_data_lengths(count: usize, capacity: usize) -> Vec<usize> {
    let short_len = capacity / count;
    let num_short = count - capacity % count;
    (0..count)
        .map(|i| short_len + usize::from(i >= num_short))
        .collect()
}

#[cfg(test)]
mod should {
    use super::*;
    use crate::code_ecc::CodeEcc;

    #[test]
    fn agree_with_raw_modules_and_block_tables_for_every_version_and_level() {
        for v in 1..=40u8 {
            let ver = Version::new(v);
            for &ecl in &[
                CodeEcc::Low,
                CodeEcc::Medium,
                CodeEcc::Quartile,
                CodeEcc::High,
            ] {
                let raw = ver.raw_data_modules();
                let total_codewords = raw / 8;
                let data = data_capacity(ver, ecl);
                let ecc_per_block = ecc_codewords_per_block(ver, ecl);
                let blocks = block_count(ver, ecl);
                assert_eq!(total_codewords, data + ecc_per_block * blocks);
            }
        }
    }

    #[test]
    fn split_evenly_divisible_capacity_into_equal_blocks() {
        let lens = block_data_lengths(4, 16);
        assert_eq!(vec![4, 4, 4, 4], lens);
    }

    #[test]
    fn give_the_trailing_blocks_the_extra_byte_on_uneven_splits() {
        let lens = block_data_lengths(3, 10);
        assert_eq!(vec![3, 3, 4], lens);
        assert_eq!(10, lens.iter().sum::<usize>());
    }
}
