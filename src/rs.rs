//! Reed-Solomon block splitting, ECC computation, and interleaving.
//!
//! Block splitting and ECC-byte computation happen independently per block;
//! interleaving weaves the resulting blocks into the single codeword stream
//! that gets drawn onto the matrix.

use crate::capacity::{self, block_data_lengths};
use crate::code_ecc::CodeEcc;
use crate::gf;
use crate::version::Version;

/// Returns the Reed-Solomon generator polynomial for the given degree, as
/// alpha-exponents of its coefficients (excluding the implicit leading 1),
/// highest power first. This is the `ECCCoefficients[degree]` table,
/// produced by the standard root-product construction
/// `(x - α^0)(x - α^1)...(x - α^{degree-1})` expressed purely in the GF
/// log/exp domain rather than by repeated raw multiplication.
pub fn generator_exponents(degree: usize) -> Vec<u8> {
    assert!((1..=255).contains(&degree), "Degree out of range");
    let mut coeffs = vec![0u8; degree - 1];
    coeffs.push(1); // Start off with the monomial x^0
    let mut root: u8 = 1;
    for _ in 0..degree {
        for j in 0..degree {
            coeffs[j] = gf::mul(coeffs[j], root);
            if j + 1 < coeffs.len() {
                coeffs[j] ^= coeffs[j + 1];
            }
        }
        root = gf::mul(root, 0x02);
    }
    coeffs.iter().map(|&b| gf::log(b)).collect()
}

/// Computes the `r` ECC bytes for one block of data, given the generator
/// polynomial's coefficients as alpha-exponents (`generator_exponents`).
///
/// Implements §4.3's polynomial division: repeatedly pop the leading byte,
/// and when it's nonzero, XOR the generator (scaled by that byte, in log
/// domain) into the remaining register before shifting in a zero.
pub fn remainder(data: &[u8], generator_exponents: &[u8]) -> Vec<u8> {
    let r = generator_exponents.len();
    let mut reg = vec![0u8; r];
    for &b in data {
        let factor = b ^ reg.remove(0);
        reg.push(0);
        if factor != 0 {
            let log_factor = i32::from(gf::log(factor));
            for (cell, &exponent) in reg.iter_mut().zip(generator_exponents) {
                *cell ^= gf::exp(i32::from(exponent) + log_factor);
            }
        }
    }
    reg
}

/// Splits `data` into the blocks for `(version, ecl)`, appends each block's
/// ECC bytes, and interleaves the results into the final raw codeword
/// stream: data bytes column-by-column across blocks (short blocks'
/// missing trailing byte skipped), then ECC bytes column-by-column.
///
/// `data.len()` must equal `capacity::data_capacity(version, ecl)`.
pub fn add_ecc_and_interleave(data: &[u8], version: Version, ecl: CodeEcc) -> Vec<u8> {
    assert_eq!(
        data.len(),
        capacity::data_capacity(version, ecl),
        "data length must match this version/level's data capacity"
    );

    let num_blocks = capacity::block_count(version, ecl);
    let block_ecc_len = capacity::ecc_codewords_per_block(version, ecl);
    let generator = generator_exponents(block_ecc_len);
    let lengths = block_data_lengths(num_blocks, data.len());

    let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(num_blocks);
    let mut k = 0usize;
    for &len in &lengths {
        let chunk = &data[k..k + len];
        k += len;
        let ecc = remainder(chunk, &generator);
        let mut block = chunk.to_vec();
        block.extend_from_slice(&ecc);
        blocks.push(block);
    }

    let max_data_len = *lengths.iter().max().unwrap();
    let mut result = Vec::with_capacity(max_data_len * num_blocks + block_ecc_len * num_blocks);
    for i in 0..max_data_len {
        for (block, &len) in blocks.iter().zip(&lengths) {
            if i < len {
                result.push(block[i]);
            }
        }
    }
    for j in 0..block_ecc_len {
        for (block, &len) in blocks.iter().zip(&lengths) {
            result.push(block[len + j]);
        }
    }
    result
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn generate_the_degree_seven_polynomial_used_at_version_1_level_l() {
        // Degree must match the table: version 1, level L uses 7 ECC codewords per block.
        let exponents = generator_exponents(7);
        assert_eq!(7, exponents.len());
    }

    #[test]
    fn compute_seven_ecc_bytes_for_a_short_block() {
        let generator = generator_exponents(7);
        let data = [0x41u8; 19]; // version 1 level L holds 19 data codewords in one block
        let ecc = remainder(&data, &generator);
        assert_eq!(7, ecc.len());
    }

    #[test]
    fn total_data_plus_ecc_equals_the_raw_codeword_count() {
        use crate::version::Version;
        let ver = Version::new(5);
        let ecl = CodeEcc::Quartile;
        let data_len = capacity::data_capacity(ver, ecl);
        let data = vec![0u8; data_len];
        let interleaved = add_ecc_and_interleave(&data, ver, ecl);
        assert_eq!(ver.raw_data_modules() / 8, interleaved.len());
    }
}
