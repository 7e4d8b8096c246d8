// SPDX-License-Identifier: Apache-2.0

//! Bit-trick (SWAR) digit kernels
//!
//! Portable 4-, 8- and 16-digit conversions that treat the ASCII bytes as a
//! single little-endian machine word and merge neighbouring lanes with
//! mask/shift/multiply, halving the lane count at each level:
//!
//! ```text
//! "12345678"  bytes   31 32 33 34 35 36 37 38
//! level 1     x10     12 . 34 . 56 . 78 .       (u16 lanes)
//! level 2     x100    1234 ... 5678 ...         (u32 lanes)
//! level 3     x10000  12345678                  (u64)
//! ```
//!
//! None of the kernels validate their input. A non-digit byte produces an
//! unspecified value, never a panic. [`is_eight_digits`] and
//! [`is_four_digits`] are provided for callers that want to check first.
//!
//! The unrolled and naive variants at the bottom are positional reference
//! implementations used as test oracles and benchmark baselines.

use crate::constants::*;

// =============================================================================
// WORD CONVERSIONS
// =============================================================================

/// Convert 8 ASCII digits packed little-endian into a `u64` (0..=99_999_999).
#[inline(always)]
pub fn convert8(word: u64) -> u64 {
    let ones = (word & SWAR8_ONES_MASK) >> 8;
    let tens = (word & SWAR8_TENS_MASK) * 10;
    let word = ones + tens;

    let low = (word & SWAR8_PAIR_LOW_MASK) >> 16;
    let high = (word & SWAR8_PAIR_HIGH_MASK) * 100;
    let word = low + high;

    let low = (word & SWAR8_QUAD_LOW_MASK) >> 32;
    let high = (word & SWAR8_QUAD_HIGH_MASK) * 10_000;
    low + high
}

/// Convert 4 ASCII digits packed little-endian into a `u64` (0..=9_999).
#[inline(always)]
pub fn convert4(word: u32) -> u64 {
    let ones = (word & SWAR4_ONES_MASK) >> 8;
    let tens = (word & SWAR4_TENS_MASK) * 10;
    let word = ones + tens;

    let low = (word & SWAR4_PAIR_LOW_MASK) >> 16;
    let high = (word & SWAR4_PAIR_HIGH_MASK) * 100;
    u64::from(low + high)
}

// =============================================================================
// FIXED-WIDTH KERNELS
// =============================================================================

#[inline]
pub fn parse4_swar(chunk: &[u8; 4]) -> u64 {
    convert4(u32::from_le_bytes(*chunk))
}

#[inline]
pub fn parse8_swar(chunk: &[u8; 8]) -> u64 {
    convert8(u64::from_le_bytes(*chunk))
}

/// Two independent 8-digit conversions folded as `high * 10^8 + low`.
#[inline]
pub fn parse16_swar(chunk: &[u8; 16]) -> u64 {
    // The first eight characters land in the low half of the u128.
    let word = u128::from_le_bytes(*chunk);
    let high = convert8(word as u64);
    let low = convert8((word >> 64) as u64);
    high.wrapping_mul(POW10_8).wrapping_add(low)
}

// =============================================================================
// DIGIT VALIDATION
// =============================================================================

/// True when all eight bytes of `word` are ASCII digits. Byte order does not matter.
#[inline]
pub fn is_eight_digits(word: u64) -> bool {
    let above = word.wrapping_add(DIGIT_CEILING_X8);
    let below = word.wrapping_sub(ASCII_ZERO_X8);
    (above | below) & HIGH_BITS_X8 == 0
}

/// True when all four bytes of `word` are ASCII digits.
#[inline]
pub fn is_four_digits(word: u32) -> bool {
    let above = word.wrapping_add(DIGIT_CEILING_X4);
    let below = word.wrapping_sub(ASCII_ZERO_X4);
    (above | below) & HIGH_BITS_X4 == 0
}

/// Position of the first byte outside `'0'..='9'`, if any.
///
/// Whole 8- and 4-byte words are checked with the SWAR predicates; only a
/// failing word (or the short tail) is scanned byte by byte.
pub fn find_non_digit(bytes: &[u8]) -> Option<usize> {
    let mut offset = 0;
    let mut rest = bytes;

    while let Some((word, tail)) = rest.split_first_chunk::<CHUNK_8>() {
        if !is_eight_digits(u64::from_le_bytes(*word)) {
            return scan_non_digit(word).map(|i| offset + i);
        }
        offset += CHUNK_8;
        rest = tail;
    }

    if let Some((word, tail)) = rest.split_first_chunk::<CHUNK_4>() {
        if !is_four_digits(u32::from_le_bytes(*word)) {
            return scan_non_digit(word).map(|i| offset + i);
        }
        offset += CHUNK_4;
        rest = tail;
    }

    scan_non_digit(rest).map(|i| offset + i)
}

#[inline]
fn scan_non_digit(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|b| !b.is_ascii_digit())
}

// =============================================================================
// REFERENCE IMPLEMENTATIONS
// =============================================================================

#[inline(always)]
fn digit(byte: u8) -> u64 {
    u64::from(byte.wrapping_sub(b'0'))
}

pub fn parse4_unrolled(chunk: &[u8; 4]) -> u64 {
    digit(chunk[0]) * 1_000 + digit(chunk[1]) * 100 + digit(chunk[2]) * 10 + digit(chunk[3])
}

pub fn parse8_unrolled(chunk: &[u8; 8]) -> u64 {
    let mut sum = 0u64;
    sum += digit(chunk[7]);
    sum += digit(chunk[6]) * 10;
    sum += digit(chunk[5]) * 100;
    sum += digit(chunk[4]) * 1_000;
    sum += digit(chunk[3]) * 10_000;
    sum += digit(chunk[2]) * 100_000;
    sum += digit(chunk[1]) * 1_000_000;
    sum += digit(chunk[0]) * 10_000_000;
    sum
}

pub fn parse16_unrolled(chunk: &[u8; 16]) -> u64 {
    let mut sum = 0u64;
    sum += digit(chunk[15]);
    sum += digit(chunk[14]) * 10;
    sum += digit(chunk[13]) * 100;
    sum += digit(chunk[12]) * 1_000;
    sum += digit(chunk[11]) * 10_000;
    sum += digit(chunk[10]) * 100_000;
    sum += digit(chunk[9]) * 1_000_000;
    sum += digit(chunk[8]) * 10_000_000;
    sum += digit(chunk[7]) * 100_000_000;
    sum += digit(chunk[6]) * 1_000_000_000;
    sum += digit(chunk[5]) * 10_000_000_000;
    sum += digit(chunk[4]) * 100_000_000_000;
    sum += digit(chunk[3]) * 1_000_000_000_000;
    sum += digit(chunk[2]) * 10_000_000_000_000;
    sum += digit(chunk[1]) * 100_000_000_000_000;
    sum += digit(chunk[0]) * 1_000_000_000_000_000;
    sum
}

/// One digit per iteration, wrapping on overflow.
pub fn parse_naive(digits: &[u8]) -> u64 {
    digits
        .iter()
        .fold(0u64, |acc, &b| acc.wrapping_mul(POW10_1).wrapping_add(digit(b)))
}
