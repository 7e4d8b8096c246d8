// SPDX-License-Identifier: Apache-2.0

//! Common constants used across implementations
//!
//! This module centralizes chunk widths, decimal scales, SWAR masks and the
//! vector multiplier weights shared by the bit-trick and SIMD kernels.

// =============================================================================
// INPUT LIMITS
// =============================================================================

/// Longest digit string the composer handles in one call.
/// 10^16 - 1 fits comfortably in a u64; 17+ digits would need overflow checks.
pub const MAX_DIGITS: usize = 16;

pub const CHUNK_16: usize = 16;
pub const CHUNK_8: usize = 8;
pub const CHUNK_4: usize = 4;

/// Longest tail folded one digit at a time after the 16/8/4 ladder.
pub const MAX_TAIL: usize = 3;

// =============================================================================
// DECIMAL SCALES
// =============================================================================

pub const POW10_1: u64 = 10;
pub const POW10_4: u64 = 10_000;
pub const POW10_8: u64 = 100_000_000;

// =============================================================================
// SWAR MASKS (bytes loaded little-endian, first character in the low byte)
// =============================================================================

// Level 1: tens digit in even bytes, ones digit in odd bytes
pub const SWAR8_ONES_MASK: u64 = 0x0f00_0f00_0f00_0f00;
pub const SWAR8_TENS_MASK: u64 = 0x000f_000f_000f_000f;
// Level 2: 2-digit lanes in 16-bit slots
pub const SWAR8_PAIR_LOW_MASK: u64 = 0x00ff_0000_00ff_0000;
pub const SWAR8_PAIR_HIGH_MASK: u64 = 0x0000_00ff_0000_00ff;
// Level 3: 4-digit lanes in 32-bit slots
pub const SWAR8_QUAD_LOW_MASK: u64 = 0x0000_ffff_0000_0000;
pub const SWAR8_QUAD_HIGH_MASK: u64 = 0x0000_0000_0000_ffff;

pub const SWAR4_ONES_MASK: u32 = 0x0f00_0f00;
pub const SWAR4_TENS_MASK: u32 = 0x000f_000f;
pub const SWAR4_PAIR_LOW_MASK: u32 = 0x00ff_0000;
pub const SWAR4_PAIR_HIGH_MASK: u32 = 0x0000_00ff;

// Digit validation: a byte is a digit iff neither b + 0x46 nor b - 0x30
// sets its top bit.
pub const ASCII_ZERO_X8: u64 = 0x3030_3030_3030_3030;
pub const DIGIT_CEILING_X8: u64 = 0x4646_4646_4646_4646;
pub const HIGH_BITS_X8: u64 = 0x8080_8080_8080_8080;
pub const ASCII_ZERO_X4: u32 = 0x3030_3030;
pub const DIGIT_CEILING_X4: u32 = 0x4646_4646;
pub const HIGH_BITS_X4: u32 = 0x8080_8080;

// =============================================================================
// VECTOR WEIGHTS
// =============================================================================

/// Per-byte bias removing the ASCII offset ('0' == 0x30).
pub const ASCII_BIAS: i8 = -(b'0' as i8);

/// u8 weights {10, 1} per 16-bit lane (pmaddubsw operand).
pub const PAIR_WEIGHTS: i16 = 0x010a;

/// u16 weights {100, 1} per 32-bit lane (pmaddwd operand).
pub const QUAD_WEIGHTS: i32 = 0x0001_0064;

/// u16 weight applied to the high 4-digit lane when folding to 8 digits.
pub const OCTET_WEIGHT: i16 = 10_000;

// =============================================================================
// SIMD Lane Counts by Architecture
// =============================================================================

#[cfg(target_arch = "x86_64")]
pub const LANES_SSE_BYTES: usize = 16; // 128/8 = 16 byte elements

#[cfg(target_arch = "aarch64")]
pub const LANES_NEON_BYTES: usize = 16; // 128/8 = 16 byte elements
