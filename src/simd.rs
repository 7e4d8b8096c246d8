// SPDX-License-Identifier: Apache-2.0

//! Vector digit kernels
//!
//! 8- and 16-digit conversions on a single 128-bit register. The x86_64
//! pipeline is
//!
//! ```text
//! load -> add bias (-'0') -> pmaddubsw {10,1} -> pmaddwd {100,1}
//!      -> packusdw -> pmaddwd {10000,1,10000,1,0..} -> movq
//! ```
//!
//! and comes in two dialects: SSE4.1 (legacy encoding) and AVX (VEX
//! encoding). Both entry points inline the same body; only the enabled
//! target features differ, so results are bit-identical.
//!
//! On aarch64 the same three merge levels are done with NEON
//! de-interleaves (`vuzp`) and widening multiply-accumulates (`vmlal`).
//!
//! Every kernel takes a fixed-size array reference, so the full-width load
//! never reads past the caller's buffer. Callers must only invoke a kernel
//! after confirming the matching CPU feature is present.

// Kernel bodies are unsafe end to end; we opt out at the module level.
#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::{
    __m128i, _mm_add_epi8, _mm_cvtsi128_si32, _mm_cvtsi128_si64, _mm_loadl_epi64,
    _mm_loadu_si128, _mm_madd_epi16, _mm_maddubs_epi16, _mm_packus_epi32, _mm_set1_epi16,
    _mm_set1_epi32, _mm_set1_epi8, _mm_set_epi16, _mm_shuffle_epi32,
};

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::{
    uint64x2_t, uint8x16_t, vcombine_u8, vdup_n_u16, vdup_n_u32, vdup_n_u8, vdupq_n_u8,
    vget_low_u16, vget_low_u32, vget_low_u8, vgetq_lane_u64, vld1_u8, vld1q_u8, vmlal_u16,
    vmlal_u32, vmlal_u8, vmovl_u16, vmovl_u32, vmovl_u8, vsubq_u8, vuzp1q_u16, vuzp1q_u32,
    vuzp1q_u8, vuzp2q_u16, vuzp2q_u32, vuzp2q_u8,
};

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::constants::*;

#[cfg(target_arch = "x86_64")]
const _: () = assert!(LANES_SSE_BYTES == CHUNK_16);
#[cfg(target_arch = "aarch64")]
const _: () = assert!(LANES_NEON_BYTES == CHUNK_16);

// =============================================================================
// x86_64 SHARED PIPELINE
// =============================================================================

// Folds 16 biased-ASCII bytes into two 8-digit u32 lanes:
// lane 0 = bytes 0..8 (high half), lane 1 = bytes 8..16 (low half).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
unsafe fn fold_octets_x86(chunk: __m128i) -> __m128i {
    let digits = _mm_add_epi8(chunk, _mm_set1_epi8(ASCII_BIAS));
    let pairs = _mm_maddubs_epi16(digits, _mm_set1_epi16(PAIR_WEIGHTS));
    let quads = _mm_madd_epi16(pairs, _mm_set1_epi32(QUAD_WEIGHTS));
    let packed = _mm_packus_epi32(quads, quads);
    _mm_madd_epi16(
        packed,
        _mm_set_epi16(0, 0, 0, 0, 1, OCTET_WEIGHT, 1, OCTET_WEIGHT),
    )
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
unsafe fn parse16_x86(chunk: &[u8; 16]) -> u64 {
    let octets = fold_octets_x86(_mm_loadu_si128(chunk.as_ptr().cast()));
    let both = _mm_cvtsi128_si64(octets) as u64;
    let high = both & 0xffff_ffff;
    let low = both >> 32;
    high.wrapping_mul(POW10_8).wrapping_add(low)
}

#[cfg(target_arch = "x86_64")]
#[inline(always)]
unsafe fn parse8_x86(chunk: &[u8; 8]) -> u64 {
    // Narrow load fills the low 64 bits; replicate them so the 16-byte
    // pipeline sees the same eight digits in both halves.
    let narrow = _mm_loadl_epi64(chunk.as_ptr().cast());
    let replicated = _mm_shuffle_epi32::<0x44>(narrow);
    let octets = fold_octets_x86(replicated);
    u64::from(_mm_cvtsi128_si32(octets) as u32)
}

// =============================================================================
// x86_64 BASELINE DIALECT (SSE4.1)
// =============================================================================

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2,ssse3,sse4.1")]
pub(crate) unsafe fn parse16_sse41(chunk: &[u8; 16]) -> u64 {
    parse16_x86(chunk)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "sse2,ssse3,sse4.1")]
pub(crate) unsafe fn parse8_sse41(chunk: &[u8; 8]) -> u64 {
    parse8_x86(chunk)
}

// =============================================================================
// x86_64 EXTENDED DIALECT (AVX, VEX-encoded)
// =============================================================================

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn parse16_avx(chunk: &[u8; 16]) -> u64 {
    parse16_x86(chunk)
}

#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx")]
pub(crate) unsafe fn parse8_avx(chunk: &[u8; 8]) -> u64 {
    parse8_x86(chunk)
}

// =============================================================================
// aarch64 NEON
// =============================================================================

// Three de-interleave + widening multiply-accumulate levels:
// u8 x16 -> u16 x8 (x10) -> u32 x4 (x100) -> u64 x2 (x10000).
// Lane 0 of the result holds bytes 0..8, lane 1 bytes 8..16.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
unsafe fn fold_octets_neon(chunk: uint8x16_t) -> uint64x2_t {
    let digits = vsubq_u8(chunk, vdupq_n_u8(b'0'));

    let tens = vuzp1q_u8(digits, digits);
    let ones = vuzp2q_u8(digits, digits);
    let pairs = vmlal_u8(
        vmovl_u8(vget_low_u8(ones)),
        vget_low_u8(tens),
        vdup_n_u8(10),
    );

    let hundreds = vuzp1q_u16(pairs, pairs);
    let units = vuzp2q_u16(pairs, pairs);
    let quads = vmlal_u16(
        vmovl_u16(vget_low_u16(units)),
        vget_low_u16(hundreds),
        vdup_n_u16(100),
    );

    let upper = vuzp1q_u32(quads, quads);
    let lower = vuzp2q_u32(quads, quads);
    vmlal_u32(
        vmovl_u32(vget_low_u32(lower)),
        vget_low_u32(upper),
        vdup_n_u32(10_000),
    )
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn parse16_neon(chunk: &[u8; 16]) -> u64 {
    let octets = fold_octets_neon(vld1q_u8(chunk.as_ptr()));
    let high = vgetq_lane_u64::<0>(octets);
    let low = vgetq_lane_u64::<1>(octets);
    high.wrapping_mul(POW10_8).wrapping_add(low)
}

#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn parse8_neon(chunk: &[u8; 8]) -> u64 {
    let narrow = vld1_u8(chunk.as_ptr());
    let octets = fold_octets_neon(vcombine_u8(narrow, narrow));
    vgetq_lane_u64::<0>(octets)
}
