// SPDX-License-Identifier: Apache-2.0

//! Length composer
//!
//! Decomposes a 1-16 digit string into a greedy 16 / 8 / 4 / tail ladder,
//! decodes each chunk with the active kernel family and folds the partial
//! values with fixed powers of ten:
//!
//! ```text
//! "1234567890123"  (13 digits)
//!  [12345678] [9012] [3]
//!  acc = 0 * 10^8 + 12345678
//!  acc = acc * 10^4 + 9012
//!  acc = acc * 10 + 3
//! ```
//!
//! Each rung of the ladder runs at most once. Inputs outside 1..=16 bytes
//! are a precondition violation: an empty slice yields 0 and longer inputs
//! wrap or leave bytes unread, but nothing panics.

use crate::constants::*;
use crate::swar;
use crate::types::ChunkPlan;

/// Uniform three-entry surface every kernel family provides.
pub trait DigitKernels {
    fn parse16(&self, chunk: &[u8; 16]) -> u64;
    fn parse8(&self, chunk: &[u8; 8]) -> u64;
    fn parse4(&self, chunk: &[u8; 4]) -> u64;
}

/// Portable SWAR family. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitTrickKernels;

impl DigitKernels for BitTrickKernels {
    #[inline(always)]
    fn parse16(&self, chunk: &[u8; 16]) -> u64 {
        swar::parse16_swar(chunk)
    }

    #[inline(always)]
    fn parse8(&self, chunk: &[u8; 8]) -> u64 {
        swar::parse8_swar(chunk)
    }

    #[inline(always)]
    fn parse4(&self, chunk: &[u8; 4]) -> u64 {
        swar::parse4_swar(chunk)
    }
}

/// Parse `digits` by chaining the fixed-width kernels of `kernels`.
#[inline(always)]
pub fn compose<K: DigitKernels + ?Sized>(kernels: &K, digits: &[u8]) -> u64 {
    let mut acc = 0u64;
    let mut rest = digits;

    if let Some((chunk, tail)) = rest.split_first_chunk::<CHUNK_16>() {
        acc = kernels.parse16(chunk);
        rest = tail;
    }
    if let Some((chunk, tail)) = rest.split_first_chunk::<CHUNK_8>() {
        acc = acc.wrapping_mul(POW10_8).wrapping_add(kernels.parse8(chunk));
        rest = tail;
    }
    if let Some((chunk, tail)) = rest.split_first_chunk::<CHUNK_4>() {
        acc = acc.wrapping_mul(POW10_4).wrapping_add(kernels.parse4(chunk));
        rest = tail;
    }

    fold_tail(acc, rest)
}

// Up to three trailing digits, unrolled; anything past the third is ignored.
#[inline(always)]
fn fold_tail(acc: u64, tail: &[u8]) -> u64 {
    #[inline(always)]
    fn step(acc: u64, byte: u8) -> u64 {
        acc.wrapping_mul(POW10_1)
            .wrapping_add(u64::from(byte.wrapping_sub(b'0')))
    }

    match *tail {
        [] => acc,
        [a] => step(acc, a),
        [a, b] => step(step(acc, a), b),
        [a, b, c, ..] => step(step(step(acc, a), b), c),
    }
}

/// Chunk widths [`compose`] uses for an input of `len` bytes.
pub fn chunk_plan(len: usize) -> ChunkPlan {
    let mut plan = ChunkPlan::default();
    let mut rest = len;

    for width in [CHUNK_16, CHUNK_8, CHUNK_4] {
        if rest >= width {
            plan.push(width as u8);
            rest -= width;
        }
    }
    if rest > 0 {
        plan.push(rest.min(MAX_TAIL) as u8);
    }
    plan
}
