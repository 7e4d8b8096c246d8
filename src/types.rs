// SPDX-License-Identifier: Apache-2.0

// types.rs for hwx-digits
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigitsError {
    #[error("empty digit string")]
    Empty,
    #[error("digit string has {0} bytes, at most 16 are supported")]
    TooLong(usize),
    #[error("invalid digit byte 0x{byte:02x} at position {position}")]
    InvalidDigit { position: usize, byte: u8 },
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
    #[error("unknown kernel family: {0}")]
    UnknownFamily(String),
}

pub type Result<T> = std::result::Result<T, DigitsError>;

/// Kernel family backing the length composer, in order of preference.
///
/// `VectorExtended` is the VEX-encoded (AVX) 128-bit dialect on x86_64.
/// `VectorBaseline` is SSE4.1 on x86_64 and NEON on aarch64.
/// `BitTrick` is the portable SWAR family and is always available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KernelFamily {
    VectorExtended,
    VectorBaseline,
    BitTrick,
}

impl KernelFamily {
    /// Every family, best first.
    pub const ALL: [KernelFamily; 3] = [
        KernelFamily::VectorExtended,
        KernelFamily::VectorBaseline,
        KernelFamily::BitTrick,
    ];

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            KernelFamily::VectorExtended => "vector-extended",
            KernelFamily::VectorBaseline => "vector-baseline",
            KernelFamily::BitTrick => "bit-trick",
        }
    }

    #[inline]
    pub fn is_vector(self) -> bool {
        !matches!(self, KernelFamily::BitTrick)
    }
}

impl fmt::Display for KernelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KernelFamily {
    type Err = DigitsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vector-extended" | "avx" => Ok(KernelFamily::VectorExtended),
            "vector-baseline" | "sse4.1" | "sse41" | "neon" => Ok(KernelFamily::VectorBaseline),
            "bit-trick" | "swar" | "scalar" => Ok(KernelFamily::BitTrick),
            other => Err(DigitsError::UnknownFamily(other.to_string())),
        }
    }
}

/// Parser configuration as read from an embedding application's config.
///
/// `family: None` (the default) means "detect the best family at startup".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub family: Option<KernelFamily>,
}

impl ParserConfig {
    #[inline]
    pub fn new(family: Option<KernelFamily>) -> Self {
        Self { family }
    }

    #[inline]
    pub fn pinned(family: KernelFamily) -> Self {
        Self {
            family: Some(family),
        }
    }
}

/// Chunk widths the length composer uses for one input length.
///
/// At most four steps: one 16, one 8, one 4 and a 1-3 byte tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkPlan {
    widths: [u8; 4],
    len: u8,
}

impl ChunkPlan {
    #[inline]
    pub(crate) fn push(&mut self, width: u8) {
        self.widths[self.len as usize] = width;
        self.len += 1;
    }

    #[inline]
    pub fn widths(&self) -> &[u8] {
        &self.widths[..self.len as usize]
    }

    /// Number of digits the plan consumes.
    #[inline]
    pub fn digits(&self) -> usize {
        self.widths().iter().map(|&w| w as usize).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
