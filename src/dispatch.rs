// SPDX-License-Identifier: Apache-2.0

//! # Kernel family dispatch
//!
//! Chooses which kernel family backs the length composer: the AVX dialect,
//! the baseline vector dialect (SSE4.1 or NEON) or the portable bit-trick
//! kernels, in that order of preference.
//!
//! The choice is made once. A [`DigitParser`] resolves its family into a
//! table of kernel function pointers when it is built, so parsing never
//! re-checks CPU features. The crate-level free functions share one parser
//! detected lazily on first use; applications that want a fixed tier build
//! their own with [`DigitParser::with_family`] or [`DigitParser::from_config`].

use log::{debug, trace};

#[cfg(target_arch = "aarch64")]
use std::arch::is_aarch64_feature_detected;

use crate::compose::{self, DigitKernels};
use crate::constants::MAX_DIGITS;
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
use crate::simd;
use crate::swar;
use crate::types::{DigitsError, KernelFamily, ParserConfig, Result};

// =============================================================================
//  HARDWARE DETECTION & SIMD CAPABILITIES
// =============================================================================

/// Hardware capabilities relevant to the digit kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HardwareCapabilities {
    pub has_avx: bool,
    pub has_sse41: bool,
    pub has_neon: bool,
}

impl HardwareCapabilities {
    #[inline]
    pub fn detect() -> Self {
        HardwareCapabilities {
            has_avx: Self::detect_avx(),
            has_sse41: Self::detect_sse41(),
            has_neon: Self::detect_neon(),
        }
    }

    fn detect_avx() -> bool {
        #[allow(unused_mut)]
        let mut detected_avx = false;

        #[cfg(target_arch = "x86_64")]
        if is_x86_feature_detected!("avx") {
            detected_avx = true;
        }

        detected_avx
    }

    fn detect_sse41() -> bool {
        #[allow(unused_mut)]
        let mut detected_sse41 = false;

        // pmaddubsw is SSSE3, packusdw is SSE4.1
        #[cfg(target_arch = "x86_64")]
        if is_x86_feature_detected!("ssse3") && is_x86_feature_detected!("sse4.1") {
            detected_sse41 = true;
        }

        detected_sse41
    }

    fn detect_neon() -> bool {
        #[allow(unused_mut)]
        let mut detected_neon = false;

        #[cfg(target_arch = "aarch64")]
        if is_aarch64_feature_detected!("neon") {
            detected_neon = true;
        }

        detected_neon
    }

    /// Whether the kernels of `family` can run on this CPU.
    #[inline]
    pub fn supports(&self, family: KernelFamily) -> bool {
        match family {
            KernelFamily::VectorExtended => self.has_avx,
            KernelFamily::VectorBaseline => self.has_sse41 || self.has_neon,
            KernelFamily::BitTrick => true,
        }
    }

    /// Best supported family. Always `BitTrick` with the `disable-simd` feature.
    pub fn best_family(&self) -> KernelFamily {
        if cfg!(feature = "disable-simd") {
            return KernelFamily::BitTrick;
        }
        KernelFamily::ALL
            .into_iter()
            .find(|&family| self.supports(family))
            .unwrap_or(KernelFamily::BitTrick)
    }
}

/// Get information about available SIMD capabilities
#[inline]
pub fn get_hw_capabilities() -> HardwareCapabilities {
    HardwareCapabilities::detect()
}

/// Check if a specific SIMD instruction set is available
#[inline]
pub fn has_hw_support(instruction_set: &str) -> bool {
    let caps = get_hw_capabilities();
    match instruction_set {
        "avx" => caps.has_avx,
        "sse4.1" => caps.has_sse41,
        "neon" => caps.has_neon,
        _ => false,
    }
}

// =============================================================================
//  KERNEL ENTRY POINTS
// =============================================================================

// Safe shims over the target-feature kernels. They are only installed into a
// DigitParser whose family passed `HardwareCapabilities::supports`.

#[cfg(target_arch = "x86_64")]
fn parse16_avx_entry(chunk: &[u8; 16]) -> u64 {
    // SAFETY: installed only after AVX was detected.
    unsafe { simd::parse16_avx(chunk) }
}

#[cfg(target_arch = "x86_64")]
fn parse8_avx_entry(chunk: &[u8; 8]) -> u64 {
    // SAFETY: installed only after AVX was detected.
    unsafe { simd::parse8_avx(chunk) }
}

#[cfg(target_arch = "x86_64")]
fn parse16_sse41_entry(chunk: &[u8; 16]) -> u64 {
    // SAFETY: installed only after SSSE3 + SSE4.1 were detected.
    unsafe { simd::parse16_sse41(chunk) }
}

#[cfg(target_arch = "x86_64")]
fn parse8_sse41_entry(chunk: &[u8; 8]) -> u64 {
    // SAFETY: installed only after SSSE3 + SSE4.1 were detected.
    unsafe { simd::parse8_sse41(chunk) }
}

#[cfg(target_arch = "aarch64")]
fn parse16_neon_entry(chunk: &[u8; 16]) -> u64 {
    // SAFETY: installed only after NEON was detected.
    unsafe { simd::parse16_neon(chunk) }
}

#[cfg(target_arch = "aarch64")]
fn parse8_neon_entry(chunk: &[u8; 8]) -> u64 {
    // SAFETY: installed only after NEON was detected.
    unsafe { simd::parse8_neon(chunk) }
}

// =============================================================================
//  DIGIT PARSER
// =============================================================================

type Kernel16 = fn(&[u8; 16]) -> u64;
type Kernel8 = fn(&[u8; 8]) -> u64;
type Kernel4 = fn(&[u8; 4]) -> u64;

/// A kernel family resolved to concrete kernels, plus the length composer.
///
/// Cheap to copy and safe to share between threads. Parsing through a
/// `DigitParser` performs no feature detection and no allocation.
#[derive(Debug, Clone, Copy)]
pub struct DigitParser {
    family: KernelFamily,
    parse16: Kernel16,
    parse8: Kernel8,
    parse4: Kernel4,
}

impl DigitParser {
    /// Parser for the best family this CPU supports.
    pub fn detect() -> Self {
        let caps = get_hw_capabilities();
        let family = caps.best_family();
        debug!(
            "HWX DIGITS: detected caps avx={} sse4.1={} neon={}, selected family={}",
            caps.has_avx, caps.has_sse41, caps.has_neon, family
        );
        Self::resolve(family)
    }

    /// Parser pinned to `family`, failing if this CPU cannot run it.
    pub fn with_family(family: KernelFamily) -> Result<Self> {
        if !get_hw_capabilities().supports(family) {
            debug!("HWX DIGITS: family {} requested but not supported", family);
            return Err(DigitsError::Unsupported(format!(
                "kernel family {} is not available on this CPU",
                family
            )));
        }
        debug!("HWX DIGITS: pinned family={}", family);
        Ok(Self::resolve(family))
    }

    /// Parser described by `config`; `family: None` means detect.
    pub fn from_config(config: &ParserConfig) -> Result<Self> {
        match config.family {
            Some(family) => Self::with_family(family),
            None => Ok(Self::detect()),
        }
    }

    /// Portable parser, available everywhere.
    pub const fn bit_trick() -> Self {
        Self {
            family: KernelFamily::BitTrick,
            parse16: swar::parse16_swar,
            parse8: swar::parse8_swar,
            parse4: swar::parse4_swar,
        }
    }

    // Callers must have checked `supports(family)`.
    #[allow(unreachable_patterns)]
    fn resolve(family: KernelFamily) -> Self {
        match family {
            #[cfg(target_arch = "x86_64")]
            KernelFamily::VectorExtended => Self {
                family,
                parse16: parse16_avx_entry,
                parse8: parse8_avx_entry,
                parse4: swar::parse4_swar,
            },
            #[cfg(target_arch = "x86_64")]
            KernelFamily::VectorBaseline => Self {
                family,
                parse16: parse16_sse41_entry,
                parse8: parse8_sse41_entry,
                parse4: swar::parse4_swar,
            },
            #[cfg(target_arch = "aarch64")]
            KernelFamily::VectorBaseline => Self {
                family,
                parse16: parse16_neon_entry,
                parse8: parse8_neon_entry,
                parse4: swar::parse4_swar,
            },
            _ => Self::bit_trick(),
        }
    }

    #[inline]
    pub fn family(&self) -> KernelFamily {
        self.family
    }

    /// Parse 1-16 ASCII digits. Input is not validated.
    #[inline]
    pub fn parse(&self, digits: &[u8]) -> u64 {
        compose::compose(self, digits)
    }

    /// Validate then parse: rejects empty input, more than 16 bytes and
    /// any byte outside `'0'..='9'`.
    pub fn parse_checked(&self, digits: &[u8]) -> Result<u64> {
        validate_digits(digits)?;
        Ok(self.parse(digits))
    }
}

impl Default for DigitParser {
    fn default() -> Self {
        Self::detect()
    }
}

impl DigitKernels for DigitParser {
    #[inline(always)]
    fn parse16(&self, chunk: &[u8; 16]) -> u64 {
        (self.parse16)(chunk)
    }

    #[inline(always)]
    fn parse8(&self, chunk: &[u8; 8]) -> u64 {
        (self.parse8)(chunk)
    }

    #[inline(always)]
    fn parse4(&self, chunk: &[u8; 4]) -> u64 {
        (self.parse4)(chunk)
    }
}

/// Check the checked-path preconditions without parsing.
pub fn validate_digits(digits: &[u8]) -> Result<()> {
    if digits.is_empty() {
        trace!("VALIDATE_DIGITS: rejected empty input");
        return Err(DigitsError::Empty);
    }
    if digits.len() > MAX_DIGITS {
        trace!("VALIDATE_DIGITS: rejected len={}", digits.len());
        return Err(DigitsError::TooLong(digits.len()));
    }
    if let Some(position) = swar::find_non_digit(digits) {
        let byte = digits[position];
        trace!(
            "VALIDATE_DIGITS: rejected byte=0x{:02x} at position={}",
            byte,
            position
        );
        return Err(DigitsError::InvalidDigit { position, byte });
    }
    Ok(())
}

// =============================================================================
//  PROCESS-WIDE DEFAULT PARSER
// =============================================================================

// Detected once on first use, read-only afterwards.
lazy_static::lazy_static! {
  static ref DEFAULT_PARSER: DigitParser = DigitParser::detect();
}

/// The shared parser behind the free functions.
#[inline]
pub fn default_parser() -> &'static DigitParser {
    &DEFAULT_PARSER
}

/// Family backing the free functions.
#[inline]
pub fn active_family() -> KernelFamily {
    DEFAULT_PARSER.family()
}

/// Parse 1-16 ASCII digits with the active kernel family.
///
/// Input is not validated: non-digit bytes, empty input or more than 16
/// bytes give an unspecified value (never a panic). Use
/// [`parse_digits_checked`] for untrusted input.
///
/// # Examples
/// ```rust
/// assert_eq!(hwx_digits::parse_digits(b"1234567890123"), 1_234_567_890_123);
/// ```
#[inline]
pub fn parse_digits(digits: &[u8]) -> u64 {
    DEFAULT_PARSER.parse(digits)
}

/// Validating counterpart of [`parse_digits`].
///
/// # Examples
/// ```rust
/// use hwx_digits::{parse_digits_checked, DigitsError};
///
/// assert_eq!(parse_digits_checked(b"0042"), Ok(42));
/// assert_eq!(
///     parse_digits_checked(b"12x4"),
///     Err(DigitsError::InvalidDigit { position: 2, byte: b'x' })
/// );
/// ```
pub fn parse_digits_checked(digits: &[u8]) -> Result<u64> {
    DEFAULT_PARSER.parse_checked(digits)
}

#[inline]
pub fn parse_fixed16(chunk: &[u8; 16]) -> u64 {
    DEFAULT_PARSER.parse16(chunk)
}

#[inline]
pub fn parse_fixed8(chunk: &[u8; 8]) -> u64 {
    DEFAULT_PARSER.parse8(chunk)
}

#[inline]
pub fn parse_fixed4(chunk: &[u8; 4]) -> u64 {
    DEFAULT_PARSER.parse4(chunk)
}
