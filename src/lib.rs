// SPDX-License-Identifier: Apache-2.0

//! HWX digits
//!
//! Converts short ASCII decimal strings (1-16 digits, no sign) into `u64`
//! using word-level and vector-level arithmetic instead of a per-character
//! loop.
//!
//! - Bit-trick (SWAR) kernels for 4, 8 and 16 digits, portable everywhere
//! - 128-bit vector kernels for 8 and 16 digits (SSE4.1, AVX, NEON)
//! - A length composer chaining them as a greedy 16 / 8 / 4 / tail ladder
//! - A checked entry point for untrusted input
//!
//! ## Hardware support
//! - **AVX** (VEX-encoded) is preferred on x86_64, then **SSE4.1**
//! - **NEON** is used on aarch64
//! - Everything else falls back to the bit-trick kernels
//! - The `disable-simd` feature forces the bit-trick kernels
//!
//! ## Usage
//!
//! ```rust
//! use hwx_digits::{DigitParser, KernelFamily};
//!
//! // Automatically selects the best kernel family
//! assert_eq!(hwx_digits::parse_digits(b"20240131"), 20_240_131);
//!
//! // Validating entry point
//! assert!(hwx_digits::parse_digits_checked(b"12-4").is_err());
//!
//! // Pin a family explicitly
//! let parser = DigitParser::with_family(KernelFamily::BitTrick).unwrap();
//! assert_eq!(parser.parse(b"9999999999999999"), 9_999_999_999_999_999);
//!
//! // Check available SIMD capabilities
//! let caps = hwx_digits::get_hw_capabilities();
//! println!("Has AVX: {}", caps.has_avx);
//! ```

pub mod compose;
pub mod constants;
pub mod dispatch;
mod simd;
pub mod swar;
pub mod types;

pub use types::*;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
#[path = "tests/compose_tests.rs"]
mod compose_tests;
#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod dispatch_tests;
#[cfg(test)]
#[path = "tests/simd_tests.rs"]
mod simd_tests;
#[cfg(test)]
#[path = "tests/swar_tests.rs"]
mod swar_tests;

pub use compose::{chunk_plan, BitTrickKernels, DigitKernels};
pub use dispatch::*;
