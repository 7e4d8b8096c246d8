// SPDX-License-Identifier: Apache-2.0

//! Test-only helpers.

use crate::dispatch::{get_hw_capabilities, DigitParser};
use crate::types::KernelFamily;

/// One parser per family this CPU can run, best first.
pub fn supported_parsers() -> Vec<DigitParser> {
    let caps = get_hw_capabilities();
    KernelFamily::ALL
        .into_iter()
        .filter(|&family| caps.supports(family))
        .map(|family| DigitParser::with_family(family).unwrap())
        .collect()
}

/// `value` rendered as exactly `width` ASCII digits, zero-padded.
pub fn padded(value: u64, width: usize) -> Vec<u8> {
    format!("{:0width$}", value, width = width).into_bytes()
}

/// Positional value of an all-digit string, via the standard library.
pub fn decimal_value(digits: &[u8]) -> u64 {
    std::str::from_utf8(digits).unwrap().parse().unwrap()
}

/// Deterministic pseudo-random digit strings covering lengths 1..=16.
pub fn sample_digit_strings(count: usize) -> Vec<Vec<u8>> {
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    (0..count)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let len = i % 16 + 1;
            let mut digits = padded(state % 10_000_000_000_000_000, 16);
            digits.truncate(len);
            digits
        })
        .collect()
}
