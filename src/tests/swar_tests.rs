// SPDX-License-Identifier: Apache-2.0

// =============================================================================
// BIT-TRICK KERNEL TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::swar::{
        find_non_digit, is_eight_digits, is_four_digits, parse16_swar, parse16_unrolled,
        parse4_swar, parse4_unrolled, parse8_swar, parse8_unrolled, parse_naive,
    };
    use crate::test_utils::padded;
    use proptest::prelude::*;

    const CASES_16: [(&[u8; 16], u64); 7] = [
        (b"0000000000000000", 0),
        (b"0000000000000001", 1),
        (b"0000000000000002", 2),
        (b"9999999999999999", 9_999_999_999_999_999),
        (b"8888888888888888", 8_888_888_888_888_888),
        (b"7777777777777777", 7_777_777_777_777_777),
        (b"1234567890123456", 1_234_567_890_123_456),
    ];

    const CASES_8: [(&[u8; 8], u64); 7] = [
        (b"00000000", 0),
        (b"00000001", 1),
        (b"00000002", 2),
        (b"99999999", 99_999_999),
        (b"88888888", 88_888_888),
        (b"77777777", 77_777_777),
        (b"12345678", 12_345_678),
    ];

    const CASES_4: [(&[u8; 4], u64); 7] = [
        (b"0000", 0),
        (b"0001", 1),
        (b"0002", 2),
        (b"9999", 9_999),
        (b"8888", 8_888),
        (b"7777", 7_777),
        (b"1020", 1_020),
    ];

    #[test]
    fn test_parse16_known_values() {
        for (input, want) in CASES_16 {
            assert_eq!(parse16_swar(input), want, "parse16_swar({:?})", input);
            assert_eq!(parse16_unrolled(input), want, "parse16_unrolled({:?})", input);
            assert_eq!(parse_naive(input), want, "parse_naive({:?})", input);
        }
    }

    #[test]
    fn test_parse8_known_values() {
        for (input, want) in CASES_8 {
            assert_eq!(parse8_swar(input), want, "parse8_swar({:?})", input);
            assert_eq!(parse8_unrolled(input), want, "parse8_unrolled({:?})", input);
        }
    }

    #[test]
    fn test_parse4_known_values() {
        for (input, want) in CASES_4 {
            assert_eq!(parse4_swar(input), want, "parse4_swar({:?})", input);
            assert_eq!(parse4_unrolled(input), want, "parse4_unrolled({:?})", input);
        }
    }

    #[test]
    fn test_parse4_exhaustive() {
        for value in 0..10_000u64 {
            let digits: [u8; 4] = padded(value, 4).try_into().unwrap();
            assert_eq!(parse4_swar(&digits), value);
        }
    }

    #[test]
    fn test_parse8_each_position() {
        // A single non-zero digit at every position checks the lane order.
        for position in 0..8 {
            for d in 1..=9u8 {
                let mut digits = *b"00000000";
                digits[position] = b'0' + d;
                let want = u64::from(d) * 10u64.pow(7 - position as u32);
                assert_eq!(parse8_swar(&digits), want, "digits={:?}", digits);
            }
        }
    }

    #[test]
    fn test_non_digits_do_not_panic() {
        let garbage = [0xffu8; 16];
        let _ = parse16_swar(&garbage);
        let _ = parse16_unrolled(&garbage);
        let _ = parse8_swar(b"\0\0\0\0\0\0\0\0");
        let _ = parse4_swar(b"abcd");
        let _ = parse_naive(b"99999999999999999999999");
    }

    #[test]
    fn test_is_eight_digits() {
        assert!(is_eight_digits(u64::from_le_bytes(*b"01234567")));
        assert!(is_eight_digits(u64::from_le_bytes(*b"99999999")));
        assert!(!is_eight_digits(u64::from_le_bytes(*b"0123456/")));
        assert!(!is_eight_digits(u64::from_le_bytes(*b":1234567")));
        assert!(!is_eight_digits(u64::from_le_bytes(*b"1234 678")));
        assert!(!is_eight_digits(u64::from_le_bytes([b'1', 0xb9, b'1', b'1', b'1', b'1', b'1', b'1'])));
        assert!(!is_eight_digits(0));
    }

    #[test]
    fn test_is_four_digits() {
        assert!(is_four_digits(u32::from_le_bytes(*b"0000")));
        assert!(is_four_digits(u32::from_le_bytes(*b"9876")));
        assert!(!is_four_digits(u32::from_le_bytes(*b"98-6")));
        assert!(!is_four_digits(u32::from_le_bytes([b'1', b'2', b'3', 0x80])));
    }

    #[test]
    fn test_find_non_digit() {
        assert_eq!(find_non_digit(b""), None);
        assert_eq!(find_non_digit(b"7"), None);
        assert_eq!(find_non_digit(b"1234567890123456"), None);
        assert_eq!(find_non_digit(b"a"), Some(0));
        assert_eq!(find_non_digit(b"12345678901x3"), Some(11));
        assert_eq!(find_non_digit(b"1234567x"), Some(7));
        assert_eq!(find_non_digit(b"123456789 12"), Some(9));
        assert_eq!(find_non_digit(b"1234567890123.5"), Some(13));
        assert_eq!(find_non_digit(b"12.4.67890123456"), Some(2));
    }

    proptest! {
        #[test]
        fn prop_parse8_matches_value(value in 0u64..100_000_000) {
            let digits: [u8; 8] = padded(value, 8).try_into().unwrap();
            prop_assert_eq!(parse8_swar(&digits), value);
            prop_assert_eq!(parse8_unrolled(&digits), value);
        }

        #[test]
        fn prop_parse16_matches_value(value in 0u64..10_000_000_000_000_000) {
            let digits: [u8; 16] = padded(value, 16).try_into().unwrap();
            prop_assert_eq!(parse16_swar(&digits), value);
            prop_assert_eq!(parse16_unrolled(&digits), value);
        }

        #[test]
        fn prop_find_non_digit_matches_scan(bytes in proptest::collection::vec(any::<u8>(), 0..24)) {
            let expected = bytes.iter().position(|b| !b.is_ascii_digit());
            prop_assert_eq!(find_non_digit(&bytes), expected);
        }
    }
}
