// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Digit-sum and divisibility helpers used by the gas-vehicle rule.

/// Sum of the base-10 digits of `n`. Single-digit values are returned as-is.
pub fn sum_of_digits(n: u64) -> u64 {
    if n < 10 {
        return n;
    }
    n % 10 + sum_of_digits(n / 10)
}

pub fn is_divisible_by_7(n: u64) -> bool {
    n % 7 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit_is_identity() {
        for n in 0..10 {
            assert_eq!(sum_of_digits(n), n);
        }
    }

    #[test]
    fn multi_digit_sums() {
        assert_eq!(sum_of_digits(1234), 10);
        assert_eq!(sum_of_digits(1234567), 28);
        assert_eq!(sum_of_digits(10_000_000), 1);
        assert_eq!(sum_of_digits(99_999_999), 72);
    }

    #[test]
    fn divisible_by_7() {
        assert!(is_divisible_by_7(14));
        assert!(!is_divisible_by_7(15));
        assert!(is_divisible_by_7(0));
        assert!(is_divisible_by_7(28));
        assert!(!is_divisible_by_7(33));
    }

    #[test]
    fn divisibility_matches_modulo() {
        for n in 0..200u64 {
            assert_eq!(is_divisible_by_7(n), n % 7 == 0, "n = {n}");
        }
    }
}
