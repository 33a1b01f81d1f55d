// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plate normalizer.

/// Keep only letters and digits from raw OCR output, in their original order.
///
/// Case is preserved. Whitespace, punctuation and OCR noise are dropped.
/// Digits are the decimal digits `0`-`9`; other numerics such as `½`, `²` or
/// `Ⅻ` count as noise.
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|&c| is_plate_char(c)).collect()
}

fn is_plate_char(c: char) -> bool {
    c.is_ascii_digit() || (c.is_alphabetic() && !c.is_numeric())
}
