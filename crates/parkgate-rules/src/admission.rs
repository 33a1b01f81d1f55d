// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Admission decision engine.
//
// Rules are evaluated in a fixed order and the first match wins:
//
//   1. letter anywhere but the last position  -> error (corrupted read)
//   2. fewer than 6 or more than 8 characters  -> error (invalid length)
//   3. any letter                              -> deny, law_enforcement
//   4. ends in 25 / 26                         -> deny, public_transportation
//   5. 7 characters ending in 85-89 / 00       -> deny, prohibited_number_plates
//   6. 7 or 8 characters, digit sum % 7 == 0   -> deny, divide_by_7
//   7. otherwise                               -> allow, passed_in

use parkgate_core::error::{ParkgateError, Result};
use parkgate_core::{ReasonCode, Verdict};
use tracing::{info, instrument, warn};

use crate::digits::{is_divisible_by_7, sum_of_digits};

const MIN_PLATE_LEN: usize = 6;
const MAX_PLATE_LEN: usize = 8;

const PUBLIC_TRANSPORTATION_SUFFIXES: [&str; 2] = ["25", "26"];
const PROHIBITED_SUFFIXES: [&str; 6] = ["85", "86", "87", "88", "89", "00"];

/// Decide whether the vehicle with this (normalized) plate may enter.
///
/// Returns `Err` only when the plate itself is unusable: a letter before the
/// last position ([`ParkgateError::CorruptedRead`]) or a length outside 6..=8
/// ([`ParkgateError::InvalidLength`]). A refused vehicle is an `Ok` verdict.
#[instrument(skip_all, fields(plate = %plate))]
pub fn evaluate(plate: &str) -> Result<Verdict> {
    let chars: Vec<char> = plate.chars().collect();
    let length = chars.len();

    let head = &chars[..length.saturating_sub(1)];
    if head.iter().any(|c| c.is_alphabetic()) {
        warn!("letter before the final position, rejecting read");
        return Err(ParkgateError::CorruptedRead(plate.to_string()));
    }

    if !(MIN_PLATE_LEN..=MAX_PLATE_LEN).contains(&length) {
        warn!(length, "plate length out of range");
        return Err(ParkgateError::InvalidLength {
            plate: plate.to_string(),
            length,
        });
    }

    let verdict = if chars.iter().any(|c| c.is_alphabetic()) {
        Verdict::new(ReasonCode::LawEnforcement)
    } else {
        let suffix: String = chars[length - 2..].iter().collect();

        if PUBLIC_TRANSPORTATION_SUFFIXES.contains(&suffix.as_str()) {
            Verdict::new(ReasonCode::PublicTransportation)
        } else if length == 7 && PROHIBITED_SUFFIXES.contains(&suffix.as_str()) {
            Verdict::new(ReasonCode::ProhibitedNumberPlates)
        } else if matches!(length, 7 | 8) && is_divisible_by_7(sum_of_digits(plate_value(plate)?))
        {
            Verdict::new(ReasonCode::DivideBy7)
        } else {
            Verdict::new(ReasonCode::PassedIn)
        }
    };

    info!(
        authorized = verdict.authorized(),
        reason = %verdict.reason(),
        "admission evaluated"
    );
    Ok(verdict)
}

/// Numeric value of an all-digit plate.
fn plate_value(plate: &str) -> Result<u64> {
    if !plate.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParkgateError::NonDecimalDigits(plate.to_string()));
    }
    // At most 8 ASCII digits, always fits.
    plate
        .parse()
        .map_err(|_| ParkgateError::NonDecimalDigits(plate.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(plate: &str) -> (bool, ReasonCode) {
        let v = evaluate(plate).unwrap_or_else(|e| panic!("{plate}: {e}"));
        (v.authorized(), v.reason())
    }

    #[test]
    fn digit_sum_divisible_by_7() {
        assert_eq!(verdict("1234567"), (false, ReasonCode::DivideBy7));
        assert_eq!(verdict("16000000"), (false, ReasonCode::DivideBy7));
    }

    #[test]
    fn public_transportation_suffix() {
        assert_eq!(verdict("1234526"), (false, ReasonCode::PublicTransportation));
        assert_eq!(verdict("12345625"), (false, ReasonCode::PublicTransportation));
        assert_eq!(verdict("123425"), (false, ReasonCode::PublicTransportation));
    }

    #[test]
    fn public_transportation_beats_digit_sum() {
        // 6 + 2 + 6 = 14
        assert_eq!(verdict("6000026"), (false, ReasonCode::PublicTransportation));
    }

    #[test]
    fn prohibited_suffix_for_seven_characters() {
        assert_eq!(verdict("1234589"), (false, ReasonCode::ProhibitedNumberPlates));
        assert_eq!(verdict("1234500"), (false, ReasonCode::ProhibitedNumberPlates));
        // Digit sum 7 as well, prohibited suffix wins.
        assert_eq!(verdict("7000000"), (false, ReasonCode::ProhibitedNumberPlates));
    }

    #[test]
    fn prohibited_suffix_ignored_for_other_lengths() {
        // 8 characters ending in 00, digit sum 21.
        assert_eq!(verdict("12345600"), (false, ReasonCode::DivideBy7));
        // 8 characters ending in 89, digit sum 38.
        assert_eq!(verdict("12345689"), (true, ReasonCode::PassedIn));
        assert_eq!(verdict("123489"), (true, ReasonCode::PassedIn));
    }

    #[test]
    fn digit_sum_rule_skips_six_characters() {
        // Digit sum 7 but only six characters.
        assert_eq!(verdict("700000"), (true, ReasonCode::PassedIn));
    }

    #[test]
    fn passes_when_no_rule_matches() {
        assert_eq!(verdict("1234599"), (true, ReasonCode::PassedIn));
    }

    #[test]
    fn trailing_letter_is_law_enforcement() {
        assert_eq!(verdict("123456M"), (false, ReasonCode::LawEnforcement));
        // Would also match the public transportation rule without the letter.
        assert_eq!(verdict("1234526x"), (false, ReasonCode::LawEnforcement));
    }

    #[test]
    fn letter_before_last_position_is_corrupted() {
        let err = evaluate("AB34567").unwrap_err();
        assert!(matches!(err, ParkgateError::CorruptedRead(ref p) if p == "AB34567"));

        assert!(matches!(
            evaluate("12345Z6").unwrap_err(),
            ParkgateError::CorruptedRead(_)
        ));
    }

    #[test]
    fn corrupted_read_checked_before_length() {
        assert!(matches!(
            evaluate("A1").unwrap_err(),
            ParkgateError::CorruptedRead(_)
        ));
    }

    #[test]
    fn length_outside_range_is_rejected() {
        for plate in ["12345", "123456789", "", "7", "M"] {
            match evaluate(plate) {
                Err(ParkgateError::InvalidLength { length, .. }) => {
                    assert_eq!(length, plate.chars().count());
                }
                other => panic!("{plate:?}: expected InvalidLength, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_decimal_numerics_cannot_be_summed() {
        assert!(matches!(
            evaluate("12345²7").unwrap_err(),
            ParkgateError::NonDecimalDigits(_)
        ));
    }

    #[test]
    fn deterministic() {
        for plate in ["1234567", "1234526", "1234589", "1234599", "123456M"] {
            assert_eq!(evaluate(plate).unwrap(), evaluate(plate).unwrap());
        }
    }
}
