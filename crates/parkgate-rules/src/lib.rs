// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// parkgate-rules — Turns raw OCR text into a plate string and decides whether
// the vehicle may enter.

pub mod admission;
pub mod digits;
pub mod normalize;

pub use admission::evaluate;
pub use digits::{is_divisible_by_7, sum_of_digits};
pub use normalize::normalize;
