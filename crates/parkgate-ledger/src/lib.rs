// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// parkgate-ledger — Persistent record of every admission decision taken at the gate.

pub mod admissions;

pub use admissions::{AdmissionEntry, AdmissionLog};
