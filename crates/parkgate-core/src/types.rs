// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Parkgate admission gate.

use chrono::{DateTime, Local, SubsecRound};
use serde::{Deserialize, Serialize};

/// Why a vehicle was (or was not) let in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    /// Plate carries a letter: military or law enforcement vehicle.
    #[serde(rename = "law_enforcement")]
    LawEnforcement,
    /// Plate ends in 25 or 26.
    #[serde(rename = "public_transportation")]
    PublicTransportation,
    /// Seven-character plate ending in 85–89 or 00.
    #[serde(rename = "prohibited_number_plates")]
    ProhibitedNumberPlates,
    /// Digit sum divisible by 7: suspected gas-operated vehicle.
    #[serde(rename = "divide_by_7")]
    DivideBy7,
    /// No rule matched.
    #[serde(rename = "passed_in")]
    PassedIn,
}

impl ReasonCode {
    /// Stable identifier written to the admission log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LawEnforcement => "law_enforcement",
            Self::PublicTransportation => "public_transportation",
            Self::ProhibitedNumberPlates => "prohibited_number_plates",
            Self::DivideBy7 => "divide_by_7",
            Self::PassedIn => "passed_in",
        }
    }

    /// Message shown to the gate operator.
    pub fn description(&self) -> &'static str {
        match self {
            Self::LawEnforcement => "Military and law enforcement vehicles are prohibited",
            Self::PublicTransportation => "Public transportation vehicles are prohibited",
            Self::ProhibitedNumberPlates => "Prohibited license plate number",
            Self::DivideBy7 => "Suspected as operated by gas, therefore prohibited",
            Self::PassedIn => "Authorized to enter the parking lot",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a plate against the admission rules.
///
/// The decision follows from the reason: only [`ReasonCode::PassedIn`] lets a
/// vehicle in, so a verdict cannot authorize a refused plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    reason: ReasonCode,
}

impl Verdict {
    pub fn new(reason: ReasonCode) -> Self {
        Self { reason }
    }

    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    pub fn authorized(&self) -> bool {
        self.reason == ReasonCode::PassedIn
    }

    /// The decision as it is stored: `"True"` or `"False"`.
    pub fn decision(&self) -> &'static str {
        decision_str(self.authorized())
    }
}

/// Stored spelling of a decision.
pub fn decision_str(authorized: bool) -> &'static str {
    if authorized { "True" } else { "False" }
}

/// One admission decision, ready to be appended to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub plate_number: String,
    /// Stringified boolean: `"True"` or `"False"`.
    pub decision: String,
    pub reason: ReasonCode,
    /// Local time, truncated to whole seconds.
    pub entry_time: DateTime<Local>,
}

impl AdmissionRecord {
    /// Build a record stamped with the current time.
    pub fn new(plate_number: impl Into<String>, verdict: &Verdict) -> Self {
        Self::at(plate_number, verdict, Local::now())
    }

    /// Build a record for an explicit entry time. Sub-second precision is dropped.
    pub fn at(plate_number: impl Into<String>, verdict: &Verdict, when: DateTime<Local>) -> Self {
        Self {
            plate_number: plate_number.into(),
            decision: verdict.decision().to_string(),
            reason: verdict.reason(),
            entry_time: when.trunc_subsecs(0),
        }
    }
}

/// An encoded plate image on its way to an OCR provider.
#[derive(Debug, Clone)]
pub struct PlateUpload {
    /// Name the image is uploaded under (the source file name).
    pub file_name: String,
    /// MIME type of `bytes`.
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl PlateUpload {
    pub fn png(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: "image/png",
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
