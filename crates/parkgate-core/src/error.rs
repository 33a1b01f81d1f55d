// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Parkgate.

use thiserror::Error;

/// Top-level error type for all Parkgate operations.
///
/// A rejected vehicle is *not* an error: rule outcomes are carried by
/// [`Verdict`](crate::Verdict). Every variant here aborts the run.
#[derive(Debug, Error)]
pub enum ParkgateError {
    // -- Input quality --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("image too small: {width}x{height} is below the {min_pixels} pixel minimum")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_pixels: u64,
    },

    #[error("plate was read incorrectly: {0:?} has a letter before its last character")]
    CorruptedRead(String),

    #[error("invalid number of characters in plate {plate:?}: {length} (expected 6 to 8)")]
    InvalidLength { plate: String, length: usize },

    #[error("plate {0:?} contains numeric characters that are not decimal digits")]
    NonDecimalDigits(String),

    // -- External service --
    #[error("OCR request failed: {0}")]
    OcrRequest(String),

    #[error("malformed OCR response: {0}")]
    MalformedResponse(String),

    #[error("OCR upload too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: usize, limit: usize },

    #[error("local OCR engine failed: {0}")]
    OcrEngine(String),

    // -- Environment --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Broad family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The image or the reading taken from it is unusable; take another picture.
    InputQuality,
    /// The OCR provider failed or answered with something unexpected.
    ExternalService,
    /// Local setup: configuration, database, filesystem.
    Environment,
}

impl ParkgateError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ImageError(_)
            | Self::ImageTooSmall { .. }
            | Self::CorruptedRead(_)
            | Self::InvalidLength { .. }
            | Self::NonDecimalDigits(_) => ErrorClass::InputQuality,

            Self::OcrRequest(_)
            | Self::MalformedResponse(_)
            | Self::PayloadTooLarge { .. }
            | Self::OcrEngine(_) => ErrorClass::ExternalService,

            Self::Config(_) | Self::Database(_) | Self::Io(_) | Self::Serialization(_) => {
                ErrorClass::Environment
            }
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ParkgateError>;
