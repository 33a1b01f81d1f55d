// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the gate operator.
//
// Every technical error is mapped to a plain sentence and a concrete next step.

use crate::error::{ErrorClass, ParkgateError};

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (first line of output).
    pub message: String,
    /// What the operator should try next.
    pub suggestion: String,
    pub class: ErrorClass,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.suggestion)
    }
}

/// Convert a `ParkgateError` into a `HumanError` for the gate console.
pub fn humanize_error(err: &ParkgateError) -> HumanError {
    let class = err.class();
    let (message, suggestion) = match err {
        // -- Input quality --
        ParkgateError::ImageTooSmall { .. } => (
            "The image of the plate is too small.".to_string(),
            "Please get closer and take another picture.".to_string(),
        ),
        ParkgateError::ImageError(detail) => (
            "The plate image could not be opened.".to_string(),
            format!("Check that the file exists and is a PNG or JPEG picture. ({detail})"),
        ),
        ParkgateError::CorruptedRead(_) | ParkgateError::NonDecimalDigits(_) => (
            "The license plate was read incorrectly.".to_string(),
            "Please get another image.".to_string(),
        ),
        ParkgateError::InvalidLength { length, .. } => (
            format!("Invalid number of digits in the license plate ({length})."),
            "Please get another image.".to_string(),
        ),

        // -- External service --
        ParkgateError::OcrRequest(detail) => (
            "The plate reading service could not be reached.".to_string(),
            format!("Check the network connection, then try again. ({detail})"),
        ),
        ParkgateError::MalformedResponse(_) => (
            "There was an error while reading the plate.".to_string(),
            "Please get another image.".to_string(),
        ),
        ParkgateError::PayloadTooLarge { limit, .. } => (
            "The processed plate image is too large to send.".to_string(),
            format!("Crop the picture closer to the plate; the service accepts at most {limit} bytes."),
        ),
        ParkgateError::OcrEngine(detail) => (
            "The offline plate reader is not available.".to_string(),
            format!("Install the OCR models or use the online service. ({detail})"),
        ),

        // -- Environment --
        ParkgateError::Config(detail) => (
            "The gate is not configured correctly.".to_string(),
            detail.clone(),
        ),
        ParkgateError::Database(detail) => (
            "The admission log could not be written.".to_string(),
            format!("Check that the database file is writable. ({detail})"),
        ),
        ParkgateError::Io(e) => (
            "A file could not be read or written.".to_string(),
            e.to_string(),
        ),
        ParkgateError::Serialization(e) => (
            "A configuration or data file is not valid JSON.".to_string(),
            e.to_string(),
        ),
    };

    HumanError {
        message,
        suggestion,
        class,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_small_asks_to_get_closer() {
        let human = humanize_error(&ParkgateError::ImageTooSmall {
            width: 30,
            height: 30,
            min_pixels: 1600,
        });
        assert!(human.message.contains("too small"));
        assert!(human.suggestion.contains("closer"));
        assert_eq!(human.class, ErrorClass::InputQuality);
    }

    #[test]
    fn corrupted_read_asks_for_another_image() {
        let human = humanize_error(&ParkgateError::CorruptedRead("AB34567".into()));
        assert!(human.message.contains("read incorrectly"));
        assert_eq!(human.suggestion, "Please get another image.");
    }

    #[test]
    fn config_passes_detail_through() {
        let human = humanize_error(&ParkgateError::Config("no OCR API key configured".into()));
        assert_eq!(human.suggestion, "no OCR API key configured");
        assert_eq!(human.class, ErrorClass::Environment);
    }

    #[test]
    fn display_is_two_lines() {
        let human = humanize_error(&ParkgateError::MalformedResponse("empty".into()));
        assert_eq!(human.to_string().lines().count(), 2);
    }
}
