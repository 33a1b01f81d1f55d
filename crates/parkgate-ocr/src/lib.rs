// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// parkgate-ocr — Text extraction from binarized plate images.
//
// The default provider is the OCR.space web API. An offline engine backed by
// `ocrs` is available behind the `local` feature.

pub mod ocr_space;
pub mod provider;

#[cfg(feature = "local")]
pub mod local;

pub use ocr_space::{OcrSpaceClient, parse_ocr_response};
pub use provider::OcrProvider;

#[cfg(feature = "local")]
pub use local::LocalOcrEngine;
