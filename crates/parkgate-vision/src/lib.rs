// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// parkgate-vision — Image handling for the Parkgate admission gate.
//
// Provides generic image operations (decode, resize, grayscale, PNG encoding)
// and the plate preprocessing pipeline (size gate, fixed canvas, Gaussian
// adaptive threshold, morphological opening) that prepares a picture for OCR.

pub mod imaging;
pub mod plate;

pub use imaging::processor::ImageProcessor;
pub use plate::preprocess::{PlatePreprocessor, ProcessedPlate};
