// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plate module — turns a photo of a plate into a clean black-and-white image.

pub mod preprocess;

pub use preprocess::{PlatePreprocessor, ProcessedPlate};
