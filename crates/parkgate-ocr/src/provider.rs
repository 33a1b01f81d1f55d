// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Abstract OCR provider interface.

use std::future::Future;

use parkgate_core::PlateUpload;
use parkgate_core::error::Result;

/// Anything that can turn an encoded plate image into raw text.
///
/// The returned text is unprocessed provider output; callers normalize it.
/// Implementations make exactly one attempt and never retry.
pub trait OcrProvider {
    fn extract_text(&self, upload: &PlateUpload) -> impl Future<Output = Result<String>>;
}
