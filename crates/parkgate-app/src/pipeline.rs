// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The gate pipeline: image file -> binarized plate -> OCR text -> plate
// string -> verdict -> logged record.
//
// Nothing is written to the admission log unless every earlier stage
// succeeded and a verdict was computed.

use std::path::Path;

use parkgate_core::error::Result;
use parkgate_core::{AdmissionRecord, GateConfig, Verdict};
use parkgate_ledger::AdmissionLog;
use parkgate_ocr::OcrProvider;
use parkgate_rules::{evaluate, normalize};
use parkgate_vision::PlatePreprocessor;
use tracing::{info, instrument};

/// Result of a completed gate run.
#[derive(Debug, Clone)]
pub struct Admission {
    /// Text exactly as the OCR provider returned it.
    pub raw_text: String,
    pub verdict: Verdict,
    pub record: AdmissionRecord,
}

/// Run the whole pipeline for one plate image.
#[instrument(skip_all, fields(image = %image_path.display()))]
pub async fn check_plate<P: OcrProvider>(
    config: &GateConfig,
    image_path: &Path,
    ocr: &P,
    log: &AdmissionLog,
    debug_dir: Option<&Path>,
) -> Result<Admission> {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plate".to_string());

    let processed = PlatePreprocessor::open(image_path, &config.preprocess)?.process();
    info!("finished preprocessing");

    if let Some(dir) = debug_dir {
        processed.save_debug(dir, &stem)?;
    }

    // The upload is always PNG, name it accordingly.
    let upload = processed.to_upload(format!("{stem}.png"))?;
    let raw_text = ocr.extract_text(&upload).await?;
    info!("finished OCR detection");

    let (plate, verdict) = evaluate_text(&raw_text)?;

    let record = log.append(&plate, &verdict)?;
    info!("admission logged");

    Ok(Admission {
        raw_text,
        verdict,
        record,
    })
}

/// Normalize raw text and run the admission rules on it.
pub fn evaluate_text(raw_text: &str) -> Result<(String, Verdict)> {
    let plate = normalize(raw_text);
    let verdict = evaluate(&plate)?;
    Ok((plate, verdict))
}
