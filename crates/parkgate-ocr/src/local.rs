// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Offline OCR provider backed by the `ocrs` crate.
//
// # Feature Gate
//
// Only available with the `local` feature:
//
// ```toml
// parkgate-ocr = { path = "crates/parkgate-ocr", features = ["local"] }
// ```
//
// # Model Setup
//
// Two model files are required, `text-detection.rten` and
// `text-recognition.rten`. Running `ocrs-cli` once downloads them to
// `~/.cache/ocrs`; point [`ModelPaths::from_dir`] at that directory.

use std::path::{Path, PathBuf};

use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use parkgate_core::PlateUpload;
use parkgate_core::error::{ParkgateError, Result};
use rten::Model;
use tracing::{debug, info, instrument};

use crate::provider::OcrProvider;

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Locations of the detection and recognition models.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub detection: PathBuf,
    pub recognition: PathBuf,
}

impl ModelPaths {
    /// Expect both well-known model files inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection: dir.join(DETECTION_MODEL_FILENAME),
            recognition: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for path in [&self.detection, &self.recognition] {
            if !path.exists() {
                return Err(ParkgateError::OcrEngine(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// OCR engine that runs entirely on this machine.
///
/// Model loading is the expensive step; build the engine once per process.
pub struct LocalOcrEngine {
    engine: OcrsEngine,
}

impl LocalOcrEngine {
    #[instrument(skip_all, fields(
        detection = %paths.detection.display(),
        recognition = %paths.recognition.display(),
    ))]
    pub fn new(paths: &ModelPaths) -> Result<Self> {
        paths.validate()?;

        let load = |path: &Path| {
            Model::load_file(path).map_err(|err| {
                ParkgateError::OcrEngine(format!("failed to load model {}: {err}", path.display()))
            })
        };

        info!("Loading OCR models");
        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(load(paths.detection.as_path())?),
            recognition_model: Some(load(paths.recognition.as_path())?),
            ..Default::default()
        })
        .map_err(|err| ParkgateError::OcrEngine(format!("failed to initialise OCR engine: {err}")))?;

        info!("local OCR engine ready");
        Ok(Self { engine })
    }

    /// Recognise all text in a decoded image, lines separated by `\n`.
    pub fn recognize(&self, image: &image::DynamicImage) -> Result<String> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            ParkgateError::OcrEngine(format!("failed to create image source ({width}x{height}): {err}"))
        })?;
        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| ParkgateError::OcrEngine(format!("OCR preprocessing failed: {err}")))?;
        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| ParkgateError::OcrEngine(format!("OCR text recognition failed: {err}")))?;

        debug!(chars = text.len(), "local OCR complete");
        Ok(text)
    }
}

impl OcrProvider for LocalOcrEngine {
    async fn extract_text(&self, upload: &PlateUpload) -> Result<String> {
        let image = image::load_from_memory(&upload.bytes).map_err(|err| {
            ParkgateError::ImageError(format!("failed to decode {}: {err}", upload.file_name))
        })?;
        self.recognize(&image)
    }
}
