// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Gate configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ParkgateError, Result};

/// Environment variable that overrides [`OcrConfig::api_key`].
pub const API_KEY_ENV: &str = "PARKGATE_OCR_API_KEY";

/// Default OCR.space parse endpoint.
pub const DEFAULT_OCR_ENDPOINT: &str = "https://api.ocr.space/parse/image";

/// Settings for one gate run. Built once at startup and passed down by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// SQLite admission log. `None` means `<data dir>/admissions.db`.
    pub database_path: Option<PathBuf>,
    pub ocr: OcrConfig,
    pub preprocess: PreprocessConfig,
}

impl GateConfig {
    /// Load a JSON config file. Fields absent from the file keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|e| {
            ParkgateError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = serde_json::from_str(&data)?;
        Ok(config)
    }

    /// Apply overrides taken from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    /// Replace the API key when `key` is a non-empty value.
    pub fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.ocr.api_key = Some(key);
        }
        self
    }
}

/// Remote OCR provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// OCR.space engine selector (`OCREngine` form field).
    pub engine: u8,
    /// Ask the provider to upscale the image before recognition.
    pub scale: bool,
    pub timeout_secs: u64,
    /// Largest upload the provider accepts (1 MiB on the free tier).
    pub max_upload_bytes: usize,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_OCR_ENDPOINT.to_string(),
            api_key: None,
            engine: 2,
            scale: true,
            timeout_secs: 30,
            max_upload_bytes: 1024 * 1024,
        }
    }
}

impl OcrConfig {
    /// Check that the configuration can be used to call the provider.
    pub fn validate(&self) -> Result<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(ParkgateError::Config(format!(
                    "no OCR API key configured; set {API_KEY_ENV} or `ocr.api_key` in the config file"
                )));
            }
        }
        if self.endpoint.trim().is_empty() {
            return Err(ParkgateError::Config("OCR endpoint is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ParkgateError::Config("OCR timeout must be at least one second".into()));
        }
        Ok(())
    }
}

/// Plate binarization parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Images with fewer pixels (width * height) are rejected as too far away.
    pub min_pixels: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Side of the square neighbourhood used for the adaptive threshold. Odd, >= 3.
    pub block_size: u32,
    /// Subtracted from the local Gaussian mean to form the threshold.
    pub threshold_offset: i32,
    /// L-infinity radius of the opening element (2 => 5x5 square).
    pub opening_radius: u8,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            min_pixels: 1600,
            canvas_width: 400,
            canvas_height: 100,
            block_size: 91,
            threshold_offset: 9,
            opening_radius: 2,
        }
    }
}

impl PreprocessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ParkgateError::Config(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(ParkgateError::Config(format!(
                "threshold block size must be odd and at least 3, got {}",
                self.block_size
            )));
        }
        Ok(())
    }
}
