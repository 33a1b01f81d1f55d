// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR.space client.
//
// One multipart POST per plate:
//
//   file       the PNG bytes, under the source file name
//   apikey     account key
//   scale      "true"  (provider-side upscaling)
//   OCREngine  "2"
//
// The answer is JSON; the plate text lives at `ParsedResults[0].ParsedText`.
// Anything else is a `MalformedResponse`. Requests are never retried.

use std::time::Duration;

use parkgate_core::error::{ParkgateError, Result};
use parkgate_core::{OcrConfig, PlateUpload};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::provider::OcrProvider;

/// Longest slice of an error body quoted back in diagnostics.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(rename = "OCRExitCode")]
    ocr_exit_code: Option<serde_json::Value>,
    is_errored_on_processing: Option<bool>,
    /// A string or an array of strings, depending on the failure.
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    parsed_text: Option<String>,
}

/// Extract the plate text from an OCR.space response body.
pub fn parse_ocr_response(body: &str) -> Result<String> {
    let response: OcrSpaceResponse = serde_json::from_str(body)
        .map_err(|e| ParkgateError::MalformedResponse(format!("not an OCR result document: {e}")))?;

    let Some(first) = response.parsed_results.as_ref().and_then(|r| r.first()) else {
        let mut detail = String::from("no ParsedResults in response");
        if response.is_errored_on_processing == Some(true) {
            if let Some(message) = response.error_message.as_ref().map(error_text) {
                detail = format!("{detail}: {message}");
            }
        }
        if let Some(code) = &response.ocr_exit_code {
            detail = format!("{detail} (OCRExitCode {code})");
        }
        return Err(ParkgateError::MalformedResponse(detail));
    };

    first
        .parsed_text
        .clone()
        .ok_or_else(|| ParkgateError::MalformedResponse("ParsedResults[0] has no ParsedText".into()))
}

fn error_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

fn truncate(body: &str) -> &str {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// HTTP client for the OCR.space parse endpoint.
pub struct OcrSpaceClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    engine: u8,
    scale: bool,
    max_upload_bytes: usize,
}

impl OcrSpaceClient {
    /// Build a client from configuration. Fails if no API key is configured.
    pub fn new(config: &OcrConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ParkgateError::OcrRequest(format!("cannot build HTTP client: {e}")))?;
        Self::with_http_client(config, http)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: &OcrConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            engine: config.engine,
            scale: config.scale,
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    fn form(&self, upload: &PlateUpload) -> Result<Form> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime_type)
            .map_err(|e| ParkgateError::OcrRequest(format!("invalid upload MIME type: {e}")))?;

        Ok(Form::new()
            .text("apikey", self.api_key.clone())
            .text("scale", self.scale.to_string())
            .text("OCREngine", self.engine.to_string())
            .part("file", part))
    }
}

impl OcrProvider for OcrSpaceClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint, file = %upload.file_name, bytes = upload.len()))]
    async fn extract_text(&self, upload: &PlateUpload) -> Result<String> {
        if upload.len() > self.max_upload_bytes {
            return Err(ParkgateError::PayloadTooLarge {
                size: upload.len(),
                limit: self.max_upload_bytes,
            });
        }

        info!("sending request to OCR.space");
        let response = self
            .http
            .post(&self.endpoint)
            .multipart(self.form(upload)?)
            .send()
            .await
            .map_err(|e| ParkgateError::OcrRequest(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ParkgateError::OcrRequest(format!("reading response body: {e}")))?;

        if !status.is_success() {
            warn!(%status, "OCR provider returned an error status");
            return Err(ParkgateError::OcrRequest(format!(
                "HTTP {status}: {}",
                truncate(&body)
            )));
        }

        let text = parse_ocr_response(&body)?;
        debug!(chars = text.chars().count(), "OCR text received");
        Ok(text)
    }
}
