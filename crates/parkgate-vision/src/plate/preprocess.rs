// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plate preprocessing pipeline — size gate, fixed canvas, grayscale,
// Gaussian adaptive threshold and morphological opening.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology;
use parkgate_core::error::{ParkgateError, Result};
use parkgate_core::{PlateUpload, PreprocessConfig};
use tracing::{debug, info, instrument};

use crate::imaging::processor::ImageProcessor;

/// Prepares a photo of a license plate for OCR.
///
/// Construction enforces the minimum pixel count, so an instance always holds
/// an image large enough to be read. [`process`](Self::process) then runs:
///
/// 1. Resize to the fixed canvas (400x100 by default)
/// 2. Convert to grayscale
/// 3. Gaussian adaptive threshold (block 91, offset 9)
/// 4. Morphological opening with a 5x5 square
pub struct PlatePreprocessor {
    image: DynamicImage,
    config: PreprocessConfig,
}

impl PlatePreprocessor {
    /// Load a plate image from disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: &PreprocessConfig) -> Result<Self> {
        let image = ImageProcessor::open(path)?.into_dynamic();
        Self::from_dynamic(image, config)
    }

    /// Wrap a decoded image, rejecting it if it is too small to be read.
    pub fn from_dynamic(image: DynamicImage, config: &PreprocessConfig) -> Result<Self> {
        config.validate()?;

        let (width, height) = (image.width(), image.height());
        let pixels = u64::from(width) * u64::from(height);
        if pixels < config.min_pixels {
            info!(width, height, min_pixels = config.min_pixels, "plate image too small");
            return Err(ParkgateError::ImageTooSmall {
                width,
                height,
                min_pixels: config.min_pixels,
            });
        }

        Ok(Self {
            image,
            config: config.clone(),
        })
    }

    /// Run the full pipeline.
    #[instrument(skip(self), fields(width = self.image.width(), height = self.image.height()))]
    pub fn process(self) -> ProcessedPlate {
        let config = self.config;

        let resized = ImageProcessor::from_dynamic(self.image)
            .resize_exact(config.canvas_width, config.canvas_height);
        let gray = resized.grayscale();

        let binary = adaptive_threshold_gaussian(&gray, config.block_size, config.threshold_offset);
        let binarized = morphology::open(&binary, Norm::LInf, config.opening_radius);

        info!("plate preprocessing complete");
        ProcessedPlate {
            resized: resized.into_dynamic(),
            binarized,
        }
    }
}

/// Output of [`PlatePreprocessor::process`].
pub struct ProcessedPlate {
    /// The colour image after resizing to the canvas, kept for diagnostics.
    pub resized: DynamicImage,
    /// Black-and-white plate, each pixel either 0 or 255.
    pub binarized: GrayImage,
}

impl ProcessedPlate {
    /// Encode the binarized plate as compressed PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(self.binarized.clone()))
            .to_png_bytes()
    }

    /// Package the binarized plate for an OCR provider.
    pub fn to_upload(&self, file_name: impl Into<String>) -> Result<PlateUpload> {
        let bytes = self.to_png_bytes()?;
        debug!(bytes = bytes.len(), "plate upload encoded");
        Ok(PlateUpload::png(file_name, bytes))
    }

    /// Write `<stem>-resized.png` and `<stem>-binarized.png` into `dir`.
    pub fn save_debug(&self, dir: impl AsRef<Path>, stem: &str) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let resized_path = dir.join(format!("{stem}-resized.png"));
        let binarized_path = dir.join(format!("{stem}-binarized.png"));

        ImageProcessor::from_dynamic(self.resized.clone()).save(&resized_path)?;
        ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(self.binarized.clone()))
            .save(&binarized_path)?;

        info!(dir = %dir.display(), "debug images saved");
        Ok((resized_path, binarized_path))
    }
}

/// Gaussian standard deviation matching a square block of side `block_size`.
pub fn gaussian_sigma(block_size: u32) -> f32 {
    0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Binarize with a locally varying threshold.
///
/// The threshold at each pixel is the Gaussian-weighted mean of its
/// `block_size` neighbourhood minus `offset`. Pixels strictly brighter than
/// their threshold become white (255); the rest become black (0).
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn adaptive_threshold_gaussian(gray: &GrayImage, block_size: u32, offset: i32) -> GrayImage {
    let sigma = gaussian_sigma(block_size);
    debug!(sigma, "applying Gaussian adaptive threshold");

    let local_mean = gaussian_blur_f32(gray, sigma);

    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let threshold = i32::from(local_mean.get_pixel(x, y).0[0]) - offset;
        let value = if i32::from(pixel.0[0]) > threshold { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([value]));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// White plate with a dark vertical stroke at x in 100..140, y in 20..80.
    fn stroke_plate(width: u32, height: u32) -> DynamicImage {
        let mut img = RgbImage::from_pixel(width, height, Rgb([250, 250, 250]));
        for y in (height / 5)..(height * 4 / 5) {
            for x in (width / 4)..(width * 7 / 20) {
                img.put_pixel(x, y, Rgb([10, 10, 10]));
            }
        }
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn rejects_images_below_min_pixels() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(30, 30));
        let err = PlatePreprocessor::from_dynamic(img, &PreprocessConfig::default())
            .err()
            .expect("900 pixels must be rejected");
        match err {
            ParkgateError::ImageTooSmall {
                width,
                height,
                min_pixels,
            } => assert_eq!((width, height, min_pixels), (30, 30, 1600)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_exactly_min_pixels() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(40, 40));
        assert!(PlatePreprocessor::from_dynamic(img, &PreprocessConfig::default()).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PreprocessConfig {
            block_size: 4,
            ..PreprocessConfig::default()
        };
        let err = PlatePreprocessor::from_dynamic(stroke_plate(400, 100), &config)
            .err()
            .unwrap();
        assert!(matches!(err, ParkgateError::Config(_)));
    }

    #[test]
    fn output_is_fixed_canvas_and_binary() {
        let processed = PlatePreprocessor::from_dynamic(stroke_plate(800, 300), &PreprocessConfig::default())
            .unwrap()
            .process();

        assert_eq!(processed.binarized.dimensions(), (400, 100));
        assert_eq!((processed.resized.width(), processed.resized.height()), (400, 100));
        assert!(processed.binarized.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn dark_stroke_stays_black_background_stays_white() {
        let processed = PlatePreprocessor::from_dynamic(stroke_plate(400, 100), &PreprocessConfig::default())
            .unwrap()
            .process();

        assert_eq!(processed.binarized.get_pixel(120, 50).0[0], 0);
        assert_eq!(processed.binarized.get_pixel(320, 50).0[0], 255);
    }

    #[test]
    fn opening_removes_isolated_white_specks() {
        let mut gray = GrayImage::from_pixel(50, 50, Luma([0]));
        gray.put_pixel(25, 25, Luma([255]));
        let opened = morphology::open(&gray, Norm::LInf, 2);
        assert_eq!(opened.get_pixel(25, 25).0[0], 0);
    }

    #[test]
    fn sigma_from_block_size() {
        assert!((gaussian_sigma(3) - 0.8).abs() < 1e-6);
        assert!((gaussian_sigma(91) - 14.0).abs() < 1e-4);
    }

    #[test]
    fn upload_is_decodable_png() {
        let processed = PlatePreprocessor::from_dynamic(stroke_plate(400, 100), &PreprocessConfig::default())
            .unwrap()
            .process();
        let upload = processed.to_upload("13.png").unwrap();
        assert_eq!(upload.file_name, "13.png");
        assert_eq!(upload.mime_type, "image/png");

        let decoded = image::load_from_memory(&upload.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 100));
    }

    #[test]
    fn save_debug_writes_both_images() {
        let dir = tempfile::tempdir().unwrap();
        let processed = PlatePreprocessor::from_dynamic(stroke_plate(400, 100), &PreprocessConfig::default())
            .unwrap()
            .process();
        let (resized, binarized) = processed.save_debug(dir.path(), "13").unwrap();
        assert!(resized.ends_with("13-resized.png"));
        assert!(resized.exists());
        assert!(binarized.exists());
    }
}
