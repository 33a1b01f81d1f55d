// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for plate preprocessing in the parkgate-vision crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use parkgate_core::PreprocessConfig;
use parkgate_vision::PlatePreprocessor;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark the full pipeline (resize, threshold, opening, PNG encode) on a
/// 1280x320 synthetic plate: light background with seven dark glyph bars.
fn bench_plate_pipeline(c: &mut Criterion) {
    let (width, height) = (1280u32, 320u32);
    let mut img = RgbImage::from_pixel(width, height, Rgb([235, 225, 60]));
    for glyph in 0..7 {
        let x0 = 80 + glyph * 160;
        for y in 60..260 {
            for x in x0..x0 + 50 {
                img.put_pixel(x, y, Rgb([20, 20, 20]));
            }
        }
    }
    let dynamic = DynamicImage::ImageRgb8(img);
    let config = PreprocessConfig::default();

    c.bench_function("plate_pipeline (1280x320)", |b| {
        b.iter(|| {
            let processed = PlatePreprocessor::from_dynamic(black_box(dynamic.clone()), &config)
                .expect("bench image is large enough")
                .process();
            black_box(processed.to_png_bytes().expect("encode"));
        });
    });
}

criterion_group!(benches, bench_plate_pipeline);
criterion_main!(benches);
