//! Shared helpers for the integration tests.
#![allow(dead_code)] // each test binary uses its own subset

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Write a synthetic RGB gradient photo. Every channel varies, so resampling
/// artifacts and letterbox bars are distinguishable from real content.
pub fn write_gradient_image(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width) as u8,
            (y * 255 / height) as u8,
            ((x + y) % 256) as u8,
        ])
    });
    img.save(path).expect("write test image");
}

/// Write a file that only pretends to be an image.
pub fn write_corrupt_image(path: &Path) {
    std::fs::write(path, b"this is not image data").expect("write corrupt file");
}

/// Read a converted PNG back as RGB for pixel assertions.
pub fn read_rgb(path: &Path) -> RgbImage {
    image::open(path).expect("reopen converted image").to_rgb8()
}

/// The single batch directory a fresh output dir contains after one run.
pub fn only_batch_dir(output_dir: &Path) -> PathBuf {
    let mut entries: Vec<_> = std::fs::read_dir(output_dir)
        .expect("read output dir")
        .map(|e| e.expect("dir entry").path())
        .collect();
    assert_eq!(entries.len(), 1, "expected exactly one batch directory");
    entries.pop().unwrap()
}
