// SPDX-License-Identifier: MIT
//! The PS2-optimized scaling pipeline.
//!
//! A fixed, ordered chain tuned to look right on the console's 16-bit-color
//! CRT output: sharpen → Lanczos resize → contrast → saturation → smooth →
//! 5-6-5 quantization. The order is part of the contract; reordering changes
//! output pixels. Contrast and saturation are best-effort (a failure skips
//! the step and keeps the intermediate image); sharpen, resize and smoothing
//! failures abort the pipeline.

use crate::cpu::{resize_raster, resize_with_aspect, Raster, ScaleError};
use crate::enhance;
use crate::method::ScaleMethod;
use crate::slots::Size;

/// Contrast multiplier compensating for the CRT target (step 3).
pub const CONTRAST_BOOST: f32 = 1.10;
/// Saturation multiplier for PS2 color rendition (step 4).
pub const SATURATION_BOOST: f32 = 1.15;

/// Run the full pipeline, producing a raster of exactly `target` size.
/// With `maintain_aspect` the resize step letterboxes onto `background`;
/// the later steps then operate on the composited canvas, bars included.
pub fn scale_ps2(
    src: &Raster,
    target: Size,
    maintain_aspect: bool,
    background: [u8; 3],
) -> Result<Raster, ScaleError> {
    // Step 1: recover detail that the downscale would soften.
    let sharpened = enhance::sharpen(src)?;

    // Step 2: Lanczos keeps the most quality of the kernel set.
    let resized = if maintain_aspect {
        resize_with_aspect(&sharpened, target, ScaleMethod::DEFAULT, background)?
    } else {
        resize_raster(&sharpened, target, ScaleMethod::DEFAULT)?
    };

    // Steps 3 and 4 are independently skippable.
    let contrasted = match enhance::adjust_contrast(&resized, CONTRAST_BOOST) {
        Ok(adjusted) => adjusted,
        Err(e) => {
            log::warn!("contrast adjustment skipped: {}", e);
            resized
        }
    };
    let saturated = match enhance::adjust_saturation(&contrasted, SATURATION_BOOST) {
        Ok(adjusted) => adjusted,
        Err(e) => {
            log::warn!("saturation adjustment skipped: {}", e);
            contrasted
        }
    };

    // Step 5: suppress the ringing the quantizer would otherwise amplify.
    let smoothed = enhance::smooth_more(&saturated)?;

    // Step 6: snap to the console's 5-6-5 color levels.
    Ok(enhance::quantize_565(&smoothed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(size: Size) -> Raster {
        let mut data = Vec::with_capacity(size.pixel_count() * 3);
        for y in 0..size.h {
            for x in 0..size.w {
                data.push((x * 255 / size.w) as u8);
                data.push((y * 255 / size.h) as u8);
                data.push(((x + y) % 256) as u8);
            }
        }
        Raster::from_vec(size, data).unwrap()
    }

    #[test]
    fn output_matches_target_exactly() {
        let src = gradient(Size { w: 640, h: 480 });
        for maintain_aspect in [true, false] {
            let out = scale_ps2(&src, Size { w: 300, h: 125 }, maintain_aspect, [0, 0, 0]).unwrap();
            assert_eq!(out.size(), Size { w: 300, h: 125 });
        }
    }

    #[test]
    fn every_pixel_sits_on_565_levels() {
        let src = gradient(Size { w: 200, h: 150 });
        let out = scale_ps2(&src, Size { w: 128, h: 128 }, true, [0, 0, 0]).unwrap();
        for px in out.data().chunks_exact(3) {
            assert_eq!(px[0] % 8, 0, "red off-level");
            assert_eq!(px[1] % 4, 0, "green off-level");
            assert_eq!(px[2] % 8, 0, "blue off-level");
        }
    }

    #[test]
    fn pipeline_is_deterministic() {
        let src = gradient(Size { w: 123, h: 77 });
        let a = scale_ps2(&src, Size { w: 140, h: 200 }, true, [0, 0, 0]).unwrap();
        let b = scale_ps2(&src, Size { w: 140, h: 200 }, true, [0, 0, 0]).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn tiny_source_fails_at_the_sharpen_step() {
        let src = Raster::new_filled(Size { w: 2, h: 2 }, [50, 50, 50]).unwrap();
        assert!(matches!(
            scale_ps2(&src, Size { w: 128, h: 128 }, false, [0, 0, 0]),
            Err(ScaleError::ImageTooSmall { .. })
        ));
    }

    #[test]
    fn letterbox_bars_stay_pure_black() {
        // Wide gradient into the tall cover slot: the top bar survives every
        // later step, since a contrast extrapolation below zero clamps back
        // to 0 and 0 is itself a 5-6-5 level.
        let src = gradient(Size { w: 640, h: 480 });
        let out = scale_ps2(&src, Size { w: 140, h: 200 }, true, [0, 0, 0]).unwrap();
        assert_eq!(out.pixel(0, 0), [0, 0, 0]);
        assert_eq!(out.pixel(139, 10), [0, 0, 0]);
    }
}
