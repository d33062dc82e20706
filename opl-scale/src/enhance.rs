// SPDX-License-Identifier: MIT
//! Pixel-level enhancement primitives for the PS2 pipeline.
//!
//! These reproduce the Pillow operations the original converter was tuned
//! against: fixed sharpen/smooth convolution kernels (with the unfiltered
//! one-kernel-radius border Pillow leaves), contrast/saturation as a blend
//! between the image and its gray degenerate, and 5-6-5 color quantization.
//! Every function returns a new raster; sources are never touched.

use crate::cpu::{Raster, ScaleError};
use crate::slots::Size;

/// 3×3 sharpen: −2 ring around a 32 center, divisor 16.
const SHARPEN_KERNEL: [i32; 9] = [-2, -2, -2, -2, 32, -2, -2, -2, -2];
const SHARPEN_DIVISOR: i32 = 16;

/// 5×5 strong smooth: outer ring 1, inner ring 5, center 44, divisor 100.
const SMOOTH_MORE_KERNEL: [i32; 25] = [
    1, 1, 1, 1, 1, //
    1, 5, 5, 5, 1, //
    1, 5, 44, 5, 1, //
    1, 5, 5, 5, 1, //
    1, 1, 1, 1, 1,
];
const SMOOTH_MORE_DIVISOR: i32 = 100;

/// ITU-R 601-2 luma, same fixed-point weights Pillow uses for mode "L".
#[inline]
fn luma(rgb: [u8; 3]) -> u8 {
    let l = 19595 * u32::from(rgb[0]) + 38470 * u32::from(rgb[1]) + 7471 * u32::from(rgb[2]);
    ((l + 0x8000) >> 16) as u8
}

/// One fixed-strength sharpen pass.
pub fn sharpen(src: &Raster) -> Result<Raster, ScaleError> {
    convolve(src, &SHARPEN_KERNEL, 3, SHARPEN_DIVISOR)
}

/// One fixed-strength strong-smoothing pass.
pub fn smooth_more(src: &Raster) -> Result<Raster, ScaleError> {
    convolve(src, &SMOOTH_MORE_KERNEL, 5, SMOOTH_MORE_DIVISOR)
}

fn convolve(src: &Raster, kernel: &[i32], side: usize, divisor: i32) -> Result<Raster, ScaleError> {
    let Size { w, h } = src.size();
    if (w as usize) < side || (h as usize) < side {
        return Err(ScaleError::ImageTooSmall { side: side as u32 });
    }
    let (w, h) = (w as usize, h as usize);
    let margin = side / 2;
    let input = src.data();
    // Border pixels keep their source values, filtered region overwrites.
    let mut out = input.to_vec();

    for y in margin..h - margin {
        for x in margin..w - margin {
            for c in 0..3 {
                let mut acc = 0i32;
                for ky in 0..side {
                    for kx in 0..side {
                        let sy = y + ky - margin;
                        let sx = x + kx - margin;
                        acc += kernel[ky * side + kx] * i32::from(input[(sy * w + sx) * 3 + c]);
                    }
                }
                let value = (f64::from(acc) / f64::from(divisor) + 0.5).floor();
                out[(y * w + x) * 3 + c] = value.clamp(0.0, 255.0) as u8;
            }
        }
    }

    Raster::from_vec(src.size(), out)
}

/// Blend each pixel toward its `degenerate` value, extrapolating when
/// `factor > 1`.
fn blend_toward(src: &Raster, degenerate: impl Fn([u8; 3]) -> u8, factor: f32) -> Raster {
    let mut out = Vec::with_capacity(src.data().len());
    for px in src.data().chunks_exact(3) {
        let rgb = [px[0], px[1], px[2]];
        let base = f32::from(degenerate(rgb));
        for c in 0..3 {
            let v = base + factor * (f32::from(rgb[c]) - base);
            out.push((v + 0.5).floor().clamp(0.0, 255.0) as u8);
        }
    }
    Raster::from_vec(src.size(), out).expect("blend preserves dimensions")
}

/// Scale contrast around the image's own mean luma. `factor` 1.0 is identity,
/// values above 1.0 increase contrast.
pub fn adjust_contrast(src: &Raster, factor: f32) -> Result<Raster, ScaleError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(ScaleError::InvalidFactor(factor));
    }
    let sum: u64 = src
        .data()
        .chunks_exact(3)
        .map(|px| u64::from(luma([px[0], px[1], px[2]])))
        .sum();
    let mean = (sum as f64 / src.size().pixel_count() as f64 + 0.5) as u8;
    Ok(blend_toward(src, |_| mean, factor))
}

/// Scale saturation by blending each pixel toward its own luma. `factor` 1.0
/// is identity, 0.0 is grayscale, values above 1.0 boost color.
pub fn adjust_saturation(src: &Raster, factor: f32) -> Result<Raster, ScaleError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(ScaleError::InvalidFactor(factor));
    }
    Ok(blend_toward(src, luma, factor))
}

/// Quantize to the PS2's 16-bit 5-6-5 color levels: red and blue snap to
/// multiples of 8, green to multiples of 4. The level index is clamped before
/// expanding back to 8 bits, so the top of the range maps to 248/252/248
/// instead of wrapping past 255.
pub fn quantize_565(src: &Raster) -> Raster {
    let mut out = Vec::with_capacity(src.data().len());
    for px in src.data().chunks_exact(3) {
        out.push(quantize_channel(px[0], 8, 31));
        out.push(quantize_channel(px[1], 4, 63));
        out.push(quantize_channel(px[2], 8, 31));
    }
    Raster::from_vec(src.size(), out).expect("quantization preserves dimensions")
}

#[inline]
fn quantize_channel(value: u8, step: u32, max_level: u32) -> u8 {
    let level = (f32::from(value) / step as f32).round() as u32;
    (level.min(max_level) * step) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(size: Size, rgb: [u8; 3]) -> Raster {
        Raster::new_filled(size, rgb).unwrap()
    }

    fn checker(size: Size, a: [u8; 3], b: [u8; 3]) -> Raster {
        let mut data = Vec::with_capacity(size.pixel_count() * 3);
        for y in 0..size.h {
            for x in 0..size.w {
                data.extend_from_slice(if (x + y) % 2 == 0 { &a } else { &b });
            }
        }
        Raster::from_vec(size, data).unwrap()
    }

    #[test]
    fn sharpen_keeps_flat_regions_flat() {
        let src = solid(Size { w: 9, h: 9 }, [120, 60, 200]);
        let out = sharpen(&src).unwrap();
        assert_eq!(out.pixel(4, 4), [120, 60, 200]);
        assert_eq!(out.size(), src.size());
    }

    #[test]
    fn sharpen_rejects_tiny_images() {
        let src = solid(Size { w: 2, h: 2 }, [0, 0, 0]);
        assert!(matches!(
            sharpen(&src),
            Err(ScaleError::ImageTooSmall { side: 3 })
        ));
    }

    #[test]
    fn smooth_more_averages_a_checkerboard() {
        let src = checker(Size { w: 11, h: 11 }, [0, 0, 0], [255, 255, 255]);
        let out = smooth_more(&src).unwrap();
        let center = out.pixel(5, 5);
        // A strong smooth pulls the extremes well toward the middle.
        assert!(center[0] > 64 && center[0] < 192, "got {:?}", center);
    }

    #[test]
    fn convolution_leaves_the_border_untouched() {
        let src = checker(Size { w: 9, h: 9 }, [10, 10, 10], [240, 240, 240]);
        let out = sharpen(&src).unwrap();
        for x in 0..9 {
            assert_eq!(out.pixel(x, 0), src.pixel(x, 0));
            assert_eq!(out.pixel(x, 8), src.pixel(x, 8));
        }
    }

    #[test]
    fn contrast_factor_one_is_identity() {
        let src = checker(Size { w: 8, h: 8 }, [30, 60, 90], [200, 150, 100]);
        let out = adjust_contrast(&src, 1.0).unwrap();
        assert_eq!(out.data(), src.data());
    }

    #[test]
    fn contrast_boost_spreads_values_from_the_mean() {
        let src = checker(Size { w: 8, h: 8 }, [40, 40, 40], [220, 220, 220]);
        let out = adjust_contrast(&src, 1.5).unwrap();
        assert!(out.pixel(0, 0)[0] < 40);
        assert!(out.pixel(1, 0)[0] > 220);
    }

    #[test]
    fn contrast_rejects_bad_factors() {
        let src = solid(Size { w: 4, h: 4 }, [1, 2, 3]);
        assert!(matches!(
            adjust_contrast(&src, f32::NAN),
            Err(ScaleError::InvalidFactor(_))
        ));
        assert!(matches!(
            adjust_contrast(&src, -0.5),
            Err(ScaleError::InvalidFactor(_))
        ));
    }

    #[test]
    fn saturation_zero_is_grayscale() {
        let src = solid(Size { w: 4, h: 4 }, [250, 10, 10]);
        let out = adjust_saturation(&src, 0.0).unwrap();
        let px = out.pixel(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn saturation_boost_pushes_channels_apart() {
        let src = solid(Size { w: 4, h: 4 }, [180, 100, 100]);
        let out = adjust_saturation(&src, 1.5).unwrap();
        let px = out.pixel(0, 0);
        assert!(px[0] > 180);
        assert!(px[1] < 100);
    }

    #[test]
    fn quantized_channels_sit_on_565_levels() {
        let mut data = Vec::new();
        for v in 0u32..=255 {
            data.extend_from_slice(&[v as u8, v as u8, v as u8]);
        }
        let src = Raster::from_vec(Size { w: 16, h: 16 }, data).unwrap();
        let out = quantize_565(&src);
        for px in out.data().chunks_exact(3) {
            assert_eq!(px[0] % 8, 0);
            assert_eq!(px[1] % 4, 0);
            assert_eq!(px[2] % 8, 0);
        }
    }

    #[test]
    fn quantization_clamps_the_top_of_the_range() {
        // 252/8 rounds to level 32, which must clamp to 31 → 248, not wrap.
        assert_eq!(quantize_channel(252, 8, 31), 248);
        assert_eq!(quantize_channel(255, 8, 31), 248);
        assert_eq!(quantize_channel(254, 4, 63), 252);
        assert_eq!(quantize_channel(0, 8, 31), 0);
        assert_eq!(quantize_channel(4, 8, 31), 8);
    }
}
