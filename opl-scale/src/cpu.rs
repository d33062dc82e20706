// SPDX-License-Identifier: MIT
// CPU resizing built on fast_image_resize (SIMD-accelerated).
// RGB8 in → RGB8 out, every call allocates a fresh output raster.

use fast_image_resize as fir;
use fir::images::{TypedCroppedImageMut, TypedImage, TypedImageRef};
use fir::pixels::U8x3;
use fir::{ResizeOptions, Resizer};

use crate::method::ScaleMethod;
use crate::slots::{fit_plan, Size};

#[derive(Debug)]
pub enum ScaleError {
    /// Source raster has a zero dimension or a mismatched buffer length.
    EmptyImage,
    /// Requested target box has a zero dimension.
    EmptyTarget,
    /// Raster buffer length does not match width × height × 3.
    BufferSize { expected: usize, actual: usize },
    /// Source smaller than the convolution kernel that was asked for.
    ImageTooSmall { side: u32 },
    /// Enhancement factor is negative or not finite.
    InvalidFactor(f32),
    /// No kernel for this Lanczos lobe count.
    UnsupportedLobes(u8),
    /// The PS2 pipeline was handed to the kernel mapper.
    NotAKernel,
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
    Crop(fir::CropBoxError),
}

impl From<fir::ResizeError> for ScaleError {
    fn from(e: fir::ResizeError) -> Self {
        Self::Fir(e)
    }
}
impl From<fir::ImageBufferError> for ScaleError {
    fn from(e: fir::ImageBufferError) -> Self {
        Self::ImageBuf(e)
    }
}
impl From<fir::CropBoxError> for ScaleError {
    fn from(e: fir::CropBoxError) -> Self {
        Self::Crop(e)
    }
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::EmptyImage => write!(f, "Source image has no pixels"),
            ScaleError::EmptyTarget => write!(f, "Target size has a zero dimension"),
            ScaleError::BufferSize { expected, actual } => {
                write!(f, "Raster buffer is {} bytes, expected {}", actual, expected)
            }
            ScaleError::ImageTooSmall { side } => {
                write!(f, "Image smaller than the {}x{} filter kernel", side, side)
            }
            ScaleError::InvalidFactor(factor) => {
                write!(f, "Enhancement factor {} is not usable", factor)
            }
            ScaleError::UnsupportedLobes(lobes) => {
                write!(f, "No Lanczos kernel with {} lobes", lobes)
            }
            ScaleError::NotAKernel => write!(f, "ps2_optimized is a pipeline, not a kernel"),
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
            ScaleError::Crop(e) => write!(f, "Crop error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            ScaleError::Crop(e) => Some(e),
            _ => None,
        }
    }
}

/// Owned, tightly-packed 8-bit RGB raster.
/// Construction validates the buffer once; everything downstream can rely on
/// `data.len() == w * h * 3` and both dimensions being nonzero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    size: Size,
    data: Vec<u8>,
}

impl Raster {
    pub fn from_vec(size: Size, data: Vec<u8>) -> Result<Self, ScaleError> {
        if size.w == 0 || size.h == 0 {
            return Err(ScaleError::EmptyImage);
        }
        let expected = size.pixel_count() * 3;
        if data.len() != expected {
            return Err(ScaleError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Solid-color raster, used for letterbox canvases.
    pub fn new_filled(size: Size, rgb: [u8; 3]) -> Result<Self, ScaleError> {
        if size.w == 0 || size.h == 0 {
            return Err(ScaleError::EmptyImage);
        }
        let mut data = Vec::with_capacity(size.pixel_count() * 3);
        for _ in 0..size.pixel_count() {
            data.extend_from_slice(&rgb);
        }
        Ok(Self { size, data })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.w
    }

    pub fn height(&self) -> u32 {
        self.size.h
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// RGB triple at (x, y). Panics outside the raster; test/diagnostic use.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        assert!(x < self.size.w && y < self.size.h, "pixel out of bounds");
        let i = (y as usize * self.size.w as usize + x as usize) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

/// Resample `src` to exactly `target` with the named kernel. No aspect logic
/// here; both dimensions are taken as already decided.
pub fn resize_raster(
    src: &Raster,
    target: Size,
    method: ScaleMethod,
) -> Result<Raster, ScaleError> {
    if target.w == 0 || target.h == 0 {
        return Err(ScaleError::EmptyTarget);
    }
    let alg = method.resize_alg()?;

    let src_view = TypedImageRef::<U8x3>::from_buffer(src.size.w, src.size.h, src.data())?;
    let mut dst_buf = vec![0u8; target.pixel_count() * 3];
    let mut dst_image = TypedImage::<U8x3>::from_buffer(target.w, target.h, &mut dst_buf)?;

    let opts = ResizeOptions::new().resize_alg(alg).use_alpha(false);
    Resizer::new().resize_typed::<U8x3>(&src_view, &mut dst_image, &opts)?;

    Raster::from_vec(target, dst_buf)
}

/// Resample `src` to fit within `target` preserving aspect ratio, centered on
/// a `background`-filled canvas of exactly `target` size.
///
/// The content is resized straight into the centered sub-view of the canvas,
/// so no intermediate raster is allocated for the composite.
pub fn resize_with_aspect(
    src: &Raster,
    target: Size,
    method: ScaleMethod,
    background: [u8; 3],
) -> Result<Raster, ScaleError> {
    if target.w == 0 || target.h == 0 {
        return Err(ScaleError::EmptyTarget);
    }
    let alg = method.resize_alg()?;
    let plan = fit_plan(src.size, target);

    let src_view = TypedImageRef::<U8x3>::from_buffer(src.size.w, src.size.h, src.data())?;

    // Background fill must happen before the typed view takes the buffer.
    let mut canvas = Raster::new_filled(target, background)?;
    let mut dst_image = TypedImage::<U8x3>::from_buffer(target.w, target.h, &mut canvas.data)?;
    let mut roi = TypedCroppedImageMut::from_ref(
        &mut dst_image,
        plan.offset.0,
        plan.offset.1,
        plan.content.w,
        plan.content.h,
    )?;

    let opts = ResizeOptions::new().resize_alg(alg).use_alpha(false);
    Resizer::new().resize_typed::<U8x3>(&src_view, &mut roi, &opts)?;

    Ok(canvas)
}
