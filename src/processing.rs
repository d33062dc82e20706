//! # Conversion Pipeline
//!
//! Per-file processing: decode → force RGB → scale into the slot → optional
//! post-processing → PNG encode. Post-processing is a composed list of step
//! objects rather than inline branches, so the outer surfaces can request
//! any combination without the pipeline growing special cases.
//!
//! Everything here is synchronous and CPU-bound; the batch session decides
//! which thread it runs on.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use opl_scale::cpu::resize_raster;
use opl_scale::{enhance, scale, Raster, ScaleError, ScaleMethod, ScaleRequest, Size};

use crate::error::{ConvertError, ConvertResult};
use crate::ConvertOptions;

/// Contrast multiplier for the optional post-scaling boost. Independent of
/// (and stacking with) the PS2 pipeline's internal contrast pass.
pub const POST_CONTRAST_BOOST: f32 = 1.20;

/// Default bounding box for preview thumbnails.
pub const PREVIEW_MAX: Size = Size { w: 300, h: 300 };

/// One optional post-scaling transformation.
pub trait PostStep: Send + Sync {
    fn name(&self) -> &'static str;
    fn apply(&self, raster: Raster) -> Result<Raster, ScaleError>;
}

/// Fixed-factor contrast boost (the UI's "enhance contrast" toggle).
pub struct ContrastBoost {
    pub factor: f32,
}

impl PostStep for ContrastBoost {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn apply(&self, raster: Raster) -> Result<Raster, ScaleError> {
        enhance::adjust_contrast(&raster, self.factor)
    }
}

/// One extra sharpen pass (the UI's "sharpen" toggle).
pub struct SharpenPass;

impl PostStep for SharpenPass {
    fn name(&self) -> &'static str {
        "sharpen"
    }

    fn apply(&self, raster: Raster) -> Result<Raster, ScaleError> {
        enhance::sharpen(&raster)
    }
}

/// Ordered chain of post-processing steps.
pub struct PostPipeline {
    steps: Vec<Box<dyn PostStep>>,
}

impl PostPipeline {
    /// Contrast before sharpen, matching the conversion order the launcher
    /// art was always produced with.
    pub fn from_options(options: &ConvertOptions) -> Self {
        let mut steps: Vec<Box<dyn PostStep>> = Vec::new();
        if options.enhance_contrast {
            steps.push(Box::new(ContrastBoost {
                factor: POST_CONTRAST_BOOST,
            }));
        }
        if options.sharpen {
            steps.push(Box::new(SharpenPass));
        }
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn apply(&self, raster: Raster) -> Result<Raster, ScaleError> {
        let mut current = raster;
        for step in &self.steps {
            current = step.apply(current)?;
        }
        Ok(current)
    }
}

/// Per-file converter: owns the resolved options and the post chain.
pub struct Converter {
    options: ConvertOptions,
    post: PostPipeline,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        let post = PostPipeline::from_options(&options);
        Self { options, post }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert one file into its slot-sized PNG. All failures come back as
    /// the file's error value; this function never panics on bad input.
    pub fn convert_file(&self, input: &Path, output: &Path) -> ConvertResult<PathBuf> {
        let source = load_rgb(input)?;
        let processed = self.process(&source)?;
        save_png(output, &processed)?;
        Ok(output.to_path_buf())
    }

    /// Same processing as [`Converter::convert_file`], but capped to a
    /// thumbnail box and returned in memory instead of written out.
    pub fn preview(&self, input: &Path, max: Size) -> ConvertResult<Raster> {
        let source = load_rgb(input)?;
        let processed = self.process(&source)?;
        cap_to_preview(processed, max).map_err(ConvertError::from)
    }

    fn process(&self, source: &Raster) -> ConvertResult<Raster> {
        let request = ScaleRequest {
            target: self.options.slot.dimensions(),
            method: self.options.method,
            maintain_aspect: self.options.maintain_aspect,
            background: self.options.background,
        };
        let scaled = scale(source, &request)?;
        self.post.apply(scaled).map_err(ConvertError::from)
    }
}

/// Decode a source image and force it into 8-bit RGB. Alpha is discarded,
/// same as the launcher expects.
pub fn load_rgb(path: &Path) -> ConvertResult<Raster> {
    let reader = ImageReader::open(path).map_err(|e| ConvertError::decode(path, e))?;
    let decoded = reader.decode().map_err(|e| ConvertError::decode(path, e))?;
    let rgb = decoded.to_rgb8();
    let size = Size {
        w: rgb.width(),
        h: rgb.height(),
    };
    Raster::from_vec(size, rgb.into_raw()).map_err(|e| ConvertError::decode(path, e))
}

/// Lossless PNG with encoder-level size optimization.
pub fn save_png(path: &Path, raster: &Raster) -> ConvertResult<()> {
    let file = File::create(path).map_err(|e| ConvertError::encode(path, e))?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    encoder
        .write_image(
            raster.data(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ConvertError::encode(path, e))
}

/// Downscale to fit within `max`, preserving aspect, never upscaling.
/// Bicubic, like the thumbnail path the original art sets were checked with.
fn cap_to_preview(raster: Raster, max: Size) -> Result<Raster, ScaleError> {
    let size = raster.size();
    if size.w <= max.w && size.h <= max.h {
        return Ok(raster);
    }
    let scale = (f64::from(max.w) / f64::from(size.w)).min(f64::from(max.h) / f64::from(size.h));
    let target = Size {
        w: ((f64::from(size.w) * scale).round() as u32).max(1),
        h: ((f64::from(size.h) * scale).round() as u32).max(1),
    };
    resize_raster(&raster, target, ScaleMethod::Bicubic)
}
