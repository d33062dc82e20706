//! # OPL Cover Convert
//!
//! Converts game artwork into the fixed image slots an OPL (Open PS2 Loader)
//! art set consists of: resize into the slot's exact pixel dimensions, with
//! optional letterboxing, optional CRT-tuned PS2 processing, optional
//! post-scaling contrast/sharpen, and lossless PNG output.
//!
//! ## Architecture
//!
//! The workspace splits into two crates:
//! - `opl-scale`: rasters, the slot table, resampling kernels, the PS2
//!   pipeline, and the scaling dispatcher
//! - this crate: decode/encode, configuration, per-file conversion, and the
//!   batch session with progress reporting and cancellation
//!
//! ## Example
//!
//! ```rust,no_run
//! use opl_cover_convert::{convert_batch, config::ConvertConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ConvertConfig {
//!     slot: "cover".to_string(),
//!     algorithm: "ps2_optimized".to_string(),
//!     ..ConvertConfig::default()
//! };
//!
//! let summary = convert_batch(
//!     vec![PathBuf::from("art/Gran Turismo 3.jpg")],
//!     PathBuf::from("converted"),
//!     &config,
//! )?;
//! println!("{}/{} converted", summary.success_count, summary.total_count);
//! # Ok(())
//! # }
//! ```

// External crate imports
use std::path::PathBuf;

use anyhow::Result;
use opl_scale::{ScaleMethod, SlotKind};

// Internal module imports
pub mod config;
pub mod error;
pub mod processing;
pub mod session;

/// Re-export error types for convenience
pub use error::{ConvertError, ConvertResult, ErrorSeverity};

/// Re-export the batch surface
pub use session::{BatchHandle, BatchSession, BatchSummary, FileOutcome};

/// Fully-resolved conversion parameters for one run.
///
/// Unlike the stringly [`config::ConvertConfig`] an outer layer fills in,
/// every field here is already validated: the slot and method are closed
/// enums and travel with each request, so two concurrent conversions can
/// never observe each other's selection.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Which launcher slot the output targets; fixes the pixel dimensions.
    pub slot: SlotKind,

    /// Scaling algorithm, including the PS2 pipeline pseudo-method.
    pub method: ScaleMethod,

    /// Letterbox to preserve the source aspect ratio instead of stretching.
    pub maintain_aspect: bool,

    /// Apply an extra 1.20× contrast boost after scaling.
    pub enhance_contrast: bool,

    /// Apply one extra sharpen pass after scaling.
    pub sharpen: bool,

    /// Letterbox fill color (opaque RGB).
    pub background: [u8; 3],
}

impl ConvertOptions {
    /// Defaults mirroring the converter's startup state: Lanczos, aspect
    /// preserved, black bars, no extra post-processing.
    pub fn new(slot: SlotKind) -> Self {
        Self {
            slot,
            method: ScaleMethod::DEFAULT,
            maintain_aspect: true,
            enhance_contrast: false,
            sharpen: false,
            background: [0, 0, 0],
        }
    }
}

/// Convert a list of files in one batch on the calling thread.
///
/// Convenience wrapper over [`BatchSession`] for callers that don't need a
/// progress callback or a background worker.
pub fn convert_batch(
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    config: &config::ConvertConfig,
) -> Result<BatchSummary> {
    let options = config.to_options()?;
    let session = BatchSession::builder()
        .with_inputs(inputs)
        .with_output_dir(output_dir)
        .with_options(options)
        .auto_rename(config.auto_rename)
        .build()?;
    Ok(session.run()?)
}
