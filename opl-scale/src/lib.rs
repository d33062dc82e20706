// SPDX-License-Identifier: MIT
//! # opl-scale: Slot-Targeted Cover-Art Scaling
//!
//! This crate implements the image-scaling core of an OPL (Open PS2 Loader)
//! cover-art converter: every game image is resized into one of seven fixed
//! launcher slots (cover, spine, back, screenshot, background, disc, logo),
//! optionally letterboxed to preserve the source aspect ratio, and optionally
//! run through a display pipeline tuned for the PS2's 16-bit CRT output.
//!
//! ## Architecture Overview
//!
//! The crate is designed around three core principles:
//! 1. **Immutable rasters**: every operation takes `&Raster` and returns a new
//!    one, so concurrent preview and batch calls can never alias
//! 2. **Closed algorithm set**: the scaling method is a tagged enum dispatched
//!    by exhaustive match, not a name-keyed lookup table
//! 3. **Explicit requests**: the method travels inside each [`ScaleRequest`];
//!    there is no process-wide "current algorithm" state
//!
//! ## Key Components
//!
//! - [`slots`]: the fixed slot dimension table and letterbox fit geometry
//! - [`method`]: the resampling-method enum and its kernel mapping
//! - [`cpu`]: CPU resizing built on fast_image_resize (SIMD-accelerated)
//! - [`enhance`]: Pillow-compatible sharpen/smooth/contrast/saturation/565
//!   pixel primitives
//! - [`ps2`]: the fixed six-step PS2-optimized pipeline
//! - [`scaler`]: the dispatcher with its one-level fallback to the default
//!   method
//!
//! ## Usage Example
//!
//! ```rust
//! use opl_scale::cpu::Raster;
//! use opl_scale::method::ScaleMethod;
//! use opl_scale::scaler::{scale, ScaleRequest};
//! use opl_scale::slots::SlotKind;
//!
//! let src = Raster::new_filled(opl_scale::slots::Size { w: 64, h: 48 }, [10, 20, 30]).unwrap();
//! let req = ScaleRequest::new(SlotKind::Disc.dimensions(), ScaleMethod::DEFAULT);
//! let out = scale(&src, &req).unwrap();
//! assert_eq!(out.size(), SlotKind::Disc.dimensions());
//! ```

pub mod cpu;
pub mod enhance;
pub mod method;
pub mod ps2;
pub mod scaler;
pub mod slots;

pub use cpu::{Raster, ScaleError};
pub use method::ScaleMethod;
pub use scaler::{scale, ScaleRequest};
pub use slots::{Size, SlotKind};
