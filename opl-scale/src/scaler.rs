// SPDX-License-Identifier: MIT
//! Scaling dispatcher.
//!
//! One entry point for every method: kernels go through the direct or the
//! letterbox resize path, `Ps2Optimized` through its pipeline. A failed
//! attempt with a non-default method is retried exactly once with
//! [`ScaleMethod::DEFAULT`]; a failure of the default itself propagates.

use crate::cpu::{resize_raster, resize_with_aspect, Raster, ScaleError};
use crate::method::ScaleMethod;
use crate::ps2::scale_ps2;
use crate::slots::Size;

/// Everything one scaling call needs. The method is a required field, so a
/// selection cannot leak between concurrent callers.
#[derive(Clone, Copy, Debug)]
pub struct ScaleRequest {
    pub target: Size,
    pub method: ScaleMethod,
    pub maintain_aspect: bool,
    /// Letterbox fill when `maintain_aspect` is set.
    pub background: [u8; 3],
}

impl ScaleRequest {
    pub fn new(target: Size, method: ScaleMethod) -> Self {
        Self {
            target,
            method,
            maintain_aspect: true,
            background: [0, 0, 0],
        }
    }
}

/// Scale `src` per the request, falling back to the default method once if
/// the requested one fails.
pub fn scale(src: &Raster, req: &ScaleRequest) -> Result<Raster, ScaleError> {
    match scale_once(src, req, req.method) {
        Ok(out) => Ok(out),
        Err(e) if req.method != ScaleMethod::DEFAULT => {
            log::warn!(
                "scaling with {} failed ({}), retrying with {}",
                req.method.name(),
                e,
                ScaleMethod::DEFAULT.name()
            );
            scale_once(src, req, ScaleMethod::DEFAULT)
        }
        Err(e) => Err(e),
    }
}

fn scale_once(src: &Raster, req: &ScaleRequest, method: ScaleMethod) -> Result<Raster, ScaleError> {
    match method {
        ScaleMethod::Ps2Optimized => {
            scale_ps2(src, req.target, req.maintain_aspect, req.background)
        }
        kernel => {
            if req.maintain_aspect {
                resize_with_aspect(src, req.target, kernel, req.background)
            } else {
                resize_raster(src, req.target, kernel)
            }
        }
    }
}
