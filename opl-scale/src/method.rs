// SPDX-License-Identifier: MIT
/// The closed set of scaling methods the converter exposes.
use fast_image_resize as fir;

use crate::cpu::ScaleError;

/// One case per selectable algorithm; parameters live on the variant that
/// owns them. The six kernels delegate to fast_image_resize, `Ps2Optimized`
/// is a whole pipeline (see [`crate::ps2`]) and therefore has no kernel
/// mapping of its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleMethod {
    /// Nearest neighbor (fast, pixelated)
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation
    Bicubic,
    /// Box averaging
    Box,
    /// Hamming window
    Hamming,
    /// Lanczos windowed sinc. Only `lobes == 3` is backed by a kernel.
    Lanczos { lobes: u8 },
    /// The PS2 display pipeline (sharpen, Lanczos resize, CRT tuning, 5-6-5)
    Ps2Optimized,
}

impl ScaleMethod {
    /// Startup default and the single fallback target on scaling failure.
    pub const DEFAULT: ScaleMethod = ScaleMethod::Lanczos { lobes: 3 };

    pub const ALL: [ScaleMethod; 7] = [
        ScaleMethod::Nearest,
        ScaleMethod::Bilinear,
        ScaleMethod::Bicubic,
        ScaleMethod::Box,
        ScaleMethod::Hamming,
        ScaleMethod::DEFAULT,
        ScaleMethod::Ps2Optimized,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScaleMethod::Nearest => "nearest",
            ScaleMethod::Bilinear => "bilinear",
            ScaleMethod::Bicubic => "bicubic",
            ScaleMethod::Box => "box",
            ScaleMethod::Hamming => "hamming",
            ScaleMethod::Lanczos { .. } => "lanczos",
            ScaleMethod::Ps2Optimized => "ps2_optimized",
        }
    }

    /// Look up a method by its wire name. Unknown names are `None`; the
    /// caller decides whether that is an error or a substitute-with-default.
    pub fn from_name(name: &str) -> Option<ScaleMethod> {
        ScaleMethod::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }

    /// Map to the fast_image_resize algorithm. `Ps2Optimized` is dispatched
    /// a level above this and is rejected here, as are Lanczos lobe counts
    /// the resizer has no kernel for.
    pub(crate) fn resize_alg(self) -> Result<fir::ResizeAlg, ScaleError> {
        match self {
            ScaleMethod::Nearest => Ok(fir::ResizeAlg::Nearest),
            ScaleMethod::Bilinear => Ok(fir::ResizeAlg::Convolution(fir::FilterType::Bilinear)),
            ScaleMethod::Bicubic => Ok(fir::ResizeAlg::Convolution(fir::FilterType::CatmullRom)),
            ScaleMethod::Box => Ok(fir::ResizeAlg::Convolution(fir::FilterType::Box)),
            ScaleMethod::Hamming => Ok(fir::ResizeAlg::Convolution(fir::FilterType::Hamming)),
            ScaleMethod::Lanczos { lobes: 3 } => {
                Ok(fir::ResizeAlg::Convolution(fir::FilterType::Lanczos3))
            }
            ScaleMethod::Lanczos { lobes } => Err(ScaleError::UnsupportedLobes(lobes)),
            ScaleMethod::Ps2Optimized => Err(ScaleError::NotAKernel),
        }
    }
}

impl clap::ValueEnum for ScaleMethod {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = clap::builder::PossibleValue::new(self.name());
        Some(match self {
            ScaleMethod::Nearest => value.help("Nearest neighbor (fast)"),
            ScaleMethod::Bilinear => value.help("Bilinear (medium quality)"),
            ScaleMethod::Bicubic => value.help("Bicubic (good quality)"),
            ScaleMethod::Box => value.help("Box (smoothing)"),
            ScaleMethod::Hamming => value.help("Hamming (detail)"),
            ScaleMethod::Lanczos { .. } => value.help("Lanczos (high quality)"),
            ScaleMethod::Ps2Optimized => value.help("PS2-optimized pipeline (recommended)"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for method in ScaleMethod::ALL {
            assert_eq!(ScaleMethod::from_name(method.name()), Some(method));
        }
        assert_eq!(ScaleMethod::from_name("LANCZOS"), Some(ScaleMethod::DEFAULT));
        assert_eq!(ScaleMethod::from_name("gaussian"), None);
    }

    #[test]
    fn default_is_lanczos_three() {
        assert_eq!(ScaleMethod::DEFAULT, ScaleMethod::Lanczos { lobes: 3 });
        assert!(ScaleMethod::DEFAULT.resize_alg().is_ok());
    }

    #[test]
    fn unsupported_lobes_have_no_kernel() {
        assert!(matches!(
            ScaleMethod::Lanczos { lobes: 5 }.resize_alg(),
            Err(ScaleError::UnsupportedLobes(5))
        ));
    }

    #[test]
    fn pipeline_method_is_not_a_kernel() {
        assert!(matches!(
            ScaleMethod::Ps2Optimized.resize_alg(),
            Err(ScaleError::NotAKernel)
        ));
    }
}
