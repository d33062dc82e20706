//! # Configuration Module
//!
//! Configuration structure and validation for conversion runs. This is the
//! seam between outer surfaces (CLI flags, a GUI form, drag-and-drop) and the
//! core library: the outer layer hands over strings and booleans, and
//! `to_options()` resolves them onto the closed enums the core works with.
//!
//! ## Resolution rules
//!
//! | Input | Unknown value |
//! |-------|---------------|
//! | `slot` | validation error; a made-up slot would produce an image the launcher rejects |
//! | `algorithm` | warning + substitution with the default (lanczos); the caller is deliberately not failed |

use opl_scale::{ScaleMethod, SlotKind};

use crate::error::{ConvertError, ConvertResult};
use crate::ConvertOptions;

/// Conversion parameters as an outer layer supplies them.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Slot name: one of cover, spine, back, screenshot, background, disc, logo.
    pub slot: String,

    /// Scaling algorithm name. Unknown names fall back to the default with a
    /// logged warning rather than failing the run.
    pub algorithm: String,

    /// Letterbox to preserve the source aspect ratio (vs. stretch to fit).
    pub maintain_aspect: bool,

    /// Extra 1.20× contrast boost applied after scaling. Stacks with the
    /// contrast pass the PS2 pipeline already performs.
    pub enhance_contrast: bool,

    /// Extra sharpen pass applied after scaling.
    pub sharpen: bool,

    /// Name outputs `{basename}_{slot}.png` instead of `{basename}.png`.
    pub auto_rename: bool,

    /// Letterbox fill color.
    pub background: [u8; 3],
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            slot: "cover".to_string(),
            algorithm: ScaleMethod::DEFAULT.name().to_string(),
            maintain_aspect: true,
            enhance_contrast: false,
            sharpen: false,
            auto_rename: false,
            background: [0, 0, 0],
        }
    }
}

impl ConvertConfig {
    /// Validate the parts that must be right before a batch starts.
    /// The algorithm name is intentionally not checked here; see
    /// [`ConvertConfig::to_options`].
    pub fn validate(&self) -> Result<(), String> {
        if SlotKind::from_name(&self.slot).is_none() {
            return Err(format!("unknown image slot '{}'", self.slot));
        }
        Ok(())
    }

    /// Resolve names onto the core enums.
    pub fn to_options(&self) -> ConvertResult<ConvertOptions> {
        let slot = SlotKind::from_name(&self.slot)
            .ok_or_else(|| ConvertError::invalid_slot(&self.slot))?;
        let method = match ScaleMethod::from_name(&self.algorithm) {
            Some(method) => method,
            None => {
                log::warn!(
                    "scaling algorithm '{}' not available, using {}",
                    self.algorithm,
                    ScaleMethod::DEFAULT.name()
                );
                ScaleMethod::DEFAULT
            }
        };
        Ok(ConvertOptions {
            slot,
            method,
            maintain_aspect: self.maintain_aspect,
            enhance_contrast: self.enhance_contrast,
            sharpen: self.sharpen,
            background: self.background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConvertConfig::default();
        assert_eq!(config.slot, "cover");
        assert_eq!(config.algorithm, "lanczos");
        assert!(config.maintain_aspect);
        assert!(!config.enhance_contrast);
        assert!(!config.sharpen);
        assert!(!config.auto_rename);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ConvertConfig::default();
        assert!(config.validate().is_ok());

        config.slot = "poster".to_string();
        assert!(config.validate().is_err());
        config.slot = "disc".to_string();
        assert!(config.validate().is_ok());

        // Algorithm names never fail validation, they get substituted.
        config.algorithm = "made_up".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn resolves_slot_and_algorithm() {
        let config = ConvertConfig {
            slot: "logo".to_string(),
            algorithm: "ps2_optimized".to_string(),
            ..ConvertConfig::default()
        };
        let options = config.to_options().unwrap();
        assert_eq!(options.slot, SlotKind::Logo);
        assert_eq!(options.method, ScaleMethod::Ps2Optimized);
    }

    #[test]
    fn unknown_algorithm_substitutes_the_default() {
        let config = ConvertConfig {
            algorithm: "super_sampler".to_string(),
            ..ConvertConfig::default()
        };
        let options = config.to_options().unwrap();
        assert_eq!(options.method, ScaleMethod::DEFAULT);
    }

    #[test]
    fn unknown_slot_is_an_error() {
        let config = ConvertConfig {
            slot: "poster".to_string(),
            ..ConvertConfig::default()
        };
        assert!(matches!(
            config.to_options(),
            Err(ConvertError::InvalidSlot { .. })
        ));
    }
}
