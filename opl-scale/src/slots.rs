// SPDX-License-Identifier: MIT
/// Slot dimension table + letterbox fit geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub fn pixel_count(self) -> usize {
        self.w as usize * self.h as usize
    }
}

/// The seven image slots an OPL art set consists of.
/// Each maps to one immutable target size; the launcher rejects anything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SlotKind {
    /// Front cover, 140×200
    Cover,
    /// Case spine, 18×240
    Spine,
    /// Back cover, 242×344
    Back,
    /// In-game screenshot, 250×168
    Screenshot,
    /// Menu background, 640×480
    Background,
    /// Disc label, 128×128
    Disc,
    /// Game logo, 300×125
    Logo,
}

impl SlotKind {
    pub const ALL: [SlotKind; 7] = [
        SlotKind::Cover,
        SlotKind::Spine,
        SlotKind::Back,
        SlotKind::Screenshot,
        SlotKind::Background,
        SlotKind::Disc,
        SlotKind::Logo,
    ];

    /// Fixed target size for this slot.
    pub fn dimensions(self) -> Size {
        match self {
            SlotKind::Cover => Size { w: 140, h: 200 },
            SlotKind::Spine => Size { w: 18, h: 240 },
            SlotKind::Back => Size { w: 242, h: 344 },
            SlotKind::Screenshot => Size { w: 250, h: 168 },
            SlotKind::Background => Size { w: 640, h: 480 },
            SlotKind::Disc => Size { w: 128, h: 128 },
            SlotKind::Logo => Size { w: 300, h: 125 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SlotKind::Cover => "cover",
            SlotKind::Spine => "spine",
            SlotKind::Back => "back",
            SlotKind::Screenshot => "screenshot",
            SlotKind::Background => "background",
            SlotKind::Disc => "disc",
            SlotKind::Logo => "logo",
        }
    }

    pub fn from_name(name: &str) -> Option<SlotKind> {
        SlotKind::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
    }
}

/// Placement of resized content inside a letterbox canvas.
/// `content` fits within the target box; `offset` centers it (floor division,
/// so an odd remainder leaves the extra pixel on the bottom/right).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitPlan {
    pub content: Size,
    pub offset: (u32, u32),
}

/// Compute the largest aspect-preserving content size inside `target`.
///
/// A source wider (proportionally) than the target box is width-constrained,
/// otherwise height-constrained; the free dimension is rounded to the nearest
/// pixel, never below 1.
pub fn fit_plan(src: Size, target: Size) -> FitPlan {
    let src_ratio = f64::from(src.w) / f64::from(src.h);
    let target_ratio = f64::from(target.w) / f64::from(target.h);

    let content = if src_ratio > target_ratio {
        let w = target.w;
        let h = (f64::from(w) / src_ratio).round() as u32;
        Size { w, h: h.max(1) }
    } else {
        let h = target.h;
        let w = (f64::from(h) * src_ratio).round() as u32;
        Size { w: w.max(1), h }
    };

    FitPlan {
        content,
        offset: ((target.w - content.w) / 2, (target.h - content.h) / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_table_is_fixed() {
        assert_eq!(SlotKind::Cover.dimensions(), Size { w: 140, h: 200 });
        assert_eq!(SlotKind::Spine.dimensions(), Size { w: 18, h: 240 });
        assert_eq!(SlotKind::Back.dimensions(), Size { w: 242, h: 344 });
        assert_eq!(SlotKind::Screenshot.dimensions(), Size { w: 250, h: 168 });
        assert_eq!(SlotKind::Background.dimensions(), Size { w: 640, h: 480 });
        assert_eq!(SlotKind::Disc.dimensions(), Size { w: 128, h: 128 });
        assert_eq!(SlotKind::Logo.dimensions(), Size { w: 300, h: 125 });
    }

    #[test]
    fn slot_names_round_trip() {
        for slot in SlotKind::ALL {
            assert_eq!(SlotKind::from_name(slot.name()), Some(slot));
        }
        assert_eq!(SlotKind::from_name("COVER"), Some(SlotKind::Cover));
        assert_eq!(SlotKind::from_name("poster"), None);
        assert_eq!(SlotKind::from_name(""), None);
    }

    #[test]
    fn wide_source_is_width_constrained() {
        // 640×480 into 140×200: source ratio 1.33 > target ratio 0.7
        let plan = fit_plan(Size { w: 640, h: 480 }, Size { w: 140, h: 200 });
        assert_eq!(plan.content, Size { w: 140, h: 105 });
        assert_eq!(plan.offset, (0, 47)); // (200 - 105) / 2, floor
    }

    #[test]
    fn tall_source_is_height_constrained() {
        let plan = fit_plan(Size { w: 480, h: 640 }, Size { w: 640, h: 480 });
        assert_eq!(plan.content, Size { w: 360, h: 480 });
        assert_eq!(plan.offset, (140, 0));
    }

    #[test]
    fn matching_ratio_fills_the_box() {
        let plan = fit_plan(Size { w: 256, h: 256 }, Size { w: 128, h: 128 });
        assert_eq!(plan.content, Size { w: 128, h: 128 });
        assert_eq!(plan.offset, (0, 0));
    }

    #[test]
    fn extreme_ratio_keeps_at_least_one_pixel() {
        let plan = fit_plan(Size { w: 4000, h: 1 }, Size { w: 140, h: 200 });
        assert_eq!(plan.content.h, 1);
        assert_eq!(plan.content.w, 140);
    }

    #[test]
    fn odd_remainder_leaves_asymmetric_margin() {
        // Content height 105 inside 200 leaves 95 = 47 + 48; the extra pixel
        // stays on the bottom edge.
        let plan = fit_plan(Size { w: 640, h: 480 }, Size { w: 140, h: 200 });
        let bottom = plan.content.h + plan.offset.1;
        assert_eq!(plan.offset.1, 47);
        assert_eq!(200 - bottom, 48);
    }
}
