//! The fixed aspect-ratio catalog.
//!
//! Every frame in the composite strip uses one of these ratios, pinned to
//! concrete pixel dimensions at the canonical 1080 px-wide reference scale.
//! Template layouts reference the same catalog, so canvas-space arithmetic
//! never mixes scales.

#[cfg(test)]
#[path = "ratio_test.rs"]
mod ratio_test;

use serde::{Deserialize, Serialize};

use crate::consts::REFERENCE_WIDTH;

/// A named aspect ratio with fixed pixel dimensions at the reference scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// 1:1, 1080×1080.
    Square,
    /// 4:5, 1080×1350.
    Portrait,
    /// 16:9, 1080×608.
    Landscape,
    /// 9:16, 1080×1920.
    Story,
}

impl AspectRatio {
    /// All catalog entries, in presentation order. `Square` is the default
    /// for newly added frames.
    pub const ALL: [Self; 4] = [Self::Square, Self::Portrait, Self::Landscape, Self::Story];

    /// Frame width in canvas units at the reference scale.
    #[must_use]
    pub fn width(self) -> f64 {
        REFERENCE_WIDTH
    }

    /// Frame height in canvas units at the reference scale.
    #[must_use]
    pub fn height(self) -> f64 {
        match self {
            Self::Square => 1080.0,
            Self::Portrait => 1350.0,
            Self::Landscape => 608.0,
            Self::Story => 1920.0,
        }
    }

    /// Width-over-height as an exact fraction (the pixel dimensions round).
    #[must_use]
    pub fn ratio(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Portrait => 4.0 / 5.0,
            Self::Landscape => 16.0 / 9.0,
            Self::Story => 9.0 / 16.0,
        }
    }

    /// Stable machine name, matching the serde representation.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
            Self::Story => "story",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Square => "1:1 Square",
            Self::Portrait => "4:5 Portrait",
            Self::Landscape => "16:9 Landscape",
            Self::Story => "9:16 Story",
        }
    }

    /// Look up a catalog entry by machine name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::Square
    }
}
