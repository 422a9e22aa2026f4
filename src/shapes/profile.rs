use crate::foundation::core::Size;
use crate::foundation::error::{BlinkError, BlinkResult};
use crate::shapes::catalog::EyeStyle;

/// Smallest sample count that still describes a closed outline.
pub const MIN_SAMPLE_COUNT: usize = 3;

/// Sampling recipe for one eye style.
///
/// Profiles are the cache key of [`crate::ShapeLibrary`]: two profiles sharing a style but
/// differing in density or smoothing produce independent pose sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StyleProfile {
    /// Pose geometry and reference frame.
    pub style: EyeStyle,
    /// Points in every sampled pose.
    pub sample_count: usize,
    /// Moving-average passes applied after resampling (0 = none).
    pub smooth_passes: usize,
}

impl StyleProfile {
    /// Organic eye, unsmoothed.
    pub const V1: Self = Self {
        style: EyeStyle::V1,
        sample_count: 140,
        smooth_passes: 0,
    };

    /// Rounded-rect eye at standard density.
    pub const V2: Self = Self {
        style: EyeStyle::V2,
        sample_count: 240,
        smooth_passes: 2,
    };

    /// Rounded-rect eye sampled densely for the sore squint, where jitter is most visible.
    pub const V2_HIGH: Self = Self {
        style: EyeStyle::V2,
        sample_count: 360,
        smooth_passes: 4,
    };

    /// Build a custom profile.
    pub fn new(style: EyeStyle, sample_count: usize, smooth_passes: usize) -> BlinkResult<Self> {
        if sample_count < MIN_SAMPLE_COUNT {
            return Err(BlinkError::validation(format!(
                "sample_count must be >= {MIN_SAMPLE_COUNT} (got {sample_count})"
            )));
        }
        Ok(Self {
            style,
            sample_count,
            smooth_passes,
        })
    }

    /// Default profile for a style's blink morph.
    pub fn standard(style: EyeStyle) -> Self {
        match style {
            EyeStyle::V1 => Self::V1,
            EyeStyle::V2 => Self::V2,
        }
    }

    /// Shared frame all poses are normalized into.
    pub fn reference_size(&self) -> Size {
        self.style.reference_size()
    }
}
