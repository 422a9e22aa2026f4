use crate::morph::interpolate::{normalize_width, shape_at};
use crate::shapes::catalog::EyeStyle;
use crate::shapes::library::{PoseShapes, SampledShape};
use crate::shapes::profile::StyleProfile;

/// How a style turns morph progress into an outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MorphPolicy {
    /// Morph through open → sore → closed over progress `[0, 2]`.
    ThreePose,
    /// Morph only open ↔ sore over `[0, 1]`; the closed state is drawn as a separate pill, and
    /// blended outlines are re-centered to the reference width.
    TwoPoseOverlay,
}

impl MorphPolicy {
    /// Policy the style was designed for.
    pub fn for_style(style: EyeStyle) -> Self {
        match style {
            EyeStyle::V1 => Self::ThreePose,
            EyeStyle::V2 => Self::TwoPoseOverlay,
        }
    }

    /// Largest progress this policy morphs to.
    pub fn max_progress(self) -> f64 {
        match self {
            Self::ThreePose => 2.0,
            Self::TwoPoseOverlay => 1.0,
        }
    }

    /// Whether blended outlines are re-centered to the reference width.
    pub fn recenters(self) -> bool {
        matches!(self, Self::TwoPoseOverlay)
    }

    /// Sampling profile used for morphed outlines of `style` under this policy.
    ///
    /// The two-pose policy only ever morphs the sore squint, so it samples densely.
    pub fn morph_profile(self, style: EyeStyle) -> StyleProfile {
        match (self, style) {
            (Self::TwoPoseOverlay, EyeStyle::V2) => StyleProfile::V2_HIGH,
            _ => StyleProfile::standard(style),
        }
    }

    /// Outline for `progress`, restricted to this policy's range.
    pub fn shape_at(self, progress: f64, shapes: &PoseShapes) -> SampledShape {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, self.max_progress())
        };
        let shape = shape_at(p, shapes);
        if self.recenters() {
            normalize_width(&shape, shapes.profile.reference_size().width)
        } else {
            shape
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ThreePose => "three_pose",
            Self::TwoPoseOverlay => "two_pose_overlay",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/policy.rs"]
mod tests;
