use std::sync::Arc;

use crate::animation::timeline::BlinkFrame;
use crate::foundation::core::{BezPath, Rect, RoundedRect, Size};
use crate::geometry::path::PathDefinition;
use crate::morph::policy::MorphPolicy;
use crate::shapes::catalog::EyeStyle;
use crate::shapes::library::{SampledShape, ShapeLibrary};

/// Height of the squished pill at full closure, as a fraction of the frame height.
const CLOSED_PILL_FRACTION: f64 = 4.0 / 60.0;
const OVERLAY_HEIGHT: f64 = 10.0;
const OVERLAY_RADIUS: f64 = 4.0;

/// What a renderer paints for one eye, in reference-frame coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum EyeGeometry {
    /// Closed polygon through sampled points.
    Polygon(SampledShape),
    /// Rounded rectangle.
    Pill(RoundedRect),
    /// Morphed outline with a non-morphed pill painted over it.
    Layered {
        /// Morphed outline underneath.
        morph: SampledShape,
        /// Pill on top.
        overlay: RoundedRect,
    },
}

impl EyeGeometry {
    /// Reflect across the vertical center line of a frame `width` wide.
    pub fn mirrored(&self, width: f64) -> Self {
        match self {
            Self::Polygon(shape) => Self::Polygon(shape.mirrored_x(width)),
            Self::Pill(rr) => Self::Pill(mirror_rounded_rect(rr, width)),
            Self::Layered { morph, overlay } => Self::Layered {
                morph: morph.mirrored_x(width),
                overlay: mirror_rounded_rect(overlay, width),
            },
        }
    }

    /// Closed paths to fill, bottom layer first.
    pub fn to_bez_path(&self) -> BezPath {
        match self {
            Self::Polygon(shape) => shape.to_bez_path(),
            Self::Pill(rr) => pill_path(rr),
            Self::Layered { morph, overlay } => {
                let mut path = morph.to_bez_path();
                path.extend(pill_path(overlay).elements().iter().copied());
                path
            }
        }
    }
}

fn mirror_rounded_rect(rr: &RoundedRect, width: f64) -> RoundedRect {
    let r = rr.rect();
    let radii = rr.radii();
    RoundedRect::from_rect(
        Rect::new(width - r.x1, r.y0, width - r.x0, r.y1),
        (
            radii.top_right,
            radii.top_left,
            radii.bottom_left,
            radii.bottom_right,
        ),
    )
}

fn pill_path(rr: &RoundedRect) -> BezPath {
    PathDefinition::rounded_rect(rr.rect(), rr.radii().top_left).to_bez_path()
}

/// Turns timeline frames into eye geometry for one style.
///
/// Shapes come from the shared [`ShapeLibrary`]; the first frame of a profile pays for sampling.
#[derive(Clone, Debug)]
pub struct EyeRig {
    library: Arc<ShapeLibrary>,
    style: EyeStyle,
    policy: MorphPolicy,
}

impl EyeRig {
    /// Rig for `style` with the policy the style was designed for.
    pub fn new(library: Arc<ShapeLibrary>, style: EyeStyle) -> Self {
        Self::with_policy(library, style, MorphPolicy::for_style(style))
    }

    /// Rig with an explicit policy.
    pub fn with_policy(library: Arc<ShapeLibrary>, style: EyeStyle, policy: MorphPolicy) -> Self {
        Self {
            library,
            style,
            policy,
        }
    }

    /// Eye style.
    pub fn style(&self) -> EyeStyle {
        self.style
    }

    /// Morph policy.
    pub fn policy(&self) -> MorphPolicy {
        self.policy
    }

    /// Frame every geometry is expressed in.
    pub fn reference_size(&self) -> Size {
        self.style.reference_size()
    }

    /// Geometry of the left eye for `frame`.
    pub fn geometry(&self, frame: &BlinkFrame) -> EyeGeometry {
        let shapes = self.library.shapes_for(&self.policy.morph_profile(self.style));
        match self.policy {
            MorphPolicy::ThreePose => {
                let progress = if frame.sore_active {
                    frame.sore_morph
                } else {
                    frame.morph
                };
                EyeGeometry::Polygon(self.policy.shape_at(progress, &shapes))
            }
            MorphPolicy::TwoPoseOverlay if frame.sore_active => EyeGeometry::Layered {
                morph: self.policy.shape_at(frame.sore_morph, &shapes),
                overlay: self.overlay_pill(),
            },
            MorphPolicy::TwoPoseOverlay => EyeGeometry::Pill(self.blink_pill(frame.morph)),
        }
    }

    /// Left eye and its mirror image.
    pub fn pair(&self, frame: &BlinkFrame) -> [EyeGeometry; 2] {
        let left = self.geometry(frame);
        let right = left.mirrored(self.reference_size().width);
        [left, right]
    }

    fn blink_pill(&self, morph: f64) -> RoundedRect {
        let size = self.reference_size();
        let closure = if morph.is_nan() {
            0.0
        } else {
            (morph / 2.0).clamp(0.0, 1.0)
        };
        let height = size.height * (1.0 - (1.0 - CLOSED_PILL_FRACTION) * closure);
        let y0 = (size.height - height) / 2.0;
        let radius = (height / 2.0).min(size.width / 2.0);
        RoundedRect::from_rect(Rect::new(0.0, y0, size.width, y0 + height), radius)
    }

    fn overlay_pill(&self) -> RoundedRect {
        let size = self.reference_size();
        let y0 = (size.height - OVERLAY_HEIGHT) / 2.0;
        RoundedRect::from_rect(
            Rect::new(0.0, y0, size.width, y0 + OVERLAY_HEIGHT),
            OVERLAY_RADIUS,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/morph/rig.rs"]
mod tests;
