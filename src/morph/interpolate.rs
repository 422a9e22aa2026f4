use crate::foundation::core::{Lerp, Point};
use crate::shapes::catalog::Pose;
use crate::shapes::library::{PoseShapes, SampledShape};

/// Upper end of the morph progress range (fully closed).
pub const MAX_PROGRESS: f64 = 2.0;

/// Keyframe pair and local blend factor for a progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Keyframe at local `t == 0`.
    pub from: Pose,
    /// Keyframe at local `t == 1`.
    pub to: Pose,
    /// Local blend factor in `[0, 1]`.
    pub t: f64,
}

/// Map `progress` (clamped to `[0, 2]`) onto a keyframe segment.
///
/// Values strictly below 1 blend open→sore; 1 and above blend sore→closed. This is the only
/// boundary rule in the crate; at exactly 1 both readings give the sore keyframe.
pub fn segment_for(progress: f64) -> Segment {
    let p = clamp_progress(progress);
    if p < 1.0 {
        Segment {
            from: Pose::Open,
            to: Pose::Sore,
            t: p,
        }
    } else {
        Segment {
            from: Pose::Sore,
            to: Pose::Closed,
            t: (p - 1.0).clamp(0.0, 1.0),
        }
    }
}

/// Interpolated outline for `progress` in `[0, 2]`.
pub fn shape_at(progress: f64, shapes: &PoseShapes) -> SampledShape {
    let seg = segment_for(progress);
    blend(shapes.get(seg.from), shapes.get(seg.to), seg.t)
}

/// Point-by-point blend of two co-indexed shapes.
///
/// # Panics
///
/// Panics when the shapes differ in length: keyframes of one profile always share a sample
/// count, so a mismatch is a data error.
pub fn blend(a: &SampledShape, b: &SampledShape, t: f64) -> SampledShape {
    assert_eq!(
        a.len(),
        b.len(),
        "morph keyframes must have identical sample counts"
    );
    let t = t.clamp(0.0, 1.0);
    SampledShape::new(
        a.points()
            .iter()
            .zip(b.points())
            .map(|(p, q)| <Point as Lerp>::lerp(p, q, t))
            .collect(),
    )
}

/// Rescale x uniformly about the shape's horizontal midpoint so it spans exactly
/// `target_width`, centered on `target_width / 2`.
///
/// Keeps mirrored copies symmetric when blended keyframes differ slightly in width. Shapes with
/// no horizontal extent are returned unchanged.
pub fn normalize_width(shape: &SampledShape, target_width: f64) -> SampledShape {
    let Some(bounds) = shape.bounds() else {
        return shape.clone();
    };
    if bounds.x1 <= bounds.x0 {
        return shape.clone();
    }

    let scale = target_width / bounds.width();
    let center = (bounds.x0 + bounds.x1) * 0.5;
    let target_center = target_width * 0.5;
    SampledShape::new(
        shape
            .points()
            .iter()
            .map(|p| Point::new((p.x - center) * scale + target_center, p.y))
            .collect(),
    )
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, MAX_PROGRESS)
}

#[cfg(test)]
#[path = "../../tests/unit/morph/interpolate.rs"]
mod tests;
