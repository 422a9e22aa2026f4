use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Instant;

use crate::foundation::core::{BezPath, Point, Rect};
use crate::geometry::sampler::{flatten, normalize, resample, smooth};
use crate::shapes::catalog::Pose;
use crate::shapes::profile::StyleProfile;

/// Curve subdivision used when flattening pose outlines.
pub const SEGMENTS_PER_CURVE: usize = 20;

/// Fixed-length closed outline in reference-frame coordinates.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SampledShape {
    points: Vec<Point>,
}

impl SampledShape {
    /// Wrap a point sequence.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Borrow the points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consume into the underlying points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the shape has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Axis-aligned bounds, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let init = Rect::from_points(*first, *first);
        Some(
            self.points
                .iter()
                .fold(init, |r, p| r.union_pt(*p)),
        )
    }

    /// Reflect across the vertical center line of a frame `width` wide.
    ///
    /// Used for the second eye of the pair; point order is kept so no resampling is needed.
    pub fn mirrored_x(&self, width: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point::new(width - p.x, p.y))
                .collect(),
        }
    }

    /// Closed polygon through every point.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return path;
        };
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
        path.close_path();
        path
    }
}

/// The three co-indexed keyframes of one profile.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoseShapes {
    /// Profile the shapes were sampled for.
    pub profile: StyleProfile,
    /// Open keyframe.
    pub open: SampledShape,
    /// Sore keyframe.
    pub sore: SampledShape,
    /// Closed keyframe.
    pub closed: SampledShape,
}

impl PoseShapes {
    /// Keyframe for `pose`.
    pub fn get(&self, pose: Pose) -> &SampledShape {
        match pose {
            Pose::Open => &self.open,
            Pose::Sore => &self.sore,
            Pose::Closed => &self.closed,
        }
    }
}

/// Sample one pose of `profile`.
pub fn build_pose(profile: &StyleProfile, pose: Pose) -> SampledShape {
    let style = profile.style;
    let polyline = flatten(&style.path(pose), SEGMENTS_PER_CURVE);
    let resampled = resample(&polyline, profile.sample_count);
    let smoothed = smooth(&resampled, profile.smooth_passes);
    SampledShape::new(normalize(
        &smoothed,
        style.view_box(pose),
        profile.reference_size(),
    ))
}

/// Sample all three poses of `profile`.
#[tracing::instrument(level = "debug", skip_all, fields(style = profile.style.as_str(), samples = profile.sample_count))]
pub fn build_pose_shapes(profile: &StyleProfile) -> PoseShapes {
    let started = Instant::now();
    let shapes = PoseShapes {
        profile: *profile,
        open: build_pose(profile, Pose::Open),
        sore: build_pose(profile, Pose::Sore),
        closed: build_pose(profile, Pose::Closed),
    };
    tracing::debug!(
        smooth_passes = profile.smooth_passes,
        elapsed_us = started.elapsed().as_micros() as u64,
        "built pose shapes"
    );
    shapes
}

type Slot = Arc<OnceLock<Arc<PoseShapes>>>;

/// Lazily built, read-only cache of sampled pose sets.
///
/// Each profile is built at most once, even when several threads ask for it concurrently;
/// afterwards lookups hand out the same `Arc`. Share one library (typically in an `Arc`) between
/// every consumer that renders the same profiles.
#[derive(Debug, Default)]
pub struct ShapeLibrary {
    slots: Mutex<HashMap<StyleProfile, Slot>>,
}

impl ShapeLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pose set for `profile`, building it on first use.
    pub fn shapes_for(&self, profile: &StyleProfile) -> Arc<PoseShapes> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(*profile).or_default())
        };
        // Built outside the map lock so other profiles are not blocked.
        Arc::clone(slot.get_or_init(|| Arc::new(build_pose_shapes(profile))))
    }

    /// Build every profile in `profiles` ahead of playback.
    pub fn warm(&self, profiles: impl IntoIterator<Item = StyleProfile>) {
        for profile in profiles {
            self.shapes_for(&profile);
        }
    }

    /// Number of profiles with a built pose set.
    pub fn cached_len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/library.rs"]
mod tests;
