//! blinkmorph is a shape-morph engine and animation timeline for a pair of animated eyes.
//!
//! A fixed set of vector poses (open, sore, closed) is sampled once per [`StyleProfile`] into
//! co-indexed point sequences, interpolated by a scalar morph progress, and driven through a
//! scripted arrival / sore / exercise / settle choreography:
//!
//! - Build shapes through a shared [`ShapeLibrary`]
//! - Compile an [`AnimationScript`] into a [`Timeline`] and drive it with a
//!   [`BlinkController`], [`run`] or a threaded [`Player`]
//! - Turn published [`BlinkFrame`]s into paintable geometry with an [`EyeRig`]
//!
//! Rendering, scheduling of when to play, and settings storage are left to the host.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod geometry;
pub(crate) mod morph;
pub(crate) mod shapes;

pub use crate::foundation::core::{BezPath, Lerp, Point, Rect, RoundedRect, Size, Vec2};
pub use crate::foundation::error::{BlinkError, BlinkResult};

pub use crate::geometry::path::{PathBuilder, PathCommand, PathDefinition};
pub use crate::geometry::sampler::{flatten, normalize, resample, smooth};

pub use crate::shapes::catalog::{EyeStyle, Pose};
pub use crate::shapes::library::{
    PoseShapes, SEGMENTS_PER_CURVE, SampledShape, ShapeLibrary, build_pose, build_pose_shapes,
};
pub use crate::shapes::profile::{MIN_SAMPLE_COUNT, StyleProfile};

pub use crate::morph::interpolate::{
    MAX_PROGRESS, Segment, blend, normalize_width, segment_for, shape_at,
};
pub use crate::morph::policy::MorphPolicy;
pub use crate::morph::rig::{EyeGeometry, EyeRig};

pub use crate::animation::clock::{Clock, ManualClock, SystemClock};
pub use crate::animation::controller::{BlinkController, BlinkSession, SessionId};
pub use crate::animation::ease::Ease;
pub use crate::animation::player::{Player, PlayerEvent};
pub use crate::animation::runner::{
    CancelToken, FrameObserver, RunOpts, RunOutcome, run,
};
pub use crate::animation::script::{
    AnimationPhase, AnimationScript, BlinkTiming, Cue, CueAction, PhaseKind, START_OFFSET_Y,
    START_SCALE, ScriptConfig,
};
pub use crate::animation::timeline::{
    BlinkFrame, Param, PlaybackState, Timeline, TimelineStatus, sample_at,
};

pub use crate::config::settings::BlinkSettings;
