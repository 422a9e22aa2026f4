//! Fixed pose geometry for the built-in eye styles.

use crate::foundation::core::{Rect, Size};
use crate::geometry::path::PathDefinition;

/// One of the three authored shape states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    /// Relaxed, fully open eye.
    Open,
    /// Strained squint.
    Sore,
    /// Lid shut.
    Closed,
}

impl Pose {
    /// Every pose in keyframe order.
    pub const ALL: [Pose; 3] = [Pose::Open, Pose::Sore, Pose::Closed];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Sore => "sore",
            Self::Closed => "closed",
        }
    }
}

/// Visual variant of the eye pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeStyle {
    /// Hand-drawn organic outline; blinks morph through all three poses.
    V1,
    /// Rounded-rect eye; blinks squish a pill, only the sore squint morphs.
    #[default]
    V2,
}

impl EyeStyle {
    /// Frame every pose of this style is normalized into.
    pub fn reference_size(self) -> Size {
        match self {
            Self::V1 => Size::new(38.0, 60.0),
            Self::V2 => Size::new(40.0, 60.0),
        }
    }

    /// Extent the pose path was authored in.
    pub fn view_box(self, pose: Pose) -> Size {
        match (self, pose) {
            (Self::V1, Pose::Open) => Size::new(38.0, 60.0),
            (Self::V1, Pose::Sore) => Size::new(37.0, 45.0),
            (Self::V1, Pose::Closed) => Size::new(39.0, 12.0),
            (Self::V2, Pose::Open) => Size::new(40.0, 60.0),
            (Self::V2, Pose::Sore) => Size::new(40.0, 54.0),
            (Self::V2, Pose::Closed) => Size::new(40.0, 8.0),
        }
    }

    /// Authored outline for `pose`.
    pub fn path(self, pose: Pose) -> PathDefinition {
        match (self, pose) {
            (Self::V1, Pose::Open) => v1_open(),
            (Self::V1, Pose::Sore) => v1_sore(),
            (Self::V1, Pose::Closed) => v1_closed(),
            (Self::V2, Pose::Open) => {
                PathDefinition::rounded_rect(Rect::new(0.0, 0.0, 40.0, 60.0), 19.0)
            }
            (Self::V2, Pose::Sore) => v2_sore(),
            (Self::V2, Pose::Closed) => {
                PathDefinition::rounded_rect(Rect::new(0.0, 0.0, 40.0, 8.0), 4.0)
            }
        }
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

fn v1_open() -> PathDefinition {
    PathDefinition::builder()
        .move_to((37.3148, 19.0239))
        .cubic_to((38.2151, 8.79862), (30.1572, 0.0), (19.8924, 0.0))
        .line_to((17.3552, 0.0))
        .cubic_to((8.71219, 0.0), (1.47058, 6.53929), (0.59192, 15.1376))
        .cubic_to((-0.0951715, 21.8612), (-0.184236, 28.6326), (0.325774, 35.372))
        .line_to((0.860387, 42.4366))
        .cubic_to((1.58154, 51.9661), (9.68629, 59.3302), (19.243, 59.3302))
        .cubic_to((29.7635, 59.3302), (38.2011, 50.1467), (37.3008, 39.6648))
        .cubic_to((36.7136, 32.828), (36.7129, 25.8594), (37.3148, 19.0239))
        .close()
        .build()
}

fn v1_sore() -> PathDefinition {
    PathDefinition::builder()
        .move_to((36.5021, 13.6311))
        .cubic_to((37.9369, 5.59346), (30.8321, -1.36799), (22.8253, 0.23034))
        .line_to((14.4286, 1.91526))
        .cubic_to((7.08179, 3.38948), (1.52238, 9.43076), (0.662551, 16.8745))
        .line_to((0.338409, 19.6806))
        .cubic_to((-0.225569, 24.5631), (-0.0839618, 29.5013), (0.758876, 34.3434))
        .cubic_to((2.02447, 41.6143), (9.27628, 46.2154), (16.3936, 44.2633))
        .cubic_to((16.3936, 44.2633), (16.8214, 44.146), (16.8214, 44.146))
        .cubic_to((19.166, 43.5029), (21.6041, 43.2702), (24.028, 43.4581))
        .cubic_to((24.028, 43.4581), (24.3927, 43.4864), (24.3927, 43.4864))
        .cubic_to((31.5492, 44.0411), (37.3247, 37.7283), (36.1373, 30.6493))
        .cubic_to((35.2804, 25.5406), (35.3076, 20.3226), (36.2179, 15.2231))
        .line_to((36.5021, 13.6311))
        .close()
        .build()
}

fn v1_closed() -> PathDefinition {
    PathDefinition::builder()
        .move_to((38.4631, 2.02484))
        .cubic_to((38.3105, 0.804466), (37.0862, 0.0233096), (35.9152, 0.399206))
        .line_to((33.7234, 1.10276))
        .cubic_to((24.4592, 4.07659), (14.4965, 4.07659), (5.23225, 1.10276))
        .line_to((1.98529, 0.0604869))
        .cubic_to((1.32341, -0.151974), (0.614756, 0.213056), (0.403442, 0.875293))
        .cubic_to((-0.0764534, 2.37923), (-0.129213, 3.98691), (0.251044, 5.51908))
        .line_to((0.535072, 6.66351))
        .cubic_to((0.69122, 7.29268), (1.16191, 7.79618), (1.77915, 7.99432))
        .line_to((3.43505, 8.52586))
        .cubic_to((13.8681, 11.8749), (25.0876, 11.8749), (35.5206, 8.52586))
        .line_to((36.5209, 8.20478))
        .cubic_to((37.5263, 7.88204), (38.2532, 7.00536), (38.3842, 5.95756))
        .line_to((38.4631, 5.32636))
        .cubic_to((38.6001, 4.23012), (38.6001, 3.12108), (38.4631, 2.02484))
        .close()
        .build()
}

fn v2_sore() -> PathDefinition {
    PathDefinition::builder()
        .move_to((0.0, 25.5328))
        .cubic_to((0.0, 20.3648), (0.0, 17.7808), (0.527787, 15.5885))
        .cubic_to((2.01694, 9.40304), (6.50315, 4.37343), (12.4789, 2.18981))
        .cubic_to((14.5968, 1.41589), (17.164, 1.12173), (22.2984, 0.533415))
        .cubic_to((26.2815, 0.0770219), (28.273, -0.151175), (29.902, 0.110327))
        .cubic_to((34.5234, 0.852196), (38.2916, 4.21334), (39.5548, 8.72018))
        .cubic_to((40.0, 10.3088), (40.0, 12.3134), (40.0, 16.3225))
        .line_to((40.0, 33.5051))
        .cubic_to((40.0, 34.4336), (40.0, 34.8979), (39.9838, 35.2903))
        .cubic_to((39.5753, 45.1669), (31.6618, 53.0804), (21.7852, 53.4889))
        .cubic_to((21.3928, 53.5051), (20.9285, 53.5051), (20.0, 53.5051))
        .cubic_to((19.0715, 53.5051), (18.6072, 53.5051), (18.2148, 53.4889))
        .cubic_to((8.33817, 53.0804), (0.424732, 45.1669), (0.0162306, 35.2903))
        .cubic_to((0.0, 34.8979), (0.0, 34.4336), (0.0, 33.5051))
        .line_to((0.0, 25.5328))
        .close()
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/shapes/catalog.rs"]
mod tests;
