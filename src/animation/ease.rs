use crate::foundation::core::Lerp;

/// Timing curve of a tween.
///
/// The choreography only needs the quadratic family: ease-out for the arrival fade and
/// ease-in-out for lid and squint morphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts slow.
    InQuad,
    /// Ends slow.
    OutQuad,
    /// Slow at both ends.
    InOutQuad,
}

impl Ease {
    /// Every curve.
    pub const ALL: [Ease; 4] = [Ease::Linear, Ease::InQuad, Ease::OutQuad, Ease::InOutQuad];

    /// Eased fraction for tween time `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let inv = 1.0 - t;
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - inv * inv,
            Self::InOutQuad if t < 0.5 => 2.0 * t * t,
            Self::InOutQuad => 1.0 - 2.0 * inv * inv,
        }
    }

    /// Value between `from` and `to` at tween time `t`.
    pub fn tween<T: Lerp>(self, from: &T, to: &T, t: f64) -> T {
        T::lerp(from, to, self.apply(t))
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "in_quad",
            Self::OutQuad => "out_quad",
            Self::InOutQuad => "in_out_quad",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
