pub use kurbo::{BezPath, Point, Rect, RoundedRect, Size, Vec2};

/// Interpolation contract for animated and morphed values.
///
/// Implementations use the `a * (1 - t) + b * t` form so `t == 0` and `t == 1` reproduce the
/// endpoints exactly.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a * (1.0 - t) + b * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}
