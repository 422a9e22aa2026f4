//! Path flattening, arc-length resampling and smoothing.
//!
//! All functions are pure and total: degenerate input degrades to a sensible output instead of
//! failing.

use crate::foundation::core::{Point, Size, Vec2};
use crate::geometry::path::{PathCommand, PathDefinition};

/// Flatten `path` into a polyline, splitting every curve into `segments_per_curve` straight
/// segments (`0` is treated as `1`).
///
/// `Close` appends the subpath start so the polyline reconnects explicitly.
pub fn flatten(path: &PathDefinition, segments_per_curve: usize) -> Vec<Point> {
    let n = segments_per_curve.max(1);
    let mut out = Vec::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;

    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => {
                current = p;
                start = p;
                out.push(p);
            }
            PathCommand::LineTo(p) => {
                current = p;
                out.push(p);
            }
            PathCommand::QuadTo(c, end) => {
                out.extend((1..=n).map(|i| quad_point(current, c, end, i as f64 / n as f64)));
                current = end;
            }
            PathCommand::CubicTo(c1, c2, end) => {
                out.extend(
                    (1..=n).map(|i| cubic_point(current, c1, c2, end, i as f64 / n as f64)),
                );
                current = end;
            }
            PathCommand::Close => {
                current = start;
                out.push(start);
            }
        }
    }

    out
}

/// Redistribute `points` into `count` samples spaced equally by arc length.
///
/// The step is `total_length / count`, so for a closed outline the last sample stops one step
/// short of the start instead of duplicating it. Input with at most one point is returned
/// unchanged; a zero-length polyline yields `count` copies of its first point.
pub fn resample(points: &[Point], count: usize) -> Vec<Point> {
    if points.len() <= 1 {
        return points.to_vec();
    }

    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    let mut total = 0.0;
    for w in points.windows(2) {
        total += w[0].distance(w[1]);
        cumulative.push(total);
    }

    let step = total / count as f64;
    let last = points[points.len() - 1];
    let mut out = Vec::with_capacity(count);
    let mut seg = 1;
    for k in 0..count {
        let target = step * k as f64;
        while seg < cumulative.len() && cumulative[seg] < target {
            seg += 1;
        }
        if seg >= cumulative.len() {
            out.push(last);
            continue;
        }

        let d0 = cumulative[seg - 1];
        let d1 = cumulative[seg];
        let t = if d1 == d0 {
            0.0
        } else {
            (target - d0) / (d1 - d0)
        };
        out.push(points[seg - 1].lerp(points[seg], t));
    }

    out
}

/// Apply `passes` rounds of a 3-point moving average.
///
/// The first and last points stay fixed; sequences with at most two points are unchanged.
pub fn smooth(points: &[Point], passes: usize) -> Vec<Point> {
    let mut current = points.to_vec();
    if current.len() <= 2 {
        return current;
    }

    for _ in 0..passes {
        let mut next = current.clone();
        for i in 1..current.len() - 1 {
            let sum = current[i - 1].to_vec2() + current[i].to_vec2() + current[i + 1].to_vec2();
            next[i] = (sum / 3.0).to_point();
        }
        current = next;
    }

    current
}

/// Center a pose authored in `view_box` inside the shared `reference` frame.
pub fn normalize(points: &[Point], view_box: Size, reference: Size) -> Vec<Point> {
    let offset = Vec2::new(
        (reference.width - view_box.width) / 2.0,
        (reference.height - view_box.height) / 2.0,
    );
    points.iter().map(|p| *p + offset).collect()
}

fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u) + p1.to_vec2() * (2.0 * u * t) + p2.to_vec2() * (t * t);
    v.to_point()
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u * u)
        + p1.to_vec2() * (3.0 * u * u * t)
        + p2.to_vec2() * (3.0 * u * t * t)
        + p3.to_vec2() * (t * t * t);
    v.to_point()
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sampler.rs"]
mod tests;
