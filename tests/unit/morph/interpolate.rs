use super::*;
use crate::shapes::library::build_pose_shapes;
use crate::shapes::profile::StyleProfile;

fn shapes() -> PoseShapes {
    build_pose_shapes(&StyleProfile::V1)
}

#[test]
fn keyframe_boundaries_are_exact() {
    let s = shapes();
    assert_eq!(shape_at(0.0, &s), s.open);
    assert_eq!(shape_at(1.0, &s), s.sore);
    assert_eq!(shape_at(2.0, &s), s.closed);
}

#[test]
fn out_of_range_progress_is_clamped() {
    let s = shapes();
    assert_eq!(shape_at(-3.0, &s), s.open);
    assert_eq!(shape_at(9.0, &s), s.closed);
    assert_eq!(shape_at(f64::NAN, &s), s.open);
}

#[test]
fn segment_rule_splits_below_one() {
    let below = segment_for(0.999);
    assert_eq!((below.from, below.to), (Pose::Open, Pose::Sore));
    let at = segment_for(1.0);
    assert_eq!((at.from, at.to, at.t), (Pose::Sore, Pose::Closed, 0.0));
    let above = segment_for(1.25);
    assert_eq!(above.t, 0.25);
}

#[test]
fn blend_moves_monotonically_without_overshoot() {
    let s = shapes();
    for i in [0, 17, 70, 139] {
        for (lo, hi, a, b) in [
            (0.0, 1.0, &s.open, &s.sore),
            (1.0, 2.0, &s.sore, &s.closed),
        ] {
            let start = a.points()[i];
            let end = b.points()[i];
            let total = start.distance(end);
            let mut last = 0.0;
            for step in 0..=20 {
                let p = lo + (hi - lo) * step as f64 / 20.0;
                let q = shape_at(p, &s).points()[i];
                let along = start.distance(q);
                assert!(along + 1e-9 >= last, "index {i} moved backwards at {p}");
                assert!(along <= total + 1e-9, "index {i} overshot at {p}");
                // Stays on the straight line between keyframes.
                assert!((along + q.distance(end) - total).abs() < 1e-9);
                last = along;
            }
        }
    }
}

#[test]
#[should_panic(expected = "identical sample counts")]
fn blend_rejects_mismatched_lengths() {
    let a = SampledShape::new(vec![Point::new(0.0, 0.0); 3]);
    let b = SampledShape::new(vec![Point::new(0.0, 0.0); 4]);
    let _ = blend(&a, &b, 0.5);
}

#[test]
fn normalize_width_fits_and_centers() {
    let s = SampledShape::new(vec![
        Point::new(5.0, 1.0),
        Point::new(25.0, 2.0),
        Point::new(15.0, 3.0),
    ]);
    let out = normalize_width(&s, 40.0);
    assert_eq!(out.points()[0], Point::new(0.0, 1.0));
    assert_eq!(out.points()[1], Point::new(40.0, 2.0));
    assert_eq!(out.points()[2], Point::new(20.0, 3.0));
}

#[test]
fn normalize_width_leaves_degenerate_shapes_alone() {
    let vertical = SampledShape::new(vec![Point::new(3.0, 0.0), Point::new(3.0, 9.0)]);
    assert_eq!(normalize_width(&vertical, 40.0), vertical);
    assert!(normalize_width(&SampledShape::default(), 40.0).is_empty());
}
