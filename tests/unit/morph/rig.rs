use super::*;
use crate::animation::timeline::PlaybackState;
use crate::shapes::profile::StyleProfile;

fn frame(morph: f64, sore_morph: f64, sore_active: bool) -> BlinkFrame {
    BlinkFrame {
        state: PlaybackState::Closing,
        morph,
        sore_morph,
        sore_active,
        opacity: 1.0,
        scale: 1.0,
        offset_y: 0.0,
    }
}

fn lib() -> Arc<ShapeLibrary> {
    Arc::new(ShapeLibrary::new())
}

#[test]
fn three_pose_follows_blink_morph() {
    let library = lib();
    let rig = EyeRig::new(Arc::clone(&library), EyeStyle::V1);
    assert_eq!(rig.policy(), MorphPolicy::ThreePose);

    let shapes = library.shapes_for(&StyleProfile::V1);
    assert_eq!(
        rig.geometry(&frame(2.0, 0.0, false)),
        EyeGeometry::Polygon(shapes.closed.clone())
    );
    assert_eq!(
        rig.geometry(&frame(0.0, 0.0, false)),
        EyeGeometry::Polygon(shapes.open.clone())
    );
}

#[test]
fn three_pose_uses_sore_morph_while_sore_active() {
    let library = lib();
    let rig = EyeRig::new(Arc::clone(&library), EyeStyle::V1);
    let shapes = library.shapes_for(&StyleProfile::V1);
    assert_eq!(
        rig.geometry(&frame(2.0, 1.0, true)),
        EyeGeometry::Polygon(shapes.sore.clone())
    );
}

#[test]
fn two_pose_squishes_pill_with_morph() {
    let rig = EyeRig::new(lib(), EyeStyle::V2);

    let EyeGeometry::Pill(open) = rig.geometry(&frame(0.0, 0.0, false)) else {
        panic!("expected pill");
    };
    assert_eq!(open.rect(), Rect::new(0.0, 0.0, 40.0, 60.0));
    assert_eq!(open.radii().top_left, 20.0);

    let EyeGeometry::Pill(closed) = rig.geometry(&frame(2.0, 0.0, false)) else {
        panic!("expected pill");
    };
    let r = closed.rect();
    assert!((r.height() - 4.0).abs() < 1e-9);
    assert!((r.center().y - 30.0).abs() < 1e-9);
    assert!((closed.radii().top_left - 2.0).abs() < 1e-9);

    let EyeGeometry::Pill(half) = rig.geometry(&frame(1.0, 0.0, false)) else {
        panic!("expected pill");
    };
    assert!((half.rect().height() - 32.0).abs() < 1e-9);
}

#[test]
fn two_pose_layers_overlay_while_sore() {
    let rig = EyeRig::new(lib(), EyeStyle::V2);
    let EyeGeometry::Layered { morph, overlay } = rig.geometry(&frame(0.0, 0.5, true)) else {
        panic!("expected layered geometry");
    };
    assert_eq!(morph.len(), StyleProfile::V2_HIGH.sample_count);
    assert_eq!(overlay.rect(), Rect::new(0.0, 25.0, 40.0, 35.0));
    assert_eq!(overlay.radii().top_left, 4.0);
}

#[test]
fn pair_mirrors_second_eye() {
    let rig = EyeRig::new(lib(), EyeStyle::V1);
    let [left, right] = rig.pair(&frame(0.5, 0.0, false));

    let (EyeGeometry::Polygon(l), EyeGeometry::Polygon(r)) = (&left, &right) else {
        panic!("expected polygons");
    };
    assert_eq!(l.len(), r.len());
    for (a, b) in l.points().iter().zip(r.points()) {
        assert!((a.x + b.x - 38.0).abs() < 1e-9);
        assert_eq!(a.y, b.y);
    }

    let pill = EyeGeometry::Pill(RoundedRect::new(2.0, 10.0, 12.0, 20.0, 3.0));
    let EyeGeometry::Pill(m) = pill.mirrored(40.0) else {
        panic!("expected pill");
    };
    assert_eq!(m.rect(), Rect::new(28.0, 10.0, 38.0, 20.0));
}

#[test]
fn bez_path_contains_every_layer() {
    let rig = EyeRig::new(lib(), EyeStyle::V2);
    let layered = rig.geometry(&frame(0.0, 1.0, true)).to_bez_path();
    let closes = layered
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::ClosePath))
        .count();
    assert_eq!(closes, 2);
}
