use floaters_core::collision::{resolve_pair, resolve_pairs, resolve_walls};
use floaters_core::*;
use glam::Vec3;

fn bounds() -> Bounds {
    Bounds::from_view(5.0, 80.0, Viewport::new(1600.0, 900.0))
}

#[test]
fn wall_hit_from_rest_still_bounces() {
    let b = bounds();
    let params = PhysicsParams::default();
    let mut obj = ObjectState::at_rest(Vec3::new(b.right + 1.0, 0.0, 1.0), 0.5);
    assert!(resolve_walls(&mut obj, &b, &params));
    assert!((obj.position.x - (b.right - 0.5)).abs() < 1e-6);
    assert_eq!(obj.velocity.x, -0.5);
    assert_eq!(obj.velocity.y, 0.0);
    assert_eq!(obj.velocity.z, 0.0);
}

#[test]
fn wall_bounce_always_points_inward() {
    let b = bounds();
    let params = PhysicsParams::default();
    // moving further into the left wall
    let mut obj = ObjectState::at_rest(Vec3::new(b.left, 0.0, 1.2), 0.5);
    obj.velocity.x = -2.0;
    resolve_walls(&mut obj, &b, &params);
    assert!((obj.velocity.x - 1.6).abs() < 1e-6);

    // already moving away from the back wall still gets turned around
    let mut obj = ObjectState::at_rest(Vec3::new(0.0, 0.0, 3.0), 0.5);
    obj.velocity.z = 0.2;
    resolve_walls(&mut obj, &b, &params);
    assert_eq!(obj.position.z, DEPTH_BACK - 0.5);
    assert_eq!(obj.velocity.z, -0.5);
}

#[test]
fn walls_leave_interior_objects_alone() {
    let b = bounds();
    let params = PhysicsParams::default();
    let mut obj = ObjectState::at_rest(Vec3::new(0.3, -0.4, 1.25), 0.5);
    obj.velocity = Vec3::new(0.1, 0.2, -0.1);
    let before = obj.clone();
    assert!(!resolve_walls(&mut obj, &b, &params));
    assert_eq!(obj, before);
}

#[test]
fn walls_clamp_every_axis_inside_padded_box() {
    let b = bounds();
    let params = PhysicsParams::default();
    let r = 0.5;
    for xi in -10..=10 {
        for yi in -10..=10 {
            for zi in -4..=6 {
                let p = Vec3::new(xi as f32, yi as f32 * 0.6, zi as f32 * 0.4);
                let mut obj = ObjectState::at_rest(p, r);
                resolve_walls(&mut obj, &b, &params);
                for axis in 0..3 {
                    let (min, max) = b.axis(axis);
                    let v = obj.position[axis];
                    assert!(v >= min + r - 1e-5 && v <= max - r + 1e-5, "axis {axis} at {p:?} -> {v}");
                }
            }
        }
    }
}

#[test]
fn overlapping_pair_separates_fully_in_one_pass() {
    let params = PhysicsParams::default();
    let mut a = ObjectState::at_rest(Vec3::new(0.0, 0.0, 1.0), 0.5);
    let mut b = ObjectState::at_rest(Vec3::new(0.4, 0.0, 1.0), 0.5);
    let overlap = resolve_pair(&mut a, &mut b, &params).unwrap();
    assert!((overlap - 0.6).abs() < 1e-6);
    assert!((a.position.distance(b.position) - 1.0).abs() < 1e-5);
    // equal and opposite impulse along the contact normal
    assert!((a.velocity.x + 0.48).abs() < 1e-5);
    assert!((b.velocity.x - 0.48).abs() < 1e-5);
    assert_eq!(a.velocity + b.velocity, Vec3::ZERO);
}

#[test]
fn coincident_pair_is_skipped() {
    let params = PhysicsParams::default();
    let mut a = ObjectState::at_rest(Vec3::new(1.0, 1.0, 1.0), 0.5);
    let mut b = ObjectState::at_rest(Vec3::new(1.0, 1.0, 1.005), 0.5);
    assert!(resolve_pair(&mut a, &mut b, &params).is_none());
    assert_eq!(a.position, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(b.velocity, Vec3::ZERO);
}

#[test]
fn separated_pair_is_untouched() {
    let params = PhysicsParams::default();
    let mut a = ObjectState::at_rest(Vec3::new(0.0, 0.0, 1.0), 0.5);
    let mut b = ObjectState::at_rest(Vec3::new(0.0, 1.0, 1.0), 0.5);
    assert!(resolve_pair(&mut a, &mut b, &params).is_none());
}

#[test]
fn pairs_resolve_in_fixed_order_and_end_separated() {
    let params = PhysicsParams::default();
    let mut objs = vec![
        ObjectState::at_rest(Vec3::new(0.0, 0.0, 1.2), 0.5),
        ObjectState::at_rest(Vec3::new(0.5, 0.0, 1.2), 0.5),
        ObjectState::at_rest(Vec3::new(3.0, 0.0, 1.2), 0.5),
    ];
    let contacts = resolve_pairs(&mut objs, &params);
    assert_eq!(contacts.len(), 1);
    assert_eq!((contacts[0].a, contacts[0].b), (SpriteId(0), SpriteId(1)));
    for i in 0..objs.len() {
        for j in (i + 1)..objs.len() {
            let d = objs[i].position.distance(objs[j].position);
            assert!(d >= 1.0 - 1e-4, "{i}-{j} at {d}");
        }
    }
}
