use glam::DVec3;

use crate::physics::bounding_box::BoundingBox;
use crate::physics::{circles_overlap_xz, project_onto, rotate_about_y};

#[test]
fn circle_overlap_ignores_height() {
    let a = DVec3::new(0.0, 100.0, 0.0);
    let b = DVec3::new(3.0, -50.0, 4.0); // 5 apart on the track plane

    assert!(circles_overlap_xz(a, 3.0, b, 3.0));
    assert!(!circles_overlap_xz(a, 2.0, b, 2.0));
}

#[test]
fn touching_circles_count_as_overlapping() {
    let a = DVec3::ZERO;
    let b = DVec3::new(6.0, 0.0, 0.0);
    assert!(circles_overlap_xz(a, 3.0, b, 3.0));
}

#[test]
fn bounding_boxes_overlap_and_separate() {
    let a = BoundingBox::new(-5.0, 5.0, -5.0, 5.0, -5.0, 5.0);
    let b = BoundingBox::from_center_halflength(DVec3::new(6.0, 0.0, 0.0), DVec3::splat(2.0));
    let c = BoundingBox::from_center_halflength(DVec3::new(20.0, 0.0, 0.0), DVec3::splat(2.0));

    assert!(a.collides_with(&b));
    assert!(b.collides_with(&a));
    assert!(!a.collides_with(&c));
}

#[test]
fn bounding_box_center_round_trips() {
    let center = DVec3::new(3.0, -1.0, 7.5);
    let bounds = BoundingBox::from_center_halflength(center, DVec3::new(1.0, 2.0, 3.0));
    assert!(bounds.pos().abs_diff_eq(center, 1e-12));
}

#[test]
fn projection_matches_the_formula() {
    // proj of u onto the x axis keeps only the x component
    let u = DVec3::new(3.0, 4.0, 5.0);
    let v = DVec3::new(2.0, 0.0, 0.0);
    assert!(project_onto(u, v).abs_diff_eq(DVec3::new(3.0, 0.0, 0.0), 1e-12));

    // projecting a vector onto itself is the identity
    let w = DVec3::new(1.0, -2.0, 2.0);
    assert!(project_onto(w, w).abs_diff_eq(w, 1e-12));
}

#[test]
fn quarter_turn_about_y() {
    let east = DVec3::X;
    let turned = rotate_about_y(east, std::f64::consts::FRAC_PI_2);
    assert!(turned.abs_diff_eq(DVec3::Z, 1e-12));

    let back = rotate_about_y(turned, -std::f64::consts::FRAC_PI_2);
    assert!(back.abs_diff_eq(east, 1e-12));
}
