use super::*;
use std::f64::consts::{FRAC_PI_2, PI};

const P1: Point = Point::new(1.0, 5.0);
const P2: Point = Point::new(2.0, 8.0);
const P3: Point = Point::new(1.0, 3.0);
const P4: Point = Point::new(8.0, 10.0);
const P5: Point = Point::new(-1.0, 4.0);
const P6: Point = Point::new(-3.0, 1.0);
const P7: Point = Point::new(2.0, 3.0);
const P8: Point = Point::new(3.0, -1.0);
const P9: Point = Point::new(-1.0, -5.0);
const P10: Point = Point::new(-6.0, -4.0);
const P11: Point = Point::new(-5.0, 6.0);
const P12: Point = Point::new(-7.0, -7.0);
const P13: Point = Point::new(-3.0, -7.0);

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn point_distance_fixtures() {
    assert!(close(P1.distance(P2), 3.1622776601683795));
    assert_eq!(P1.distance(P2), P2.distance(P1));
    assert!(close(P1.distance(P3), 2.0));
    assert!(close(P1.distance(P4), 8.602325267042627));
    assert!(close(P1.distance(P5), 2.23606797749979));
    assert!(close(P1.distance(P6), 5.656854249492381));
    assert!(close(P1.distance(P7), 2.23606797749979));
}

#[test]
fn point_angle_fixtures() {
    assert!(close(P1.angle(P2), 1.2490457723982544));
    assert!(close(P1.angle(P2) - P2.angle(P1), PI));
    assert_eq!(P1.angle(P3), -FRAC_PI_2);
    assert!(close(P1.angle(P4), 0.6202494859828215));
    assert!(close(P1.angle(P5), -2.677945044588987));
    assert!(close(P1.angle(P6), -2.356194490192345));
    assert!(close(P1.angle(P7), -1.1071487177940904));
}

#[test]
fn non_reflex_folds_one_turn() {
    assert!(close(non_reflex(1.5 * PI), -0.5 * PI));
    assert!(close(non_reflex(-1.5 * PI), 0.5 * PI));
    assert_eq!(non_reflex(PI), PI);
    assert_eq!(non_reflex(0.3), 0.3);
}

#[test]
fn angle_between_is_the_turn_in_zero_two_pi() {
    let o = Point::new(0.0, 0.0);
    let east = Point::new(1.0, 0.0);
    let north = Point::new(0.0, 1.0);
    assert!(close(o.angle_between(east, north), FRAC_PI_2));
    assert!(close(o.angle_between(north, east), 1.5 * PI));
}

#[test]
fn point_in_triangle_angular() {
    assert!(P5.is_enclosed(P11, P9, P4));
    assert!(P2.is_enclosed(P11, P10, P4));
    assert!(Point::new(2.0, 2.0).is_enclosed(
        Point::new(0.0, 0.0),
        Point::new(1.0, 4.0),
        Point::new(5.0, 1.0)
    ));
    assert!(!P8.is_enclosed(P11, P10, P4));
    // Corners count as inside.
    assert!(P11.is_enclosed(P11, P10, P4));
}

#[test]
fn rounding_is_half_up() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(-2.6), -3.0);
    assert_eq!(Point::new(0.4, -0.6).round(), Point::new(0.0, -1.0));
}

#[test]
fn vector_intersection_fixtures() {
    let l1 = Vector::new(P1, P2);
    let l3 = Vector::new(P1, P7);
    let l4 = Vector::new(P5, P4);
    let l6 = Vector::new(P6, P8);
    let l9 = Vector::new(P6, P2);
    let l10 = Vector::new(P3, P5);
    let l13 = Vector::new(P9, P10);
    let l14 = Vector::new(P10, P11);
    let l17 = Vector::new(P12, P6);
    let l18 = Vector::new(P6, P13);

    assert!(l1.intersects(&l4));
    assert!(l4.intersects(&l1));
    assert!(l13.intersects(&l17));
    assert!(l13.intersects(&l18));
    assert!(l17.intersects(&l13));
    assert!(l18.intersects(&l13));
    assert!(l6.intersects(&l9));
    assert!(l9.intersects(&l6));
    assert!(!l9.intersects(&l14));
    assert!(!l3.intersects(&l4));
    assert!(!l10.intersects(&l3));
}

#[test]
fn parallel_and_touching_segments() {
    let a = Vector::new(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
    let b = Vector::new(Point::new(0.0, 1.0), Point::new(4.0, 3.0));
    assert!(!a.intersects(&b));
    let up = Vector::new(Point::new(0.0, 0.0), Point::new(0.0, 5.0));
    let down = Vector::new(Point::new(1.0, 5.0), Point::new(1.0, 0.0));
    assert!(!up.intersects(&down));
    // Shared endpoint registers as a crossing.
    let c = Vector::new(Point::new(4.0, 2.0), Point::new(6.0, -1.0));
    assert!(a.intersects(&c));
    let dot = Vector::new(Point::new(2.0, 1.0), Point::new(2.0, 1.0));
    assert!(!a.intersects(&dot));
}

#[test]
fn reverse_twice_is_identity() {
    let v = Vector::new(P1, P4);
    let r = v.reverse();
    assert_eq!(r.start(), P4);
    assert_eq!(r.end(), P1);
    assert_eq!(r.reverse(), v);
    assert_eq!(r.reverse().distance(), v.distance());
    assert_eq!(r.reverse().angle(), v.angle());
}

#[test]
fn mutators_keep_quadruple_consistent() {
    let mut v = Vector::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    assert!(close(v.distance(), 5.0));
    v.set_angle(FRAC_PI_2);
    assert!(v.end().x.abs() < 1e-12 && close(v.end().y, 5.0));
    v.set_distance(2.0);
    assert!(v.end().x.abs() < 1e-12 && close(v.end().y, 2.0));
    v.set_start(Point::new(0.0, 4.0));
    assert!(close(v.distance(), v.start().distance(v.end())));
    assert!(close(v.angle(), -FRAC_PI_2));
    v.set_end(Point::new(3.0, 4.0));
    assert!(close(v.distance(), 3.0));
    assert_eq!(v.angle(), 0.0);
}

#[test]
fn change_angle_by_folds_into_a_half_turn() {
    let mut v = Vector::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
    v.change_angle_by(0.5);
    assert!(close(v.angle(), FRAC_PI_2));
    assert!(v.end().x.abs() < 1e-12 && close(v.end().y, 1.0));
    v.change_angle_by(0.75);
    assert!(close(v.angle(), PI / 4.0));
    assert!(close(v.distance(), 1.0));
}

#[test]
fn closest_point_on_segment() {
    let sloped = Vector::new(Point::new(0.0, 0.0), Point::new(4.0, 4.0));
    let c = sloped.get_closest(Point::new(0.0, 4.0));
    assert!(close(c.x, 2.0) && close(c.y, 2.0));
    assert!(close(sloped.get_distance_from(Point::new(0.0, 4.0)), 8f64.sqrt()));
    // Beyond the end: clamped to the endpoint.
    assert_eq!(sloped.get_closest(Point::new(10.0, 9.0)), Point::new(4.0, 4.0));
    assert_eq!(sloped.get_closest(Point::new(-3.0, -1.0)), Point::new(0.0, 0.0));

    let flat = Vector::new(Point::new(5.0, 1.0), Point::new(-5.0, 1.0));
    assert_eq!(flat.get_closest(Point::new(2.0, 7.0)), Point::new(2.0, 1.0));
    assert_eq!(flat.get_closest(Point::new(9.0, 7.0)), Point::new(5.0, 1.0));

    let vertical = Vector::new(Point::new(2.0, 0.0), Point::new(2.0, 6.0));
    assert_eq!(vertical.get_closest(Point::new(7.0, 3.0)), Point::new(2.0, 3.0));
    assert!(close(vertical.get_distance_from(Point::new(7.0, 3.0)), 5.0));
}

#[test]
fn slope_and_offset() {
    let v = Vector::new(Point::new(3.0, 7.0), Point::new(1.0, 3.0));
    assert_eq!(v.ordered_points().0, Point::new(1.0, 3.0));
    assert!(close(v.slope(), 2.0));
    assert!(close(v.offset(), 1.0));
    let vertical = Vector::new(Point::new(2.0, 0.0), Point::new(2.0, -6.0));
    assert_eq!(vertical.slope(), f64::INFINITY);
    assert_eq!(vertical.offset(), 0.0);
}

#[test]
fn random_points_stay_in_space_and_are_integral() {
    use rand::{rngs::StdRng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..100 {
        let v = Vector::random_in(&mut rng, 50.0, 20.0);
        for p in [v.start(), v.end()] {
            assert!(p.x.abs() <= 50.0 && p.y.abs() <= 20.0);
            assert_eq!(p.x.fract(), 0.0);
            assert_eq!(p.y.fract(), 0.0);
        }
    }
}
