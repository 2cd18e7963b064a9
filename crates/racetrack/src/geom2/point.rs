use nalgebra::Vector2;
use rand::Rng;
use std::f64::consts::PI;
use std::fmt;

/// Fold an angle that left (−π, π] by at most one turn back into it.
#[inline]
pub fn non_reflex(angle: f64) -> f64 {
    if angle < -PI {
        2.0 * PI + angle
    } else if angle > PI {
        angle - 2.0 * PI
    } else {
        angle
    }
}

/// Round to the nearest integer, ties toward +∞.
#[inline]
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// A point in 2D space. Equality is exact coordinate equality.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (self.to_vec2() - other.to_vec2()).norm()
    }

    /// Angle of the ray from `self` to `other` against the horizontal axis.
    #[inline]
    pub fn angle(&self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// `angle` folded with `non_reflex`.
    #[inline]
    pub fn angle_non_reflex(&self, other: Point) -> f64 {
        non_reflex(self.angle(other))
    }

    /// Turn at `self` from the ray towards `prev` to the ray towards `next`, in [0, 2π).
    #[inline]
    pub fn angle_between(&self, prev: Point, next: Point) -> f64 {
        (self.angle(next) - self.angle(prev) + 2.0 * PI) % (2.0 * PI)
    }

    /// Whether `self` lies in the triangle `(t1, t2, t3)`.
    ///
    /// Angular containment, not barycentric: at every corner the ray towards
    /// `self` must not open wider from the ray to the previous corner than the
    /// ray to the next corner does. Boundary points count as enclosed.
    pub fn is_enclosed(&self, t1: Point, t2: Point, t3: Point) -> bool {
        let triangle = [t1, t2, t3];
        (0..3).all(|i| {
            let t = triangle[i];
            let tp = triangle[(i + 2) % 3];
            let tn = triangle[(i + 1) % 3];
            let ap = t.angle_non_reflex(tp);
            let an = t.angle_non_reflex(tn);
            let at = t.angle_non_reflex(*self);
            non_reflex(ap - an).abs() >= non_reflex(ap - at).abs()
        })
    }

    pub fn round(&self) -> Point {
        Point::new(round_half_up(self.x), round_half_up(self.y))
    }

    /// Random integer point in `[-space_x, space_x] × [-space_y, space_y]`.
    pub fn random_in<R: Rng + ?Sized>(rng: &mut R, space_x: f64, space_y: f64) -> Point {
        let x = round_half_up(rng.gen::<f64>() * 2.0 * space_x - space_x);
        let y = round_half_up(rng.gen::<f64>() * 2.0 * space_y - space_y);
        Point::new(x, y)
    }

    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Point> for Vector2<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_vec2()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: {} y: {}", self.x, self.y)
    }
}
