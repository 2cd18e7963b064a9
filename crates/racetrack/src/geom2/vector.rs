use rand::Rng;
use std::f64::consts::PI;
use std::fmt;

use super::Point;

/// Line through a segment as `y = a·x + b`, with the cases where that form breaks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line {
    /// Zero-length segment.
    Degenerate,
    /// Infinite slope; the line is `x = x`.
    Vertical { x: f64 },
    Sloped { a: f64, b: f64 },
}

/// Oriented segment `start → end` with cached `distance` and `angle`.
///
/// Invariant: `end == start + distance·(cos angle, sin angle)` up to rounding,
/// after every mutator. Setting an endpoint recomputes `(distance, angle)`;
/// setting `distance` or `angle` recomputes `end`.
#[derive(Clone, Copy, Debug)]
pub struct Vector {
    start: Point,
    end: Point,
    distance: f64,
    angle: f64,
}

impl Vector {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            distance: start.distance(end),
            angle: start.angle(end),
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }
    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance
    }
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Move the start, keeping the end.
    pub fn set_start(&mut self, start: Point) {
        self.start = start;
        self.distance = start.distance(self.end);
        self.angle = start.angle(self.end);
    }

    /// Move the end, keeping the start.
    pub fn set_end(&mut self, end: Point) {
        self.end = end;
        self.distance = self.start.distance(end);
        self.angle = self.start.angle(end);
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
        self.end = self.calc_end();
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.end = self.calc_end();
    }

    /// Rotate by `pc` half-turns, folded into one half-turn.
    pub fn change_angle_by(&mut self, pc: f64) {
        self.set_angle((self.angle + pc * PI) % PI);
    }

    fn calc_end(&self) -> Point {
        Point::new(
            self.start.x + self.distance * self.angle.cos(),
            self.start.y + self.distance * self.angle.sin(),
        )
    }

    /// Same segment, opposite orientation.
    pub fn reverse(&self) -> Vector {
        Vector::new(self.end, self.start)
    }

    /// Endpoints ordered by smaller `x` first (start first on ties).
    pub fn ordered_points(&self) -> (Point, Point) {
        if self.start.x <= self.end.x {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    pub fn line(&self) -> Line {
        let (p1, p2) = self.ordered_points();
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        if dx == 0.0 && dy == 0.0 {
            Line::Degenerate
        } else if dx == 0.0 {
            Line::Vertical { x: self.start.x }
        } else {
            let a = dy / dx;
            Line::Sloped {
                a,
                b: self.start.y - a * self.start.x,
            }
        }
    }

    /// Slope `a` of `y = a·x + b`; `+∞` for vertical and zero-length segments.
    pub fn slope(&self) -> f64 {
        match self.line() {
            Line::Sloped { a, .. } => a,
            _ => f64::INFINITY,
        }
    }

    /// Offset `b` of `y = a·x + b`; the start's `y` when the slope is infinite.
    pub fn offset(&self) -> f64 {
        match self.line() {
            Line::Sloped { b, .. } => b,
            _ => self.start.y,
        }
    }

    #[inline]
    fn spans_x(&self, x: f64) -> bool {
        (self.start.x <= x && x <= self.end.x) || (self.end.x <= x && x <= self.start.x)
    }

    /// Whether the two segments cross.
    ///
    /// Solves the two line equations for the crossing `x` and requires it to
    /// lie in both segments' x-ranges, endpoints included. Consequences:
    /// - parallel segments (equal slopes, or both vertical) never intersect;
    /// - zero-length segments never intersect;
    /// - segments touching at an endpoint do intersect, so callers exempt
    ///   neighbours themselves;
    /// - a vertical segment is tested by its `x` alone.
    pub fn intersects(&self, other: &Vector) -> bool {
        if self.angle == other.angle {
            return false;
        }
        let xi = match (self.line(), other.line()) {
            (Line::Degenerate, _) | (_, Line::Degenerate) => return false,
            (Line::Vertical { .. }, Line::Vertical { .. }) => return false,
            (Line::Vertical { x }, Line::Sloped { .. }) => x,
            (Line::Sloped { .. }, Line::Vertical { x }) => x,
            (Line::Sloped { a: a1, b: b1 }, Line::Sloped { a: a2, b: b2 }) => {
                if a1 == a2 {
                    return false;
                }
                (b1 - b2) / (a2 - a1)
            }
        };
        self.spans_x(xi) && other.spans_x(xi)
    }

    /// Foot of the perpendicular from `point` onto the segment's infinite line.
    pub fn line_closest(&self, point: Point) -> Point {
        match self.line() {
            Line::Degenerate => self.start,
            Line::Vertical { x } => Point::new(x, point.y),
            Line::Sloped { a, b } if a == 0.0 => Point::new(point.x, b),
            Line::Sloped { a, b } => {
                let o_slope = -1.0 / a;
                let o_offset = point.y - o_slope * point.x;
                let ix = (o_offset - b) / (a - o_slope);
                Point::new(ix, a * ix + b)
            }
        }
    }

    /// Point of the segment closest to `point`: the projection clamped to the x-range.
    pub fn get_closest(&self, point: Point) -> Point {
        let line_closest = self.line_closest(point);
        let (p1, p2) = self.ordered_points();
        if line_closest.x < p1.x {
            p1
        } else if line_closest.x > p2.x {
            p2
        } else {
            line_closest
        }
    }

    #[inline]
    pub fn get_distance_from(&self, point: Point) -> f64 {
        point.distance(self.get_closest(point))
    }

    pub fn random_in<R: Rng + ?Sized>(rng: &mut R, space_x: f64, space_y: f64) -> Vector {
        let start = Point::random_in(rng, space_x, space_y);
        let end = Point::random_in(rng, space_x, space_y);
        Vector::new(start, end)
    }
}

/// Value equality on the endpoints; `distance`/`angle` follow from them.
impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start: {} end: {} distance: {} angle: {}",
            self.start, self.end, self.distance, self.angle
        )
    }
}
