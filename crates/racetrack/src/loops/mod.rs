//! Closed, non-self-intersecting loops.
//!
//! Purpose
//! - `Loop` closes a chain (last end == first start), forbids crossings between
//!   non-adjacent vectors and keeps a canonical winding.
//! - Enclosure for non-convex loops lives in `enclose`; constrained random
//!   generation and perturbation in `rand`.
//!
//! Winding
//! - The turn angle at vertex `i` (end of vector `i`) is measured with
//!   `Point::angle_between`. A vertex is non-reflex when that angle is in [0, π].
//!   If fewer than half the vertices are non-reflex, the sequence and every
//!   vector are reversed. This is a majority vote, not a signed area.

mod enclose;
pub mod rand;

use crate::error::{GeometryError, Verbosity};
use crate::geom2::{Point, Vector};
use crate::route::{check_connected, Chain};
use std::f64::consts::PI;

/// Closed chain of at least three vectors.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    vectors: Vec<Vector>,
}

impl Loop {
    /// Validate `vectors` as a closed loop, then canonicalize the winding.
    pub fn new(vectors: Vec<Vector>) -> Result<Self, GeometryError> {
        let mut lp = Self { vectors };
        lp.validate(Verbosity::Report)?;
        lp.canonicalize();
        Ok(lp)
    }

    /// Loop through `points`, closing back to the first one.
    pub fn from_points(points: &[Point]) -> Result<Self, GeometryError> {
        let n = points.len();
        let vectors = (0..n)
            .map(|i| Vector::new(points[i], points[(i + 1) % n]))
            .collect();
        Self::new(vectors)
    }

    /// Winding is canonicalized but nothing is validated.
    pub(crate) fn from_vectors_unchecked(vectors: Vec<Vector>) -> Self {
        let mut lp = Self { vectors };
        lp.canonicalize();
        lp
    }

    fn canonicalize(&mut self) {
        if self.non_reflex_indexes().len() * 2 < self.vectors.len() {
            self.vectors.reverse();
            for v in &mut self.vectors {
                *v = v.reverse();
            }
        }
    }

    pub fn validate(&self, verbosity: Verbosity) -> Result<(), GeometryError> {
        let n = self.vectors.len();
        if n < 3 {
            return Err(verbosity.fail(GeometryError::TooFewVectors { len: n }));
        }
        check_connected(&self.vectors, verbosity)?;
        if self.vectors[n - 1].end() != self.vectors[0].start() {
            return Err(verbosity.fail(GeometryError::OpenLoop));
        }
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            for j in 0..n {
                if j == i || j == prev || j == next {
                    continue;
                }
                if self.vectors[i].intersects(&self.vectors[j]) {
                    return Err(verbosity.fail(GeometryError::SelfIntersection {
                        first: i,
                        second: j,
                    }));
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate(Verbosity::Silent).is_ok()
    }

    /// Replace the whole sequence; on failure the previous sequence is kept.
    pub fn set_vectors(&mut self, vectors: Vec<Vector>) -> Result<(), GeometryError> {
        *self = Loop::new(vectors)?;
        Ok(())
    }

    /// Move vertex `i` (end of vector `i`, start of the next one) to `p`.
    ///
    /// # Panics
    /// If `i >= self.len()`, like slice indexing.
    pub fn move_vertex(&mut self, i: usize, p: Point) {
        let next = (i + 1) % self.vectors.len();
        self.vectors[i].set_end(p);
        self.vectors[next].set_start(p);
    }

    /// Raw access to one vector. Mutating it may break the loop; `validate`
    /// reports that.
    pub fn vector_mut(&mut self, i: usize) -> Option<&mut Vector> {
        self.vectors.get_mut(i)
    }

    /// `(prev, current, next)` vectors around index `i`.
    pub fn vectors_at(&self, i: usize) -> (Vector, Vector, Vector) {
        let n = self.vectors.len();
        (
            self.vectors[(i + n - 1) % n],
            self.vectors[i],
            self.vectors[(i + 1) % n],
        )
    }

    /// The three points defining the angle at vertex `i`.
    pub fn points_at(&self, i: usize) -> (Point, Point, Point) {
        let (_, vector, next) = self.vectors_at(i);
        (vector.start(), vector.end(), next.end())
    }

    /// Turn angle at the end of vector `i`, in [0, 2π).
    pub fn angle_at(&self, i: usize) -> f64 {
        let (prev, point, next) = self.points_at(i);
        point.angle_between(prev, next)
    }

    pub fn is_non_reflex(&self, i: usize) -> bool {
        let angle = self.angle_at(i);
        (0.0..=PI).contains(&angle)
    }

    pub fn non_reflex_indexes(&self) -> Vec<usize> {
        (0..self.vectors.len())
            .filter(|&i| self.is_non_reflex(i))
            .collect()
    }

    pub fn is_convex(&self) -> bool {
        (0..self.vectors.len()).all(|i| self.is_non_reflex(i))
    }

    pub fn all_angles_greater(&self, angle: f64) -> bool {
        (0..self.vectors.len()).all(|i| self.angle_at(i) >= angle)
    }

    pub fn all_angles_less(&self, angle: f64) -> bool {
        (0..self.vectors.len()).all(|i| self.angle_at(i) <= angle)
    }
}

impl Chain for Loop {
    #[inline]
    fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    /// Starts at the end of the first vector and closes with `z`.
    fn path_data(&self) -> String {
        let mut d = String::new();
        for (i, v) in self.vectors.iter().enumerate() {
            let p = v.end();
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{cmd} {} {} ", p.x, p.y));
        }
        d.push('z');
        d
    }
}
