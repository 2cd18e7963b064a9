//! Connected chains of vectors.
//!
//! - `Chain`: the capability shared by open routes and closed loops: element
//!   access, nearest-element queries, corner spacing and path export.
//! - `Route`: the open variant. Its only invariant is that every vector ends
//!   where the next one starts.
//!
//! Vectors are stored by value; a corner shared by two vectors is moved with
//! `move_vertex`, which rewrites both in one `&mut` step.

use crate::error::{GeometryError, Verbosity};
use crate::geom2::{Point, Vector};

/// Result of a nearest-vector query against one chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Closest {
    pub vector: Vector,
    pub distance: f64,
    pub index: usize,
    pub point: Point,
}

/// Result of a nearest-pair query between two chains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClosestPair {
    pub distance: f64,
    /// Vector of the queried chain whose end point realizes the minimum.
    pub vector: Vector,
    /// Vector of the other chain closest to that end point.
    pub other_vector: Vector,
    pub index: usize,
    pub other_index: usize,
}

/// An ordered sequence of vectors, each ending where the next starts.
pub trait Chain {
    fn vectors(&self) -> &[Vector];

    #[inline]
    fn len(&self) -> usize {
        self.vectors().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.vectors().is_empty()
    }

    /// Wrap a (possibly negative) index into `0..len`; `0` for an empty chain.
    #[inline]
    fn circular(&self, i: isize) -> usize {
        match self.len() {
            0 => 0,
            n => i.rem_euclid(n as isize) as usize,
        }
    }

    /// Vertex sequence: the end point of every vector, in order.
    fn points(&self) -> Vec<Point> {
        self.vectors().iter().map(Vector::end).collect()
    }

    /// First vector at strictly minimal distance from `point`.
    fn get_closest(&self, point: Point) -> Option<Closest> {
        let mut best: Option<(usize, f64)> = None;
        for (i, vector) in self.vectors().iter().enumerate() {
            let d = vector.get_distance_from(point);
            if best.map_or(true, |(_, min)| d < min) {
                best = Some((i, d));
            }
        }
        best.map(|(index, distance)| {
            let vector = self.vectors()[index];
            Closest {
                vector,
                distance,
                index,
                point: vector.get_closest(point),
            }
        })
    }

    /// Minimum over this chain's vertices of the distance to `other`.
    fn get_closest_from<C: Chain + ?Sized>(&self, other: &C) -> Option<ClosestPair> {
        let mut best: Option<ClosestPair> = None;
        for (i, vector) in self.vectors().iter().enumerate() {
            let Some(hit) = other.get_closest(vector.end()) else {
                continue;
            };
            if best.map_or(true, |b| hit.distance < b.distance) {
                best = Some(ClosestPair {
                    distance: hit.distance,
                    vector: *vector,
                    other_vector: hit.vector,
                    index: i,
                    other_index: hit.index,
                });
            }
        }
        best
    }

    /// Smallest distance between a vector's start and the end points of the
    /// following `len - 1` vectors, scanned circularly. `+∞` if there are none.
    fn min_distance(&self) -> f64 {
        let vectors = self.vectors();
        let n = vectors.len();
        let mut min = f64::INFINITY;
        for k in 0..n {
            let start = vectors[k].start();
            for i in 0..n.saturating_sub(1) {
                let d = start.distance(vectors[(i + k) % n].end());
                if d < min {
                    min = d;
                }
            }
        }
        min
    }

    /// SVG-style path data through the chain's corners.
    fn path_data(&self) -> String {
        let mut d = String::new();
        if let Some(first) = self.vectors().first() {
            let p = first.start();
            d.push_str(&format!("M {} {} ", p.x, p.y));
        }
        for v in self.vectors() {
            d.push_str(&format!("L {} {} ", v.end().x, v.end().y));
        }
        d
    }
}

/// Check that every vector ends where its successor starts.
pub(crate) fn check_connected(vectors: &[Vector], verbosity: Verbosity) -> Result<(), GeometryError> {
    for (index, pair) in vectors.windows(2).enumerate() {
        if pair[0].end() != pair[1].start() {
            return Err(verbosity.fail(GeometryError::Disconnected { index }));
        }
    }
    Ok(())
}

/// Open chain of connected vectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    vectors: Vec<Vector>,
}

impl Route {
    pub fn new(vectors: Vec<Vector>) -> Result<Self, GeometryError> {
        let route = Self { vectors };
        route.validate(Verbosity::Report)?;
        Ok(route)
    }

    /// Chain through `points` in order.
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            vectors: points.windows(2).map(|w| Vector::new(w[0], w[1])).collect(),
        }
    }

    pub fn validate(&self, verbosity: Verbosity) -> Result<(), GeometryError> {
        check_connected(&self.vectors, verbosity)
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate(Verbosity::Silent).is_ok()
    }

    /// Replace the whole sequence; on failure the previous sequence is kept.
    pub fn set_vectors(&mut self, vectors: Vec<Vector>) -> Result<(), GeometryError> {
        check_connected(&vectors, Verbosity::Report)?;
        self.vectors = vectors;
        Ok(())
    }

    /// Move the end of vector `i` and the start of vector `i + 1` to `p`.
    ///
    /// # Panics
    /// If `i >= self.len()`, like slice indexing.
    pub fn move_vertex(&mut self, i: usize, p: Point) {
        self.vectors[i].set_end(p);
        if let Some(next) = self.vectors.get_mut(i + 1) {
            next.set_start(p);
        }
    }

    /// Raw access to one vector. Mutating it may disconnect the chain;
    /// `validate` reports that.
    pub fn vector_mut(&mut self, i: usize) -> Option<&mut Vector> {
        self.vectors.get_mut(i)
    }
}

impl Chain for Route {
    #[inline]
    fn vectors(&self) -> &[Vector] {
        &self.vectors
    }
}
