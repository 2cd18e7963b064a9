//! Point enclosure for loops that may be non-convex.
//!
//! 1. Fan-triangulate the non-reflex vertices from an anchor (the first
//!    non-reflex vertex). Outside every fan triangle means outside the loop.
//! 2. Every maximal run of reflex vertices, plus a chord joining the two
//!    non-reflex vertices around it, forms an exclusion loop: a concave notch.
//!    A point enclosed by any notch is outside the loop. Notches are tested
//!    recursively with the same algorithm.

use super::Loop;
use crate::geom2::{Point, Vector};
use crate::route::Chain;

impl Loop {
    /// Whether `point` is inside the loop (boundary points count as inside).
    pub fn encloses(&self, point: Point) -> bool {
        let n = self.len();
        let non_reflex: Vec<bool> = (0..n).map(|i| self.is_non_reflex(i)).collect();
        let Some(first) = non_reflex.iter().position(|&nr| nr) else {
            return false;
        };
        let vectors = self.vectors();
        let anchor = vectors[first].end();

        let in_fan = (0..n).filter(|&i| non_reflex[i]).any(|i| {
            let v = vectors[i];
            v.start() != anchor && v.end() != anchor && point.is_enclosed(anchor, v.start(), v.end())
        });
        if !in_fan {
            return false;
        }

        !self
            .exclusion_loops(&non_reflex)
            .iter()
            .any(|notch| notch.encloses(point))
    }

    /// True iff every vertex of `self` is enclosed by `other`.
    ///
    /// Vertices only: an edge bulging out of `other` between two enclosed
    /// vertices goes unnoticed.
    pub fn enclosed_in(&self, other: &Loop) -> bool {
        self.first_outside(other).is_none()
    }

    /// Index of the first vertex of `self` not enclosed by `other`.
    pub(crate) fn first_outside(&self, other: &Loop) -> Option<usize> {
        self.vectors().iter().position(|v| !other.encloses(v.end()))
    }

    /// One loop per maximal run of reflex vertices.
    ///
    /// A run spanning all but one vertex would reproduce `self`, so only
    /// strictly smaller loops are returned; this bounds the recursion.
    fn exclusion_loops(&self, non_reflex: &[bool]) -> Vec<Loop> {
        let n = self.len();
        let vectors = self.vectors();
        let Some(mut last) = non_reflex.iter().rposition(|&nr| nr) else {
            return Vec::new();
        };
        let mut notches = Vec::new();
        for i in 0..n {
            if !non_reflex[i] {
                continue;
            }
            if last != (i + n - 1) % n {
                // Vectors last+1 ..= i walk the reflex run from corner `last` to corner `i`.
                let mut run = Vec::new();
                let mut j = (last + 1) % n;
                let stop = (i + 1) % n;
                while j != stop {
                    run.push(vectors[j]);
                    j = (j + 1) % n;
                }
                run.push(Vector::new(vectors[i].end(), vectors[last].end()));
                if run.len() < n {
                    notches.push(Loop::from_vectors_unchecked(run));
                }
            }
            last = i;
        }
        notches
    }
}
