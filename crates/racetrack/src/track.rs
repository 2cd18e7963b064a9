//! Race tracks: an outer and an inner loop with a drivable band between them.
//!
//! Invariants
//! - Both loops are valid.
//! - Every vertex of the inner loop is enclosed by the outer loop (vertex check only).
//! - The clearance (nearest inner-vertex-to-outer-edge distance) exceeds `min_clearance`.
//!
//! Joint perturbation re-checks all of the above after every single-vertex
//! move: a move that keeps one loop well shaped can still break the pair.

use rand::Rng;

use crate::cfg::{Jitter, TrackCfg};
use crate::error::{GeometryError, Verbosity};
use crate::geom2::Point;
use crate::loops::Loop;
use crate::perturb::jitter_vertex;
use crate::route::{Chain, Closest};

/// Which boundary of a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Outer,
    Inner,
}

/// Nearest boundary hit for a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryHit {
    pub boundary: Boundary,
    pub closest: Closest,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RaceTrack {
    outer: Loop,
    inner: Loop,
    min_clearance: f64,
}

impl RaceTrack {
    pub fn new(outer: Loop, inner: Loop, min_clearance: f64) -> Result<Self, GeometryError> {
        let track = Self {
            outer,
            inner,
            min_clearance,
        };
        track.validate(Verbosity::Report)?;
        Ok(track)
    }

    #[inline]
    pub fn outer(&self) -> &Loop {
        &self.outer
    }
    #[inline]
    pub fn inner(&self) -> &Loop {
        &self.inner
    }
    #[inline]
    pub fn min_clearance(&self) -> f64 {
        self.min_clearance
    }

    pub fn validate(&self, verbosity: Verbosity) -> Result<(), GeometryError> {
        self.outer.validate(verbosity)?;
        self.inner.validate(verbosity)?;
        if let Some(index) = self.inner.first_outside(&self.outer) {
            return Err(verbosity.fail(GeometryError::NotEnclosed { index }));
        }
        let clearance = self.inner_distance();
        if !(clearance > self.min_clearance) {
            return Err(verbosity.fail(GeometryError::InsufficientClearance {
                clearance,
                min: self.min_clearance,
            }));
        }
        Ok(())
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate(Verbosity::Silent).is_ok()
    }

    pub fn inner_enclosed(&self) -> bool {
        self.inner.enclosed_in(&self.outer)
    }

    /// Distance from the nearest inner vertex to the outer loop.
    pub fn inner_distance(&self) -> f64 {
        self.inner
            .get_closest_from(&self.outer)
            .map_or(f64::INFINITY, |pair| pair.distance)
    }

    /// Inside the outer loop and not inside the inner one.
    pub fn encloses(&self, point: Point) -> bool {
        self.outer.encloses(point) && !self.inner.encloses(point)
    }

    /// Nearest point on either boundary; the outer loop wins ties.
    pub fn closest_boundary(&self, point: Point) -> Option<BoundaryHit> {
        let outer = self.outer.get_closest(point).map(|closest| BoundaryHit {
            boundary: Boundary::Outer,
            closest,
        });
        let inner = self.inner.get_closest(point).map(|closest| BoundaryHit {
            boundary: Boundary::Inner,
            closest,
        });
        match (outer, inner) {
            (Some(o), Some(i)) if i.closest.distance < o.closest.distance => Some(i),
            (Some(o), _) => Some(o),
            (None, i) => i,
        }
    }

    /// Path data for `(outer, inner)`.
    pub fn path_data(&self) -> (String, String) {
        (self.outer.path_data(), self.inner.path_data())
    }

    /// Outer ideal polygon of radius `space_to_use`, inner one of half that,
    /// then one full jitter pass under `good_shape`.
    pub fn make_random<R: Rng + ?Sized>(cfg: &TrackCfg, rng: &mut R) -> Result<Self, GeometryError> {
        cfg.validate()?;
        let outer = Loop::random_ideal(cfg.vectors, cfg.vectors_var, cfg.space_to_use, rng)?;
        let inner = Loop::random_ideal(cfg.vectors, cfg.vectors_var, cfg.space_to_use / 2.0, rng)?;
        let mut track = RaceTrack::new(outer, inner, cfg.min_corner_distance)?;
        let accepted = track.add_randomness(&cfg.initial_jitter(), rng, |t, p| t.good_shape(p, cfg));
        tracing::debug!(
            outer = track.outer.len(),
            inner = track.inner.len(),
            accepted,
            "random race track"
        );
        Ok(track)
    }

    /// One jitter pass over the outer loop, then the inner loop, every move
    /// checked by `validation(track, p)` on the whole track.
    pub fn add_randomness<R, V>(&mut self, jitter: &Jitter, rng: &mut R, validation: V) -> usize
    where
        R: Rng + ?Sized,
        V: Fn(&RaceTrack, Point) -> bool,
    {
        let mut accepted = 0;
        for boundary in [Boundary::Outer, Boundary::Inner] {
            for i in 0..self.bound(boundary).len() {
                if rng.gen::<f64>() > jitter.ratio {
                    continue;
                }
                let current = self.bound(boundary).vectors()[i].end();
                let moved = jitter_vertex(
                    self,
                    current,
                    jitter.pos_var,
                    jitter.retries,
                    rng,
                    |t: &mut RaceTrack, p| t.bound_mut(boundary).move_vertex(i, p),
                    &validation,
                );
                if moved {
                    accepted += 1;
                }
            }
        }
        accepted
    }

    /// One scheduler tick: a jitter pass under `good_shape`.
    pub fn evolve<R: Rng + ?Sized>(&mut self, jitter: &Jitter, cfg: &TrackCfg, rng: &mut R) -> usize {
        self.add_randomness(jitter, rng, |t, p| t.good_shape(p, cfg))
    }

    /// Both loops well shaped around `point`, inner enclosed, clearance kept.
    pub fn good_shape(&self, point: Point, cfg: &TrackCfg) -> bool {
        self.inner.good_shape(point, cfg)
            && self.outer.good_shape(point, cfg)
            && self.inner_enclosed()
            && self.inner_distance() > self.min_clearance
    }

    fn bound(&self, boundary: Boundary) -> &Loop {
        match boundary {
            Boundary::Outer => &self.outer,
            Boundary::Inner => &self.inner,
        }
    }

    fn bound_mut(&mut self, boundary: Boundary) -> &mut Loop {
        match boundary {
            Boundary::Outer => &mut self.outer,
            Boundary::Inner => &mut self.inner,
        }
    }
}
