//! Random loops: ideal regular polygons plus validated jitter.
//!
//! Model
//! - `make_ideal(n, r)`: regular `n`-gon of radius `r` around the origin,
//!   first vertex at angle 0, corners rounded to integers.
//! - `random_ideal`: same, after shrinking `n` by a random share of `vectors_var`.
//! - `add_randomness`: move each vertex (with probability `ratio`) by a
//!   bounded random offset, keeping only moves that pass a validation
//!   predicate. Retries are bounded, so every pass terminates.
//! - Determinism: all draws come from the caller's RNG, in vertex order.

use rand::Rng;

use super::Loop;
use crate::cfg::{Jitter, TrackCfg};
use crate::error::GeometryError;
use crate::geom2::{round_half_up, Point, Vector};
use crate::perturb::jitter_vertex;
use crate::route::Chain;

impl Loop {
    /// Regular `n`-gon of radius `radius`, corners rounded to integers.
    pub fn make_ideal(n: usize, radius: f64) -> Result<Loop, GeometryError> {
        if n < 3 {
            return Err(GeometryError::invalid(format!(
                "an ideal polygon needs at least 3 vectors, got {n}"
            )));
        }
        let angle_inc = 2.0 * std::f64::consts::PI / n as f64;
        let mut angle = 0.0;
        let mut radial = Vector::new(Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        radial.set_distance(radius);
        radial.set_angle(angle);
        let first = radial.end().round();
        let mut prev = first;
        let mut vectors = Vec::with_capacity(n);
        for _ in 0..n - 1 {
            angle += angle_inc;
            radial.set_angle(angle);
            let next = radial.end().round();
            vectors.push(Vector::new(prev, next));
            prev = next;
        }
        vectors.push(Vector::new(prev, first));
        Loop::new(vectors)
    }

    /// Ideal polygon with a vertex count drawn from `[n·(1 − var), n]`.
    pub fn random_ideal<R: Rng + ?Sized>(
        n: usize,
        vectors_var: f64,
        radius: f64,
        rng: &mut R,
    ) -> Result<Loop, GeometryError> {
        let nf = n as f64;
        let count = round_half_up(nf * (1.0 - vectors_var) + rng.gen::<f64>() * nf * vectors_var);
        Loop::make_ideal(count.max(0.0) as usize, radius)
    }

    /// Random loop: `random_ideal` followed by one full jitter pass under `good_shape`.
    pub fn make_random<R: Rng + ?Sized>(cfg: &TrackCfg, rng: &mut R) -> Result<Loop, GeometryError> {
        cfg.validate()?;
        let mut lp = Loop::random_ideal(cfg.vectors, cfg.vectors_var, cfg.space_to_use, rng)?;
        let accepted = lp.add_randomness(&cfg.initial_jitter(), rng, |l, p| l.good_shape(p, cfg));
        tracing::debug!(vectors = lp.len(), accepted, "random loop");
        Ok(lp)
    }

    /// One jitter pass; returns how many vertices moved.
    ///
    /// `validation(loop, p)` sees the loop with the candidate vertex already at `p`.
    pub fn add_randomness<R, V>(&mut self, jitter: &Jitter, rng: &mut R, validation: V) -> usize
    where
        R: Rng + ?Sized,
        V: Fn(&Loop, Point) -> bool,
    {
        let mut accepted = 0;
        for i in 0..self.len() {
            if rng.gen::<f64>() > jitter.ratio {
                continue;
            }
            let current = self.vectors()[i].end();
            let moved = jitter_vertex(
                self,
                current,
                jitter.pos_var,
                jitter.retries,
                rng,
                |l: &mut Loop, p| l.move_vertex(i, p),
                &validation,
            );
            if moved {
                accepted += 1;
            }
        }
        accepted
    }

    /// Copy of `self` after one jitter pass; `self` is untouched.
    pub fn perturbed<R, V>(&self, jitter: &Jitter, rng: &mut R, validation: V) -> Loop
    where
        R: Rng + ?Sized,
        V: Fn(&Loop, Point) -> bool,
    {
        let mut next = self.clone();
        next.add_randomness(jitter, rng, validation);
        next
    }

    /// One scheduler tick: a jitter pass under `good_shape`.
    pub fn evolve<R: Rng + ?Sized>(&mut self, jitter: &Jitter, cfg: &TrackCfg, rng: &mut R) -> usize {
        self.add_randomness(jitter, rng, |l, p| l.good_shape(p, cfg))
    }

    /// `point` is inside the bounding square, inset by the margin.
    pub fn in_space(point: Point, cfg: &TrackCfg) -> bool {
        let lim = cfg.space - cfg.margin;
        point.x > -lim && point.x < lim && point.y > -lim && point.y < lim
    }

    /// Shape check run after every candidate move of `point`.
    ///
    /// In space, valid, every interior angle within the band around the
    /// regular polygon's angle, and corners farther apart than `min_corner_distance`.
    pub fn good_shape(&self, point: Point, cfg: &TrackCfg) -> bool {
        let (lo, hi) = cfg.angle_band(self.len());
        Loop::in_space(point, cfg)
            && self.is_valid()
            && self.all_angles_greater(lo)
            && self.all_angles_less(hi)
            && self.min_distance() > cfg.min_corner_distance
    }
}
