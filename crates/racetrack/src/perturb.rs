//! Retry-bounded vertex jitter under a validation predicate.
//!
//! A candidate offset is drawn per axis from `[-pos_var/2, pos_var/2]` and
//! rounded to an integer. The move is kept only if it is larger than
//! `0.3 · pos_var` and the moved state passes validation. After `retries`
//! failed attempts the vertex stays where it was; that is not an error.

use rand::Rng;

use crate::geom2::{round_half_up, Point};

/// Moves shorter than this fraction of `pos_var` are rejected.
pub const MIN_MOVE_FRAC: f64 = 0.3;

/// Try to move one vertex of `state` from `current`.
///
/// `apply(state, p)` must place the vertex at `p` (including every vector
/// sharing it). `validation(state, p)` sees the state with the vertex at `p`.
/// Returns whether a move was kept; otherwise the vertex is back at `current`.
pub fn jitter_vertex<S, R, M, V>(
    state: &mut S,
    current: Point,
    pos_var: f64,
    retries: u32,
    rng: &mut R,
    mut apply: M,
    validation: V,
) -> bool
where
    S: ?Sized,
    R: Rng + ?Sized,
    M: FnMut(&mut S, Point),
    V: Fn(&S, Point) -> bool,
{
    let min_move = pos_var * MIN_MOVE_FRAC;
    for _ in 0..retries {
        let dx = round_half_up(rng.gen::<f64>() * pos_var - pos_var / 2.0);
        let dy = round_half_up(rng.gen::<f64>() * pos_var - pos_var / 2.0);
        let candidate = Point::new(current.x + dx, current.y + dy);
        if current.distance(candidate) <= min_move {
            continue;
        }
        apply(state, candidate);
        if validation(state, candidate) {
            return true;
        }
        apply(state, current);
    }
    false
}
