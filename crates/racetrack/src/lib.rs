//! Planar geometry for procedurally generated race tracks.
//!
//! Layers
//! - `geom2`: points and directed segments (angles, intersection, nearest point).
//! - `route`: the `Chain` capability and open routes.
//! - `loops`: closed non-self-intersecting loops, enclosure for non-convex
//!   shapes, random generation and perturbation.
//! - `track`: an outer and an inner loop with a clearance between them.
//!
//! Conventions
//! - Angles are radians in (-π, π], measured with `atan2` (y axis as given).
//! - Every constructor validates and returns `GeometryError`; mutation that
//!   can break an invariant goes through a validated setter or a jitter pass
//!   that restores the previous state on rejection.
//! - Randomness always comes from a caller-supplied `rand::Rng`.

pub mod cfg;
pub mod error;
pub mod geom2;
pub mod loops;
pub mod perturb;
pub mod route;
pub mod track;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{Jitter, TrackCfg};
pub use error::{GeometryError, Verbosity};
pub use geom2::{Line, Point, Vector};
pub use loops::Loop;
pub use route::{Chain, Closest, ClosestPair, Route};
pub use track::{Boundary, BoundaryHit, RaceTrack};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::{Jitter, TrackCfg};
    pub use crate::error::{GeometryError, Verbosity};
    pub use crate::geom2::{non_reflex, round_half_up, Point, Vector};
    pub use crate::loops::Loop;
    pub use crate::route::{Chain, Closest, ClosestPair, Route};
    pub use crate::track::{Boundary, RaceTrack};
    pub use nalgebra::Vector2 as Vec2;
}
