//! 2D primitives: immutable points and oriented segments.
//!
//! Purpose
//! - `Point`: coordinate value type with distance/angle primitives and an
//!   angular point-in-triangle test.
//! - `Vector`: oriented segment with a cached `(distance, angle)` that always
//!   agrees with its endpoints; segment intersection and nearest-point queries.
//!
//! Conventions
//! - Angles come from `atan2` and live in (−π, π]; turn angles at a vertex
//!   live in [0, 2π).
//! - Generated shapes use integer coordinates; rounding is half-up
//!   (`round_half_up`), so -2.5 rounds to -2.

mod point;
mod vector;

pub use point::{non_reflex, round_half_up, Point};
pub use vector::{Line, Vector};

#[cfg(test)]
mod tests;
