//! Generation parameters.
//!
//! - `TrackCfg`: bounding space, ideal polygon size and shape tolerances.
//! - `Jitter`: one perturbation pass (which vertices move, how far, how many tries).

use crate::error::GeometryError;
use crate::geom2::round_half_up;

/// Parameters shared by random loop and race-track generation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackCfg {
    /// Half-width of the square `[-space, space]²` the shapes must stay in.
    pub space: f64,
    /// Radius of the ideal outer polygon (the inner one uses half of it).
    pub space_to_use: f64,
    /// Target vertex count before variation.
    pub vectors: usize,
    /// Fraction (0..=1) by which the vertex count may shrink.
    pub vectors_var: f64,
    /// Positional variance of the initial perturbation, per axis.
    pub pos_var: f64,
    /// Allowed deviation of every interior angle, as a fraction of the ideal angle.
    pub max_angle_variation: f64,
    /// Minimum distance between corners; also the minimum inner/outer clearance.
    pub min_corner_distance: f64,
    /// Moved points must stay this far inside the bounding square.
    pub margin: f64,
    /// Attempts per vertex before it is left where it was.
    pub retries: u32,
}

impl Default for TrackCfg {
    fn default() -> Self {
        Self {
            space: 400.0,
            space_to_use: 300.0,
            vectors: 12,
            vectors_var: 0.3,
            pos_var: 150.0,
            max_angle_variation: 0.5,
            min_corner_distance: 30.0,
            margin: 20.0,
            retries: 10,
        }
    }
}

impl TrackCfg {
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(self.space.is_finite() && self.space > 0.0) {
            return Err(GeometryError::invalid("space must be finite and > 0"));
        }
        if !(self.space_to_use.is_finite() && self.space_to_use > 0.0) {
            return Err(GeometryError::invalid("space_to_use must be finite and > 0"));
        }
        if self.vectors < 3 {
            return Err(GeometryError::invalid("need at least 3 vectors"));
        }
        if !(0.0..=1.0).contains(&self.vectors_var) {
            return Err(GeometryError::invalid("vectors_var must be in [0, 1]"));
        }
        if self.min_vectors() < 3 {
            return Err(GeometryError::invalid(format!(
                "vectors {} shrunk by vectors_var {} can drop below 3",
                self.vectors, self.vectors_var
            )));
        }
        if !(self.pos_var.is_finite() && self.pos_var >= 0.0) {
            return Err(GeometryError::invalid("pos_var must be finite and >= 0"));
        }
        if !(self.max_angle_variation.is_finite() && self.max_angle_variation >= 0.0) {
            return Err(GeometryError::invalid(
                "max_angle_variation must be finite and >= 0",
            ));
        }
        if !(self.min_corner_distance.is_finite() && self.min_corner_distance >= 0.0) {
            return Err(GeometryError::invalid(
                "min_corner_distance must be finite and >= 0",
            ));
        }
        if !(self.margin.is_finite() && self.margin >= 0.0 && self.margin < self.space) {
            return Err(GeometryError::invalid("margin must be in [0, space)"));
        }
        Ok(())
    }

    /// Smallest vertex count `Loop::random_ideal` can draw.
    pub fn min_vectors(&self) -> usize {
        let n = self.vectors as f64;
        round_half_up(n * (1.0 - self.vectors_var)).max(0.0) as usize
    }

    /// The pass applied once to a freshly built ideal polygon: every vertex moves.
    pub fn initial_jitter(&self) -> Jitter {
        Jitter {
            ratio: 1.0,
            pos_var: self.pos_var,
            retries: self.retries,
        }
    }

    /// Interior angle of a regular `n`-gon and the allowed band around it.
    pub(crate) fn angle_band(&self, n: usize) -> (f64, f64) {
        let n = n as f64;
        let ideal = std::f64::consts::PI * (n - 2.0) / n;
        let variation = ideal * self.max_angle_variation;
        (ideal - variation, ideal + variation)
    }
}

/// One perturbation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Jitter {
    /// Probability (0..=1) that a given vertex is considered at all.
    pub ratio: f64,
    /// Offsets are drawn from `[-pos_var/2, pos_var/2]` per axis.
    pub pos_var: f64,
    pub retries: u32,
}

impl Jitter {
    /// Small, frequent changes for a track that keeps evolving between ticks.
    pub fn dynamic() -> Self {
        Self {
            ratio: 0.2,
            pos_var: 30.0,
            retries: 5,
        }
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if !(0.0..=1.0).contains(&self.ratio) {
            return Err(GeometryError::invalid("ratio must be in [0, 1]"));
        }
        if !(self.pos_var.is_finite() && self.pos_var >= 0.0) {
            return Err(GeometryError::invalid("pos_var must be finite and >= 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TrackCfg::default().validate().is_ok());
        assert!(Jitter::dynamic().validate().is_ok());
        assert_eq!(TrackCfg::default().initial_jitter().ratio, 1.0);
    }

    #[test]
    fn rejects_bad_params() {
        let cfg = TrackCfg {
            vectors: 2,
            ..TrackCfg::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GeometryError::InvalidParams { .. })
        ));
        let cfg = TrackCfg {
            margin: 500.0,
            ..TrackCfg::default()
        };
        assert!(cfg.validate().is_err());
        let jitter = Jitter {
            ratio: 1.5,
            ..Jitter::dynamic()
        };
        assert!(jitter.validate().is_err());
    }

    #[test]
    fn vertex_count_variation_cannot_drop_below_a_triangle() {
        for (vectors, vectors_var) in [(3, 0.3), (4, 1.0), (12, 0.8)] {
            let cfg = TrackCfg {
                vectors,
                vectors_var,
                ..TrackCfg::default()
            };
            assert!(cfg.min_vectors() < 3);
            assert!(matches!(
                cfg.validate(),
                Err(GeometryError::InvalidParams { .. })
            ));
        }
        let cfg = TrackCfg {
            vectors: 5,
            vectors_var: 0.4,
            ..TrackCfg::default()
        };
        assert_eq!(cfg.min_vectors(), 3);
        assert!(cfg.validate().is_ok());
        assert_eq!(TrackCfg::default().min_vectors(), 8);
    }

    #[test]
    fn angle_band_of_square() {
        let cfg = TrackCfg {
            max_angle_variation: 0.5,
            ..TrackCfg::default()
        };
        let (lo, hi) = cfg.angle_band(4);
        let half_pi = std::f64::consts::FRAC_PI_2;
        assert!((lo - 0.5 * half_pi).abs() < 1e-12);
        assert!((hi - 1.5 * half_pi).abs() < 1e-12);
    }
}
