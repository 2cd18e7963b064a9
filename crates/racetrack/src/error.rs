//! Error type for geometry construction and the verbosity switch for validation.

use thiserror::Error;

/// Reasons a chain, loop, or track fails validation.
///
/// Validation reports the first violation found; no partially valid value is
/// ever handed back to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("a loop needs at least 3 vectors, got {len}")]
    TooFewVectors { len: usize },

    #[error("vector {index} is not connected to its successor")]
    Disconnected { index: usize },

    #[error("last vector is not connected to the first")]
    OpenLoop,

    #[error("vector {first} intersects vector {second}")]
    SelfIntersection { first: usize, second: usize },

    #[error("point {index} of the inner loop is not enclosed by the outer loop")]
    NotEnclosed { index: usize },

    #[error("clearance {clearance} does not exceed the minimum {min}")]
    InsufficientClearance { clearance: f64, min: f64 },

    #[error("invalid generation params: {reason}")]
    InvalidParams { reason: String },
}

impl GeometryError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

/// Whether validation failures are logged.
///
/// Perturbation runs validation in tight retry loops where failure is the
/// common case, so it uses `Silent`; explicit construction uses `Report`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    #[default]
    Report,
    Silent,
}

impl Verbosity {
    /// Log `err` if reporting is on, then hand it back for `?`/`Err`.
    #[inline]
    pub(crate) fn fail(self, err: GeometryError) -> GeometryError {
        if self == Verbosity::Report {
            tracing::warn!(error = %err, "invalid geometry");
        }
        err
    }
}
