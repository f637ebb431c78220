//! Error types for building ropes and curves.
//!
//! Stepping never fails; these only come out of constructors that take
//! caller-supplied buffers.

use thiserror::Error;

/// Errors raised while assembling rope state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RopeError {
    /// `old_points` must mirror `points` one to one.
    #[error("old point buffer has {old_points} entries but rope has {points} points")]
    LengthMismatch { points: usize, old_points: usize },
    /// A rope of N points needs exactly N - 1 rest lengths.
    #[error("rope with {points} points needs {expected} segment lengths, got {segments}", expected = .points.saturating_sub(1))]
    SegmentCountMismatch { points: usize, segments: usize },
    /// Layout constructors need at least one segment.
    #[error("rope layout needs at least one segment")]
    InvalidSegmentCount,
    /// A baked curve needs two samples to interpolate between.
    #[error("curve needs at least 2 samples, got {samples}")]
    CurveTooShort { samples: usize },
}

pub type Result<T> = core::result::Result<T, RopeError>;
