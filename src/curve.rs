//! Damping curves: scale a rope's damping along its length.
//!
//! The solver evaluates a curve at `i / (N - 1)` for point `i`, so `0.0` is
//! the anchor and `1.0` is the free tip.

use crate::error::{Result, RopeError};
use crate::float::Float;
use alloc::vec::Vec as AllocVec;

/// Maps a normalized position along a rope to a damping multiplier.
pub trait DampingCurve<F: Float> {
    fn evaluate(&self, t: F) -> F;
}

impl<F: Float, T: Fn(F) -> F> DampingCurve<F> for T {
    fn evaluate(&self, t: F) -> F {
        self(t)
    }
}

/// Same multiplier everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantCurve<F: Float>(pub F);

impl<F: Float> DampingCurve<F> for ConstantCurve<F> {
    fn evaluate(&self, _t: F) -> F {
        self.0
    }
}

/// Piecewise-linear curve sampled at evenly spaced positions over `[0, 1]`.
///
/// Lookups clamp `t` into range and interpolate between the two nearest
/// samples, which keeps evaluation O(1) regardless of how the curve was
/// authored.
#[derive(Clone, Debug, PartialEq)]
pub struct BakedCurve<F: Float> {
    samples: AllocVec<F>,
}

impl<F: Float> BakedCurve<F> {
    /// Wrap pre-computed samples. The first sample sits at `t = 0`, the last
    /// at `t = 1`.
    pub fn from_samples(samples: AllocVec<F>) -> Result<Self> {
        if samples.len() < 2 {
            return Err(RopeError::CurveTooShort { samples: samples.len() });
        }
        Ok(BakedCurve { samples })
    }

    /// Sample `f` at `resolution` evenly spaced positions.
    pub fn bake<C: DampingCurve<F>>(curve: &C, resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(RopeError::CurveTooShort { samples: resolution });
        }
        let last = (resolution - 1) as f64;
        let samples = (0..resolution)
            .map(|i| curve.evaluate(F::from_f64(i as f64 / last)))
            .collect();
        Ok(BakedCurve { samples })
    }

    /// Straight ramp from `start` at the anchor to `end` at the tip.
    pub fn linear(start: F, end: F) -> Self {
        BakedCurve { samples: alloc::vec![start, end] }
    }

    pub fn samples(&self) -> &[F] {
        &self.samples
    }
}

impl<F: Float> DampingCurve<F> for BakedCurve<F> {
    fn evaluate(&self, t: F) -> F {
        let t = t.clamp(F::zero(), F::one());
        let last = self.samples.len() - 1;
        let pos = t.to_f64() * last as f64;
        let index = (pos as usize).min(last - 1);
        let frac = F::from_f64(pos - index as f64);
        self.samples[index].lerp(self.samples[index + 1], frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_a_curve() {
        let curve = |t: f32| 1.0 + t;
        assert_eq!(curve.evaluate(0.5), 1.5);
    }

    #[test]
    fn baked_curve_interpolates() {
        let curve = BakedCurve::from_samples(alloc::vec![0.0f32, 2.0, 4.0]).unwrap();
        assert_eq!(curve.evaluate(0.0), 0.0);
        assert!((curve.evaluate(0.25) - 1.0).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 3.0).abs() < 1e-6);
        assert_eq!(curve.evaluate(1.0), 4.0);
    }

    #[test]
    fn baked_curve_clamps_out_of_range() {
        let curve = BakedCurve::linear(1.0f64, 3.0);
        assert_eq!(curve.evaluate(-2.0), 1.0);
        assert_eq!(curve.evaluate(5.0), 3.0);
    }

    #[test]
    fn bake_samples_source_curve() {
        let curve = BakedCurve::bake(&|t: f64| t * t, 5).unwrap();
        assert_eq!(curve.samples(), &[0.0, 0.0625, 0.25, 0.5625, 1.0]);
    }

    #[test]
    fn too_few_samples_rejected() {
        assert_eq!(
            BakedCurve::<f32>::from_samples(alloc::vec![1.0]),
            Err(RopeError::CurveTooShort { samples: 1 })
        );
    }
}
