//! Floating-point abstraction so ropes can run in `f32` or `f64`.

use core::cmp::PartialOrd;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Scalar operations the rope solver needs.
///
/// Implemented for `f32` and `f64` on top of `libm`, so the math is the same
/// with or without `std`.
pub trait Float:
    'static
    + Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + Default
    + core::fmt::Debug
{
    fn zero() -> Self;
    fn one() -> Self;
    fn half() -> Self;
    fn sqrt(self) -> Self;
    /// Natural exponential (e^self).
    fn exp(self) -> Self;
    /// Arctangent of y/x, with correct quadrant.
    fn atan2(y: Self, x: Self) -> Self;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }

    fn lerp(self, other: Self, t: Self) -> Self {
        self + (other - self) * t
    }
}

macro_rules! impl_float {
    ($ty:ty, $sqrt:path, $exp:path, $atan2:path) => {
        impl Float for $ty {
            fn zero() -> Self { 0.0 }
            fn one() -> Self { 1.0 }
            fn half() -> Self { 0.5 }
            fn sqrt(self) -> Self { $sqrt(self) }
            fn exp(self) -> Self { $exp(self) }
            fn atan2(y: Self, x: Self) -> Self { $atan2(y, x) }
            fn from_f32(v: f32) -> Self { v as $ty }
            fn from_f64(v: f64) -> Self { v as $ty }
            fn to_f64(self) -> f64 { self as f64 }
        }
    };
}

impl_float!(f32, libm::sqrtf, libm::expf, libm::atan2f);
impl_float!(f64, libm::sqrt, libm::exp, libm::atan2);
