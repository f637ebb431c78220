//! 2D vector type used for rope points, directions and forces.
//!
//! Conventions follow 2D screen space: `+x` is right and `+y` is down, so
//! [`Vec2::down`] is `(0, 1)` and positive gravity pulls points towards
//! larger `y`.

use crate::float::Float;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 2D vector for rope points and directions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self {
        Vec2 { x, y }
    }

    pub fn zero() -> Self {
        Vec2 { x: F::zero(), y: F::zero() }
    }

    /// The down axis gravity acts along.
    pub fn down() -> Self {
        Vec2 { x: F::zero(), y: F::one() }
    }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (returns scalar): self.x * other.y - self.y * other.x
    pub fn cross(self, other: Self) -> F {
        self.x * other.y - self.y * other.x
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction, or zero for a zero-length vector.
    pub fn normalized(self) -> Self {
        let len_sq = self.length_sq();
        if len_sq == F::zero() {
            Self::zero()
        } else {
            self / len_sq.sqrt()
        }
    }

    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Perpendicular vector `(y, -x)`.
    pub fn tangent(self) -> Self {
        Vec2 { x: self.y, y: -self.x }
    }

    /// Signed angle in radians that rotates `self` onto `to`.
    pub fn angle_to(self, to: Self) -> F {
        F::atan2(self.cross(to), self.dot(to))
    }

    /// Removes the component along the unit `normal`.
    pub fn slide(self, normal: Self) -> Self {
        self - normal.scale(self.dot(normal))
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

impl<F: Float> Mul<F> for Vec2<F> {
    type Output = Self;
    fn mul(self, rhs: F) -> Self { self.scale(rhs) }
}

impl<F: Float> Div<F> for Vec2<F> {
    type Output = Self;
    fn div(self, rhs: F) -> Self { Vec2 { x: self.x / rhs, y: self.y / rhs } }
}

impl<F: Float> AddAssign for Vec2<F> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<F: Float> SubAssign for Vec2<F> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}
