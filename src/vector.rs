use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};
use ultraviolet::DVec2;

use crate::error::{Result, SimError};

/// Immutable 2D vector used for positions, velocities and accelerations.
///
/// Every operation returns a new value. Serialized as an `[x, y]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2D(DVec2);

impl Vector2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    pub fn zero() -> Self {
        Self(DVec2::zero())
    }

    pub fn x(self) -> f64 {
        self.0.x
    }

    pub fn y(self) -> f64 {
        self.0.y
    }

    pub fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }

    pub fn subtract(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }

    pub fn scale(self, scalar: f64) -> Self {
        Self(self.0 * scalar)
    }

    /// Divides both components by `scalar`.
    /// Fails only when `scalar` is exactly zero.
    pub fn divide(self, scalar: f64) -> Result<Self> {
        if scalar == 0.0 {
            return Err(SimError::DivisionByZero);
        }
        Ok(Self(self.0 / scalar))
    }

    pub fn magnitude(self) -> f64 {
        self.0.mag()
    }

    pub fn magnitude_squared(self) -> f64 {
        self.0.mag_sq()
    }

    /// Unit vector in the same direction, or the zero vector if `self` is zero.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Self::zero();
        }
        Self(self.0 / mag)
    }

    /// Scalar product.
    pub fn dot(self, other: Self) -> f64 {
        self.0.dot(other.0)
    }

    /// True only if both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.0 == DVec2::zero()
    }
}

impl Default for Vector2D {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Vector2D> for [f64; 2] {
    fn from(v: Vector2D) -> Self {
        [v.0.x, v.0.y]
    }
}

impl From<DVec2> for Vector2D {
    fn from(v: DVec2) -> Self {
        Self(v)
    }
}

impl From<Vector2D> for DVec2 {
    fn from(v: Vector2D) -> Self {
        v.0
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2D::add(self, rhs)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl std::fmt::Display for Vector2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.0.x, self.0.y)
    }
}
