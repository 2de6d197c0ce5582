//! 3D Math Utilities
//!
//! Vector and quaternion value types used by the field evaluator, the
//! particle advection step, and the transform/camera rigs. Simulation math
//! runs in `f64`; `f32` only appears at the buffer and matrix boundaries.

use std::ops::{Add, Mul, Neg, Sub};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Undefined (NaN components) for the zero vector; callers must
    /// guarantee nonzero magnitude before normalizing.
    #[inline]
    pub fn unit(&self) -> Self {
        let f = 1.0 / self.magnitude();
        Self {
            x: self.x * f,
            y: self.y * f,
            z: self.z * f,
        }
    }

    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// `self + vector * k` in one expression
    #[inline]
    pub fn add_scaled(&self, vector: &Self, k: f64) -> Self {
        Self {
            x: self.x + vector.x * k,
            y: self.y + vector.y * k,
            z: self.z + vector.z * k,
        }
    }

    /// Approximate equality check for floating point comparison
    #[inline]
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        v * self
    }
}

// ============================================================================
// Quaternion
// ============================================================================

/// Rotation quaternion.
///
/// Fields are private and construction goes through [`Quat::identity`] or
/// [`Quat::from_axis_angle`] only, so every value starts out unit-norm.
/// Repeated composition drifts; [`Quat::unit`] renormalizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    w: f64,
    x: f64,
    y: f64,
    z: f64,
}

impl Quat {
    #[inline]
    const fn raw(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::raw(1.0, 0.0, 0.0, 0.0)
    }

    /// Rotation of `theta` radians about `axis` (must be unit length)
    #[inline]
    pub fn from_axis_angle(axis: Vec3, theta: f64) -> Self {
        let angle = theta * 0.5;
        let scale = angle.sin();
        Self::raw(angle.cos(), axis.x * scale, axis.y * scale, axis.z * scale)
    }

    #[inline]
    fn length(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Renormalized copy, countering drift from repeated composition
    #[inline]
    pub fn unit(&self) -> Self {
        let norm = 1.0 / self.length();
        Self::raw(self.w * norm, self.x * norm, self.y * norm, self.z * norm)
    }

    /// Column-major 3×3 rotation matrix
    pub fn matrix(&self) -> [f64; 9] {
        let xx = self.x * self.x;
        let yy = self.y * self.y;
        let zz = self.z * self.z;

        let xy2 = 2.0 * self.x * self.y;
        let xz2 = 2.0 * self.x * self.z;
        let yz2 = 2.0 * self.y * self.z;
        let wx2 = 2.0 * self.w * self.x;
        let wy2 = 2.0 * self.w * self.y;
        let wz2 = 2.0 * self.w * self.z;

        [
            1.0 - 2.0 * (yy + zz),
            xy2 + wz2,
            xz2 - wy2,
            xy2 - wz2,
            1.0 - 2.0 * (xx + zz),
            yz2 + wx2,
            xz2 + wy2,
            yz2 - wx2,
            1.0 - 2.0 * (xx + yy),
        ]
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Quat {
    type Output = Self;

    /// Hamilton product
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::raw(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_cross_orthogonal() {
        let a = Vec3::new(0.3, -1.2, 2.5);
        let b = Vec3::new(1.7, 0.4, -0.9);
        let c = a.cross(&b);
        assert!(c.dot(&a).abs() < EPSILON);
        assert!(c.dot(&b).abs() < EPSILON);
    }

    #[test]
    fn test_unit_magnitude() {
        let v = Vec3::new(3.0, -4.0, 12.0);
        assert!((v.unit().magnitude() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_unit_of_zero_is_nan() {
        let u = Vec3::zero().unit();
        assert!(u.x.is_nan() && u.y.is_nan() && u.z.is_nan());
    }

    #[test]
    fn test_add_scaled() {
        let v = Vec3::new(1.0, 2.0, 3.0).add_scaled(&Vec3::new(0.5, -1.0, 2.0), 2.0);
        assert!(v.approx_eq(&Vec3::new(2.0, 0.0, 7.0), EPSILON));
    }

    #[test]
    fn test_quat_inverse_composition_is_identity() {
        let axis = Vec3::new(1.0, 2.0, -0.5).unit();
        let q = Quat::from_axis_angle(axis, 0.73) * Quat::from_axis_angle(axis, -0.73);
        let m = q.matrix();
        let identity = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        for (a, b) in m.iter().zip(identity.iter()) {
            assert!((a - b).abs() < 1e-9, "matrix {:?} not identity", m);
        }
    }

    #[test]
    fn test_quat_unit_counters_drift() {
        let axis = Vec3::new(0.0, 0.0, 1.0);
        let mut q = Quat::identity();
        for _ in 0..1000 {
            q = q * Quat::from_axis_angle(axis, 0.01);
        }
        let q = q.unit();
        assert!((q.length() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_quat_matrix_columns_orthonormal() {
        let m = Quat::from_axis_angle(Vec3::new(0.6, 0.8, 0.0), 1.1).matrix();
        let col0 = Vec3::new(m[0], m[1], m[2]);
        let col1 = Vec3::new(m[3], m[4], m[5]);
        let col2 = Vec3::new(m[6], m[7], m[8]);
        assert!((col0.magnitude() - 1.0).abs() < EPSILON);
        assert!((col1.magnitude() - 1.0).abs() < EPSILON);
        assert!((col2.magnitude() - 1.0).abs() < EPSILON);
        assert!(col0.dot(&col1).abs() < EPSILON);
        assert!(col1.dot(&col2).abs() < EPSILON);
    }
}
