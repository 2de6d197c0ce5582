//! Orbit camera.
//!
//! Spherical-coordinate rig around a fixed center point. Mouse drags map to
//! θ/φ and scroll maps to ρ in the host; the camera itself is a pure
//! conversion from those coordinates to an eye position and a column-major
//! view matrix, recomputed on demand (cheap, so nothing is cached).

use crate::math3d::Vec3;

/// Orbit camera state: center point, azimuth θ, polar angle φ, radius ρ.
///
/// φ is expected in [0, π]; the clamp is the input-handling caller's job
/// (letting the camera cross the pole flips the basis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub center: Vec3,
    pub theta: f64,
    pub phi: f64,
    pub rho: f64,
}

impl BallView {
    pub const fn new(center: Vec3, theta: f64, phi: f64, rho: f64) -> Self {
        Self {
            center,
            theta,
            phi,
            rho,
        }
    }

    /// Camera at distance `rho` from the origin, looking at it
    pub const fn at_distance(rho: f64) -> Self {
        Self::new(Vec3::zero(), 0.0, 0.0, rho)
    }

    #[inline]
    fn tangent(&self) -> Vec3 {
        Vec3::new(-self.theta.sin(), self.theta.cos(), 0.0)
    }

    #[inline]
    fn normal(&self) -> Vec3 {
        Vec3::new(
            self.theta.cos() * self.phi.sin(),
            self.theta.sin() * self.phi.sin(),
            self.phi.cos(),
        )
    }

    /// Eye position in world space
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.center.add_scaled(&self.normal(), self.rho)
    }

    /// Eye position and column-major view matrix.
    ///
    /// {tangent, bitangent, normal} form a right-handed basis with the
    /// normal pointing from the center toward the eye.
    pub fn position_and_view_matrix(&self) -> (Vec3, [f32; 16]) {
        let normal = self.normal();
        let tangent = self.tangent();
        let position = self.center.add_scaled(&normal, self.rho); // avoid recalculating normal

        let bitangent = normal.cross(&tangent);
        let matrix = [
            tangent.x as f32,
            bitangent.x as f32,
            normal.x as f32,
            0.0,
            tangent.y as f32,
            bitangent.y as f32,
            normal.y as f32,
            0.0,
            tangent.z as f32,
            bitangent.z as f32,
            normal.z as f32,
            0.0,
            -tangent.dot(&position) as f32,
            -bitangent.dot(&position) as f32,
            -normal.dot(&position) as f32,
            1.0,
        ];

        (position, matrix)
    }
}

impl Default for BallView {
    fn default() -> Self {
        Self::at_distance(1.0)
    }
}
