//! Rigid-body transform for the orbiting globe.
//!
//! Composes scale, rotation, and translation into the column-major model
//! matrix, its inverse, and a rotation-only matrix. Matrices are cached:
//! after any [`Transform::rotate`] call the caller must invoke
//! [`Transform::update_matrices`] before reading them, or it reads stale
//! values.

use crate::math3d::{Quat, Vec3};

pub struct Transform {
    scale_factor: f64,
    rotation: Quat,
    translation: Vec3,

    model_matrix: [f32; 16],
    model_inverse: [f32; 16],
    rotation_matrix: [f32; 9],
}

impl Transform {
    pub fn new(scale: f64, rotations: &[Quat], translation: Vec3) -> Self {
        let rotation = rotations
            .iter()
            .fold(Quat::identity(), |acc, &q| acc * q);
        let r = rotation.matrix();
        Self {
            scale_factor: scale,
            rotation,
            translation,
            model_matrix: Self::matrix(scale, &r, translation),
            model_inverse: Self::inverse_matrix(scale, &r, translation),
            rotation_matrix: rotation_only(&r),
        }
    }

    /// Compose a further rotation and renormalize. Cached matrices are
    /// stale until [`Transform::update_matrices`] runs.
    pub fn rotate(&mut self, by: Quat) {
        self.rotation = (self.rotation * by).unit();
    }

    /// Recompute the cached model, inverse-model, and rotation matrices
    /// from current state.
    pub fn update_matrices(&mut self) {
        let r = self.rotation.matrix();
        self.rotation_matrix = rotation_only(&r);
        self.model_matrix = Self::matrix(self.scale_factor, &r, self.translation);
        self.model_inverse = Self::inverse_matrix(self.scale_factor, &r, self.translation);
    }

    /// Column-major model matrix, as uploaded to the renderer
    #[inline]
    pub fn model_matrix(&self) -> &[f32; 16] {
        &self.model_matrix
    }

    /// Column-major inverse of the model matrix
    #[inline]
    pub fn model_inverse(&self) -> &[f32; 16] {
        &self.model_inverse
    }

    /// Rotation-only 3×3, for transforming normals
    #[inline]
    pub fn rotation_matrix(&self) -> &[f32; 9] {
        &self.rotation_matrix
    }

    fn matrix(scale: f64, rotation: &[f64; 9], translation: Vec3) -> [f32; 16] {
        [
            (scale * rotation[0]) as f32,
            (scale * rotation[1]) as f32,
            (scale * rotation[2]) as f32,
            0.0,
            (scale * rotation[3]) as f32,
            (scale * rotation[4]) as f32,
            (scale * rotation[5]) as f32,
            0.0,
            (scale * rotation[6]) as f32,
            (scale * rotation[7]) as f32,
            (scale * rotation[8]) as f32,
            0.0,
            translation.x as f32,
            translation.y as f32,
            translation.z as f32,
            1.0,
        ]
    }

    // The model is scale-rotate-translate, so the inverse is the transposed
    // rotation over the scale, with the translation carried through it.
    fn inverse_matrix(scale: f64, rotation: &[f64; 9], translation: Vec3) -> [f32; 16] {
        let factor = 1.0 / scale;
        let a = rotation[0] * factor;
        let b = rotation[1] * factor;
        let c = rotation[2] * factor;
        let d = rotation[3] * factor;
        let e = rotation[4] * factor;
        let f = rotation[5] * factor;
        let g = rotation[6] * factor;
        let h = rotation[7] * factor;
        let i = rotation[8] * factor;
        [
            a as f32,
            d as f32,
            g as f32,
            0.0,
            b as f32,
            e as f32,
            h as f32,
            0.0,
            c as f32,
            f as f32,
            i as f32,
            0.0,
            -translation.dot(&Vec3::new(a, b, c)) as f32,
            -translation.dot(&Vec3::new(d, e, f)) as f32,
            -translation.dot(&Vec3::new(g, h, i)) as f32,
            1.0,
        ]
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(1.0, &[], Vec3::zero())
    }
}

#[inline]
fn rotation_only(r: &[f64; 9]) -> [f32; 9] {
    [
        r[0] as f32,
        r[1] as f32,
        r[2] as f32,
        r[3] as f32,
        r[4] as f32,
        r[5] as f32,
        r[6] as f32,
        r[7] as f32,
        r[8] as f32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Column-major 4×4 product
    fn mat4_mul(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        out
    }

    fn assert_identity(m: &[f32; 16], tolerance: f32) {
        for col in 0..4 {
            for row in 0..4 {
                let expected = if col == row { 1.0 } else { 0.0 };
                assert!(
                    (m[col * 4 + row] - expected).abs() < tolerance,
                    "entry ({}, {}) = {} in {:?}",
                    row,
                    col,
                    m[col * 4 + row],
                    m
                );
            }
        }
    }

    #[test]
    fn test_identity_round_trip() {
        let t = Transform::default();
        assert_identity(&mat4_mul(t.model_matrix(), t.model_inverse()), 1e-6);
    }

    #[test]
    fn test_translation_round_trip() {
        let t = Transform::new(1.0, &[], Vec3::new(3.0, -1.5, 0.25));
        assert_identity(&mat4_mul(t.model_matrix(), t.model_inverse()), 1e-6);
    }

    #[test]
    fn test_full_round_trip() {
        let q1 = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 0.8);
        let q2 = Quat::from_axis_angle(Vec3::new(1.0, 0.0, 0.0), -1.3);
        let t = Transform::new(2.5, &[q1, q2], Vec3::new(-4.0, 2.0, 7.0));
        assert_identity(&mat4_mul(t.model_matrix(), t.model_inverse()), 1e-5);
        assert_identity(&mat4_mul(t.model_inverse(), t.model_matrix()), 1e-5);
    }

    #[test]
    fn test_stale_then_updated() {
        let mut t = Transform::default();
        let before = *t.model_matrix();
        t.rotate(Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.5));
        // matrices are cached: unchanged until update_matrices
        assert_eq!(before, *t.model_matrix());
        t.update_matrices();
        assert_ne!(before, *t.model_matrix());
        assert_identity(&mat4_mul(t.model_matrix(), t.model_inverse()), 1e-6);
    }

    #[test]
    fn test_rotation_matrix_orthonormal() {
        let mut t = Transform::new(
            3.0,
            &[Quat::from_axis_angle(Vec3::new(0.6, 0.0, 0.8), 2.1)],
            Vec3::new(1.0, 1.0, 1.0),
        );
        t.rotate(Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), 0.4));
        t.update_matrices();
        let r = t.rotation_matrix();
        for col in 0..3 {
            let len2: f32 = (0..3).map(|row| r[col * 3 + row] * r[col * 3 + row]).sum();
            assert!((len2 - 1.0).abs() < 1e-5);
        }
    }
}
