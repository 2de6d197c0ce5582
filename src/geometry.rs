//! Sphere mesh generation for the decorative globe ball.
//!
//! Builds six tangent-plane plates of a cube, spaced at tan-of-equal-angles,
//! and projects them onto the sphere. Output is an interleaved
//! [position ×3, normal ×3] vertex buffer and a triangle index buffer,
//! generated once at startup for the rendering collaborator.

use crate::math3d::Vec3;

/// Floats per mesh vertex: position ×3, normal ×3
pub const SPHERE_VERTEX_STRIDE: usize = 6;

fn sphere_plate(
    subdivisions: usize,
    radius: f64,
    normal: Vec3,
    tangent: Vec3,
    coordinates: &mut Vec<f32>,
    triangles: &mut Vec<u32>,
    offset: u32,
) -> u32 {
    let delta = 0.5 * std::f64::consts::PI / subdivisions as f64;
    // tangent points "right" and bitangent points "up" across the plate
    let bitangent = normal.cross(&tangent);

    let mut alpha = -0.25 * std::f64::consts::PI;
    for row in 0..=subdivisions {
        let a = alpha.tan();
        let mut beta = -0.25 * std::f64::consts::PI;
        for part in 0..=subdivisions {
            let b = beta.tan();
            let x = normal.x - a * tangent.x + b * bitangent.x;
            let y = normal.y - a * tangent.y + b * bitangent.y;
            let z = normal.z - a * tangent.z + b * bitangent.z;

            let n_inv = 1.0 / (x * x + y * y + z * z).sqrt();
            let r_inv = radius * n_inv;
            // spatial coordinates
            coordinates.push((x * r_inv) as f32);
            coordinates.push((y * r_inv) as f32);
            coordinates.push((z * r_inv) as f32);
            // vertex normal coordinates
            coordinates.push((x * n_inv) as f32);
            coordinates.push((y * n_inv) as f32);
            coordinates.push((z * n_inv) as f32);

            if row != 0 && part != 0 {
                let lead = offset + (row * (subdivisions + 1) + part) as u32;
                let left = lead - 1;
                let bottom = lead - (subdivisions + 1) as u32;
                let root = bottom - 1;
                // flip the quad diagonal per quadrant so it follows the
                // plate's curvature
                if (b < 0.0) == (a < 0.0) {
                    triangles.extend_from_slice(&[root, lead, left, root, bottom, lead]);
                } else {
                    triangles.extend_from_slice(&[root, bottom, left, lead, left, bottom]);
                }
            }

            beta += delta;
        }
        alpha += delta;
    }
    ((subdivisions + 1) * (subdivisions + 1)) as u32
}

/// Interleaved vertex and index buffers for a sphere of the given radius.
pub fn make_sphere(radius: f64, subdivisions: usize) -> (Vec<f32>, Vec<u32>) {
    let plates = [
        (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 1.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)),
        (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, -1.0, 0.0)),
        (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0)),
        (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0)),
    ];

    let mut coordinates = Vec::new();
    let mut triangles = Vec::new();
    let mut offset = 0;
    for (normal, tangent) in plates {
        offset += sphere_plate(
            subdivisions,
            radius,
            normal,
            tangent,
            &mut coordinates,
            &mut triangles,
            offset,
        );
    }
    (coordinates, triangles)
}
