//! Noise Generation Utilities
//!
//! Seeded 3D gradient noise for the atmospheric potential field: zero at
//! every lattice point, continuous first derivative.

/// Hash-based pseudo-random value for integer grid coordinates.
#[inline]
fn lattice_hash(x: i64, y: i64, z: i64, seed: u32) -> u32 {
    let mut h = u64::from(seed)
        .wrapping_add(x as u64)
        .wrapping_mul(374761393);
    h = h.wrapping_add(y as u64).wrapping_mul(668265263);
    h = h.wrapping_add(z as u64).wrapping_mul(2147483647);
    h = (h ^ (h >> 13)).wrapping_mul(1274126177);
    (h ^ (h >> 16)) as u32
}

/// Dot product of the hashed lattice gradient with the offset vector.
/// Gradients are the 12 edge vectors of a cube (Perlin's set).
#[inline]
fn grad(hash: u32, dx: f64, dy: f64, dz: f64) -> f64 {
    match hash & 15 {
        0 => dx + dy,
        1 => -dx + dy,
        2 => dx - dy,
        3 => -dx - dy,
        4 => dx + dz,
        5 => -dx + dz,
        6 => dx - dz,
        7 => -dx - dz,
        8 => dy + dz,
        9 => -dy + dz,
        10 => dy - dz,
        11 => -dy - dz,
        12 => dx + dy,
        13 => -dy + dz,
        14 => -dx + dy,
        _ => -dy - dz,
    }
}

/// Quintic smoothstep (Ken Perlin's improved version): 6t⁵ - 15t⁴ + 10t³
/// Zero first and second derivatives at the endpoints.
#[inline]
pub fn smoothstep_quintic(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

// Stretches the theoretical ±√3/2 gradient-noise range to ±1
const NORM: f64 = 1.1547005383792515;

/// Raw 3D gradient noise in approximately [-1.0, 1.0].
pub fn gradient_noise(x: f64, y: f64, z: f64, seed: u32) -> f64 {
    let ix = x.floor() as i64;
    let iy = y.floor() as i64;
    let iz = z.floor() as i64;
    let fx = x - ix as f64;
    let fy = y - iy as f64;
    let fz = z - iz as f64;
    let sx = smoothstep_quintic(fx);
    let sy = smoothstep_quintic(fy);
    let sz = smoothstep_quintic(fz);

    // Gradient contributions from the 8 corners of the unit cube
    let c000 = grad(lattice_hash(ix, iy, iz, seed), fx, fy, fz);
    let c100 = grad(lattice_hash(ix + 1, iy, iz, seed), fx - 1.0, fy, fz);
    let c010 = grad(lattice_hash(ix, iy + 1, iz, seed), fx, fy - 1.0, fz);
    let c110 = grad(lattice_hash(ix + 1, iy + 1, iz, seed), fx - 1.0, fy - 1.0, fz);
    let c001 = grad(lattice_hash(ix, iy, iz + 1, seed), fx, fy, fz - 1.0);
    let c101 = grad(lattice_hash(ix + 1, iy, iz + 1, seed), fx - 1.0, fy, fz - 1.0);
    let c011 = grad(lattice_hash(ix, iy + 1, iz + 1, seed), fx, fy - 1.0, fz - 1.0);
    let c111 = grad(
        lattice_hash(ix + 1, iy + 1, iz + 1, seed),
        fx - 1.0,
        fy - 1.0,
        fz - 1.0,
    );

    // Trilinear interpolation
    let x0 = c000 + (c100 - c000) * sx;
    let x1 = c010 + (c110 - c010) * sx;
    let x2 = c001 + (c101 - c001) * sx;
    let x3 = c011 + (c111 - c011) * sx;

    let y0 = x0 + (x1 - x0) * sy;
    let y1 = x2 + (x3 - x2) * sy;

    (y0 + (y1 - y0) * sz) * NORM
}

/// Coherent noise functor with amplitude, frequency, and seed baked in at
/// construction. Each simulation instance owns its own generator, with no
/// shared state.
#[derive(Debug, Clone, Copy)]
pub struct NoiseField3 {
    amplitude: f64,
    frequency: f64,
    seed: u32,
}

impl NoiseField3 {
    pub const fn new(amplitude: f64, frequency: f64, seed: u32) -> Self {
        Self {
            amplitude,
            frequency,
            seed,
        }
    }

    /// Sample the field. Output lies in approximately
    /// [-amplitude, amplitude].
    #[inline]
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.amplitude
            * gradient_noise(
                x * self.frequency,
                y * self.frequency,
                z * self.frequency,
                self.seed,
            )
    }
}
