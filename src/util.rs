//! Shared utilities

use crate::math3d::Vec3;

/// Simple deterministic RNG using xorshift64
/// Good for simulations that need reproducible layouts without external dependencies
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) } // Ensure non-zero
    }

    /// Get the next random u64
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Get a random f64 in [0, 1)
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Get a random f64 in [min, max)
    #[inline]
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

// ============================================================================
// Rejection sampling
// ============================================================================

/// Attempt cap for the rejection loop. Acceptance probability is π/6 per
/// draw, so 64 consecutive misses has probability below 1e-20; the cap
/// exists only to rule out nontermination on a pathological generator.
const MAX_REJECTS: u32 = 64;

/// Uniformly distributed point inside the unit ball.
///
/// Samples [-1,1]³ and rejects points outside the ball (and the degenerate
/// near-zero samples that cannot be projected onto the sphere).
pub fn sample_in_ball(rng: &mut Rng) -> Vec3 {
    for _ in 0..MAX_REJECTS {
        let x = rng.range_f64(-1.0, 1.0);
        let y = rng.range_f64(-1.0, 1.0);
        let z = rng.range_f64(-1.0, 1.0);

        let r2 = x * x + y * y + z * z;
        if r2 <= 1.0 && r2 > 1e-12 {
            return Vec3::new(x, y, z);
        }
    }
    // statistically unreachable with a working generator
    Vec3::new(1.0, 0.0, 0.0)
}

/// Uniformly distributed point on the unit sphere (ball sample, projected)
#[inline]
pub fn sample_on_sphere(rng: &mut Rng) -> Vec3 {
    sample_in_ball(rng).unit()
}

// ============================================================================
// FPS Counter
// ============================================================================

use std::collections::VecDeque;
use std::time::Instant;

/// FPS counter with rolling average, used by the demo driver
pub struct FpsCounter {
    frame_times: VecDeque<f64>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count,
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, current_fps, average_fps)
    pub fn tick(&mut self) -> (f64, f64, f64) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f64();
        self.last_frame = now;

        // Add to rolling window
        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let current_fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        let avg_dt: f64 =
            self.frame_times.iter().sum::<f64>() / self.frame_times.len().max(1) as f64;
        let avg_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        (dt, current_fps, avg_fps)
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f64 {
        let avg_dt: f64 =
            self.frame_times.iter().sum::<f64>() / self.frame_times.len().max(1) as f64;
        avg_dt * 1000.0
    }

    /// Get min/max FPS from sample window
    pub fn min_max_fps(&self) -> (f64, f64) {
        if self.frame_times.is_empty() {
            return (0.0, 0.0);
        }
        let min_dt = self
            .frame_times
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let max_dt = self.frame_times.iter().copied().fold(0.0, f64::max);
        let max_fps = if min_dt > 0.0 { 1.0 / min_dt } else { 0.0 };
        let min_fps = if max_dt > 0.0 { 1.0 / max_dt } else { 0.0 };
        (min_fps, max_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_next_f64_range() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_ball_samples_inside() {
        let mut rng = Rng::new(1);
        for _ in 0..10_000 {
            let p = sample_in_ball(&mut rng);
            assert!(p.magnitude() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_ball_samples_unbiased() {
        // mean of a uniform ball distribution is the origin
        let mut rng = Rng::new(99);
        let mut sum = Vec3::zero();
        let n = 20_000;
        for _ in 0..n {
            sum = sum + sample_in_ball(&mut rng);
        }
        let mean = sum * (1.0 / n as f64);
        assert!(mean.magnitude() < 0.02, "mean {:?} too far from origin", mean);
    }

    #[test]
    fn test_sphere_samples_uniform_over_octants() {
        // coarse chi-square over the 8 octants; each should hold ~n/8
        let mut rng = Rng::new(1234);
        let n = 16_000;
        let mut bins = [0usize; 8];
        for _ in 0..n {
            let p = sample_on_sphere(&mut rng);
            assert!((p.magnitude() - 1.0).abs() < 1e-9);
            let idx = usize::from(p.x > 0.0)
                | (usize::from(p.y > 0.0) << 1)
                | (usize::from(p.z > 0.0) << 2);
            bins[idx] += 1;
        }
        let expected = n as f64 / 8.0;
        let chi2: f64 = bins
            .iter()
            .map(|&b| {
                let d = b as f64 - expected;
                d * d / expected
            })
            .sum();
        // 7 degrees of freedom, p = 0.001 critical value is 24.32
        assert!(chi2 < 24.32, "chi-square {} over octant bins {:?}", chi2, bins);
    }

    #[test]
    fn test_sphere_sampling_deterministic() {
        let mut a = Rng::new(5);
        let mut b = Rng::new(5);
        for _ in 0..100 {
            assert_eq!(sample_on_sphere(&mut a), sample_on_sphere(&mut b));
        }
    }
}
