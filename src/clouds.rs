//! Cloud particle system.
//!
//! A fixed pool of particles rides the wind field on the unit sphere. Each
//! step recycles a budgeted batch of the oldest records at a wrapping
//! cursor, advances the global rotation phase, then advects every particle
//! along curl + trade winds and renormalizes it back onto the sphere. The
//! coordinate buffer is the hand-off surface to the renderer: a flat `f32`
//! slice, stride [`CLOUDPOINT_STRIDE`], read between steps.

use crate::config::FlowConfig;
use crate::field::PotentialField;
use crate::math3d::Vec3;
use crate::noise::NoiseField3;
use crate::util::{sample_on_sphere, Rng};

/// Floats per particle record: position ×3, velocity ×3, age, padding
pub const CLOUDPOINT_STRIDE: usize = 8;

/// Floats per field-line segment: two vertices of position ×3 + color ×3
pub const FIELD_LINE_STRIDE: usize = 12;

pub struct FlowSphere {
    point_coordinates: Vec<f32>,
    field_lines: Vec<f32>,
    refresh_index: usize,
    refresh_rate: f64,
    theta: f64,
    rng: Rng,
    field: PotentialField,
    config: FlowConfig,
}

impl FlowSphere {
    /// Build the initial particle buffer and the auxiliary field-line
    /// buffer from a rejection-sampled layout.
    ///
    /// Initial particles carry age = lifetime, so the whole starting layout
    /// is recycled within one lifetime window.
    pub fn new(config: &FlowConfig) -> Self {
        let field = PotentialField::new(
            NoiseField3::new(config.noise_amplitude, config.noise_frequency, config.noise_seed),
            config.band_count,
            config.band_strength,
        );
        let mut rng = Rng::new(config.seed);

        let mut points = Vec::with_capacity(config.points * CLOUDPOINT_STRIDE);
        let mut lines = Vec::with_capacity(config.points * FIELD_LINE_STRIDE);
        for _ in 0..config.points {
            let position = sample_on_sphere(&mut rng);

            points.push(position.x as f32);
            points.push(position.y as f32);
            points.push(position.z as f32);
            points.push(0.0);
            points.push(0.0);
            points.push(0.0);
            points.push(config.lifetime as f32);
            points.push(0.0);

            // one short line segment per particle, colored by wind speed
            let curl = field.curl_at(&position, 0.0, 0.0, 1.0);
            let slope = (0.4 * curl.magnitude()) as f32;
            let scale = 0.01;
            for sign in [-1.0, 1.0] {
                lines.push((position.x + sign * scale * curl.x) as f32);
                lines.push((position.y + sign * scale * curl.y) as f32);
                lines.push((position.z + sign * scale * curl.z) as f32);
                lines.push(slope);
                lines.push(1.0 - (slope - 0.5).abs());
                lines.push(1.0 - slope);
            }
        }

        Self {
            point_coordinates: points,
            field_lines: lines,
            refresh_index: 0,
            refresh_rate: config.points as f64 / config.lifetime,
            theta: 0.0,
            rng,
            field,
            config: config.clone(),
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        if self.point_coordinates.is_empty() {
            return;
        }

        // steady-state recycling: overwrite floor(dt · rate) records at the
        // cursor with fresh samples, wrapping at the pool end; terminates
        // even when a huge dt makes the budget exceed the pool size
        let refresh = (dt * self.refresh_rate) as usize;
        for _ in 0..refresh {
            let position = sample_on_sphere(&mut self.rng);
            let i = self.refresh_index;
            self.point_coordinates[i] = position.x as f32;
            self.point_coordinates[i + 1] = position.y as f32;
            self.point_coordinates[i + 2] = position.z as f32;
            self.point_coordinates[i + 6] = 0.0; // age

            self.refresh_index = if i + CLOUDPOINT_STRIDE >= self.point_coordinates.len() {
                0
            } else {
                i + CLOUDPOINT_STRIDE
            };
        }

        self.theta -= self.config.spin_rate * dt;

        let cloud_speed = self.config.cloud_speed * dt;
        for i in (0..self.point_coordinates.len()).step_by(CLOUDPOINT_STRIDE) {
            let position = Vec3::new(
                f64::from(self.point_coordinates[i]),
                f64::from(self.point_coordinates[i + 1]),
                f64::from(self.point_coordinates[i + 2]),
            );

            let deflection = self.field.curl_at(
                &position,
                self.theta,
                self.config.bias,
                self.config.coriolis_strength * position.z,
            );

            let velocity = if self.config.trade_winds {
                let phi = PotentialField::latitude(position.z);
                let icz = (self.config.band_count * phi).cos();
                Vec3::new(
                    deflection.x + icz * position.y,
                    deflection.y - icz * position.x,
                    deflection.z,
                )
            } else {
                deflection
            };

            // forward Euler on the sphere manifold, projected back to unit
            // length after the step
            let point = position.add_scaled(&velocity, cloud_speed).unit();

            self.point_coordinates[i] = point.x as f32;
            self.point_coordinates[i + 1] = point.y as f32;
            self.point_coordinates[i + 2] = point.z as f32;
            self.point_coordinates[i + 3] = velocity.x as f32;
            self.point_coordinates[i + 4] = velocity.y as f32;
            self.point_coordinates[i + 5] = velocity.z as f32;

            self.point_coordinates[i + 6] += dt as f32;
        }
    }

    /// Particle records, stride [`CLOUDPOINT_STRIDE`], read-only between
    /// steps. This is the buffer the renderer re-uploads after `advance`.
    #[inline]
    pub fn coordinates(&self) -> &[f32] {
        &self.point_coordinates
    }

    /// Initial-layout wind visualization segments, stride
    /// [`FIELD_LINE_STRIDE`]
    #[inline]
    pub fn field_lines(&self) -> &[f32] {
        &self.field_lines
    }

    /// Number of particles in the pool
    #[inline]
    pub fn len(&self) -> usize {
        self.point_coordinates.len() / CLOUDPOINT_STRIDE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_coordinates.is_empty()
    }

    /// Current planetary rotation phase
    #[inline]
    pub fn theta(&self) -> f64 {
        self.theta
    }

    #[inline]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}
