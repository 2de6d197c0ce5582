//! Procedural curl-noise cloud advection over a unit sphere.
//!
//! The simulation core of an animated cloud globe: a pool of particles on
//! the unit sphere is advected along a divergence-free wind field derived
//! from a time-varying noise potential, recycled at a steady-state rate,
//! and published as a flat coordinate buffer for an external renderer. The
//! crate also carries the geometric support a rendering host needs: vector
//! and quaternion math, a cached rigid-body transform, an orbit camera, and
//! a sphere mesh generator for the globe ball.
//!
//! Everything is single-threaded and frame-stepped: call
//! [`FlowSphere::advance`] once per frame, then read
//! [`FlowSphere::coordinates`]. Windowing, shaders, and texture decoding
//! are deliberately out of scope; the outputs here are plain `f32` buffers
//! and column-major matrices.

pub mod camera;
pub mod clouds;
pub mod config;
pub mod field;
pub mod geometry;
pub mod math3d;
pub mod noise;
pub mod transform;
pub mod util;

pub use camera::BallView;
pub use clouds::{FlowSphere, CLOUDPOINT_STRIDE};
pub use config::FlowConfig;
pub use field::PotentialField;
pub use math3d::{Quat, Vec3};
pub use transform::Transform;
