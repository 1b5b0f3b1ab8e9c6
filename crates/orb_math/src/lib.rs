//! Orb Math - vector types for the sphere tracer.
//!
//! Points, directions and colors are all glam `Vec3` (f32). This crate adds
//! the tracer's reflection and clamping helpers, plus `Ray` and `Interval`.

pub use glam::*;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::VectorExt;

/// Linear RGB color; channels are x/y/z and displayable within [0, 1].
pub type Color = Vec3;
