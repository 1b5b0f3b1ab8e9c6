//! Primary ray generation.

use orb_core::Camera;
use orb_math::{Ray, Vec3};

/// Precomputed screen basis for one camera and image size.
///
/// Pixel (x, y) maps to screen offsets `u = x / width - 0.5` and
/// `v = 0.5 - y / height`, so row 0 is the top of the image. The ray
/// direction is `forward + right * u * aspect + up * v`, scaled by the
/// camera's view scale and normalized.
#[derive(Debug, Clone, Copy)]
pub struct PrimaryRays {
    origin: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    width: f32,
    height: f32,
    aspect: f32,
    view_scale: f32,
}

impl PrimaryRays {
    /// Build the basis. `camera.forward` must be non-zero (scene validation
    /// guarantees it).
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let forward = camera.forward.normalize();
        let right = forward
            .cross(camera.up)
            .try_normalize()
            .unwrap_or_else(|| forward.any_orthonormal_vector());
        let up = right.cross(forward);

        Self {
            origin: camera.position,
            forward,
            right,
            up,
            width: width as f32,
            height: height as f32,
            aspect: width as f32 / height as f32,
            view_scale: camera.view_scale,
        }
    }

    /// Normalized screen offsets of a pixel, each in [-0.5, 0.5).
    pub fn screen_offset(&self, x: u32, y: u32) -> (f32, f32) {
        let u = x as f32 / self.width - 0.5;
        let v = 0.5 - y as f32 / self.height;
        (u, v)
    }

    /// Camera ray through pixel (x, y).
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        let (u, v) = self.screen_offset(x, y);
        let offset = (self.right * u * self.aspect + self.up * v) * self.view_scale;
        Ray::new(self.origin, (self.forward + offset).normalize())
    }
}
