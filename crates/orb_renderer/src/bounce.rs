//! A single segment of a light path.

use orb_core::Scene;
use orb_math::{Color, Ray, VectorExt};

use crate::hittable::{Hit, Hittable, Intersection};
use crate::shading::{light_contribution, SURFACE_OFFSET};

/// Outcome of tracing one ray segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bounce {
    /// The ray left the scene; the path ends here.
    Escaped { background: Color },

    /// The ray struck a surface.
    Surface {
        /// Shaded color of this segment, clamped to [0, 1]
        color: Color,
        /// Surface that was hit
        hit: Hit,
        /// Mirror-reflected continuation, starting just off the surface.
        /// The direction is unit length.
        next: Ray,
    },
}

impl Bounce {
    /// Color this segment adds before attenuation.
    pub fn color(&self) -> Color {
        match self {
            Bounce::Escaped { background } => *background,
            Bounce::Surface { color, .. } => *color,
        }
    }

    /// The intersection that produced this bounce.
    pub fn intersection(&self) -> Intersection {
        match self {
            Bounce::Escaped { .. } => Intersection::Miss,
            Bounce::Surface { hit, .. } => Intersection::Hit(*hit),
        }
    }

    /// Ray for the following bounce, if the path continues.
    pub fn next_ray(&self) -> Option<Ray> {
        match self {
            Bounce::Escaped { .. } => None,
            Bounce::Surface { next, .. } => Some(*next),
        }
    }

    pub fn is_escaped(&self) -> bool {
        matches!(self, Bounce::Escaped { .. })
    }
}

/// Trace `ray` to its nearest surface, shade it from every unoccluded light
/// and compute the reflected continuation.
pub fn bounce(ray: &Ray, scene: &Scene) -> Bounce {
    let hit = match scene.spheres().intersect(ray) {
        Intersection::Hit(hit) => hit,
        Intersection::Miss => {
            return Bounce::Escaped {
                background: scene.background(),
            }
        }
    };

    let color = scene
        .lights()
        .iter()
        .map(|light| light_contribution(&hit, ray, light, scene.spheres(), scene.ambient()))
        .fold(Color::ZERO, |sum, c| sum + c)
        .clamp_components(0.0, 1.0);

    let next = Ray::new(
        hit.point + hit.normal * SURFACE_OFFSET,
        ray.direction.reflect_about(hit.normal).normalize(),
    );

    Bounce::Surface { color, hit, next }
}
