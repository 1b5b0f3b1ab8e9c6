//! Phong-style local illumination with binary shadows.

use orb_core::{PointLight, Sphere};
use orb_math::{Color, Interval, Ray, VectorExt};

use crate::hittable::{Hit, Hittable};

/// Secondary rays start this far off the surface, along the normal.
pub const SURFACE_OFFSET: f32 = 1e-3;

/// Occluders nearer than this along a shadow ray are ignored.
pub const SHADOW_EPSILON: f32 = 1e-4;

/// Unoccluded contribution of `light` at `hit`, seen along `ray`.
///
/// `color * intensity * (diffuse + specular + ambient)`, with inverse-square
/// falloff. The normal is outward and the light vector points from the
/// surface to the light.
pub fn phong(hit: &Hit, ray: &Ray, light: &PointLight, ambient: f32) -> Color {
    let to_light = light.position - hit.point;
    let intensity = light.intensity_at(hit.point);
    let material = &hit.material;

    let diffuse = to_light.normalize().dot(hit.normal).clamp(0.0, 1.0) * material.diffuse;

    // Mirror the incoming light direction and compare against the direction
    // back toward the viewer
    let reflected = (-to_light).reflect_about(hit.normal);
    let view = -ray.direction.normalize();
    let specular = reflected
        .dot(view)
        .clamp(0.0, 1.0)
        .powf(material.glossiness)
        * material.specular;

    hit.color * intensity * (diffuse + specular + ambient)
}

/// Check whether any sphere blocks the path from `hit` to `light`.
pub fn in_shadow(hit: &Hit, light: &PointLight, spheres: &[Sphere]) -> bool {
    let origin = hit.point + hit.normal * SURFACE_OFFSET;
    let light_distance = origin.distance(light.position);
    let shadow_ray = Ray::towards(origin, light.position);
    let blocking = Interval::new(SHADOW_EPSILON, light_distance);

    spheres.iter().any(|sphere| {
        sphere
            .intersect(&shadow_ray)
            .distance()
            .is_some_and(|t| blocking.surrounds(t))
    })
}

/// Contribution of one light at `hit`.
///
/// An occluded light loses its diffuse and specular terms but still adds
/// its ambient share, `color * intensity * ambient`.
pub fn light_contribution(
    hit: &Hit,
    ray: &Ray,
    light: &PointLight,
    spheres: &[Sphere],
    ambient: f32,
) -> Color {
    if in_shadow(hit, light, spheres) {
        return hit.color * light.intensity_at(hit.point) * ambient;
    }
    phong(hit, ray, light, ambient)
}
