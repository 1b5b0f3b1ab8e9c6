//! Ray/sphere intersection.
//!
//! Misses are an explicit [`Intersection::Miss`] variant rather than a hit
//! record pushed out to a far sentinel distance.

use orb_core::{Material, Sphere};
use orb_math::{Color, Interval, Ray, Vec3};

/// Hits closer than this are treated as the ray re-hitting the surface it
/// just left.
pub const SELF_INTERSECTION_EPSILON: f32 = 1e-4;

/// Draw distance. Anything farther counts as a miss.
pub const MAX_DISTANCE: f32 = 9999.0;

const HIT_RANGE: Interval = Interval::new(SELF_INTERSECTION_EPSILON, MAX_DISTANCE);

/// Record of a ray-sphere hit.
///
/// Surface properties are copied out of the sphere; a hit does not borrow
/// the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Distance along the (unit) ray direction
    pub distance: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit normal at the hit point
    pub normal: Vec3,
    /// Base color of the surface
    pub color: Color,
    /// Material of the surface
    pub material: Material,
}

/// Result of an intersection query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    Hit(Hit),
    Miss,
}

impl Intersection {
    /// Distance to the hit, or `None` on a miss.
    pub fn distance(&self) -> Option<f32> {
        match self {
            Intersection::Hit(hit) => Some(hit.distance),
            Intersection::Miss => None,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Intersection::Miss)
    }

    /// The hit record, if any.
    pub fn hit(&self) -> Option<&Hit> {
        match self {
            Intersection::Hit(hit) => Some(hit),
            Intersection::Miss => None,
        }
    }

    /// Keep whichever of `self` and `other` is nearer. Ties keep `self`.
    pub fn nearer(self, other: Intersection) -> Intersection {
        match (self.distance(), other.distance()) {
            (Some(a), Some(b)) if b < a => other,
            (None, Some(_)) => other,
            _ => self,
        }
    }
}

/// Trait for geometry that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection of `ray` with this object.
    ///
    /// `ray.direction` must be unit length for the returned distance to be
    /// a world-space distance.
    fn intersect(&self, ray: &Ray) -> Intersection;
}

impl Hittable for Sphere {
    fn intersect(&self, ray: &Ray) -> Intersection {
        let radius2 = self.radius * self.radius;
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction);
        let d2 = l.dot(l) - tca * tca;
        if d2 > radius2 {
            return Intersection::Miss;
        }

        let thc = (radius2 - d2).sqrt();
        let t = (tca - thc).min(tca + thc);
        if !HIT_RANGE.contains(t) {
            return Intersection::Miss;
        }

        let point = ray.at(t);
        Intersection::Hit(Hit {
            distance: t,
            point,
            // `point` is only approximately on the surface
            normal: (point - self.center).normalize(),
            color: self.color,
            material: self.material,
        })
    }
}

/// A scene's sphere list, scanned in order.
impl Hittable for [Sphere] {
    fn intersect(&self, ray: &Ray) -> Intersection {
        self.iter()
            .fold(Intersection::Miss, |nearest, sphere| {
                nearest.nearer(sphere.intersect(ray))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, Color::new(0.5, 0.5, 0.5), radius, Material::default())
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = sphere.intersect(&ray);
        assert!((hit.distance().expect("should hit") - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_sphere_miss_pointing_away() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(sphere.intersect(&ray).is_miss());
    }

    #[test]
    fn test_sphere_miss_outside_silhouette() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(sphere.intersect(&ray).is_miss());
    }

    #[test]
    fn test_through_center_distance_is_tca_minus_radius() {
        let center = Vec3::new(1.0, 2.0, -7.0);
        let sphere = sphere_at(center, 1.5);
        let ray = Ray::towards(Vec3::new(-1.0, 0.5, 0.0), center);
        let tca = (center - ray.origin).length();

        let distance = sphere.intersect(&ray).distance().expect("should hit");
        assert!((distance - (tca - 1.5)).abs() < 1e-4);
    }

    #[test]
    fn test_normal_is_outward_unit() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = *sphere.intersect(&ray).hit().expect("should hit");
        assert_eq!(hit.distance, 4.0);
        assert!((hit.normal - Vec3::Z).length() < 1e-6);
        assert!((hit.point - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-6);
    }

    #[test]
    fn test_normal_is_unit_for_off_axis_and_large_spheres() {
        let floor = sphere_at(Vec3::new(0.0, -1001.0, -6.0), 1000.0);
        let ball = sphere_at(Vec3::new(0.3, -0.2, -7.0), 1.3);

        for (sphere, target) in [
            (&floor, Vec3::new(2.5, -1.0, -9.0)),
            (&ball, Vec3::new(0.9, 0.4, -6.0)),
            (&ball, Vec3::new(-0.5, -1.1, -6.5)),
        ] {
            let ray = Ray::towards(Vec3::new(0.1, 0.6, 1.0), target);
            let hit = *sphere.intersect(&ray).hit().expect("aimed at the surface");
            assert!((hit.normal.length() - 1.0).abs() < 1e-6);
            assert!(hit.normal.dot(ray.direction) < 0.0);
        }
    }

    #[test]
    fn test_origin_on_surface_does_not_self_hit() {
        let sphere = sphere_at(Vec3::ZERO, 1.0);

        // Leaving the surface outward: nearer root is ~0
        let ray = Ray::new(Vec3::new(0.0, 0.0, 1.0), Vec3::Z);
        assert!(sphere.intersect(&ray).is_miss());
    }

    #[test]
    fn test_beyond_draw_distance_is_miss() {
        let sphere = sphere_at(Vec3::new(0.0, 0.0, -20000.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.intersect(&ray).is_miss());
    }

    #[test]
    fn test_list_returns_nearest() {
        let spheres = vec![
            sphere_at(Vec3::new(0.0, 0.0, -10.0), 1.0),
            sphere_at(Vec3::new(0.0, 0.0, -4.0), 1.0),
        ];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let distance = spheres.as_slice().intersect(&ray).distance();
        assert_eq!(distance, Some(3.0));
    }

    #[test]
    fn test_list_ties_keep_first() {
        let mut first = sphere_at(Vec3::new(0.0, 0.0, -4.0), 1.0);
        first.color = Color::X;
        let mut second = first;
        second.color = Color::Y;

        let spheres = [first, second];
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = spheres[..].intersect(&ray);
        assert_eq!(hit.hit().map(|h| h.color), Some(Color::X));
    }

    #[test]
    fn test_empty_list_misses() {
        let spheres: [Sphere; 0] = [];
        assert!(spheres[..].intersect(&Ray::default()).is_miss());
    }
}
