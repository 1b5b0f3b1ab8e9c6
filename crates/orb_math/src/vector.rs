use crate::Vec3;

/// Tracer-specific vector helpers layered on top of glam's `Vec3`.
///
/// glam covers arithmetic, `dot`, `length` and `normalize`; these add the
/// operations the shading code is written in terms of.
pub trait VectorExt: Sized {
    /// Linear interpolation: `self * (1 - t) + other * t`.
    fn mix(self, other: Self, t: f32) -> Self;

    /// Reflect the incident direction about `normal`.
    ///
    /// The incident vector is normalized first, so the result is unit length
    /// whenever `normal` is. Returns `normalize(i) - normal * 2 * dot(normal, normalize(i))`.
    fn reflect_about(self, normal: Self) -> Self;

    /// Clamp every component to `[min, max]`.
    fn clamp_components(self, min: f32, max: f32) -> Self;
}

impl VectorExt for Vec3 {
    #[inline]
    fn mix(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    #[inline]
    fn reflect_about(self, normal: Self) -> Self {
        let incident = self.normalize();
        incident - normal * 2.0 * normal.dot(incident)
    }

    #[inline]
    fn clamp_components(self, min: f32, max: f32) -> Self {
        self.clamp(Vec3::splat(min), Vec3::splat(max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints() {
        let a = Vec3::new(0.0, 2.0, 4.0);
        let b = Vec3::new(1.0, 0.0, 8.0);

        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Vec3::new(0.5, 1.0, 6.0));
    }

    #[test]
    fn test_reflect_about_flips_normal_component() {
        let incident = Vec3::new(1.0, -1.0, 0.0);
        let reflected = incident.reflect_about(Vec3::Y);

        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((reflected - expected).length() < 1e-6);
    }

    #[test]
    fn test_reflect_twice_is_parallel_to_input() {
        let d = Vec3::new(0.3, -2.0, 0.7);
        let n = Vec3::new(0.2, 1.0, -0.4).normalize();

        let back = d.reflect_about(n).reflect_about(n);

        // Parallel and same orientation: the normalized vectors coincide
        assert!((back - d.normalize()).length() < 1e-5);
        assert!(back.cross(d).length() < 1e-5);
    }

    #[test]
    fn test_reflect_normalizes_incident() {
        let reflected = Vec3::new(0.0, 0.0, -10.0).reflect_about(Vec3::Z);
        assert!((reflected.length() - 1.0).abs() < 1e-6);
        assert!((reflected - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_clamp_components() {
        let v = Vec3::new(-0.5, 0.25, 3.0).clamp_components(0.0, 1.0);
        assert_eq!(v, Vec3::new(0.0, 0.25, 1.0));
    }

    #[test]
    fn test_normalize_zero_is_nan() {
        // Degenerate input is the caller's contract to avoid
        let n = Vec3::ZERO.normalize();
        assert!(n.x.is_nan());
    }
}
