/// Closed range `[min, max]` of ray distances or channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Displayable range of a color channel.
    pub const UNIT: Interval = Interval::new(0.0, 1.0);

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min <= x <= max`
    #[inline]
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// `min < x < max`
    #[inline]
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Pull `x` into the range. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, x: f32) -> f32 {
        if x >= self.min {
            x.min(self.max)
        } else {
            self.min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let range = Interval::new(1e-4, 9999.0);

        assert!(range.contains(1e-4));
        assert!(!range.surrounds(1e-4));
        assert!(range.contains(9999.0));
        assert!(!range.surrounds(9999.0));
        assert!(range.surrounds(4.0));
        assert!(!range.contains(-4.0));
    }

    #[test]
    fn test_unit_clamp() {
        assert_eq!(Interval::UNIT.clamp(-0.2), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.4), 0.4);
        assert_eq!(Interval::UNIT.clamp(7.0), 1.0);
        assert_eq!(Interval::UNIT.clamp(f32::INFINITY), 1.0);
        assert_eq!(Interval::UNIT.clamp(f32::NAN), 0.0);
    }

    #[test]
    fn test_nan_is_never_inside() {
        assert!(!Interval::UNIT.contains(f32::NAN));
        assert!(!Interval::UNIT.surrounds(f32::NAN));
    }
}
