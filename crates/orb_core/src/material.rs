//! Surface material coefficients.

/// Phong-style surface description.
///
/// All coefficients are expected to be non-negative. `reflectivity` is the
/// fraction of energy carried into the next bounce and is conventionally in
/// `[0, 1]`. `opacity` and `refraction_index` are carried with the surface but
/// the tracer does not refract.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Weight of the Lambertian term
    pub diffuse: f32,

    /// Weight of the specular highlight
    pub specular: f32,

    /// Specular exponent (higher is a tighter highlight)
    pub glossiness: f32,

    /// Fraction of energy reflected into the next bounce
    pub reflectivity: f32,

    /// Opacity (0=transparent, 1=opaque)
    pub opacity: f32,

    /// Index of refraction
    pub refraction_index: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.8, 0.2, 16.0)
    }
}

impl Material {
    /// Create an opaque, non-reflective material from its Phong weights.
    pub const fn new(diffuse: f32, specular: f32, glossiness: f32) -> Self {
        Self {
            diffuse,
            specular,
            glossiness,
            reflectivity: 0.0,
            opacity: 1.0,
            refraction_index: 1.0,
        }
    }

    /// A material with every Phong coefficient set to the same value.
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// A polished mirror: weak diffuse, sharp highlight, full reflection.
    pub const fn mirror() -> Self {
        Self::new(0.1, 0.9, 128.0).with_reflectivity(1.0)
    }

    /// Set the reflectivity.
    pub const fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self
    }

    /// Set the opacity.
    pub const fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the index of refraction.
    pub const fn with_refraction_index(mut self, refraction_index: f32) -> Self {
        self.refraction_index = refraction_index;
        self
    }

    /// Named coefficients, in declaration order. Used for validation messages.
    pub fn coefficients(&self) -> [(&'static str, f32); 6] {
        [
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("glossiness", self.glossiness),
            ("reflectivity", self.reflectivity),
            ("opacity", self.opacity),
            ("refraction_index", self.refraction_index),
        ]
    }

    /// Check if a bounce off this surface carries any energy forward.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }
}
