//! Scene primitives and the validated scene container.
//!
//! A `Scene` is checked once when it is built and is immutable afterwards,
//! so the renderer can share it across workers without locking.

use orb_math::{Color, Vec3};
use thiserror::Error;

use crate::material::Material;

/// Errors raised while constructing a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Scene has no spheres")]
    NoSpheres,

    #[error("Scene has no lights")]
    NoLights,

    #[error("Sphere {index} has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Light {index} has invalid intensity {intensity} (must be positive and finite)")]
    InvalidIntensity { index: usize, intensity: f32 },

    #[error("Sphere {index} has negative material {field}: {value}")]
    NegativeCoefficient {
        index: usize,
        field: &'static str,
        value: f32,
    },

    #[error("Ambient term must be non-negative, got {0}")]
    InvalidAmbient(f32),

    #[error("Camera forward direction is zero or not finite")]
    DegenerateCamera,

    #[error("No sphere at index {0}")]
    UnknownSphere(usize),
}

/// Result type for scene construction.
pub type SceneResult<T> = Result<T, SceneError>;

/// A one-color sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub color: Color,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, color: Color, radius: f32, material: Material) -> Self {
        Self {
            center,
            color,
            radius,
            material,
        }
    }

    /// Same sphere moved to a new center.
    pub fn moved_to(&self, center: Vec3) -> Self {
        Self { center, ..*self }
    }
}

/// A point light with inverse-square falloff.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
}

impl PointLight {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: f32) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// Light intensity arriving at `point`.
    pub fn intensity_at(&self, point: Vec3) -> f32 {
        self.intensity / self.position.distance_squared(point)
    }
}

/// Pinhole camera pose.
///
/// Primary rays start at `position` and point along `forward`, perturbed by
/// the pixel's screen offset. `view_scale` widens or narrows the field of
/// view; at 1.0 the screen spans one unit at unit distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub view_scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z)
    }
}

impl Camera {
    /// Create a camera at `position` looking along `forward`.
    pub fn new(position: Vec3, forward: Vec3) -> Self {
        Self {
            position,
            forward,
            up: Vec3::Y,
            view_scale: 1.0,
        }
    }

    /// Create a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self::new(position, target - position)
    }

    /// Set the field of view multiplier.
    pub fn with_view_scale(mut self, view_scale: f32) -> Self {
        self.view_scale = view_scale;
        self
    }

    /// Set the world up hint used to orient the screen.
    pub fn with_up(mut self, up: Vec3) -> Self {
        self.up = up;
        self
    }

    fn is_degenerate(&self) -> bool {
        !self.forward.is_finite() || self.forward.length_squared() == 0.0
    }
}

/// Ambient term used when a scene does not set one.
pub const DEFAULT_AMBIENT: f32 = 0.0;

/// Background used when a scene does not set one.
pub const DEFAULT_BACKGROUND: Color = Color::new(22.0 / 255.0, 22.0 / 255.0, 22.0 / 255.0);

/// A complete, validated scene: spheres, lights and a camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    name: String,
    pub(crate) spheres: Vec<Sphere>,
    lights: Vec<PointLight>,
    camera: Camera,
    ambient: f32,
    background: Color,
}

impl Scene {
    /// Create and validate a scene with the default ambient term and background.
    pub fn new(
        name: impl Into<String>,
        spheres: Vec<Sphere>,
        lights: Vec<PointLight>,
        camera: Camera,
    ) -> SceneResult<Self> {
        let scene = Self {
            name: name.into(),
            spheres,
            lights,
            camera,
            ambient: DEFAULT_AMBIENT,
            background: DEFAULT_BACKGROUND,
        };
        scene.validate()?;
        Ok(scene)
    }

    /// Start building a scene.
    pub fn builder(name: impl Into<String>) -> SceneBuilder {
        SceneBuilder::new(name)
    }

    /// Scene name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spheres in scene order (nearest-hit ties resolve to the earlier one).
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Point lights in scene order.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Ambient term added to every lit contribution.
    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    /// Color returned for rays that escape the scene.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Get sphere count.
    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    fn validate(&self) -> SceneResult<()> {
        if self.spheres.is_empty() {
            return Err(SceneError::NoSpheres);
        }
        if self.lights.is_empty() {
            return Err(SceneError::NoLights);
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !(sphere.radius > 0.0 && sphere.radius.is_finite()) {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            for (field, value) in sphere.material.coefficients() {
                if value < 0.0 {
                    return Err(SceneError::NegativeCoefficient {
                        index,
                        field,
                        value,
                    });
                }
            }
            if sphere.material.reflectivity > 1.0 {
                log::warn!(
                    "Sphere {} reflectivity {} is above 1.0; reflected energy will be capped",
                    index,
                    sphere.material.reflectivity
                );
            }
        }

        for (index, light) in self.lights.iter().enumerate() {
            if !(light.intensity > 0.0 && light.intensity.is_finite()) {
                return Err(SceneError::InvalidIntensity {
                    index,
                    intensity: light.intensity,
                });
            }
        }

        if !(self.ambient >= 0.0) {
            return Err(SceneError::InvalidAmbient(self.ambient));
        }

        if self.camera.is_degenerate() {
            return Err(SceneError::DegenerateCamera);
        }

        Ok(())
    }
}

/// Incremental scene construction. Validation happens in [`SceneBuilder::build`].
#[derive(Clone, Debug)]
pub struct SceneBuilder {
    name: String,
    spheres: Vec<Sphere>,
    lights: Vec<PointLight>,
    camera: Camera,
    ambient: f32,
    background: Color,
}

impl SceneBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spheres: Vec::new(),
            lights: Vec::new(),
            camera: Camera::default(),
            ambient: DEFAULT_AMBIENT,
            background: DEFAULT_BACKGROUND,
        }
    }

    /// Add a sphere.
    pub fn sphere(mut self, sphere: Sphere) -> Self {
        self.spheres.push(sphere);
        self
    }

    /// Add a point light.
    pub fn light(mut self, light: PointLight) -> Self {
        self.lights.push(light);
        self
    }

    /// Set the camera.
    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Set the ambient term.
    pub fn ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set the background color.
    pub fn background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Validate and produce the scene.
    pub fn build(self) -> SceneResult<Scene> {
        let scene = Scene {
            name: self.name,
            spheres: self.spheres,
            lights: self.lights,
            camera: self.camera,
            ambient: self.ambient,
            background: self.background,
        };
        scene.validate()?;
        log::debug!(
            "Built scene '{}': {} spheres, {} lights",
            scene.name,
            scene.spheres.len(),
            scene.lights.len()
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -5.0), Color::ONE, 1.0, Material::default())
    }

    fn light() -> PointLight {
        PointLight::new(Vec3::ZERO, 10.0)
    }

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new("test", vec![unit_sphere()], vec![light()], Camera::default())
            .expect("valid scene");

        assert_eq!(scene.name(), "test");
        assert_eq!(scene.sphere_count(), 1);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.ambient(), DEFAULT_AMBIENT);
        assert_eq!(scene.background(), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_builder_preserves_order() {
        let far = unit_sphere().moved_to(Vec3::new(0.0, 0.0, -20.0));
        let scene = Scene::builder("ordered")
            .sphere(unit_sphere())
            .sphere(far)
            .light(light())
            .ambient(0.05)
            .background(Color::ZERO)
            .build()
            .expect("valid scene");

        assert_eq!(scene.spheres()[1].center.z, -20.0);
        assert_eq!(scene.ambient(), 0.05);
        assert_eq!(scene.background(), Color::ZERO);
    }

    #[test]
    fn test_empty_lists_rejected() {
        let err = Scene::new("empty", vec![], vec![light()], Camera::default()).unwrap_err();
        assert_eq!(err, SceneError::NoSpheres);

        let err = Scene::new("dark", vec![unit_sphere()], vec![], Camera::default()).unwrap_err();
        assert_eq!(err, SceneError::NoLights);
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut flat = unit_sphere();
        flat.radius = 0.0;

        let err = Scene::builder("flat")
            .sphere(unit_sphere())
            .sphere(flat)
            .light(light())
            .build()
            .unwrap_err();

        assert_eq!(err, SceneError::InvalidRadius { index: 1, radius: 0.0 });
        assert!(err.to_string().contains("Sphere 1"));
    }

    #[test]
    fn test_negative_intensity_rejected() {
        let err = Scene::new(
            "neg",
            vec![unit_sphere()],
            vec![PointLight::new(Vec3::ZERO, -1.0)],
            Camera::default(),
        )
        .unwrap_err();

        assert!(matches!(err, SceneError::InvalidIntensity { index: 0, .. }));
    }

    #[test]
    fn test_negative_coefficient_rejected() {
        let mut sphere = unit_sphere();
        sphere.material.specular = -0.1;

        let err = Scene::new("neg", vec![sphere], vec![light()], Camera::default()).unwrap_err();

        assert!(matches!(
            err,
            SceneError::NegativeCoefficient { index: 0, field: "specular", .. }
        ));
    }

    #[test]
    fn test_degenerate_camera_rejected() {
        let err = Scene::new(
            "blind",
            vec![unit_sphere()],
            vec![light()],
            Camera::new(Vec3::ZERO, Vec3::ZERO),
        )
        .unwrap_err();

        assert_eq!(err, SceneError::DegenerateCamera);
    }

    #[test]
    fn test_negative_ambient_rejected() {
        let err = Scene::builder("ambient")
            .sphere(unit_sphere())
            .light(light())
            .ambient(-0.5)
            .build()
            .unwrap_err();

        assert_eq!(err, SceneError::InvalidAmbient(-0.5));
    }

    #[test]
    fn test_over_reflective_sphere_is_accepted() {
        let _ = env_logger::builder().is_test(true).try_init();

        let bright = Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            Color::ONE,
            1.0,
            Material::mirror().with_reflectivity(1.5),
        );
        let scene = Scene::new("bright", vec![bright], vec![light()], Camera::default())
            .expect("reflectivity above one only warns");
        assert_eq!(scene.spheres()[0].material.reflectivity, 1.5);
    }

    #[test]
    fn test_light_inverse_square() {
        let light = PointLight::new(Vec3::ZERO, 100.0);
        assert!((light.intensity_at(Vec3::new(0.0, 0.0, 5.0)) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_camera_looking_at() {
        let camera = Camera::looking_at(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO);
        assert_eq!(camera.forward, Vec3::new(0.0, 0.0, -2.0));
        assert_eq!(camera.up, Vec3::Y);
    }
}
