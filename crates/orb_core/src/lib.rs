//! Orb Core - scene description for the sphere tracer.
//!
//! This crate provides:
//!
//! - **Primitives**: `Material`, `Sphere`, `PointLight`, `Camera`
//! - **Scenes**: validated, immutable `Scene` values and a `SceneBuilder`
//! - **Animation**: `AnimatedScene`, which produces one `Scene` snapshot per frame
//! - **Presets**: ready-made scenes for the viewer
//!
//! # Example
//!
//! ```ignore
//! use orb_core::{Camera, Material, PointLight, Scene, Sphere};
//! use orb_math::Vec3;
//!
//! let scene = Scene::builder("single")
//!     .sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE, 1.0, Material::default()))
//!     .light(PointLight::new(Vec3::ZERO, 10.0))
//!     .camera(Camera::new(Vec3::ZERO, Vec3::NEG_Z))
//!     .build()?;
//! ```

pub mod animation;
pub mod material;
pub mod presets;
pub mod scene;

// Re-export commonly used types
pub use animation::{AnimatedScene, Motion};
pub use material::Material;
pub use presets::Preset;
pub use scene::{Camera, PointLight, Scene, SceneBuilder, SceneError, SceneResult, Sphere};
