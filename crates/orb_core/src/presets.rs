//! Built-in scenes.

use orb_math::{Color, Vec3};

use crate::animation::{AnimatedScene, Motion};
use crate::material::Material;
use crate::scene::{Camera, PointLight, Scene, SceneResult, Sphere};

/// Named scene presets available to the viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Two spheres and two lights: a large blue ball behind the camera and
    /// a small magenta one in front of it.
    Classic,
    /// A mirror ball on a huge floor sphere, colored satellites and one
    /// orbiting sphere.
    Gallery,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Classic, Preset::Gallery];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Gallery => "gallery",
        }
    }

    /// Build the preset.
    pub fn build(self) -> SceneResult<AnimatedScene> {
        match self {
            Preset::Classic => classic().map(AnimatedScene::new),
            Preset::Gallery => gallery(),
        }
    }
}

fn rgb8(r: u8, g: u8, b: u8) -> Color {
    Color::new(r as f32, g as f32, b as f32) / 255.0
}

fn classic() -> SceneResult<Scene> {
    Scene::builder(Preset::Classic.name())
        .sphere(Sphere::new(
            Vec3::new(0.0, 0.0, 4.0),
            rgb8(0, 0, 255),
            0.6,
            Material::new(0.9, 0.1, 64.0),
        ))
        .sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -1.0),
            rgb8(255, 0, 255),
            0.1,
            Material::new(0.5, 0.9, 8.0),
        ))
        .light(PointLight::new(Vec3::new(0.0, 0.0, -6.0), 100.0))
        .light(PointLight::new(Vec3::new(1.0, 1.0, 0.0), 10.0))
        .camera(Camera::new(Vec3::ZERO, Vec3::NEG_Z))
        .build()
}

fn gallery() -> SceneResult<AnimatedScene> {
    let scene = Scene::builder(Preset::Gallery.name())
        // Floor
        .sphere(Sphere::new(
            Vec3::new(0.0, -1001.0, -6.0),
            rgb8(200, 200, 190),
            1000.0,
            Material::new(0.9, 0.05, 4.0).with_reflectivity(0.15),
        ))
        .sphere(Sphere::new(
            Vec3::new(0.0, 0.0, -6.0),
            rgb8(230, 230, 240),
            1.0,
            Material::mirror().with_reflectivity(0.85),
        ))
        .sphere(Sphere::new(
            Vec3::new(-2.2, -0.4, -5.5),
            rgb8(220, 60, 50),
            0.6,
            Material::new(0.8, 0.4, 32.0).with_reflectivity(0.3),
        ))
        .sphere(Sphere::new(
            Vec3::new(2.2, -0.4, -5.5),
            rgb8(60, 120, 230),
            0.6,
            Material::new(0.8, 0.4, 32.0).with_reflectivity(0.3),
        ))
        .sphere(Sphere::new(
            Vec3::new(1.8, 0.2, -6.0),
            rgb8(250, 200, 60),
            0.3,
            Material::new(0.7, 0.8, 64.0).with_reflectivity(0.5),
        ))
        .light(PointLight::new(Vec3::new(-4.0, 5.0, -2.0), 60.0))
        .light(PointLight::new(Vec3::new(3.0, 3.0, 0.0), 25.0))
        .camera(Camera::looking_at(Vec3::new(0.0, 0.6, 1.0), Vec3::new(0.0, -0.2, -6.0)))
        .ambient(0.02)
        .background(rgb8(18, 20, 28))
        .build()?;

    AnimatedScene::new(scene).with_motion(
        4,
        Motion::Orbit {
            pivot: Vec3::new(0.0, 0.0, -6.0),
            radius: 1.8,
            angular_speed: 0.8,
            phase: 0.0,
        },
    )
}
