//! Time-varying scenes.
//!
//! An `AnimatedScene` never changes while a frame renders. The host samples
//! the clock once per frame and asks for a [`Scene`] snapshot at that time;
//! every worker then reads the same frozen copy.

use std::f32::consts::TAU;

use orb_math::Vec3;

use crate::scene::{Scene, SceneError, SceneResult};

/// How one sphere moves over time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Stays at its base center.
    Static,

    /// Circles `pivot` in the XZ plane.
    Orbit {
        pivot: Vec3,
        radius: f32,
        /// Radians per second
        angular_speed: f32,
        /// Angle at time zero, in radians
        phase: f32,
    },

    /// Bounces vertically around its base center.
    Bob {
        amplitude: f32,
        /// Cycles per second
        frequency: f32,
    },
}

impl Motion {
    /// Center of a sphere whose resting center is `base` at `time` seconds.
    pub fn position(&self, base: Vec3, time: f32) -> Vec3 {
        match *self {
            Motion::Static => base,
            Motion::Orbit {
                pivot,
                radius,
                angular_speed,
                phase,
            } => {
                let angle = phase + angular_speed * time;
                pivot + Vec3::new(angle.cos() * radius, base.y - pivot.y, angle.sin() * radius)
            }
            Motion::Bob {
                amplitude,
                frequency,
            } => base + Vec3::Y * amplitude * (TAU * frequency * time).sin(),
        }
    }
}

/// A base scene plus one motion per sphere.
#[derive(Clone, Debug)]
pub struct AnimatedScene {
    base: Scene,
    motions: Vec<Motion>,
}

impl AnimatedScene {
    /// Wrap a scene with every sphere static.
    pub fn new(base: Scene) -> Self {
        let motions = vec![Motion::Static; base.sphere_count()];
        Self { base, motions }
    }

    /// Attach a motion to the sphere at `index`.
    pub fn with_motion(mut self, index: usize, motion: Motion) -> SceneResult<Self> {
        let slot = self
            .motions
            .get_mut(index)
            .ok_or(SceneError::UnknownSphere(index))?;
        *slot = motion;
        Ok(self)
    }

    /// The scene with every sphere at its base center.
    pub fn base(&self) -> &Scene {
        &self.base
    }

    /// Check if any sphere moves.
    pub fn is_animated(&self) -> bool {
        self.motions.iter().any(|m| *m != Motion::Static)
    }

    /// Freeze the scene at `time` seconds.
    ///
    /// Only sphere centers change, so the snapshot keeps the base scene's
    /// validation.
    pub fn snapshot(&self, time: f32) -> Scene {
        let mut scene = self.base.clone();
        for (sphere, motion) in scene.spheres.iter_mut().zip(&self.motions) {
            sphere.center = motion.position(sphere.center, time);
        }
        scene
    }
}

impl From<Scene> for AnimatedScene {
    fn from(scene: Scene) -> Self {
        Self::new(scene)
    }
}
