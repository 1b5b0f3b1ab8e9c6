//! Multi-bounce reflection paths.
//!
//! A [`Path`] is an iterator of weighted bounces. It stops when the ray
//! escapes, when the bounce budget is spent, or when too little reflected
//! energy is left to matter. [`trace_path`] sums the weighted colors.

use std::iter::FusedIterator;

use orb_core::Scene;
use orb_math::{Color, Ray, VectorExt};

use crate::bounce::{bounce, Bounce};
use crate::renderer::RenderConfig;

/// How a surface's reflectivity attenuates the energy left for later bounces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflectanceModel {
    /// `reflectance *= reflectivity`
    #[default]
    Product,
    /// `reflectance -= 1 - reflectivity`, clamped to [0, 1]
    ClampedSubtraction,
}

impl ReflectanceModel {
    /// Reflectance remaining after bouncing off a surface with `reflectivity`.
    ///
    /// Either model keeps the result in [0, 1]. A fully reflective surface
    /// loses nothing and a non-reflective one loses everything.
    pub fn attenuate(self, reflectance: f32, reflectivity: f32) -> f32 {
        let reflectivity = reflectivity.clamp(0.0, 1.0);
        let remaining = match self {
            ReflectanceModel::Product => reflectance * reflectivity,
            ReflectanceModel::ClampedSubtraction => reflectance - (1.0 - reflectivity),
        };
        remaining.clamp(0.0, 1.0)
    }
}

/// Where a path is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    /// More bounces may follow.
    Tracing,
    /// The last bounce left the scene.
    Missed,
    /// Bounce budget spent or reflectance at or below the cutoff.
    Exhausted,
}

/// One bounce and the reflectance it is weighted by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSegment {
    pub bounce: Bounce,
    pub weight: f32,
}

impl PathSegment {
    /// This segment's share of the final pixel color.
    pub fn contribution(&self) -> Color {
        self.bounce.color() * self.weight
    }
}

/// Iterator over the bounces of a single camera ray.
pub struct Path<'a> {
    scene: &'a Scene,
    ray: Ray,
    reflectance: f32,
    bounces: u32,
    max_bounces: u32,
    cutoff: f32,
    model: ReflectanceModel,
    state: PathState,
}

impl<'a> Path<'a> {
    /// Start a path at `ray` with full reflectance.
    pub fn new(ray: Ray, scene: &'a Scene, config: &RenderConfig) -> Self {
        Self {
            scene,
            ray,
            reflectance: 1.0,
            bounces: 0,
            max_bounces: config.max_bounces,
            cutoff: config.reflectance_cutoff,
            model: config.reflectance_model,
            state: PathState::Tracing,
        }
    }

    pub fn state(&self) -> PathState {
        self.state
    }

    /// Number of bounces traced so far.
    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    /// Reflectance that the next bounce would be weighted by.
    pub fn reflectance(&self) -> f32 {
        self.reflectance
    }
}

impl Iterator for Path<'_> {
    type Item = PathSegment;

    fn next(&mut self) -> Option<PathSegment> {
        if self.state != PathState::Tracing {
            return None;
        }
        if self.bounces >= self.max_bounces || self.reflectance <= self.cutoff {
            self.state = PathState::Exhausted;
            return None;
        }

        let segment = PathSegment {
            bounce: bounce(&self.ray, self.scene),
            weight: self.reflectance,
        };
        self.bounces += 1;

        match segment.bounce {
            Bounce::Escaped { .. } => self.state = PathState::Missed,
            Bounce::Surface { hit, next, .. } => {
                self.reflectance = if hit.material.is_reflective() {
                    self.model
                        .attenuate(self.reflectance, hit.material.reflectivity)
                } else {
                    0.0
                };
                self.ray = next;
            }
        }

        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state != PathState::Tracing {
            return (0, Some(0));
        }
        let remaining = self.max_bounces.saturating_sub(self.bounces) as usize;
        (0, Some(remaining))
    }
}

impl FusedIterator for Path<'_> {}

/// Final color seen along `ray`, clamped to [0, 1].
pub fn trace_path(ray: Ray, scene: &Scene, config: &RenderConfig) -> Color {
    Path::new(ray, scene, config)
        .map(|segment| segment.contribution())
        .fold(Color::ZERO, |sum, c| sum + c)
        .clamp_components(0.0, 1.0)
}
