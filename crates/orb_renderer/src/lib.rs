//! Orb Renderer - CPU Reflective Sphere Tracing
//!
//! A deterministic Whitted-style tracer: one camera ray per pixel, Phong
//! shading with hard shadows and mirror bounces until the ray escapes or
//! its reflectance runs out. Frames are split into a fixed tile grid and
//! rendered in parallel on a reusable rayon pool.

mod bounce;
mod camera;
mod hittable;
mod path;
mod renderer;
mod shading;
mod tile;

pub use bounce::{bounce, Bounce};
pub use camera::PrimaryRays;
pub use hittable::{Hit, Hittable, Intersection, MAX_DISTANCE, SELF_INTERSECTION_EPSILON};
pub use path::{trace_path, Path, PathSegment, PathState, ReflectanceModel};
pub use renderer::{
    pack_argb, render_frame, render_pixel, unpack_rgba, FrameBuffer, FrameStats, RenderConfig,
    RenderError, RenderResult, RenderedFrame, Renderer, OPAQUE_ALPHA,
};
pub use shading::{in_shadow, light_contribution, phong, SHADOW_EPSILON, SURFACE_OFFSET};
pub use tile::{generate_tiles, Tile, TileGrid};

/// Re-export the math types used in the public API
pub use orb_math::{Color, Ray, Vec3};
