//! Frame renderer.
//!
//! Implements the per-frame fork-join:
//! - Split the frame buffer into tiles
//! - Trace every tile on a reusable rayon pool
//! - Pack shaded colors into 32-bit ARGB pixels

use std::time::{Duration, Instant};

use orb_core::Scene;
use orb_math::{Color, Interval};
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::PrimaryRays;
use crate::path::{trace_path, ReflectanceModel};
use crate::tile::{generate_tiles, render_tile, split_buffer, TileGrid};

/// Errors that can occur while setting up or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid tile grid {columns}x{rows} (both must be at least 1)")]
    InvalidTileGrid { columns: u32, rows: u32 },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Maximum number of bounces per camera ray
    pub max_bounces: u32,
    /// Paths stop once reflectance drops to or below this
    pub reflectance_cutoff: f32,
    /// How surface reflectivity attenuates later bounces
    pub reflectance_model: ReflectanceModel,
    /// Tile layout of each frame
    pub tile_grid: TileGrid,
    /// Worker count; `None` means one worker per tile, capped at the core count
    pub threads: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_bounces: 16,
            reflectance_cutoff: 1e-3,
            reflectance_model: ReflectanceModel::Product,
            tile_grid: TileGrid::default(),
            threads: None,
        }
    }
}

impl RenderConfig {
    /// Set the bounce budget.
    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    /// Set the reflectance cutoff.
    pub fn with_reflectance_cutoff(mut self, cutoff: f32) -> Self {
        self.reflectance_cutoff = cutoff;
        self
    }

    /// Set the reflectance model.
    pub fn with_reflectance_model(mut self, model: ReflectanceModel) -> Self {
        self.reflectance_model = model;
        self
    }

    /// Set the tile grid.
    pub fn with_tile_grid(mut self, tile_grid: TileGrid) -> Self {
        self.tile_grid = tile_grid;
        self
    }

    /// Set the worker count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    fn validate(&self) -> RenderResult<()> {
        let grid = self.tile_grid;
        if grid.columns == 0 || grid.rows == 0 {
            return Err(RenderError::InvalidTileGrid {
                columns: grid.columns,
                rows: grid.rows,
            });
        }
        Ok(())
    }
}

/// Opaque alpha byte of every packed pixel.
pub const OPAQUE_ALPHA: u32 = 0xFF;

/// Pack a color into `0xAARRGGBB`.
///
/// Channels are clamped to [0, 1] and truncated to 8 bits.
#[inline]
pub fn pack_argb(color: Color) -> u32 {
    let channel = |c: f32| (Interval::UNIT.clamp(c) * 255.0) as u32;
    (OPAQUE_ALPHA << 24)
        | (channel(color.x) << 16)
        | (channel(color.y) << 8)
        | channel(color.z)
}

/// Split a packed pixel into `[r, g, b, a]` bytes.
#[inline]
pub fn unpack_rgba(pixel: u32) -> [u8; 4] {
    [
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
        (pixel >> 24) as u8,
    ]
}

/// Trace the single camera ray of pixel (x, y).
pub fn render_pixel(
    rays: &PrimaryRays,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    trace_path(rays.ray(x, y), scene, config)
}

/// Packed-color frame, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![OPAQUE_ALPHA << 24; width as usize * height as usize],
        }
    }

    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &pixel in &self.pixels {
            bytes.extend_from_slice(&unpack_rgba(pixel));
        }
        bytes
    }
}

/// Timing and size of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub elapsed: Duration,
    pub tiles: usize,
    pub pixels: usize,
}

/// A finished frame and how long it took.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    pub buffer: FrameBuffer,
    pub stats: FrameStats,
}

/// One worker per tile, capped at rayon's default thread count.
fn default_threads(tiles: usize) -> usize {
    let cores = rayon::current_num_threads();
    if tiles > cores {
        log::info!("{} tiles share {} workers", tiles, cores);
    }
    tiles.clamp(1, cores)
}

/// Tile renderer that owns its worker pool across frames.
pub struct Renderer {
    config: RenderConfig,
    pool: rayon::ThreadPool,
}

impl Renderer {
    /// Validate `config` and start the worker pool.
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        config.validate()?;
        let threads = config
            .threads
            .unwrap_or_else(|| default_threads(config.tile_grid.tile_count()));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("orb-tile-{i}"))
            .build()?;

        log::info!(
            "Renderer ready: {} workers, {}x{} tiles, {} max bounces",
            pool.current_num_threads(),
            config.tile_grid.columns,
            config.tile_grid.rows,
            config.max_bounces
        );

        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Number of worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Render one frame of `scene`.
    ///
    /// Returns once every tile has finished.
    pub fn render(&self, scene: &Scene, width: u32, height: u32) -> RenderResult<RenderedFrame> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let start = Instant::now();
        let rays = PrimaryRays::new(scene.camera(), width, height);
        let tiles = generate_tiles(width, height, self.config.tile_grid);
        let mut buffer = FrameBuffer::new(width, height);

        let views = split_buffer(&mut buffer.pixels, width, &tiles);
        self.pool.install(|| {
            views
                .into_par_iter()
                .for_each(|mut view| render_tile(&mut view, &rays, scene, &self.config));
        });

        let stats = FrameStats {
            elapsed: start.elapsed(),
            tiles: tiles.len(),
            pixels: buffer.pixels.len(),
        };
        log::debug!(
            "Rendered '{}' {}x{} in {:?} ({} tiles)",
            scene.name(),
            width,
            height,
            stats.elapsed,
            stats.tiles
        );

        Ok(RenderedFrame { buffer, stats })
    }
}

/// Render one frame with a default configuration and the given tile grid.
///
/// Builds a fresh worker pool; hosts rendering many frames should keep a
/// [`Renderer`] instead.
pub fn render_frame(
    scene: &Scene,
    width: u32,
    height: u32,
    tile_grid: TileGrid,
) -> RenderResult<FrameBuffer> {
    let renderer = Renderer::new(RenderConfig::default().with_tile_grid(tile_grid))?;
    Ok(renderer.render(scene, width, height)?.buffer)
}
