use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use orb_core::Preset;
use orb_renderer::{RenderConfig, Renderer, ReflectanceModel, TileGrid};

mod output;

use output::{BitmapSink, DiscardSink, FrameSink};

/// Orb - reflective sphere tracer
#[derive(Parser, Debug)]
#[command(
    name = "orb_viewer",
    version,
    about = "Renders reflective sphere scenes on the CPU, one tile per worker",
    after_help = "EXAMPLES:\n  \
                  orb_viewer --output renders\n  \
                  orb_viewer --scene gallery --frames 120 --animate\n  \
                  orb_viewer --width 1920 --height 1080 --columns 8 --rows 6 --threads 12"
)]
struct Cli {
    /// Scene preset to render
    #[arg(short, long, value_enum, default_value_t = CliPreset::Classic)]
    scene: CliPreset,

    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = 1000)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = 1000)]
    height: u32,

    /// Tile columns per frame
    #[arg(long, default_value_t = 4)]
    columns: u32,

    /// Tile rows per frame
    #[arg(long, default_value_t = 4)]
    rows: u32,

    /// Worker threads (defaults to one per tile, up to the core count)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Maximum mirror bounces per pixel
    #[arg(long, default_value_t = 100)]
    bounces: u32,

    /// Stop a path once its reflectance drops to this value
    #[arg(long, default_value_t = 1e-3)]
    cutoff: f32,

    /// How reflectivity attenuates later bounces
    #[arg(long, value_enum, default_value_t = CliReflectance::Product)]
    reflectance: CliReflectance,

    /// Number of frames to render
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Advance scene motion by wall-clock time between frames
    #[arg(long)]
    animate: bool,

    /// Directory to write `render_<ms>ms.bmp` files into
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPreset {
    /// Two spheres, two lights
    Classic,
    /// Mirror spheres with one in orbit
    Gallery,
}

impl From<CliPreset> for Preset {
    fn from(p: CliPreset) -> Self {
        match p {
            CliPreset::Classic => Preset::Classic,
            CliPreset::Gallery => Preset::Gallery,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliReflectance {
    /// Multiply by each surface's reflectivity
    Product,
    /// Subtract each surface's absorption, floored at zero
    Subtract,
}

impl From<CliReflectance> for ReflectanceModel {
    fn from(r: CliReflectance) -> Self {
        match r {
            CliReflectance::Product => ReflectanceModel::Product,
            CliReflectance::Subtract => ReflectanceModel::ClampedSubtraction,
        }
    }
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        let config = RenderConfig::default()
            .with_max_bounces(self.bounces)
            .with_reflectance_cutoff(self.cutoff)
            .with_reflectance_model(self.reflectance.into())
            .with_tile_grid(TileGrid::new(self.columns, self.rows));
        match self.threads {
            Some(threads) => config.with_threads(threads),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let preset = Preset::from(cli.scene);
    log::info!("Starting Orb Viewer ({} scene)", preset.name());

    let animated = preset.build()?;
    let renderer = Renderer::new(cli.render_config())?;

    let mut sink: Box<dyn FrameSink> = match &cli.output {
        Some(dir) => Box::new(BitmapSink::new(dir)?),
        None => Box::new(DiscardSink),
    };

    let clock = Instant::now();
    let mut total_ms = 0.0;
    for frame in 0..cli.frames {
        // One time sample per frame; every tile sees the same snapshot
        let time = if cli.animate {
            clock.elapsed().as_secs_f32()
        } else {
            0.0
        };
        let scene = animated.snapshot(time);

        let rendered = renderer.render(&scene, cli.width, cli.height)?;
        let ms = rendered.stats.elapsed.as_secs_f64() * 1000.0;
        total_ms += ms;
        log::info!(
            "Frame {}: {:.2} ms ({} tiles, {} px)",
            frame,
            ms,
            rendered.stats.tiles,
            rendered.stats.pixels
        );

        sink.present(&rendered)?;
    }

    if cli.frames > 1 {
        log::info!(
            "Average frame time: {:.2} ms over {} frames",
            total_ms / cli.frames as f64,
            cli.frames
        );
    }

    Ok(())
}
