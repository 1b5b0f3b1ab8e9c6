//! Where finished frames go.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use orb_renderer::{FrameBuffer, RenderedFrame};

/// Consumer of rendered frames.
pub trait FrameSink {
    /// Present or store one frame.
    fn present(&mut self, frame: &RenderedFrame) -> Result<()>;
}

/// Drops frames; used when no output directory is given.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl FrameSink for DiscardSink {
    fn present(&mut self, frame: &RenderedFrame) -> Result<()> {
        log::debug!("Discarding {}x{} frame", frame.buffer.width, frame.buffer.height);
        Ok(())
    }
}

/// Writes each frame as an uncompressed bitmap named after its render time.
#[derive(Debug)]
pub struct BitmapSink {
    dir: PathBuf,
}

impl BitmapSink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }
}

impl FrameSink for BitmapSink {
    fn present(&mut self, frame: &RenderedFrame) -> Result<()> {
        let path = self.dir.join(file_name(frame.stats.elapsed));
        save_bitmap(&frame.buffer, &path)?;
        log::info!("Saved {}", path.display());
        Ok(())
    }
}

/// `render_<ms>ms.bmp`, with the elapsed time in whole milliseconds.
pub fn file_name(elapsed: Duration) -> String {
    format!("render_{}ms.bmp", elapsed.as_millis())
}

/// Encode a frame buffer as BMP.
pub fn save_bitmap(buffer: &FrameBuffer, path: &Path) -> Result<()> {
    let image = image::RgbaImage::from_raw(buffer.width, buffer.height, buffer.to_rgba())
        .context("Frame buffer size does not match its dimensions")?;
    image
        .save_with_format(path, image::ImageFormat::Bmp)
        .with_context(|| format!("Failed to write {}", path.display()))
}
