//! Tile-based frame splitting.
//!
//! Divides the image into a fixed grid of tiles that are rendered
//! independently and in parallel using rayon. Each tile borrows its own
//! disjoint rows of the frame buffer, so workers never share a pixel.

use orb_core::Scene;

use crate::camera::PrimaryRays;
use crate::renderer::{pack_argb, render_pixel, RenderConfig};

/// Number of tile columns and rows a frame is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub columns: u32,
    pub rows: u32,
}

impl TileGrid {
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of tiles in the grid (some may be empty on tiny images).
    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// X coordinate of tile's top-left corner
    pub x: u32,
    /// Y coordinate of tile's top-left corner
    pub y: u32,
    /// Width of the tile in pixels
    pub width: u32,
    /// Height of the tile in pixels
    pub height: u32,
    /// Index of this tile in row-major grid order
    pub index: usize,
}

impl Tile {
    /// Create a new tile.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this tile.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Check if the tile covers pixel (x, y).
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x..self.x + self.width).contains(&x) && (self.y..self.y + self.height).contains(&y)
    }
}

/// Start of slice `i` when `extent` is split into `parts` near-equal slices.
fn edge(i: u32, extent: u32, parts: u32) -> u32 {
    (i as u64 * extent as u64 / parts as u64) as u32
}

/// Split an image into the tiles of `grid`, in row-major order.
///
/// Remainder pixels are spread across tiles, so tile sizes differ by at
/// most one pixel per axis. Tiles that would be empty (more columns than
/// pixels) are skipped. A grid with zero columns or rows yields no tiles.
pub fn generate_tiles(width: u32, height: u32, grid: TileGrid) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(grid.tile_count());
    if grid.columns == 0 || grid.rows == 0 {
        return tiles;
    }

    for row in 0..grid.rows {
        let y0 = edge(row, height, grid.rows);
        let y1 = edge(row + 1, height, grid.rows);
        for col in 0..grid.columns {
            let x0 = edge(col, width, grid.columns);
            let x1 = edge(col + 1, width, grid.columns);
            if x1 > x0 && y1 > y0 {
                let index = tiles.len();
                tiles.push(Tile::new(x0, y0, x1 - x0, y1 - y0, index));
            }
        }
    }

    tiles
}

/// A tile plus mutable access to exactly its pixels.
pub(crate) struct TileView<'a> {
    pub tile: Tile,
    /// One slice per tile row, top to bottom
    pub rows: Vec<&'a mut [u32]>,
}

/// Partition a row-major pixel buffer into per-tile row slices.
pub(crate) fn split_buffer<'a>(
    pixels: &'a mut [u32],
    width: u32,
    tiles: &[Tile],
) -> Vec<TileView<'a>> {
    let mut views: Vec<TileView<'a>> = tiles
        .iter()
        .map(|&tile| TileView {
            tile,
            rows: Vec::with_capacity(tile.height as usize),
        })
        .collect();

    for (y, row) in pixels.chunks_exact_mut(width as usize).enumerate() {
        let y = y as u32;
        let mut rest: &'a mut [u32] = row;
        let mut consumed = 0u32;

        // Tiles are row-major, so a row's tiles come left to right
        for view in views
            .iter_mut()
            .filter(|v| (v.tile.y..v.tile.y + v.tile.height).contains(&y))
        {
            let skip = (view.tile.x - consumed) as usize;
            let (_, tail) = std::mem::take(&mut rest).split_at_mut(skip);
            let (segment, tail) = tail.split_at_mut(view.tile.width as usize);
            view.rows.push(segment);
            rest = tail;
            consumed = view.tile.x + view.tile.width;
        }
    }

    views
}

/// Render every pixel of one tile into its slices.
pub(crate) fn render_tile(
    view: &mut TileView<'_>,
    rays: &PrimaryRays,
    scene: &Scene,
    config: &RenderConfig,
) {
    let tile = view.tile;
    for (local_y, row) in view.rows.iter_mut().enumerate() {
        let y = tile.y + local_y as u32;
        for (local_x, pixel) in row.iter_mut().enumerate() {
            let x = tile.x + local_x as u32;
            *pixel = pack_argb(render_pixel(rays, scene, x, y, config));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage(width: u32, height: u32, grid: TileGrid) -> Vec<u32> {
        let mut hits = vec![0u32; (width * height) as usize];
        for tile in generate_tiles(width, height, grid) {
            for y in tile.y..tile.y + tile.height {
                for x in tile.x..tile.x + tile.width {
                    hits[(y * width + x) as usize] += 1;
                }
            }
        }
        hits
    }

    #[test]
    fn test_generate_tiles_exact_fit() {
        let tiles = generate_tiles(128, 128, TileGrid::new(2, 2));
        assert_eq!(tiles.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
        assert_eq!(tiles[3], Tile::new(64, 64, 64, 64, 3));
    }

    #[test]
    fn test_generate_tiles_partial_fit() {
        let tiles = generate_tiles(100, 37, TileGrid::new(3, 4));
        assert_eq!(tiles.len(), 12);

        let total_pixels: u32 = tiles.iter().map(|t| t.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 37);

        // Sizes differ by at most one pixel
        let widths: Vec<u32> = tiles.iter().map(|t| t.width).collect();
        assert!(widths.iter().max().unwrap() - widths.iter().min().unwrap() <= 1);
    }

    #[test]
    fn test_every_pixel_covered_exactly_once() {
        for (w, h) in [(1, 1), (7, 3), (100, 37), (640, 480), (3, 17)] {
            for grid in [TileGrid::new(1, 1), TileGrid::new(2, 3), TileGrid::new(4, 4), TileGrid::new(8, 5)] {
                let hits = coverage(w, h, grid);
                assert!(
                    hits.iter().all(|&n| n == 1),
                    "{w}x{h} with {grid:?} leaves gaps or overlaps"
                );
            }
        }
    }

    #[test]
    fn test_more_tiles_than_pixels_skips_empty() {
        let tiles = generate_tiles(3, 2, TileGrid::new(8, 8));
        assert_eq!(tiles.len(), 6);
        assert!(tiles.iter().all(|t| t.pixel_count() == 1));
    }

    #[test]
    fn test_zero_grid_yields_nothing() {
        assert!(generate_tiles(10, 10, TileGrid::new(0, 3)).is_empty());
    }

    #[test]
    fn test_indices_are_sequential() {
        let tiles = generate_tiles(50, 50, TileGrid::new(3, 3));
        for (i, tile) in tiles.iter().enumerate() {
            assert_eq!(tile.index, i);
        }
    }

    #[test]
    fn test_split_buffer_views_are_disjoint_and_complete() {
        let (width, height) = (10u32, 7u32);
        let tiles = generate_tiles(width, height, TileGrid::new(3, 2));
        let mut pixels = vec![0u32; (width * height) as usize];

        {
            let views = split_buffer(&mut pixels, width, &tiles);
            assert_eq!(views.len(), tiles.len());
            for mut view in views {
                assert_eq!(view.rows.len(), view.tile.height as usize);
                let tag = view.tile.index as u32 + 1;
                for row in view.rows.iter_mut() {
                    assert_eq!(row.len(), view.tile.width as usize);
                    row.fill(tag);
                }
            }
        }

        for y in 0..height {
            for x in 0..width {
                let owner = tiles.iter().find(|t| t.contains(x, y)).expect("covered");
                assert_eq!(pixels[(y * width + x) as usize], owner.index as u32 + 1);
            }
        }
    }
}
