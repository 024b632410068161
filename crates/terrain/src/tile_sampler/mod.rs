//! Dense heightmaps for individual map pixels.
//!
//! A tile is `dimension × dimension` samples covering one map pixel. Each
//! sample combines four layers:
//!
//! 1. coarse elevation (smoothed height × exaggeration), bicubic over 4×4 pixels
//! 2. the fine noise mask, bicubic over a 4×4 slice of a 7×7 window, scaled by
//!    a climate- and shoreline-dependent strength
//! 3. procedural noise for small ground features, scaled by the bilinear blend
//!    of the climate extra-noise scales at the tile corners
//! 4. a floor at ocean elevation
//!
//! The sum is normalized by `MAX_TERRAIN_HEIGHT` into `[0, 1]`.

mod windows;


use bevy::prelude::*;
use bevy::tasks::{ComputeTaskPool, ParallelSlice, ParallelSliceMut, TaskPool};

use crate::config::{
    BASE_HEIGHT_SCALE, MAX_TERRAIN_HEIGHT, NORMALIZED_OCEAN_ELEVATION, OCEAN_ELEVATION,
};
use crate::interpolation::{bicubic, bilinear};
use crate::settings::TerrainSettings;
use crate::terrain_noise::TerrainNoise;
use crate::world_terrain::WorldTerrainContext;
use windows::TileWindows;

/// Normalized heights of one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSample {
    pub map_pixel: (i32, i32),
    pub dimension: usize,
    /// Row-major; row follows world y, column follows world x.
    pub heights: Vec<f32>,
    pub average: f32,
    pub max: f32,
}

impl TileSample {
    fn from_heights(map_pixel: (i32, i32), dimension: usize, heights: Vec<f32>) -> Self {
        let sum: f32 = heights.iter().sum();
        let max = heights.iter().copied().fold(0.0_f32, f32::max);
        let average = if heights.is_empty() {
            0.0
        } else {
            sum / heights.len() as f32
        };
        Self {
            map_pixel,
            dimension,
            heights,
            average,
            max,
        }
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.heights[row * self.dimension + col]
    }
}

/// Samples tiles from a built `WorldTerrainContext`.
pub struct TileHeightSampler<'a> {
    context: &'a WorldTerrainContext,
    noise: TerrainNoise,
    dimension: usize,
    row_batch_size: usize,
}

impl<'a> TileHeightSampler<'a> {
    pub fn new(context: &'a WorldTerrainContext, settings: &TerrainSettings) -> Self {
        Self {
            context,
            noise: TerrainNoise::default(),
            dimension: settings.effective_dimension(),
            row_batch_size: settings.effective_row_batch_size(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn windows(&self, mx: i32, my: i32) -> Option<TileWindows> {
        let maps = self.context.maps()?;
        if maps.width == 0 || maps.height == 0 {
            return None;
        }
        Some(TileWindows::gather(maps, mx, my, self.dimension))
    }

    /// Flat ocean-floor tile returned when there is no world to sample.
    fn fallback(&self, mx: i32, my: i32) -> TileSample {
        warn!(
            "Sampling map pixel ({}, {}) without a world terrain context",
            mx, my
        );
        TileSample::from_heights(
            (mx, my),
            self.dimension,
            vec![NORMALIZED_OCEAN_ELEVATION; self.dimension * self.dimension],
        )
    }

    /// Normalized height of one output cell.
    fn height_at(&self, windows: &TileWindows, col: usize, row: usize) -> f32 {
        let last = (self.dimension - 1) as f32;
        let div = last / 3.0;

        let u = col as f32 / last;
        let v = row as f32 / last;
        let ix = ((col as f32 / div).floor() as usize).min(3);
        let iy = ((row as f32 / div).floor() as usize).min(3);
        let fx = (col as f32 - ix as f32 * div) / div;
        let fy = (row as f32 - iy as f32 * div) / div;

        let base = bicubic(&windows.base, u, v) * BASE_HEIGHT_SCALE;
        let mask = bicubic(&windows.fine_window(ix, iy), fx, fy)
            * bicubic(&windows.noise_multiplier, u, v);

        let nx = windows.noise_origin.0 + col as f32;
        let ny = windows.noise_origin.1 + row as f32;
        let [c00, c10, c01, c11] = windows.corners;
        let extra = self.noise.low(nx, ny)
            * self.noise.high(nx, ny)
            * bilinear(c00, c10, c01, c11, u, v);

        let scaled = (base + mask + extra).max(OCEAN_ELEVATION);
        (scaled / MAX_TERRAIN_HEIGHT).clamp(0.0, 1.0)
    }

    fn fill_rows(&self, windows: &TileWindows, first_row: usize, out: &mut [f32]) {
        let dim = self.dimension;
        for (offset, row) in out.chunks_mut(dim).enumerate() {
            for (col, cell) in row.iter_mut().enumerate() {
                *cell = self.height_at(windows, col, first_row + offset);
            }
        }
    }

    /// Sample one tile, spreading batches of rows over the compute task pool.
    pub fn sample(&self, mx: i32, my: i32) -> TileSample {
        let Some(windows) = self.windows(mx, my) else {
            return self.fallback(mx, my);
        };
        let dim = self.dimension;
        let batch = self.row_batch_size;
        let pool = ComputeTaskPool::get_or_init(TaskPool::default);

        let mut heights = vec![0.0_f32; dim * dim];
        heights.par_chunk_map_mut(pool, batch * dim, |index, chunk| {
            self.fill_rows(&windows, index * batch, chunk);
        });
        TileSample::from_heights((mx, my), dim, heights)
    }

    /// Sample one tile on the calling thread. Produces exactly the same
    /// heights as `sample`.
    pub fn sample_serial(&self, mx: i32, my: i32) -> TileSample {
        let Some(windows) = self.windows(mx, my) else {
            return self.fallback(mx, my);
        };
        let dim = self.dimension;
        let mut heights = vec![0.0_f32; dim * dim];
        self.fill_rows(&windows, 0, &mut heights);
        TileSample::from_heights((mx, my), dim, heights)
    }

    /// Sample many tiles in parallel, one task per group of tiles. Results
    /// follow the order of `tiles`.
    pub fn sample_tiles(&self, tiles: &[(i32, i32)]) -> Vec<TileSample> {
        if tiles.is_empty() {
            return Vec::new();
        }
        let pool = ComputeTaskPool::get_or_init(TaskPool::default);
        let per_task = tiles.len().div_ceil(pool.thread_num().max(1));
        tiles
            .par_chunk_map(pool, per_task, |_, group| {
                group
                    .iter()
                    .map(|&(mx, my)| self.sample_serial(mx, my))
                    .collect::<Vec<_>>()
            })
            .into_iter()
            .flatten()
            .collect()
    }
}
