//! Inputs to the world terrain context.
//!
//! The coarse height grid, climate map, settlement presence, fine noise mask
//! and the optional precomputed tree-coverage raster all come from the host
//! game. Each is a small trait so hosts can plug in their own storage; the
//! in-memory `WorldSource` implements all of them and doubles as the ECS
//! resource the plugin watches.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::climate::Climate;
use crate::config::{FINE_NOISE_CELLS_PER_PIXEL, WATER_HEIGHT_THRESHOLD};
use crate::raster::Raster;

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Coarse per-pixel elevation of the world map.
pub trait CoarseHeightSource {
    /// `(width, height)` of the world grid in map pixels.
    fn dimensions(&self) -> (usize, usize);
    fn coarse_height(&self, x: usize, y: usize) -> u8;
}

pub trait ClimateLookup {
    fn climate_at(&self, x: usize, y: usize) -> Climate;
}

pub trait SettlementLookup {
    /// Whether the map pixel holds a settlement (town, dungeon, ...).
    fn has_settlement(&self, x: usize, y: usize) -> bool;
}

/// Fine-resolution noise mask, `FINE_NOISE_CELLS_PER_PIXEL` cells per map pixel.
pub trait FineNoiseMaskSource {
    fn fine_dimensions(&self) -> (usize, usize);
    fn fine_noise(&self, x: usize, y: usize) -> u8;
}

pub trait TreeCoverageAsset {
    /// Precomputed tree coverage, row-major, one byte per map pixel.
    fn tree_coverage_asset(&self) -> Option<&[u8]> {
        None
    }
}

/// Everything the context needs to build itself.
pub trait TerrainSource:
    CoarseHeightSource + ClimateLookup + SettlementLookup + FineNoiseMaskSource + TreeCoverageAsset
{
}

impl<T> TerrainSource for T where
    T: ?Sized
        + CoarseHeightSource
        + ClimateLookup
        + SettlementLookup
        + FineNoiseMaskSource
        + TreeCoverageAsset
{
}

// ---------------------------------------------------------------------------
// In-memory world
// ---------------------------------------------------------------------------

/// In-memory world data. Inserting this resource makes `DistantTerrainPlugin`
/// build the `WorldTerrainContext`; removing it unloads the context.
#[derive(Resource, Debug, Clone)]
pub struct WorldSource {
    pub heights: Raster<u8>,
    pub climates: Raster<Climate>,
    pub settlements: Raster<bool>,
    pub fine_noise: Raster<u8>,
    pub tree_coverage: Option<Vec<u8>>,
}

impl WorldSource {
    /// Uniform world: every pixel at `height` with `climate`, no settlements,
    /// and a constant mid-range fine noise mask.
    pub fn flat(width: usize, height: usize, coarse_height: u8, climate: Climate) -> Self {
        Self {
            heights: Raster::filled(width, height, coarse_height),
            climates: Raster::filled(width, height, climate),
            settlements: Raster::filled(width, height, false),
            fine_noise: Raster::filled(
                width * FINE_NOISE_CELLS_PER_PIXEL,
                height * FINE_NOISE_CELLS_PER_PIXEL,
                128,
            ),
            tree_coverage: None,
        }
    }

    pub fn with_heights(mut self, heights: Raster<u8>) -> Self {
        self.heights = heights;
        self
    }

    pub fn with_climates(mut self, climates: Raster<Climate>) -> Self {
        self.climates = climates;
        self
    }

    pub fn with_settlements(mut self, settlements: Raster<bool>) -> Self {
        self.settlements = settlements;
        self
    }

    pub fn with_fine_noise(mut self, fine_noise: Raster<u8>) -> Self {
        self.fine_noise = fine_noise;
        self
    }

    pub fn with_tree_coverage(mut self, tree_coverage: Vec<u8>) -> Self {
        self.tree_coverage = Some(tree_coverage);
        self
    }

    /// Deterministic procedural world for demos, tests and benches.
    ///
    /// fBm elevation decides land and water, a second noise field supplies
    /// moisture for climate assignment, and settlements are scattered over
    /// land with a seeded RNG.
    pub fn synthetic(width: usize, height: usize, seed: u64) -> Self {
        const SEA_LEVEL: f32 = 0.42;
        const MOUNTAIN_LEVEL: f32 = 0.8;
        const HIGHLAND_LEVEL: f32 = 0.68;
        const SETTLEMENT_CHANCE: f64 = 0.02;

        let noise_seed = seed as i32;
        let elevation = fbm(noise_seed, 0.02, 5);
        let moisture = fbm(noise_seed.wrapping_add(9999), 0.015, 3);
        let detail = fbm(noise_seed.wrapping_add(4242), 0.08, 2);

        let mut elevations = Raster::filled(width, height, 0.0_f32);
        for y in 0..height {
            for x in 0..width {
                let raw = elevation.get_noise_2d(x as f32, y as f32);
                elevations.set(x, y, ((raw + 1.0) * 0.5).clamp(0.0, 1.0));
            }
        }

        let heights = elevations.map(|e| {
            if e < SEA_LEVEL {
                ((e / SEA_LEVEL) * (WATER_HEIGHT_THRESHOLD as f32 + 0.99)) as u8
            } else {
                let land = (e - SEA_LEVEL) / (1.0 - SEA_LEVEL);
                (WATER_HEIGHT_THRESHOLD as f32 + 1.0 + land * 252.0).min(255.0) as u8
            }
        });

        let climates = Raster::from_fn(width, height, |x, y| {
            let e = elevations.get(x, y);
            let m = ((moisture.get_noise_2d(x as f32, y as f32) + 1.0) * 0.5).clamp(0.0, 1.0);
            classify_climate(e, m, SEA_LEVEL, HIGHLAND_LEVEL, MOUNTAIN_LEVEL)
        });

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let settlements = Raster::from_fn(width, height, |x, y| {
            heights.get(x, y) > WATER_HEIGHT_THRESHOLD && rng.gen_bool(SETTLEMENT_CHANCE)
        });

        let fine_width = width * FINE_NOISE_CELLS_PER_PIXEL;
        let fine_height = height * FINE_NOISE_CELLS_PER_PIXEL;
        let cells = FINE_NOISE_CELLS_PER_PIXEL as f32;
        let fine_noise = Raster::from_fn(fine_width, fine_height, |x, y| {
            let raw = detail.get_noise_2d(x as f32 / cells, y as f32 / cells);
            (((raw + 1.0) * 0.5).clamp(0.0, 1.0) * 255.0) as u8
        });

        Self {
            heights,
            climates,
            settlements,
            fine_noise,
            tree_coverage: None,
        }
    }
}

fn fbm(seed: i32, frequency: f32, octaves: i32) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(frequency));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(octaves));
    noise.set_fractal_gain(Some(0.5));
    noise.set_fractal_lacunarity(Some(2.0));
    noise
}

/// Pick a climate from normalized elevation and moisture.
fn classify_climate(elevation: f32, moisture: f32, sea: f32, highland: f32, mountain: f32) -> Climate {
    if elevation < sea {
        Climate::Ocean
    } else if elevation > mountain {
        Climate::Mountain
    } else if elevation > highland {
        if moisture > 0.5 {
            Climate::MountainWoods
        } else {
            Climate::Desert2
        }
    } else if moisture > 0.75 {
        Climate::Swamp
    } else if moisture > 0.6 {
        Climate::Rainforest
    } else if moisture > 0.45 {
        Climate::Woodlands
    } else if moisture > 0.35 {
        Climate::HauntedWoodlands
    } else if moisture > 0.25 {
        Climate::Subtropical
    } else {
        Climate::Desert
    }
}

impl CoarseHeightSource for WorldSource {
    fn dimensions(&self) -> (usize, usize) {
        (self.heights.width, self.heights.height)
    }

    fn coarse_height(&self, x: usize, y: usize) -> u8 {
        self.heights.get(x, y)
    }
}

impl ClimateLookup for WorldSource {
    fn climate_at(&self, x: usize, y: usize) -> Climate {
        self.climates
            .try_get(x as i32, y as i32)
            .unwrap_or_default()
    }
}

impl SettlementLookup for WorldSource {
    fn has_settlement(&self, x: usize, y: usize) -> bool {
        self.settlements
            .try_get(x as i32, y as i32)
            .unwrap_or(false)
    }
}

impl FineNoiseMaskSource for WorldSource {
    fn fine_dimensions(&self) -> (usize, usize) {
        (self.fine_noise.width, self.fine_noise.height)
    }

    fn fine_noise(&self, x: usize, y: usize) -> u8 {
        self.fine_noise.get(x, y)
    }
}

impl TreeCoverageAsset for WorldSource {
    fn tree_coverage_asset(&self) -> Option<&[u8]> {
        self.tree_coverage.as_deref()
    }
}
