pub const WORLD_WIDTH: usize = 1000;
pub const WORLD_HEIGHT: usize = 500;

/// Output resolution (cells per side) of one sampled tile.
pub const HEIGHTMAP_DIMENSION: usize = 33;
/// Smallest tile resolution the sampler accepts; bicubic sampling needs a 4-wide window.
pub const MIN_HEIGHTMAP_DIMENSION: usize = 4;

/// Fine noise-mask cells per map pixel along each axis.
pub const FINE_NOISE_CELLS_PER_PIXEL: usize = 3;

/// Coarse heights at or below this value are water.
pub const WATER_HEIGHT_THRESHOLD: u8 = 2;

/// Squared distance stored for cells that cannot reach any mask cell.
pub const DISTANCE_INFINITY: f32 = 1e20;

// ---------------------------------------------------------------------------
// Exaggeration multiplier
// ---------------------------------------------------------------------------

/// Upper bound of the per-pixel exaggeration multiplier.
pub const MAX_HEIGHT_EXAGGERATION: f32 = 25.0;
/// How strongly distance from water raises the multiplier.
pub const WATER_DISTANCE_FACTOR: f32 = 0.075;
/// How strongly distance from settlements would raise the multiplier.
pub const LOCATION_DISTANCE_FACTOR: f32 = 0.0275;
/// Pixels closer to water than this get no location exaggeration.
pub const MIN_WATER_DISTANCE_FOR_EXTRA_EXAGGERATION: f32 = 3.0;
/// Multipliers are only smoothed within this squared distance of a settlement
/// (the 8-connected neighborhood).
pub const SETTLEMENT_SMOOTHING_SQUARED_DISTANCE: f32 = 2.0;

// ---------------------------------------------------------------------------
// Tile sampling scales
// ---------------------------------------------------------------------------

pub const BASE_HEIGHT_SCALE: f32 = 8.0;
pub const MAX_NOISE_MAP_SCALE: f32 = 32.0;
/// Distance from water (map pixels) at which the noise mask reaches full strength.
pub const INTERPOLATION_END_DISTANCE: f32 = 5.0;

pub const OCEAN_ELEVATION: f32 = 3.4 * BASE_HEIGHT_SCALE;
pub const BEACH_ELEVATION: f32 = 5.0 * BASE_HEIGHT_SCALE;

/// Largest unnormalized height a tile can reach. Sample heights are divided by
/// this to land in [0, 1].
pub const MAX_TERRAIN_HEIGHT: f32 =
    MAX_HEIGHT_EXAGGERATION * BASE_HEIGHT_SCALE * 128.0 + MAX_NOISE_MAP_SCALE * 128.0 + 128.0;

pub const NORMALIZED_OCEAN_ELEVATION: f32 = OCEAN_ELEVATION / MAX_TERRAIN_HEIGHT;
pub const NORMALIZED_BEACH_ELEVATION: f32 = BEACH_ELEVATION / MAX_TERRAIN_HEIGHT;

// ---------------------------------------------------------------------------
// Small-feature noise
// ---------------------------------------------------------------------------

pub const LOW_FREQUENCY: f32 = 0.3;
pub const HIGH_FREQUENCY: f32 = 0.9;
pub const NOISE_AMPLITUDE: f32 = 0.5;
pub const NOISE_PERSISTENCE: f32 = 0.5;
pub const NOISE_OCTAVES: u32 = 1;
/// Fixed seed so every run synthesizes the same terrain.
pub const TERRAIN_NOISE_SEED: i32 = 1337;

// ---------------------------------------------------------------------------
// Tree coverage thresholds (elevation = smoothed height * multiplier)
// ---------------------------------------------------------------------------

pub const TREE_COVERAGE_START: f32 = BASE_HEIGHT_SCALE * 2.0;
pub const TREE_COVERAGE_SATURATED_MIN: f32 = BASE_HEIGHT_SCALE * 6.0;
pub const TREE_COVERAGE_SATURATED_MAX: f32 = BASE_HEIGHT_SCALE * 60.0;
pub const TREE_COVERAGE_END: f32 = BASE_HEIGHT_SCALE * 80.0;

/// Length of the world diagonal, returned as "infinitely far" when no
/// distance data is available.
pub fn world_diagonal() -> f32 {
    ((WORLD_WIDTH * WORLD_WIDTH + WORLD_HEIGHT * WORLD_HEIGHT) as f32).sqrt()
}
