//! Tree coverage per map pixel.
//!
//! Trees thin out on low coastal ground and on high peaks. Coverage rises
//! linearly from `TREE_COVERAGE_START` to `TREE_COVERAGE_SATURATED_MIN`, stays
//! full up to `TREE_COVERAGE_SATURATED_MAX`, and falls back to zero at
//! `TREE_COVERAGE_END`. Elevation here is the smoothed coarse height times
//! the exaggeration multiplier.

use crate::config::{
    TREE_COVERAGE_END, TREE_COVERAGE_SATURATED_MAX, TREE_COVERAGE_SATURATED_MIN,
    TREE_COVERAGE_START,
};
use crate::raster::Raster;
use crate::terrain_error::TerrainError;

/// Asset name used in error reports.
pub const TREE_COVERAGE_ASSET: &str = "tree_coverage";

/// Coverage weight in `[0, 1]` for an exaggerated elevation.
pub fn coverage_weight(elevation: f32) -> f32 {
    if elevation > TREE_COVERAGE_START && elevation < TREE_COVERAGE_SATURATED_MIN {
        (elevation - TREE_COVERAGE_START) / (TREE_COVERAGE_SATURATED_MIN - TREE_COVERAGE_START)
    } else if (TREE_COVERAGE_SATURATED_MIN..=TREE_COVERAGE_SATURATED_MAX).contains(&elevation) {
        1.0
    } else if elevation > TREE_COVERAGE_SATURATED_MAX && elevation < TREE_COVERAGE_END {
        (TREE_COVERAGE_END - elevation) / (TREE_COVERAGE_END - TREE_COVERAGE_SATURATED_MAX)
    } else {
        0.0
    }
}

pub fn coverage_value(elevation: f32) -> u8 {
    to_byte(coverage_weight(elevation) * 255.0)
}

/// Round half to even, then saturate into a byte.
fn to_byte(value: f32) -> u8 {
    value.round_ties_even() as u8
}

/// Compute coverage for every map pixel.
pub fn compute(smoothed_heights: &Raster<u8>, multipliers: &Raster<f32>) -> Raster<u8> {
    Raster::from_fn(smoothed_heights.width, smoothed_heights.height, |x, y| {
        coverage_value(smoothed_heights.get(x, y) as f32 * multipliers.get(x, y))
    })
}

/// Wrap a precomputed coverage asset. Fails when the asset is absent or does
/// not hold exactly one byte per map pixel.
pub fn from_asset(asset: Option<&[u8]>, width: usize, height: usize) -> Result<Raster<u8>, TerrainError> {
    let expected = width * height;
    let bytes = asset.ok_or(TerrainError::MissingAsset {
        name: TREE_COVERAGE_ASSET,
        expected,
        found: None,
    })?;
    Raster::from_vec(width, height, bytes.to_vec()).ok_or(TerrainError::MissingAsset {
        name: TREE_COVERAGE_ASSET,
        expected,
        found: Some(bytes.len()),
    })
}
