//! Per-pixel height exaggeration.
//!
//! Coarse world heights are far too flat to read as terrain once they are
//! stretched over a tile, so every map pixel gets a multiplier that grows
//! with its distance from water, plus a climate-dependent random jitter.
//! Multipliers next to settlements are smoothed so towns do not sit on
//! cliffs, and the coarse height grid is smoothed away from water.
//!
//! Jitter is seeded per pixel from the terrain key, so the map is the same
//! whatever order (or thread) evaluates it.

pub mod exaggeration;
pub mod smoothing;

#[cfg(test)]
mod tests;

pub use exaggeration::*;
pub use smoothing::*;

use bevy::prelude::*;

use crate::climate::Climate;
use crate::raster::Raster;

/// Output of one multiplier-map build.
#[derive(Debug, Clone)]
pub struct MultiplierMaps {
    /// Smoothed exaggeration multiplier per map pixel.
    pub multipliers: Raster<f32>,
    /// Coarse heights smoothed over land; water cells keep their raw value.
    pub smoothed_heights: Raster<u8>,
}

/// Builds the exaggeration multiplier and smoothed height rasters from the
/// coarse world and its distance fields.
pub struct MultiplierMapBuilder<'a> {
    pub coarse_heights: &'a Raster<u8>,
    pub climates: &'a Raster<Climate>,
    /// Squared distance to the nearest water pixel.
    pub distance_from_water: &'a Raster<f32>,
    /// Squared distance to the nearest settlement pixel.
    pub distance_from_settlement: &'a Raster<f32>,
    pub climate_jitter: bool,
}

impl MultiplierMapBuilder<'_> {
    /// Unsmoothed multipliers, one per map pixel.
    pub fn raw_multipliers(&self) -> Raster<f32> {
        let climates = self.climates;
        Raster::from_fn(climates.width, climates.height, |x, y| {
            exaggeration_terms(
                x,
                y,
                self.distance_from_water.get(x, y),
                self.distance_from_settlement.get(x, y),
                climates.get(x, y),
                self.climate_jitter,
            )
            .multiplier()
        })
    }

    pub fn build(&self) -> MultiplierMaps {
        let raw = self.raw_multipliers();
        let multipliers = smooth_multipliers(&raw, self.distance_from_settlement);
        debug!(
            "Built {}x{} exaggeration multipliers",
            multipliers.width, multipliers.height
        );

        let smoothed_heights = smooth_heights(self.coarse_heights, self.distance_from_water);

        MultiplierMaps {
            multipliers,
            smoothed_heights,
        }
    }
}
