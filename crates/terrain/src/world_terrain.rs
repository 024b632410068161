//! World-scale terrain context.
//!
//! `WorldTerrainContext` owns every raster derived from the coarse world:
//! distance fields, exaggeration multipliers, smoothed heights, climate, tree
//! coverage and the fine noise mask. It is built once from a `TerrainSource`
//! and then only read, by tile samplers and by the per-pixel queries below.
//! Queries against an unbuilt context return neutral values.

use std::time::Instant;

use bevy::prelude::*;

use crate::climate::Climate;
use crate::config::{world_diagonal, BASE_HEIGHT_SCALE, WATER_HEIGHT_THRESHOLD};
use crate::distance_field;
use crate::multiplier_map::{location_term, MultiplierMapBuilder, MultiplierMaps};
use crate::raster::Raster;
use crate::settings::{TerrainSettings, TreeCoverageSource};
use crate::terrain_error::TerrainError;
use crate::tree_coverage;
use crate::world_source::TerrainSource;

/// All rasters of a built context. Every raster is `width × height` except
/// `fine_noise`.
#[derive(Debug, Clone)]
pub(crate) struct TerrainMaps {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) raw_heights: Raster<u8>,
    pub(crate) smoothed_heights: Raster<u8>,
    pub(crate) climates: Raster<Climate>,
    /// Squared distance to water.
    pub(crate) distance_from_water: Raster<f32>,
    /// Squared distance to a settlement.
    pub(crate) distance_from_settlement: Raster<f32>,
    pub(crate) multipliers: Raster<f32>,
    pub(crate) tree_coverage: Raster<u8>,
    pub(crate) fine_noise: Raster<u8>,
}

impl TerrainMaps {
    fn build<S: TerrainSource + ?Sized>(source: &S, settings: &TerrainSettings) -> Self {
        let (width, height) = source.dimensions();

        let raw_heights = Raster::from_fn(width, height, |x, y| source.coarse_height(x, y));
        let climates = Raster::from_fn(width, height, |x, y| source.climate_at(x, y));
        let settlements = Raster::from_fn(width, height, |x, y| source.has_settlement(x, y));
        let (fine_width, fine_height) = source.fine_dimensions();
        let fine_noise = Raster::from_fn(fine_width, fine_height, |x, y| source.fine_noise(x, y));

        let mut water = distance_field::mask_from(&raw_heights, |h| h <= WATER_HEIGHT_THRESHOLD);
        if settings.force_water_border {
            force_border(&mut water);
        }
        let distance_from_water = distance_field::transform(&water);
        let distance_from_settlement = distance_field::transform(&settlements);
        debug!("Built distance fields for {}x{} world", width, height);

        let MultiplierMaps {
            multipliers,
            smoothed_heights,
        } = MultiplierMapBuilder {
            coarse_heights: &raw_heights,
            climates: &climates,
            distance_from_water: &distance_from_water,
            distance_from_settlement: &distance_from_settlement,
            climate_jitter: settings.climate_jitter,
        }
        .build();

        let tree_coverage = match settings.tree_coverage_source {
            TreeCoverageSource::PreferAsset => {
                match tree_coverage::from_asset(source.tree_coverage_asset(), width, height) {
                    Ok(coverage) => {
                        debug!("Loaded tree coverage from asset");
                        coverage
                    }
                    Err(e) => {
                        warn!("{e}; computing tree coverage instead");
                        tree_coverage::compute(&smoothed_heights, &multipliers)
                    }
                }
            }
            TreeCoverageSource::Compute => tree_coverage::compute(&smoothed_heights, &multipliers),
        };

        Self {
            width,
            height,
            raw_heights,
            smoothed_heights,
            climates,
            distance_from_water,
            distance_from_settlement,
            multipliers,
            tree_coverage,
            fine_noise,
        }
    }

    fn check_bounds(&self, x: i32, y: i32) -> Result<(usize, usize), TerrainError> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Ok((x as usize, y as usize))
        } else {
            Err(TerrainError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }
}

fn force_border(mask: &mut Raster<bool>) {
    let (w, h) = (mask.width, mask.height);
    if w == 0 || h == 0 {
        return;
    }
    for x in 0..w {
        mask.set(x, 0, true);
        mask.set(x, h - 1, true);
    }
    for y in 0..h {
        mask.set(0, y, true);
        mask.set(w - 1, y, true);
    }
}

// ---------------------------------------------------------------------------
// Context resource
// ---------------------------------------------------------------------------

/// Owner of all world-scale terrain rasters.
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldTerrainContext {
    maps: Option<TerrainMaps>,
}

impl WorldTerrainContext {
    /// Build every raster from `source`. Does nothing when already built.
    pub fn init<S: TerrainSource + ?Sized>(&mut self, source: &S, settings: &TerrainSettings) {
        if self.maps.is_some() {
            debug!("World terrain context already initialized");
            return;
        }
        let start = Instant::now();
        let maps = TerrainMaps::build(source, settings);
        info!(
            "World terrain context built for {}x{} map pixels in {:.1} ms",
            maps.width,
            maps.height,
            start.elapsed().as_secs_f64() * 1000.0
        );
        self.maps = Some(maps);
    }

    /// Build a fresh context in one call.
    pub fn from_source<S: TerrainSource + ?Sized>(source: &S, settings: &TerrainSettings) -> Self {
        let mut context = Self::default();
        context.init(source, settings);
        context
    }

    /// Release all rasters.
    pub fn unload(&mut self) {
        if self.maps.take().is_some() {
            info!("World terrain context unloaded");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.maps.is_some()
    }

    /// `(width, height)` of the world grid, or `None` before `init`.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.maps.as_ref().map(|m| (m.width, m.height))
    }

    pub(crate) fn maps(&self) -> Option<&TerrainMaps> {
        self.maps.as_ref()
    }

    fn lookup<T: Copy>(
        &self,
        x: i32,
        y: i32,
        raster: impl Fn(&TerrainMaps) -> &Raster<T>,
    ) -> Result<T, TerrainError> {
        let maps = self.maps.as_ref().ok_or(TerrainError::Uninitialized)?;
        let (ux, uy) = maps.check_bounds(x, y)?;
        Ok(raster(maps).get(ux, uy))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn try_height_multiplier(&self, x: i32, y: i32) -> Result<f32, TerrainError> {
        self.lookup(x, y, |m| &m.multipliers)
    }

    /// Exaggeration multiplier of a map pixel; `1.0` when unavailable.
    pub fn height_multiplier(&self, x: i32, y: i32) -> f32 {
        self.try_height_multiplier(x, y).unwrap_or(1.0)
    }

    /// Euclidean distance, in map pixels, to the nearest water pixel.
    pub fn try_distance_from_water(&self, x: i32, y: i32) -> Result<f32, TerrainError> {
        self.lookup(x, y, |m| &m.distance_from_water)
            .map(f32::sqrt)
    }

    /// Distance to water; the world diagonal when unavailable.
    pub fn distance_from_water(&self, x: i32, y: i32) -> f32 {
        self.try_distance_from_water(x, y)
            .unwrap_or_else(|_| world_diagonal())
    }

    pub fn tree_coverage(&self, x: i32, y: i32) -> u8 {
        self.lookup(x, y, |m| &m.tree_coverage).unwrap_or(0)
    }

    pub fn coarse_height(&self, x: i32, y: i32) -> u8 {
        self.lookup(x, y, |m| &m.raw_heights).unwrap_or(0)
    }

    pub fn smoothed_height(&self, x: i32, y: i32) -> u8 {
        self.lookup(x, y, |m| &m.smoothed_heights).unwrap_or(0)
    }

    pub fn climate_at(&self, x: i32, y: i32) -> Climate {
        self.lookup(x, y, |m| &m.climates).unwrap_or_default()
    }

    /// Vertical scale of a map pixel's terrain: exaggerated base height plus
    /// the climate's noise-mask strength.
    pub fn terrain_height_scale(&self, x: i32, y: i32) -> f32 {
        self.height_multiplier(x, y) * BASE_HEIGHT_SCALE
            + self.climate_at(x, y).noise_map_scale()
    }

    /// Settlement-distance exaggeration term. It is not part of
    /// `height_multiplier`; `1.0` when unavailable.
    pub fn location_exaggeration(&self, x: i32, y: i32) -> f32 {
        let Some(maps) = self.maps.as_ref() else {
            return 1.0;
        };
        match maps.check_bounds(x, y) {
            Ok((ux, uy)) => location_term(
                maps.distance_from_water.get(ux, uy),
                maps.distance_from_settlement.get(ux, uy),
            ),
            Err(_) => 1.0,
        }
    }
}
