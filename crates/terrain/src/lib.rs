//! Distant terrain synthesis.
//!
//! Turns a coarse world height grid into smooth, climate-aware heightmaps for
//! individual map pixels. A `WorldTerrainContext` preprocesses the whole
//! world once (distance fields, exaggeration multipliers, smoothed heights,
//! tree coverage); a `TileHeightSampler` then produces any number of tiles
//! from it, in parallel.

use bevy::prelude::*;

pub mod climate;
pub mod config;
pub mod distance_field;
pub mod interpolation;
pub mod multiplier_map;
pub mod raster;
pub mod settings;
pub mod terrain_error;
pub mod terrain_noise;
pub mod tile_sampler;
pub mod tree_coverage;
pub mod world_source;
pub mod world_terrain;


pub use climate::Climate;
pub use raster::Raster;
pub use settings::{TerrainSettings, TreeCoverageSource};
pub use terrain_error::TerrainError;
pub use tile_sampler::{TileHeightSampler, TileSample};
pub use world_source::{TerrainSource, WorldSource};
pub use world_terrain::WorldTerrainContext;

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Build the context once a `WorldSource` is present, rebuild it when the
/// source is replaced or mutated, and tear it down when the source is removed.
pub fn sync_terrain_context(
    source: Option<Res<WorldSource>>,
    settings: Res<TerrainSettings>,
    mut context: ResMut<WorldTerrainContext>,
    mut warned_missing: Local<bool>,
) {
    match source {
        Some(source) => {
            *warned_missing = false;
            if source.is_changed() && context.is_initialized() {
                debug!("WorldSource changed; rebuilding distant terrain");
                context.unload();
            }
            if !context.is_initialized() {
                context.init(&*source, &settings);
            }
        }
        None => {
            if context.is_initialized() {
                context.unload();
            } else if !*warned_missing {
                warn!("No WorldSource resource; distant terrain is not available");
                *warned_missing = true;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Registers `TerrainSettings` and `WorldTerrainContext` and keeps the
/// context in step with the `WorldSource` resource. Settings inserted before
/// the plugin are kept.
pub struct DistantTerrainPlugin;

impl Plugin for DistantTerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TerrainSettings>()
            .init_resource::<WorldTerrainContext>()
            .add_systems(PreUpdate, sync_terrain_context);
    }
}
