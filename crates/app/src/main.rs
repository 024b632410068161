//! Headless demo: builds a synthetic world, lets `DistantTerrainPlugin`
//! initialize the terrain context, samples a strip of tiles across the map
//! and logs their statistics.
//!
//! Environment:
//!   - `DISTANT_TERRAIN_SEED`: world seed (default 42)
//!   - `DISTANT_TERRAIN_SETTINGS`: path to a JSON `TerrainSettings` file

use bevy::log::LogPlugin;
use bevy::prelude::*;

use terrain::config::{WORLD_HEIGHT, WORLD_WIDTH};
use terrain::{
    DistantTerrainPlugin, TerrainSettings, TileHeightSampler, WorldSource, WorldTerrainContext,
};

/// Tiles sampled along the map's horizontal center line.
const STRIP_TILES: i32 = 16;

fn main() {
    let seed = std::env::var("DISTANT_TERRAIN_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .insert_resource(load_settings())
        .insert_resource(WorldSource::synthetic(WORLD_WIDTH, WORLD_HEIGHT, seed))
        .add_plugins(DistantTerrainPlugin)
        .add_systems(Update, report_tile_strip);

    app.run();
}

/// Settings from `DISTANT_TERRAIN_SETTINGS`, or defaults when unset or unreadable.
fn load_settings() -> TerrainSettings {
    let Ok(path) = std::env::var("DISTANT_TERRAIN_SETTINGS") else {
        return TerrainSettings::default();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()));
    match parsed {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load terrain settings from {path}: {e}; using defaults");
            TerrainSettings::default()
        }
    }
}

fn report_tile_strip(
    context: Res<WorldTerrainContext>,
    settings: Res<TerrainSettings>,
    mut exit: EventWriter<AppExit>,
) {
    let Some((width, height)) = context.dimensions() else {
        return;
    };

    let y = (height / 2) as i32;
    let step = (width as i32 / STRIP_TILES).max(1);
    let tiles: Vec<(i32, i32)> = (0..STRIP_TILES).map(|i| (i * step, y)).collect();

    let sampler = TileHeightSampler::new(&context, &settings);
    for tile in sampler.sample_tiles(&tiles) {
        let (mx, my) = tile.map_pixel;
        info!(
            "tile ({:>4}, {:>3}) {:?}: avg {:.4} max {:.4} water distance {:.1} trees {}",
            mx,
            my,
            context.climate_at(mx, my),
            tile.average,
            tile.max,
            context.distance_from_water(mx, my),
            context.tree_coverage(mx, my),
        );
    }

    exit.send(AppExit::Success);
}
