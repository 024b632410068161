// ---------------------------------------------------------------------------
// Runtime terrain settings
// ---------------------------------------------------------------------------

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{HEIGHTMAP_DIMENSION, MIN_HEIGHTMAP_DIMENSION};

/// Where the tree-coverage raster comes from when the context is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TreeCoverageSource {
    /// Use the source's precomputed asset when it is present and sized
    /// correctly, otherwise compute it.
    #[default]
    PreferAsset,
    /// Always compute from smoothed heights and multipliers.
    Compute,
}

/// Tunables for context building and tile sampling.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Output cells per tile side.
    pub heightmap_dimension: usize,
    /// Treat the outermost ring of map pixels as water so terrain falls off
    /// toward the map edge.
    pub force_water_border: bool,
    /// Add the per-climate random jitter to exaggeration multipliers.
    pub climate_jitter: bool,
    pub tree_coverage_source: TreeCoverageSource,
    /// Output rows handed to each task when sampling in parallel.
    pub row_batch_size: usize,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            heightmap_dimension: HEIGHTMAP_DIMENSION,
            force_water_border: true,
            climate_jitter: true,
            tree_coverage_source: TreeCoverageSource::default(),
            row_batch_size: 4,
        }
    }
}

impl TerrainSettings {
    /// Tile dimension clamped to what bicubic sampling supports.
    pub fn effective_dimension(&self) -> usize {
        if self.heightmap_dimension < MIN_HEIGHTMAP_DIMENSION {
            warn!(
                "heightmap_dimension {} is below the minimum of {}; using {}",
                self.heightmap_dimension, MIN_HEIGHTMAP_DIMENSION, MIN_HEIGHTMAP_DIMENSION
            );
            MIN_HEIGHTMAP_DIMENSION
        } else {
            self.heightmap_dimension
        }
    }

    pub fn effective_row_batch_size(&self) -> usize {
        self.row_batch_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = TerrainSettings::default();
        assert_eq!(settings.heightmap_dimension, 33);
        assert!(settings.force_water_border);
        assert!(settings.climate_jitter);
        assert_eq!(settings.tree_coverage_source, TreeCoverageSource::PreferAsset);
        assert_eq!(settings.row_batch_size, 4);
    }

    #[test]
    fn test_dimension_clamped_to_minimum() {
        let settings = TerrainSettings {
            heightmap_dimension: 2,
            ..Default::default()
        };
        assert_eq!(settings.effective_dimension(), MIN_HEIGHTMAP_DIMENSION);
        let settings = TerrainSettings {
            heightmap_dimension: 65,
            ..Default::default()
        };
        assert_eq!(settings.effective_dimension(), 65);
    }

    #[test]
    fn test_zero_row_batch_becomes_one() {
        let settings = TerrainSettings {
            row_batch_size: 0,
            ..Default::default()
        };
        assert_eq!(settings.effective_row_batch_size(), 1);
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let settings = TerrainSettings {
            heightmap_dimension: 17,
            force_water_border: false,
            climate_jitter: false,
            tree_coverage_source: TreeCoverageSource::Compute,
            row_batch_size: 8,
        };
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: TerrainSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let back: TerrainSettings =
            serde_json::from_str(r#"{"heightmap_dimension": 9}"#).expect("deserialize");
        assert_eq!(back.heightmap_dimension, 9);
        assert!(back.force_water_border);
        assert_eq!(back.row_batch_size, 4);
    }
}
