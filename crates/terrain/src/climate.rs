//! World climate classification and the per-climate scale tables that drive
//! height exaggeration jitter, noise-mask strength, and small-feature noise.

use serde::{Deserialize, Serialize};

/// Climate of a map pixel.
///
/// Host climate ids that are not one of the known biomes are carried as
/// `Other` and resolve to the default table values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Climate {
    Ocean,
    Desert,
    Desert2,
    Mountain,
    Rainforest,
    Swamp,
    Subtropical,
    MountainWoods,
    #[default]
    Woodlands,
    HauntedWoodlands,
    Other(u8),
}

/// Noise-mask scale for climates without a dedicated entry.
pub const DEFAULT_NOISE_MAP_SCALE: f32 = 15.0;
/// Small-feature noise scale for climates without a dedicated entry.
pub const DEFAULT_EXTRA_NOISE_SCALE: f32 = 3.0;
/// Exaggeration jitter for climates without a dedicated entry.
pub const DEFAULT_ADDITIONAL_HEIGHT_NOISE: f32 = 0.0;

impl Climate {
    /// All known climates, in host id order.
    pub const KNOWN: [Climate; 10] = [
        Climate::Ocean,
        Climate::Desert,
        Climate::Desert2,
        Climate::Mountain,
        Climate::Rainforest,
        Climate::Swamp,
        Climate::Subtropical,
        Climate::MountainWoods,
        Climate::Woodlands,
        Climate::HauntedWoodlands,
    ];

    /// First host climate id; the known climates occupy `223..=232`.
    const FIRST_HOST_ID: u8 = 223;

    /// Map a host climate id to a climate.
    pub fn from_id(id: u8) -> Self {
        match id.checked_sub(Self::FIRST_HOST_ID) {
            Some(offset) if (offset as usize) < Self::KNOWN.len() => Self::KNOWN[offset as usize],
            _ => Climate::Other(id),
        }
    }

    /// Host climate id of this climate.
    pub fn id(self) -> u8 {
        match self {
            Climate::Other(id) => id,
            known => {
                let offset = Self::KNOWN
                    .iter()
                    .position(|&c| c == known)
                    .unwrap_or_default();
                Self::FIRST_HOST_ID + offset as u8
            }
        }
    }

    /// Strength of the bicubic noise-mask contribution.
    pub fn noise_map_scale(self) -> f32 {
        match self {
            Climate::Ocean => 0.0,
            Climate::Desert => 2.0,
            Climate::Desert2 => 14.5,
            Climate::Mountain => 15.0,
            Climate::Rainforest => 11.5,
            Climate::Swamp => 3.8,
            Climate::Subtropical => 3.35,
            Climate::MountainWoods => 16.5,
            Climate::Woodlands => 18.0,
            Climate::HauntedWoodlands => 8.0,
            Climate::Other(_) => DEFAULT_NOISE_MAP_SCALE,
        }
    }

    /// Height of small ground-level features produced by procedural noise.
    pub fn extra_noise_scale(self) -> f32 {
        match self {
            Climate::Ocean => 0.0,
            Climate::Desert => 29.0,
            Climate::Desert2 => 38.0,
            Climate::Mountain => 62.0,
            Climate::Rainforest => 16.0,
            Climate::Swamp => 20.0,
            Climate::Subtropical => 26.0,
            Climate::MountainWoods => 32.0,
            Climate::Woodlands => 24.0,
            Climate::HauntedWoodlands => 22.0,
            Climate::Other(_) => DEFAULT_EXTRA_NOISE_SCALE,
        }
    }

    /// Range of the random jitter added to the exaggeration multiplier.
    /// Jitter is drawn from `[-0.5 * value, value]`.
    pub fn additional_height_noise(self) -> f32 {
        match self {
            Climate::Ocean => 0.0,
            Climate::Desert => 0.85,
            Climate::Desert2 => 1.05,
            Climate::Mountain => 0.45,
            Climate::Rainforest => 0.77,
            Climate::Swamp => 1.7,
            Climate::Subtropical => 0.65,
            Climate::MountainWoods => 1.05,
            Climate::Woodlands => 0.59,
            Climate::HauntedWoodlands => 0.25,
            Climate::Other(_) => DEFAULT_ADDITIONAL_HEIGHT_NOISE,
        }
    }
}

/// Largest jitter range across all climates; bounds how far below 1.0 a
/// multiplier may fall.
pub fn max_additional_height_noise() -> f32 {
    Climate::KNOWN
        .iter()
        .map(|c| c.additional_height_noise())
        .fold(DEFAULT_ADDITIONAL_HEIGHT_NOISE, f32::max)
}
