use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::climate::Climate;
use crate::config::{
    LOCATION_DISTANCE_FACTOR, MAX_HEIGHT_EXAGGERATION, MIN_WATER_DISTANCE_FOR_EXTRA_EXAGGERATION,
    WATER_DISTANCE_FACTOR,
};

/// Seed for per-pixel randomness: `(y << 16) + x`.
#[inline]
pub fn terrain_key(x: usize, y: usize) -> u64 {
    ((y as u64) << 16) + x as u64
}

/// The additive pieces of one pixel's exaggeration multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExaggerationTerms {
    /// Grows with distance from water, never below 1.
    pub water: f32,
    /// Grows with distance from settlements. Reported, not part of the multiplier.
    pub location: f32,
    pub jitter: f32,
}

impl ExaggerationTerms {
    pub fn multiplier(&self) -> f32 {
        (self.jitter + self.water).min(MAX_HEIGHT_EXAGGERATION)
    }
}

/// Random jitter for a pixel, drawn from `[-0.5 * range, range]`.
pub fn climate_jitter(x: usize, y: usize, climate: Climate) -> f32 {
    let range = climate.additional_height_noise();
    if range <= 0.0 {
        return 0.0;
    }
    let mut rng = ChaCha8Rng::seed_from_u64(terrain_key(x, y));
    rng.gen_range(-0.5 * range..=range)
}

/// Location exaggeration from squared water and settlement distances.
pub fn location_term(distance_from_water_sq: f32, distance_from_settlement_sq: f32) -> f32 {
    if distance_from_water_sq.sqrt() < MIN_WATER_DISTANCE_FOR_EXTRA_EXAGGERATION {
        1.0
    } else {
        distance_from_settlement_sq.sqrt() * LOCATION_DISTANCE_FACTOR + 1.0
    }
}

pub fn water_term(distance_from_water_sq: f32) -> f32 {
    (distance_from_water_sq.sqrt() * WATER_DISTANCE_FACTOR).max(1.0)
}

/// All exaggeration terms for map pixel `(x, y)`.
pub fn exaggeration_terms(
    x: usize,
    y: usize,
    distance_from_water_sq: f32,
    distance_from_settlement_sq: f32,
    climate: Climate,
    jitter_enabled: bool,
) -> ExaggerationTerms {
    ExaggerationTerms {
        water: water_term(distance_from_water_sq),
        location: location_term(distance_from_water_sq, distance_from_settlement_sq),
        jitter: if jitter_enabled {
            climate_jitter(x, y, climate)
        } else {
            0.0
        },
    }
}
