//! Procedural 2D noise for small ground-level features.
//!
//! Octaves of Perlin noise, each remapped to `[0, 1]` and weighted by a
//! geometrically decaying amplitude. The sampler multiplies a low- and a
//! high-frequency evaluation together.

use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::config::{
    HIGH_FREQUENCY, LOW_FREQUENCY, NOISE_AMPLITUDE, NOISE_OCTAVES, NOISE_PERSISTENCE,
    TERRAIN_NOISE_SEED,
};

pub struct TerrainNoise {
    noise: FastNoiseLite,
    pub octaves: u32,
    pub amplitude: f32,
    pub persistence: f32,
}

impl Default for TerrainNoise {
    fn default() -> Self {
        Self::new(TERRAIN_NOISE_SEED, NOISE_OCTAVES, NOISE_AMPLITUDE, NOISE_PERSISTENCE)
    }
}

impl TerrainNoise {
    pub fn new(seed: i32, octaves: u32, amplitude: f32, persistence: f32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        // frequency is applied per octave in `sample`
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            octaves,
            amplitude,
            persistence,
        }
    }

    /// Noise value in `[0, 1]` at `(x, y)` for a base `frequency`. Each octave
    /// doubles the frequency and scales the amplitude by `persistence`.
    pub fn sample(&self, x: f32, y: f32, frequency: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = self.amplitude;
        let mut frequency = frequency;
        for _ in 0..self.octaves {
            let raw = self.noise.get_noise_2d(x * frequency, y * frequency);
            total += (raw + 1.0) * 0.5 * amplitude;
            amplitude *= self.persistence;
            frequency *= 2.0;
        }
        total.clamp(0.0, 1.0)
    }

    pub fn low(&self, x: f32, y: f32) -> f32 {
        self.sample(x, y, LOW_FREQUENCY)
    }

    pub fn high(&self, x: f32, y: f32) -> f32 {
        self.sample(x, y, HIGH_FREQUENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_in_unit_range() {
        let noise = TerrainNoise::new(9, 4, 0.8, 0.6);
        for y in 0..40 {
            for x in 0..40 {
                let v = noise.sample(x as f32 * 1.7, y as f32 * 0.3, 0.3);
                assert!((0.0..=1.0).contains(&v), "{v}");
            }
        }
    }

    #[test]
    fn test_default_single_octave_bounded_by_amplitude() {
        let noise = TerrainNoise::default();
        for i in 0..200 {
            let x = i as f32 * 0.77;
            let v = noise.low(x, x * 0.5);
            assert!(v <= NOISE_AMPLITUDE + 1e-3, "{v}");
            assert!(noise.high(x, 3.0) <= NOISE_AMPLITUDE + 1e-3);
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let a = TerrainNoise::default();
        let b = TerrainNoise::default();
        for i in 0..50 {
            let p = i as f32 * 3.1;
            assert_eq!(a.low(p, p), b.low(p, p));
        }
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        let noise = TerrainNoise::new(1, 0, 0.5, 0.5);
        assert_eq!(noise.sample(4.5, 2.5, 0.3), 0.0);
    }
}
