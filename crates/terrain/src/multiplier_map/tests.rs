//! Unit tests for the multiplier map builder.

#[cfg(test)]
mod tests {
    use crate::climate::{max_additional_height_noise, Climate};
    use crate::config::{
        DISTANCE_INFINITY, LOCATION_DISTANCE_FACTOR, MAX_HEIGHT_EXAGGERATION,
        WATER_DISTANCE_FACTOR,
    };
    use crate::distance_field;
    use crate::multiplier_map::*;
    use crate::raster::Raster;

    fn climate_grid(width: usize, height: usize) -> Raster<Climate> {
        Raster::from_fn(width, height, |x, y| Climate::KNOWN[(x + y) % Climate::KNOWN.len()])
    }

    // -------------------------------------------------------------------------
    // Exaggeration terms
    // -------------------------------------------------------------------------

    #[test]
    fn test_terrain_key_packs_y_high() {
        assert_eq!(terrain_key(0, 0), 0);
        assert_eq!(terrain_key(5, 0), 5);
        assert_eq!(terrain_key(0, 1), 65536);
        assert_eq!(terrain_key(999, 499), (499 << 16) + 999);
    }

    #[test]
    fn test_water_term_floor_and_growth() {
        assert_eq!(water_term(0.0), 1.0);
        assert_eq!(water_term(100.0), 1.0);
        let d = 40.0_f32;
        assert!((water_term(d * d) - d * WATER_DISTANCE_FACTOR).abs() < 1e-5);
    }

    #[test]
    fn test_location_term_suppressed_near_water() {
        assert_eq!(location_term(4.0, 10_000.0), 1.0);
        let expected = 100.0 * LOCATION_DISTANCE_FACTOR + 1.0;
        assert!((location_term(9.0, 10_000.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_jitter_range_and_determinism() {
        for climate in Climate::KNOWN {
            let range = climate.additional_height_noise();
            for y in 0..20 {
                for x in 0..20 {
                    let j = climate_jitter(x, y, climate);
                    assert!(j >= -0.5 * range && j <= range, "{climate:?}: {j}");
                    assert_eq!(j, climate_jitter(x, y, climate));
                }
            }
        }
    }

    #[test]
    fn test_zero_range_climate_has_no_jitter() {
        assert_eq!(climate_jitter(3, 4, Climate::Ocean), 0.0);
        assert_eq!(climate_jitter(3, 4, Climate::Other(9)), 0.0);
    }

    #[test]
    fn test_disabled_jitter() {
        let terms = exaggeration_terms(1, 1, 400.0, 400.0, Climate::Swamp, false);
        assert_eq!(terms.jitter, 0.0);
        assert_eq!(terms.multiplier(), terms.water);
    }

    #[test]
    fn test_multiplier_capped_when_no_water() {
        let terms = exaggeration_terms(0, 0, DISTANCE_INFINITY, DISTANCE_INFINITY, Climate::Swamp, true);
        assert_eq!(terms.multiplier(), MAX_HEIGHT_EXAGGERATION);
    }

    // -------------------------------------------------------------------------
    // Builder
    // -------------------------------------------------------------------------

    #[test]
    fn test_multipliers_within_bounds() {
        let (w, h) = (40, 30);
        let heights = Raster::from_fn(w, h, |x, y| if x < 3 || y > 26 { 0 } else { 90 });
        let water = distance_field::transform(&distance_field::mask_from(&heights, |v| v <= 2));
        let settlements = Raster::from_fn(w, h, |x, y| x % 9 == 4 && y % 7 == 3);
        let near_town = distance_field::transform(&settlements);
        let climates = climate_grid(w, h);

        let maps = MultiplierMapBuilder {
            coarse_heights: &heights,
            climates: &climates,
            distance_from_water: &water,
            distance_from_settlement: &near_town,
            climate_jitter: true,
        }
        .build();

        let lower = 1.0 - 0.5 * max_additional_height_noise();
        for &m in maps.multipliers.as_slice() {
            assert!(m >= lower - 1e-5 && m <= MAX_HEIGHT_EXAGGERATION, "{m}");
        }
    }

    #[test]
    fn test_smoothing_only_near_settlements() {
        let (w, h) = (12, 12);
        let mut raw = Raster::filled(w, h, 2.0_f32);
        raw.set(3, 3, 18.0);
        raw.set(8, 8, 18.0);
        let mut settlements = Raster::filled(w, h, false);
        settlements.set(3, 3, true);
        let near_town = distance_field::transform(&settlements);

        let smoothed = smooth_multipliers(&raw, &near_town);

        // (3, 3): 4/16 of the spike, 12/16 of the background
        assert!((smoothed.get(3, 3) - (18.0 * 4.0 + 2.0 * 12.0) / 16.0).abs() < 1e-5);
        // diagonal neighbor sees 1/16 of the spike
        assert!((smoothed.get(4, 4) - (18.0 + 2.0 * 15.0) / 16.0).abs() < 1e-5);
        // far spike untouched
        assert_eq!(smoothed.get(8, 8), 18.0);
        // two cells away is outside the neighborhood
        assert_eq!(smoothed.get(5, 3), 2.0);
    }

    #[test]
    fn test_smoothing_skips_border() {
        let raw = Raster::from_fn(5, 5, |x, y| (x * 5 + y) as f32);
        let near_town = Raster::filled(5, 5, 0.0_f32);
        let smoothed = smooth_multipliers(&raw, &near_town);
        for i in 0..5 {
            assert_eq!(smoothed.get(i, 0), raw.get(i, 0));
            assert_eq!(smoothed.get(0, i), raw.get(0, i));
            assert_eq!(smoothed.get(i, 4), raw.get(i, 4));
            assert_eq!(smoothed.get(4, i), raw.get(4, i));
        }
    }

    #[test]
    fn test_smooth_heights_keeps_water_and_border() {
        let heights = Raster::from_fn(6, 6, |x, y| if x == 2 && y == 2 { 0 } else { 160 });
        let water = distance_field::transform(&distance_field::mask_from(&heights, |v| v <= 2));
        let smoothed = smooth_heights(&heights, &water);

        assert_eq!(smoothed.get(2, 2), 0);
        assert_eq!(smoothed.get(0, 0), 160);
        // (3, 2) is 4-adjacent to the water pixel: (160 * 14) / 16
        assert_eq!(smoothed.get(3, 2), 140);
        // (3, 3) is diagonal: (160 * 15) / 16
        assert_eq!(smoothed.get(3, 3), 150);
        assert_eq!(smoothed.get(4, 4), 160);
    }

    #[test]
    fn test_tiny_grids_do_not_panic() {
        let raw = Raster::filled(2, 1, 1.0_f32);
        let near = Raster::filled(2, 1, 0.0_f32);
        assert_eq!(smooth_multipliers(&raw, &near), raw);
        let heights = Raster::filled(1, 1, 50u8);
        let water = Raster::filled(1, 1, 9.0_f32);
        assert_eq!(smooth_heights(&heights, &water), heights);
    }
}
