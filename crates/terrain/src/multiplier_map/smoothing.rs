use crate::config::SETTLEMENT_SMOOTHING_SQUARED_DISTANCE;
use crate::raster::Raster;

/// 3×3 binomial kernel; weights sum to 16.
const KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
const KERNEL_WEIGHT: u32 = 16;

/// Smooth multipliers on interior pixels within the 8-neighborhood of a
/// settlement. Reads only from `raw`, so the result does not depend on
/// visiting order.
pub fn smooth_multipliers(raw: &Raster<f32>, distance_from_settlement: &Raster<f32>) -> Raster<f32> {
    let mut out = raw.clone();
    for y in 1..raw.height.saturating_sub(1) {
        for x in 1..raw.width.saturating_sub(1) {
            if distance_from_settlement.get(x, y) > SETTLEMENT_SMOOTHING_SQUARED_DISTANCE {
                continue;
            }
            let mut sum = 0.0;
            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, &w) in row.iter().enumerate() {
                    sum += w as f32 * raw.get(x + kx - 1, y + ky - 1);
                }
            }
            out.set(x, y, sum / KERNEL_WEIGHT as f32);
        }
    }
    out
}

/// Integer-smoothed copy of the coarse heights. Border pixels and water
/// pixels (squared water distance 0) keep their raw height.
pub fn smooth_heights(heights: &Raster<u8>, distance_from_water: &Raster<f32>) -> Raster<u8> {
    let mut out = heights.clone();
    for y in 1..heights.height.saturating_sub(1) {
        for x in 1..heights.width.saturating_sub(1) {
            if distance_from_water.get(x, y) <= 0.0 {
                continue;
            }
            let mut sum = 0u32;
            for (ky, row) in KERNEL.iter().enumerate() {
                for (kx, &w) in row.iter().enumerate() {
                    sum += w * heights.get(x + kx - 1, y + ky - 1) as u32;
                }
            }
            out.set(x, y, (sum / KERNEL_WEIGHT) as u8);
        }
    }
    out
}
