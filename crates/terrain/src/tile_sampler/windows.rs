use crate::config::{FINE_NOISE_CELLS_PER_PIXEL, INTERPOLATION_END_DISTANCE, WATER_HEIGHT_THRESHOLD};
use crate::interpolation::Window4;
use crate::world_terrain::TerrainMaps;

/// Side of the fine noise-mask window read per tile.
pub(crate) const FINE_WINDOW: usize = 7;

/// Map pixels beyond the grid edge that still change which cells a tile reads.
const LOOKUP_MARGIN: i32 = 4;

fn to_i32(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// Everything one tile reads from the world, gathered up front so per-cell
/// evaluation touches no shared rasters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TileWindows {
    /// Smoothed height × multiplier around the tile, `[row][col]`.
    pub(crate) base: Window4,
    /// Strength of the fine noise mask around the tile.
    pub(crate) noise_multiplier: Window4,
    /// Extra-noise scales at the four tile corners: top-left, top-right,
    /// bottom-left, bottom-right.
    pub(crate) corners: [f32; 4],
    pub(crate) fine: [[f32; FINE_WINDOW]; FINE_WINDOW],
    /// World noise coordinates of the tile's first cell.
    pub(crate) noise_origin: (f32, f32),
}

impl TileWindows {
    pub(crate) fn gather(maps: &TerrainMaps, mx: i32, my: i32, dimension: usize) -> Self {
        // Past this margin every raster lookup clamps to the same edge cells,
        // so far-off tiles repeat the outermost one and noise stays in range.
        let mx = mx.clamp(-LOOKUP_MARGIN, to_i32(maps.width).saturating_add(LOOKUP_MARGIN));
        let my = my.clamp(-LOOKUP_MARGIN, to_i32(maps.height).saturating_add(LOOKUP_MARGIN));
        let span = (dimension - 1) as f32;
        let noise_origin = (mx as f32 * span, my as f32 * span);

        let mut base = [[0.0; 4]; 4];
        let mut noise_multiplier = [[0.0; 4]; 4];
        for j in 0..4 {
            for i in 0..4 {
                let px = mx + i as i32 - 2;
                let py = my + j as i32 - 2;
                let height = maps.smoothed_heights.get_clamped(px, py);
                base[j][i] = height as f32 * maps.multipliers.get_clamped(px, py);

                let land = if height > WATER_HEIGHT_THRESHOLD { 1.0 } else { 0.0 };
                let distance = maps.distance_from_water.get_clamped(px, py).sqrt();
                let fade = (distance / INTERPOLATION_END_DISTANCE).min(1.0);
                noise_multiplier[j][i] =
                    land * maps.climates.get_clamped(px, py).noise_map_scale() * fade;
            }
        }

        let extra = |x0: i32, y0: i32| {
            let mut sum = 0.0;
            for y in y0..=y0 + 1 {
                for x in x0..=x0 + 1 {
                    sum += maps.climates.get_clamped(x, y).extra_noise_scale();
                }
            }
            sum / 4.0
        };
        let corners = [
            extra(mx - 1, my - 1),
            extra(mx, my - 1),
            extra(mx - 1, my),
            extra(mx, my),
        ];

        let cells = FINE_NOISE_CELLS_PER_PIXEL as i32;
        let origin_x = (mx - 1) * cells - 1;
        let origin_y = (my - 1) * cells - 1;
        let mut fine = [[0.0; FINE_WINDOW]; FINE_WINDOW];
        if !maps.fine_noise.is_empty() {
            for (j, row) in fine.iter_mut().enumerate() {
                for (i, cell) in row.iter_mut().enumerate() {
                    *cell = maps
                        .fine_noise
                        .get_clamped(origin_x + i as i32, origin_y + j as i32)
                        as f32;
                }
            }
        }

        Self {
            base,
            noise_multiplier,
            corners,
            fine,
            noise_origin,
        }
    }

    /// 4×4 slice of the fine window starting at `(ix, iy)`.
    pub(crate) fn fine_window(&self, ix: usize, iy: usize) -> Window4 {
        let mut window = [[0.0; 4]; 4];
        for (j, row) in window.iter_mut().enumerate() {
            row.copy_from_slice(&self.fine[iy + j][ix..ix + 4]);
        }
        window
    }
}
