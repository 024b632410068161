//! Exact squared Euclidean distance transform.
//!
//! Implements the lower-envelope-of-parabolas method of Felzenszwalb and
//! Huttenlocher: a 1D transform is run down every column and then along every
//! row. Because squared Euclidean distance is separable, the composition is
//! exact for integer grid points.

use crate::config::DISTANCE_INFINITY;
use crate::raster::Raster;

/// Scratch buffers for the 1D pass, sized for the longest line.
struct Envelope {
    /// Grid positions of the parabolas in the lower envelope.
    vertices: Vec<usize>,
    /// Boundaries between consecutive envelope parabolas.
    boundaries: Vec<f64>,
}

impl Envelope {
    fn new(len: usize) -> Self {
        Self {
            vertices: vec![0; len.max(1)],
            boundaries: vec![0.0; len.max(1) + 1],
        }
    }

    /// Squared distance transform of the sampled function `f`, written to `out`.
    /// Infinite or NaN samples are treated as `DISTANCE_INFINITY`.
    fn transform_line(&mut self, f: &[f32], out: &mut [f32]) {
        let n = f.len();
        debug_assert!(out.len() >= n, "output line shorter than input");
        if n == 0 {
            return;
        }
        let v = &mut self.vertices;
        let z = &mut self.boundaries;

        let mut k = 0;
        v[0] = 0;
        z[0] = f64::NEG_INFINITY;
        z[1] = f64::INFINITY;
        for q in 1..n {
            let mut s = intersection(f, q, v[k]);
            while k > 0 && s <= z[k] {
                k -= 1;
                s = intersection(f, q, v[k]);
            }
            k += 1;
            v[k] = q;
            z[k] = s;
            z[k + 1] = f64::INFINITY;
        }

        k = 0;
        for (q, slot) in out[..n].iter_mut().enumerate() {
            while z[k + 1] < q as f64 {
                k += 1;
            }
            let dq = q as f32 - v[k] as f32;
            *slot = dq * dq + bounded(f[v[k]]);
        }
    }
}

/// Position where the parabola rooted at `q` overtakes the one rooted at `p`.
#[inline]
fn intersection(f: &[f32], q: usize, p: usize) -> f64 {
    let (qf, pf) = (q as f64, p as f64);
    let (fq, fp) = (bounded(f[q]) as f64, bounded(f[p]) as f64);
    ((fq + qf * qf) - (fp + pf * pf)) / (2.0 * qf - 2.0 * pf)
}

/// Caps a sample at `DISTANCE_INFINITY`; NaN maps to the cap as well.
#[inline]
fn bounded(value: f32) -> f32 {
    value.min(DISTANCE_INFINITY)
}

/// 1D squared distance transform of `f` into `out`.
///
/// # Panics
///
/// Panics if `out` is shorter than `f`.
pub fn transform_line(f: &[f32], out: &mut [f32]) {
    Envelope::new(f.len()).transform_line(f, out);
}

/// Build a binary mask by applying `predicate` to every cell of `raster`.
pub fn mask_from<T: Copy>(raster: &Raster<T>, predicate: impl Fn(T) -> bool) -> Raster<bool> {
    raster.map(predicate)
}

/// Squared Euclidean distance from every cell to the nearest `true` cell of
/// `mask`. Cells of a mask with no `true` cell hold `DISTANCE_INFINITY`.
pub fn transform(mask: &Raster<bool>) -> Raster<f32> {
    let (width, height) = (mask.width, mask.height);
    let mut img = mask.map(|m| if m { 0.0 } else { DISTANCE_INFINITY });

    let longest = width.max(height);
    let mut envelope = Envelope::new(longest);
    let mut line = vec![0.0_f32; longest];
    let mut out = vec![0.0_f32; longest];

    let data = img.as_mut_slice();

    // Columns
    for x in 0..width {
        for y in 0..height {
            line[y] = data[y * width + x];
        }
        envelope.transform_line(&line[..height], &mut out[..height]);
        for y in 0..height {
            data[y * width + x] = out[y];
        }
    }

    // Rows
    for y in 0..height {
        let row = &mut data[y * width..(y + 1) * width];
        line[..width].copy_from_slice(row);
        envelope.transform_line(&line[..width], row);
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn brute_force(mask: &Raster<bool>) -> Raster<f32> {
        Raster::from_fn(mask.width, mask.height, |x, y| {
            let mut best = f32::INFINITY;
            for my in 0..mask.height {
                for mx in 0..mask.width {
                    if mask.get(mx, my) {
                        let dx = x as f32 - mx as f32;
                        let dy = y as f32 - my as f32;
                        best = best.min(dx * dx + dy * dy);
                    }
                }
            }
            best
        })
    }

    #[test]
    fn test_matches_brute_force_on_random_masks() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for density in [0.01_f64, 0.05, 0.2, 0.5, 0.9] {
            for _ in 0..8 {
                let mask = Raster::from_fn(16, 16, |_, _| rng.gen_bool(density));
                if !mask.as_slice().iter().any(|&m| m) {
                    continue;
                }
                let fast = transform(&mask);
                let slow = brute_force(&mask);
                for y in 0..16 {
                    for x in 0..16 {
                        assert_eq!(
                            fast.get(x, y),
                            slow.get(x, y),
                            "mismatch at ({x}, {y}) with density {density}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_matches_brute_force_on_non_square_raster() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut mask = Raster::from_fn(23, 9, |_, _| rng.gen_bool(0.1));
        mask.set(4, 4, true);
        assert_eq!(transform(&mask), brute_force(&mask));
    }

    #[test]
    fn test_all_true_mask_is_zero() {
        let mask = Raster::filled(16, 16, true);
        let d = transform(&mask);
        assert!(d.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_cell_farthest_corner() {
        for n in [2_usize, 5, 16, 31] {
            let mut mask = Raster::filled(n, n, false);
            mask.set(0, 0, true);
            let d = transform(&mask);
            let expected = 2.0 * ((n - 1) * (n - 1)) as f32;
            assert_eq!(d.get(n - 1, n - 1), expected, "n = {n}");
            assert_eq!(d.get(0, 0), 0.0);
        }
    }

    #[test]
    fn test_empty_mask_is_sentinel() {
        let mask = Raster::filled(8, 8, false);
        let d = transform(&mask);
        assert!(d.as_slice().iter().all(|&v| v >= DISTANCE_INFINITY * 0.5));
    }

    #[test]
    fn test_zero_sized_raster() {
        let mask: Raster<bool> = Raster::filled(0, 0, false);
        assert!(transform(&mask).is_empty());
    }

    #[test]
    fn test_transform_line_single_source() {
        let f = [DISTANCE_INFINITY, DISTANCE_INFINITY, 0.0, DISTANCE_INFINITY, DISTANCE_INFINITY];
        let mut out = [0.0_f32; 5];
        transform_line(&f, &mut out);
        assert_eq!(out, [4.0, 1.0, 0.0, 1.0, 4.0]);
    }

    #[test]
    fn test_transform_line_accepts_infinite_samples() {
        let mut out = [0.0_f32; 3];
        transform_line(&[f32::INFINITY, 0.0, f32::INFINITY], &mut out);
        assert_eq!(out, [1.0, 0.0, 1.0]);

        let mut out = [0.0_f32; 4];
        transform_line(&[0.0, f32::NAN, f32::INFINITY, 9.0], &mut out);
        assert_eq!(out, [0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_transform_line_all_infinite_stays_at_sentinel() {
        let mut out = [0.0_f32; 4];
        transform_line(&[f32::INFINITY; 4], &mut out);
        assert!(out.iter().all(|&d| d.is_finite() && d >= DISTANCE_INFINITY));
    }

    #[test]
    #[should_panic]
    fn test_transform_line_rejects_short_output() {
        let mut out = [0.0_f32; 2];
        transform_line(&[0.0, 1.0, 4.0], &mut out);
    }

    #[test]
    fn test_mask_from_predicate() {
        let heights = Raster::from_fn(4, 1, |x, _| x as u8);
        let water = mask_from(&heights, |h| h <= 1);
        assert_eq!(water.as_slice(), &[true, true, false, false]);
    }
}
