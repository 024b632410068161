//! Pure interpolation kernels used by the tile sampler.

/// A 4×4 sample window, indexed `[row][column]`.
pub type Window4 = [[f32; 4]; 4];

/// Catmull-Rom cubic through four uniformly spaced samples.
///
/// Interpolates between `p1` (`t = 0`) and `p2` (`t = 1`).
#[inline]
pub fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Bicubic interpolation over a 4×4 window.
///
/// Each row is interpolated along its columns with `tx`, then the four row
/// results are interpolated with `ty`. The sampled region lies between the
/// inner samples `[1..=2][1..=2]`.
#[inline]
pub fn bicubic(window: &Window4, tx: f32, ty: f32) -> f32 {
    let mut rows = [0.0_f32; 4];
    for (out, row) in rows.iter_mut().zip(window.iter()) {
        *out = catmull_rom(row[0], row[1], row[2], row[3], tx);
    }
    catmull_rom(rows[0], rows[1], rows[2], rows[3], ty)
}

/// Standard 4-corner bilinear blend. `v00` sits at `(tx, ty) = (0, 0)`,
/// `v10` at `(1, 0)`, `v01` at `(0, 1)` and `v11` at `(1, 1)`.
#[inline]
pub fn bilinear(v00: f32, v10: f32, v01: f32, v11: f32, tx: f32, ty: f32) -> f32 {
    let top = v00 * (1.0 - tx) + v10 * tx;
    let bottom = v01 * (1.0 - tx) + v11 * tx;
    top * (1.0 - ty) + bottom * ty
}
