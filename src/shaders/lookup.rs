// SPDX-License-Identifier: GPL-3.0-only

//! Lookup table generators
//!
//! Pure functions producing the texel data of the auxiliary textures: gamma
//! curves, bicubic B-spline weights and the 3D YUV->RGB cube. Tables must be
//! regenerated whole whenever their parameters change.

use super::yuv_common::ColorAdjustment;
use bytemuck::{Pod, Zeroable};

fn to_byte(value: f32) -> u8 {
    (255.0 * value.clamp(0.0, 1.0)).round() as u8
}

/// Gamma curve with `size` entries, `round(255 * (i / (size - 1))^(1/gamma))`
pub fn gamma_map(size: usize, gamma: f32) -> Vec<u8> {
    let exponent = 1.0 / gamma;
    let last = size.saturating_sub(1).max(1) as f32;
    (0..size)
        .map(|i| to_byte((i as f32 / last).powf(exponent)))
        .collect()
}

/// One texel of the spline-weight texture
///
/// `(left offset, right offset, blend factor, 0)`; lets a fragment program
/// evaluate a 4-tap cubic B-spline with two bilinear fetches.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SplineTexel(pub [f32; 4]);

/// Spline texel for fractional position `x` in [0, 1]
pub fn spline_weights(x: f32) -> SplineTexel {
    let w0 = (((-x + 3.0) * x - 3.0) * x + 1.0) / 6.0;
    let w1 = (((3.0 * x - 6.0) * x) * x + 4.0) / 6.0;
    let w2 = (((-3.0 * x + 3.0) * x + 3.0) * x + 1.0) / 6.0;
    let w3 = (x * x * x) / 6.0;
    SplineTexel([
        1.0 + x - w1 / (w0 + w1),
        1.0 - x + w3 / (w2 + w3),
        w0 + w1,
        0.0,
    ])
}

/// Spline-weight table sampled at cell centres
///
/// First and last entries use the exact boundaries `x = 0` and `x = 1`.
pub fn bspline_table(resolution: usize) -> Vec<SplineTexel> {
    let mut table: Vec<SplineTexel> = (0..resolution)
        .map(|i| spline_weights((i as f32 + 0.5) / resolution as f32))
        .collect();
    if let Some(first) = table.first_mut() {
        *first = spline_weights(0.0);
    }
    if let Some(last) = table.last_mut() {
        *last = spline_weights(1.0);
    }
    table
}

/// Advance along a cube axis: half steps next to the borders
fn cube_step(index: isize, size: isize, step: f32) -> f32 {
    if index == -1 || index == size - 1 {
        step / 2.0
    } else {
        step
    }
}

/// RGB cube for 3D-texture conversion
///
/// `size` interior texels per axis plus one border texel on each side, so
/// `3 * (size + 2)^3` bytes. Y varies fastest, then U, then V.
pub fn yuv_cube(size: usize, adj: &ColorAdjustment) -> Vec<u8> {
    let (uvcos, uvsin) = adj.uv_rotation();
    let exponents = adj.gammas().map(|g| 1.0 / g);
    let edge = size as isize;
    let step = 1.0 / size as f32;
    let side = size + 2;
    let mut map = Vec::with_capacity(3 * side * side * side);

    let mut v = -0.5f32;
    for i in -1..=edge {
        let mut u = -0.5f32;
        for j in -1..=edge {
            let mut y = -(16.0f32 / 255.0);
            for k in -1..=edge {
                let u_ = uvcos * u + uvsin * v;
                let v_ = uvcos * v + uvsin * u;
                let rgb = [
                    1.164 * y + 1.596 * v_,
                    1.164 * y - 0.391 * u_ - 0.813 * v_,
                    1.164 * y + 2.018 * u_,
                ];
                for (c, value) in rgb.into_iter().enumerate() {
                    let adjusted = adj.contrast * (value - 0.5) + 0.5 + adj.brightness;
                    map.push(to_byte(adjusted.powf(exponents[c])));
                }
                y += cube_step(k, edge, step);
            }
            u += cube_step(j, edge, step);
        }
        v += cube_step(i, edge, step);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{LOOKUP_3DRES, LOOKUP_BSPLINE_RES, LOOKUP_RES};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linear_gamma_endpoints() {
        let map = gamma_map(LOOKUP_RES, 1.0);
        assert_eq!(map.len(), LOOKUP_RES);
        assert_eq!(map[0], 0);
        assert_eq!(map[LOOKUP_RES - 1], 255);
    }

    #[test]
    fn test_gamma_monotonic() {
        for gamma in [0.5, 1.0, 1.8, 2.2] {
            let map = gamma_map(LOOKUP_RES, gamma);
            assert!(map.windows(2).all(|w| w[0] <= w[1]), "gamma {}", gamma);
        }
    }

    #[test]
    fn test_spline_weights_sum() {
        for i in 0..=10 {
            let x = i as f32 / 10.0;
            let SplineTexel([_, _, blend, zero]) = spline_weights(x);
            assert!((0.0..=1.0).contains(&blend));
            assert_eq!(zero, 0.0);
        }
        let SplineTexel([left, right, blend, _]) = spline_weights(0.0);
        assert_abs_diff_eq!(blend, 5.0 / 6.0, epsilon = 1e-6);
        assert_abs_diff_eq!(left, 1.0 - 0.8, epsilon = 1e-6);
        assert_abs_diff_eq!(right, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_bspline_table_boundaries() {
        let table = bspline_table(LOOKUP_BSPLINE_RES);
        assert_eq!(table.len(), LOOKUP_BSPLINE_RES);
        assert_eq!(table[0], spline_weights(0.0));
        assert_eq!(table[LOOKUP_BSPLINE_RES - 1], spline_weights(1.0));
        assert_eq!(bytemuck::cast_slice::<_, u8>(table.as_slice()).len(), LOOKUP_BSPLINE_RES * 16);
    }

    #[test]
    fn test_cube_size_and_corners() {
        let cube = yuv_cube(LOOKUP_3DRES, &ColorAdjustment::NEUTRAL);
        let side = LOOKUP_3DRES + 2;
        assert_eq!(cube.len(), 3 * side * side * side);
        // Darkest and brightest luma at near-neutral chroma
        let texel = |y: usize, u: usize, v: usize| {
            let idx = 3 * ((v * side + u) * side + y);
            [cube[idx], cube[idx + 1], cube[idx + 2]]
        };
        let mid = side / 2;
        let dark = texel(0, mid, mid);
        let bright = texel(side - 1, mid, mid);
        for c in 0..3 {
            assert!(dark[c] < bright[c]);
        }
    }
}
