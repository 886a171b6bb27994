// SPDX-License-Identifier: GPL-3.0-only
//! Shared YUV->RGB colour math
//!
//! Used by every conversion path:
//! - the fixed-function combiners (as packed chroma coefficient vectors)
//! - the fragment program epilogues (as a matrix plus offsets)
//! - the 3D lookup cube (evaluated per texel)

use serde::{Deserialize, Serialize};

/// User colour controls
///
/// Hue is in radians; gammas are per channel and must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorAdjustment {
    pub brightness: f32,
    pub contrast: f32,
    pub hue: f32,
    pub saturation: f32,
    pub gamma_r: f32,
    pub gamma_g: f32,
    pub gamma_b: f32,
}

impl Default for ColorAdjustment {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl ColorAdjustment {
    /// No change to the decoded colours
    pub const NEUTRAL: ColorAdjustment = ColorAdjustment {
        brightness: 0.0,
        contrast: 1.0,
        hue: 0.0,
        saturation: 1.0,
        gamma_r: 1.0,
        gamma_g: 1.0,
        gamma_b: 1.0,
    };

    /// Hue and saturation folded into `(saturation*cos(hue), saturation*sin(hue))`
    pub fn uv_rotation(&self) -> (f32, f32) {
        (
            self.saturation * self.hue.cos(),
            self.saturation * self.hue.sin(),
        )
    }

    pub fn gammas(&self) -> [f32; 3] {
        [self.gamma_r, self.gamma_g, self.gamma_b]
    }

    /// Whether every gamma is 1
    pub fn is_linear(&self) -> bool {
        self.gammas().iter().all(|&g| g == 1.0)
    }
}

/// Y, U, V factors and constant offset for each of R, G, B
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoefficientMatrix {
    /// `[ry, gy, by]`
    pub y: [f32; 3],
    /// `[ru, gu, bu]`
    pub u: [f32; 3],
    /// `[rv, gv, bv]`
    pub v: [f32; 3],
    /// `[rc, gc, bc]`
    pub offset: [f32; 3],
}

impl CoefficientMatrix {
    /// BT.601 video-range matrix with contrast, brightness, hue and
    /// saturation applied
    pub fn from_adjustment(adj: &ColorAdjustment) -> Self {
        let (uvcos, uvsin) = adj.uv_rotation();
        let contrast = adj.contrast;

        let luma = 1.164 * contrast;
        let y = [luma; 3];
        let u = [
            1.596 * uvsin,
            -0.391 * uvcos + -0.813 * uvsin,
            2.018 * uvcos,
        ];
        let v = [
            1.596 * uvcos,
            -0.391 * uvsin + -0.813 * uvcos,
            2.018 * uvsin,
        ];
        let offset = std::array::from_fn(|c| {
            let bias = (-16.0 * y[c] + -128.0 * u[c] + -128.0 * v[c]) / 255.0 + adj.brightness;
            // Centre contrast on mid-grey so contrast 0 gives grey, not black
            bias + 0.5 - contrast / 2.0
        });
        Self { y, u, v, offset }
    }

    /// Convert one normalised YUV triple
    pub fn apply(&self, yuv: [f32; 3]) -> [f32; 3] {
        std::array::from_fn(|c| {
            self.y[c] * yuv[0] + self.u[c] * yuv[1] + self.v[c] * yuv[2] + self.offset[c]
        })
    }
}

/// Chroma coefficient vectors for the fixed-function combiners
///
/// Returns `(ucoef, vcoef)` for R, G, B (fourth component 0), remapped from
/// [-2, 2] into [0, 1] as `x * 0.25 + 0.5`. The combiners undo this with
/// half-bias inputs and a scale-by-four output.
pub fn combiner_coefficients(uvcos: f32, uvsin: f32) -> ([f32; 4], [f32; 4]) {
    let u = [
        1.403 * uvsin,
        -0.344 * uvcos + -0.714 * uvsin,
        1.770 * uvcos,
        0.0,
    ];
    let v = [
        1.403 * uvcos,
        -0.344 * uvsin + -0.714 * uvcos,
        1.770 * uvsin,
        0.0,
    ];
    let pack = |c: [f32; 4]| c.map(|x| x * 0.25 + 0.5);
    (pack(u), pack(v))
}
