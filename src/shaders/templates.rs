// SPDX-License-Identifier: GPL-3.0-only

//! ARB fragment program templates
//!
//! Placeholders are `$` followed by an upper-case key, filled by
//! [`ProgramBuilder::push_template`](super::builder::ProgramBuilder::push_template):
//!
//! | Key | Value |
//! |-----|-------|
//! | `IN` | source texture unit (0 = Y, 1 = U, 2 = V) |
//! | `OUT` | destination component of `yuv` |
//! | `KIND` | texture target keyword, `2D` or `RECT` |
//! | `LUT` | texture unit of a lookup texture |
//! | `SW`, `SH` | texture width and height |
//! | `DX`, `DY` | one texel in normalised coordinates |
//! | `Y`, `U`, `V`, `C` | matrix columns and offsets, as `r, g, b` |
//! | `G` | reciprocal gammas, as `r, g, b` |

/// Shared header; every scaler temporary is declared here once so the same
/// scaler can be emitted for several channels
pub const PREAMBLE: &str = "!!ARBfp1.0\n\
    OPTION ARB_precision_hint_fastest;\
    TEMP coord, coord2, cdelta, parmx, parmy, a, b, yuv;";

/// Single hardware-filtered fetch
pub const BILINEAR: &str = "TEX yuv.$OUT, fragment.texcoord[$IN], texture[$IN], $KIND;";

macro_rules! bicubic_main {
    () => {
        // first y-interpolation
        "ADD coord, fragment.texcoord[$IN].xyxy, cdelta.xyxw;\
         ADD coord2, fragment.texcoord[$IN].xyxy, cdelta.zyzw;\
         TEX a.r, coord.xyxy, texture[$IN], $KIND;\
         TEX a.g, coord.zwzw, texture[$IN], $KIND;\
         TEX b.r, coord2.xyxy, texture[$IN], $KIND;\
         TEX b.g, coord2.zwzw, texture[$IN], $KIND;\
         LRP a.b, parmy.b, a.rrrr, a.gggg;\
         LRP a.a, parmy.b, b.rrrr, b.gggg;\
         LRP yuv.$OUT, parmx.b, a.bbbb, a.aaaa;"
    };
}

/// Bicubic B-spline on normalised coordinates
pub const BICUBIC_2D: &str = concat!(
    "MAD coord.xy, fragment.texcoord[$IN], {$SW, $SH}, {0.5, 0.5};\
     TEX parmx, coord.x, texture[$LUT], 1D;\
     MUL cdelta.xz, parmx.rrgg, {-$DX, 0, $DX, 0};\
     TEX parmy, coord.y, texture[$LUT], 1D;\
     MUL cdelta.yw, parmy.rrgg, {0, -$DY, 0, $DY};",
    bicubic_main!()
);

/// Bicubic B-spline on texel coordinates
pub const BICUBIC_RECT: &str = concat!(
    "ADD coord, fragment.texcoord[$IN], {0.5, 0.5};\
     TEX parmx, coord.x, texture[$LUT], 1D;\
     MUL cdelta.xz, parmx.rrgg, {-1, 0, 1, 0};\
     TEX parmy, coord.y, texture[$LUT], 1D;\
     MUL cdelta.yw, parmy.rrgg, {0, -1, 0, 1};",
    bicubic_main!()
);

/// Matrix multiply
pub const CONVERT_DIRECT: &str = "PARAM ycoef = {$Y};\
    PARAM ucoef = {$U};\
    PARAM vcoef = {$V};\
    PARAM offsets = {$C};\
    TEMP res;\
    MAD res.rgb, yuv.rrrr, ycoef, offsets;\
    MAD res.rgb, yuv.gggg, ucoef, res;\
    MAD result.color.rgb, yuv.bbbb, vcoef, res;\
    END";

/// Matrix multiply, clamp, per-channel power
pub const CONVERT_POW: &str = "PARAM ycoef = {$Y};\
    PARAM ucoef = {$U};\
    PARAM vcoef = {$V};\
    PARAM offsets = {$C};\
    PARAM gamma = {$G};\
    TEMP res;\
    MAD res.rgb, yuv.rrrr, ycoef, offsets;\
    MAD res.rgb, yuv.gggg, ucoef, res;\
    MAD_SAT res.rgb, yuv.bbbb, vcoef, res;\
    POW result.color.r, res.r, gamma.r;\
    POW result.color.g, res.g, gamma.g;\
    POW result.color.b, res.b, gamma.b;\
    END";

/// Matrix multiply, then one row of the gamma texture per channel
///
/// The alpha of `res` starts at 0.125 and steps by 0.25, hitting the centre
/// of rows 0, 1 and 2 of the four-row lookup texture.
pub const CONVERT_LOOKUP: &str = "PARAM ycoef = {$Y, 0};\
    PARAM ucoef = {$U, 0};\
    PARAM vcoef = {$V, 0};\
    PARAM offsets = {$C, 0.125};\
    TEMP res;\
    MAD res, yuv.rrrr, ycoef, offsets;\
    MAD res.rgb, yuv.gggg, ucoef, res;\
    MAD res.rgb, yuv.bbbb, vcoef, res;\
    TEX result.color.r, res.raaa, texture[$LUT], 2D;\
    ADD res.a, res.a, 0.25;\
    TEX result.color.g, res.gaaa, texture[$LUT], 2D;\
    ADD res.a, res.a, 0.25;\
    TEX result.color.b, res.baaa, texture[$LUT], 2D;\
    END";

/// Whole conversion from the 3D cube
pub const CONVERT_LOOKUP3D: &str = "TEX result.color, yuv, texture[$LUT], 3D;END";
