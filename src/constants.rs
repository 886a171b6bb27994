// SPDX-License-Identifier: GPL-3.0-only

//! OpenGL enum values and lookup-table resolutions
//!
//! Only the values this crate actually issues or names are listed. Values
//! come from the GL 1.x core headers and the NV_register_combiners,
//! ATI_fragment_shader and ARB_fragment_program extension registries.

pub type GLenum = u32;

// === Lookup table resolutions ===

/// Entries in the bicubic spline-weight texture (large to avoid artefacts)
pub const LOOKUP_BSPLINE_RES: usize = 2 * 1024;
/// Entries per channel in the 1D gamma lookup texture
pub const LOOKUP_RES: usize = 512;
/// Interior resolution of the 3D YUV->RGB cube (one border texel on each side)
pub const LOOKUP_3DRES: usize = 32;
/// First texture unit available for lookup textures; 0, 1, 2 hold Y, U, V
pub const FIRST_LOOKUP_UNIT: u32 = 3;
/// Largest accepted image-file texture dimension
pub const MAX_IMAGE_DIM: u32 = 16 * 1024;
/// Byte budget of an assembled fragment program
pub const PROGRAM_BUDGET: usize = 4000;

// === Core ===

pub const GL_NONE: GLenum = 0;
pub const GL_ZERO: GLenum = 0;
pub const GL_QUADS: GLenum = 0x0007;

pub const GL_VENDOR: GLenum = 0x1F00;
pub const GL_RENDERER: GLenum = 0x1F01;
pub const GL_VERSION: GLenum = 0x1F02;
pub const GL_EXTENSIONS: GLenum = 0x1F03;

pub const GL_UNPACK_ROW_LENGTH: GLenum = 0x0CF2;
pub const GL_UNPACK_ALIGNMENT: GLenum = 0x0CF5;

pub const GL_TEXTURE_1D: GLenum = 0x0DE0;
pub const GL_TEXTURE_2D: GLenum = 0x0DE1;
pub const GL_TEXTURE_3D: GLenum = 0x806F;
pub const GL_TEXTURE_RECTANGLE: GLenum = 0x84F5;

pub const GL_TEXTURE_BORDER_COLOR: GLenum = 0x1004;
pub const GL_TEXTURE_MAG_FILTER: GLenum = 0x2800;
pub const GL_TEXTURE_MIN_FILTER: GLenum = 0x2801;
pub const GL_TEXTURE_WRAP_S: GLenum = 0x2802;
pub const GL_TEXTURE_WRAP_T: GLenum = 0x2803;
pub const GL_TEXTURE_WRAP_R: GLenum = 0x8072;
pub const GL_TEXTURE_PRIORITY: GLenum = 0x8066;

pub const GL_NEAREST: GLenum = 0x2600;
pub const GL_LINEAR: GLenum = 0x2601;
pub const GL_CLAMP: GLenum = 0x2900;
pub const GL_REPEAT: GLenum = 0x2901;
pub const GL_CLAMP_TO_EDGE: GLenum = 0x812F;

pub const GL_TEXTURE0: GLenum = 0x84C0;
pub const GL_TEXTURE1: GLenum = 0x84C1;
pub const GL_TEXTURE2: GLenum = 0x84C2;
pub const GL_MAX_TEXTURE_UNITS: GLenum = 0x84E2;

// === Pixel formats ===

pub const GL_COLOR_INDEX: GLenum = 0x1900;
pub const GL_RED: GLenum = 0x1903;
pub const GL_GREEN: GLenum = 0x1904;
pub const GL_BLUE: GLenum = 0x1905;
pub const GL_ALPHA: GLenum = 0x1906;
pub const GL_RGB: GLenum = 0x1907;
pub const GL_RGBA: GLenum = 0x1908;
pub const GL_LUMINANCE: GLenum = 0x1909;
pub const GL_LUMINANCE_ALPHA: GLenum = 0x190A;
pub const GL_BGR: GLenum = 0x80E0;
pub const GL_BGRA: GLenum = 0x80E1;

// Internal formats
pub const GL_R3_G3_B2: GLenum = 0x2A10;
pub const GL_RGB4: GLenum = 0x804F;
pub const GL_RGB5: GLenum = 0x8050;
pub const GL_RGB8: GLenum = 0x8051;
pub const GL_RGB10: GLenum = 0x8052;
pub const GL_RGB12: GLenum = 0x8053;
pub const GL_RGB16: GLenum = 0x8054;
pub const GL_RGBA2: GLenum = 0x8055;
pub const GL_RGBA4: GLenum = 0x8056;
pub const GL_RGB5_A1: GLenum = 0x8057;
pub const GL_RGBA8: GLenum = 0x8058;
pub const GL_RGB10_A2: GLenum = 0x8059;
pub const GL_RGBA12: GLenum = 0x805A;
pub const GL_RGBA16: GLenum = 0x805B;
pub const GL_LUMINANCE8: GLenum = 0x8040;

// Types
pub const GL_BYTE: GLenum = 0x1400;
pub const GL_UNSIGNED_BYTE: GLenum = 0x1401;
pub const GL_SHORT: GLenum = 0x1402;
pub const GL_UNSIGNED_SHORT: GLenum = 0x1403;
pub const GL_INT: GLenum = 0x1404;
pub const GL_UNSIGNED_INT: GLenum = 0x1405;
pub const GL_FLOAT: GLenum = 0x1406;
pub const GL_2_BYTES: GLenum = 0x1407;
pub const GL_3_BYTES: GLenum = 0x1408;
pub const GL_4_BYTES: GLenum = 0x1409;
pub const GL_DOUBLE: GLenum = 0x140A;

pub const GL_UNSIGNED_BYTE_3_3_2: GLenum = 0x8032;
pub const GL_UNSIGNED_SHORT_4_4_4_4: GLenum = 0x8033;
pub const GL_UNSIGNED_SHORT_5_5_5_1: GLenum = 0x8034;
pub const GL_UNSIGNED_INT_8_8_8_8: GLenum = 0x8035;
pub const GL_UNSIGNED_INT_10_10_10_2: GLenum = 0x8036;
pub const GL_UNSIGNED_BYTE_2_3_3_REV: GLenum = 0x8362;
pub const GL_UNSIGNED_SHORT_5_6_5: GLenum = 0x8363;
pub const GL_UNSIGNED_SHORT_5_6_5_REV: GLenum = 0x8364;
pub const GL_UNSIGNED_SHORT_4_4_4_4_REV: GLenum = 0x8365;
pub const GL_UNSIGNED_SHORT_1_5_5_5_REV: GLenum = 0x8366;
pub const GL_UNSIGNED_INT_8_8_8_8_REV: GLenum = 0x8367;
pub const GL_UNSIGNED_INT_2_10_10_10_REV: GLenum = 0x8368;

// === NV_register_combiners ===

pub const GL_REGISTER_COMBINERS_NV: GLenum = 0x8522;
pub const GL_VARIABLE_A_NV: GLenum = 0x8523;
pub const GL_VARIABLE_B_NV: GLenum = 0x8524;
pub const GL_VARIABLE_C_NV: GLenum = 0x8525;
pub const GL_VARIABLE_D_NV: GLenum = 0x8526;
pub const GL_CONSTANT_COLOR0_NV: GLenum = 0x852A;
pub const GL_CONSTANT_COLOR1_NV: GLenum = 0x852B;
pub const GL_SPARE0_NV: GLenum = 0x852E;
pub const GL_DISCARD_NV: GLenum = 0x8530;
pub const GL_UNSIGNED_INVERT_NV: GLenum = 0x8537;
pub const GL_HALF_BIAS_NORMAL_NV: GLenum = 0x853A;
pub const GL_SIGNED_IDENTITY_NV: GLenum = 0x853C;
pub const GL_SCALE_BY_FOUR_NV: GLenum = 0x853F;
pub const GL_MAX_GENERAL_COMBINERS_NV: GLenum = 0x854D;
pub const GL_NUM_GENERAL_COMBINERS_NV: GLenum = 0x854E;
pub const GL_COMBINER0_NV: GLenum = 0x8550;
pub const GL_COMBINER1_NV: GLenum = 0x8551;

// === ATI_fragment_shader ===

pub const GL_FRAGMENT_SHADER_ATI: GLenum = 0x8920;
pub const GL_REG_0_ATI: GLenum = 0x8921;
pub const GL_REG_1_ATI: GLenum = 0x8922;
pub const GL_REG_2_ATI: GLenum = 0x8923;
pub const GL_CON_0_ATI: GLenum = 0x8941;
pub const GL_CON_1_ATI: GLenum = 0x8942;
pub const GL_ADD_ATI: GLenum = 0x8963;
pub const GL_MUL_ATI: GLenum = 0x8964;
pub const GL_MAD_ATI: GLenum = 0x8968;
pub const GL_NUM_FRAGMENT_REGISTERS_ATI: GLenum = 0x896E;
pub const GL_SWIZZLE_STR_ATI: GLenum = 0x8976;
pub const GL_4X_BIT_ATI: GLenum = 0x0000_0002;
pub const GL_BIAS_BIT_ATI: GLenum = 0x0000_0008;

// === ARB_fragment_program ===

pub const GL_FRAGMENT_PROGRAM: GLenum = 0x8804;
pub const GL_PROGRAM_ERROR_POSITION: GLenum = 0x864B;
pub const GL_PROGRAM_ERROR_STRING: GLenum = 0x8874;
pub const GL_PROGRAM_FORMAT_ASCII: GLenum = 0x8875;

/// Program resource queries: (description, current pname, maximum pname)
pub const PROGRAM_STATS: [(&str, GLenum, GLenum); 14] = [
    ("instructions", 0x88A0, 0x88A1),
    ("native instructions", 0x88A2, 0x88A3),
    ("temporaries", 0x88A4, 0x88A5),
    ("native temporaries", 0x88A6, 0x88A7),
    ("parameters", 0x88A8, 0x88A9),
    ("native parameters", 0x88AA, 0x88AB),
    ("attribs", 0x88AC, 0x88AD),
    ("native attribs", 0x88AE, 0x88AF),
    ("ALU instructions", 0x8805, 0x880B),
    ("TEX instructions", 0x8806, 0x880C),
    ("TEX indirections", 0x8807, 0x880D),
    ("native ALU instructions", 0x8808, 0x880E),
    ("native TEX instructions", 0x8809, 0x880F),
    ("native TEX indirections", 0x880A, 0x8810),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_units_are_consecutive() {
        assert_eq!(GL_TEXTURE1, GL_TEXTURE0 + 1);
        assert_eq!(GL_TEXTURE2, GL_TEXTURE0 + 2);
    }

    #[test]
    fn test_program_stat_pairs_distinct() {
        for (name, cur, max) in PROGRAM_STATS {
            assert_ne!(cur, max, "{} queries the same pname twice", name);
        }
    }
}
