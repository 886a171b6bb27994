// SPDX-License-Identifier: GPL-3.0-only

//! Mapping of frame pixel formats onto GL texture formats

use super::pixel_format::PixelFormat;
use crate::constants::*;

/// How a pixel format is stored in and transferred to a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Bits per pixel of the source frame
    pub bpp: u32,
    /// Internal format (legacy component count 1, 3 or 4)
    pub internal_format: GLenum,
    /// Transfer format
    pub format: GLenum,
    /// Transfer type
    pub ty: GLenum,
    /// False if the values are only a best-effort RGBA fallback
    pub supported: bool,
}

/// Find the texture formats for `format`
///
/// Unsupported formats still get a usable 4-byte RGBA fallback with
/// `supported` cleared. YV12 is reported as unsupported but described as
/// its 8-bit luma plane, which is how the planes are uploaded.
pub fn map_format(format: PixelFormat) -> FormatDescriptor {
    let mut desc = FormatDescriptor {
        bpp: format.depth(),
        internal_format: 3,
        format: GL_RGBA,
        ty: GL_UNSIGNED_BYTE,
        supported: true,
    };
    match format {
        PixelFormat::RGB24 => {
            desc.format = GL_RGB;
        }
        PixelFormat::RGBA => {
            desc.internal_format = 4;
        }
        PixelFormat::YV12 | PixelFormat::Y800 | PixelFormat::Y8 => {
            // No native YV12 support
            desc.supported = format != PixelFormat::YV12;
            desc.internal_format = 1;
            desc.bpp = 8;
            desc.format = GL_LUMINANCE;
        }
        PixelFormat::RGB15 => {
            desc.ty = GL_UNSIGNED_SHORT_1_5_5_5_REV;
        }
        PixelFormat::RGB16 => {
            desc.format = GL_RGB;
            desc.ty = GL_UNSIGNED_SHORT_5_6_5_REV;
        }
        PixelFormat::BGR15 => {
            desc.format = GL_BGRA;
            desc.ty = GL_UNSIGNED_SHORT_1_5_5_5_REV;
        }
        PixelFormat::BGR16 => {
            // Red and blue swap through the non-reversed packed type
            desc.format = GL_RGB;
            desc.ty = GL_UNSIGNED_SHORT_5_6_5;
        }
        PixelFormat::BGR24 => {
            desc.format = GL_BGR;
        }
        PixelFormat::BGRA => {
            desc.internal_format = 4;
            desc.format = GL_BGRA;
        }
        PixelFormat::I420 | PixelFormat::YUY2 | PixelFormat::Unknown => {
            desc.internal_format = 4;
            desc.supported = false;
            desc.bpp = 32;
        }
    }
    desc
}

/// Bytes per pixel of `format`/`ty` data, `None` if not handled
pub fn bytes_per_pixel(format: GLenum, ty: GLenum) -> Option<u32> {
    match ty {
        GL_UNSIGNED_BYTE_3_3_2 | GL_UNSIGNED_BYTE_2_3_3_REV => return Some(1),
        GL_UNSIGNED_SHORT_5_5_5_1
        | GL_UNSIGNED_SHORT_1_5_5_5_REV
        | GL_UNSIGNED_SHORT_5_6_5
        | GL_UNSIGNED_SHORT_5_6_5_REV => return Some(2),
        GL_UNSIGNED_BYTE => {}
        _ => return None,
    }
    match format {
        GL_LUMINANCE | GL_ALPHA => Some(1),
        GL_RGB | GL_BGR => Some(3),
        GL_RGBA | GL_BGRA => Some(4),
        _ => None,
    }
}

/// Name of a GL format, internal format or type constant
pub fn gl_value_name(value: GLenum) -> &'static str {
    match value {
        // Internal formats
        GL_R3_G3_B2 => "GL_R3_G3_B2",
        GL_RGB4 => "GL_RGB4",
        GL_RGB5 => "GL_RGB5",
        GL_RGB8 => "GL_RGB8",
        GL_RGB10 => "GL_RGB10",
        GL_RGB12 => "GL_RGB12",
        GL_RGB16 => "GL_RGB16",
        GL_RGBA2 => "GL_RGBA2",
        GL_RGBA4 => "GL_RGBA4",
        GL_RGB5_A1 => "GL_RGB5_A1",
        GL_RGBA8 => "GL_RGBA8",
        GL_RGB10_A2 => "GL_RGB10_A2",
        GL_RGBA12 => "GL_RGBA12",
        GL_RGBA16 => "GL_RGBA16",
        GL_LUMINANCE8 => "GL_LUMINANCE8",
        // Formats
        GL_RGB => "GL_RGB",
        GL_RGBA => "GL_RGBA",
        GL_RED => "GL_RED",
        GL_GREEN => "GL_GREEN",
        GL_BLUE => "GL_BLUE",
        GL_ALPHA => "GL_ALPHA",
        GL_LUMINANCE => "GL_LUMINANCE",
        GL_LUMINANCE_ALPHA => "GL_LUMINANCE_ALPHA",
        GL_COLOR_INDEX => "GL_COLOR_INDEX",
        GL_BGR => "GL_BGR",
        GL_BGRA => "GL_BGRA",
        // Types
        GL_BYTE => "GL_BYTE",
        GL_UNSIGNED_BYTE => "GL_UNSIGNED_BYTE",
        GL_SHORT => "GL_SHORT",
        GL_UNSIGNED_SHORT => "GL_UNSIGNED_SHORT",
        GL_INT => "GL_INT",
        GL_UNSIGNED_INT => "GL_UNSIGNED_INT",
        GL_FLOAT => "GL_FLOAT",
        GL_DOUBLE => "GL_DOUBLE",
        GL_2_BYTES => "GL_2_BYTES",
        GL_3_BYTES => "GL_3_BYTES",
        GL_4_BYTES => "GL_4_BYTES",
        GL_UNSIGNED_BYTE_3_3_2 => "GL_UNSIGNED_BYTE_3_3_2",
        GL_UNSIGNED_BYTE_2_3_3_REV => "GL_UNSIGNED_BYTE_2_3_3_REV",
        GL_UNSIGNED_SHORT_5_6_5 => "GL_UNSIGNED_SHORT_5_6_5",
        GL_UNSIGNED_SHORT_5_6_5_REV => "GL_UNSIGNED_SHORT_5_6_5_REV",
        GL_UNSIGNED_SHORT_4_4_4_4 => "GL_UNSIGNED_SHORT_4_4_4_4",
        GL_UNSIGNED_SHORT_4_4_4_4_REV => "GL_UNSIGNED_SHORT_4_4_4_4_REV",
        GL_UNSIGNED_SHORT_5_5_5_1 => "GL_UNSIGNED_SHORT_5_5_5_1",
        GL_UNSIGNED_SHORT_1_5_5_5_REV => "GL_UNSIGNED_SHORT_1_5_5_5_REV",
        GL_UNSIGNED_INT_8_8_8_8 => "GL_UNSIGNED_INT_8_8_8_8",
        GL_UNSIGNED_INT_8_8_8_8_REV => "GL_UNSIGNED_INT_8_8_8_8_REV",
        GL_UNSIGNED_INT_10_10_10_2 => "GL_UNSIGNED_INT_10_10_10_2",
        GL_UNSIGNED_INT_2_10_10_10_REV => "GL_UNSIGNED_INT_2_10_10_10_REV",
        _ => "Unknown format!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_formats_match_depth() {
        for format in PixelFormat::ALL {
            let desc = map_format(format);
            if desc.supported {
                assert_eq!(desc.bpp, format.depth(), "{} bpp mismatch", format);
            }
        }
    }

    #[test]
    fn test_unknown_falls_back_to_rgba() {
        for format in [PixelFormat::I420, PixelFormat::YUY2, PixelFormat::Unknown] {
            let desc = map_format(format);
            assert!(!desc.supported, "{}", format);
            assert_eq!(desc.bpp, 32, "{} bpp", format);
            assert_eq!(desc.internal_format, 4);
            assert_eq!((desc.format, desc.ty), (GL_RGBA, GL_UNSIGNED_BYTE));
        }
    }

    #[test]
    fn test_yv12_described_as_luma_plane() {
        let desc = map_format(PixelFormat::YV12);
        assert!(!desc.supported);
        assert_eq!((desc.bpp, desc.format), (8, GL_LUMINANCE));
        assert!(map_format(PixelFormat::Y800).supported);
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(bytes_per_pixel(GL_BGRA, GL_UNSIGNED_BYTE), Some(4));
        assert_eq!(bytes_per_pixel(GL_RGB, GL_UNSIGNED_SHORT_5_6_5), Some(2));
        assert_eq!(bytes_per_pixel(GL_LUMINANCE, GL_FLOAT), None);
        assert_eq!(bytes_per_pixel(GL_COLOR_INDEX, GL_UNSIGNED_BYTE), None);
    }

    #[test]
    fn test_value_names() {
        assert_eq!(gl_value_name(GL_LUMINANCE8), "GL_LUMINANCE8");
        assert_eq!(gl_value_name(GL_UNSIGNED_SHORT_1_5_5_5_REV), "GL_UNSIGNED_SHORT_1_5_5_5_REV");
        assert_eq!(gl_value_name(0xdead), "Unknown format!");
    }
}
