// SPDX-License-Identifier: GPL-3.0-only

//! Pixel format identifiers of decoded video frames

use std::fmt;

/// Frame pixel formats known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    // ===== RGB order =====
    /// 15-bit RGB, 5 bits per channel
    RGB15,
    /// 16-bit RGB, 5-6-5
    RGB16,
    /// 24-bit RGB (3 bytes per pixel)
    RGB24,
    /// 32-bit RGBA (4 bytes per pixel)
    RGBA,

    // ===== BGR order =====
    BGR15,
    BGR16,
    BGR24,
    BGRA,

    // ===== YUV =====
    /// YV12 4:2:0 - Planar (Y + V + U planes)
    YV12,
    /// I420 4:2:0 - Planar (Y + U + V planes)
    I420,
    /// YUY2 4:2:2 - Packed (Y0 U Y1 V)
    YUY2,

    // ===== Grayscale =====
    /// Y800 - 8-bit luma only
    Y800,
    /// Y8 - same layout as Y800
    Y8,

    /// Unknown/unsupported format
    Unknown,
}

impl PixelFormat {
    /// Every named format, in table order
    pub const ALL: [PixelFormat; 13] = [
        PixelFormat::RGB15,
        PixelFormat::RGB16,
        PixelFormat::RGB24,
        PixelFormat::RGBA,
        PixelFormat::BGR15,
        PixelFormat::BGR16,
        PixelFormat::BGR24,
        PixelFormat::BGRA,
        PixelFormat::YV12,
        PixelFormat::I420,
        PixelFormat::YUY2,
        PixelFormat::Y800,
        PixelFormat::Y8,
    ];

    /// Parse a format name such as `"BGR24"` or `"YV12"`
    pub fn from_fourcc(fourcc: &str) -> Self {
        match fourcc.trim().to_uppercase().as_str() {
            "RGB15" => Self::RGB15,
            "RGB16" => Self::RGB16,
            "RGB24" | "RGB" | "RGB3" => Self::RGB24,
            "RGBA" | "RGB32" | "RGB4" => Self::RGBA,
            "BGR15" => Self::BGR15,
            "BGR16" => Self::BGR16,
            "BGR24" | "BGR" | "BGR3" => Self::BGR24,
            "BGRA" | "BGR32" | "BGR4" => Self::BGRA,
            "YV12" => Self::YV12,
            "I420" | "IYUV" => Self::I420,
            "YUY2" | "YUYV" => Self::YUY2,
            "Y800" | "GREY" => Self::Y800,
            "Y8" => Self::Y8,
            _ => Self::Unknown,
        }
    }

    pub fn fourcc(&self) -> &'static str {
        match self {
            Self::RGB15 => "RGB15",
            Self::RGB16 => "RGB16",
            Self::RGB24 => "RGB24",
            Self::RGBA => "RGBA",
            Self::BGR15 => "BGR15",
            Self::BGR16 => "BGR16",
            Self::BGR24 => "BGR24",
            Self::BGRA => "BGRA",
            Self::YV12 => "YV12",
            Self::I420 => "I420",
            Self::YUY2 => "YUY2",
            Self::Y800 => "Y800",
            Self::Y8 => "Y8",
            Self::Unknown => "UNKN",
        }
    }

    /// Check if channels are stored blue first
    pub fn is_bgr(&self) -> bool {
        matches!(self, Self::BGR15 | Self::BGR16 | Self::BGR24 | Self::BGRA)
    }

    /// Check if this is an RGB or BGR format
    pub fn is_rgb(&self) -> bool {
        self.is_bgr() || matches!(self, Self::RGB15 | Self::RGB16 | Self::RGB24 | Self::RGBA)
    }

    /// Check if this is a planar YUV format drawn through the conversion path
    pub fn is_planar_yuv(&self) -> bool {
        matches!(self, Self::YV12 | Self::I420)
    }

    /// Bits per pixel, 0 if unknown
    pub fn depth(&self) -> u32 {
        match self {
            Self::RGB15 | Self::BGR15 => 15,
            Self::RGB16 | Self::BGR16 | Self::YUY2 => 16,
            Self::RGB24 | Self::BGR24 => 24,
            Self::RGBA | Self::BGRA => 32,
            Self::YV12 | Self::I420 => 12,
            Self::Y800 | Self::Y8 => 8,
            Self::Unknown => 0,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fourcc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourcc_round_trip() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_fourcc(format.fourcc()), format);
        }
        assert_eq!(PixelFormat::from_fourcc("nv12"), PixelFormat::Unknown);
    }

    #[test]
    fn test_bgr_predicate() {
        assert!(PixelFormat::BGR16.is_bgr());
        assert!(!PixelFormat::RGB16.is_bgr());
        assert!(PixelFormat::RGB16.is_rgb());
        assert!(!PixelFormat::YV12.is_rgb());
    }
}
