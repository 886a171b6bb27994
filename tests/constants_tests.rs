// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants and format mapping

use glyuv::PixelFormat;
use glyuv::constants::*;
use glyuv::media::formats::{bytes_per_pixel, gl_value_name, map_format};

#[test]
fn test_lookup_resolutions() {
    assert_eq!(LOOKUP_BSPLINE_RES, 2048);
    assert_eq!(LOOKUP_RES, 512);
    assert_eq!(LOOKUP_3DRES, 32);
    // Y, U and V occupy units 0-2
    assert_eq!(FIRST_LOOKUP_UNIT, 3);
}

#[test]
fn test_supported_formats_have_their_depth() {
    for format in PixelFormat::ALL {
        let desc = map_format(format);
        if desc.supported {
            assert_eq!(desc.bpp, format.depth(), "{} bpp", format);
        }
    }
    assert!(map_format(PixelFormat::RGB24).supported);
    assert!(map_format(PixelFormat::BGRA).supported);
    assert!(map_format(PixelFormat::Y800).supported);
}

#[test]
fn test_unsupported_formats_fall_back_to_rgba() {
    for format in [PixelFormat::I420, PixelFormat::YUY2, PixelFormat::Unknown] {
        let desc = map_format(format);
        assert!(!desc.supported, "{} should be unsupported", format);
        assert_eq!(desc.format, GL_RGBA);
        assert_eq!(desc.ty, GL_UNSIGNED_BYTE);
        assert_eq!(desc.bpp, 32, "{} bpp", format);
    }
}

#[test]
fn test_bytes_per_pixel() {
    assert_eq!(bytes_per_pixel(GL_LUMINANCE, GL_UNSIGNED_BYTE), Some(1));
    assert_eq!(bytes_per_pixel(GL_BGR, GL_UNSIGNED_BYTE), Some(3));
    assert_eq!(bytes_per_pixel(GL_RGBA, GL_UNSIGNED_BYTE), Some(4));
    assert_eq!(bytes_per_pixel(GL_RGB, GL_UNSIGNED_SHORT_5_6_5), Some(2));
    assert_eq!(bytes_per_pixel(GL_RGB, GL_FLOAT), None);
}

#[test]
fn test_value_names() {
    assert_eq!(gl_value_name(GL_LUMINANCE), "GL_LUMINANCE");
    assert_eq!(gl_value_name(0xdead), "Unknown format!");
}
