// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use glyuv::{ColorAdjustment, ConversionMethod, RenderConfig, Scaler, YuvConversion};

#[test]
fn test_config_default() {
    let config = RenderConfig::default();

    assert_eq!(config.conversion.method, ConversionMethod::Fragment);
    assert_eq!(config.adjustment, ColorAdjustment::NEUTRAL);
    assert_eq!(config.slice_height, 0, "Whole-frame uploads by default");
    assert!(!config.rectangle_textures);
}

#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = RenderConfig {
        conversion: YuvConversion::new(
            Scaler::Bicubic,
            Scaler::Bilinear,
            ConversionMethod::FragmentLookup,
        ),
        adjustment: ColorAdjustment {
            gamma_g: 1.8,
            ..ColorAdjustment::NEUTRAL
        },
        slice_height: 16,
        rectangle_textures: true,
        extra_extensions: Some("GL_ARB_texture_rectangle".to_string()),
    };
    config.save(&path).unwrap();

    assert_eq!(RenderConfig::load(&path).unwrap(), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig::load(&dir.path().join("absent.json")).unwrap();
    assert_eq!(config, RenderConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"conversion": {"method": "FragmentPow"}, "adjustment": {"saturation": 0.5}}"#,
    )
    .unwrap();

    let config = RenderConfig::load(&path).unwrap();
    assert_eq!(config.conversion.method, ConversionMethod::FragmentPow);
    assert_eq!(config.conversion.luma_scaler, Scaler::Bilinear);
    assert_eq!(config.adjustment.saturation, 0.5);
    assert_eq!(config.adjustment.contrast, 1.0);
}

#[test]
fn test_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = RenderConfig::load(&path).unwrap_err();
    assert!(matches!(err, glyuv::GlError::Config(_)));
    assert_eq!(RenderConfig::load_or_default(&path), RenderConfig::default());
}

#[test]
fn test_packed_conversion_matches_structured() {
    // Bicubic luma, bilinear chroma, lookup3d
    let conversion = YuvConversion::from_packed(0x016).unwrap();
    assert_eq!(conversion.luma_scaler, Scaler::Bicubic);
    assert_eq!(conversion.chroma_scaler, Scaler::Bilinear);
    assert_eq!(conversion.method, ConversionMethod::FragmentLookup3d);
    assert_eq!(conversion.to_packed(), 0x016);
    assert!(YuvConversion::from_packed(0).unwrap().is_none());
}
